//! Application configuration management.
//!
//! Currency records are read as-is: every field is optional and no defaults
//! are applied here. Resolving defaults is the job of the currency model.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency records keyed by currency code.
    #[serde(default)]
    pub currency: BTreeMap<String, CurrencyConfig>,
}

/// Raw configuration of a single currency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CurrencyConfig {
    /// Display name.
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    /// Display symbol.
    #[serde(default, deserialize_with = "text")]
    pub symbol: Option<String>,
    /// Whether balances in this currency may be withdrawn.
    #[serde(default, deserialize_with = "flag")]
    pub withdraw: Option<bool>,
    /// Number of minor-unit digits.
    #[serde(default)]
    pub decimals: Option<i64>,
    /// Maximum fractional digits shown for display amounts.
    #[serde(default)]
    pub scale: Option<i64>,
    /// Units of this currency per reference unit. Write fractional rates as
    /// strings so they never pass through a float.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// Income types and exchange permission markers.
    #[serde(default)]
    pub types: BTreeMap<String, TypeEntry>,
}

/// An entry of a currency's `types` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TypeEntry {
    /// A structured income type record.
    Record(IncomeTypeConfig),
    /// Any non-table value, e.g. `fromusd = true`.
    Marker(serde_json::Value),
}

/// Raw income type record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IncomeTypeConfig {
    /// Display name. Records without a name are not usable income types.
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    /// Ledger subject code deposits of this type are booked under.
    #[serde(default, deserialize_with = "text")]
    pub subject: Option<String>,
    /// Whether income of this type may be withdrawn.
    #[serde(default, deserialize_with = "flag")]
    pub withdraw: Option<bool>,
}

impl TypeEntry {
    /// Returns the structured record, if this entry is one.
    #[must_use]
    pub const fn as_record(&self) -> Option<&IncomeTypeConfig> {
        match self {
            Self::Record(record) => Some(record),
            Self::Marker(_) => None,
        }
    }

    /// Returns false for an explicit null marker, true for anything else.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Marker(serde_json::Value::Null))
    }
}

/// Scalar forms accepted for flags and text fields.
///
/// Config files in the wild use `1`/`0` as often as `true`/`false`, and
/// subject codes are frequently plain numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Scalar {
    fn into_flag(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Int(value) => value != 0,
            Self::Text(value) => {
                let value = value.trim();
                !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
            }
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_flag))
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `COFFER__*` variables
    /// (e.g. `COFFER__CURRENCY__USD__RATE=1`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COFFER").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not match
    /// the configuration shape.
    pub fn from_toml_str(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
