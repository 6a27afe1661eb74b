//! Income type lookup.

use coffer_shared::config::TypeEntry;
use serde::Serialize;

use super::model::Currency;

/// A usable income type: a configured record that has a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeType {
    /// Key of the entry in the currency's `types` table.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Ledger subject code, if configured.
    pub subject: Option<String>,
    /// Whether income of this type may be withdrawn. False unless configured.
    pub withdraw: bool,
}

impl IncomeType {
    /// The subject code, treating an empty string as missing.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref().filter(|subject| !subject.is_empty())
    }
}

impl Currency {
    /// Looks up an income type by key.
    ///
    /// Returns `None` for an empty key, an unknown key, a non-record entry or
    /// a record without a name.
    #[must_use]
    pub fn check_type(&self, income_type: &str) -> Option<IncomeType> {
        if income_type.is_empty() {
            return None;
        }
        let record = self.types().get(income_type).and_then(TypeEntry::as_record)?;
        let name = record.name.clone()?;

        Some(IncomeType {
            key: income_type.to_string(),
            name,
            subject: record.subject.clone(),
            withdraw: record.withdraw.unwrap_or(false),
        })
    }
}
