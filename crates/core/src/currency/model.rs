//! The `Currency` value object.
//!
//! A `Currency` is built once from its configuration record and never changes
//! afterwards. Defaults are applied and out-of-range values are coerced at
//! construction, so every accessor returns a usable value.

use std::collections::BTreeMap;
use std::fmt;

use coffer_shared::config::{CurrencyConfig, TypeEntry};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::conversion;

/// Minor-unit digits used when the configuration omits `decimals`.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Display digits used when the configuration omits `scale`.
pub const DEFAULT_SCALE: u32 = 6;

/// Resolved configuration of a currency, defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencySettings {
    /// Currency code.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display symbol.
    pub symbol: String,
    /// Whether balances in this currency may be withdrawn.
    pub withdraw: bool,
    /// Number of minor-unit digits.
    pub decimals: u32,
    /// Maximum fractional digits shown for display amounts.
    pub scale: u32,
    /// Units of this currency per reference unit; zero disables exchange.
    pub rate: Decimal,
    /// Income types and exchange permission markers.
    pub types: BTreeMap<String, TypeEntry>,
}

/// A currency with fixed-point minor units.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    settings: CurrencySettings,
    unit_factor: BigInt,
}

impl Currency {
    /// Builds a currency from its configuration record.
    ///
    /// Never fails: negative `decimals` and `scale` become zero and a
    /// negative `rate` becomes zero.
    #[must_use]
    pub fn new(code: &str, config: &CurrencyConfig) -> Self {
        let decimals = coerce_digits(code, "decimals", config.decimals, DEFAULT_DECIMALS);
        let scale = coerce_digits(code, "scale", config.scale, DEFAULT_SCALE);

        let rate = match config.rate {
            Some(rate) if rate.is_sign_negative() && !rate.is_zero() => {
                warn!(currency = code, %rate, "negative exchange rate coerced to 0");
                Decimal::ZERO
            }
            Some(rate) => rate,
            None => Decimal::ZERO,
        };

        let settings = CurrencySettings {
            id: code.to_string(),
            name: config.name.clone().unwrap_or_else(|| code.to_string()),
            symbol: config.symbol.clone().unwrap_or_else(|| code.to_uppercase()),
            withdraw: config.withdraw.unwrap_or(false),
            decimals,
            scale,
            rate,
            types: config.types.clone(),
        };

        Self {
            unit_factor: conversion::unit_factor(decimals),
            settings,
        }
    }

    /// Currency code.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.settings.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// Display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.settings.symbol
    }

    /// Whether balances in this currency may be withdrawn.
    #[must_use]
    pub const fn withdraw(&self) -> bool {
        self.settings.withdraw
    }

    /// Number of minor-unit digits.
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.settings.decimals
    }

    /// Default display scale.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.settings.scale
    }

    /// Exchange rate against the reference unit.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.settings.rate
    }

    /// Income types and exchange permission markers.
    #[must_use]
    pub const fn types(&self) -> &BTreeMap<String, TypeEntry> {
        &self.settings.types
    }

    /// `10^decimals`.
    #[must_use]
    pub const fn unit_factor(&self) -> &BigInt {
        &self.unit_factor
    }

    /// The full resolved configuration.
    #[must_use]
    pub const fn conf(&self) -> &CurrencySettings {
        &self.settings
    }

    /// Converts a display amount to minor units. `None` if `value` is not a
    /// plain non-negative decimal.
    #[must_use]
    pub fn to_minor_unit(&self, value: &str) -> Option<BigInt> {
        conversion::to_minor_unit(value, &self.unit_factor)
    }

    /// Converts minor units to a display amount, truncated to `scale`
    /// fractional digits (the configured scale when `None`).
    #[must_use]
    pub fn from_minor_unit(&self, value: &str, scale: Option<u32>) -> String {
        conversion::from_minor_unit(value, &self.unit_factor, scale.unwrap_or(self.scale()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

fn coerce_digits(code: &str, field: &'static str, value: Option<i64>, default: u32) -> u32 {
    let Some(value) = value else {
        return default;
    };
    if value < 0 {
        warn!(currency = code, field, value, "negative digit count coerced to 0");
        return 0;
    }
    u32::try_from(value).unwrap_or_else(|_| {
        warn!(currency = code, field, value, "digit count saturated to u32::MAX");
        u32::MAX
    })
}
