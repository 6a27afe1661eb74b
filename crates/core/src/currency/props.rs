//! Property-based tests for currency conversion and exchange.
//!
//! - Round trip: display -> minor -> display is lossless within `decimals`
//! - Truncation: extra fractional digits never round up
//! - Exchange: result never exceeds the exact rational quotient

use std::collections::BTreeMap;

use coffer_shared::config::{CurrencyConfig, TypeEntry};
use num_bigint::BigInt;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::exchange::exchange_key;
use super::model::Currency;

/// Strategy to generate minor-unit digit counts (0 to 40).
fn decimals() -> impl Strategy<Value = u32> {
    0u32..=40
}

/// Strategy to generate positive rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Builds a canonical display string: no trailing fractional zeros.
fn canonical(integer: u64, fraction: &str) -> String {
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

fn currency(code: &str, decimals: u32, rate: Decimal, accepts: Option<&str>) -> Currency {
    let types = accepts
        .map(|source| {
            BTreeMap::from([(exchange_key(source), TypeEntry::Marker(serde_json::Value::Bool(true)))])
        })
        .unwrap_or_default();
    Currency::new(
        code,
        &CurrencyConfig {
            decimals: Some(i64::from(decimals)),
            scale: Some(i64::from(decimals)),
            rate: Some(rate),
            types,
            ..CurrencyConfig::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount with at most `decimals` fractional digits, converting
    /// to minor units and back SHALL return the canonical amount.
    #[test]
    fn prop_round_trip(
        decimals in decimals(),
        integer in 0u64..1_000_000_000,
        fraction in "[0-9]{0,8}",
    ) {
        let keep = usize::try_from(decimals).unwrap().min(fraction.len());
        let amount = canonical(integer, &fraction[..keep]);
        let currency = currency("x", decimals, Decimal::ONE, None);

        let minor = currency.to_minor_unit(&amount).unwrap();
        prop_assert_eq!(currency.from_minor_unit(&minor.to_string(), None), amount);
    }

    /// *For any* amount, the minor-unit value SHALL equal the amount
    /// truncated (not rounded) to `decimals` places.
    #[test]
    fn prop_never_rounds_up(
        decimals in decimals(),
        integer in 0u64..1_000_000_000,
        fraction in "[0-9]{1,12}",
    ) {
        let amount = format!("{integer}.{fraction}");
        let currency = currency("x", decimals, Decimal::ONE, None);

        let minor = currency.to_minor_unit(&amount).unwrap();
        // amount * 10^decimals == digits / 10^len(fraction) * 10^decimals
        let digits: BigInt = format!("{integer}{fraction}").parse().unwrap();
        let exact_scale = BigInt::from(10_u8).pow(u32::try_from(fraction.len()).unwrap());
        let scaled = digits * currency.unit_factor();
        prop_assert!(&minor * &exact_scale <= scaled);
        prop_assert!((&minor + 1) * &exact_scale > scaled);
    }

    /// *For any* minor-unit value, a negative input SHALL format as the
    /// positive one with a leading minus.
    #[test]
    fn prop_negative_mirrors_positive(
        decimals in decimals(),
        value in "[1-9][0-9]{0,40}",
    ) {
        let currency = currency("x", decimals, Decimal::ONE, None);
        let positive = currency.from_minor_unit(&value, None);
        let negative = currency.from_minor_unit(&format!("-{value}"), None);
        prop_assert_eq!(negative, format!("-{positive}"));
    }

    /// *For any* exchangeable pair, the result SHALL be the exact quotient
    /// truncated toward zero.
    #[test]
    fn prop_exchange_truncates(
        from_rate in positive_rate(),
        to_rate in positive_rate(),
        minor in "(0|[1-9][0-9]{0,40})",
    ) {
        let from = currency("a", 2, from_rate, None);
        let to = currency("b", 2, to_rate, Some("a"));
        let minor: BigInt = minor.parse().unwrap();

        // Both rates carry 4 fractional digits, so compare on their mantissas.
        let from_units = BigInt::from(from_rate.mantissa());
        let to_units = BigInt::from(to_rate.mantissa());
        let result = from.exchange_minor(&to, &minor).unwrap();
        let product = &minor * &to_units;
        prop_assert!(&result * &from_units <= product);
        prop_assert!((&result + 1) * &from_units > product);
    }

    /// *For any* configuration, building twice SHALL give currencies that
    /// convert identically.
    #[test]
    fn prop_construction_is_deterministic(
        decimals in decimals(),
        rate in positive_rate(),
        amount in "(0|[1-9][0-9]{0,6})(\\.[0-9]{1,6})?",
    ) {
        let first = currency("x", decimals, rate, None);
        let second = currency("x", decimals, rate, None);
        let minor = first.to_minor_unit(&amount);
        prop_assert_eq!(minor.clone(), second.to_minor_unit(&amount));
        let minor = minor.unwrap().to_string();
        prop_assert_eq!(first.from_minor_unit(&minor, None), second.from_minor_unit(&minor, None));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// `to_minor_unit("0")` is zero for any precision.
    #[test]
    fn test_zero_for_any_decimals() {
        for decimals in 0..=40 {
            let currency = currency("x", decimals, Decimal::ONE, None);
            assert_eq!(currency.to_minor_unit("0"), Some(BigInt::from(0)));
        }
    }

    /// Specific example: 1500 minor at 3 decimals is 1.5.
    #[test]
    fn test_fifteen_hundred_minor() {
        let currency = Currency::new(
            "x",
            &CurrencyConfig {
                decimals: Some(3),
                ..CurrencyConfig::default()
            },
        );
        assert_eq!(currency.from_minor_unit("1500", Some(6)), "1.5");
        assert_eq!(currency.from_minor_unit("-1500", Some(6)), "-1.5");
        assert_eq!(currency.from_minor_unit("notanumber", None), "0");
    }

    /// Specific example: A(rate 2) -> B(rate 4) of 10 is 2000 minor.
    #[test]
    fn test_reference_exchange() {
        let a = currency("A", 2, dec!(2), None);
        let b = currency("B", 2, dec!(4), Some("A"));
        assert_eq!(a.exchange_amount(&b, "10"), Some(BigInt::from(2000)));

        let b = currency("B", 2, dec!(4), None);
        assert_eq!(a.exchange_amount(&b, "10"), None);
    }
}
