//! Conversion between display amounts and integer minor units.
//!
//! CRITICAL: Rounding strategy at both boundaries:
//! - Display to minor unit truncates extra fractional digits, never rounds up
//! - Minor unit to display truncates to the requested scale
//! - Minor units are unbounded `BigInt`s, so no precision limit applies

use num_bigint::BigInt;
use num_traits::Zero;
use rust_decimal::Decimal;

/// Returns `10^decimals` exactly.
#[must_use]
pub fn unit_factor(decimals: u32) -> BigInt {
    BigInt::from(10_u8).pow(decimals)
}

/// Converts a display amount such as `"12.5"` to minor units.
///
/// Accepts `0` or an integer without a leading zero, optionally followed by a
/// dot and at least one digit. Returns `None` for anything else, including
/// signs and exponents. Fraction digits that do not fit `unit_factor` are
/// dropped.
///
/// # Example
///
/// ```
/// use num_bigint::BigInt;
/// use coffer_core::currency::conversion::{to_minor_unit, unit_factor};
///
/// assert_eq!(to_minor_unit("12.345", &unit_factor(2)), Some(BigInt::from(1234)));
/// assert_eq!(to_minor_unit("-1", &unit_factor(2)), None);
/// ```
#[must_use]
pub fn to_minor_unit(value: &str, unit_factor: &BigInt) -> Option<BigInt> {
    let (integer, fraction) = split_display_amount(value)?;

    let digits = format!("{integer}{fraction}");
    let numerator = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let denominator = BigInt::from(10_u8).pow(u32::try_from(fraction.len()).ok()?);

    Some(numerator * unit_factor / denominator)
}

/// Converts a minor-unit integer string back to a display amount.
///
/// The quotient is truncated to `scale` fractional digits and trailing zeros
/// are stripped. A negative input is formatted as its magnitude with `-`
/// prepended. Input that is not a non-zero integer yields `"0"`.
///
/// # Example
///
/// ```
/// use coffer_core::currency::conversion::{from_minor_unit, unit_factor};
///
/// assert_eq!(from_minor_unit("1500", &unit_factor(3), 6), "1.5");
/// assert_eq!(from_minor_unit("-1500", &unit_factor(3), 6), "-1.5");
/// assert_eq!(from_minor_unit("abc", &unit_factor(3), 6), "0");
/// ```
#[must_use]
pub fn from_minor_unit(value: &str, unit_factor: &BigInt, scale: u32) -> String {
    if unit_factor.is_zero() {
        return value.to_string();
    }

    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    if !is_positive_integer(digits) {
        return "0".to_string();
    }
    let Some(magnitude) = BigInt::parse_bytes(digits.as_bytes(), 10) else {
        return "0".to_string();
    };

    let scaled = magnitude * BigInt::from(10_u8).pow(scale) / unit_factor;
    let display = format_fixed(&scaled.to_string(), scale);

    if negative {
        format!("-{display}")
    } else {
        display
    }
}

/// Multiplies `value` by `numerator / denominator`, truncating toward zero.
///
/// The ratio is applied to the decimals' mantissas, so the result is exact at
/// any magnitude. Ledgers use it to apply an exchange discount:
/// `scale_by_ratio(&base, discount, Decimal::ONE)`.
///
/// Returns `None` when `denominator` is zero.
#[must_use]
pub fn scale_by_ratio(value: &BigInt, numerator: Decimal, denominator: Decimal) -> Option<BigInt> {
    if denominator.is_zero() {
        return None;
    }
    let top = value
        * BigInt::from(numerator.mantissa())
        * BigInt::from(10_u8).pow(denominator.scale());
    let bottom = BigInt::from(denominator.mantissa()) * BigInt::from(10_u8).pow(numerator.scale());
    Some(top / bottom)
}

/// Places a decimal point `scale` digits from the right of `digits`, then
/// strips trailing fractional zeros and a trailing point.
fn format_fixed(digits: &str, scale: u32) -> String {
    let scale = usize::try_from(scale).unwrap_or(usize::MAX);
    if scale == 0 {
        return digits.to_string();
    }

    let padded = if digits.len() <= scale {
        format!("{}{digits}", "0".repeat(scale + 1 - digits.len()))
    } else {
        digits.to_string()
    };
    let (integer, fraction) = padded.split_at(padded.len() - scale);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

/// Splits a well-formed display amount into integer and fraction digits.
fn split_display_amount(value: &str) -> Option<(&str, &str)> {
    let (integer, fraction) = match value.split_once('.') {
        Some((integer, fraction)) => {
            if fraction.is_empty() {
                return None;
            }
            (integer, fraction)
        }
        None => (value, ""),
    };

    let integer_ok = integer == "0" || is_positive_integer(integer);
    let fraction_ok = fraction.bytes().all(|b| b.is_ascii_digit());

    (integer_ok && fraction_ok).then_some((integer, fraction))
}

/// True for `[1-9][0-9]*`.
fn is_positive_integer(digits: &str) -> bool {
    let mut bytes = digits.bytes();
    matches!(bytes.next(), Some(b'1'..=b'9')) && bytes.all(|b| b.is_ascii_digit())
}
