//! Cross-currency exchange through the common reference unit.
//!
//! Each currency's `rate` says how many of its units one reference unit buys.
//! An amount is normalised to the reference unit by dividing by the source
//! rate, then projected into the target by multiplying with the target rate:
//!
//! `target = trunc(source_minor * to.rate / from.rate)`
//!
//! The product and quotient are computed on unbounded integers and truncated
//! toward zero, so the receiving side is never credited more than the exact
//! quotient warrants.

use num_bigint::BigInt;
use rust_decimal::Decimal;
use tracing::debug;

use super::conversion::scale_by_ratio;
use super::model::Currency;

/// Key a target currency's `types` table must contain to accept inflow from
/// `source_id`.
#[must_use]
pub fn exchange_key(source_id: &str) -> String {
    format!("from{source_id}")
}

impl Currency {
    /// True if the rate allows exchange at all.
    #[must_use]
    pub fn is_exchangeable(&self) -> bool {
        self.rate() > Decimal::ZERO
    }

    /// True if this currency declares it accepts inflow from `source`.
    #[must_use]
    pub fn accepts_from(&self, source: &Self) -> bool {
        self.types()
            .get(&exchange_key(source.id()))
            .is_some_and(|entry| entry.is_set())
    }

    /// Computes how many minor units of `to` a display `amount` of this
    /// currency is worth.
    ///
    /// Returns `None` when either rate is zero, when `to` does not accept
    /// inflow from this currency, or when `amount` is not a valid display
    /// amount.
    #[must_use]
    pub fn exchange_amount(&self, to: &Self, amount: &str) -> Option<BigInt> {
        let minor = self.to_minor_unit(amount)?;
        self.exchange_minor(to, &minor)
    }

    /// Same as [`Self::exchange_amount`] for an amount already in minor units.
    #[must_use]
    pub fn exchange_minor(&self, to: &Self, minor: &BigInt) -> Option<BigInt> {
        if !self.is_exchangeable() || !to.is_exchangeable() || !to.accepts_from(self) {
            debug!(from = %self, to = %to, "currency pair is not exchangeable");
            return None;
        }

        scale_by_ratio(minor, to.rate(), self.rate())
    }
}
