//! The ledger collaborator.

use num_bigint::BigInt;
use rust_decimal::Decimal;

use super::error::WalletError;
use crate::currency::Currency;

/// Records money movement.
///
/// Amounts passed in are integer minor units of the given currency, already
/// validated. Implementations own balances, locking and withdrawal rules.
#[cfg_attr(test, mockall::automock)]
pub trait Ledger {
    /// Credits `amount` of `currency` as income of `income_type`, booked
    /// under `subject` for `subject_id`.
    fn record_deposit(
        &self,
        currency: &Currency,
        amount: BigInt,
        income_type: &str,
        subject: &str,
        subject_id: &str,
    ) -> Result<(), WalletError>;

    /// Debits `amount` of `currency` under `subject` for `subject_id`.
    fn record_outlay(
        &self,
        currency: &Currency,
        amount: BigInt,
        subject: &str,
        subject_id: &str,
    ) -> Result<(), WalletError>;

    /// Moves `amount` minor units of `from` into `to`, applying `discount`
    /// to the rate-computed amount (see [`Currency::exchange_minor`] and
    /// [`scale_by_ratio`](crate::currency::conversion::scale_by_ratio)).
    /// Returns the amount of `to` credited.
    fn record_exchange(
        &self,
        from: &Currency,
        to: &Currency,
        amount: BigInt,
        discount: Decimal,
    ) -> Result<BigInt, WalletError>;
}
