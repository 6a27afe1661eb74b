//! Deposit, outlay and exchange for a currency.

use num_bigint::BigInt;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::WalletError;
use super::ledger::Ledger;
use crate::currency::Currency;

/// Discount applied to an exchange when the caller has none.
pub const DEFAULT_DISCOUNT: Decimal = Decimal::ONE;

impl Currency {
    /// Deposits a display `amount` as income of `income_type`.
    ///
    /// # Errors
    ///
    /// - `UnknownIncomeType` if [`Currency::check_type`] finds no usable type
    /// - `MisconfiguredIncomeType` if the type has no subject
    /// - `InvalidAmount` if `amount` is not a valid display amount
    /// - whatever the ledger returns
    pub fn deposit<L>(
        &self,
        ledger: &L,
        amount: &str,
        income_type: &str,
        subject_id: &str,
    ) -> Result<(), WalletError>
    where
        L: Ledger + ?Sized,
    {
        let income = self
            .check_type(income_type)
            .ok_or_else(|| WalletError::UnknownIncomeType(income_type.to_string()))?;
        let subject = income
            .subject()
            .ok_or_else(|| WalletError::MisconfiguredIncomeType(income_type.to_string()))?;
        let minor = self.require_minor_unit(amount)?;

        info!(
            currency = %self,
            amount = %minor,
            income_type,
            subject,
            subject_id,
            "Recording deposit"
        );
        ledger.record_deposit(self, minor, income_type, subject, subject_id)
    }

    /// Spends a display `amount` under `subject`.
    ///
    /// Balance and withdrawal checks are left to the ledger.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if `amount` is not a valid display amount, otherwise
    /// whatever the ledger returns.
    pub fn outlay<L>(
        &self,
        ledger: &L,
        amount: &str,
        subject: &str,
        subject_id: &str,
    ) -> Result<(), WalletError>
    where
        L: Ledger + ?Sized,
    {
        let minor = self.require_minor_unit(amount)?;

        info!(currency = %self, amount = %minor, subject, subject_id, "Recording outlay");
        ledger.record_outlay(self, minor, subject, subject_id)
    }

    /// Exchanges a display `amount` of this currency into `to`.
    ///
    /// Returns `Ok(None)` without touching the ledger when the pair is not
    /// exchangeable, otherwise the amount of `to` the ledger credited.
    /// Pass [`DEFAULT_DISCOUNT`] for no discount.
    ///
    /// # Errors
    ///
    /// `InvalidDiscount` for a discount that is not positive, `InvalidAmount`
    /// for a malformed amount, otherwise whatever the ledger returns.
    pub fn exchange<L>(
        &self,
        ledger: &L,
        to: &Self,
        amount: &str,
        discount: Decimal,
    ) -> Result<Option<BigInt>, WalletError>
    where
        L: Ledger + ?Sized,
    {
        if discount <= Decimal::ZERO {
            return Err(WalletError::InvalidDiscount(discount));
        }
        let minor = self.require_minor_unit(amount)?;

        let Some(base) = self.exchange_minor(to, &minor) else {
            return Ok(None);
        };

        info!(
            from = %self,
            to = %to,
            amount = %minor,
            base = %base,
            %discount,
            "Recording exchange"
        );
        ledger.record_exchange(self, to, minor, discount).map(Some)
    }

    fn require_minor_unit(&self, amount: &str) -> Result<BigInt, WalletError> {
        self.to_minor_unit(amount).ok_or_else(|| {
            debug!(currency = %self, amount, "Rejected amount");
            WalletError::InvalidAmount {
                currency: self.id().to_string(),
                amount: amount.to_string(),
            }
        })
    }
}
