//! Wallet error types.

use coffer_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Amount is not a plain non-negative decimal for the currency.
    #[error("Invalid amount for {currency}: {amount:?}")]
    InvalidAmount {
        /// Currency code.
        currency: String,
        /// The rejected input.
        amount: String,
    },

    /// Deposit type is not configured for the currency.
    #[error("Unknown income type: {0}")]
    UnknownIncomeType(String),

    /// Deposit type exists but has no subject.
    #[error("Income type {0} has no subject configured")]
    MisconfiguredIncomeType(String),

    /// Rates or permissions do not allow the exchange.
    #[error("Cannot exchange {from} to {to}")]
    NotExchangeable {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// Exchange discount must be positive.
    #[error("Exchange discount must be positive, got {0}")]
    InvalidDiscount(Decimal),

    /// The ledger rejected or failed the operation.
    #[error("Ledger error: {0}")]
    Ledger(String),
}

impl WalletError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::UnknownIncomeType(_) => "UNKNOWN_INCOME_TYPE",
            Self::MisconfiguredIncomeType(_) => "MISCONFIGURED_INCOME_TYPE",
            Self::NotExchangeable { .. } => "NOT_EXCHANGEABLE",
            Self::InvalidDiscount(_) => "INVALID_DISCOUNT",
            Self::Ledger(_) => "LEDGER_ERROR",
        }
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        let message = err.to_string();
        match err {
            WalletError::InvalidAmount { .. }
            | WalletError::UnknownIncomeType(_)
            | WalletError::InvalidDiscount(_) => Self::Validation(message),
            WalletError::MisconfiguredIncomeType(_) => Self::Config(message),
            WalletError::NotExchangeable { .. } => Self::BusinessRule(message),
            WalletError::Ledger(_) => Self::ExternalService(message),
        }
    }
}
