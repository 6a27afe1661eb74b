//! Wallet operations on top of a ledger.
//!
//! This module validates deposits, outlays and exchanges and converts their
//! amounts to minor units before handing them to a [`Ledger`]. Balances,
//! locking and withdrawal checks belong to the ledger.

pub mod error;
pub mod ledger;
pub mod service;

pub use error::WalletError;
pub use ledger::Ledger;
pub use service::DEFAULT_DISCOUNT;
