//! Core currency logic for Coffer.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Amounts never pass through floating point.
//!
//! # Modules
//!
//! - `currency` - Currency model, minor-unit conversion, exchange computation, registry
//! - `wallet` - Deposit, outlay and exchange delegation to a ledger

pub mod currency;
pub mod wallet;
