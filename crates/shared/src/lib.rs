//! Shared configuration and errors for Coffer.
//!
//! This crate provides what every other crate needs:
//! - Currency configuration records and the loader that reads them
//! - Application-wide error types

pub mod config;
pub mod error;

pub use config::{AppConfig, CurrencyConfig, IncomeTypeConfig, TypeEntry};
pub use error::{AppError, AppResult};
