//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod exchange;
pub mod income;
pub mod model;
pub mod registry;

#[cfg(test)]
mod props;

pub use exchange::exchange_key;
pub use income::IncomeType;
pub use model::{Currency, CurrencySettings};
pub use registry::CurrencyRegistry;
