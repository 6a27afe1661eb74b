//! Registry of live currencies.
//!
//! Built once at startup from configuration and shared by reference. Currencies
//! are constructed lazily on first lookup; the registry guarantees a single
//! live instance per code even when lookups race.

use std::collections::BTreeMap;
use std::sync::Arc;

use coffer_shared::{AppConfig, AppError, AppResult, CurrencyConfig};
use dashmap::DashMap;
use tracing::debug;

use super::model::Currency;

/// Lazily constructed, shared currency instances keyed by code.
#[derive(Debug, Default)]
pub struct CurrencyRegistry {
    configs: BTreeMap<String, CurrencyConfig>,
    live: DashMap<String, Arc<Currency>>,
}

impl CurrencyRegistry {
    /// Creates a registry over the given currency records.
    #[must_use]
    pub fn new(configs: BTreeMap<String, CurrencyConfig>) -> Self {
        Self {
            configs,
            live: DashMap::new(),
        }
    }

    /// Creates a registry from the application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.currency.clone())
    }

    /// Returns the currency for `code`, constructing it on first use.
    ///
    /// Returns `None` if `code` is not configured.
    pub fn get(&self, code: &str) -> Option<Arc<Currency>> {
        if let Some(currency) = self.live.get(code) {
            return Some(Arc::clone(currency.value()));
        }

        let config = self.configs.get(code)?;
        // The entry holds the shard lock while constructing.
        let currency = self.live.entry(code.to_string()).or_insert_with(|| {
            debug!(currency = code, "constructing currency");
            Arc::new(Currency::new(code, config))
        });
        Some(Arc::clone(currency.value()))
    }

    /// Like [`Self::get`] but reports an unknown code as an error.
    pub fn require(&self, code: &str) -> AppResult<Arc<Currency>> {
        self.get(code)
            .ok_or_else(|| AppError::NotFound(format!("Currency '{code}' is not configured")))
    }

    /// Returns every configured currency, ordered by code.
    pub fn currencies(&self) -> Vec<Arc<Currency>> {
        self.configs.keys().filter_map(|code| self.get(code)).collect()
    }

    /// Configured currency codes, ordered.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// Number of configured currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True if no currency is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Number of currencies constructed so far.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry() -> CurrencyRegistry {
        CurrencyRegistry::new(BTreeMap::from([
            (
                "usd".to_string(),
                CurrencyConfig {
                    decimals: Some(2),
                    rate: Some(dec!(1)),
                    ..CurrencyConfig::default()
                },
            ),
            ("pts".to_string(), CurrencyConfig::default()),
        ]))
    }

    #[test]
    fn test_lazy_construction() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.live_count(), 0);

        let usd = registry.get("usd").unwrap();
        assert_eq!(usd.decimals(), 2);
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_same_instance_per_code() {
        let registry = registry();
        let first = registry.get("usd").unwrap();
        let second = registry.get("usd").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_code() {
        let registry = registry();
        assert!(registry.get("xxx").is_none());
        assert_eq!(registry.live_count(), 0);

        let err = registry.require("xxx").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_currencies_instantiates_all() {
        let registry = registry();
        let ids: Vec<_> = registry
            .currencies()
            .iter()
            .map(|currency| currency.id().to_string())
            .collect();
        assert_eq!(ids, ["pts", "usd"]);
        assert_eq!(registry.live_count(), 2);
        assert_eq!(registry.codes().collect::<Vec<_>>(), ["pts", "usd"]);
    }

    #[test]
    fn test_concurrent_lookups_share_one_instance() {
        let registry = registry();
        let instances: Vec<Arc<Currency>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get("pts").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(instances.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_empty_registry() {
        let registry = CurrencyRegistry::from_config(&AppConfig::default());
        assert!(registry.is_empty());
        assert!(registry.currencies().is_empty());
    }
}
