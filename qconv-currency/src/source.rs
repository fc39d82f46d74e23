//! Rate sources and cache refresh

use crate::cache::{CachedRates, RateCache};
use crate::{CurrencyError, RateTable};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Something that can produce a fresh rate table
pub trait RateSource {
    fn name(&self) -> String;
    fn fetch(&self) -> Result<RateTable, CurrencyError>;
}

/// `{ "base": "EUR", "rates": { "USD": 1.0832, ... } }`, the shape most
/// reference-rate feeds publish
#[derive(Debug, Deserialize)]
struct BaseRates {
    base: String,
    rates: BTreeMap<String, f64>,
}

pub struct BaseRatesFile {
    path: PathBuf,
}

impl BaseRatesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        BaseRatesFile { path: path.into() }
    }
}

impl RateSource for BaseRatesFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<RateTable, CurrencyError> {
        let text = fs::read_to_string(&self.path).map_err(|source| CurrencyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let data: BaseRates = serde_json::from_str(&text).map_err(|source| CurrencyError::Json {
            path: self.path.clone(),
            source,
        })?;

        if !is_currency_code(&data.base) {
            return Err(CurrencyError::InvalidCode(data.base));
        }
        let quotes = data.rates.iter().filter_map(|(code, rate)| {
            if is_currency_code(code) {
                Some((code.as_str(), *rate))
            } else {
                tracing::warn!("skipping invalid currency code {:?}", code);
                None
            }
        });
        Ok(RateTable::from_base_rates(&data.base, quotes))
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Debug)]
pub enum Refresh {
    /// Cache was younger than the max age and left alone
    Fresh(CachedRates),
    Updated(CachedRates),
}

impl Refresh {
    pub fn rates(&self) -> &CachedRates {
        match self {
            Refresh::Fresh(cached) | Refresh::Updated(cached) => cached,
        }
    }
}

/// Replace the cached rates from `source` if they are older than `max_age`
/// (or missing, or `force` is set).
pub fn refresh(
    cache: &RateCache,
    source: &dyn RateSource,
    max_age: Duration,
    force: bool,
) -> Result<Refresh, CurrencyError> {
    if !force {
        if let Ok(Some(cached)) = cache.load() {
            if cached.age() <= max_age {
                tracing::debug!("exchange rates are fresh, not refreshing");
                return Ok(Refresh::Fresh(cached));
            }
        }
    }

    tracing::info!("fetching exchange rates from {}", source.name());
    let table = source.fetch()?;
    if table.is_empty() {
        return Err(CurrencyError::NoRates(source.name()));
    }
    let cached = cache.store(&table)?;
    tracing::info!("exchange rates updated: {} pairs", table.len());
    Ok(Refresh::Updated(cached))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(RateTable);

    impl RateSource for FixedSource {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        fn fetch(&self) -> Result<RateTable, CurrencyError> {
            Ok(self.0.clone())
        }
    }

    fn usd_gbp() -> RateTable {
        let mut table = RateTable::new();
        table.insert("USD", "GBP", 0.8);
        table
    }

    #[test]
    fn test_base_rates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eur.json");
        fs::write(&path, r#"{"base":"EUR","date":"2026-10-13","rates":{"USD":1.25,"GBP":0.8,"bad!":2.0}}"#).unwrap();

        let table = BaseRatesFile::new(&path).fetch().unwrap();
        assert_eq!(table.get("EUR", "GBP"), Some(0.8));
        assert_eq!(table.codes(), vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_base_rates_file_invalid_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"base":"EURO","rates":{}}"#).unwrap();
        let err = BaseRatesFile::new(&path).fetch().unwrap_err();
        assert!(matches!(err, CurrencyError::InvalidCode(code) if code == "EURO"));
    }

    #[test]
    fn test_refresh_populates_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));

        let outcome = refresh(&cache, &FixedSource(usd_gbp()), Duration::from_secs(60), false).unwrap();
        assert!(matches!(outcome, Refresh::Updated(_)));
        assert_eq!(outcome.rates().table().get("GBP", "USD"), Some(1.25));
    }

    #[test]
    fn test_refresh_skips_fresh_cache_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));
        cache.store(&usd_gbp()).unwrap();

        let mut other = RateTable::new();
        other.insert("EUR", "CHF", 0.95);
        let source = FixedSource(other);

        let outcome = refresh(&cache, &source, Duration::from_secs(3600), false).unwrap();
        assert!(matches!(outcome, Refresh::Fresh(_)));

        let outcome = refresh(&cache, &source, Duration::from_secs(3600), true).unwrap();
        assert!(matches!(outcome, Refresh::Updated(_)));
        assert_eq!(cache.table().get("EUR", "CHF"), Some(0.95));
    }

    #[test]
    fn test_refresh_rejects_empty_source() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));
        let err = refresh(&cache, &FixedSource(RateTable::new()), Duration::ZERO, false).unwrap_err();
        assert!(matches!(err, CurrencyError::NoRates(_)));
        assert!(cache.load().unwrap().is_none());
    }
}
