//! On-disk exchange-rate cache

use crate::{CurrencyError, Quote, RateTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rates older than this are refreshed
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(6 * 60 * 60);

/// A rate table plus the time it was fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRates {
    /// Unix seconds
    pub updated_at: u64,
    pub rates: Vec<Quote>,
}

impl CachedRates {
    pub fn new(table: &RateTable, updated_at: u64) -> Self {
        CachedRates {
            updated_at,
            rates: table.pairs(),
        }
    }

    pub fn table(&self) -> RateTable {
        RateTable::from_quotes(self.rates.iter().cloned())
    }

    /// Age relative to `now` (unix seconds); zero if the stamp is in the future.
    pub fn age_at(&self, now: u64) -> Duration {
        Duration::from_secs(now.saturating_sub(self.updated_at))
    }

    pub fn age(&self) -> Duration {
        self.age_at(unix_now())
    }
}

pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RateCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been cached yet.
    pub fn load(&self) -> Result<Option<CachedRates>, CurrencyError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path).map_err(|source| CurrencyError::Io {
            path: self.path.clone(),
            source,
        })?;
        let cached = serde_json::from_str(&text).map_err(|source| CurrencyError::Json {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(cached))
    }

    /// The cached table, or an empty one when there is no usable cache.
    pub fn table(&self) -> RateTable {
        match self.load() {
            Ok(Some(cached)) => cached.table(),
            Ok(None) => RateTable::new(),
            Err(e) => {
                tracing::warn!("ignoring rate cache: {}", e);
                RateTable::new()
            }
        }
    }

    pub fn store(&self, table: &RateTable) -> Result<CachedRates, CurrencyError> {
        let cached = CachedRates::new(table, unix_now());
        self.write(&cached)?;
        Ok(cached)
    }

    pub fn write(&self, cached: &CachedRates) -> Result<(), CurrencyError> {
        let io_err = |source| CurrencyError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(cached).map_err(|source| CurrencyError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)?;
        tracing::debug!("cached {} rates in {}", cached.rates.len(), self.path.display());
        Ok(())
    }

    pub fn age(&self) -> Option<Duration> {
        self.load().ok().flatten().map(|cached| cached.age())
    }

    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age().map_or(false, |age| age <= max_age)
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// "2 hours 5 minutes ago"; seconds are shown only under a minute.
pub fn human_age(age: Duration) -> String {
    let total = age.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    let mut parts: Vec<String> = Vec::new();
    for (count, unit) in [(days, "day"), (hours, "hour"), (minutes, "minute")] {
        match count {
            0 => {}
            1 => parts.push(format!("1 {}", unit)),
            n => parts.push(format!("{} {}s", n, unit)),
        }
    }
    if parts.is_empty() {
        match seconds {
            1 => parts.push("1 second".to_string()),
            n => parts.push(format!("{} seconds", n)),
        }
    }
    parts.push("ago".to_string());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_age() {
        assert_eq!(human_age(Duration::from_secs(7_500)), "2 hours 5 minutes ago");
        assert_eq!(human_age(Duration::from_secs(86_400 + 61)), "1 day 1 minute ago");
        assert_eq!(human_age(Duration::from_secs(42)), "42 seconds ago");
        assert_eq!(human_age(Duration::from_secs(3_600 + 59)), "1 hour ago");
    }

    #[test]
    fn test_missing_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));
        assert!(cache.load().unwrap().is_none());
        assert!(cache.age().is_none());
        assert!(!cache.is_fresh(DEFAULT_MAX_AGE));
        assert!(cache.table().is_empty());
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("nested").join("rates.json"));

        let mut table = RateTable::new();
        table.insert("USD", "GBP", 0.8);
        cache.store(&table).unwrap();

        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.table(), table);
        assert!(cache.is_fresh(DEFAULT_MAX_AGE));
    }

    #[test]
    fn test_stale_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RateCache::new(dir.path().join("rates.json"));
        let old = CachedRates::new(&RateTable::new(), unix_now() - 7 * 60 * 60);
        cache.write(&old).unwrap();

        assert!(!cache.is_fresh(DEFAULT_MAX_AGE));
        assert!(cache.age().unwrap() >= Duration::from_secs(7 * 60 * 60));
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.json");
        fs::write(&path, "not json").unwrap();
        let cache = RateCache::new(&path);
        assert!(matches!(cache.load(), Err(CurrencyError::Json { .. })));
        assert!(cache.table().is_empty());
    }

    #[test]
    fn test_age_in_future_is_zero() {
        let cached = CachedRates::new(&RateTable::new(), 200);
        assert_eq!(cached.age_at(100), Duration::ZERO);
        assert_eq!(cached.age_at(260), Duration::from_secs(60));
    }
}
