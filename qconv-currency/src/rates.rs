//! Exchange-rate table
//!
//! `amount_in_b = amount_in_a * rate(a, b)`. Codes are stored upper-case.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// One ordered rate, as persisted in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

/// Exchange rates keyed by ordered currency pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `rate` for `(a, b)` and its reciprocal for `(b, a)`.
    ///
    /// Zero, negative and non-finite rates are skipped; returns whether the
    /// pair was stored.
    pub fn insert(&mut self, a: &str, b: &str, rate: f64) -> bool {
        if !(rate.is_finite() && rate > 0.0) {
            tracing::warn!("no exchange rate for {}{}: {}", a, b, rate);
            return false;
        }
        let (a, b) = (a.to_uppercase(), b.to_uppercase());
        self.rates.insert((b.clone(), a.clone()), 1.0 / rate);
        self.rates.insert((a, b), rate);
        true
    }

    /// Build every ordered pair from rates quoted against a single base
    /// currency (`1 base = rate code`).
    pub fn from_base_rates<'a, I>(base: &str, quotes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let base = base.to_uppercase();
        let mut against_base: Vec<(String, f64)> = vec![(base.clone(), 1.0)];
        for (code, rate) in quotes {
            let code = code.to_uppercase();
            if code == base {
                continue;
            }
            if !(rate.is_finite() && rate > 0.0) {
                tracing::warn!("no exchange rate for {}{}: {}", base, code, rate);
                continue;
            }
            against_base.push((code, rate));
        }

        let mut table = Self::new();
        for (i, (a, rate_a)) in against_base.iter().enumerate() {
            for (b, rate_b) in &against_base[i + 1..] {
                table.insert(a, b, rate_b / rate_a);
            }
        }
        table
    }

    /// Restore a table from stored quotes, exactly as given.
    pub fn from_quotes(quotes: impl IntoIterator<Item = Quote>) -> Self {
        let rates = quotes
            .into_iter()
            .map(|q| ((q.from.to_uppercase(), q.to.to_uppercase()), q.rate))
            .collect();
        RateTable { rates }
    }

    /// Rate for `1 a = rate b`. Codes are matched as given.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.rates.get(&(a.to_string(), b.to_string())).copied()
    }

    /// Number of ordered pairs
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All ordered pairs, sorted by code
    pub fn pairs(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self
            .rates
            .iter()
            .map(|((from, to), rate)| Quote {
                from: from.clone(),
                to: to.clone(),
                rate: *rate,
            })
            .collect();
        quotes.sort_by(|x, y| (&x.from, &x.to).cmp(&(&y.from, &y.to)));
        quotes
    }

    /// Every code appearing in a pair, sorted and deduplicated
    pub fn codes(&self) -> Vec<String> {
        let codes: BTreeSet<&String> = self.rates.keys().flat_map(|(a, b)| [a, b]).collect();
        codes.into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_stores_reciprocal() {
        let mut table = RateTable::new();
        assert!(table.insert("usd", "gbp", 0.8));
        assert_eq!(table.get("USD", "GBP"), Some(0.8));
        assert_eq!(table.get("GBP", "USD"), Some(1.25));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_skips_unusable_rates() {
        let mut table = RateTable::new();
        assert!(!table.insert("USD", "XXX", 0.0));
        assert!(!table.insert("USD", "YYY", -1.0));
        assert!(!table.insert("USD", "ZZZ", f64::NAN));
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_base_rates_cross_pairs() {
        let table = RateTable::from_base_rates("EUR", [("USD", 1.25), ("GBP", 0.8), ("JPY", 0.0)]);

        assert_eq!(table.get("EUR", "USD"), Some(1.25));
        assert_eq!(table.get("USD", "EUR"), Some(0.8));
        let usd_gbp = table.get("USD", "GBP").unwrap();
        assert!((usd_gbp - 0.64).abs() < 1e-12);
        // three codes, six ordered pairs; JPY had no usable quote
        assert_eq!(table.len(), 6);
        assert_eq!(table.codes(), vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_reciprocal_invariant() {
        let table = RateTable::from_base_rates("EUR", [("USD", 1.0832), ("CHF", 0.9461), ("SEK", 11.37)]);
        for quote in table.pairs() {
            let back = table.get(&quote.to, &quote.from).unwrap();
            assert!((quote.rate * back - 1.0).abs() < 1e-12, "{:?}", quote);
        }
    }

    #[test]
    fn test_from_quotes_keeps_values() {
        let table = RateTable::from_quotes(vec![Quote {
            from: "usd".into(),
            to: "gbp".into(),
            rate: 0.0,
        }]);
        assert_eq!(table.get("USD", "GBP"), Some(0.0));
        assert_eq!(table.get("GBP", "USD"), None);
    }
}
