//! Exchange-rate table and its cache entry.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_directory::{BASE_CURRENCY, CurrencyCode};

/// Conversion factors relative to USD: `1 USD = rate(code) units of code`.
///
/// Only directory currencies with positive, finite factors are kept. USD is
/// implicit and always resolves to `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<CurrencyCode, f64>);

impl RateTable {
    /// Creates an empty table. Only the base currency resolves.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from typed rates, dropping unusable factors.
    pub fn from_rates(rates: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        Self(
            rates
                .into_iter()
                .filter(|(_, rate)| is_usable(*rate))
                .collect(),
        )
    }

    /// Builds a table from provider quotes keyed by ISO code text.
    ///
    /// Codes outside the directory are ignored; providers quote far more
    /// currencies than the converter supports.
    pub fn from_quotes<K: AsRef<str>>(quotes: impl IntoIterator<Item = (K, f64)>) -> Self {
        Self::from_rates(
            quotes
                .into_iter()
                .filter_map(|(code, rate)| code.as_ref().parse().ok().map(|c| (c, rate))),
        )
    }

    /// Returns the table with one more rate, replacing any previous value.
    pub fn with_rate(mut self, code: CurrencyCode, rate: f64) -> Self {
        if is_usable(rate) {
            self.0.insert(code, rate);
        }
        self
    }

    /// Looks up the factor for a currency.
    pub fn rate(&self, code: CurrencyCode) -> Option<f64> {
        if code == BASE_CURRENCY {
            return Some(1.0);
        }
        self.0.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Currencies quoted in the table, sorted.
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<_> = self.0.keys().copied().collect();
        codes.sort();
        codes
    }
}

fn is_usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// A fetched rate table and when it was fetched.
///
/// Entries are replaced as a whole when a newer fetch succeeds; they are never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCacheEntry {
    pub table: RateTable,
    pub fetched_at: DateTime<Utc>,
}

impl RateCacheEntry {
    pub fn new(table: RateTable, fetched_at: DateTime<Utc>) -> Self {
        Self { table, fetched_at }
    }

    /// Age of the entry at `now`. A timestamp in the future counts as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or_default()
    }

    /// True while the entry is younger than the freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.age(now) < window
    }

    pub fn freshness(&self, now: DateTime<Utc>, window: Duration) -> RatesFreshness {
        if self.is_fresh(now, window) {
            RatesFreshness::Fresh {
                fetched_at: self.fetched_at,
            }
        } else {
            RatesFreshness::Stale {
                fetched_at: self.fetched_at,
            }
        }
    }
}

/// Rate status shown next to conversion results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatesFreshness {
    Fresh { fetched_at: DateTime<Utc> },
    Stale { fetched_at: DateTime<Utc> },
    Unavailable,
}

impl RatesFreshness {
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Fresh { fetched_at } | Self::Stale { fetched_at } => Some(*fetched_at),
            Self::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_base_currency_is_implicit() {
        let table = RateTable::new();
        assert_eq!(table.rate(CurrencyCode::USD), Some(1.0));
        assert_eq!(table.rate(CurrencyCode::EUR), None);
    }

    #[test]
    fn test_from_quotes_keeps_known_positive_rates() {
        let table = RateTable::from_quotes([
            ("EUR", 0.9),
            ("VND", 24000.0),
            ("XAU", 0.0005),
            ("JPY", 0.0),
            ("GBP", f64::NAN),
            ("CHF", -1.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate(CurrencyCode::VND), Some(24000.0));
        assert_eq!(table.rate(CurrencyCode::JPY), None);
        assert_eq!(table.currencies(), vec![CurrencyCode::EUR, CurrencyCode::VND]);
    }

    #[test]
    fn test_with_rate_ignores_unusable_values() {
        let table = RateTable::new()
            .with_rate(CurrencyCode::EUR, 0.9)
            .with_rate(CurrencyCode::GBP, f64::INFINITY);
        assert_eq!(table.rate(CurrencyCode::EUR), Some(0.9));
        assert_eq!(table.rate(CurrencyCode::GBP), None);
    }

    #[test]
    fn test_table_serializes_as_code_map() {
        let table = RateTable::new().with_rate(CurrencyCode::EUR, 0.5);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"EUR":0.5}"#);
        let back: RateTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_entry_freshness_window() {
        let now = Utc::now();
        let entry = RateCacheEntry::new(RateTable::new(), now - TimeDelta::hours(2));

        assert!(entry.is_fresh(now, 12 * HOUR));
        assert!(!entry.is_fresh(now, HOUR));
        assert!(matches!(
            entry.freshness(now, HOUR),
            RatesFreshness::Stale { .. }
        ));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let now = Utc::now();
        let entry = RateCacheEntry::new(RateTable::new(), now + TimeDelta::minutes(5));
        assert_eq!(entry.age(now), Duration::ZERO);
        assert!(entry.is_fresh(now, HOUR));
    }

    #[test]
    fn test_freshness_serializes_with_status_tag() {
        let json = serde_json::to_value(RatesFreshness::Unavailable).unwrap();
        assert_eq!(json["status"], "unavailable");
    }
}
