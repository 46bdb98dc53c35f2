//! Rate Cache Manager
//!
//! Owns the single cached USD rate table. Serves it while fresh, refreshes it
//! from the provider when stale, and falls back to the stale table whenever
//! the provider cannot be reached.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{debug, info, instrument, warn};

use here2home_types::{
    Connectivity, ConversionError, ExchangeRateProvider, KeyValueStore, RateCacheEntry, RateTable,
    RatesFreshness,
};

/// Storage key of the cached rate table.
pub const RATES_KEY: &str = "rates.cache";

/// Timing knobs for the rate cache.
#[derive(Debug, Clone, Copy)]
pub struct RatesConfig {
    /// How long a fetched table counts as fresh.
    pub freshness_window: Duration,
    /// Upper bound on a single provider call.
    pub fetch_timeout: Duration,
    /// How often the background refresher checks for staleness.
    pub refresh_interval: Duration,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(12 * 60 * 60),
            fetch_timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(60 * 60),
        }
    }
}

/// Cache of the latest exchange-rate table.
///
/// Generic over `S: KeyValueStore` so the cached entry survives restarts when
/// a durable store is injected.
pub struct RateCacheManager<S: KeyValueStore> {
    store: Arc<S>,
    provider: Arc<dyn ExchangeRateProvider>,
    connectivity: Arc<dyn Connectivity>,
    config: RatesConfig,
    cache: RwLock<Option<RateCacheEntry>>,
    loaded: OnceCell<()>,
    // Held for the whole fetch so concurrent callers share one request.
    fetch_lock: Mutex<()>,
}

impl<S: KeyValueStore> RateCacheManager<S> {
    pub fn new(
        store: Arc<S>,
        provider: Arc<dyn ExchangeRateProvider>,
        connectivity: Arc<dyn Connectivity>,
        config: RatesConfig,
    ) -> Self {
        Self {
            store,
            provider,
            connectivity,
            config,
            cache: RwLock::new(None),
            loaded: OnceCell::new(),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &RatesConfig {
        &self.config
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns a rate table, fetching a new one when needed.
    ///
    /// With `force_refresh_attempt = false` a fresh cached table is returned
    /// without touching the network. Otherwise a fetch is attempted when
    /// online; if it fails, the cached table is returned whatever its age.
    /// Fails only when nothing has ever been cached.
    #[instrument(skip(self))]
    pub async fn get_rates(&self, force_refresh_attempt: bool) -> Result<RateTable, ConversionError> {
        self.ensure_loaded().await;

        let seen = self.snapshot().await;
        if !force_refresh_attempt {
            if let Some(entry) = seen.as_ref().filter(|e| self.is_fresh(e)) {
                debug!(fetched_at = %entry.fetched_at, "Serving cached rates");
                return Ok(entry.table.clone());
            }
        }

        let _guard = self.fetch_lock.lock().await;

        // A fetch may have completed while this caller waited for the lock.
        let current = self.snapshot().await;
        if let Some(entry) = current.as_ref() {
            let replaced = seen.as_ref().map(|s| s.fetched_at) != Some(entry.fetched_at);
            if replaced || (!force_refresh_attempt && self.is_fresh(entry)) {
                debug!(fetched_at = %entry.fetched_at, "Rates refreshed by a concurrent caller");
                return Ok(entry.table.clone());
            }
        }

        if !self.connectivity.is_online() {
            debug!("Offline; skipping rate fetch");
            return Self::stale_or_unavailable(current);
        }

        match self.fetch().await {
            Some(entry) => Ok(entry.table),
            None => Self::stale_or_unavailable(current),
        }
    }

    /// Freshness of the cached table at `now`.
    pub async fn freshness(&self, now: DateTime<Utc>) -> RatesFreshness {
        self.ensure_loaded().await;
        match self.cache.read().await.as_ref() {
            Some(entry) => entry.freshness(now, self.config.freshness_window),
            None => RatesFreshness::Unavailable,
        }
    }

    /// Number of currencies quoted by the cached table.
    pub async fn cached_currency_count(&self) -> usize {
        self.ensure_loaded().await;
        self.cache
            .read()
            .await
            .as_ref()
            .map_or(0, |entry| entry.table.len())
    }

    /// Refreshes the table if it is missing or stale and the device is online.
    pub async fn refresh_if_stale(&self) {
        self.ensure_loaded().await;

        let needs_refresh = self
            .snapshot()
            .await
            .is_none_or(|entry| !self.is_fresh(&entry));
        if !needs_refresh {
            debug!("Cached rates still fresh");
            return;
        }
        if !self.connectivity.is_online() {
            debug!("Rates are stale but the device is offline");
            return;
        }

        if let Err(e) = self.get_rates(false).await {
            warn!("Background rate refresh failed: {}", e);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────────

    fn is_fresh(&self, entry: &RateCacheEntry) -> bool {
        entry.is_fresh(Utc::now(), self.config.freshness_window)
    }

    async fn snapshot(&self) -> Option<RateCacheEntry> {
        self.cache.read().await.clone()
    }

    fn stale_or_unavailable(entry: Option<RateCacheEntry>) -> Result<RateTable, ConversionError> {
        match entry {
            Some(entry) => {
                warn!(fetched_at = %entry.fetched_at, "Serving stale rates");
                Ok(entry.table)
            }
            None => Err(ConversionError::RatesUnavailable),
        }
    }

    /// Calls the provider and replaces the cache on success.
    async fn fetch(&self) -> Option<RateCacheEntry> {
        let result =
            tokio::time::timeout(self.config.fetch_timeout, self.provider.fetch_latest()).await;

        let table = match result {
            Ok(Ok(table)) => table,
            Ok(Err(e)) => {
                warn!("Rate fetch failed: {}", e);
                return None;
            }
            Err(_) => {
                warn!(
                    "Rate fetch timed out after {}s",
                    self.config.fetch_timeout.as_secs()
                );
                return None;
            }
        };

        let entry = RateCacheEntry::new(table, Utc::now());
        self.persist(&entry).await;
        *self.cache.write().await = Some(entry.clone());

        info!(currencies = entry.table.len(), "Exchange rates updated");
        Some(entry)
    }

    async fn persist(&self, entry: &RateCacheEntry) {
        let json = match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize rate cache: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.put(RATES_KEY, &json).await {
            warn!("Failed to persist rate cache: {}", e);
        }
    }

    /// Loads the previous session's table from storage on first use.
    async fn ensure_loaded(&self) {
        self.loaded
            .get_or_init(|| async {
                let stored = match self.store.get(RATES_KEY).await {
                    Ok(stored) => stored,
                    Err(e) => {
                        warn!("Failed to read cached rates: {}", e);
                        None
                    }
                };
                let Some(json) = stored else {
                    return;
                };
                match serde_json::from_str::<RateCacheEntry>(&json) {
                    Ok(entry) => {
                        debug!(fetched_at = %entry.fetched_at, "Loaded cached rates");
                        let mut cache = self.cache.write().await;
                        if cache.is_none() {
                            *cache = Some(entry);
                        }
                    }
                    Err(e) => warn!("Ignoring unreadable rate cache: {}", e),
                }
            })
            .await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Background Refresher
// ─────────────────────────────────────────────────────────────────────────────

/// Periodically refreshes stale rates without blocking conversions.
pub struct RateRefresher<S: KeyValueStore> {
    rates: Arc<RateCacheManager<S>>,
    interval: Duration,
}

impl<S: KeyValueStore> RateRefresher<S> {
    pub fn new(rates: Arc<RateCacheManager<S>>) -> Self {
        let interval = rates.config().refresh_interval;
        Self { rates, interval }
    }

    /// Runs forever; spawn it on the runtime.
    ///
    /// The first check happens immediately, so a fresh start fetches rates
    /// as soon as it is online.
    #[instrument(skip(self))]
    pub async fn run(self) {
        info!(
            "Starting rate refresher (every {}s)",
            self.interval.as_secs()
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.rates.refresh_if_stale().await;
        }
    }
}
