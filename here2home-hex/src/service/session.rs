//! Converter Session
//!
//! Application state for one converter: user settings, the current local
//! currency and the ordering of conversion requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use here2home_types::{
    ConversionDirection, ConversionError, ConversionOutcome, ConversionRequest, ConversionResponse,
    ConversionStatus, ConvertedAmount, CurrencyCode, Geolocator, KeyValueStore, StoreError,
    UserSettings, country_for_currency, parse_amount,
};

use super::conversion;
use super::{LocationService, RateCacheManager};

/// Storage key of the persisted [`UserSettings`].
pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, Copy)]
struct SessionState {
    settings: UserSettings,
    local_currency: CurrencyCode,
}

/// Ties the services together for the shell.
///
/// Generic over `S: KeyValueStore` like the services it owns.
pub struct ConverterSession<S: KeyValueStore> {
    store: Arc<S>,
    rates: Arc<RateCacheManager<S>>,
    location: LocationService<S>,
    state: RwLock<SessionState>,
    sequence: AtomicU64,
    // Keeps the adopted local currency in step with the stored detection.
    detect_lock: Mutex<()>,
}

impl<S: KeyValueStore> ConverterSession<S> {
    /// Creates a session from the stored settings and the last detected
    /// local currency.
    pub async fn new(
        store: Arc<S>,
        rates: Arc<RateCacheManager<S>>,
        location: LocationService<S>,
    ) -> Self {
        let settings = load_settings(store.as_ref()).await;
        let local_currency = location.preference().await.best_guess();

        debug!(
            home = %settings.home_currency,
            local = %local_currency,
            "Converter session ready"
        );

        Self {
            store,
            rates,
            location,
            state: RwLock::new(SessionState {
                settings,
                local_currency,
            }),
            sequence: AtomicU64::new(0),
            detect_lock: Mutex::new(()),
        }
    }

    pub fn rates(&self) -> &Arc<RateCacheManager<S>> {
        &self.rates
    }

    pub fn location(&self) -> &LocationService<S> {
        &self.location
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn settings(&self) -> UserSettings {
        self.state.read().await.settings
    }

    pub async fn local_currency(&self) -> CurrencyCode {
        self.state.read().await.local_currency
    }

    /// `(source, target)` for the configured direction.
    pub async fn currency_pair(&self) -> (CurrencyCode, CurrencyCode) {
        let state = self.state.read().await;
        state
            .settings
            .direction
            .pair(state.local_currency, state.settings.home_currency)
    }

    /// Display label for the home currency ("Australia", "Europe").
    pub async fn home_country(&self) -> &'static str {
        country_for_currency(self.settings().await.home_currency)
    }

    pub async fn set_home_currency(&self, code: CurrencyCode) -> Result<UserSettings, StoreError> {
        self.update_settings(Some(code), None).await
    }

    pub async fn set_direction(
        &self,
        direction: ConversionDirection,
    ) -> Result<UserSettings, StoreError> {
        self.update_settings(None, Some(direction)).await
    }

    /// Applies a partial update and persists the result as one write.
    ///
    /// The in-memory settings only change once the write succeeded.
    pub async fn update_settings(
        &self,
        home_currency: Option<CurrencyCode>,
        direction: Option<ConversionDirection>,
    ) -> Result<UserSettings, StoreError> {
        let mut state = self.state.write().await;
        let updated = UserSettings {
            home_currency: home_currency.unwrap_or(state.settings.home_currency),
            direction: direction.unwrap_or(state.settings.direction),
        };

        let json = serde_json::to_string(&updated)?;
        self.store.put(SETTINGS_KEY, &json).await?;
        state.settings = updated;

        info!(
            home = %updated.home_currency,
            direction = ?updated.direction,
            "Settings updated"
        );
        Ok(updated)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Location
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs location detection and adopts the result as the local currency.
    pub async fn refresh_local_currency(&self, device: Option<&dyn Geolocator>) -> CurrencyCode {
        let _guard = self.detect_lock.lock().await;
        let currency = self.location.detect_local_currency(device).await;
        self.state.write().await.local_currency = currency;
        currency
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts shell input on the configured pair.
    ///
    /// Each call takes a sequence ticket. If a newer call started while this
    /// one was waiting for rates, the result is dropped and `Superseded` is
    /// returned instead.
    pub async fn submit(&self, input: &str) -> Result<ConversionResponse, ConversionError> {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let (source, target) = self.currency_pair().await;

        let result = self.convert_pair(input, source, target).await;

        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Conversion superseded by a newer request");
            let rates = self.rates.freshness(Utc::now()).await;
            return Ok(ConversionResponse::without_amount(
                ConversionStatus::Superseded,
                source,
                target,
                rates,
            ));
        }

        result
    }

    /// Converts shell input between an explicit pair.
    pub async fn convert_pair(
        &self,
        input: &str,
        source: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<ConversionResponse, ConversionError> {
        let Some(amount) = parse_amount(input) else {
            let rates = self.rates.freshness(Utc::now()).await;
            return Ok(ConversionResponse::without_amount(
                ConversionStatus::NoInput,
                source,
                target,
                rates,
            ));
        };

        if source == target {
            let same = ConvertedAmount::from_major(amount, target)
                .ok_or(ConversionError::AmountOutOfRange(target))?;
            let rates = self.rates.freshness(Utc::now()).await;
            return Ok(ConversionResponse::converted(source, same, rates));
        }

        let table = self.rates.get_rates(false).await?;
        let request = ConversionRequest {
            amount,
            source,
            target,
        };
        let outcome = conversion::convert(&request, &table).inspect_err(|e| {
            warn!("Conversion failed: {}", e);
        })?;

        let rates = self.rates.freshness(Utc::now()).await;
        Ok(match outcome {
            ConversionOutcome::Converted(converted) => {
                ConversionResponse::converted(source, converted, rates)
            }
            ConversionOutcome::NoInput => {
                ConversionResponse::without_amount(ConversionStatus::NoInput, source, target, rates)
            }
        })
    }
}

async fn load_settings<S: KeyValueStore>(store: &S) -> UserSettings {
    let stored = match store.get(SETTINGS_KEY).await {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to read settings: {}", e);
            None
        }
    };

    stored
        .and_then(|json| {
            serde_json::from_str(&json)
                .inspect_err(|e| warn!("Ignoring unreadable settings: {}", e))
                .ok()
        })
        .unwrap_or_default()
}
