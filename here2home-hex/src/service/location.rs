//! Location Service
//!
//! Turns the device position into a local currency. Every failure falls back
//! to the last detected currency; only an explicit refusal is remembered.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use here2home_types::{
    Coordinates, CurrencyCode, Geolocator, KeyValueStore, LocationError, LocationPreference,
    PermissionState, ReverseGeocoder, StoreError, resolve_currency,
};

/// Storage key of the remembered [`LocationPreference`].
pub const LOCATION_KEY: &str = "location.preference";

pub struct LocationService<S: KeyValueStore> {
    store: Arc<S>,
    geocoder: Arc<dyn ReverseGeocoder>,
    timeout: Duration,
    // Serializes read-modify-write cycles on the stored preference.
    update_lock: Mutex<()>,
}

impl<S: KeyValueStore> LocationService<S> {
    /// `timeout` bounds position acquisition and the geocoder call separately.
    pub fn new(store: Arc<S>, geocoder: Arc<dyn ReverseGeocoder>, timeout: Duration) -> Self {
        Self {
            store,
            geocoder,
            timeout,
            update_lock: Mutex::new(()),
        }
    }

    /// Returns the stored preference, or the default when nothing is stored
    /// or the stored value cannot be read.
    pub async fn preference(&self) -> LocationPreference {
        let stored = match self.store.get(LOCATION_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read location preference: {}", e);
                None
            }
        };

        stored
            .and_then(|json| {
                serde_json::from_str(&json)
                    .inspect_err(|e| warn!("Ignoring unreadable location preference: {}", e))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Detects the currency of the country the device is in.
    ///
    /// `device` is `None` when the device has no geolocation capability.
    /// Never fails: on any problem the last detected currency (or the
    /// directory fallback) is returned. Concurrent calls run one at a time, so
    /// a later call sees the outcome of an earlier prompt.
    #[instrument(skip(self, device))]
    pub async fn detect_local_currency(&self, device: Option<&dyn Geolocator>) -> CurrencyCode {
        let _guard = self.update_lock.lock().await;
        let preference = self.preference().await;

        if preference.is_denied() {
            debug!("Location permission previously denied; not prompting");
            return preference.best_guess();
        }

        let Some(device) = device else {
            debug!("No geolocation capability");
            return preference.best_guess();
        };

        match self.locate(device).await {
            Ok((currency, country)) => {
                info!(%currency, country = %country, "Detected local currency");
                let detected = LocationPreference::detected(currency, country);
                if let Err(e) = self.save(&detected).await {
                    warn!("Failed to persist location preference: {}", e);
                }
                currency
            }
            Err(LocationError::PermissionDenied) => {
                info!("Location permission denied; remembering refusal");
                let fallback = preference.best_guess();
                if let Err(e) = self.save(&preference.denied()).await {
                    warn!("Failed to persist location preference: {}", e);
                }
                fallback
            }
            Err(e) => {
                warn!("Location detection failed, using fallback: {}", e);
                preference.best_guess()
            }
        }
    }

    /// Clears a remembered refusal so the next detection may prompt again.
    pub async fn forget_denial(&self) -> Result<LocationPreference, StoreError> {
        let _guard = self.update_lock.lock().await;
        let preference = self.preference().await;
        if !preference.is_denied() {
            return Ok(preference);
        }

        let reset = LocationPreference {
            permission: PermissionState::Unknown,
            ..preference
        };
        self.save(&reset).await?;
        info!("Location permission reset");
        Ok(reset)
    }

    async fn locate(&self, device: &dyn Geolocator) -> Result<(CurrencyCode, String), LocationError> {
        let position: Coordinates = tokio::time::timeout(self.timeout, device.current_position())
            .await
            .map_err(|_| LocationError::Timeout)??;

        let country = tokio::time::timeout(self.timeout, self.geocoder.country_name(position))
            .await
            .map_err(|_| LocationError::Timeout)??;

        Ok((resolve_currency(&country), country))
    }

    async fn save(&self, preference: &LocationPreference) -> Result<(), StoreError> {
        let json = serde_json::to_string(preference)?;
        self.store.put(LOCATION_KEY, &json).await
    }
}
