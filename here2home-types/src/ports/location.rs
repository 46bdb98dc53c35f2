//! Device geolocation and reverse geocoding ports.

use crate::domain::Coordinates;

/// Location lookup failures.
///
/// Only [`LocationError::PermissionDenied`] is remembered; everything else is
/// treated as transient.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    ServiceUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Geocoding failed: {0}")]
    Geocoding(String),

    #[error("Location error: {0}")]
    Other(String),
}

/// The device's position source.
#[async_trait::async_trait]
pub trait Geolocator: Send + Sync {
    /// Asks the device for its current position. May prompt the user.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Turns coordinates into a place name.
#[async_trait::async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Returns a free-text country name (or code) for the position.
    async fn country_name(&self, at: Coordinates) -> Result<String, LocationError>;
}
