//! Device location and the remembered detection outcome.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_directory::{CurrencyCode, FALLBACK_CURRENCY};

/// A WGS84 position reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    #[schema(example = 10.7769)]
    pub latitude: f64,
    #[schema(example = 106.7009)]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Whether the user has answered the location prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
}

/// What the location service remembers between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationPreference {
    pub permission: PermissionState,
    pub last_detected_currency: Option<CurrencyCode>,
    #[schema(example = "Vietnam")]
    pub last_detected_country: Option<String>,
}

impl LocationPreference {
    /// Preference after a successful detection.
    pub fn detected(currency: CurrencyCode, country_name: impl Into<String>) -> Self {
        Self {
            permission: PermissionState::Granted,
            last_detected_currency: Some(currency),
            last_detected_country: Some(country_name.into()),
        }
    }

    /// Same preference with the permission marked as denied. The last
    /// detected values are kept so they keep serving as the fallback.
    pub fn denied(self) -> Self {
        Self {
            permission: PermissionState::Denied,
            ..self
        }
    }

    pub fn is_denied(&self) -> bool {
        self.permission == PermissionState::Denied
    }

    /// Last detected currency, or the directory fallback.
    pub fn best_guess(&self) -> CurrencyCode {
        self.last_detected_currency.unwrap_or(FALLBACK_CURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preference() {
        let pref = LocationPreference::default();
        assert_eq!(pref.permission, PermissionState::Unknown);
        assert_eq!(pref.best_guess(), FALLBACK_CURRENCY);
    }

    #[test]
    fn test_denied_keeps_last_detection() {
        let pref = LocationPreference::detected(CurrencyCode::EUR, "France").denied();
        assert!(pref.is_denied());
        assert_eq!(pref.best_guess(), CurrencyCode::EUR);
        assert_eq!(pref.last_detected_country.as_deref(), Some("France"));
    }

    #[test]
    fn test_permission_serializes_lowercase() {
        let json = serde_json::to_string(&PermissionState::Denied).unwrap();
        assert_eq!(json, "\"denied\"");
    }
}
