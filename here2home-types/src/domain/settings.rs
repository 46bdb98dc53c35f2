//! User settings: home currency and conversion direction.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use currency_directory::CurrencyCode;

/// Which side of the pair the user types in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// Amounts are typed in the local currency and shown in the home currency.
    #[default]
    LocalToHome,
    /// Amounts are typed in the home currency and shown in the local currency.
    HomeToLocal,
}

impl ConversionDirection {
    /// Orders `(local, home)` into `(source, target)`.
    pub fn pair(&self, local: CurrencyCode, home: CurrencyCode) -> (CurrencyCode, CurrencyCode) {
        match self {
            Self::LocalToHome => (local, home),
            Self::HomeToLocal => (home, local),
        }
    }
}

/// Persisted user choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub home_currency: CurrencyCode,
    #[serde(default)]
    pub direction: ConversionDirection,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            home_currency: CurrencyCode::AUD,
            direction: ConversionDirection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_orders_pair() {
        let local = CurrencyCode::VND;
        let home = CurrencyCode::AUD;
        assert_eq!(
            ConversionDirection::LocalToHome.pair(local, home),
            (local, home)
        );
        assert_eq!(
            ConversionDirection::HomeToLocal.pair(local, home),
            (home, local)
        );
    }

    #[test]
    fn test_default_home_is_aud() {
        let settings = UserSettings::default();
        assert_eq!(settings.home_currency, CurrencyCode::AUD);
        assert_eq!(settings.direction, ConversionDirection::LocalToHome);
    }

    #[test]
    fn test_settings_without_direction_deserialize() {
        let settings: UserSettings = serde_json::from_str(r#"{"home_currency":"GBP"}"#).unwrap();
        assert_eq!(settings.home_currency, CurrencyCode::GBP);
        assert_eq!(settings.direction, ConversionDirection::LocalToHome);
    }
}
