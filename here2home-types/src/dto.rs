//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ConversionDirection, ConvertedAmount, Coordinates, LocationPreference, RatesFreshness,
};
use currency_directory::{CountryCurrencyEntry, CurrencyCode};

// ─────────────────────────────────────────────────────────────────────────────
// Directory DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A currency known to the directory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyResponse {
    pub code: CurrencyCode,
    #[schema(example = "₫")]
    pub symbol: String,
    #[schema(example = "Vietnamese Dong")]
    pub name: String,
}

impl From<CurrencyCode> for CurrencyResponse {
    fn from(code: CurrencyCode) -> Self {
        Self {
            code,
            symbol: code.symbol().to_string(),
            name: code.name().to_string(),
        }
    }
}

/// A country row of the directory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryResponse {
    #[schema(example = "Vietnam")]
    pub country_name: String,
    pub currency_code: CurrencyCode,
    #[schema(example = "Vietnamese Dong")]
    pub display_name: String,
}

impl From<&CountryCurrencyEntry> for CountryResponse {
    fn from(entry: &CountryCurrencyEntry) -> Self {
        Self {
            country_name: entry.country_name.to_string(),
            currency_code: entry.currency_code,
            display_name: entry.display_name.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query for an explicit-pair conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertQuery {
    /// Amount as typed; empty or non-positive input yields `no_input`
    #[schema(example = "10")]
    #[serde(default)]
    pub amount: String,
    #[schema(example = "USD")]
    pub from: String,
    #[schema(example = "VND")]
    pub to: String,
}

/// Request to convert input on the configured currency pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitConversionRequest {
    #[schema(example = "250000")]
    pub input: String,
}

/// What the shell should display for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    Converted,
    NoInput,
    /// A newer request was issued while this one was pending.
    Superseded,
}

/// Response for a conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub status: ConversionStatus,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// Converted amount rounded to 2 decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 240000.0)]
    pub amount: Option<f64>,
    /// Display string with symbol and grouping
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "₫240,000.00")]
    pub formatted: Option<String>,
    pub rates: RatesFreshness,
}

impl ConversionResponse {
    pub fn converted(
        source: CurrencyCode,
        amount: ConvertedAmount,
        rates: RatesFreshness,
    ) -> Self {
        Self {
            status: ConversionStatus::Converted,
            source,
            target: amount.currency(),
            amount: Some(amount.value()),
            formatted: Some(amount.to_string()),
            rates,
        }
    }

    pub fn without_amount(
        status: ConversionStatus,
        source: CurrencyCode,
        target: CurrencyCode,
        rates: RatesFreshness,
    ) -> Self {
        Self {
            status,
            source,
            target,
            amount: None,
            formatted: None,
            rates,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Rate cache status for the status pill.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatesStatusResponse {
    pub freshness: RatesFreshness,
    pub online: bool,
    /// Number of currencies quoted in the cached table
    #[schema(example = 39)]
    pub currencies: usize,
}

/// Request reporting the shell's online/offline state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectivityRequest {
    pub online: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Location DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of the shell's own geolocation prompt.
///
/// Send `latitude` and `longitude` on success, `denied: true` when the user
/// refused, an `error` for timeouts and other failures, or an empty body when
/// the device has no geolocation at all. Unknown fields are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LocationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 10.7769)]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 106.7009)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub denied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "timeout")]
    pub error: Option<String>,
}

impl LocationReport {
    /// A successful prompt at the given position.
    pub fn at(position: Coordinates) -> Self {
        Self {
            latitude: Some(position.latitude),
            longitude: Some(position.longitude),
            ..Default::default()
        }
    }
}

/// Result of a detection run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectionResponse {
    pub currency: CurrencyCode,
    pub preference: LocationPreference,
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Current settings and the derived currency pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettingsResponse {
    pub home_currency: CurrencyCode,
    #[schema(example = "Australia")]
    pub home_country: String,
    pub local_currency: CurrencyCode,
    pub direction: ConversionDirection,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

/// Partial settings update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "GBP")]
    pub home_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<ConversionDirection>,
}
