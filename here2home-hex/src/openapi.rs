//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use here2home_types::domain::{
    ConversionDirection, Coordinates, LocationPreference, PermissionState, RatesFreshness,
};
use here2home_types::dto::{
    ConnectivityRequest, ConversionResponse, ConversionStatus, CountryResponse, CurrencyResponse,
    DetectionResponse, LocationReport, RatesStatusResponse, SettingsResponse,
    SubmitConversionRequest, UpdateSettingsRequest,
};
use here2home_types::CurrencyCode;
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "directory",
    responses(
        (status = 200, description = "Currencies with symbol and name", body = Vec<CurrencyResponse>)
    )
)]
async fn list_currencies() {}

/// List countries and their currencies
#[utoipa::path(
    get,
    path = "/api/countries",
    tag = "directory",
    responses(
        (status = 200, description = "Country directory in display order", body = Vec<CountryResponse>)
    )
)]
async fn list_countries() {}

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/api/convert",
    tag = "conversion",
    params(
        ("amount" = String, Query, description = "Amount as typed; empty or non-positive gives no_input", example = "10"),
        ("from" = String, Query, description = "Source currency code", example = "USD"),
        ("to" = String, Query, description = "Target currency code", example = "VND")
    ),
    responses(
        (status = 200, description = "Conversion result", body = ConversionResponse),
        (status = 400, description = "Unknown currency code"),
        (status = 422, description = "The rate table has no rate for a currency"),
        (status = 503, description = "No rates cached and none could be fetched")
    )
)]
async fn convert() {}

/// Convert input on the configured currency pair
#[utoipa::path(
    post,
    path = "/api/conversions",
    tag = "conversion",
    request_body = SubmitConversionRequest,
    responses(
        (status = 200, description = "Conversion result, or superseded by a newer request", body = ConversionResponse),
        (status = 422, description = "The rate table has no rate for a currency"),
        (status = 503, description = "No rates cached and none could be fetched")
    )
)]
async fn submit_conversion() {}

/// Rate cache status
#[utoipa::path(
    get,
    path = "/api/rates/status",
    tag = "rates",
    responses(
        (status = 200, description = "Freshness of the cached table", body = RatesStatusResponse)
    )
)]
async fn rates_status() {}

/// Force a rate refresh attempt
#[utoipa::path(
    post,
    path = "/api/rates/refresh",
    tag = "rates",
    responses(
        (status = 200, description = "Status after the attempt; stale rates are kept on failure", body = RatesStatusResponse),
        (status = 503, description = "No rates cached and none could be fetched")
    )
)]
async fn refresh_rates() {}

/// Report online/offline state
#[utoipa::path(
    put,
    path = "/api/connectivity",
    tag = "rates",
    request_body = ConnectivityRequest,
    responses(
        (status = 200, description = "Rate status under the new state", body = RatesStatusResponse)
    )
)]
async fn set_connectivity() {}

/// Remembered location preference
#[utoipa::path(
    get,
    path = "/api/location",
    tag = "location",
    responses(
        (status = 200, description = "Permission state and last detection", body = LocationPreference)
    )
)]
async fn get_location() {}

/// Report a location prompt outcome and detect the local currency
#[utoipa::path(
    post,
    path = "/api/location",
    tag = "location",
    request_body = LocationReport,
    responses(
        (status = 200, description = "Detected (or fallback) local currency", body = DetectionResponse),
        (status = 400, description = "Only one coordinate, or a position out of range"),
        (status = 422, description = "Unknown fields in the report")
    )
)]
async fn report_location() {}

/// Forget a remembered location refusal
#[utoipa::path(
    delete,
    path = "/api/location/denial",
    tag = "location",
    responses(
        (status = 200, description = "Preference after the reset", body = LocationPreference)
    )
)]
async fn forget_denial() {}

/// Current settings
#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Settings and the derived currency pair", body = SettingsResponse)
    )
)]
async fn get_settings() {}

/// Update settings
#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings after the update", body = SettingsResponse),
        (status = 400, description = "Unknown currency code")
    )
)]
async fn update_settings() {}

/// OpenAPI documentation for the Here2Home API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Here2Home Currency Converter API",
        version = "1.0.0",
        description = "Offline-first currency conversion between the currency of the country you are in and your home currency.\n\nRates are cached and keep working without a network connection; the status endpoints report how old they are.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        list_countries,
        convert,
        submit_conversion,
        rates_status,
        refresh_rates,
        set_connectivity,
        get_location,
        report_location,
        forget_denial,
        get_settings,
        update_settings,
    ),
    components(
        schemas(
            CurrencyCode,
            CurrencyResponse,
            CountryResponse,
            SubmitConversionRequest,
            ConversionResponse,
            ConversionStatus,
            RatesFreshness,
            RatesStatusResponse,
            ConnectivityRequest,
            Coordinates,
            PermissionState,
            LocationPreference,
            LocationReport,
            DetectionResponse,
            ConversionDirection,
            SettingsResponse,
            UpdateSettingsRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "directory", description = "Supported currencies and countries"),
        (name = "conversion", description = "Currency conversion"),
        (name = "rates", description = "Exchange-rate cache and connectivity"),
        (name = "location", description = "Local currency detection"),
        (name = "settings", description = "Home currency and conversion direction"),
    )
)]
pub struct ApiDoc;
