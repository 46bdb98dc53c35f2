//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use here2home_types::{
    AppError, ConnectivityRequest, ConversionError, ConvertQuery, CountryResponse, CurrencyCode,
    CurrencyResponse, DetectionResponse, Geolocator, KeyValueStore, LocationReport,
    RatesStatusResponse, SettingsResponse, StoreError, SubmitConversionRequest, UnknownCurrency,
    UpdateSettingsRequest, entries,
};

use crate::ConverterSession;
use crate::outbound::{ConnectivityFlag, ReportedPosition};

/// Application state shared across handlers.
pub struct AppState<S: KeyValueStore> {
    pub session: Arc<ConverterSession<S>>,
    pub connectivity: Arc<ConnectivityFlag>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(err.into())
    }
}

impl From<UnknownCurrency> for ApiError {
    fn from(err: UnknownCurrency) -> Self {
        ApiError(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RatesUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::RateMissing(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_currency(text: &str) -> Result<CurrencyCode, ApiError> {
    Ok(text.parse::<CurrencyCode>()?)
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Directory
// ─────────────────────────────────────────────────────────────────────────────

/// List supported currencies.
pub async fn list_currencies() -> impl IntoResponse {
    let currencies: Vec<CurrencyResponse> = CurrencyCode::all()
        .iter()
        .copied()
        .map(CurrencyResponse::from)
        .collect();
    Json(currencies)
}

/// List countries and their currencies.
pub async fn list_countries() -> impl IntoResponse {
    let countries: Vec<CountryResponse> = entries().iter().map(CountryResponse::from).collect();
    Json(countries)
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert an amount between an explicit pair.
#[tracing::instrument(skip(state))]
pub async fn convert<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ConvertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let source = parse_currency(&query.from)?;
    let target = parse_currency(&query.to)?;

    let response = state
        .session
        .convert_pair(&query.amount, source, target)
        .await?;
    Ok(Json(response))
}

/// Convert shell input on the configured pair.
#[tracing::instrument(skip(state))]
pub async fn submit_conversion<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SubmitConversionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let response = state.session.submit(&req.input).await?;
    Ok(Json(response))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates
// ─────────────────────────────────────────────────────────────────────────────

async fn status_of<S: KeyValueStore>(state: &AppState<S>) -> RatesStatusResponse {
    let rates = state.session.rates();
    RatesStatusResponse {
        freshness: rates.freshness(Utc::now()).await,
        online: rates.is_online(),
        currencies: rates.cached_currency_count().await,
    }
}

/// Rate cache status.
#[tracing::instrument(skip(state))]
pub async fn rates_status<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    Json(status_of(&state).await)
}

/// Force a refresh attempt.
///
/// Succeeds with the stale table when the provider cannot be reached; fails
/// only when no rates were ever cached.
#[tracing::instrument(skip(state))]
pub async fn refresh_rates<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    state.session.rates().get_rates(true).await?;
    Ok(Json(status_of(&state).await))
}

/// Record the shell's online/offline state.
///
/// Coming back online triggers a background refresh of stale rates.
#[tracing::instrument(skip(state))]
pub async fn set_connectivity<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<ConnectivityRequest>,
) -> impl IntoResponse {
    let was_online = state.connectivity.set_online(req.online);
    tracing::info!(online = req.online, "Connectivity reported");

    if req.online && !was_online {
        let rates = state.session.rates().clone();
        tokio::spawn(async move { rates.refresh_if_stale().await });
    }

    Json(status_of(&state).await)
}

// ─────────────────────────────────────────────────────────────────────────────
// Location
// ─────────────────────────────────────────────────────────────────────────────

/// Remembered location preference.
#[tracing::instrument(skip(state))]
pub async fn get_location<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    Json(state.session.location().preference().await)
}

/// Report the outcome of the shell's location prompt and run detection.
#[tracing::instrument(skip(state))]
pub async fn report_location<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(report): Json<LocationReport>,
) -> Result<impl IntoResponse, ApiError> {
    let device = ReportedPosition::from_report(report)?;
    let currency = state
        .session
        .refresh_local_currency(device.as_ref().map(|d| d as &dyn Geolocator))
        .await;
    let preference = state.session.location().preference().await;

    Ok(Json(DetectionResponse {
        currency,
        preference,
    }))
}

/// Forget a remembered location refusal.
#[tracing::instrument(skip(state))]
pub async fn forget_denial<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let preference = state.session.location().forget_denial().await?;
    Ok(Json(preference))
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

async fn settings_of<S: KeyValueStore>(session: &ConverterSession<S>) -> SettingsResponse {
    let settings = session.settings().await;
    let (source, target) = session.currency_pair().await;
    SettingsResponse {
        home_currency: settings.home_currency,
        home_country: session.home_country().await.to_string(),
        local_currency: session.local_currency().await,
        direction: settings.direction,
        source,
        target,
    }
}

/// Current settings and currency pair.
#[tracing::instrument(skip(state))]
pub async fn get_settings<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    Json(settings_of(&state.session).await)
}

/// Change the home currency and/or direction.
#[tracing::instrument(skip(state))]
pub async fn update_settings<S: KeyValueStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let home_currency = req
        .home_currency
        .as_deref()
        .map(parse_currency)
        .transpose()?;

    state
        .session
        .update_settings(home_currency, req.direction)
        .await?;
    Ok(Json(settings_of(&state.session).await))
}
