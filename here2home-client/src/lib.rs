//! # Here2Home Client SDK
//!
//! A typed Rust client for the Here2Home API.

use here2home_types::{
    ConnectivityRequest, ConversionDirection, ConversionResponse, Coordinates, CountryResponse,
    CurrencyCode, CurrencyResponse, DetectionResponse, LocationPreference, LocationReport,
    RatesStatusResponse, SettingsResponse, SubmitConversionRequest, UpdateSettingsRequest,
};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Here2Home API client.
pub struct Here2HomeClient {
    base_url: String,
    http: Client,
}

impl Here2HomeClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Directory
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn currencies(&self) -> Result<Vec<CurrencyResponse>, ClientError> {
        self.get("/api/currencies").await
    }

    pub async fn countries(&self) -> Result<Vec<CountryResponse>, ClientError> {
        self.get("/api/countries").await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts an amount between two currencies.
    pub async fn convert(
        &self,
        amount: &str,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<ConversionResponse, ClientError> {
        let req = self
            .http
            .get(format!("{}/api/convert", self.base_url))
            .query(&[
                ("amount", amount),
                ("from", from.code()),
                ("to", to.code()),
            ]);
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    /// Converts input on the server's configured pair.
    pub async fn submit(&self, input: &str) -> Result<ConversionResponse, ClientError> {
        let req = SubmitConversionRequest {
            input: input.to_string(),
        };
        self.send(Method::POST, "/api/conversions", Some(&req)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rates
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn rates_status(&self) -> Result<RatesStatusResponse, ClientError> {
        self.get("/api/rates/status").await
    }

    /// Forces a refresh attempt.
    pub async fn refresh_rates(&self) -> Result<RatesStatusResponse, ClientError> {
        self.send::<_, ()>(Method::POST, "/api/rates/refresh", None)
            .await
    }

    pub async fn set_online(&self, online: bool) -> Result<RatesStatusResponse, ClientError> {
        let req = ConnectivityRequest { online };
        self.send(Method::PUT, "/api/connectivity", Some(&req)).await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Location
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn location(&self) -> Result<LocationPreference, ClientError> {
        self.get("/api/location").await
    }

    /// Reports a location prompt outcome and returns the detected currency.
    pub async fn report_location(
        &self,
        report: &LocationReport,
    ) -> Result<DetectionResponse, ClientError> {
        self.send(Method::POST, "/api/location", Some(report)).await
    }

    /// Reports a position from the device.
    pub async fn report_position(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<DetectionResponse, ClientError> {
        let report = LocationReport::at(Coordinates::new(latitude, longitude));
        self.report_location(&report).await
    }

    pub async fn forget_denial(&self) -> Result<LocationPreference, ClientError> {
        self.send::<_, ()>(Method::DELETE, "/api/location/denial", None)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────────

    pub async fn settings(&self) -> Result<SettingsResponse, ClientError> {
        self.get("/api/settings").await
    }

    pub async fn update_settings(
        &self,
        home_currency: Option<CurrencyCode>,
        direction: Option<ConversionDirection>,
    ) -> Result<SettingsResponse, ClientError> {
        let req = UpdateSettingsRequest {
            home_currency: home_currency.map(|c| c.code().to_string()),
            direction,
        };
        self.send(Method::PUT, "/api/settings", Some(&req)).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send::<_, ()>(Method::GET, path, None).await
    }

    async fn send<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use here2home_types::{ConversionStatus, RatesFreshness};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = Here2HomeClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = Here2HomeClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_convert_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/convert"))
            .and(query_param("amount", "10"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "VND"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "converted",
                "source": "USD",
                "target": "VND",
                "amount": 240000.0,
                "formatted": "₫240,000.00",
                "rates": {"status": "fresh", "fetched_at": "2026-10-16T08:00:00Z"}
            })))
            .mount(&server)
            .await;

        let client = Here2HomeClient::new(server.uri());
        let response = client
            .convert("10", CurrencyCode::USD, CurrencyCode::VND)
            .await
            .unwrap();

        assert_eq!(response.status, ConversionStatus::Converted);
        assert_eq!(response.formatted.as_deref(), Some("₫240,000.00"));
        assert!(matches!(response.rates, RatesFreshness::Fresh { .. }));
    }

    #[tokio::test]
    async fn test_update_settings_sends_codes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/settings"))
            .and(body_json(serde_json::json!({"home_currency": "GBP"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "home_currency": "GBP",
                "home_country": "United Kingdom",
                "local_currency": "VND",
                "direction": "local_to_home",
                "source": "VND",
                "target": "GBP"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Here2HomeClient::new(server.uri());
        let settings = client
            .update_settings(Some(CurrencyCode::GBP), None)
            .await
            .unwrap();

        assert_eq!(settings.home_country, "United Kingdom");
        assert_eq!(settings.target, CurrencyCode::GBP);
    }

    #[tokio::test]
    async fn test_api_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/rates/refresh"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": "Exchange rates are unavailable: no cached rates and the update failed",
                "code": 503
            })))
            .mount(&server)
            .await;

        let client = Here2HomeClient::new(server.uri());
        let err = client.refresh_rates().await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 503, ref message } if message.starts_with("Exchange rates are unavailable")
        ));
    }
}
