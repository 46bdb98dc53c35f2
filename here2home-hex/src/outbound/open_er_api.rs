//! open.er-api.com rate provider.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use here2home_types::{ExchangeError, ExchangeRateProvider, RateTable};

use super::USER_AGENT;

pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

/// Fetches the latest USD-based table from the open exchange-rate API.
#[derive(Debug, Clone)]
pub struct OpenErApiProvider {
    client: Client,
    url: String,
}

impl OpenErApiProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for OpenErApiProvider {
    async fn fetch_latest(&self) -> Result<RateTable, ExchangeError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ExchangeError::ServiceUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExchangeError::ServiceUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: LatestResponse = response
            .json()
            .await
            .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;

        if body.result != "success" {
            return Err(ExchangeError::InvalidResponse(format!(
                "result {}: {}",
                body.result,
                body.error_type.as_deref().unwrap_or("unknown error")
            )));
        }

        let table = RateTable::from_quotes(body.rates);
        if table.is_empty() {
            return Err(ExchangeError::InvalidResponse(
                "no supported currencies in response".into(),
            ));
        }

        tracing::debug!(currencies = table.len(), "Fetched latest rates");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use here2home_types::CurrencyCode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> OpenErApiProvider {
        OpenErApiProvider::new(
            format!("{}/v6/latest/USD", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetches_rates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": "success",
                "base_code": "USD",
                "rates": { "USD": 1, "EUR": 0.9, "VND": 24000, "XAU": 0.0004 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let table = provider(&server).fetch_latest().await.unwrap();

        assert_eq!(table.rate(CurrencyCode::EUR), Some(0.9));
        assert_eq!(table.rate(CurrencyCode::VND), Some(24000.0));
        assert_eq!(table.rate(CurrencyCode::GBP), None);
    }

    #[tokio::test]
    async fn test_error_result_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/latest/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "result": "error",
                "error-type": "unsupported-code"
            })))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_latest().await.unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidResponse(msg) if msg.contains("unsupported-code")));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/latest/USD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider(&server).fetch_latest().await.unwrap_err();
        assert!(matches!(err, ExchangeError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let provider =
            OpenErApiProvider::new("http://127.0.0.1:9/v6/latest/USD", Duration::from_secs(1))
                .unwrap();
        let err = provider.fetch_latest().await.unwrap_err();
        assert!(matches!(err, ExchangeError::ServiceUnavailable(_)));
    }
}
