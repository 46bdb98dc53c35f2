//! Reverse geocoding through OpenStreetMap Nominatim.
//!
//! Free, no API key. Nominatim's usage policy requires an identifying
//! User-Agent on every request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use here2home_types::{Coordinates, LocationError, ReverseGeocoder};

use super::USER_AGENT;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
    country_code: Option<String>,
}

/// [`ReverseGeocoder`] backed by the Nominatim `/reverse` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
}

impl NominatimGeocoder {
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
impl ReverseGeocoder for NominatimGeocoder {
    async fn country_name(&self, at: Coordinates) -> Result<String, LocationError> {
        // zoom=3 asks for country-level detail only. Names must be English to
        // match the directory; Nominatim otherwise answers in the local
        // language ("Deutschland").
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("format", "json".to_string()),
                ("accept-language", "en".to_string()),
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("zoom", "3".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LocationError::Timeout
                } else {
                    LocationError::Geocoding(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(LocationError::Geocoding(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Geocoding(e.to_string()))?;

        let address = body
            .address
            .ok_or_else(|| LocationError::Geocoding("response has no address".into()))?;

        address
            .country
            .filter(|c| !c.trim().is_empty())
            .or_else(|| {
                address
                    .country_code
                    .filter(|c| !c.trim().is_empty())
                    .map(|c| c.to_uppercase())
            })
            .ok_or_else(|| LocationError::Geocoding("response has no country".into()))
    }
}
