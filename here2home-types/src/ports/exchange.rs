//! Exchange rate provider port.
//!
//! This trait defines the interface for exchange rate services.
//! Implementations can be HTTP clients, fixed tables, mock providers, etc.

use crate::domain::RateTable;

/// Error type for exchange rate operations.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetches the latest table quoted against USD.
    async fn fetch_latest(&self) -> Result<RateTable, ExchangeError>;
}
