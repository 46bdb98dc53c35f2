//! Error types for the currency converter.

use currency_directory::{CurrencyCode, UnknownCurrency};

/// Conversion failures that reach the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Exchange rates are unavailable: no cached rates and the update failed")]
    RatesUnavailable,

    #[error("Rate not available for {0}")]
    CurrencyRateMissing(CurrencyCode),

    #[error("Converted amount is too large to display in {0}")]
    AmountOutOfRange(CurrencyCode),

    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrency),
}

/// Durable storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    RatesUnavailable(String),

    #[error("{0}")]
    RateMissing(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::RatesUnavailable => AppError::RatesUnavailable(err.to_string()),
            ConversionError::CurrencyRateMissing(_) => AppError::RateMissing(err.to_string()),
            ConversionError::AmountOutOfRange(_) => AppError::BadRequest(err.to_string()),
            ConversionError::UnknownCurrency(e) => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<UnknownCurrency> for AppError {
    fn from(err: UnknownCurrency) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}
