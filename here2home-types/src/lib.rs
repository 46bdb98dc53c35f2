//! # Here2Home Types
//!
//! Domain types and port traits for the Here2Home currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! conversion rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (RateTable, LocationPreference, ConvertedAmount)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currency_directory::{
    BASE_CURRENCY, CountryCurrencyEntry, CurrencyCode, FALLBACK_CURRENCY, UnknownCurrency,
    country_for_currency, entries, resolve_currency,
};
pub use domain::{
    ConversionDirection, ConversionOutcome, ConversionRequest, ConvertedAmount, Coordinates,
    LocationPreference, MAX_INPUT_AMOUNT, PermissionState, RateCacheEntry, RateTable,
    RatesFreshness, UserSettings, parse_amount,
};
pub use dto::*;
pub use error::{AppError, ConversionError, StoreError};
pub use ports::{
    Connectivity, ExchangeError, ExchangeRateProvider, Geolocator, KeyValueStore, LocationError,
    ReverseGeocoder,
};
