//! Domain models for the currency converter.

pub mod conversion;
pub mod location;
pub mod rates;
pub mod settings;

pub use conversion::{
    ConversionOutcome, ConversionRequest, ConvertedAmount, MAX_INPUT_AMOUNT, parse_amount,
};
pub use location::{Coordinates, LocationPreference, PermissionState};
pub use rates::{RateCacheEntry, RateTable, RatesFreshness};
pub use settings::{ConversionDirection, UserSettings};
