//! Application services.
//!
//! Orchestrate domain operations through the port traits. No HTTP or SQL
//! lives here.

pub mod conversion;
mod location;
mod rates;
mod session;

pub use location::{LOCATION_KEY, LocationService};
pub use rates::{RATES_KEY, RateCacheManager, RateRefresher, RatesConfig};
pub use session::{ConverterSession, SETTINGS_KEY};
