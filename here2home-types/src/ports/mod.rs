//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod connectivity;
mod exchange;
mod location;
mod store;

pub use connectivity::Connectivity;
pub use exchange::{ExchangeError, ExchangeRateProvider};
pub use location::{Geolocator, LocationError, ReverseGeocoder};
pub use store::KeyValueStore;
