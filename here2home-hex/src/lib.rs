//! # Here2Home Hex
//!
//! Application services, outbound adapters and the HTTP adapter for the
//! currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Application services (rate cache, location, conversion, session)
//! - `outbound/` - Adapters for the network-facing ports (rates API, geocoder,
//!   device position, connectivity)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Services are generic over `S: KeyValueStore`, so the SQLite and in-memory
//! stores can be injected without code changes.

pub mod inbound;
pub mod openapi;
pub mod outbound;
pub mod service;


pub use service::{
    ConverterSession, LocationService, RateCacheManager, RateRefresher, RatesConfig,
};
