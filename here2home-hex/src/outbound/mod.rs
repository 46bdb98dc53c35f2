//! Outbound adapters for the network-facing ports.

mod connectivity;
mod fixed_rates;
mod geolocation;
mod nominatim;
mod open_er_api;

pub use connectivity::ConnectivityFlag;
pub use fixed_rates::FixedRateProvider;
pub use geolocation::{FixedGeolocator, ReportedPosition};
pub use nominatim::NominatimGeocoder;
pub use open_er_api::OpenErApiProvider;

/// Sent with every outbound request so providers can identify the app.
pub const USER_AGENT: &str = "Here2Home Currency Converter App";
