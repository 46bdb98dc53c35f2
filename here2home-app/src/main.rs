//! # Here2Home Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the storage adapter
//! - Build the rate cache, location service and converter session
//! - Start the background rate refresher and the HTTP server

mod config;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use here2home_hex::outbound::{
    ConnectivityFlag, FixedRateProvider, NominatimGeocoder, OpenErApiProvider,
};
use here2home_hex::{
    ConverterSession, LocationService, RateCacheManager, RateRefresher, inbound::HttpServer,
};
use here2home_repo::build_store;
use here2home_types::ExchangeRateProvider;

use config::{Config, FIXED_RATES_URL, LogFormat};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,here2home_app=debug,here2home_hex=debug".into());

    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

fn rate_provider(config: &Config) -> anyhow::Result<Arc<dyn ExchangeRateProvider>> {
    if config.rates_api_url == FIXED_RATES_URL {
        tracing::warn!("Using built-in fixed exchange rates");
        return Ok(Arc::new(FixedRateProvider::new()));
    }
    Ok(Arc::new(OpenErApiProvider::new(
        &config.rates_api_url,
        config.rates.fetch_timeout,
    )?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting Here2Home server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!("Using rates API: {}", config.rates_api_url);

    // Build store (handles connection and migration)
    let store = Arc::new(build_store(&config.database_url).await?);

    let connectivity = Arc::new(ConnectivityFlag::new(!config.start_offline));
    if config.start_offline {
        tracing::warn!("Starting offline; rates will only come from the cache");
    }

    let geocoder = Arc::new(NominatimGeocoder::new(
        &config.geocoder_url,
        config.location_timeout,
    )?);

    let rates = Arc::new(RateCacheManager::new(
        store.clone(),
        rate_provider(&config)?,
        connectivity.clone(),
        config.rates,
    ));
    let location = LocationService::new(store.clone(), geocoder, config.location_timeout);
    let session = Arc::new(ConverterSession::new(store, rates.clone(), location).await);

    // Keep rates fresh in the background
    tokio::spawn(RateRefresher::new(rates).run());

    // Create and run the HTTP server
    let server = HttpServer::new(session, connectivity);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
