//! Client demo: a traveller's session against a running server.
//!
//! Run with: cargo run -p here2home-app --example client_demo

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use here2home_client::Here2HomeClient;
use here2home_hex::outbound::{ConnectivityFlag, FixedRateProvider};
use here2home_hex::{
    ConverterSession, LocationService, RateCacheManager, RatesConfig, inbound::HttpServer,
};
use here2home_repo::MemoryStore;
use here2home_types::{
    ConversionDirection, Coordinates, CurrencyCode, LocationError, ReverseGeocoder,
};
use tokio::net::TcpListener;

/// Stands in for Nominatim so the demo needs no network.
struct DemoGeocoder;

#[async_trait]
impl ReverseGeocoder for DemoGeocoder {
    async fn country_name(&self, at: Coordinates) -> Result<String, LocationError> {
        // Rough box around Vietnam, everything else is Thailand.
        if (8.0..24.0).contains(&at.latitude) && (102.0..110.0).contains(&at.longitude) {
            Ok("Vietnam".into())
        } else {
            Ok("Thailand".into())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;

    println!("🚀 Starting server on {addr} (in-memory store, fixed rates)...");

    let store = Arc::new(MemoryStore::new());
    let connectivity = Arc::new(ConnectivityFlag::new(true));
    let rates = Arc::new(RateCacheManager::new(
        store.clone(),
        Arc::new(FixedRateProvider::new()),
        connectivity.clone(),
        RatesConfig::default(),
    ));
    let location = LocationService::new(
        store.clone(),
        Arc::new(DemoGeocoder),
        Duration::from_secs(10),
    );
    let session = Arc::new(ConverterSession::new(store, rates, location).await);
    let router = HttpServer::new(session, connectivity).router();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = Here2HomeClient::new(format!("http://{addr}"));

    // Health check
    let health = client.health().await?;
    println!("✅ Server healthy: {health}");

    // Landing in Ho Chi Minh City
    let detection = client.report_position(10.7769, 106.7009).await?;
    println!("✅ Detected local currency: {}", detection.currency);

    let settings = client
        .update_settings(Some(CurrencyCode::AUD), Some(ConversionDirection::LocalToHome))
        .await?;
    println!(
        "✅ Home currency: {} ({}), converting {} -> {}",
        settings.home_currency, settings.home_country, settings.source, settings.target
    );

    // Price tag in a market
    let result = client.submit("250,000").await?;
    println!(
        "✅ ₫250,000 is {}",
        result.formatted.as_deref().unwrap_or("-")
    );

    // Going offline keeps the cached rates working
    client.set_online(false).await?;
    let result = client
        .convert("20", CurrencyCode::USD, CurrencyCode::VND)
        .await?;
    println!(
        "✅ Offline: $20 is {} ({:?})",
        result.formatted.as_deref().unwrap_or("-"),
        result.rates
    );

    // Refusing the location prompt is remembered
    let denied = client
        .report_location(&here2home_types::LocationReport {
            denied: true,
            ..Default::default()
        })
        .await?;
    println!(
        "✅ After refusal: still {} (permission {:?})",
        denied.currency, denied.preference.permission
    );
    client.forget_denial().await?;

    let status = client.rates_status().await?;
    println!(
        "\n📋 Rates: {} currencies, online={}",
        status.currencies, status.online
    );

    println!("\n🎉 Demo completed successfully!");

    Ok(())
}
