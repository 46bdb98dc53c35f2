//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use here2home_types::KeyValueStore;

use super::handlers::{self, AppState};
use crate::ConverterSession;
use crate::openapi::ApiDoc;
use crate::outbound::ConnectivityFlag;

/// HTTP Server for the converter API.
pub struct HttpServer<S: KeyValueStore> {
    state: Arc<AppState<S>>,
}

impl<S: KeyValueStore> HttpServer<S> {
    /// Creates a new HTTP server around a session.
    ///
    /// `connectivity` must be the same flag the session's rate cache reads,
    /// so shell reports reach it.
    pub fn new(session: Arc<ConverterSession<S>>, connectivity: Arc<ConnectivityFlag>) -> Self {
        Self {
            state: Arc::new(AppState {
                session,
                connectivity,
            }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/currencies", get(handlers::list_currencies))
            .route("/api/countries", get(handlers::list_countries))
            .route("/api/convert", get(handlers::convert::<S>))
            .route("/api/conversions", post(handlers::submit_conversion::<S>))
            .route("/api/rates/status", get(handlers::rates_status::<S>))
            .route("/api/rates/refresh", post(handlers::refresh_rates::<S>))
            .route("/api/location", get(handlers::get_location::<S>))
            .route("/api/location", post(handlers::report_location::<S>))
            .route("/api/location/denial", delete(handlers::forget_denial::<S>))
            .route("/api/settings", get(handlers::get_settings::<S>))
            .route("/api/settings", put(handlers::update_settings::<S>))
            .route("/api/connectivity", put(handlers::set_connectivity::<S>))
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
