//! Application startup and lifecycle management.

use crate::config::DealConfig;
use crate::handlers::{
    app::{health_check, index},
    metrics::metrics,
    search::search,
};
use crate::services::providers::perplexity::{PerplexityConfig, PerplexityProvider};
use crate::services::providers::ChatProvider;
use crate::services::DealFinder;
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// A missing credential is not a startup failure: the finder is built
    /// without a provider and every search reports the fixed error sentence.
    pub async fn build(config: DealConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn ChatProvider>> = match config.perplexity.api_key.clone() {
            Some(api_key) => {
                let provider = PerplexityProvider::new(PerplexityConfig {
                    api_key,
                    base_url: config.perplexity.base_url.clone(),
                    model: config.perplexity.model.clone(),
                });
                tracing::info!(
                    model = %config.perplexity.model,
                    "Initialized Perplexity provider"
                );
                Some(Arc::new(provider))
            }
            None => {
                tracing::warn!(
                    "PERPLEXITY_API_KEY is not set; searches will return an error report"
                );
                None
            }
        };

        let state = AppState::new(Arc::new(DealFinder::new(provider)));

        // Port 0 binds a random port for testing.
        let address = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = build_router(self.state);

        tracing::info!("Starting deal-service on port {}", self.port);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
