//! Application startup and lifecycle management.

use crate::config::StoryConfig;
use crate::handlers::metrics::metrics;
use crate::handlers::story::{create_story, story_preflight};
use crate::services::metrics::{init_metrics, track_metrics};
use crate::services::providers::anthropic::AnthropicTextProvider;
use crate::services::providers::TextProvider;
use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::{extract::State, response::IntoResponse, Json, Router};
use serde_json::json;
use service_core::error::AppError;
use service_core::middleware::security_headers::security_headers_middleware;
use service_core::middleware::tracing::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Nothing here is mutable across requests: configuration is read once at
/// startup and the provider handle is read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: StoryConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

/// Health check endpoint for Docker/K8s liveness probes.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "story-service",
        "version": env!("CARGO_PKG_VERSION"),
        "credential_configured": state.config.anthropic.api_key.is_some(),
    }))
}

/// Readiness check endpoint for K8s readiness probes. There is no datastore,
/// so readiness equals liveness.
async fn readiness_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
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

/// Permissive CORS: any origin may POST to the story endpoint.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/story", post(create_story).options(story_preflight))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .with_state(state)
        .layer(from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        // Outermost so every response carries the CORS headers
        .layer(cors_layer())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the real text-generation provider.
    pub async fn build(config: StoryConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> =
            Arc::new(AnthropicTextProvider::new(config.anthropic.api_key.clone()));
        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application with an injected provider (used by tests).
    pub async fn build_with_provider(
        config: StoryConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        init_metrics();

        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config,
            text_provider,
        };

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

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
