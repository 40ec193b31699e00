//! Alert Summarizer API Server
//!
//! HTTP front end for the alert classifier, shaped for serverless custom
//! handler hosts that forward requests to a local port.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod logging;
pub mod request;
mod routes;

pub use crate::config::{LogFormat, LoggingConfig, ServerConfig, ServiceConfig};
pub use error::{ConfigError, SummarizeError};
pub use logging::{init_logging, AlertLog, TracingLog};
pub use request::AlertRequest;
pub use routes::summarize::{handle, summarize_body, AlertSummary};

/// Application state shared across handlers
pub struct AppState {
    /// Logging collaborator
    pub log: Arc<dyn AlertLog>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(log: Arc<dyn AlertLog>) -> Self {
        Self {
            log,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::PanicResponder::new(
            Arc::clone(&state.log),
        )))
        .layer(DefaultBodyLimit::max(server.max_body_bytes));

    Router::new()
        .route(&server.route, post(routes::summarize::summarize_alert))
        .route("/api/health", get(routes::health::health))
        .layer(middleware)
        .with_state(state)
}

/// Serve on an already-bound listener until shutdown is signalled
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Run the server
pub async fn run_server(config: ServiceConfig, log: Arc<dyn AlertLog>) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(log));
    let app = create_router(state, &config.server);
    let addr = config.server.bind_addr();

    info!("Starting alert summarizer on {} ({})", addr, config.server.route);

    let listener = TcpListener::bind(&addr).await?;
    serve(listener, app).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
