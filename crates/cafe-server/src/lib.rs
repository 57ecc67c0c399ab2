//! Cafe Directory Server
//!
//! HTTP service over a single SQLite table of cafes: list, sample, search by
//! location, add, reprice, and report closures (guarded by a shared secret).

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::services::ApiKeyVerifier;
use crate::storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_keys: Arc<ApiKeyVerifier>,
}

impl AppState {
    pub fn new(db: Database, api_key: Option<String>) -> Self {
        Self {
            db: Arc::new(db),
            api_keys: Arc::new(ApiKeyVerifier::new(api_key)),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/random", get(handlers::cafes::random))
        .route("/all", get(handlers::cafes::all))
        .route("/search", get(handlers::cafes::search))
        .route("/add", post(handlers::cafes::add))
        .route("/update-price", patch(handlers::cafes::update_price))
        .route("/report-closure", delete(handlers::cafes::report_closure))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    info!("Initializing SQLite database...");
    let db = Database::new(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(db, config.api_key);
    if !state.api_keys.is_configured() {
        warn!("API_KEY not set, closure reports will be refused");
    }
    let app = build_app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
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
}
