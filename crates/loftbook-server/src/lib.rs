//! Loftbook Server
//!
//! Self-hosted API server for the shared skills table.
//! This is a library crate — the server is started via `start_server()`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{http::Method, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use loftbook_core::paths;
use loftbook_core::storage::{Database, SkillsStore};

pub mod auth;
pub mod error;
pub mod routes;
pub mod types;

/// Configuration for starting the server.
pub struct ServerConfig {
    /// Port to listen on (default: 3000).
    pub port: u16,
    /// SQLite database path holding the skills document.
    pub db_path: PathBuf,
    /// Shared admin passcode; None leaves the credential gate unconfigured
    /// and the table read-only.
    pub admin_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            db_path: paths::database_path(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Store for the single skills document.
    pub store: SkillsStore,
    /// Server-held admin secret (None = unconfigured).
    pub admin_password: Option<Arc<str>>,
}

/// Build the Axum router with all routes and its state.
pub fn build_router(config: &ServerConfig) -> anyhow::Result<(Router, AppState)> {
    let db = Database::new(&config.db_path)?;
    let state = AppState {
        store: SkillsStore::new(db),
        admin_password: config.admin_password.as_deref().map(Arc::from),
    };

    if state.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not configured; writes will be rejected");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", routes::api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Ok((app, state))
}

/// Start the Loftbook server and block until shutdown.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let (app, _state) = build_router(&config)?;

    tracing::info!("Loftbook server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "Loftbook Server"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
