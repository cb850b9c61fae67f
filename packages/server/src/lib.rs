//! GraphDesk HTTP API
//!
//! REST surface over the core graph services: node and relation CRUD, the
//! label/type vocabulary, and bulk import/export.
//!
//! # Architecture
//!
//! Routes are grouped into endpoint modules, each contributing a `Router`
//! that is merged in [`create_router`]:
//! - `health_endpoints`: liveness
//! - `node_endpoints`: `/nodes`
//! - `relation_endpoints`: `/relations`
//! - `vocabulary_endpoints`: `/labels`, `/relationship_types`
//! - `transfer_endpoints`: `/utils/export`, `/utils/import`
//!
//! # Security
//!
//! - CORS restricted to configured origins (default http://localhost:3000)
//! - No authentication

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use graphdesk_core::services::{EntityStore, GraphTransfer, TransferOptions};

pub mod config;
mod health_endpoints;
mod http_error;
mod node_endpoints;
mod relation_endpoints;
mod transfer_endpoints;
mod vocabulary_endpoints;

pub use config::{Backend, ConfigError, ServerConfig};
pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub transfer: GraphTransfer,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, options: TransferOptions) -> Self {
        let transfer = GraphTransfer::with_options(store.clone(), options);
        Self { store, transfer }
    }
}

/// Create the application router with all endpoint modules
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .merge(health_endpoints::routes())
        .merge(node_endpoints::routes(state.clone()))
        .merge(relation_endpoints::routes(state.clone()))
        .merge(vocabulary_endpoints::routes(state.clone()))
        .merge(transfer_endpoints::routes(state))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured frontend origins
///
/// Origins that are not valid header values are logged and dropped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️  Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns error if the server fails to bind or stops abnormally.
pub async fn start_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let app = create_router(state, &config.cors_origins);

    let addr = config.bind_address();
    tracing::info!("🚀 GraphDesk API starting on http://{}", addr);
    tracing::info!("📡 CORS enabled for {}", config.cors_origins.join(", "));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
