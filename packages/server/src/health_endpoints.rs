//! Health check endpoint

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// Returns server status and version information
///
/// Does not touch the graph store.
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn routes() -> Router {
    Router::new().route("/health", get(health_check))
}
