//! GraphDesk HTTP Server Binary
//!
//! Starts the REST API over either a Neo4j server or a process-local
//! in-memory graph.
//!
//! # Usage
//!
//! ```bash
//! # Against a local Neo4j (http://localhost:7474)
//! NEO4J_PASSWORD=secret cargo run --bin graphdesk-server
//!
//! # No database, data lives until the process exits
//! GRAPHDESK_BACKEND=memory cargo run --bin graphdesk-server
//! ```
//!
//! See `graphdesk_server::config` for the full list of environment
//! variables. `RUST_LOG` controls log verbosity (default: info).

use std::sync::Arc;

use graphdesk_core::db::{GraphStore, Neo4jHttpStore};
use graphdesk_core::services::{EntityStore, GraphRepository, InMemoryStore};
use graphdesk_server::{start_server, AppState, Backend, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚀 GraphDesk Server");
    tracing::info!("==================================");

    let config = ServerConfig::from_env()?;
    tracing::info!("📡 Bind: {}", config.bind_address());

    let store: Arc<dyn EntityStore> = match config.backend {
        Backend::Neo4j => {
            tracing::info!("🔗 Neo4j endpoint: {}", config.neo4j.commit_endpoint());
            let neo4j = Neo4jHttpStore::new(config.neo4j.clone())?;

            // The server still starts when Neo4j is down; requests then fail with 503
            match neo4j.verify_connectivity().await {
                Ok(()) => tracing::info!("✅ Connected to Neo4j"),
                Err(e) => {
                    tracing::warn!("⚠️  Neo4j not reachable yet: {}", e);
                    tracing::warn!("   Requests will fail with 503 until it is");
                }
            }

            let graph_store: Arc<dyn GraphStore> = Arc::new(neo4j);
            Arc::new(GraphRepository::new(graph_store))
        }
        Backend::Memory => {
            tracing::info!("🧠 Using in-memory graph (not persisted)");
            Arc::new(InMemoryStore::new())
        }
    };

    if config.transfer.strict {
        tracing::info!("🔒 Strict import enabled");
    }

    let state = AppState::new(store, config.transfer);
    start_server(state, &config).await?;

    Ok(())
}
