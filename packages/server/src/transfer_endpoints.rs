//! Bulk Transfer Endpoints
//!
//! # Endpoints
//!
//! - `GET /utils/export` - Filtered subgraph (`name_filter`, `label_filter`, `type_filter`)
//! - `POST /utils/import` - Replace the whole graph with a `{nodes, relations}` document
//!
//! Import is destructive and not transactional. A failure midway leaves a
//! partially loaded graph.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{AppState, HttpError};
use graphdesk_core::models::{GraphDocument, GraphFilter, ImportSummary, RawGraphDocument};

/// Query parameters for export
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    name_filter: Option<String>,
    label_filter: Option<String>,
    type_filter: Option<String>,
}

impl From<ExportQuery> for GraphFilter {
    fn from(query: ExportQuery) -> Self {
        GraphFilter::new(query.name_filter, query.label_filter, query.type_filter)
    }
}

/// Export a filtered, endpoint-consistent subgraph
///
/// # Example
///
/// ```bash
/// curl "http://localhost:8000/utils/export?label_filter=Person&type_filter=KNOWS"
/// ```
async fn export_graph(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Json<GraphDocument>, HttpError> {
    let Query(query) = query?;
    let filter = GraphFilter::from(query);
    let document = state.transfer.export(&filter).await?;

    tracing::debug!(
        "📤 Exported {} nodes, {} relations",
        document.nodes.len(),
        document.relations.len()
    );
    Ok(Json(document))
}

/// Replace the graph with the posted document
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8000/utils/import \
///   -H "Content-Type: application/json" \
///   -d @graph.json
/// ```
async fn import_graph(
    State(state): State<AppState>,
    payload: Result<Json<RawGraphDocument>, JsonRejection>,
) -> Result<Json<ImportSummary>, HttpError> {
    let Json(document) = payload?;
    tracing::info!(
        "📥 Import requested: {} nodes, {} relations",
        document.nodes.len(),
        document.relations.len()
    );

    let summary = state.transfer.import(document).await?;
    Ok(Json(summary))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/utils/export", get(export_graph))
        .route("/utils/import", post(import_graph))
        .with_state(state)
}
