//! Node Endpoints
//!
//! # Endpoints
//!
//! - `POST /nodes` - Create a node (id generated when omitted)
//! - `GET /nodes` - List nodes (`skip`, `limit`, `name_filter`, `label_filter`)
//! - `GET /nodes/:id` - Get a node by ID
//! - `PUT /nodes/:id` - Merge properties into a node
//! - `DELETE /nodes/:id` - Detach-delete a node

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, HttpError};
use graphdesk_core::models::{GraphFilter, Node, NodeUpdate, Page};

/// Query parameters for listing nodes
#[derive(Debug, Default, Deserialize)]
pub struct ListNodesQuery {
    skip: Option<u64>,
    limit: Option<u64>,
    name_filter: Option<String>,
    label_filter: Option<String>,
}

impl ListNodesQuery {
    fn page(&self) -> Page {
        Page::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }

    fn filter(&self) -> GraphFilter {
        GraphFilter::new(self.name_filter.clone(), self.label_filter.clone(), None)
    }
}

/// Acknowledgement returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Create a new node
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8000/nodes \
///   -H "Content-Type: application/json" \
///   -d '{"labels": ["Person"], "properties": {"name": "Ada"}}'
/// ```
async fn create_node(
    State(state): State<AppState>,
    payload: Result<Json<Node>, JsonRejection>,
) -> Result<Json<Node>, HttpError> {
    let Json(node) = payload?;
    let created = state.store.create_node(node).await?;

    tracing::debug!("✅ Created node: {}", created.id);
    Ok(Json(created))
}

async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Node>, HttpError> {
    Ok(Json(state.store.get_node(&id).await?))
}

/// Merge properties into an existing node
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:8000/nodes/3f2a... \
///   -H "Content-Type: application/json" \
///   -d '{"properties": {"age": 36}}'
/// ```
async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NodeUpdate>, JsonRejection>,
) -> Result<Json<Node>, HttpError> {
    let Json(update) = payload?;
    let updated = state.store.update_node(&id, update).await?;

    tracing::debug!("✅ Updated node: {}", id);
    Ok(Json(updated))
}

async fn delete_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    state.store.delete_node(&id).await?;

    tracing::debug!("✅ Deleted node: {}", id);
    Ok(Json(DeleteResponse {
        message: "Node deleted",
    }))
}

async fn list_nodes(
    State(state): State<AppState>,
    query: Result<Query<ListNodesQuery>, QueryRejection>,
) -> Result<Json<Vec<Node>>, HttpError> {
    let Query(query) = query?;
    let nodes = state.store.list_nodes(&query.filter(), query.page()).await?;
    Ok(Json(nodes))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/nodes", get(list_nodes).post(create_node))
        .route(
            "/nodes/:id",
            get(get_node).put(update_node).delete(delete_node),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListNodesQuery::default();
        assert_eq!(query.page(), Page::new(0, 10));
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_list_query_blank_filters_are_absent() {
        let query = ListNodesQuery {
            name_filter: Some("  ".into()),
            label_filter: Some("Person".into()),
            ..ListNodesQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.name(), None);
        assert_eq!(filter.label(), Some("Person"));
    }
}
