//! Relation Endpoints
//!
//! # Endpoints
//!
//! - `POST /relations` - Create a relation between two existing nodes
//! - `GET /relations` - List relations (`skip`, `limit`, `type_filter`)
//! - `GET /relations/:id` - Get a relation by ID
//! - `PUT /relations/:id` - Merge properties into a relation (type is fixed)
//! - `DELETE /relations/:id` - Delete a relation

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::node_endpoints::DeleteResponse;
use crate::{AppState, HttpError};
use graphdesk_core::models::{GraphFilter, Page, Relation, RelationUpdate};

/// Query parameters for listing relations
#[derive(Debug, Default, Deserialize)]
pub struct ListRelationsQuery {
    skip: Option<u64>,
    limit: Option<u64>,
    type_filter: Option<String>,
}

impl ListRelationsQuery {
    fn page(&self) -> Page {
        Page::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(Page::DEFAULT_LIMIT),
        )
    }

    fn filter(&self) -> GraphFilter {
        GraphFilter::new(None, None, self.type_filter.clone())
    }
}

/// Create a relation
///
/// Responds 404 with code `MISSING_ENDPOINT` when either node id does not
/// exist.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8000/relations \
///   -H "Content-Type: application/json" \
///   -d '{"type": "KNOWS", "startNode": "a1", "endNode": "b2"}'
/// ```
async fn create_relation(
    State(state): State<AppState>,
    payload: Result<Json<Relation>, JsonRejection>,
) -> Result<Json<Relation>, HttpError> {
    let Json(relation) = payload?;
    let created = state.store.create_relation(relation).await?;

    tracing::debug!(
        "✅ Created relation: {} ({} -[{}]-> {})",
        created.id,
        created.start_node,
        created.relation_type,
        created.end_node
    );
    Ok(Json(created))
}

async fn get_relation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Relation>, HttpError> {
    Ok(Json(state.store.get_relation(&id).await?))
}

async fn update_relation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RelationUpdate>, JsonRejection>,
) -> Result<Json<Relation>, HttpError> {
    let Json(update) = payload?;
    let updated = state.store.update_relation(&id, update).await?;

    tracing::debug!("✅ Updated relation: {}", id);
    Ok(Json(updated))
}

async fn delete_relation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    state.store.delete_relation(&id).await?;

    tracing::debug!("✅ Deleted relation: {}", id);
    Ok(Json(DeleteResponse {
        message: "Relation deleted",
    }))
}

async fn list_relations(
    State(state): State<AppState>,
    query: Result<Query<ListRelationsQuery>, QueryRejection>,
) -> Result<Json<Vec<Relation>>, HttpError> {
    let Query(query) = query?;
    let relations = state
        .store
        .list_relations(&query.filter(), query.page())
        .await?;
    Ok(Json(relations))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/relations", get(list_relations).post(create_relation))
        .route(
            "/relations/:id",
            get(get_relation)
                .put(update_relation)
                .delete(delete_relation),
        )
        .with_state(state)
}
