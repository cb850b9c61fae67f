//! Vocabulary Endpoints
//!
//! Labels and relationship types currently in use. Both lists are observed
//! from the data, not a declared schema.
//!
//! - `GET /labels`
//! - `GET /relationship_types`

use axum::{extract::State, response::Json, routing::get, Router};

use crate::{AppState, HttpError};

async fn list_labels(State(state): State<AppState>) -> Result<Json<Vec<String>>, HttpError> {
    Ok(Json(state.store.list_labels().await?))
}

async fn list_relationship_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, HttpError> {
    Ok(Json(state.store.list_relationship_types().await?))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/labels", get(list_labels))
        .route("/relationship_types", get(list_relationship_types))
        .with_state(state)
}
