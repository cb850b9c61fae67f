//! HTTP error handling
//!
//! Every handler failure becomes `{message, code, details?}` with a status
//! derived from `code`.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use graphdesk_core::services::GraphError;
use serde::{Deserialize, Serialize};

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Optional detailed error information for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" | "MISSING_ENDPOINT" => StatusCode::NOT_FOUND,
            "INVALID_IDENTIFIER" | "VALIDATION_ERROR" | "MALFORMED_IMPORT_ENTRY"
            | "INVALID_INPUT" => StatusCode::BAD_REQUEST,
            "STORE_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, "❌ {}", self.message);
        }
        (status, Json(self)).into_response()
    }
}

impl From<GraphError> for HttpError {
    fn from(err: GraphError) -> Self {
        let message = err.to_string();
        match err {
            GraphError::NotFound { .. } => HttpError::new(message, "NOT_FOUND"),
            GraphError::MissingEndpoint {
                start_node,
                end_node,
            } => HttpError::with_details(
                message,
                "MISSING_ENDPOINT",
                format!("startNode: {}, endNode: {}", start_node, end_node),
            ),
            GraphError::InvalidIdentifier(_) => HttpError::new(message, "INVALID_IDENTIFIER"),
            GraphError::Validation(_) => HttpError::new(message, "VALIDATION_ERROR"),
            GraphError::MalformedImportEntry { .. } => {
                HttpError::new(message, "MALFORMED_IMPORT_ENTRY")
            }
            GraphError::StoreUnavailable(_) => HttpError::new(message, "STORE_UNAVAILABLE"),
            GraphError::StoreInconsistency(_) => HttpError::new(message, "STORE_INCONSISTENCY"),
            GraphError::Database(db) => {
                HttpError::with_details(message, "DATABASE_ERROR", format!("{:?}", db))
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::new(rejection.body_text(), "INVALID_INPUT")
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        HttpError::new(rejection.body_text(), "INVALID_INPUT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphdesk_core::db::DatabaseError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GraphError::node_not_found("n1"), StatusCode::NOT_FOUND),
            (GraphError::missing_endpoint("a", "b"), StatusCode::NOT_FOUND),
            (GraphError::InvalidIdentifier("BAD TYPE".into()), StatusCode::BAD_REQUEST),
            (GraphError::validation("no labels"), StatusCode::BAD_REQUEST),
            (GraphError::malformed_entry("nodes", 0, "x"), StatusCode::BAD_REQUEST),
            (GraphError::StoreUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (GraphError::store_inconsistency("empty"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                GraphError::Database(DatabaseError::query("Neo.ClientError.X", "boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_body_shape() {
        let body = serde_json::to_value(HttpError::new("Node not found: x", "NOT_FOUND")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"message": "Node not found: x", "code": "NOT_FOUND"})
        );

        let err = HttpError::from(GraphError::missing_endpoint("a", "b"));
        assert_eq!(err.details.as_deref(), Some("startNode: a, endNode: b"));
    }
}
