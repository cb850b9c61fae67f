//! Service Layer Error Types
//!
//! `GraphError` is what every entity store, the subgraph builder and bulk
//! transfer return. The HTTP layer maps each variant to a caller-visible
//! outcome; nothing here is swallowed on the way up.

use crate::db::DatabaseError;
use std::fmt;
use thiserror::Error;

/// Kind of entity an id-addressed operation targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Relation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("Node"),
            EntityKind::Relation => f.write_str("Relation"),
        }
    }
}

/// Graph service errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// Id-addressed operation matched zero rows
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Relation creation matched no endpoint pair
    #[error("Cannot create relation: node '{start_node}' or '{end_node}' does not exist")]
    MissingEndpoint {
        start_node: String,
        end_node: String,
    },

    /// Label or relation type rejected before querying
    #[error("Invalid identifier '{0}': only ASCII letters, digits and '_' are allowed")]
    InvalidIdentifier(String),

    /// Entity failed a structural check (empty labels, duplicate id)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Store unreachable or transiently failing; safe to retry
    #[error("Graph store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store acknowledged a write but returned nothing to project
    #[error("Store inconsistency: {0}")]
    StoreInconsistency(String),

    /// Import row that could not be decoded
    #[error("Malformed {section} entry at index {index}: {reason}")]
    MalformedImportEntry {
        section: &'static str,
        index: usize,
        reason: String,
    },

    /// Any other store-side failure
    #[error("Database operation failed: {0}")]
    Database(DatabaseError),
}

impl GraphError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Node,
            id: id.into(),
        }
    }

    pub fn relation_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Relation,
            id: id.into(),
        }
    }

    pub fn missing_endpoint(start_node: impl Into<String>, end_node: impl Into<String>) -> Self {
        Self::MissingEndpoint {
            start_node: start_node.into(),
            end_node: end_node.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn store_inconsistency(msg: impl Into<String>) -> Self {
        Self::StoreInconsistency(msg.into())
    }

    pub fn malformed_entry(section: &'static str, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedImportEntry {
            section,
            index,
            reason: reason.into(),
        }
    }

    /// Not-found class: the addressed entity (or an endpoint) is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MissingEndpoint { .. })
    }

    /// Rejected input rather than a store failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_) | Self::Validation(_) | Self::MalformedImportEntry { .. }
        )
    }
}

impl From<DatabaseError> for GraphError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Unavailable(msg) => Self::StoreUnavailable(msg),
            DatabaseError::InvalidIdentifier(raw) => Self::InvalidIdentifier(raw),
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_mapping() {
        assert!(matches!(
            GraphError::from(DatabaseError::unavailable("down")),
            GraphError::StoreUnavailable(_)
        ));
        assert!(matches!(
            GraphError::from(DatabaseError::InvalidIdentifier("BAD TYPE".into())),
            GraphError::InvalidIdentifier(ref raw) if raw == "BAD TYPE"
        ));
        assert!(matches!(
            GraphError::from(DatabaseError::query("Neo.ClientError.X", "boom")),
            GraphError::Database(_)
        ));
    }

    #[test]
    fn test_not_found_class() {
        assert!(GraphError::node_not_found("n1").is_not_found());
        assert!(GraphError::missing_endpoint("a", "b").is_not_found());
        assert!(!GraphError::StoreUnavailable("x".into()).is_not_found());
    }

    #[test]
    fn test_messages() {
        let not_found = GraphError::node_not_found("n1");
        assert_eq!(not_found.to_string(), "Node not found: n1");
        assert_eq!(
            GraphError::malformed_entry("relations", 3, "missing field `type`").to_string(),
            "Malformed relations entry at index 3: missing field `type`"
        );
    }
}
