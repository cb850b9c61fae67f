//! Database Error Types
//!
//! Errors raised by the GraphStore adapter: transport failures, store-side
//! query errors, undecodable responses and rejected identifiers.

use thiserror::Error;

/// GraphStore adapter errors
///
/// `Unavailable` is the retryable class (connectivity, timeouts, server-side
/// transient failures). Everything else is a definite answer from the store
/// or from the adapter's own validation.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Store could not be reached or reported a transient failure
    #[error("Graph store unavailable: {0}")]
    Unavailable(String),

    /// Store rejected the query
    #[error("Query failed [{code}]: {message}")]
    Query { code: String, message: String },

    /// Store response did not have the expected shape
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// Label or relationship type is not safe to embed in query text
    #[error("Invalid identifier '{0}': expected ASCII letters, digits or '_', not led by a digit")]
    InvalidIdentifier(String),
}

impl DatabaseError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn query(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<reqwest::Error> for DatabaseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
