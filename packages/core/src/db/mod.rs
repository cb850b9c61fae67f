//! Database Layer
//!
//! This module is the GraphStore adapter: the only place that talks to the
//! store engine and the only place allowed to put caller-supplied strings
//! into query text.
//!
//! - [`GraphStore`] - the single `run_query` primitive every backend implements
//! - [`CypherQuery`] / [`Record`] - statement text with bound parameters, and result rows
//! - [`Identifier`] - allow-listed labels and relationship types
//! - [`cypher`] - statement templates used by the entity repository
//! - [`Neo4jHttpStore`] - Neo4j over its HTTP transactional endpoint

pub mod cypher;
mod error;
mod graph_store;
mod identifier;
mod neo4j_http;

pub use error::DatabaseError;
pub use graph_store::{CypherQuery, GraphStore, Record};
pub use identifier::Identifier;
pub use neo4j_http::{Neo4jConfig, Neo4jHttpStore};
