//! GraphDesk Core Graph Management Layer
//!
//! This crate provides typed CRUD, filtered subgraph views and bulk
//! import/export over a property graph store (Neo4j).
//!
//! # Architecture
//!
//! - **Cypher over HTTP**: `Neo4jHttpStore` posts bound-parameter statements to
//!   Neo4j's transactional endpoint; one auto-commit transaction per call
//! - **Identifier allow-list**: labels and relation types are the only values
//!   embedded into query text, and only after passing [`db::Identifier`]
//! - **Substitutable stores**: services take `Arc<dyn EntityStore>`, so the
//!   Cypher repository and the in-memory store are interchangeable
//!
//! # Modules
//!
//! - [`models`] - Data structures (Node, Relation, GraphFilter, GraphDocument)
//! - [`db`] - GraphStore adapter, Cypher templates and the Neo4j HTTP client
//! - [`services`] - EntityStore implementations, SubgraphBuilder, GraphTransfer

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use services::*;
