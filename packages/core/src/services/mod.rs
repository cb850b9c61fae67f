//! Graph Services
//!
//! This module contains the graph-facing business logic:
//!
//! - `EntityStore` - Typed node/relation CRUD contract
//! - `GraphRepository` - Cypher implementation over a `GraphStore`
//! - `InMemoryStore` - Process-local implementation for tests and demos
//! - `SubgraphBuilder` - Filtered, endpoint-consistent subgraph views
//! - `GraphTransfer` - Bulk export and destructive import
//!
//! Services sit between the database adapter and the HTTP layer. Store
//! handles are passed in explicitly as `Arc<dyn EntityStore>`.

pub mod entity_store;
pub mod error;
pub mod memory_store;
pub mod repository;
pub mod subgraph;
pub mod transfer;

pub use entity_store::{EntityStore, GraphResult};
pub use error::{EntityKind, GraphError};
pub use memory_store::InMemoryStore;
pub use repository::GraphRepository;
pub use subgraph::{SubgraphBuilder, DEFAULT_LOOKUP_CONCURRENCY};
pub use transfer::{GraphTransfer, TransferOptions};
