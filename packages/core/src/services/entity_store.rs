//! EntityStore Trait - Typed Graph CRUD
//!
//! The typed surface consumed by the HTTP layer, the subgraph builder and
//! bulk transfer. Two implementations exist:
//!
//! - [`GraphRepository`](super::GraphRepository) - Cypher over any
//!   [`GraphStore`](crate::db::GraphStore)
//! - [`InMemoryStore`](super::InMemoryStore) - process-local graph for tests and demos
//!
//! Both share one contract:
//!
//! - id-addressed reads and updates return [`GraphError::NotFound`] on zero rows
//! - relation creation returns [`GraphError::MissingEndpoint`] when either
//!   endpoint id does not resolve
//! - deletes are idempotent
//! - list operations return an empty vector rather than an error
//! - labels and relation types are validated before any store call

use super::GraphError;
use crate::db::Identifier;
use crate::models::{GraphFilter, Node, NodeUpdate, Page, Relation, RelationUpdate};
use async_trait::async_trait;

pub type GraphResult<T> = Result<T, GraphError>;

/// Typed node and relation persistence
#[async_trait]
pub trait EntityStore: Send + Sync {
    //
    // NODES
    //

    /// Persist a node; `properties.id` is forced to `node.id`
    async fn create_node(&self, node: Node) -> GraphResult<Node>;

    async fn get_node(&self, id: &str) -> GraphResult<Node>;

    /// Merge `update.properties` into the node's property bag
    async fn update_node(&self, id: &str, update: NodeUpdate) -> GraphResult<Node>;

    /// Detach-delete; deleting a missing id is not an error
    async fn delete_node(&self, id: &str) -> GraphResult<()>;

    /// Nodes matching the name AND label criteria of `filter`, paginated
    async fn list_nodes(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Node>>;

    //
    // RELATIONS
    //

    async fn create_relation(&self, relation: Relation) -> GraphResult<Relation>;

    async fn get_relation(&self, id: &str) -> GraphResult<Relation>;

    async fn update_relation(&self, id: &str, update: RelationUpdate) -> GraphResult<Relation>;

    async fn delete_relation(&self, id: &str) -> GraphResult<()>;

    /// Relations matching the type criterion of `filter`, paginated
    async fn list_relations(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Relation>>;

    //
    // VOCABULARY
    //

    /// Distinct labels currently in use
    async fn list_labels(&self) -> GraphResult<Vec<String>>;

    /// Distinct relation types currently in use
    async fn list_relationship_types(&self) -> GraphResult<Vec<String>>;

    //
    // LIFECYCLE
    //

    /// Detach-delete every node in the store
    async fn clear(&self) -> GraphResult<()>;
}

/// Validate node labels for embedding; at least one label is required
pub(crate) fn validate_labels(labels: &[String]) -> GraphResult<Vec<Identifier>> {
    if labels.is_empty() {
        return Err(GraphError::validation("a node requires at least one label"));
    }
    Ok(Identifier::parse_all(labels)?)
}

pub(crate) fn validate_relation_type(relation_type: &str) -> GraphResult<Identifier> {
    Ok(Identifier::parse(relation_type)?)
}
