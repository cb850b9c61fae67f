//! GraphRepository - EntityStore over Cypher
//!
//! Turns typed operations into [`cypher`] statements, runs them through a
//! [`GraphStore`] and projects the flattened result rows back into
//! [`Node`]/[`Relation`] values.
//!
//! # Examples
//!
//! ```rust,no_run
//! use graphdesk_core::db::{Neo4jConfig, Neo4jHttpStore};
//! use graphdesk_core::services::{EntityStore, GraphRepository};
//! use graphdesk_core::models::{GraphFilter, Page};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(Neo4jHttpStore::new(Neo4jConfig::default())?);
//!     let repository = GraphRepository::new(store);
//!     let people = repository
//!         .list_nodes(&GraphFilter::default().with_label("Person"), Page::all())
//!         .await?;
//!     println!("{} people", people.len());
//!     Ok(())
//! }
//! ```

use super::entity_store::{validate_labels, validate_relation_type, EntityStore, GraphResult};
use super::GraphError;
use crate::db::{cypher, DatabaseError, GraphStore, Record};
use crate::models::{GraphFilter, Node, NodeUpdate, Page, Relation, RelationUpdate, ID_PROPERTY};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

fn project_node(record: &Record) -> Result<Node, DatabaseError> {
    let properties = record.get_object("properties")?;
    let id = match record.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => properties
            .get(ID_PROPERTY)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| DatabaseError::decode("node row carries no id"))?,
    };

    Ok(Node {
        id,
        labels: record.get_string_list("labels")?,
        properties,
    })
}

fn project_relation(record: &Record) -> Result<Relation, DatabaseError> {
    Ok(Relation {
        id: record.get_str("id")?.to_string(),
        relation_type: record.get_str("type")?.to_string(),
        start_node: record.get_str("startNode")?.to_string(),
        end_node: record.get_str("endNode")?.to_string(),
        properties: record.get_object("properties")?,
    })
}

fn project_all<T>(
    records: &[Record],
    project: impl Fn(&Record) -> Result<T, DatabaseError>,
) -> GraphResult<Vec<T>> {
    Ok(records.iter().map(project).collect::<Result<_, _>>()?)
}

fn project_string(column: &'static str) -> impl Fn(&Record) -> Result<String, DatabaseError> {
    move |record| record.get_str(column).map(String::from)
}

/// Cypher-backed entity repository
pub struct GraphRepository {
    store: Arc<dyn GraphStore>,
}

impl GraphRepository {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    fn first_node(records: Vec<Record>) -> GraphResult<Option<Node>> {
        Ok(records.first().map(project_node).transpose()?)
    }

    fn first_relation(records: Vec<Record>) -> GraphResult<Option<Relation>> {
        Ok(records.first().map(project_relation).transpose()?)
    }
}

#[async_trait]
impl EntityStore for GraphRepository {
    async fn create_node(&self, node: Node) -> GraphResult<Node> {
        let labels = validate_labels(&node.labels)?;
        let Node { id, properties, .. } = node.into_persisted();

        let query = cypher::create_node(&labels, properties);
        let records = self.store.run_query(query).await?;

        let message = format!("creating node '{}' returned no row", id);
        let created = Self::first_node(records)?;
        created.ok_or_else(|| GraphError::store_inconsistency(message))
    }

    async fn get_node(&self, id: &str) -> GraphResult<Node> {
        let records = self.store.run_query(cypher::get_node(id)).await?;
        let node = Self::first_node(records)?;
        node.ok_or_else(|| GraphError::node_not_found(id))
    }

    async fn update_node(&self, id: &str, update: NodeUpdate) -> GraphResult<Node> {
        let query = cypher::update_node(id, update.into_delta(id));
        let records = self.store.run_query(query).await?;
        let node = Self::first_node(records)?;
        node.ok_or_else(|| GraphError::node_not_found(id))
    }

    async fn delete_node(&self, id: &str) -> GraphResult<()> {
        self.store.run_query(cypher::delete_node(id)).await?;
        Ok(())
    }

    async fn list_nodes(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Node>> {
        let query = cypher::list_nodes(filter, page);
        let records = self.store.run_query(query).await?;
        project_all(&records, project_node)
    }

    async fn create_relation(&self, relation: Relation) -> GraphResult<Relation> {
        let relation_type = validate_relation_type(&relation.relation_type)?;
        let Relation {
            start_node,
            end_node,
            properties,
            ..
        } = relation.into_persisted();

        let query = cypher::create_relation(&relation_type, &start_node, &end_node, properties);
        let records = self.store.run_query(query).await?;

        // Zero rows means the endpoint MATCH failed, so nothing was created
        let created = Self::first_relation(records)?;
        created.ok_or_else(|| GraphError::missing_endpoint(start_node, end_node))
    }

    async fn get_relation(&self, id: &str) -> GraphResult<Relation> {
        let records = self.store.run_query(cypher::get_relation(id)).await?;
        let relation = Self::first_relation(records)?;
        relation.ok_or_else(|| GraphError::relation_not_found(id))
    }

    async fn update_relation(&self, id: &str, update: RelationUpdate) -> GraphResult<Relation> {
        let query = cypher::update_relation(id, update.into_delta(id));
        let records = self.store.run_query(query).await?;
        let relation = Self::first_relation(records)?;
        relation.ok_or_else(|| GraphError::relation_not_found(id))
    }

    async fn delete_relation(&self, id: &str) -> GraphResult<()> {
        self.store.run_query(cypher::delete_relation(id)).await?;
        Ok(())
    }

    async fn list_relations(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Relation>> {
        let query = cypher::list_relations(filter, page);
        let records = self.store.run_query(query).await?;
        project_all(&records, project_relation)
    }

    async fn list_labels(&self) -> GraphResult<Vec<String>> {
        let records = self.store.run_query(cypher::list_labels()).await?;
        project_all(&records, project_string("label"))
    }

    async fn list_relationship_types(&self) -> GraphResult<Vec<String>> {
        let query = cypher::list_relationship_types();
        let records = self.store.run_query(query).await?;
        project_all(&records, project_string("relationshipType"))
    }

    async fn clear(&self) -> GraphResult<()> {
        self.store.run_query(cypher::delete_all_nodes()).await?;
        Ok(())
    }
}
