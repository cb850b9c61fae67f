//! InMemoryStore - process-local EntityStore
//!
//! Keeps nodes and relations in insertion order behind a single
//! `tokio::sync::RwLock`, with hash indexes for id lookups. Semantics follow
//! the Cypher repository: the same validation, the same merge rules, the same
//! name matching, detach-delete on node removal and `MissingEndpoint` when a
//! relation's endpoints do not resolve. Used by the test suites, the
//! benchmarks and the server's `memory` backend.

use std::collections::{HashMap, HashSet};

use super::entity_store::{validate_labels, validate_relation_type, EntityStore, GraphResult};
use super::GraphError;
use crate::models::{GraphFilter, Node, NodeUpdate, Page, Relation, RelationUpdate};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Entities in insertion order plus id -> position indexes
///
/// The indexes are rebuilt whenever a removal shifts positions.
#[derive(Debug, Default)]
struct GraphState {
    nodes: Vec<Node>,
    relations: Vec<Relation>,
    node_at: HashMap<String, usize>,
    relation_at: HashMap<String, usize>,
}

impl GraphState {
    fn node_index(&self, id: &str) -> Option<usize> {
        self.node_at.get(id).copied()
    }

    fn relation_index(&self, id: &str) -> Option<usize> {
        self.relation_at.get(id).copied()
    }

    fn push_node(&mut self, node: Node) {
        let position = self.nodes.len();
        self.node_at.insert(node.id.clone(), position);
        self.nodes.push(node);
    }

    fn push_relation(&mut self, relation: Relation) {
        let position = self.relations.len();
        self.relation_at.insert(relation.id.clone(), position);
        self.relations.push(relation);
    }

    fn remove_node(&mut self, id: &str) {
        if self.node_at.remove(id).is_none() {
            return;
        }
        self.nodes.retain(|n| n.id != id);
        self.node_at = positions(self.nodes.iter().map(|n| n.id.as_str()));

        let before = self.relations.len();
        self.relations.retain(|r| !r.touches(id));
        if self.relations.len() != before {
            self.reindex_relations();
        }
    }

    fn remove_relation(&mut self, id: &str) {
        if self.relation_at.remove(id).is_some() {
            self.relations.retain(|r| r.id != id);
            self.reindex_relations();
        }
    }

    fn reindex_relations(&mut self) {
        self.relation_at = positions(self.relations.iter().map(|r| r.id.as_str()));
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.relations.clear();
        self.node_at.clear();
        self.relation_at.clear();
    }
}

fn positions<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.to_string(), i)).collect()
}

/// Distinct values in first-seen order
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// EntityStore held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<GraphState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn node_count(&self) -> usize {
        self.state.read().await.nodes.len()
    }

    pub async fn relation_count(&self) -> usize {
        self.state.read().await.relations.len()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn create_node(&self, node: Node) -> GraphResult<Node> {
        validate_labels(&node.labels)?;
        let node = node.into_persisted();

        let mut state = self.state.write().await;
        if state.node_index(&node.id).is_some() {
            return Err(GraphError::validation(format!("node '{}' already exists", node.id)));
        }
        state.push_node(node.clone());
        Ok(node)
    }

    async fn get_node(&self, id: &str) -> GraphResult<Node> {
        let state = self.state.read().await;
        state
            .node_index(id)
            .map(|i| state.nodes[i].clone())
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    async fn update_node(&self, id: &str, update: NodeUpdate) -> GraphResult<Node> {
        let mut state = self.state.write().await;
        let index = state
            .node_index(id)
            .ok_or_else(|| GraphError::node_not_found(id))?;

        let node = &mut state.nodes[index];
        node.properties.extend(update.into_delta(id));
        Ok(node.clone())
    }

    async fn delete_node(&self, id: &str) -> GraphResult<()> {
        self.state.write().await.remove_node(id);
        Ok(())
    }

    async fn list_nodes(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Node>> {
        let state = self.state.read().await;
        let nodes = state.nodes.iter();
        Ok(page.apply(nodes.filter(|n| filter.matches_node(n)).cloned()))
    }

    async fn create_relation(&self, relation: Relation) -> GraphResult<Relation> {
        validate_relation_type(&relation.relation_type)?;
        let relation = relation.into_persisted();

        let mut state = self.state.write().await;
        if state.node_index(&relation.start_node).is_none()
            || state.node_index(&relation.end_node).is_none()
        {
            return Err(GraphError::missing_endpoint(relation.start_node, relation.end_node));
        }
        if state.relation_index(&relation.id).is_some() {
            let message = format!("relation '{}' already exists", relation.id);
            return Err(GraphError::validation(message));
        }
        state.push_relation(relation.clone());
        Ok(relation)
    }

    async fn get_relation(&self, id: &str) -> GraphResult<Relation> {
        let state = self.state.read().await;
        state
            .relation_index(id)
            .map(|i| state.relations[i].clone())
            .ok_or_else(|| GraphError::relation_not_found(id))
    }

    async fn update_relation(&self, id: &str, update: RelationUpdate) -> GraphResult<Relation> {
        let mut state = self.state.write().await;
        let index = state
            .relation_index(id)
            .ok_or_else(|| GraphError::relation_not_found(id))?;

        let relation = &mut state.relations[index];
        relation.properties.extend(update.into_delta(id));
        Ok(relation.clone())
    }

    async fn delete_relation(&self, id: &str) -> GraphResult<()> {
        self.state.write().await.remove_relation(id);
        Ok(())
    }

    async fn list_relations(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Relation>> {
        let state = self.state.read().await;
        let relations = state.relations.iter();
        Ok(page.apply(relations.filter(|r| filter.matches_relation(r)).cloned()))
    }

    async fn list_labels(&self) -> GraphResult<Vec<String>> {
        let state = self.state.read().await;
        let labels = state.nodes.iter().flat_map(|n| &n.labels);
        Ok(distinct(labels.map(String::as_str)))
    }

    async fn list_relationship_types(&self) -> GraphResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(distinct(state.relations.iter().map(|r| r.relation_type.as_str())))
    }

    async fn clear(&self) -> GraphResult<()> {
        self.state.write().await.clear();
        Ok(())
    }
}
