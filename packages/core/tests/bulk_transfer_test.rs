//! Integration tests for GraphTransfer
//!
//! Tests cover:
//! - Import counts and document ordering
//! - Strict vs lenient handling of malformed entries
//! - Export/import round trip between independent stores
//! - Filtered export staying endpoint-consistent
//! - Store failures aborting the load

use anyhow::Result;
use async_trait::async_trait;
use graphdesk_core::models::{
    GraphFilter, Node, NodeUpdate, Page, Properties, RawGraphDocument, Relation, RelationUpdate,
};
use graphdesk_core::services::{
    EntityStore, GraphError, GraphResult, GraphTransfer, InMemoryStore, TransferOptions,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn document(value: serde_json::Value) -> RawGraphDocument {
    serde_json::from_value(value).unwrap()
}

fn scenario_document() -> RawGraphDocument {
    document(json!({
        "nodes": [
            {"id": "A", "labels": ["Person"], "properties": {"name": "alpha"}},
            {"id": "B", "labels": ["Person", "Admin"], "properties": {"name": "beta"}},
            {"id": "C", "labels": ["City"], "properties": {"name": "gamma", "population": 1200}}
        ],
        "relations": [
            {
                "id": "r1",
                "type": "LIVES_IN",
                "startNode": "A",
                "endNode": "C",
                "properties": {"since": 2019}
            },
            {"id": "r2", "type": "KNOWS", "startNode": "A", "endNode": "B"}
        ]
    }))
}

// =========================================================================
// Import Tests
// =========================================================================

#[tokio::test]
async fn test_import_reports_counts() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let summary = GraphTransfer::new(store.clone())
        .import(scenario_document())
        .await?;

    assert_eq!(summary.nodes_created, 3);
    assert_eq!(summary.relations_created, 2);
    assert_eq!(summary.skipped_entries, 0);
    assert_eq!(store.list_labels().await?, vec!["Person", "Admin", "City"]);
    Ok(())
}

#[tokio::test]
async fn test_import_generates_missing_ids() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let untitled = document(json!({
        "nodes": [{"labels": ["Tag"], "properties": {"name": "untitled"}}]
    }));
    GraphTransfer::new(store.clone()).import(untitled).await?;

    let everything = GraphFilter::default();
    let nodes = store.list_nodes(&everything, Page::all()).await?;
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].id.len(), 36);
    assert_eq!(nodes[0].properties["id"], nodes[0].id.as_str());
    Ok(())
}

#[tokio::test]
async fn test_relations_load_after_nodes() -> Result<()> {
    // section order in the payload does not matter; nodes always load first
    let store = Arc::new(InMemoryStore::new());
    let transfer = GraphTransfer::new(store.clone());
    let relations_first = document(json!({
        "relations": [{"id": "r1", "type": "KNOWS", "startNode": "A", "endNode": "B"}],
        "nodes": [{"id": "A", "labels": ["Person"]}, {"id": "B", "labels": ["Person"]}]
    }));
    let summary = transfer.import(relations_first).await?;
    assert_eq!(summary.relations_created, 1);

    let missing_end = document(json!({
        "nodes": [{"id": "A", "labels": ["Person"]}],
        "relations": [{"id": "r1", "type": "KNOWS", "startNode": "A", "endNode": "B"}]
    }));
    let summary = transfer.import(missing_end).await?;
    assert_eq!(summary.relations_created, 0);
    assert_eq!(store.relation_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_document_clears_store() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let transfer = GraphTransfer::new(store.clone());
    transfer.import(scenario_document()).await?;

    let summary = transfer.import(RawGraphDocument::default()).await?;
    assert_eq!(summary.nodes_created, 0);
    assert_eq!(store.node_count().await, 0);
    assert_eq!(store.relation_count().await, 0);
    Ok(())
}

// =========================================================================
// Malformed Entry Tests
// =========================================================================

fn malformed_document() -> RawGraphDocument {
    document(json!({
        "nodes": [
            {"id": "A", "labels": ["Person"]},
            {"id": "B", "labels": "Person"},
            "not an object"
        ],
        "relations": [
            {"id": "r1", "type": "KNOWS", "startNode": "A", "endNode": "A"},
            {"id": "r2", "type": "KNOWS", "endNode": "A"},
            {"id": "r3", "type": "HAS SPACE", "startNode": "A", "endNode": "A"}
        ]
    }))
}

#[tokio::test]
async fn test_lenient_import_counts_skipped() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let summary = GraphTransfer::new(store.clone())
        .import(malformed_document())
        .await?;

    assert_eq!(summary.nodes_created, 1);
    assert_eq!(summary.relations_created, 1);
    assert_eq!(summary.skipped_entries, 4);
    Ok(())
}

#[tokio::test]
async fn test_strict_import_leaves_store_untouched() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let keep = Node::new_with_id("keep", vec!["Existing".into()], Properties::new());
    store.create_node(keep).await?;

    let options = TransferOptions {
        strict: true,
        ..TransferOptions::default()
    };
    let transfer = GraphTransfer::with_options(store.clone(), options);
    let err = transfer.import(malformed_document()).await.unwrap_err();

    let message = err.to_string();
    assert!(message.starts_with("Malformed nodes entry at index 1"));
    assert!(matches!(err, GraphError::MalformedImportEntry { index: 1, .. }));
    assert!(store.get_node("keep").await.is_ok());
    Ok(())
}

// =========================================================================
// Export Tests
// =========================================================================

#[tokio::test]
async fn test_round_trip_between_stores() -> Result<()> {
    let source = Arc::new(InMemoryStore::new());
    GraphTransfer::new(source.clone())
        .import(scenario_document())
        .await?;
    let mayor = json!({"mayor": "x"}).as_object().cloned().unwrap();
    let update = NodeUpdate::properties(mayor);
    source.update_node("C", update).await?;

    let exported = GraphTransfer::new(source.clone()).export_all().await?;

    let target = Arc::new(InMemoryStore::new());
    GraphTransfer::new(target.clone())
        .import(exported.clone().into())
        .await?;
    let reexported = GraphTransfer::new(target).export_all().await?;

    assert_eq!(exported, reexported);
    let city = reexported.nodes.iter().find(|n| n.id == "C").unwrap();
    assert_eq!(city.properties["mayor"], "x");
    assert_eq!(city.properties["population"], 1200);
    Ok(())
}

#[tokio::test]
async fn test_filtered_export_is_consistent() -> Result<()> {
    let store = Arc::new(InMemoryStore::new());
    let transfer = GraphTransfer::new(store);
    transfer.import(scenario_document()).await?;

    let document = transfer
        .export(&GraphFilter::default().with_label("City"))
        .await?;

    let mut ids: Vec<&str> = document.nodes.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(document.relations.len(), 1);
    assert_eq!(document.relations[0].relation_type, "LIVES_IN");
    assert!(document.dangling_relations().is_empty());
    Ok(())
}

// =========================================================================
// Failure Propagation Tests
// =========================================================================

/// Store that goes away after a fixed number of node writes
struct FlakyStore {
    inner: InMemoryStore,
    writes_left: AtomicUsize,
}

#[async_trait]
impl EntityStore for FlakyStore {
    async fn create_node(&self, node: Node) -> GraphResult<Node> {
        if self.writes_left.fetch_sub(1, Ordering::SeqCst) == 0 {
            return Err(GraphError::StoreUnavailable("connection refused".into()));
        }
        self.inner.create_node(node).await
    }
    async fn get_node(&self, id: &str) -> GraphResult<Node> {
        self.inner.get_node(id).await
    }
    async fn update_node(&self, id: &str, update: NodeUpdate) -> GraphResult<Node> {
        self.inner.update_node(id, update).await
    }
    async fn delete_node(&self, id: &str) -> GraphResult<()> {
        self.inner.delete_node(id).await
    }
    async fn list_nodes(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Node>> {
        self.inner.list_nodes(filter, page).await
    }
    async fn create_relation(&self, relation: Relation) -> GraphResult<Relation> {
        self.inner.create_relation(relation).await
    }
    async fn get_relation(&self, id: &str) -> GraphResult<Relation> {
        self.inner.get_relation(id).await
    }
    async fn update_relation(&self, id: &str, update: RelationUpdate) -> GraphResult<Relation> {
        self.inner.update_relation(id, update).await
    }
    async fn delete_relation(&self, id: &str) -> GraphResult<()> {
        self.inner.delete_relation(id).await
    }
    async fn list_relations(&self, filter: &GraphFilter, page: Page) -> GraphResult<Vec<Relation>> {
        self.inner.list_relations(filter, page).await
    }
    async fn list_labels(&self) -> GraphResult<Vec<String>> {
        self.inner.list_labels().await
    }
    async fn list_relationship_types(&self) -> GraphResult<Vec<String>> {
        self.inner.list_relationship_types().await
    }
    async fn clear(&self) -> GraphResult<()> {
        self.inner.clear().await
    }
}

#[tokio::test]
async fn test_store_failure_aborts_partial_load() -> Result<()> {
    let store = Arc::new(FlakyStore {
        inner: InMemoryStore::new(),
        writes_left: AtomicUsize::new(2),
    });

    let result = GraphTransfer::new(store.clone())
        .import(scenario_document())
        .await;

    assert!(matches!(result, Err(GraphError::StoreUnavailable(_))));
    // partially loaded: two nodes, no relations
    assert_eq!(store.inner.node_count().await, 2);
    assert_eq!(store.inner.relation_count().await, 0);
    Ok(())
}
