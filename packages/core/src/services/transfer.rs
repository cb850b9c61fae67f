//! GraphTransfer - bulk export and destructive import
//!
//! Export is the subgraph builder's output. Import wipes the store and
//! reloads it from a `{nodes, relations}` document in three phases:
//!
//! 1. **Parse**: decode every entry. Malformed entries are skipped, or abort
//!    the whole import in strict mode. Nothing has been written yet.
//! 2. **Clear**: detach-delete every node.
//! 3. **Load**: create nodes, then relations, both in document order.
//!
//! No transaction spans the load. A store failure midway leaves a partially
//! loaded graph; import is not safe to retry blindly.

use super::entity_store::{EntityStore, GraphResult};
use super::subgraph::{SubgraphBuilder, DEFAULT_LOOKUP_CONCURRENCY};
use super::GraphError;
use crate::models::{GraphDocument, GraphFilter, ImportSummary, Node, RawGraphDocument, Relation};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Import and export tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Abort on the first malformed entry instead of skipping it
    pub strict: bool,
    /// Concurrent endpoint lookups during export
    pub lookup_concurrency: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            strict: false,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }
}

/// Bulk transfer over an [`EntityStore`]
#[derive(Clone)]
pub struct GraphTransfer {
    store: Arc<dyn EntityStore>,
    options: TransferOptions,
}

/// Decoded entries plus the number dropped while decoding
struct ParsedDocument {
    nodes: Vec<Node>,
    relations: Vec<Relation>,
    skipped: usize,
}

impl GraphTransfer {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self::with_options(store, TransferOptions::default())
    }

    pub fn with_options(store: Arc<dyn EntityStore>, options: TransferOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> TransferOptions {
        self.options
    }

    /// Filtered export; the result never holds a dangling relation
    pub async fn export(&self, filter: &GraphFilter) -> GraphResult<GraphDocument> {
        SubgraphBuilder::new(self.store.clone())
            .with_lookup_concurrency(self.options.lookup_concurrency)
            .build(filter)
            .await
    }

    pub async fn export_all(&self) -> GraphResult<GraphDocument> {
        self.export(&GraphFilter::default()).await
    }

    /// Replace the store's contents with `document`
    pub async fn import(&self, document: RawGraphDocument) -> GraphResult<ImportSummary> {
        let parsed = self.parse(document)?;

        tracing::info!(
            nodes = parsed.nodes.len(),
            relations = parsed.relations.len(),
            "🗑️  Clearing graph before import"
        );
        self.store.clear().await?;

        let mut summary = ImportSummary {
            skipped_entries: parsed.skipped,
            ..ImportSummary::default()
        };

        for node in parsed.nodes {
            let id = node.id.clone();
            match self.store.create_node(node).await {
                Ok(_) => summary.nodes_created += 1,
                Err(err) if err.is_invalid_input() => {
                    tracing::warn!(node_id = %id, error = %err, "Skipping rejected node");
                    summary.skipped_entries += 1;
                }
                Err(err) => return Err(err),
            }
        }

        for relation in parsed.relations {
            let id = relation.id.clone();
            match self.store.create_relation(relation).await {
                Ok(_) => summary.relations_created += 1,
                Err(err @ GraphError::MissingEndpoint { .. }) => {
                    tracing::debug!(
                        relation_id = %id,
                        error = %err,
                        "Relation endpoints not loaded; nothing created"
                    );
                }
                Err(err) if err.is_invalid_input() => {
                    tracing::warn!(relation_id = %id, error = %err, "Skipping rejected relation");
                    summary.skipped_entries += 1;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::info!(
            nodes_created = summary.nodes_created,
            relations_created = summary.relations_created,
            skipped = summary.skipped_entries,
            "✅ Import complete"
        );
        Ok(summary)
    }

    fn parse(&self, document: RawGraphDocument) -> GraphResult<ParsedDocument> {
        let strict = self.options.strict;
        let mut skipped = 0;
        let nodes = decode_section("nodes", document.nodes, strict, &mut skipped)?;
        let relations = decode_section("relations", document.relations, strict, &mut skipped)?;
        Ok(ParsedDocument {
            nodes,
            relations,
            skipped,
        })
    }
}

/// Decode one section entry by entry; in strict mode the first failure aborts
fn decode_section<T: DeserializeOwned>(
    section: &'static str,
    entries: Vec<Value>,
    strict: bool,
    skipped: &mut usize,
) -> GraphResult<Vec<T>> {
    let mut decoded = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<T>(entry) {
            Ok(value) => decoded.push(value),
            Err(err) => {
                let err = GraphError::malformed_entry(section, index, err.to_string());
                if strict {
                    tracing::error!(error = %err, "Aborting strict import");
                    return Err(err);
                }
                tracing::warn!(error = %err, "Skipping malformed import entry");
                *skipped += 1;
            }
        }
    }
    Ok(decoded)
}
