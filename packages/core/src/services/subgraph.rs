//! SubgraphBuilder - filtered, endpoint-consistent graph views
//!
//! Reconciles independent node criteria (name, label) and a relation
//! criterion (type) into one subgraph in which every relation's start and
//! end node are present in the node set.
//!
//! # Algorithm
//!
//! 1. List nodes matching the node criteria. If a node criterion was given
//!    and nothing matched, the result is empty. A type criterion on its own
//!    skips this listing.
//! 2. List relations matching the type criterion.
//! 3. With node criteria present, keep relations touching a matched node
//!    at either end.
//! 4. Fetch every endpoint not already in the node set, concurrently. Ids
//!    that no longer resolve are dropped.
//! 5. Keep only relations whose both endpoints ended up in the node set.
//!
//! Steps run as separate store calls with no transaction around them; a
//! concurrent writer may change the graph in between, which step 5 absorbs.

use super::entity_store::{EntityStore, GraphResult};
use crate::models::{GraphDocument, GraphFilter, Node, Page, Relation};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Upper bound on in-flight endpoint lookups
pub const DEFAULT_LOOKUP_CONCURRENCY: usize = 8;

/// Builds filtered subgraphs over an [`EntityStore`]
#[derive(Clone)]
pub struct SubgraphBuilder {
    store: Arc<dyn EntityStore>,
    lookup_concurrency: usize,
}

impl SubgraphBuilder {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }

    pub fn with_lookup_concurrency(mut self, lookup_concurrency: usize) -> Self {
        self.lookup_concurrency = lookup_concurrency.max(1);
        self
    }

    /// Build the subgraph selected by `filter`
    pub async fn build(&self, filter: &GraphFilter) -> GraphResult<GraphDocument> {
        let node_filtered = filter.has_node_criteria();

        // A type criterion alone selects nodes only through its relations
        let filtered_nodes = if node_filtered || filter.relation_type().is_none() {
            self.store.list_nodes(filter, Page::all()).await?
        } else {
            Vec::new()
        };
        if filtered_nodes.is_empty() && node_filtered {
            tracing::debug!(?filter, "Node criteria matched nothing; returning empty subgraph");
            return Ok(GraphDocument::default());
        }

        let mut relations = self.store.list_relations(filter, Page::all()).await?;

        let mut node_ids: HashSet<String> = HashSet::with_capacity(filtered_nodes.len());
        let mut nodes: Vec<Node> = Vec::with_capacity(filtered_nodes.len());
        for node in filtered_nodes {
            if node_ids.insert(node.id.clone()) {
                nodes.push(node);
            }
        }

        if node_filtered {
            let matched = |id: &str| node_ids.contains(id);
            relations.retain(|r| matched(&r.start_node) || matched(&r.end_node));
        }

        let missing: BTreeSet<String> = relations
            .iter()
            .flat_map(|r| [&r.start_node, &r.end_node])
            .filter(|id| !node_ids.contains(id.as_str()))
            .cloned()
            .collect();

        let fetched = self.fetch_endpoints(missing).await?;
        for node in fetched {
            if node_ids.insert(node.id.clone()) {
                nodes.push(node);
            }
        }

        let relations: Vec<Relation> = relations
            .into_iter()
            .filter(|r| node_ids.contains(&r.start_node) && node_ids.contains(&r.end_node))
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            relations = relations.len(),
            "Built filtered subgraph"
        );

        Ok(GraphDocument { nodes, relations })
    }

    /// Look up endpoint nodes by id; unresolved ids are skipped, other
    /// failures abort. Output follows id order regardless of completion order.
    async fn fetch_endpoints(&self, ids: BTreeSet<String>) -> GraphResult<Vec<Node>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let store = &self.store;
        let mut found: Vec<Node> = stream::iter(ids)
            .map(|id| async move {
                match store.get_node(&id).await {
                    Ok(node) => Ok(Some(node)),
                    Err(err) if err.is_not_found() => {
                        tracing::debug!(node_id = %id, "Dropping dangling relation endpoint");
                        Ok(None)
                    }
                    Err(err) => Err(err),
                }
            })
            .buffer_unordered(self.lookup_concurrency)
            .try_filter_map(|node| async move { Ok(node) })
            .try_collect()
            .await?;

        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }
}
