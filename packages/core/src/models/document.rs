//! Bulk transfer documents
//!
//! `GraphDocument` is the flattened `{nodes, relations}` form produced by
//! export. Import reads the same shape, but entry by entry through
//! [`RawGraphDocument`] so that one malformed row cannot reject the whole
//! payload.

use std::collections::HashSet;

use super::{Node, Relation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node set and relation list of a (sub)graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl GraphDocument {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relations.is_empty()
    }

    /// Relations whose start or end id is absent from the node set
    pub fn dangling_relations(&self) -> Vec<&Relation> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let resolved = |id: &str| ids.contains(id);
        self.relations
            .iter()
            .filter(|r| !resolved(&r.start_node) || !resolved(&r.end_node))
            .collect()
    }
}

impl From<GraphDocument> for RawGraphDocument {
    fn from(document: GraphDocument) -> Self {
        Self {
            nodes: document
                .nodes
                .into_iter()
                .filter_map(|n| serde_json::to_value(n).ok())
                .collect(),
            relations: document
                .relations
                .into_iter()
                .filter_map(|r| serde_json::to_value(r).ok())
                .collect(),
        }
    }
}

/// Import payload with entries left undecoded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraphDocument {
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub relations: Vec<Value>,
}

/// Outcome counts of an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub nodes_created: usize,
    pub relations_created: usize,
    /// Entries dropped as malformed or rejected by validation
    pub skipped_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Properties;
    use serde_json::json;

    #[test]
    fn test_summary_wire_format() {
        let summary = ImportSummary {
            nodes_created: 3,
            relations_created: 1,
            skipped_entries: 2,
        };
        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({"nodesCreated": 3, "relationsCreated": 1, "skippedEntries": 2})
        );
    }

    #[test]
    fn test_raw_document_tolerates_missing_sections() {
        let payload = json!({"nodes": [{"bogus": true}]});
        let raw: RawGraphDocument = serde_json::from_value(payload).unwrap();
        assert_eq!(raw.nodes.len(), 1);
        assert!(raw.relations.is_empty());
    }

    #[test]
    fn test_dangling_relations() {
        let document = GraphDocument {
            nodes: vec![Node::new_with_id("a", vec!["X".into()], Properties::new())],
            relations: vec![
                Relation::new_with_id("r1", "SELF", "a", "a", Properties::new()),
                Relation::new_with_id("r2", "OUT", "a", "missing", Properties::new()),
            ],
        };
        let dangling = document.dangling_relations();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].id, "r2");
    }
}
