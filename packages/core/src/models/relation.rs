//! Relation Data Structures
//!
//! A relation is a directed, typed edge between two node ids. Endpoints are
//! weak references: the relation stores ids, never the nodes themselves.

use super::node::{force_id_property, generate_id, Properties};
use serde::{Deserialize, Serialize};

/// Directed, typed edge between two nodes
///
/// Wire format uses camelCase (`startNode`, `endNode`) and `type` for the
/// relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    #[serde(default = "generate_id")]
    pub id: String,

    /// Native relationship type in the store; embedded literally into query
    /// text, so it must be a safe identifier
    #[serde(rename = "type")]
    pub relation_type: String,

    pub start_node: String,

    pub end_node: String,

    #[serde(default)]
    pub properties: Properties,
}

impl Relation {
    /// Create a relation with a freshly generated id
    pub fn new(
        relation_type: impl Into<String>,
        start_node: impl Into<String>,
        end_node: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self::new_with_id(
            generate_id(),
            relation_type,
            start_node,
            end_node,
            properties,
        )
    }

    pub fn new_with_id(
        id: impl Into<String>,
        relation_type: impl Into<String>,
        start_node: impl Into<String>,
        end_node: impl Into<String>,
        properties: Properties,
    ) -> Self {
        Self {
            id: id.into(),
            relation_type: relation_type.into(),
            start_node: start_node.into(),
            end_node: end_node.into(),
            properties,
        }
    }

    /// True when either endpoint is `node_id`
    pub fn touches(&self, node_id: &str) -> bool {
        self.start_node == node_id || self.end_node == node_id
    }

    pub(crate) fn into_persisted(mut self) -> Self {
        force_id_property(&mut self.properties, &self.id);
        self
    }
}

/// Partial update for a relation
///
/// The relation type and endpoints are fixed at creation; only properties
/// merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationUpdate {
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl RelationUpdate {
    pub fn properties(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
        }
    }

    pub(crate) fn into_delta(self, id: &str) -> Properties {
        let mut delta = self.properties.unwrap_or_default();
        force_id_property(&mut delta, id);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_is_camel_case() {
        let relation = Relation::new_with_id("r1", "LIVES_IN", "a", "c", Properties::new());
        let value = serde_json::to_value(&relation).unwrap();

        assert_eq!(value["type"], "LIVES_IN");
        assert_eq!(value["startNode"], "a");
        assert_eq!(value["endNode"], "c");
        assert!(value.get("relation_type").is_none());
    }

    #[test]
    fn test_deserialize_missing_endpoint_fails() {
        let result: Result<Relation, _> = serde_json::from_value(json!({
            "type": "LIVES_IN",
            "startNode": "a"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_touches_either_endpoint() {
        let relation = Relation::new("KNOWS", "a", "b", Properties::new());
        assert!(relation.touches("a"));
        assert!(relation.touches("b"));
        assert!(!relation.touches("c"));
    }

    #[test]
    fn test_persisted_relation_id_wins() {
        let mut properties = Properties::new();
        properties.insert("id".to_string(), json!("spoofed"));
        let relation = Relation::new_with_id("r1", "KNOWS", "a", "b", properties);
        let relation = relation.into_persisted();
        assert_eq!(relation.properties["id"], "r1");
    }
}
