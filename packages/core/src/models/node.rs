//! Node Data Structures
//!
//! A node is a labeled entity with a free-form property bag. The `id` is the
//! identity key everywhere in GraphDesk: it is generated client-side when a
//! caller omits it, and it is mirrored into `properties["id"]` before every
//! write so that the store can pattern-match on it.
//!
//! # Examples
//!
//! ```rust
//! use graphdesk_core::models::Node;
//! use serde_json::json;
//!
//! let node = Node::new(
//!     vec!["Person".to_string()],
//!     json!({"name": "alpha"}).as_object().cloned().unwrap_or_default(),
//! );
//! assert_eq!(node.labels, vec!["Person"]);
//! assert_eq!(node.id.len(), 36);
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Property bag shared by nodes and relations
pub type Properties = Map<String, Value>;

/// Property key that always mirrors the entity id
pub const ID_PROPERTY: &str = "id";

/// Property key matched by the name filter
pub const NAME_PROPERTY: &str = "name";

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Overwrite `properties["id"]` with the entity id.
///
/// Applied to creation payloads and to update payloads alike, so a transient
/// `id` key can never rename an entity.
pub(crate) fn force_id_property(properties: &mut Properties, id: &str) {
    properties.insert(ID_PROPERTY.to_string(), Value::String(id.to_string()));
}

/// Labeled graph node
///
/// # Fields
///
/// - `id`: Unique identifier (UUID v4 unless supplied by the caller)
/// - `labels`: Ordered, non-empty label list
/// - `properties`: JSON object of arbitrary values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default = "generate_id")]
    pub id: String,

    pub labels: Vec<String>,

    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    /// Create a node with a freshly generated id
    pub fn new(labels: Vec<String>, properties: Properties) -> Self {
        Self::new_with_id(generate_id(), labels, properties)
    }

    /// Create a node with a caller-chosen id
    pub fn new_with_id(id: impl Into<String>, labels: Vec<String>, properties: Properties) -> Self {
        Self {
            id: id.into(),
            labels,
            properties,
        }
    }

    /// Value of the `name` property when it is a string
    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME_PROPERTY).and_then(Value::as_str)
    }

    /// The `name` property as text when it is a scalar
    ///
    /// Numbers and booleans are rendered the way Cypher's `toString` renders
    /// them, so name filters agree across stores.
    pub fn name_text(&self) -> Option<Cow<'_, str>> {
        match self.properties.get(NAME_PROPERTY)? {
            Value::String(name) => Some(Cow::Borrowed(name.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Consume the node and return it ready for persistence
    pub(crate) fn into_persisted(mut self) -> Self {
        force_id_property(&mut self.properties, &self.id);
        self
    }
}

/// Partial update for a node
///
/// Only properties are updatable. Keys present in `properties` are added or
/// overwritten; keys not mentioned are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    #[serde(default)]
    pub properties: Option<Properties>,
}

impl NodeUpdate {
    pub fn properties(properties: Properties) -> Self {
        Self {
            properties: Some(properties),
        }
    }

    /// Property delta for the entity addressed by `id`
    pub(crate) fn into_delta(self, id: &str) -> Properties {
        let mut delta = self.properties.unwrap_or_default();
        force_id_property(&mut delta, id);
        delta
    }
}
