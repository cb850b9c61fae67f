//! Filter criteria and pagination
//!
//! One configuration carries every recognized option (`name`, `label`,
//! `relation_type`), each independently optional. Node listings read the
//! first two, relation listings read the third.

use serde::{Deserialize, Serialize};

/// Independent, optional filter criteria
///
/// A criterion is absent when it is `None` or blank after trimming. Present
/// criteria are kept trimmed; construct through [`GraphFilter::new`] or the
/// `with_*` builders so that normalization always applies. Deserialization
/// goes through the same constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawGraphFilter")]
pub struct GraphFilter {
    /// Case-insensitive substring of the node `name` property
    name: Option<String>,
    /// Exact match against any one node label
    label: Option<String>,
    /// Exact match against the relation type
    relation_type: Option<String>,
}

/// Wire form of [`GraphFilter`], before normalization
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGraphFilter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    relation_type: Option<String>,
}

impl From<RawGraphFilter> for GraphFilter {
    fn from(raw: RawGraphFilter) -> Self {
        Self::new(raw.name, raw.label, raw.relation_type)
    }
}

fn normalize(criterion: Option<String>) -> Option<String> {
    criterion
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

impl GraphFilter {
    pub fn new(name: Option<String>, label: Option<String>, relation_type: Option<String>) -> Self {
        Self {
            name: normalize(name),
            label: normalize(label),
            relation_type: normalize(relation_type),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = normalize(Some(name.into()));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = normalize(Some(label.into()));
        self
    }

    pub fn with_relation_type(mut self, relation_type: impl Into<String>) -> Self {
        self.relation_type = normalize(Some(relation_type.into()));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn relation_type(&self) -> Option<&str> {
        self.relation_type.as_deref()
    }

    /// True when a name or label criterion is present
    pub fn has_node_criteria(&self) -> bool {
        self.name.is_some() || self.label.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_node_criteria() && self.relation_type.is_none()
    }

    /// Node-side predicate, matching what the store-side listing applies
    pub fn matches_node(&self, node: &crate::models::Node) -> bool {
        let name_ok = match &self.name {
            Some(needle) => node
                .name_text()
                .map(|name| name.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            None => true,
        };
        let label_ok = match &self.label {
            Some(label) => node.has_label(label),
            None => true,
        };
        name_ok && label_ok
    }

    pub fn matches_relation(&self, relation: &crate::models::Relation) -> bool {
        self.relation_type
            .as_deref()
            .map_or(true, |t| relation.relation_type == t)
    }
}

/// Offset/limit pagination applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    /// `None` returns every remaining row
    pub limit: Option<u64>,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 10;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }

    /// Every row, no offset
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: None,
        }
    }

    /// Apply the page to an already-filtered iterator
    pub fn apply<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let to_usize = |n: u64| usize::try_from(n).unwrap_or(usize::MAX);
        let skipped = items.skip(to_usize(self.skip));
        match self.limit {
            Some(limit) => skipped.take(to_usize(limit)).collect(),
            None => skipped.collect(),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, Properties, Relation};
    use serde_json::{json, Value};

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    fn named(label: &str, name: Value) -> Node {
        Node::new(vec![label.to_string()], props(json!({ "name": name })))
    }

    #[test]
    fn test_blank_criteria_are_absent() {
        let filter = GraphFilter::new(Some("   ".into()), Some(String::new()), None);
        assert!(filter.is_empty());
        assert!(!filter.has_node_criteria());
    }

    #[test]
    fn test_criteria_are_trimmed() {
        let filter = GraphFilter::default()
            .with_label(" Person ")
            .with_relation_type("LIVES_IN\n");
        assert_eq!(filter.label(), Some("Person"));
        assert_eq!(filter.relation_type(), Some("LIVES_IN"));
    }

    #[test]
    fn test_name_match_is_case_insensitive_substring() {
        let node = named("Person", json!("Alpha Centauri"));
        let partial = GraphFilter::default().with_name("centaur");
        let upper = GraphFilter::default().with_name("ALPHA");
        let other = GraphFilter::default().with_name("beta");
        assert!(partial.matches_node(&node));
        assert!(upper.matches_node(&node));
        assert!(!other.matches_node(&node));
    }

    #[test]
    fn test_deserialized_criteria_are_normalized() {
        let raw = json!({"name": "   ", "label": ""});
        let blank: GraphFilter = serde_json::from_value(raw).unwrap();
        assert!(blank.is_empty());
        assert_eq!(blank, GraphFilter::default());

        let raw = json!({"label": " Person ", "relationType": "KNOWS\t"});
        let padded: GraphFilter = serde_json::from_value(raw).unwrap();
        assert_eq!(padded.name(), None);
        assert_eq!(padded.label(), Some("Person"));
        assert_eq!(padded.relation_type(), Some("KNOWS"));
    }

    #[test]
    fn test_name_match_covers_scalar_names() {
        let filter = GraphFilter::default().with_name("198");
        assert!(filter.matches_node(&named("Book", json!(1984))));
        assert!(!filter.matches_node(&named("List", json!(["198"]))));

        let flag = named("Flag", json!(true));
        assert!(GraphFilter::default().with_name("TRU").matches_node(&flag));
    }

    #[test]
    fn test_name_filter_excludes_nameless_nodes() {
        let node = Node::new(vec!["City".into()], Properties::new());
        assert!(!GraphFilter::default().with_name("a").matches_node(&node));
        assert!(GraphFilter::default().matches_node(&node));
    }

    #[test]
    fn test_name_and_label_combine_with_and() {
        let node = named("Person", json!("alpha"));
        let filter = GraphFilter::default().with_name("alp").with_label("City");
        assert!(!filter.matches_node(&node));
    }

    #[test]
    fn test_relation_type_is_exact() {
        let relation = Relation::new("LIVES_IN", "a", "b", Properties::new());
        let exact = GraphFilter::default().with_relation_type("LIVES_IN");
        let prefix = GraphFilter::default().with_relation_type("LIVES");
        assert!(exact.matches_relation(&relation));
        assert!(!prefix.matches_relation(&relation));
    }

    #[test]
    fn test_page_apply() {
        let items = 0..25;
        let last = Page::new(20, 10).apply(items.clone());
        assert_eq!(last, vec![20, 21, 22, 23, 24]);
        assert_eq!(Page::all().apply(items.clone()).len(), 25);
        assert_eq!(Page::default().apply(items).len(), 10);
    }
}
