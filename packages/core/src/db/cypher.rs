//! Cypher statement templates
//!
//! Every statement GraphDesk issues is built here. Labels and relationship
//! types only enter the text as [`Identifier`]s; all other values are bound.
//!
//! Projections are flattened to scalar columns (`id`, `labels`, `type`,
//! `startNode`, `endNode`, `properties`) so that any transport returning
//! plain JSON rows can serve them.

use super::{CypherQuery, Identifier};
use crate::models::{GraphFilter, Page, Properties};

pub const NODE_COLUMNS: &str = "n.id AS id, labels(n) AS labels, properties(n) AS properties";

pub const RELATION_COLUMNS: &str =
    "r.id AS id, type(r) AS type, a.id AS startNode, b.id AS endNode, properties(r) AS properties";

/// Case-insensitive substring match on `n.name`
///
/// Scalar names are compared through their string form; lists and maps
/// never match.
const NAME_CONDITION: &str =
    "n.name IS NOT NULL AND toLower(toStringOrNull(n.name)) CONTAINS toLower($name_filter)";

const LABEL_CONDITION: &str = "ANY(label IN labels(n) WHERE label = $label_filter)";

fn page_clause(query: CypherQuery, text: &mut String, page: Page) -> CypherQuery {
    text.push_str(" SKIP $skip");
    let mut query = query.param("skip", page.skip);
    if let Some(limit) = page.limit {
        text.push_str(" LIMIT $limit");
        query = query.param("limit", limit);
    }
    query
}

pub fn create_node(labels: &[Identifier], properties: Properties) -> CypherQuery {
    let label_text: String = labels.iter().map(|l| format!(":{}", l)).collect();
    let text = format!("CREATE (n{label_text} $properties) RETURN {NODE_COLUMNS}");
    CypherQuery::new(text).param("properties", properties)
}

pub fn get_node(id: &str) -> CypherQuery {
    let text = format!("MATCH (n {{id: $id}}) RETURN {NODE_COLUMNS}");
    CypherQuery::new(text).param("id", id)
}

pub fn update_node(id: &str, delta: Properties) -> CypherQuery {
    let text = format!("MATCH (n {{id: $id}}) SET n += $properties RETURN {NODE_COLUMNS}");
    CypherQuery::new(text)
        .param("id", id)
        .param("properties", delta)
}

pub fn delete_node(id: &str) -> CypherQuery {
    CypherQuery::new("MATCH (n {id: $id}) DETACH DELETE n").param("id", id)
}

pub fn delete_all_nodes() -> CypherQuery {
    CypherQuery::new("MATCH (n) DETACH DELETE n")
}

/// Node listing; name and label criteria combine with AND
pub fn list_nodes(filter: &GraphFilter, page: Page) -> CypherQuery {
    let mut text = String::from("MATCH (n)");
    let mut query = CypherQuery::new("");
    let mut conditions = Vec::new();

    if let Some(name) = filter.name() {
        conditions.push(NAME_CONDITION);
        query = query.param("name_filter", name);
    }
    if let Some(label) = filter.label() {
        conditions.push(LABEL_CONDITION);
        query = query.param("label_filter", label);
    }
    if !conditions.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(&conditions.join(" AND "));
    }

    text.push_str(" RETURN ");
    text.push_str(NODE_COLUMNS);
    let mut query = page_clause(query, &mut text, page);
    query.text = text;
    query
}

/// Relation creation; matches both endpoints first, so a missing endpoint
/// yields zero rows rather than an error
pub fn create_relation(
    relation_type: &Identifier,
    start_node: &str,
    end_node: &str,
    properties: Properties,
) -> CypherQuery {
    let text = format!(
        "MATCH (a {{id: $startNode}}), (b {{id: $endNode}}) \
         CREATE (a)-[r:{relation_type} $properties]->(b) RETURN {RELATION_COLUMNS}"
    );
    CypherQuery::new(text)
        .param("startNode", start_node)
        .param("endNode", end_node)
        .param("properties", properties)
}

pub fn get_relation(id: &str) -> CypherQuery {
    let text = format!("MATCH (a)-[r {{id: $id}}]->(b) RETURN {RELATION_COLUMNS}");
    CypherQuery::new(text).param("id", id)
}

pub fn update_relation(id: &str, delta: Properties) -> CypherQuery {
    let text = format!(
        "MATCH (a)-[r {{id: $id}}]->(b) \
         SET r += $properties RETURN {RELATION_COLUMNS}"
    );
    CypherQuery::new(text)
        .param("id", id)
        .param("properties", delta)
}

pub fn delete_relation(id: &str) -> CypherQuery {
    CypherQuery::new("MATCH ()-[r {id: $id}]->() DELETE r").param("id", id)
}

pub fn list_relations(filter: &GraphFilter, page: Page) -> CypherQuery {
    let mut text = String::from("MATCH (a)-[r]->(b)");
    let mut query = CypherQuery::new("");

    if let Some(relation_type) = filter.relation_type() {
        text.push_str(" WHERE type(r) = $type_filter");
        query = query.param("type_filter", relation_type);
    }

    text.push_str(" RETURN ");
    text.push_str(RELATION_COLUMNS);
    let mut query = page_clause(query, &mut text, page);
    query.text = text;
    query
}

pub fn list_labels() -> CypherQuery {
    CypherQuery::new("CALL db.labels() YIELD label RETURN label")
}

pub fn list_relationship_types() -> CypherQuery {
    CypherQuery::new("CALL db.relationshipTypes() YIELD relationshipType RETURN relationshipType")
}

pub fn ping() -> CypherQuery {
    CypherQuery::new("RETURN 1 AS ok")
}
