//! GraphStore Trait - Query Primitive
//!
//! The store engine is reached through exactly one operation:
//! `run_query(template, parameters) -> records`. Everything above it (typed
//! CRUD, projections, filtering) is written against this trait, so a real
//! Neo4j connection, a recording double or any other engine speaking Cypher
//! can be substituted without touching business logic.
//!
//! # Parameter binding
//!
//! Values (ids, property maps, filters, skip/limit) are always carried in
//! [`CypherQuery::params`] and referenced as `$name` in the text. The only
//! strings spliced into the text are [`Identifier`](super::Identifier)s.

use super::DatabaseError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

/// Query text plus bound parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CypherQuery {
    #[serde(rename = "statement")]
    pub text: String,
    #[serde(rename = "parameters")]
    pub params: Map<String, Value>,
}

impl CypherQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Map::new(),
        }
    }

    /// Bind `value` to `$name`
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }
}

/// One result row: column name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Map<String, Value>,
}

impl Record {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Build a record by zipping column names with one row of values
    pub fn from_row(columns: &[String], row: Vec<Value>) -> Result<Self, DatabaseError> {
        if columns.len() != row.len() {
            let message = format!("row has {} values for {} columns", row.len(), columns.len());
            return Err(DatabaseError::decode(message));
        }
        Ok(Self {
            columns: columns.iter().cloned().zip(row).collect(),
        })
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn get_str(&self, column: &str) -> Result<&str, DatabaseError> {
        self.get(column)
            .and_then(Value::as_str)
            .ok_or_else(|| column_error(column, "is not a string"))
    }

    pub fn get_string_list(&self, column: &str) -> Result<Vec<String>, DatabaseError> {
        let values = self
            .get(column)
            .and_then(Value::as_array)
            .ok_or_else(|| column_error(column, "is not a list"))?;
        values
            .iter()
            .map(|v| {
                v.as_str()
                    .map(String::from)
                    .ok_or_else(|| column_error(column, "holds a non-string entry"))
            })
            .collect()
    }

    /// Object-valued column; a null column decodes as an empty map
    pub fn get_object(&self, column: &str) -> Result<Map<String, Value>, DatabaseError> {
        match self.get(column) {
            Some(Value::Object(map)) => Ok(map.clone()),
            Some(Value::Null) | None => Ok(Map::new()),
            Some(_) => Err(column_error(column, "is not an object")),
        }
    }
}

fn column_error(column: &str, problem: &str) -> DatabaseError {
    DatabaseError::decode(format!("column '{}' {}", column, problem))
}

/// Abstraction over a Cypher-speaking graph store
///
/// Implementations must be `Send + Sync`; each call is an independent round
/// trip with no transaction spanning calls.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Execute one statement and collect every result row
    async fn run_query(&self, query: CypherQuery) -> Result<Vec<Record>, DatabaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_serializes_as_statement() {
        let query = CypherQuery::new("MATCH (n {id: $id}) RETURN n").param("id", "n1");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"statement": "MATCH (n {id: $id}) RETURN n", "parameters": {"id": "n1"}})
        );
        assert!(query.has_param("id"));
    }

    #[test]
    fn test_record_from_row() {
        let columns = ["id", "labels", "properties"].map(String::from);
        let row = vec![json!("n1"), json!(["A", "B"]), json!({"x": 1})];
        let record = Record::from_row(&columns, row).unwrap();

        assert_eq!(record.get_str("id").unwrap(), "n1");
        assert_eq!(record.get_string_list("labels").unwrap(), vec!["A", "B"]);
        assert_eq!(record.get_object("properties").unwrap()["x"], 1);
    }

    #[test]
    fn test_record_from_row_length_mismatch() {
        let columns = vec!["id".to_string()];
        assert!(matches!(
            Record::from_row(&columns, vec![]),
            Err(DatabaseError::Decode(_))
        ));
    }

    #[test]
    fn test_record_typed_accessor_errors() {
        let columns = json!({"id": 7, "labels": ["A", 1]});
        let record = Record::new(columns.as_object().cloned().unwrap());
        assert!(record.get_str("id").is_err());
        assert!(record.get_string_list("labels").is_err());
        assert!(record.get_object("missing").unwrap().is_empty());
    }
}
