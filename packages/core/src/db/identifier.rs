//! Safe identifiers for query text
//!
//! Cypher cannot bind labels or relationship types as parameters, so they
//! end up spliced into the statement. `Identifier` is the only type the
//! query builders accept in those positions, and it can only be obtained by
//! passing the allow-list check below.

use super::DatabaseError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// Neo4j's own upper bound for label and type names
const MAX_IDENTIFIER_LEN: usize = 255;

/// A label or relationship type that passed the allow-list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Validate `raw` for literal embedding
    ///
    /// # Examples
    ///
    /// ```
    /// # use graphdesk_core::db::Identifier;
    /// assert!(Identifier::parse("LIVES_IN").is_ok());
    /// assert!(Identifier::parse("BAD TYPE").is_err());
    /// assert!(Identifier::parse("x`) DETACH DELETE n //").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, DatabaseError> {
        static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = IDENTIFIER_REGEX.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).unwrap());

        if raw.len() > MAX_IDENTIFIER_LEN || !regex.is_match(raw) {
            return Err(DatabaseError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Validate every entry, failing on the first rejected one
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, DatabaseError> {
        raw.iter().map(|s| Self::parse(s.as_ref())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
