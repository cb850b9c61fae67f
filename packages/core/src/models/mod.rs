//! Data Models
//!
//! This module contains the data structures shared by every GraphDesk layer:
//!
//! - `Node` / `Relation` - graph entities with free-form property bags
//! - `GraphFilter` / `Page` - listing criteria and pagination
//! - `GraphDocument` / `ImportSummary` - bulk transfer framing

mod document;
mod filter;
mod node;
mod relation;

pub use document::{GraphDocument, ImportSummary, RawGraphDocument};
pub use filter::{GraphFilter, Page};
pub use node::{Node, NodeUpdate, Properties, ID_PROPERTY, NAME_PROPERTY};
pub use relation::{Relation, RelationUpdate};
