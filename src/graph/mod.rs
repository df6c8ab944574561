//! Entity/relationship store
//!
//! This module implements the typed entity graph:
//! - Entities with one kind and an open attribute map
//! - Directed, typed relationships (multi-edges allowed)
//! - Append-only loading followed by an immutable frozen phase

pub mod entity;
pub mod property;
pub mod relationship;
pub mod store;
pub mod types;

// Re-export main types
pub use entity::{Entity, NAME_ATTRIBUTE};
pub use property::{PropertyMap, PropertyValue};
pub use relationship::Relationship;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EntityId, EntityKind, RelationshipType};
