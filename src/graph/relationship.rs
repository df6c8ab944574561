//! Relationship implementation
//!
//! Directed, typed, attributed. Several relationships may connect the same
//! pair, including exact duplicates.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EntityId, RelationshipType};
use serde::{Deserialize, Serialize};

/// A directed relationship between two entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source entity (relationship goes FROM this entity)
    pub source: EntityId,

    /// Target entity (relationship goes TO this entity)
    pub target: EntityId,

    /// Type of relationship (e.g., "WORKS_AT", "INVESTS_IN")
    #[serde(rename = "type")]
    pub rel_type: RelationshipType,

    /// Attributes associated with this relationship
    #[serde(default)]
    pub attributes: PropertyMap,
}

impl Relationship {
    /// Create a new directed relationship
    pub fn new(
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        rel_type: impl Into<RelationshipType>,
    ) -> Self {
        Relationship {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
            attributes: PropertyMap::new(),
        }
    }

    /// Create a new relationship with attributes
    pub fn new_with_attributes(
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        rel_type: impl Into<RelationshipType>,
        attributes: PropertyMap,
    ) -> Self {
        Relationship {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
            attributes,
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    /// Check if this relationship touches the given entity
    pub fn connects(&self, id: &EntityId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint
    pub fn other_endpoint(&self, id: &EntityId) -> Option<&EntityId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Check if this is a self-loop
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
