//! Entity implementation
//!
//! An entity is an immutable typed vertex: id, kind and an open attribute map.

use super::property::{PropertyMap, PropertyValue};
use super::types::{EntityId, EntityKind};
use serde::{Deserialize, Serialize};

/// Attribute holding an entity's display name
pub const NAME_ATTRIBUTE: &str = "name";

/// A typed entity in the graph
///
/// Entities have:
/// - A globally unique ID
/// - Exactly one kind
/// - Attributes (key-value pairs, no required keys)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity
    pub id: EntityId,

    /// Kind of entity
    pub kind: EntityKind,

    /// Attributes associated with this entity
    pub attributes: PropertyMap,
}

impl Entity {
    /// Create a new entity without attributes
    pub fn new(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        Entity {
            id: id.into(),
            kind,
            attributes: PropertyMap::new(),
        }
    }

    /// Create a new entity with attributes
    pub fn new_with_attributes(
        id: impl Into<EntityId>,
        kind: EntityKind,
        attributes: PropertyMap,
    ) -> Self {
        Entity {
            id: id.into(),
            kind,
            attributes,
        }
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key)
    }

    /// Get an attribute value that is present and not null
    pub fn comparable_attribute(&self, key: &str) -> Option<&PropertyValue> {
        self.attributes.get(key).and_then(PropertyValue::non_null)
    }

    /// Check if attribute exists (null values count as present)
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Display name, if the entity has a string `name` attribute
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get(NAME_ATTRIBUTE)
            .and_then(PropertyValue::as_string)
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or_else(|| self.id.as_str())
    }

    /// Get number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl std::hash::Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
