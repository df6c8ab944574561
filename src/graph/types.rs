//! Core type definitions for the entity graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Unique identifier for an entity
///
/// Backed by a shared string so that the adjacency index and the result
/// records can hold ids without copying the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(Arc<str>);

impl EntityId {
    pub fn new(id: impl AsRef<str>) -> Self {
        EntityId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(Arc::from(s))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(Arc::from(s))
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Entity type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Organization,
    Person,
    Fund,
    Technology,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Organization,
        EntityKind::Person,
        EntityKind::Fund,
        EntityKind::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organization => "Organization",
            EntityKind::Person => "Person",
            EntityKind::Fund => "Fund",
            EntityKind::Technology => "Technology",
        }
    }

    /// Map an upstream type tag to a kind.
    ///
    /// Accepts the canonical names and the ecosystem dataset's tags
    /// (`startup`, `founder`, `vc`), case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "organization" | "startup" | "company" => Some(EntityKind::Organization),
            "person" | "founder" => Some(EntityKind::Person),
            "fund" | "vc" => Some(EntityKind::Fund),
            "technology" => Some(EntityKind::Technology),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship type (e.g., "WORKS_AT", "INVESTS_IN")
///
/// The three ecosystem relationships are named variants; any other tag is
/// carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    WorksAt,
    InvestsIn,
    UsesTechnology,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::WorksAt => "WORKS_AT",
            RelationshipType::InvestsIn => "INVESTS_IN",
            RelationshipType::UsesTechnology => "USES_TECHNOLOGY",
            RelationshipType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for RelationshipType {
    fn from(s: &str) -> Self {
        match s {
            "WORKS_AT" => RelationshipType::WorksAt,
            "INVESTS_IN" => RelationshipType::InvestsIn,
            "USES_TECHNOLOGY" => RelationshipType::UsesTechnology,
            other => RelationshipType::Other(other.to_string()),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        match RelationshipType::from(s.as_str()) {
            RelationshipType::Other(_) => RelationshipType::Other(s),
            known => known,
        }
    }
}

impl From<RelationshipType> for String {
    fn from(rel: RelationshipType) -> Self {
        match rel {
            RelationshipType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}
