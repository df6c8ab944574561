//! In-memory entity graph storage
//!
//! The store has two phases. While loading it is append-only; `freeze`
//! ends loading, after which every mutation fails with
//! [`GraphError::StoreFrozen`] and the adjacency index is built exactly once.

use super::entity::Entity;
use super::property::PropertyMap;
use super::relationship::Relationship;
use super::types::{EntityId, EntityKind, RelationshipType};
use crate::index::AdjacencyIndex;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("Unknown entity {0}: relationship endpoint does not exist")]
    UnknownEntity(EntityId),

    #[error("Graph store is frozen; no further mutation is allowed")]
    StoreFrozen,

    #[error("Graph store is still loading; freeze it before building the adjacency index")]
    NotFrozen,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Entity and relationship counts for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub entity_count: usize,
    pub relationship_count: usize,
    pub entities_by_kind: BTreeMap<EntityKind, usize>,
    pub relationships_by_type: BTreeMap<String, usize>,
    /// Entities with no incident relationship
    pub isolated_entities: usize,
}

/// In-memory graph storage
///
/// - entities: EntityId -> Entity, in insertion order
/// - relationships: append-only list
/// - incident: entity position -> relationship positions (both directions)
/// - kind_index: EntityKind -> entity positions
#[derive(Debug, Default)]
pub struct GraphStore {
    entities: IndexMap<EntityId, Entity, FxBuildHasher>,

    relationships: Vec<Relationship>,

    /// Relationships touching each entity, by entity position
    incident: Vec<Vec<usize>>,

    /// Kind index for fast filtered iteration
    kind_index: FxHashMap<EntityKind, Vec<usize>>,

    frozen: bool,

    adjacency: OnceLock<AdjacencyIndex>,
}

impl GraphStore {
    /// Create a new empty store in the loading phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity
    ///
    /// Fails with `DuplicateEntity` when the id is taken and with
    /// `StoreFrozen` after `freeze`.
    pub fn add_entity(
        &mut self,
        id: impl Into<EntityId>,
        kind: EntityKind,
        attributes: PropertyMap,
    ) -> GraphResult<()> {
        if self.frozen {
            return Err(GraphError::StoreFrozen);
        }
        let id = id.into();
        if self.entities.contains_key(&id) {
            return Err(GraphError::DuplicateEntity(id));
        }

        let position = self.entities.len();
        self.kind_index.entry(kind).or_default().push(position);
        self.incident.push(Vec::new());
        self.entities
            .insert(id.clone(), Entity::new_with_attributes(id, kind, attributes));
        Ok(())
    }

    /// Add a directed relationship
    ///
    /// Both endpoints must already exist. Parallel and duplicate
    /// relationships are kept as distinct records.
    pub fn add_relationship(
        &mut self,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        rel_type: impl Into<RelationshipType>,
        attributes: PropertyMap,
    ) -> GraphResult<()> {
        if self.frozen {
            return Err(GraphError::StoreFrozen);
        }
        let source = source.into();
        let target = target.into();

        let source_pos = self
            .entities
            .get_index_of(&source)
            .ok_or_else(|| GraphError::UnknownEntity(source.clone()))?;
        let target_pos = self
            .entities
            .get_index_of(&target)
            .ok_or_else(|| GraphError::UnknownEntity(target.clone()))?;

        let rel_pos = self.relationships.len();
        self.incident[source_pos].push(rel_pos);
        if target_pos != source_pos {
            self.incident[target_pos].push(rel_pos);
        }
        self.relationships.push(Relationship::new_with_attributes(
            source, target, rel_type, attributes,
        ));
        Ok(())
    }

    /// End the loading phase and build the adjacency index
    ///
    /// Freezing an already frozen store does nothing.
    pub fn freeze(&mut self) {
        if self.frozen {
            return;
        }
        self.frozen = true;
        info!(
            "Froze graph store: {} entities, {} relationships",
            self.entities.len(),
            self.relationships.len()
        );
        let this: &Self = self;
        this.adjacency.get_or_init(|| AdjacencyIndex::build(this));
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The adjacency index of the frozen store
    pub fn adjacency(&self) -> GraphResult<&AdjacencyIndex> {
        if !self.frozen {
            return Err(GraphError::NotFrozen);
        }
        Ok(self.adjacency.get_or_init(|| AdjacencyIndex::build(self)))
    }

    /// Get an entity by id
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Check if an entity exists
    pub fn has_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Insertion position of an entity
    pub fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.entities.get_index_of(id)
    }

    /// All entities, in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Entities of one kind, in insertion order
    pub fn entities_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> + '_ {
        self.kind_index
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(move |&pos| self.entities.get_index(pos).map(|(_, entity)| entity))
    }

    /// All relationships, in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships with `id` as source or target
    ///
    /// Empty for unknown ids. A self-loop is yielded once.
    pub fn relationships_of(&self, id: &EntityId) -> impl Iterator<Item = &Relationship> + '_ {
        self.entities
            .get_index_of(id)
            .map(|pos| self.incident[pos].as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&rel_pos| &self.relationships[rel_pos])
    }

    /// Get total number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get total number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Number of entities of one kind
    pub fn count_by_kind(&self, kind: EntityKind) -> usize {
        self.kind_index.get(&kind).map_or(0, Vec::len)
    }

    /// Counts per kind and per relationship type
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            entity_count: self.entities.len(),
            relationship_count: self.relationships.len(),
            ..Default::default()
        };
        for (kind, positions) in &self.kind_index {
            stats.entities_by_kind.insert(*kind, positions.len());
        }
        for rel in &self.relationships {
            *stats
                .relationships_by_type
                .entry(rel.rel_type.as_str().to_string())
                .or_default() += 1;
        }
        stats.isolated_entities = self.incident.iter().filter(|rels| rels.is_empty()).count();
        stats
    }

    /// Text description of the graph shape
    ///
    /// Lists each kind with the attribute keys observed on its entities, then
    /// each `(source kind)-[:TYPE]->(target kind)` shape observed among the
    /// relationships. Used as the schema context for question translation.
    pub fn schema_summary(&self) -> String {
        let mut keys_by_kind: BTreeMap<EntityKind, BTreeSet<&str>> = BTreeMap::new();
        for entity in self.entities.values() {
            keys_by_kind
                .entry(entity.kind)
                .or_default()
                .extend(entity.attributes.keys().map(String::as_str));
        }

        let mut shapes: BTreeSet<(EntityKind, &str, EntityKind)> = BTreeSet::new();
        for rel in &self.relationships {
            if let (Some(source), Some(target)) =
                (self.entities.get(&rel.source), self.entities.get(&rel.target))
            {
                shapes.insert((source.kind, rel.rel_type.as_str(), target.kind));
            }
        }

        let mut summary = String::from("Node Labels and Properties:\n");
        for (kind, keys) in &keys_by_kind {
            let keys: Vec<&str> = keys.iter().copied().collect();
            let _ = writeln!(summary, "- {}: {}", kind, keys.join(", "));
        }
        summary.push_str("\nRelationship Types:\n");
        for (source, rel_type, target) in &shapes {
            let _ = writeln!(summary, "- ({})-[:{}]->({})", source, rel_type, target);
        }
        debug!("Generated schema summary ({} bytes)", summary.len());
        summary
    }
}
