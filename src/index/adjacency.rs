//! Neighbor-typed adjacency index
//!
//! One pass over the relationships of a frozen store records each endpoint
//! as a neighbor of the other, partitioned by the neighbor's entity kind.
//! Direction and relationship type are ignored for the main partition; a
//! second partition keyed by relationship type is filled in the same pass.

use crate::graph::{Entity, EntityId, EntityKind, GraphStore, RelationshipType};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

/// Set of neighboring entity ids
pub type NeighborSet = FxHashSet<EntityId>;

#[derive(Debug, Default)]
struct Neighborhood {
    by_kind: FxHashMap<EntityKind, NeighborSet>,
    by_relationship: FxHashMap<RelationshipType, FxHashMap<EntityKind, NeighborSet>>,
}

impl Neighborhood {
    fn record(&mut self, rel_type: &RelationshipType, neighbor: &Entity) {
        self.by_kind
            .entry(neighbor.kind)
            .or_default()
            .insert(neighbor.id.clone());
        self.by_relationship
            .entry(rel_type.clone())
            .or_default()
            .entry(neighbor.kind)
            .or_default()
            .insert(neighbor.id.clone());
    }
}

/// Read-only mapping `EntityId -> (neighbor kind -> set of EntityId)`
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    entries: FxHashMap<EntityId, Neighborhood>,
    empty: NeighborSet,
}

impl AdjacencyIndex {
    /// Build the index from every relationship in the store. O(R).
    pub fn build(store: &GraphStore) -> Self {
        let mut entries: FxHashMap<EntityId, Neighborhood> = FxHashMap::default();

        for rel in store.relationships() {
            // Endpoints are validated on insert; a miss here means the record
            // came from elsewhere and has no kind to partition by.
            let (Some(source), Some(target)) =
                (store.get_entity(&rel.source), store.get_entity(&rel.target))
            else {
                continue;
            };
            entries
                .entry(source.id.clone())
                .or_default()
                .record(&rel.rel_type, target);
            entries
                .entry(target.id.clone())
                .or_default()
                .record(&rel.rel_type, source);
        }

        info!(
            "Built adjacency index: {} of {} entities have neighbors ({} relationships)",
            entries.len(),
            store.entity_count(),
            store.relationship_count()
        );

        Self {
            entries,
            empty: NeighborSet::default(),
        }
    }

    /// Neighbors of `id` whose kind is `kind`, over any relationship in
    /// either direction
    ///
    /// Returns the empty set when there are none or when `id` is unknown.
    pub fn neighbors_of_type(&self, id: &EntityId, kind: EntityKind) -> &NeighborSet {
        self.entries
            .get(id)
            .and_then(|hood| hood.by_kind.get(&kind))
            .unwrap_or(&self.empty)
    }

    /// Neighbors of `id` of `kind` reached through a `rel_type` relationship
    pub fn neighbors_via(
        &self,
        id: &EntityId,
        rel_type: &RelationshipType,
        kind: EntityKind,
    ) -> &NeighborSet {
        self.entries
            .get(id)
            .and_then(|hood| hood.by_relationship.get(rel_type))
            .and_then(|by_kind| by_kind.get(&kind))
            .unwrap_or(&self.empty)
    }

    /// Number of distinct neighbors of `id`
    pub fn degree(&self, id: &EntityId) -> usize {
        // Every entity has exactly one kind, so the partitions are disjoint.
        self.entries
            .get(id)
            .map_or(0, |hood| hood.by_kind.values().map(|set| set.len()).sum())
    }

    /// Number of entities with at least one neighbor
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
