//! Resemblance scorers
//!
//! A scorer first extracts a per-entity *basis* (the neighbor set or the
//! attribute vector it compares) and then compares two bases. Extracting
//! the basis once per entity keeps target-vs-all linear in the candidates.
//! An entity whose basis is empty has no basis for comparison.

use crate::graph::{Entity, EntityKind, PropertyValue, RelationshipType};
use crate::index::{AdjacencyIndex, NeighborSet};
use ecograph_scoring::{attribute_match, jaccard};
use serde::Serialize;

/// Attribute keys compared between two people unless configured otherwise
pub const DEFAULT_PERSON_KEYS: [&str; 3] = ["university", "domain_expertise", "technical_background"];

/// Why two entities received their score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum Evidence {
    SharedNeighbors {
        neighbor_kind: EntityKind,
        shared: usize,
        union: usize,
    },
    MatchingAttributes {
        matched_keys: Vec<String>,
        compared: usize,
    },
}

/// Score in `[0, 1]` plus its evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub score: f64,
    pub evidence: Evidence,
}

/// A similarity strategy over one entity kind
///
/// `compare` must be symmetric and bounded in `[0, 1]`.
pub trait Resemblance: Sync {
    type Basis<'a>: Send + Sync
    where
        Self: 'a;

    fn basis<'a>(&'a self, index: &'a AdjacencyIndex, entity: &'a Entity) -> Self::Basis<'a>;

    /// `false` when the basis gives nothing to compare against
    fn has_basis(basis: &Self::Basis<'_>) -> bool;

    fn compare(&self, a: &Self::Basis<'_>, b: &Self::Basis<'_>) -> Comparison;
}

/// Jaccard index over neighbors of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct SetOverlapScorer {
    pub neighbor_kind: EntityKind,
    /// Only count neighbors reached through this relationship type
    pub via: Option<RelationshipType>,
}

impl SetOverlapScorer {
    pub fn new(neighbor_kind: EntityKind) -> Self {
        Self {
            neighbor_kind,
            via: None,
        }
    }

    pub fn via(neighbor_kind: EntityKind, rel_type: RelationshipType) -> Self {
        Self {
            neighbor_kind,
            via: Some(rel_type),
        }
    }
}

impl Resemblance for SetOverlapScorer {
    type Basis<'a> = &'a NeighborSet;

    fn basis<'a>(&'a self, index: &'a AdjacencyIndex, entity: &'a Entity) -> Self::Basis<'a> {
        match &self.via {
            Some(rel_type) => index.neighbors_via(&entity.id, rel_type, self.neighbor_kind),
            None => index.neighbors_of_type(&entity.id, self.neighbor_kind),
        }
    }

    fn has_basis(basis: &Self::Basis<'_>) -> bool {
        !basis.is_empty()
    }

    fn compare(&self, a: &Self::Basis<'_>, b: &Self::Basis<'_>) -> Comparison {
        let overlap = jaccard(*a, *b);
        Comparison {
            score: overlap.score,
            evidence: Evidence::SharedNeighbors {
                neighbor_kind: self.neighbor_kind,
                shared: overlap.shared,
                union: overlap.union,
            },
        }
    }
}

/// Exact-match ratio over a fixed list of attribute keys
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMatchScorer {
    pub keys: Vec<String>,
}

impl AttributeMatchScorer {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for AttributeMatchScorer {
    fn default() -> Self {
        Self::new(DEFAULT_PERSON_KEYS)
    }
}

impl Resemblance for AttributeMatchScorer {
    /// One slot per configured key; `None` for absent or null values
    type Basis<'a> = Vec<Option<&'a PropertyValue>>;

    fn basis<'a>(&'a self, _index: &'a AdjacencyIndex, entity: &'a Entity) -> Self::Basis<'a> {
        self.keys
            .iter()
            .map(|key| entity.comparable_attribute(key))
            .collect()
    }

    fn has_basis(basis: &Self::Basis<'_>) -> bool {
        basis.iter().any(Option::is_some)
    }

    fn compare(&self, a: &Self::Basis<'_>, b: &Self::Basis<'_>) -> Comparison {
        let result = attribute_match(
            self.keys
                .iter()
                .zip(a.iter().zip(b.iter()))
                .map(|(key, (left, right))| (key, *left, *right)),
        );
        Comparison {
            score: result.score,
            evidence: Evidence::MatchingAttributes {
                matched_keys: result.matched.into_iter().cloned().collect(),
                compared: result.compared,
            },
        }
    }
}

/// Registered similarity strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Scorer {
    SetOverlap(SetOverlapScorer),
    AttributeMatch(AttributeMatchScorer),
}

impl Scorer {
    pub fn name(&self) -> &'static str {
        match self {
            Scorer::SetOverlap(_) => "set-overlap",
            Scorer::AttributeMatch(_) => "attribute-match",
        }
    }

    /// Score two entities directly
    pub fn compare_entities(&self, index: &AdjacencyIndex, a: &Entity, b: &Entity) -> Comparison {
        match self {
            Scorer::SetOverlap(s) => s.compare(&s.basis(index, a), &s.basis(index, b)),
            Scorer::AttributeMatch(s) => s.compare(&s.basis(index, a), &s.basis(index, b)),
        }
    }
}

impl From<SetOverlapScorer> for Scorer {
    fn from(scorer: SetOverlapScorer) -> Self {
        Scorer::SetOverlap(scorer)
    }
}

impl From<AttributeMatchScorer> for Scorer {
    fn from(scorer: AttributeMatchScorer) -> Self {
        Scorer::AttributeMatch(scorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EntityId, GraphStore, PropertyMap};

    fn person(store: &mut GraphStore, id: &str, attrs: &[(&str, PropertyValue)]) {
        let props: PropertyMap = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        store.add_entity(id, EntityKind::Person, props).unwrap();
    }

    fn org_store(techs: &[(&str, &[&str])]) -> GraphStore {
        let mut store = GraphStore::new();
        for t in ["t1", "t2", "t3", "t4"] {
            store.add_entity(t, EntityKind::Technology, PropertyMap::new()).unwrap();
        }
        for (org, uses) in techs {
            store.add_entity(*org, EntityKind::Organization, PropertyMap::new()).unwrap();
            for t in *uses {
                store.add_relationship(*org, *t, "USES_TECHNOLOGY", PropertyMap::new()).unwrap();
            }
        }
        store.freeze();
        store
    }

    fn entity<'a>(store: &'a GraphStore, id: &str) -> &'a Entity {
        store.get_entity(&EntityId::new(id)).unwrap()
    }

    #[test]
    fn test_set_overlap_identical() {
        let store = org_store(&[("a", &["t1", "t2"]), ("b", &["t1", "t2"])]);
        let index = store.adjacency().unwrap();
        let scorer = Scorer::from(SetOverlapScorer::new(EntityKind::Technology));
        let cmp = scorer.compare_entities(index, entity(&store, "a"), entity(&store, "b"));
        assert_eq!(cmp.score, 1.0);
        assert_eq!(
            cmp.evidence,
            Evidence::SharedNeighbors {
                neighbor_kind: EntityKind::Technology,
                shared: 2,
                union: 2
            }
        );
    }

    #[test]
    fn test_set_overlap_disjoint_and_empty() {
        let store = org_store(&[("a", &["t1"]), ("b", &["t2", "t3"]), ("c", &[]), ("d", &[])]);
        let index = store.adjacency().unwrap();
        let scorer = Scorer::from(SetOverlapScorer::new(EntityKind::Technology));

        let disjoint = scorer.compare_entities(index, entity(&store, "a"), entity(&store, "b"));
        assert_eq!(disjoint.score, 0.0);

        let one_empty = scorer.compare_entities(index, entity(&store, "a"), entity(&store, "c"));
        assert_eq!(one_empty.score, 0.0);

        let both_empty = scorer.compare_entities(index, entity(&store, "c"), entity(&store, "d"));
        assert_eq!(both_empty.score, 0.0);
        assert!(!both_empty.score.is_nan());
    }

    #[test]
    fn test_set_overlap_symmetric_and_bounded() {
        let store = org_store(&[
            ("a", &["t1", "t2", "t3"]),
            ("b", &["t2", "t3", "t4"]),
            ("c", &["t4"]),
        ]);
        let index = store.adjacency().unwrap();
        let scorer = Scorer::from(SetOverlapScorer::new(EntityKind::Technology));
        for x in ["a", "b", "c"] {
            for y in ["a", "b", "c"] {
                let xy = scorer.compare_entities(index, entity(&store, x), entity(&store, y));
                let yx = scorer.compare_entities(index, entity(&store, y), entity(&store, x));
                assert_eq!(xy.score, yx.score);
                assert!((0.0..=1.0).contains(&xy.score));
            }
        }
    }

    #[test]
    fn test_set_overlap_via_relationship() {
        let mut store = GraphStore::new();
        for id in ["v1", "v2"] {
            store.add_entity(id, EntityKind::Fund, PropertyMap::new()).unwrap();
        }
        for id in ["s1", "s2"] {
            store.add_entity(id, EntityKind::Organization, PropertyMap::new()).unwrap();
        }
        store.add_relationship("v1", "s1", "INVESTS_IN", PropertyMap::new()).unwrap();
        store.add_relationship("v2", "s1", "INVESTS_IN", PropertyMap::new()).unwrap();
        store.add_relationship("v2", "s2", "ADVISES", PropertyMap::new()).unwrap();
        store.freeze();
        let index = store.adjacency().unwrap();

        let via = Scorer::from(SetOverlapScorer::via(EntityKind::Organization, RelationshipType::InvestsIn));
        let any = Scorer::from(SetOverlapScorer::new(EntityKind::Organization));
        let (v1, v2) = (entity(&store, "v1"), entity(&store, "v2"));

        assert_eq!(via.compare_entities(index, v1, v2).score, 1.0);
        assert_eq!(any.compare_entities(index, v1, v2).score, 0.5);
    }

    #[test]
    fn test_attribute_match_scores() {
        let mut store = GraphStore::new();
        person(&mut store, "p1", &[
            ("university", "MIT".into()),
            ("domain_expertise", "AI".into()),
            ("technical_background", true.into()),
        ]);
        person(&mut store, "p2", &[
            ("university", "MIT".into()),
            ("domain_expertise", "AI".into()),
            ("technical_background", true.into()),
        ]);
        person(&mut store, "p3", &[
            ("university", "Stanford".into()),
            ("domain_expertise", "FinTech".into()),
            ("technical_background", false.into()),
        ]);
        person(&mut store, "p4", &[
            ("university", PropertyValue::Null),
            ("domain_expertise", "AI".into()),
        ]);
        person(&mut store, "p5", &[("name", "Nobody".into())]);
        store.freeze();
        let index = store.adjacency().unwrap();
        let scorer = Scorer::from(AttributeMatchScorer::default());
        let cmp = |x, y| scorer.compare_entities(index, entity(&store, x), entity(&store, y));

        assert_eq!(cmp("p1", "p2").score, 1.0);
        assert_eq!(cmp("p1", "p3").score, 0.0);
        assert_eq!(cmp("p1", "p5").score, 0.0);

        // Only domain_expertise is comparable between p1 and p4
        let partial = cmp("p1", "p4");
        assert_eq!(partial.score, 1.0);
        assert_eq!(
            partial.evidence,
            Evidence::MatchingAttributes {
                matched_keys: vec!["domain_expertise".to_string()],
                compared: 1
            }
        );
        assert_eq!(cmp("p4", "p1"), partial);
    }

    #[test]
    fn test_attribute_basis() {
        let mut store = GraphStore::new();
        person(&mut store, "p1", &[("university", PropertyValue::Null)]);
        person(&mut store, "p2", &[("university", "MIT".into())]);
        store.freeze();
        let index = store.adjacency().unwrap();
        let scorer = AttributeMatchScorer::default();

        let empty = scorer.basis(index, entity(&store, "p1"));
        assert_eq!(empty.len(), 3);
        assert!(!AttributeMatchScorer::has_basis(&empty));
        assert!(AttributeMatchScorer::has_basis(&scorer.basis(index, entity(&store, "p2"))));
    }

    #[test]
    fn test_evidence_serialization() {
        let evidence = Evidence::SharedNeighbors {
            neighbor_kind: EntityKind::Technology,
            shared: 1,
            union: 3,
        };
        let json = serde_json::to_value(&evidence).unwrap();
        assert_eq!(json["basis"], "shared_neighbors");
        assert_eq!(json["neighbor_kind"], "technology");
        assert_eq!(json["shared"], 1);
        assert_eq!(json["union"], 3);
    }
}
