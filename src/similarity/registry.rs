//! Entity kind to scorer registry
//!
//! Exactly one scorer per kind. Kinds without a registration (Technology
//! by default) cannot be compared.

use super::scorer::{AttributeMatchScorer, Scorer, SetOverlapScorer};
use super::{SimilarityError, SimilarityResult};
use crate::config::{OverlapSettings, SimilarityConfig};
use crate::graph::{EntityKind, RelationshipType};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerRegistry {
    scorers: FxHashMap<EntityKind, Scorer>,
}

impl ScorerRegistry {
    /// Registry with no scorers
    pub fn empty() -> Self {
        Self {
            scorers: FxHashMap::default(),
        }
    }

    /// Build the registry described by a configuration
    pub fn from_config(config: &SimilarityConfig) -> Self {
        let mut registry = Self::empty();
        registry.register(EntityKind::Organization, overlap(&config.organization));
        registry.register(EntityKind::Fund, overlap(&config.fund));
        registry.register(
            EntityKind::Person,
            AttributeMatchScorer::new(config.person_keys.iter().cloned()),
        );
        registry
    }

    /// Register `scorer` for `kind`, returning the scorer it replaces
    pub fn register(&mut self, kind: EntityKind, scorer: impl Into<Scorer>) -> Option<Scorer> {
        self.scorers.insert(kind, scorer.into())
    }

    pub fn get(&self, kind: EntityKind) -> Option<&Scorer> {
        self.scorers.get(&kind)
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.scorers.contains_key(&kind)
    }

    /// Registered kinds in canonical order
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        EntityKind::ALL
            .into_iter()
            .filter(|kind| self.scorers.contains_key(kind))
    }

    /// Scorer for comparing an entity of kind `a` with one of kind `b`
    pub fn scorer_for(&self, a: EntityKind, b: EntityKind) -> SimilarityResult<&Scorer> {
        if a != b {
            return Err(SimilarityError::UnsupportedComparison(format!(
                "cannot compare {} with {}",
                a, b
            )));
        }
        self.get(a).ok_or_else(|| {
            SimilarityError::UnsupportedComparison(format!("no scorer registered for {}", a))
        })
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            EntityKind::Organization,
            SetOverlapScorer::new(EntityKind::Technology),
        );
        registry.register(
            EntityKind::Fund,
            SetOverlapScorer::via(EntityKind::Organization, RelationshipType::InvestsIn),
        );
        registry.register(EntityKind::Person, AttributeMatchScorer::default());
        registry
    }
}

fn overlap(settings: &OverlapSettings) -> SetOverlapScorer {
    match &settings.via {
        Some(rel_type) => SetOverlapScorer::via(settings.neighbor_kind, rel_type.clone()),
        None => SetOverlapScorer::new(settings.neighbor_kind),
    }
}
