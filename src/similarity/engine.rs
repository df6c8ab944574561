//! Similarity query engine
//!
//! Two query modes over one frozen store:
//! - all-pairs: every unordered pair of one kind, scored once
//! - target-vs-all: one resolved entity ranked against the rest of its kind
//!
//! Scoring runs on the rayon pool. Bases are extracted once per entity, then
//! candidate rows are scored in batches; a [`CancelFlag`] is checked between
//! batches. Results are ranked by descending score, then ascending `(a, b)`.

use super::cancel::CancelFlag;
use super::registry::ScorerRegistry;
use super::scorer::{Comparison, Evidence, Resemblance, Scorer};
use super::{SimilarityError, SimilarityResult};
use crate::config::SimilarityConfig;
use crate::graph::{Entity, EntityId, EntityKind, GraphStore};
use crate::index::AdjacencyIndex;
use ecograph_scoring::{rank, top_k, Ranked};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

const DEFAULT_BATCH_SIZE: usize = 64;
const DEFAULT_TOP_N: usize = 5;

/// One scored pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPair {
    pub a: EntityId,
    pub b: EntityId,
    pub score: f64,
    pub evidence: Evidence,
}

impl SimilarPair {
    /// Pair with `a < b`, as emitted by all-pairs scans
    fn normalized(x: &EntityId, y: &EntityId, comparison: Comparison) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self::oriented(a.clone(), b.clone(), comparison)
    }

    /// Pair with `a` fixed to the target, as emitted by target-vs-all
    fn oriented(a: EntityId, b: EntityId, comparison: Comparison) -> Self {
        Self {
            a,
            b,
            score: comparison.score,
            evidence: comparison.evidence,
        }
    }

    /// Whether `id` is one of the two endpoints
    pub fn involves(&self, id: &EntityId) -> bool {
        &self.a == id || &self.b == id
    }
}

impl Ranked for SimilarPair {
    fn score(&self) -> f64 {
        self.score
    }

    fn tie_break(&self, other: &Self) -> Ordering {
        (&self.a, &self.b).cmp(&(&other.a, &other.b))
    }
}

/// Result of an all-pairs scan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub kind: EntityKind,
    /// Nonzero pairs in ranking order
    pub pairs: Vec<SimilarPair>,
    /// Comparisons performed, including those that scored zero
    pub pairs_scored: usize,
    /// The scan stopped early; `pairs` holds what was scored before that
    pub cancelled: bool,
}

/// Result of a target-vs-all query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Best matches, `a` is always the target
    Ranked {
        target: EntityId,
        matches: Vec<SimilarPair>,
    },
    /// The target has nothing to compare on (no neighbors of the scored
    /// kind, or no comparable attributes)
    NoBasis { target: EntityId },
}

impl TargetOutcome {
    pub fn target(&self) -> &EntityId {
        match self {
            TargetOutcome::Ranked { target, .. } | TargetOutcome::NoBasis { target } => target,
        }
    }

    /// Ranked matches; empty for [`TargetOutcome::NoBasis`]
    pub fn matches(&self) -> &[SimilarPair] {
        match self {
            TargetOutcome::Ranked { matches, .. } => matches,
            TargetOutcome::NoBasis { .. } => &[],
        }
    }

    pub fn has_basis(&self) -> bool {
        matches!(self, TargetOutcome::Ranked { .. })
    }
}

/// Stateless query engine over a frozen store
#[derive(Debug, Clone)]
pub struct SimilarityEngine<'g> {
    store: &'g GraphStore,
    index: &'g AdjacencyIndex,
    registry: ScorerRegistry,
    batch_size: usize,
    default_top_n: usize,
}

impl<'g> SimilarityEngine<'g> {
    /// Engine with the default registry
    ///
    /// Fails with `NotFrozen` while the store is still loading.
    pub fn new(store: &'g GraphStore) -> SimilarityResult<Self> {
        Ok(Self {
            store,
            index: store.adjacency()?,
            registry: ScorerRegistry::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            default_top_n: DEFAULT_TOP_N,
        })
    }

    /// Engine with registry, batch size and default count taken from `config`
    pub fn with_config(store: &'g GraphStore, config: &SimilarityConfig) -> SimilarityResult<Self> {
        Ok(Self {
            store,
            index: store.adjacency()?,
            registry: ScorerRegistry::from_config(config),
            batch_size: config.batch_size.max(1),
            default_top_n: config.default_top_n.max(1),
        })
    }

    pub fn with_registry(mut self, registry: ScorerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Rows per batch; clamped to at least 1
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn store(&self) -> &'g GraphStore {
        self.store
    }

    pub fn registry(&self) -> &ScorerRegistry {
        &self.registry
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Find an entity of `kind` by display name, ignoring case only.
    /// Entities without a `name` match on their id.
    ///
    /// The first match in load order wins.
    pub fn resolve(&self, kind: EntityKind, name: &str) -> SimilarityResult<&'g Entity> {
        let needle = name.to_lowercase();
        self.store
            .entities_of_kind(kind)
            .find(|entity| entity.display_name().to_lowercase() == needle)
            .ok_or_else(|| SimilarityError::EntityNotFound(format!("{} named '{}'", kind, name)))
    }

    /// Score one explicit pair
    pub fn score_pair(&self, a: &EntityId, b: &EntityId) -> SimilarityResult<SimilarPair> {
        let first = self.lookup(a)?;
        let second = self.lookup(b)?;
        if first.id == second.id {
            return Err(SimilarityError::UnsupportedComparison(format!(
                "cannot compare {} with itself",
                a
            )));
        }
        let scorer = self.registry.scorer_for(first.kind, second.kind)?;
        let comparison = scorer.compare_entities(self.index, first, second);
        Ok(SimilarPair::normalized(&first.id, &second.id, comparison))
    }

    /// Score every unordered pair of `kind`
    ///
    /// Entities without a basis are skipped; zero scores are dropped.
    /// Quadratic in the number of entities of `kind`.
    pub fn all_pairs(&self, kind: EntityKind, cancel: &CancelFlag) -> SimilarityResult<ScanOutcome> {
        self.all_pairs_observed(kind, cancel, |_| {})
    }

    /// [`all_pairs`](Self::all_pairs), calling `after_batch` with the end row
    /// of every finished batch
    pub(crate) fn all_pairs_observed(
        &self,
        kind: EntityKind,
        cancel: &CancelFlag,
        after_batch: impl FnMut(usize),
    ) -> SimilarityResult<ScanOutcome> {
        let outcome = match self.registry.scorer_for(kind, kind)? {
            Scorer::SetOverlap(scorer) => self.scan(kind, scorer, cancel, after_batch),
            Scorer::AttributeMatch(scorer) => self.scan(kind, scorer, cancel, after_batch),
        };
        Ok(outcome)
    }

    /// The `n` most similar pairs of `kind`
    pub fn top_pairs(&self, kind: EntityKind, n: usize) -> SimilarityResult<Vec<SimilarPair>> {
        if n == 0 {
            return Err(SimilarityError::InvalidTopN(n));
        }
        let mut outcome = self.all_pairs(kind, &CancelFlag::new())?;
        outcome.pairs.truncate(n);
        Ok(outcome.pairs)
    }

    /// Rank every other entity of `kind` against the one named `name`
    pub fn target_vs_all(
        &self,
        kind: EntityKind,
        name: &str,
        top_n: usize,
    ) -> SimilarityResult<TargetOutcome> {
        if top_n == 0 {
            return Err(SimilarityError::InvalidTopN(top_n));
        }
        let scorer = self.registry.scorer_for(kind, kind)?;
        let target = self.resolve(kind, name)?;
        debug!("Resolved '{}' to {} {}", name, kind, target.id);

        let outcome = match scorer {
            Scorer::SetOverlap(scorer) => self.rank_against(kind, scorer, target, top_n),
            Scorer::AttributeMatch(scorer) => self.rank_against(kind, scorer, target, top_n),
        };
        Ok(outcome)
    }

    /// [`target_vs_all`](Self::target_vs_all) with the configured default count
    pub fn most_similar_to(&self, kind: EntityKind, name: &str) -> SimilarityResult<TargetOutcome> {
        self.target_vs_all(kind, name, self.default_top_n)
    }

    fn lookup(&self, id: &EntityId) -> SimilarityResult<&'g Entity> {
        self.store
            .get_entity(id)
            .ok_or_else(|| SimilarityError::EntityNotFound(id.to_string()))
    }

    fn scan<R: Resemblance>(
        &self,
        kind: EntityKind,
        scorer: &R,
        cancel: &CancelFlag,
        mut after_batch: impl FnMut(usize),
    ) -> ScanOutcome {
        let candidates: Vec<(&Entity, R::Basis<'_>)> = self
            .store
            .entities_of_kind(kind)
            .map(|entity| (entity, scorer.basis(self.index, entity)))
            .filter(|(_, basis)| R::has_basis(basis))
            .collect();
        let rows = candidates.len();

        let mut pairs = Vec::new();
        let mut pairs_scored = 0;
        let mut cancelled = false;

        let candidates = &candidates;
        for start in (0..rows).step_by(self.batch_size) {
            if cancel.is_cancelled() {
                warn!(
                    "{} all-pairs scan cancelled after {} of {} rows",
                    kind, start, rows
                );
                cancelled = true;
                break;
            }
            let end = (start + self.batch_size).min(rows);

            let batch: Vec<SimilarPair> = (start..end)
                .into_par_iter()
                .flat_map_iter(move |i| {
                    let (a, basis_a) = &candidates[i];
                    candidates[i + 1..].iter().filter_map(move |(b, basis_b)| {
                        let comparison = scorer.compare(basis_a, basis_b);
                        (comparison.score > 0.0)
                            .then(|| SimilarPair::normalized(&a.id, &b.id, comparison))
                    })
                })
                .collect();

            let scored: usize = (start..end).map(|i| rows - 1 - i).sum();
            debug!(
                "{} rows {}..{}: {} comparisons, {} nonzero",
                kind,
                start,
                end,
                scored,
                batch.len()
            );
            pairs_scored += scored;
            pairs.extend(batch);
            after_batch(end);
        }

        rank(&mut pairs);
        ScanOutcome {
            kind,
            pairs,
            pairs_scored,
            cancelled,
        }
    }

    fn rank_against<R: Resemblance>(
        &self,
        kind: EntityKind,
        scorer: &R,
        target: &Entity,
        top_n: usize,
    ) -> TargetOutcome {
        let target_basis = scorer.basis(self.index, target);
        if !R::has_basis(&target_basis) {
            debug!("{} {} has no basis for comparison", kind, target.id);
            return TargetOutcome::NoBasis {
                target: target.id.clone(),
            };
        }

        let candidates: Vec<&Entity> = self
            .store
            .entities_of_kind(kind)
            .filter(|entity| entity.id != target.id)
            .collect();

        let scored: Vec<SimilarPair> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let basis = scorer.basis(self.index, candidate);
                if !R::has_basis(&basis) {
                    return None;
                }
                let comparison = scorer.compare(&target_basis, &basis);
                (comparison.score > 0.0)
                    .then(|| SimilarPair::oriented(target.id.clone(), candidate.id.clone(), comparison))
            })
            .collect();

        debug!(
            "{} {}: {} candidates, {} nonzero",
            kind,
            target.id,
            candidates.len(),
            scored.len()
        );

        TargetOutcome::Ranked {
            target: target.id.clone(),
            matches: top_k(scored, top_n),
        }
    }
}
