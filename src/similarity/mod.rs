//! Resemblance scoring and similarity queries
//!
//! Scorers are registered per entity kind in a [`ScorerRegistry`]; the
//! [`SimilarityEngine`] enumerates candidates, scores them on the rayon
//! pool and ranks the results deterministically (descending score, then
//! ascending `(a, b)` ids).

pub mod cancel;
pub mod engine;
pub mod registry;
pub mod report;
pub mod scorer;

use crate::graph::GraphError;
use thiserror::Error;

pub use cancel::CancelFlag;
pub use engine::{ScanOutcome, SimilarPair, SimilarityEngine, TargetOutcome};
pub use registry::ScorerRegistry;
pub use report::{format_table, SimilarityRecord};
pub use scorer::{
    AttributeMatchScorer, Comparison, Evidence, Resemblance, Scorer, SetOverlapScorer,
    DEFAULT_PERSON_KEYS,
};

/// Errors raised by similarity queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Unsupported comparison: {0}")]
    UnsupportedComparison(String),

    #[error("top_n must be at least 1, got {0}")]
    InvalidTopN(usize),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;
