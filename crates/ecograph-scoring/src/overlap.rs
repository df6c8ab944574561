//! Set-overlap similarity
//!
//! Jaccard index over two neighbor sets.

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

/// Outcome of comparing two sets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overlap {
    /// |A ∩ B|
    pub shared: usize,
    /// |A ∪ B|
    pub union: usize,
    /// shared / union, or 0.0 when either side is empty
    pub score: f64,
}

impl Overlap {
    pub const EMPTY: Overlap = Overlap {
        shared: 0,
        union: 0,
        score: 0.0,
    };
}

/// Jaccard index `|A ∩ B| / |A ∪ B|`.
///
/// Returns a score of 0.0 (never NaN) when both sets are empty, and when
/// only one of them is. The intersection is counted by probing the larger
/// set with the members of the smaller one, so the cost is
/// O(min(|A|, |B|)).
pub fn jaccard<T, S>(a: &HashSet<T, S>, b: &HashSet<T, S>) -> Overlap
where
    T: Eq + Hash,
    S: BuildHasher,
{
    if a.is_empty() || b.is_empty() {
        return Overlap {
            shared: 0,
            union: a.len() + b.len(),
            score: 0.0,
        };
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - shared;

    Overlap {
        shared,
        union,
        score: shared as f64 / union as f64,
    }
}
