//! Deterministic ranking of scored results
//!
//! Descending score, then the item's own ascending tie-break order.

use std::cmp::Ordering;

/// A scored item that can be ranked.
pub trait Ranked {
    fn score(&self) -> f64;

    /// Ordering applied between items with equal scores.
    fn tie_break(&self, other: &Self) -> Ordering;
}

fn ranking_order<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| a.tie_break(b))
}

/// Sort in ranking order.
pub fn rank<T: Ranked>(items: &mut [T]) {
    items.sort_by(ranking_order);
}

/// Keep the `k` best items, in ranking order.
///
/// Partitions around the k-th element before sorting so only the kept
/// prefix pays for the full sort.
pub fn top_k<T: Ranked>(mut items: Vec<T>, k: usize) -> Vec<T> {
    if k == 0 {
        items.clear();
        return items;
    }
    if items.len() > k {
        items.select_nth_unstable_by(k - 1, ranking_order);
        items.truncate(k);
    }
    rank(&mut items);
    items
}
