//! Result formatting
//!
//! Turns scored pairs into records carrying both ids and display names,
//! serializable to JSON or rendered as a table.

use super::engine::SimilarPair;
use super::scorer::Evidence;
use crate::graph::{EntityId, GraphStore};
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

/// Column headers of [`SimilarityRecord::row`]
pub const HEADERS: [&str; 6] = ["#", "Entity A", "Entity B", "Score", "Evidence", "Ids"];

/// One result row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityRecord {
    pub a: EntityId,
    pub a_name: String,
    pub b: EntityId,
    pub b_name: String,
    pub score: f64,
    pub evidence: Evidence,
}

impl SimilarityRecord {
    /// Attach display names from `store`; ids missing from the store keep
    /// the id as their name
    pub fn from_pair(store: &GraphStore, pair: &SimilarPair) -> Self {
        let name_of = |id: &EntityId| {
            store
                .get_entity(id)
                .map_or_else(|| id.to_string(), |entity| entity.display_name().to_string())
        };
        Self {
            a_name: name_of(&pair.a),
            b_name: name_of(&pair.b),
            a: pair.a.clone(),
            b: pair.b.clone(),
            score: pair.score,
            evidence: pair.evidence.clone(),
        }
    }

    /// Table cells, ranked position first
    pub fn row(&self, position: usize) -> Vec<String> {
        vec![
            position.to_string(),
            self.a_name.clone(),
            self.b_name.clone(),
            format!("{:.3}", self.score),
            describe(&self.evidence),
            format!("{} / {}", self.a, self.b),
        ]
    }
}

/// Records for `pairs`, in the same order
pub fn records(store: &GraphStore, pairs: &[SimilarPair]) -> Vec<SimilarityRecord> {
    pairs
        .iter()
        .map(|pair| SimilarityRecord::from_pair(store, pair))
        .collect()
}

/// Records as a pretty-printed JSON array
pub fn to_json(records: &[SimilarityRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Records rendered as a text table
pub fn format_table(records: &[SimilarityRecord]) -> String {
    if records.is_empty() {
        return "(no results)".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(HEADERS);
    for (i, record) in records.iter().enumerate() {
        table.add_row(record.row(i + 1));
    }
    table.to_string()
}

fn describe(evidence: &Evidence) -> String {
    match evidence {
        Evidence::SharedNeighbors {
            neighbor_kind,
            shared,
            union,
        } => format!("{}/{} {} shared", shared, union, neighbor_kind),
        Evidence::MatchingAttributes {
            matched_keys,
            compared,
        } => {
            if matched_keys.is_empty() {
                format!("0/{} attributes match", compared)
            } else {
                format!(
                    "{}/{} match: {}",
                    matched_keys.len(),
                    compared,
                    matched_keys.join(", ")
                )
            }
        }
    }
}
