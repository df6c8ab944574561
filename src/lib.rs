//! Ecograph
//!
//! An in-memory entity graph for startup-ecosystem data (organizations,
//! people, funds and technologies) with a neighbor-typed adjacency index and
//! a resemblance-scoring engine.
//!
//! # Architecture
//!
//! - `graph`: typed entities and relationships in a two-phase store
//!   (loading, then frozen)
//! - `index`: the adjacency index built once when the store is frozen
//! - `similarity`: per-kind scorers, all-pairs and target-vs-all queries,
//!   result formatting
//! - `loader`: the knowledge-graph JSON document format
//! - `nlq`: question routing between the engine and external delegates
//! - `config`: YAML configuration for the engine and its scorers
//!
//! ## Example Usage
//!
//! ```rust
//! use ecograph::{CancelFlag, EntityKind, GraphStore, PropertyMap, SimilarityEngine};
//!
//! let mut store = GraphStore::new();
//! for tech in ["rust", "postgres", "kafka"] {
//!     store.add_entity(tech, EntityKind::Technology, PropertyMap::new()).unwrap();
//! }
//! for org in ["acme", "beta", "gamma"] {
//!     store.add_entity(org, EntityKind::Organization, PropertyMap::new()).unwrap();
//! }
//! store.add_relationship("acme", "rust", "USES_TECHNOLOGY", PropertyMap::new()).unwrap();
//! store.add_relationship("acme", "postgres", "USES_TECHNOLOGY", PropertyMap::new()).unwrap();
//! store.add_relationship("beta", "postgres", "USES_TECHNOLOGY", PropertyMap::new()).unwrap();
//! store.add_relationship("beta", "kafka", "USES_TECHNOLOGY", PropertyMap::new()).unwrap();
//! store.freeze();
//!
//! let engine = SimilarityEngine::new(&store).unwrap();
//! let scan = engine.all_pairs(EntityKind::Organization, &CancelFlag::new()).unwrap();
//!
//! // gamma has no technologies, so only acme/beta is scored
//! assert_eq!(scan.pairs.len(), 1);
//! assert!((scan.pairs[0].score - 1.0 / 3.0).abs() < 1e-12);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod index;
pub mod loader;
pub mod nlq;
pub mod similarity;

// Re-export main types for convenience
pub use graph::{
    Entity, EntityId, EntityKind, GraphError, GraphResult, GraphStatistics, GraphStore,
    PropertyMap, PropertyValue, Relationship, RelationshipType,
};

pub use index::{AdjacencyIndex, NeighborSet};

pub use similarity::{
    format_table, CancelFlag, Evidence, ScanOutcome, Scorer, ScorerRegistry, SimilarPair,
    SimilarityEngine, SimilarityError, SimilarityRecord, SimilarityResult, TargetOutcome,
};

pub use loader::{load_knowledge_graph, load_knowledge_graph_file, LoadError, LoadResult};

pub use config::{ConfigError, SimilarityConfig};

pub use nlq::{
    is_read_only, GraphQueryExecutor, NLQError, NLQResult, QueryRouter, QuestionTranslator,
    RouterAnswer,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
