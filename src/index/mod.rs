//! Adjacency indexing module
//!
//! Provides the build-once neighbor index shared by every scorer.

pub mod adjacency;

pub use adjacency::{AdjacencyIndex, NeighborSet};
