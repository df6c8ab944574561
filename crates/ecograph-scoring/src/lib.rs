pub mod attribute;
pub mod overlap;
pub mod rank;

pub use attribute::{attribute_match, AttributeMatch};
pub use overlap::{jaccard, Overlap};
pub use rank::{rank, top_k, Ranked};
