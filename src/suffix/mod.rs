pub mod fringe;
pub mod node;

pub use fringe::SuffixFringe;
pub use node::{NodeId, SuffixNode, G_WEIGHT};
