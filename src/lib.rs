//! MaRz: a trial-and-error search over action sequences.
//!
//! The agent learns which multi-step move sequences reach a goal in an
//! environment with unknown dynamics. It enumerates candidate sequences
//! through a canonical numbering ([`sequence::SequenceCodec`]), keeps
//! per-suffix success/failure statistics ([`suffix::SuffixNode`]) in a
//! bounded frontier ([`suffix::SuffixFringe`]), and drives the whole loop
//! from [`agent::SequenceSearchAgent`].

pub mod agent;
pub mod config;
pub mod error;
pub mod memory;
pub mod sequence;
pub mod suffix;
pub mod types;

pub use agent::{DefaultPolicy, SearchPolicy, SequenceSearchAgent};
pub use error::{MarzError, Result};
pub use memory::{Episode, EpisodicLog};
pub use sequence::{Sequence, SequenceCodec};
pub use suffix::{NodeId, SuffixFringe, SuffixNode};
pub use types::{Alphabet, Move, SensorReading, SensorValue};
