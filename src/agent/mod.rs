pub mod policy;
pub mod search_agent;

pub use policy::{DefaultPolicy, SearchPolicy};
pub use search_agent::SequenceSearchAgent;
