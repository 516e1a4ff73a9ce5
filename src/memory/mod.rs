pub mod episodic;

pub use episodic::{Episode, EpisodicLog};
