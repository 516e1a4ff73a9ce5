use super::traits::ConfigSection;
use crate::error::{MarzError, Result};
use serde::{Deserialize, Serialize};

/// Settings of the demo driver binary: how big a world to generate and
/// how long to run the agent against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Move symbols available to the agent, in canonical order.
    pub alphabet: Vec<String>,
    /// Number of states in the generated machine, goal state included.
    pub num_states: usize,
    /// Hard cap on environment steps for one run.
    pub max_steps: usize,
    /// Seed for the generated transition table.
    pub seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            alphabet: vec!["a".to_string(), "b".to_string()],
            num_states: 8,
            max_steps: 50_000,
            seed: 17,
        }
    }
}

impl ConfigSection for DriverConfig {
    fn section_name() -> &'static str {
        "driver"
    }

    fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(MarzError::Configuration(
                "Driver alphabet cannot be empty".to_string(),
            ));
        }
        if self.num_states < 2 {
            return Err(MarzError::Configuration(
                "The machine needs at least a goal state and one other state".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(MarzError::Configuration(
                "max_steps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
