use super::traits::ConfigSection;
use crate::error::{MarzError, Result};
use crate::suffix::G_WEIGHT;
use serde::{Deserialize, Serialize};

/// Tunables of the suffix search itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of suffix nodes tracked in the fringe.
    pub fringe_capacity: usize,
    /// Depth penalty of the node heuristic; see [`G_WEIGHT`].
    pub g_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fringe_capacity: 10_000,
            g_weight: G_WEIGHT,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<()> {
        if self.fringe_capacity < 1 {
            return Err(MarzError::Configuration(
                "Fringe capacity must be at least 1".to_string(),
            ));
        }
        if self.g_weight < 0.0 || self.g_weight > 1.0 {
            return Err(MarzError::Configuration(
                "g_weight must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
