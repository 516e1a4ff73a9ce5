use crate::error::{MarzError, Result};
use crate::types::{Move, SensorReading};

/// One timestep: the move taken and, once the environment has responded,
/// the sensor outcome of taking it.
///
/// Creation is two-phase. The move is known when the episode is appended;
/// the outcome arrives one call later and is attached exactly once.
#[derive(Debug, Clone)]
pub struct Episode {
    move_taken: Move,
    outcome: Option<SensorReading>,
}

impl Episode {
    pub fn new(move_taken: Move) -> Self {
        Self {
            move_taken,
            outcome: None,
        }
    }

    pub fn move_taken(&self) -> &Move {
        &self.move_taken
    }

    pub fn outcome(&self) -> Option<&SensorReading> {
        self.outcome.as_ref()
    }

    /// True once the environment has reported a goal for this step.
    pub fn hit_goal(&self) -> bool {
        self.outcome.as_ref().map(|o| o.is_goal()).unwrap_or(false)
    }

    fn attach_outcome(&mut self, outcome: SensorReading) -> Result<()> {
        if self.outcome.is_some() {
            return Err(MarzError::Validation(
                "episode already has a sensor outcome".to_string(),
            ));
        }
        self.outcome = Some(outcome);
        Ok(())
    }
}

/// Append-only, 0-indexed log of episodes. Indices are stable for the
/// lifetime of the log; suffix statistics reference them directly.
#[derive(Debug, Default)]
pub struct EpisodicLog {
    episodes: Vec<Episode>,
}

impl EpisodicLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Index of the most recent episode, if any.
    pub fn current_index(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&Episode> {
        self.episodes.get(index)
    }

    pub fn push(&mut self, episode: Episode) {
        self.episodes.push(episode);
    }

    /// Attaches the sensor outcome to the most recent episode.
    pub fn attach_outcome(&mut self, outcome: SensorReading) -> Result<()> {
        match self.episodes.last_mut() {
            Some(episode) => episode.attach_outcome(outcome),
            None => Err(MarzError::Validation(
                "no episode is awaiting a sensor outcome".to_string(),
            )),
        }
    }

    /// Moves of every episode at `start` or later, oldest first.
    pub fn moves_from(&self, start: usize) -> Vec<Move> {
        self.episodes
            .iter()
            .skip(start)
            .map(|e| e.move_taken().clone())
            .collect()
    }
}
