use crate::agent::policy::{DefaultPolicy, SearchPolicy};
use crate::config::{ConfigSection, SearchConfig};
use crate::error::{MarzError, Result};
use crate::memory::{Episode, EpisodicLog};
use crate::sequence::{Sequence, SequenceCodec};
use crate::suffix::{NodeId, SuffixFringe, SuffixNode};
use crate::types::{Alphabet, Move, SensorReading};
use std::collections::HashMap;

/// Enumeration state for the search: the canonical permutation counter
/// plus the saved counter of every suffix node the agent has stepped away
/// from, so enumeration under a suffix resumes where it left off.
#[derive(Debug, Default)]
struct SearchCursor {
    permutation_index: u64,
    resumes: HashMap<NodeId, u64>,
}

/// The goal-seeking decision loop.
///
/// One call to [`next_move`](Self::next_move) consumes the sensor outcome
/// of the previous move (None only on the very first call) and emits
/// exactly one move. Internally the agent walks the current candidate
/// sequence; on goal it credits the responsible suffix node and replays
/// the candidate, on exhaustion it records a failure, tries to split the
/// active suffix, and advances to the next candidate under the most
/// promising fringe suffix.
pub struct SequenceSearchAgent<P = DefaultPolicy> {
    alphabet: Alphabet,
    codec: SequenceCodec,
    log: EpisodicLog,
    fringe: SuffixFringe,
    current: Sequence,
    active_suffix: Sequence,
    active_id: NodeId,
    cursor: SearchCursor,
    last_goal_index: Option<usize>,
    policy: P,
}

impl SequenceSearchAgent<DefaultPolicy> {
    pub fn new(alphabet: Alphabet, config: &SearchConfig) -> Result<Self> {
        Self::with_policy(alphabet, config, DefaultPolicy)
    }
}

impl<P: SearchPolicy> SequenceSearchAgent<P> {
    pub fn with_policy(alphabet: Alphabet, config: &SearchConfig, policy: P) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(MarzError::Validation(
                "alphabet cannot be empty".to_string(),
            ));
        }
        config.validate()?;

        let fringe = SuffixFringe::new(config.fringe_capacity, config.g_weight, SuffixNode::root())?;
        let active_suffix = Sequence::empty();
        let active_id = fringe
            .get(&active_suffix)
            .map(|node| node.id())
            .ok_or_else(|| MarzError::Invariant("fringe lost its root node".to_string()))?;

        Ok(Self {
            codec: SequenceCodec::new(alphabet.clone()),
            alphabet,
            log: EpisodicLog::new(),
            fringe,
            current: Sequence::empty(),
            active_suffix,
            active_id,
            cursor: SearchCursor::default(),
            last_goal_index: None,
            policy,
        })
    }

    /// Advances the loop one step: folds in the outcome of the previous
    /// move and returns the next one.
    ///
    /// `reading` must be None on the first call and Some on every call
    /// after it; the environment answers strictly one outcome per move.
    pub fn next_move(&mut self, reading: Option<SensorReading>) -> Result<Move> {
        match reading {
            None => {
                if !self.log.is_empty() {
                    return Err(MarzError::Validation(
                        "a sensor reading is required after the first move".to_string(),
                    ));
                }
                // First call: nothing to learn from yet, just start the
                // canonical enumeration.
                self.current = self.next_permutation()?;
            }
            Some(reading) => {
                if self.log.is_empty() {
                    return Err(MarzError::Validation(
                        "no move is awaiting a sensor outcome".to_string(),
                    ));
                }
                let hit_goal = reading.is_goal();
                self.log.attach_outcome(reading)?;

                if hit_goal {
                    self.mark_success();
                    self.policy.on_success(&self.fringe, &self.log);
                    // The sequence worked; try the identical one again.
                    self.current.reset();
                } else {
                    let bail = self.policy.should_bail(&self.fringe, &self.log);
                    if !self.current.has_next() || bail {
                        self.mark_failure();
                        self.policy.on_failure(&self.fringe, &self.log);
                        self.current = self.select_next_sequence()?;
                    }
                }
            }
        }

        let next = self
            .current
            .next()
            .ok_or_else(|| MarzError::Invariant("candidate sequence was empty".to_string()))?;
        self.log.push(Episode::new(next.clone()));
        Ok(next)
    }

    fn mark_success(&mut self) {
        if self.current.has_next() {
            // The goal arrived before the candidate finished. Credit the
            // longest tracked suffix of the moves actually taken since the
            // previous goal; with no match the observation is dropped.
            let start = self.last_goal_index.map(|i| i + 1).unwrap_or(0);
            let realized = Sequence::new(self.log.moves_from(start));
            let matched = self
                .fringe
                .find_best_match(&realized)
                .map(|node| node.suffix().clone());
            match matched {
                Some(key) => self.credit(&key, true),
                None => log::debug!(
                    "early goal with no fringe match for '{}', dropping",
                    realized
                ),
            }
        } else {
            let key = self.active_suffix.clone();
            self.credit(&key, true);
            if let Some(node) = self.fringe.get_mut(&key) {
                node.mark_found_goal();
            }
        }

        self.last_goal_index = self.log.current_index();
        log::info!(
            "goal reached after episode {} (active suffix '{}')",
            self.log.len(),
            self.active_suffix
        );
    }

    fn mark_failure(&mut self) {
        let key = self.active_suffix.clone();
        self.credit(&key, false);

        let can_split = self
            .fringe
            .get(&key)
            .map(|node| node.can_split())
            .unwrap_or(false);
        if can_split && self.fringe.split_suffix(&key, &self.log, &self.alphabet) {
            // The node is gone; its saved enumeration position goes too.
            self.cursor.resumes.remove(&self.active_id);
            log::debug!(
                "split suffix '{}' into {} children",
                key,
                self.alphabet.len()
            );
        }
    }

    /// Records one success or failure for the node at `key`, attributed to
    /// the log position where its suffix began. Skipped silently when the
    /// node has been evicted or the log is shorter than the suffix.
    fn credit(&mut self, key: &Sequence, success: bool) {
        let Some(index) = self.log.len().checked_sub(key.len()) else {
            return;
        };
        if let Some(node) = self.fringe.get_mut(key) {
            if success {
                node.record_success(index);
            } else {
                node.record_fail(index);
            }
        }
    }

    fn select_next_sequence(&mut self) -> Result<Sequence> {
        let chosen = self
            .policy
            .select_suffix(&self.fringe)
            .filter(|suffix| self.fringe.contains_suffix(suffix))
            .and_then(|suffix| self.fringe.get(&suffix))
            .or_else(|| self.fringe.find_best_node_to_try())
            .map(|node| (node.suffix().clone(), node.id()))
            .ok_or_else(|| MarzError::Invariant("suffix fringe is empty".to_string()))?;
        let (suffix, id) = chosen;
        self.set_active_node(suffix, id)?;

        let step = (self.alphabet.len() as u64)
            .checked_pow(u32::try_from(self.active_suffix.len()).unwrap_or(u32::MAX))
            .ok_or_else(|| counter_overflow(&self.active_suffix))?;
        self.cursor.permutation_index = self
            .cursor
            .permutation_index
            .checked_add(step)
            .ok_or_else(|| counter_overflow(&self.active_suffix))?;

        let sequence = self.codec.decode(self.cursor.permutation_index)?;
        if !sequence.ends_with(&self.active_suffix) {
            return Err(counter_overflow(&self.active_suffix));
        }
        log::debug!(
            "trying candidate '{}' under suffix '{}'",
            sequence,
            self.active_suffix
        );
        Ok(sequence)
    }

    /// Switches the active node, parking the outgoing node's counter and
    /// restoring the incoming one's. A node visited for the first time
    /// starts at the canonical index of its own suffix, the smallest index
    /// whose decoded sequence ends with it.
    fn set_active_node(&mut self, suffix: Sequence, id: NodeId) -> Result<()> {
        if id == self.active_id {
            return Ok(());
        }
        // Park the counter only for a node still in the fringe; a split or
        // evicted node will never be resumed.
        let outgoing_alive = self
            .fringe
            .get(&self.active_suffix)
            .map(|node| node.id() == self.active_id)
            .unwrap_or(false);
        if outgoing_alive {
            self.cursor
                .resumes
                .insert(self.active_id, self.cursor.permutation_index);
        }

        self.cursor.permutation_index = match self.cursor.resumes.get(&id) {
            Some(saved) => *saved,
            None => self.codec.encode(&suffix)?,
        };
        self.active_suffix = suffix;
        self.active_id = id;
        Ok(())
    }

    fn next_permutation(&mut self) -> Result<Sequence> {
        self.cursor.permutation_index = self
            .cursor
            .permutation_index
            .checked_add(1)
            .ok_or_else(|| counter_overflow(&self.active_suffix))?;
        self.codec.decode(self.cursor.permutation_index)
    }

    // Read access for layered heuristics.

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn log(&self) -> &EpisodicLog {
        &self.log
    }

    pub fn fringe(&self) -> &SuffixFringe {
        &self.fringe
    }

    /// Longest tracked suffix that `sequence` ends with, if any.
    pub fn find_best_match(&self, sequence: &Sequence) -> Option<&SuffixNode> {
        self.fringe.find_best_match(sequence)
    }

    pub fn active_suffix(&self) -> &Sequence {
        &self.active_suffix
    }

    /// Failure ratio of the active node, or None if it has been evicted.
    pub fn active_normalized_weight(&self) -> Option<f64> {
        self.fringe
            .get(&self.active_suffix)
            .map(|node| node.normalized_weight())
    }

    pub fn current_sequence(&self) -> &Sequence {
        &self.current
    }

    /// Moves already emitted from the current candidate.
    pub fn cursor_position(&self) -> usize {
        self.current.cursor_position()
    }
}

fn counter_overflow(suffix: &Sequence) -> MarzError {
    MarzError::Invariant(format!(
        "permutation counter overflow while enumerating under suffix '{}'",
        suffix
    ))
}
