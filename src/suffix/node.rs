use crate::memory::EpisodicLog;
use crate::sequence::Sequence;
use crate::types::{Alphabet, Move};

/// How strongly suffix depth penalizes a node relative to its failure
/// ratio. Should stay in (0.0, 1.0).
pub const G_WEIGHT: f64 = 0.05;

/// Stable handle for a node, assigned by the fringe at insertion. The
/// agent keys its resume counters on this rather than on the node's
/// address, so nodes can live in plain map storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// One tracked suffix with its success/failure history.
///
/// A node is created as the empty-suffix root, or as one of the children
/// of a split. It accrues success and fail indices (positions in the
/// episodic log where the suffix preceded a success or failure) until it
/// is either split, which replaces it with one child per alphabet move,
/// or evicted from the fringe.
#[derive(Debug, Clone)]
pub struct SuffixNode {
    id: NodeId,
    suffix: Sequence,
    depth: usize,
    success_indices: Vec<usize>,
    fail_indices: Vec<usize>,
    found_goal: bool,
}

impl SuffixNode {
    /// A fresh node tracking the given suffix, with no history yet. The id
    /// stays a placeholder until the fringe takes ownership.
    pub fn new(suffix: Sequence) -> Self {
        let depth = suffix.len();
        Self {
            id: NodeId(0),
            suffix,
            depth,
            success_indices: Vec::new(),
            fail_indices: Vec::new(),
            found_goal: false,
        }
    }

    /// The empty-suffix root every search starts from.
    pub fn root() -> Self {
        Self::new(Sequence::empty())
    }

    fn child(parent: &SuffixNode, mv: &Move) -> Self {
        Self::new(parent.suffix.build_child(mv))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: NodeId) {
        self.id = id;
    }

    pub fn suffix(&self) -> &Sequence {
        &self.suffix
    }

    /// Suffix length, the g term of the heuristic.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn found_goal(&self) -> bool {
        self.found_goal
    }

    pub fn mark_found_goal(&mut self) {
        self.found_goal = true;
    }

    pub fn record_success(&mut self, index: usize) {
        self.success_indices.push(index);
    }

    pub fn record_fail(&mut self, index: usize) {
        self.fail_indices.push(index);
    }

    pub fn success_count(&self) -> usize {
        self.success_indices.len()
    }

    pub fn fail_count(&self) -> usize {
        self.fail_indices.len()
    }

    /// Failure ratio in [0, 1]; 0 when nothing has been recorded yet.
    pub fn normalized_weight(&self) -> f64 {
        let successes = self.success_indices.len();
        let fails = self.fail_indices.len();
        if successes + fails == 0 {
            return 0.0;
        }
        fails as f64 / (fails + successes) as f64
    }

    /// The heuristic f = g * g_weight + normalized weight. Lower is more
    /// urgent to try.
    pub fn weight(&self, g_weight: f64) -> f64 {
        self.depth as f64 * g_weight + self.normalized_weight()
    }

    /// A node may split once it is ambiguous: it has reached the goal and
    /// it has also failed, so one more move of history is needed to tell
    /// the two apart.
    pub fn can_split(&self) -> bool {
        self.found_goal && !self.fail_indices.is_empty()
    }

    /// Produces one child per alphabet move, or None if the split is not
    /// worthwhile. All-or-nothing: if any child would end up with no fail
    /// indices it has no discriminating signal, and the whole split is
    /// rejected with the parent left untouched.
    ///
    /// Each parent index maps to the episode one step earlier, whose move
    /// decides which child inherits it. Indices that fall off the start of
    /// the log, or that would extend a non-empty suffix back across a goal
    /// boundary, are dropped.
    pub fn split(&self, log: &EpisodicLog, alphabet: &Alphabet) -> Option<Vec<SuffixNode>> {
        if !self.can_split() {
            return None;
        }

        let mut children: Vec<SuffixNode> = alphabet
            .moves()
            .iter()
            .map(|mv| SuffixNode::child(self, mv))
            .collect();

        self.divy_indices(&self.success_indices, true, &mut children, log, alphabet);
        self.divy_indices(&self.fail_indices, false, &mut children, log, alphabet);

        if children.iter().any(|c| c.fail_indices.is_empty()) {
            return None;
        }
        Some(children)
    }

    fn divy_indices(
        &self,
        parent_indices: &[usize],
        success: bool,
        children: &mut [SuffixNode],
        log: &EpisodicLog,
        alphabet: &Alphabet,
    ) {
        for &parent_index in parent_indices {
            // Extending the suffix backward consumes one earlier position.
            let Some(index) = parent_index.checked_sub(1) else {
                continue;
            };
            let Some(episode) = log.get(index) else {
                continue;
            };
            // A non-empty suffix cannot extend back across a goal boundary.
            if !self.suffix.is_empty() && episode.hit_goal() {
                continue;
            }
            let Some(position) = alphabet.position(episode.move_taken()) else {
                continue;
            };
            if success {
                children[position].success_indices.push(index);
            } else {
                children[position].fail_indices.push(index);
            }
        }
    }
}
