use crate::memory::EpisodicLog;
use crate::sequence::Sequence;
use crate::suffix::SuffixFringe;

/// Override points for agents layered on top of the base search.
///
/// The base loop consults the policy at each decision: whether to abandon
/// the in-progress candidate early, and whether to steer the next suffix
/// choice away from the fringe heuristic. The notification hooks let
/// layered heuristics keep their own bookkeeping without touching the
/// loop's internals.
pub trait SearchPolicy {
    /// Request early abandonment of the in-progress candidate sequence.
    /// Bailing counts as a failure of the active suffix.
    fn should_bail(&mut self, _fringe: &SuffixFringe, _log: &EpisodicLog) -> bool {
        false
    }

    /// Called after a goal has been credited.
    fn on_success(&mut self, _fringe: &SuffixFringe, _log: &EpisodicLog) {}

    /// Called after a failure has been recorded (and any split attempted).
    fn on_failure(&mut self, _fringe: &SuffixFringe, _log: &EpisodicLog) {}

    /// Pick the suffix to activate next, or None to defer to
    /// `find_best_node_to_try`. A suffix that is not in the fringe is
    /// ignored and the default selection runs instead.
    fn select_suffix(&mut self, _fringe: &SuffixFringe) -> Option<Sequence> {
        None
    }
}

/// The base behavior: never bail, always follow the fringe heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPolicy;

impl SearchPolicy for DefaultPolicy {}
