use marz::config::SearchConfig;
use marz::{
    Alphabet, EpisodicLog, Move, SearchPolicy, SensorReading, Sequence, SequenceSearchAgent,
    SuffixFringe,
};

fn alphabet_ab() -> Alphabet {
    Alphabet::new(vec![Move::new("a"), Move::new("b")]).unwrap()
}

fn seq(symbols: &[&str]) -> Sequence {
    Sequence::new(symbols.iter().map(|s| Move::new(*s)).collect())
}

fn agent() -> SequenceSearchAgent {
    SequenceSearchAgent::new(alphabet_ab(), &SearchConfig::default()).unwrap()
}

#[test]
fn first_move_is_the_first_canonical_sequence() {
    let mut agent = agent();
    assert_eq!(agent.next_move(None).unwrap(), Move::new("a"));
}

#[test]
fn strict_alternation_is_validated() {
    let mut agent = agent();
    // A reading before any move was emitted.
    assert!(agent.next_move(Some(SensorReading::not_goal())).is_err());

    agent.next_move(None).unwrap();
    // A missing reading after a move was emitted.
    assert!(agent.next_move(None).is_err());
}

#[test]
fn empty_alphabet_is_rejected() {
    let alphabet = Alphabet::new(Vec::new()).unwrap();
    assert!(SequenceSearchAgent::new(alphabet, &SearchConfig::default()).is_err());
}

/// A world where any sequence ending in `b` reaches the goal, as long as
/// it starts off the goal square: hitting the goal leaves the agent
/// standing on it, and the next move steps off without scoring.
struct EndsInB {
    on_goal: bool,
}

impl EndsInB {
    fn new() -> Self {
        Self { on_goal: false }
    }

    fn apply(&mut self, mv: &Move) -> SensorReading {
        let scored = mv == &Move::new("b") && !self.on_goal;
        self.on_goal = scored;
        if scored {
            SensorReading::goal()
        } else {
            SensorReading::not_goal()
        }
    }
}

#[test]
fn ends_in_b_world_splits_root_and_prefers_b() {
    let mut env = EndsInB::new();
    let mut agent = agent();

    let mut reading = None;
    for _ in 0..200 {
        let mv = agent.next_move(reading.take()).unwrap();
        reading = Some(env.apply(&mv));
    }

    let fringe = agent.fringe();
    // The ambiguous root split into one child per move.
    assert!(!fringe.contains_suffix(&Sequence::empty()));
    assert!(fringe.contains_suffix(&seq(&["a"])));
    assert!(fringe.contains_suffix(&seq(&["b"])));

    // Everything ending in a failed; almost everything ending in b worked.
    let node_a = fringe.get(&seq(&["a"])).unwrap();
    let node_b = fringe.get(&seq(&["b"])).unwrap();
    assert_eq!(node_a.normalized_weight(), 1.0);
    assert!(node_b.normalized_weight() < 0.1);
    assert!(node_b.success_count() > 50);

    let best = fringe.find_best_node_to_try().unwrap();
    assert_eq!(best.suffix(), &seq(&["b"]));
}

#[test]
fn early_goal_credits_the_best_matching_suffix() {
    let mut agent = agent();

    // decode(1) = [a] fails, decode(2) = [b] fails, decode(3) = [a,a].
    agent.next_move(None).unwrap();
    agent.next_move(Some(SensorReading::not_goal())).unwrap();
    let mv = agent.next_move(Some(SensorReading::not_goal())).unwrap();
    assert_eq!(mv, Move::new("a"));
    assert_eq!(agent.current_sequence(), &seq(&["a", "a"]));
    assert_eq!(agent.cursor_position(), 1);

    // Goal arrives one move into the two-move candidate: a partial match.
    agent.next_move(Some(SensorReading::goal())).unwrap();

    let root = agent.fringe().get(&Sequence::empty()).unwrap();
    assert_eq!(root.success_count(), 1);
    assert_eq!(root.fail_count(), 2);
    // A partial success does not resolve the node's ambiguity.
    assert!(!root.found_goal());
    assert_eq!(agent.active_normalized_weight(), Some(2.0 / 3.0));
}

#[test]
fn goal_replays_the_same_candidate() {
    let mut env = EndsInB::new();
    let mut agent = agent();

    // Reach the first goal with the single-move candidate [b].
    let mut reading = None;
    let mut mv = agent.next_move(None).unwrap();
    for _ in 0..3 {
        reading = Some(env.apply(&mv));
        mv = agent.next_move(reading.take()).unwrap();
        if agent.current_sequence() == &seq(&["b"]) && agent.cursor_position() == 1 {
            break;
        }
    }
    assert_eq!(mv, Move::new("b"));

    // Success resets the cursor, so the very same sequence runs again.
    let after_goal = agent.next_move(Some(SensorReading::goal())).unwrap();
    assert_eq!(after_goal, Move::new("b"));
    assert_eq!(agent.current_sequence(), &seq(&["b"]));
}

struct AlwaysBail;

impl SearchPolicy for AlwaysBail {
    fn should_bail(&mut self, _fringe: &SuffixFringe, _log: &EpisodicLog) -> bool {
        true
    }
}

#[test]
fn bailing_counts_as_a_failure_mid_sequence() {
    let mut bailer =
        SequenceSearchAgent::with_policy(alphabet_ab(), &SearchConfig::default(), AlwaysBail)
            .unwrap();

    bailer.next_move(None).unwrap(); // [a]
    bailer.next_move(Some(SensorReading::not_goal())).unwrap(); // [b]
    bailer.next_move(Some(SensorReading::not_goal())).unwrap(); // first move of [a,a]
    // One move into [a,a]: without bailing this would keep following.
    bailer.next_move(Some(SensorReading::not_goal())).unwrap();

    let root = bailer.fringe().get(&Sequence::empty()).unwrap();
    assert_eq!(root.fail_count(), 3);
}

#[test]
fn default_policy_follows_candidates_to_exhaustion() {
    let mut agent = agent();

    agent.next_move(None).unwrap(); // [a]
    agent.next_move(Some(SensorReading::not_goal())).unwrap(); // [b]
    agent.next_move(Some(SensorReading::not_goal())).unwrap(); // a of [a,a]
    agent.next_move(Some(SensorReading::not_goal())).unwrap(); // a of [a,a]

    let root = agent.fringe().get(&Sequence::empty()).unwrap();
    assert_eq!(root.fail_count(), 2);
    assert_eq!(agent.cursor_position(), 2);
}

struct SteerOffFringe;

impl SearchPolicy for SteerOffFringe {
    fn select_suffix(&mut self, _fringe: &SuffixFringe) -> Option<Sequence> {
        // Not a tracked suffix; the agent must fall back to the heuristic.
        Some(Sequence::new(vec![Move::new("z")]))
    }
}

#[test]
fn unknown_policy_suffix_falls_back_to_heuristic() {
    let mut agent =
        SequenceSearchAgent::with_policy(alphabet_ab(), &SearchConfig::default(), SteerOffFringe)
            .unwrap();

    agent.next_move(None).unwrap();
    let mv = agent.next_move(Some(SensorReading::not_goal())).unwrap();
    assert_eq!(mv, Move::new("b"));
}

/// A seeded random machine in the style of an FSM world: the last
/// alphabet move steps along a chain toward the goal, everything else is
/// arbitrary, and scoring teleports the agent to state 0.
struct ChainMachine {
    transitions: Vec<Vec<usize>>,
    goal_state: usize,
    state: usize,
}

impl ChainMachine {
    fn new(num_states: usize) -> Self {
        // Deterministic pseudo-random rows keep the test reproducible.
        let mut mix = 0x9e37u64;
        let goal_state = num_states - 1;
        let transitions = (0..num_states)
            .map(|state| {
                mix = mix.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                vec![(mix % num_states as u64) as usize, (state + 1).min(goal_state)]
            })
            .collect();
        Self {
            transitions,
            goal_state,
            state: 0,
        }
    }

    fn apply(&mut self, position: usize) -> SensorReading {
        self.state = self.transitions[self.state][position];
        if self.state == self.goal_state {
            self.state = 0;
            SensorReading::goal()
        } else {
            SensorReading::not_goal()
        }
    }
}

#[test]
fn agent_keeps_finding_goals_in_a_chain_machine() {
    let alphabet = alphabet_ab();
    let mut agent = SequenceSearchAgent::new(alphabet.clone(), &SearchConfig::default()).unwrap();
    let mut machine = ChainMachine::new(4);

    let mut reading = None;
    let mut goals = 0;
    for _ in 0..20_000 {
        let mv = agent.next_move(reading.take()).unwrap();
        let position = alphabet.position(&mv).unwrap();
        let outcome = machine.apply(position);
        if outcome.is_goal() {
            goals += 1;
        }
        reading = Some(outcome);
    }
    assert!(goals > 10, "only {} goals in 20000 steps", goals);
    assert!(agent.fringe().len() <= agent.fringe().max_size());
}
