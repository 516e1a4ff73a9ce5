use anyhow::Context;
use marz::config::ConfigManager;
use marz::{Alphabet, Move, SensorReading, SequenceSearchAgent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A randomly generated finite-state machine the agent knows nothing
/// about. Reaching the goal state teleports the agent to a random other
/// state, so a sequence that worked once has to be re-earned.
struct Machine {
    /// transitions[state][move position] -> next state
    transitions: Vec<Vec<usize>>,
    goal_state: usize,
    state: usize,
    rng: StdRng,
}

impl Machine {
    fn generate(num_states: usize, num_moves: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let goal_state = num_states - 1;
        let mut transitions = Vec::with_capacity(num_states);
        for state in 0..num_states {
            let mut row = Vec::with_capacity(num_moves);
            for _ in 0..num_moves {
                row.push(rng.gen_range(0..num_states));
            }
            // Keep the goal reachable: the last move always steps along a
            // chain toward it.
            row[num_moves - 1] = (state + 1).min(goal_state);
            transitions.push(row);
        }
        let state = rng.gen_range(0..goal_state);
        Self {
            transitions,
            goal_state,
            state,
            rng,
        }
    }

    fn apply(&mut self, move_position: usize) -> SensorReading {
        self.state = self.transitions[self.state][move_position];
        if self.state == self.goal_state {
            // Teleport off the goal so the next run starts fresh.
            self.state = self.rng.gen_range(0..self.goal_state);
            SensorReading::goal()
        } else {
            SensorReading::not_goal()
        }
    }
}

#[derive(Serialize)]
struct NodeSummary {
    suffix: String,
    successes: usize,
    fails: usize,
    normalized_weight: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading config from {}", path))?;
    }
    let config = manager.get();

    let moves: Vec<Move> = config
        .driver
        .alphabet
        .iter()
        .map(|symbol| Move::new(symbol.as_str()))
        .collect();
    let alphabet = Alphabet::new(moves)?;
    let mut machine = Machine::generate(
        config.driver.num_states,
        alphabet.len(),
        config.driver.seed,
    );
    let mut agent = SequenceSearchAgent::new(alphabet.clone(), &config.search)?;

    let mut reading: Option<SensorReading> = None;
    let mut goals = 0usize;
    let mut steps_at_last_goal = 0usize;
    for step in 0..config.driver.max_steps {
        let mv = agent.next_move(reading.take())?;
        let position = alphabet
            .position(&mv)
            .context("agent emitted a move outside its alphabet")?;
        let outcome = machine.apply(position);
        if outcome.is_goal() {
            goals += 1;
            log::info!(
                "goal #{} at step {} ({} steps since previous)",
                goals,
                step,
                step - steps_at_last_goal
            );
            steps_at_last_goal = step;
        }
        reading = Some(outcome);
    }

    let mut summaries: Vec<NodeSummary> = agent
        .fringe()
        .iter()
        .map(|node| NodeSummary {
            suffix: node.suffix().to_string(),
            successes: node.success_count(),
            fails: node.fail_count(),
            normalized_weight: node.normalized_weight(),
        })
        .collect();
    summaries.sort_by(|a, b| {
        a.normalized_weight
            .partial_cmp(&b.normalized_weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries.truncate(10);

    println!(
        "{} goals in {} steps; {} suffixes tracked",
        goals,
        config.driver.max_steps,
        agent.fringe().len()
    );
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
