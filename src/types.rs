use crate::error::{MarzError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An atomic action symbol drawn from a fixed alphabet. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move(String);

impl Move {
    pub fn new(symbol: impl Into<String>) -> Self {
        Move(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed, ordered set of moves available to the agent. The ordering
/// defines the canonical enumeration of sequences, so it never changes
/// after construction.
#[derive(Debug, Clone)]
pub struct Alphabet {
    moves: Vec<Move>,
    positions: HashMap<Move, usize>,
}

impl Alphabet {
    /// Duplicate symbols would make the canonical numbering ambiguous, so
    /// they are rejected up front.
    pub fn new(moves: Vec<Move>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(moves.len());
        for (i, m) in moves.iter().enumerate() {
            if positions.insert(m.clone(), i).is_some() {
                return Err(MarzError::Validation(format!(
                    "duplicate move '{}' in alphabet",
                    m
                )));
            }
        }
        Ok(Self { moves, positions })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn get(&self, position: usize) -> Option<&Move> {
        self.moves.get(position)
    }

    /// Position of the move in the alphabet ordering, if it belongs.
    pub fn position(&self, mv: &Move) -> Option<usize> {
        self.positions.get(mv).copied()
    }
}

/// Opaque sensor value reported by the environment. The agent never
/// interprets these; they pass through for layered heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SensorValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

/// One observation from the environment: the goal flag plus any named
/// sensor values the environment chooses to attach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    is_goal: bool,
    sensors: HashMap<String, SensorValue>,
}

impl SensorReading {
    pub fn goal() -> Self {
        Self {
            is_goal: true,
            sensors: HashMap::new(),
        }
    }

    pub fn not_goal() -> Self {
        Self {
            is_goal: false,
            sensors: HashMap::new(),
        }
    }

    pub fn is_goal(&self) -> bool {
        self.is_goal
    }

    pub fn set_sensor(&mut self, name: impl Into<String>, value: SensorValue) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(MarzError::Validation(
                "sensor name cannot be empty".to_string(),
            ));
        }
        self.sensors.insert(name, value);
        Ok(())
    }

    pub fn sensor(&self, name: &str) -> Option<&SensorValue> {
        self.sensors.get(name)
    }

    pub fn has_sensor(&self, name: &str) -> bool {
        self.sensors.contains_key(name)
    }

    pub fn sensor_names(&self) -> impl Iterator<Item = &str> {
        self.sensors.keys().map(|k| k.as_str())
    }
}
