pub mod codec;

pub use codec::SequenceCodec;

use crate::types::Move;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable ordered list of moves plus a mutable read cursor.
///
/// Equality, hashing and ordering look at the moves only; the cursor is
/// replay state and two sequences with the same moves are the same key.
/// The ordering is shortest-first, then lexicographic by symbol, which is
/// the deterministic tie-break used throughout the fringe.
#[derive(Debug, Clone)]
pub struct Sequence {
    moves: Vec<Move>,
    cursor: usize,
}

impl Sequence {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves, cursor: 0 }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
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

    /// True if this sequence ends with the given sequence. Every sequence
    /// ends with itself and with the empty sequence.
    pub fn ends_with(&self, suffix: &Sequence) -> bool {
        if suffix.len() > self.len() {
            return false;
        }
        let offset = self.len() - suffix.len();
        self.moves[offset..] == suffix.moves[..]
    }

    /// Builds the child sequence produced by prepending one move. Used when
    /// a suffix node splits: each child extends the suffix one step further
    /// into the past.
    pub fn build_child(&self, mv: &Move) -> Sequence {
        let mut moves = Vec::with_capacity(self.len() + 1);
        moves.push(mv.clone());
        moves.extend_from_slice(&self.moves);
        Sequence::new(moves)
    }

    /// The first `length` moves as a new sequence.
    pub fn take(&self, length: usize) -> Sequence {
        let length = length.min(self.len());
        Sequence::new(self.moves[..length].to_vec())
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.moves.len()
    }

    /// Emits the move under the cursor and advances, or None when the
    /// sequence is exhausted.
    pub fn next(&mut self) -> Option<Move> {
        let mv = self.moves.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(mv)
    }

    /// Rewinds the cursor so the identical sequence can be replayed.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of moves already emitted.
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.moves == other.moves
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.moves.hash(state);
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.moves.cmp(&other.moves))
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.moves {
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}
