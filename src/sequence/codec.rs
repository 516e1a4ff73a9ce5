use crate::error::{MarzError, Result};
use crate::sequence::Sequence;
use crate::types::Alphabet;

/// Bijective mapping between positive integers and finite move sequences.
///
/// Index 1 maps to the first single-move sequence; all `k^L` sequences of
/// length L form one contiguous block immediately after the sequences of
/// length L-1, in alphabet order. This is "bijective base-k" numbering,
/// which gives the agent its key property: indices of sequences ending
/// with a fixed suffix of length L are spaced exactly `k^L` apart, and the
/// smallest of them is `encode(suffix)`.
#[derive(Debug, Clone)]
pub struct SequenceCodec {
    alphabet: Alphabet,
}

impl SequenceCodec {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Decodes a canonical permutation index into its sequence.
    ///
    /// An index of zero is a caller error. With an empty alphabet the only
    /// enumerable sequence is the empty one.
    pub fn decode(&self, index: u64) -> Result<Sequence> {
        if index == 0 {
            return Err(MarzError::Validation(
                "permutation index must be positive".to_string(),
            ));
        }
        if self.alphabet.is_empty() {
            return Ok(Sequence::empty());
        }

        let k = self.alphabet.len() as u64;
        let mut remaining = index;
        let mut moves = Vec::new();
        while remaining > 0 {
            remaining -= 1;
            let digit = (remaining % k) as usize;
            // Unwrap-free: digit < k by construction.
            if let Some(mv) = self.alphabet.get(digit) {
                moves.insert(0, mv.clone());
            }
            remaining /= k;
        }
        Ok(Sequence::new(moves))
    }

    /// Encodes a sequence back to its canonical permutation index.
    ///
    /// A move outside the alphabet is a caller error; an index that no
    /// longer fits in the counter is an unrecoverable overflow.
    pub fn encode(&self, sequence: &Sequence) -> Result<u64> {
        let k = self.alphabet.len() as u64;
        let mut total: u64 = 0;
        for (i, mv) in sequence.moves().iter().rev().enumerate() {
            let digit = self.alphabet.position(mv).ok_or_else(|| {
                MarzError::Validation(format!("move '{}' is not in the alphabet", mv))
            })? as u64;
            let term = u32::try_from(i)
                .ok()
                .and_then(|i| k.checked_pow(i))
                .and_then(|place| place.checked_mul(digit + 1))
                .ok_or_else(|| overflow_error(sequence))?;
            total = total
                .checked_add(term)
                .ok_or_else(|| overflow_error(sequence))?;
        }
        Ok(total)
    }
}

fn overflow_error(sequence: &Sequence) -> MarzError {
    MarzError::Invariant(format!(
        "canonical index overflow encoding sequence '{}'",
        sequence
    ))
}
