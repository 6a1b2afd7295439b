// src/simulation/results.rs

use std::collections::BTreeMap;
use std::fmt;

/// One measured joint bitstring, interpreted as an unsigned integer in
/// `[0, 2^k)` for a `k`-qubit run. Qubit 0 is the most significant bit.
///
/// Stored as big-endian 64-bit words because `k` is the candidate-path
/// count and routinely exceeds 64 on well-connected graphs. All outcomes
/// within one run share the same width, so the derived lexicographic
/// ordering is exactly numeric ordering — which is what the selector's
/// smallest-outcome tie-break relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome {
    words: Vec<u64>,
}

impl Outcome {
    /// Number of words needed for `num_qubits` bits (at least one).
    fn width(num_qubits: usize) -> usize {
        num_qubits.div_ceil(64).max(1)
    }

    /// Builds an outcome from a dense basis-state index. (Internal)
    pub(crate) fn from_basis_index(index: usize, num_qubits: usize) -> Self {
        let mut words = vec![0u64; Self::width(num_qubits)];
        let last = words.len() - 1;
        words[last] = index as u64;
        Self { words }
    }

    /// Builds an outcome from per-qubit bits, `bits[0]` being qubit 0
    /// (most significant). (Internal)
    pub(crate) fn from_bits(bits: &[bool]) -> Self {
        let mut words = vec![0u64; Self::width(bits.len())];
        let total = bits.len();
        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                // Position counted from the least significant end.
                let pos = total - 1 - i;
                let word = words.len() - 1 - pos / 64;
                words[word] |= 1u64 << (pos % 64);
            }
        }
        Self { words }
    }

    /// The outcome as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        let (last, high) = self.words.split_last()?;
        high.iter().all(|&w| w == 0).then_some(*last)
    }

    /// Reduces the outcome-integer modulo `modulus` (> 0), landing inside
    /// the valid path-index range.
    pub fn to_index(&self, modulus: usize) -> usize {
        debug_assert!(modulus > 0);
        let m = modulus as u128;
        let mut rem: u128 = 0;
        for &word in &self.words {
            rem = ((rem << 64) | word as u128) % m;
        }
        rem as usize
    }
}

impl From<u64> for Outcome {
    fn from(value: u64) -> Self {
        Self { words: vec![value] }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u64() {
            Some(value) => write!(f, "{}", value),
            None => {
                write!(f, "0x")?;
                for word in &self.words {
                    write!(f, "{:016x}", word)?;
                }
                Ok(())
            }
        }
    }
}

/// The empirical frequency table over measurement outcomes for one run.
///
/// Maps each observed outcome to its sample count; outcomes never observed
/// are simply absent. Keys iterate in ascending numeric order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutcomeHistogram {
    counts: BTreeMap<Outcome, u64>,
}

impl OutcomeHistogram {
    /// Creates a new, empty histogram. (Internal visibility)
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one observed outcome. (Internal visibility)
    pub(crate) fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// The sample count for `outcome` (0 if it was never observed).
    pub fn count(&self, outcome: impl Into<Outcome>) -> u64 {
        self.counts.get(&outcome.into()).copied().unwrap_or(0)
    }

    /// Observed `(outcome, count)` pairs in ascending outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&Outcome, u64)> {
        self.counts.iter().map(|(outcome, &count)| (outcome, count))
    }

    /// Total number of samples across all outcomes; equals the configured
    /// repetition count whenever a measurement was actually simulated.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct observed outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// `true` when no outcome was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for OutcomeHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Outcome Histogram ({} samples):", self.total())?;
        if self.counts.is_empty() {
            writeln!(f, "  (no outcomes observed)")?;
        } else {
            for (outcome, count) in &self.counts {
                writeln!(f, "  {:>6}: {}", outcome, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_packing_puts_qubit_zero_first() {
        // Qubit 0 measured 1, qubit 1 measured 0 -> integer 2.
        let outcome = Outcome::from_bits(&[true, false]);
        assert_eq!(outcome.to_u64(), Some(2));
        assert_eq!(outcome, Outcome::from_basis_index(2, 2));
    }

    #[test]
    fn wide_outcomes_order_numerically() {
        // 65-bit outcomes: the high bit lives in the first word.
        let mut high_bits = vec![false; 65];
        high_bits[0] = true; // 2^64
        let high = Outcome::from_bits(&high_bits);

        let mut low_bits = vec![false; 65];
        low_bits[64] = true; // 1
        let low = Outcome::from_bits(&low_bits);

        assert!(low < high);
        assert_eq!(high.to_u64(), None);
        assert_eq!(low.to_u64(), Some(1));
    }

    #[test]
    fn modular_reduction_matches_u64_arithmetic() {
        let outcome = Outcome::from(1234567u64);
        assert_eq!(outcome.to_index(1000), 567);

        // 2^3 = 1 (mod 7), so 2^64 = 2 (mod 7).
        let mut bits = vec![false; 65];
        bits[0] = true;
        assert_eq!(Outcome::from_bits(&bits).to_index(7), 2u128.pow(64).rem_euclid(7) as usize);
    }
}
