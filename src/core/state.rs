// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// The joint quantum state of one run's path qubits.
///
/// A complex amplitude vector over `2^k` computational basis states, where
/// `k` is the number of candidate paths. Constructed fresh per run from the
/// perturbed path scores, consumed by measurement sampling, then discarded.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    /// Amplitudes indexed by basis state. Qubit 0 occupies the most
    /// significant bit of the index, matching the order in which outcomes
    /// are reported as integers.
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a state vector from raw amplitudes. Callers are responsible
    /// for handing in a vector of power-of-two length; normalization is
    /// checked during simulation, not here.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Provides read-only access to the amplitude vector.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of basis states represented (`2^k` for `k` qubits).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Measurement probability of basis state `k` under the Born rule.
    pub fn probability(&self, k: usize) -> f64 {
        self.amplitudes.get(k).map(|c| c.norm_sqr()).unwrap_or(0.0)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
