// src/simulation/mod.rs

//! Simulates route-selection circuits: evolves the joint state through the
//! encoded gate sequence, then samples repeated joint measurements into an
//! `OutcomeHistogram`.
//!
//! Runs of up to 20 qubits use a dense `2^k` statevector; larger runs
//! switch to an exact factored sampler (the encoder emits single-qubit
//! gates only, so the joint state is always a product state).

mod results;
pub(crate) mod engine;

pub use results::{Outcome, OutcomeHistogram};

use crate::circuits::{Circuit, Operation};
use crate::core::RouteError;
use engine::Backend;
use rand::Rng;

/// Number of measurement repetitions per run unless configured otherwise.
pub const DEFAULT_REPETITIONS: usize = 100;

/// Simulates a circuit and aggregates repeated joint measurements.
///
/// The measurement randomness is an explicit `Rng` handed to [`run`],
/// separate from the scorer's perturbation randomness, so either layer can
/// be seeded independently in tests.
///
/// [`run`]: Simulator::run
pub struct Simulator {
    repetitions: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl Simulator {
    /// Creates a simulator with the default repetition count (100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator taking `repetitions` samples per measurement.
    /// A count of 0 is permitted here but yields an empty histogram, which
    /// the selector rejects downstream.
    pub fn with_repetitions(repetitions: usize) -> Self {
        Self { repetitions }
    }

    /// The configured repetition count.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Runs the circuit and returns the histogram of sampled outcomes.
    ///
    /// Unitary operations are applied in sequence; on the terminal
    /// `Measure`, the final state is sampled `repetitions` times under the
    /// Born rule, each draw independent (no collapse between draws, since
    /// every repetition measures an identically prepared state).
    ///
    /// Fails with `NoPaths` for a circuit over zero qubits and with
    /// `InvalidOperation` if operations follow a measurement.
    pub fn run<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> Result<OutcomeHistogram, RouteError> {
        let mut backend = Backend::init(circuit.qubits())?;
        let mut histogram = OutcomeHistogram::new();
        let mut measured = false;

        for op in circuit.operations() {
            if measured {
                return Err(RouteError::InvalidOperation {
                    message: format!("operation after terminal measurement: {op}"),
                });
            }
            match op {
                Operation::Measure { .. } => {
                    for _ in 0..self.repetitions {
                        histogram.record(backend.sample_outcome(rng));
                    }
                    measured = true;
                }
                _ => backend.apply_operation(op)?,
            }
        }

        Ok(histogram)
    }
}
