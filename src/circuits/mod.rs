// src/circuits/mod.rs

//! Circuit representation and the path-score encoder.
//!
//! A `Circuit` is an ordered operation sequence over a set of qubits, one
//! qubit per candidate path. `encode_scores` builds the fixed pipeline
//! shape: equal superposition on every qubit, one score-parameterized
//! rotation per qubit, then a joint terminal measurement.

use crate::core::QubitId;
use std::collections::HashSet;
use std::fmt;

/// Which single-qubit rotation carries a path's score into the state.
///
/// The default imprints the score as a pure relative phase (`Phase`, an
/// Rz gate). A Z-rotation leaves computational-basis marginals of an
/// unentangled equal superposition unchanged, so under `Phase` the
/// selection signal is sampling noise alone; that property is documented
/// here rather than silently corrected. `Amplitude` (an Ry gate) is the
/// alternative that actually biases measurement probabilities by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationAxis {
    /// Rz: `diag(e^{-iθ/2}, e^{iθ/2})`, the default encoding.
    #[default]
    Phase,
    /// Ry: real-valued rotation mixing |0⟩ and |1⟩ amplitudes.
    Amplitude,
}

/// A single step in a route-selection circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Puts the target qubit into equal superposition `(|0⟩+|1⟩)/√2`
    /// (Hadamard), making the prior over outcomes uniform before any path
    /// information is applied.
    Superposition {
        /// The qubit to transform.
        target: QubitId,
    },

    /// Z-axis rotation by `theta` radians: imprints a path's cumulative
    /// weight into the qubit's relative phase without changing its
    /// computational-basis marginals.
    PhaseRotation {
        /// The qubit whose phase is rotated.
        target: QubitId,
        /// Rotation angle in radians; a perturbed path score is used
        /// directly as the angle.
        theta: f64,
    },

    /// Y-axis rotation by `theta` radians: the amplitude-biasing
    /// alternative encoding (see `RotationAxis`).
    AmplitudeRotation {
        /// The qubit whose amplitudes are rotated.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Joint computational-basis measurement of `targets`, repeated by the
    /// simulator for its configured repetition count. Terminal: nothing
    /// may follow it.
    Measure {
        /// The qubits to measure.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// All qubit ids mentioned in the operation's parameters.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Superposition { target } => vec![*target],
            Operation::PhaseRotation { target, .. } => vec![*target],
            Operation::AmplitudeRotation { target, .. } => vec![*target],
            Operation::Measure { targets } => targets.clone(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Superposition { target } => write!(f, "H {}", target),
            Operation::PhaseRotation { target, theta } => {
                write!(f, "Rz({:.4}) {}", theta, target)
            }
            Operation::AmplitudeRotation { target, theta } => {
                write!(f, "Ry({:.4}) {}", theta, target)
            }
            Operation::Measure { targets } => {
                write!(f, "M [")?;
                for (i, t) in targets.iter().enumerate() {
                    write!(f, "{}{}", if i > 0 { ", " } else { "" }, t)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An ordered sequence of operations applied to a set of qubits.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    /// The unique set of qubits involved across all operations.
    qubits: HashSet<QubitId>,
    /// The ordered operation sequence; order is the execution order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation, registering any qubits it mentions.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit_id in op.involved_qubits() {
            self.qubits.insert(qubit_id);
        }
        self.operations.push(op);
    }

    /// Appends every operation from an iterator in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The unique qubit ids involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// The ordered operation sequence.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "qroute::Circuit[{} operations on {} qubits]",
            self.operations.len(),
            self.qubits.len()
        )?;
        for (i, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:>3}: {}", i, op)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A helper for programmatically constructing `Circuit` instances using
/// method chaining.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes construction and returns the built circuit.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

/// Encodes one run's perturbed path scores into a circuit: qubit `i`
/// carries path `i`. Every qubit is put into equal superposition, rotated
/// about the configured axis by its path's score (radians), then all
/// qubits are measured jointly.
///
/// An empty score slice yields an empty circuit; the simulator rejects it
/// as a zero-path run.
pub fn encode_scores(scores: &[f64], axis: RotationAxis) -> Circuit {
    let mut builder = CircuitBuilder::new();
    let qubit_ids: Vec<QubitId> = (0..scores.len()).map(|i| QubitId(i as u64)).collect();

    for &id in &qubit_ids {
        builder = builder.add_op(Operation::Superposition { target: id });
    }
    for (&id, &theta) in qubit_ids.iter().zip(scores) {
        let rotation = match axis {
            RotationAxis::Phase => Operation::PhaseRotation { target: id, theta },
            RotationAxis::Amplitude => Operation::AmplitudeRotation { target: id, theta },
        };
        builder = builder.add_op(rotation);
    }
    if !qubit_ids.is_empty() {
        builder = builder.add_op(Operation::Measure { targets: qubit_ids });
    }
    builder.build()
}
