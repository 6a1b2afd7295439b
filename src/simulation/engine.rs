// src/simulation/engine.rs

use crate::circuits::Operation;
use crate::core::{QubitId, RouteError, StateVector};
use crate::simulation::results::Outcome;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Dense-statevector bound. The joint state holds `2^k` amplitudes, so 20
/// qubits already cost 16 MiB; beyond this the backend switches to the
/// factored per-qubit sampler, which is exact here because the encoder
/// emits single-qubit gates only and the joint state stays a product
/// state.
pub(crate) const MAX_DENSE_QUBITS: usize = 20;

/// Maps sorted qubit ids to indices 0..N-1. Qubit index 0 is the most
/// significant bit of an outcome integer.
fn index_qubits(qubit_ids: &HashSet<QubitId>) -> Result<HashMap<QubitId, usize>, RouteError> {
    if qubit_ids.is_empty() {
        return Err(RouteError::NoPaths);
    }
    // Sort ids so index assignment is deterministic regardless of HashSet
    // iteration order.
    let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
    sorted_ids.sort();
    let mut qubit_indices = HashMap::with_capacity(sorted_ids.len());
    for (index, qubit_id) in sorted_ids.into_iter().enumerate() {
        qubit_indices.insert(qubit_id, index);
    }
    Ok(qubit_indices)
}

fn lookup_index(
    qubit_indices: &HashMap<QubitId, usize>,
    qubit_id: &QubitId,
) -> Result<usize, RouteError> {
    qubit_indices
        .get(qubit_id)
        .copied()
        .ok_or_else(|| RouteError::InvalidOperation {
            message: format!("{qubit_id} not found in simulation context"),
        })
}

/// The simulation backend for one run, picked by qubit count.
pub(crate) enum Backend {
    Dense(SimulationEngine),
    Factored(ProductEngine),
}

impl Backend {
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, RouteError> {
        if qubit_ids.len() <= MAX_DENSE_QUBITS {
            Ok(Backend::Dense(SimulationEngine::init(qubit_ids)?))
        } else {
            Ok(Backend::Factored(ProductEngine::init(qubit_ids)?))
        }
    }

    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), RouteError> {
        match self {
            Backend::Dense(engine) => engine.apply_operation(op),
            Backend::Factored(engine) => engine.apply_operation(op),
        }
    }

    pub(crate) fn sample_outcome<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        match self {
            Backend::Dense(engine) => engine.sample_outcome(rng),
            Backend::Factored(engine) => engine.sample_outcome(rng),
        }
    }
}

/// The dense statevector engine: owns the joint amplitude vector for one
/// run and applies single-qubit gates to it. (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their index (0..N-1) in the sorted order used for
    /// the joint state vector.
    qubit_indices: HashMap<QubitId, usize>,
    /// The joint state over all qubits, dimension `2^N`.
    state: StateVector,
    /// Number of qubits being simulated (N).
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine for a set of qubits in the all-zero basis
    /// state |0…0⟩. An empty qubit set means the run has zero candidate
    /// paths and fails fast with `NoPaths`.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, RouteError> {
        let qubit_indices = index_qubits(qubit_ids)?;
        let num_qubits = qubit_indices.len();

        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or_else(|| RouteError::SimulationError {
                message: "state vector dimension overflows usize".to_string(),
            })?;

        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::new(1.0, 0.0);

        Ok(Self {
            qubit_indices,
            state: StateVector::new(initial_vec),
            num_qubits,
        })
    }

    // Crate-visible state override for engine-level tests.
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), RouteError> {
        if state.dim() != self.state.dim() {
            Err(RouteError::SimulationError {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// Read access to the current joint state.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies a single unitary operation to the joint state. `Measure` is
    /// not a unitary and must be handled by the simulator, not here.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), RouteError> {
        let (target, matrix) = unitary_of(op)?;
        let target_idx = lookup_index(&self.qubit_indices, &target)?;
        self.apply_single_qubit_gate(target_idx, &matrix);
        Ok(())
    }

    /// Draws one measurement outcome from the current joint state under
    /// the Born rule, without collapsing it: repetitions are independent
    /// measurements of identically prepared states, so the vector is left
    /// untouched between draws.
    pub(crate) fn sample_outcome<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let vector = self.state.vector();
        let total: f64 = vector.iter().map(|c| c.norm_sqr()).sum();
        // Scale by the actual norm so slightly denormalized states still
        // sample sensibly.
        let p_sample = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        for (k, amplitude) in vector.iter().enumerate() {
            cumulative += amplitude.norm_sqr();
            if p_sample < cumulative {
                return Outcome::from_basis_index(k, self.num_qubits);
            }
        }
        // Floating-point slack at the top of the scan: fall back to the
        // last basis state with non-negligible probability.
        let k = vector
            .iter()
            .rposition(|c| c.norm_sqr() > 1e-12)
            .unwrap_or(0);
        Outcome::from_basis_index(k, self.num_qubits)
    }

    /// Applies a 2x2 matrix to one qubit of the joint state, pairing the
    /// basis states that differ only at that qubit's bit position.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k = self.num_qubits - 1 - target_idx; // bit position, from the right
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;

        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        for i in 0..dim / 2 {
            // Spread the compressed index around the target bit position:
            // bits below k stay, bits at or above k shift left by one.
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = self.state.vector()[i0];
            let psi_1 = self.state.vector()[i1];

            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state = StateVector::new(new_vec);
    }
}

/// The factored engine for runs whose path count exceeds the dense bound:
/// keeps one two-amplitude state per qubit instead of `2^k` joint
/// amplitudes. Exact for this pipeline because every circuit operation is
/// a single-qubit gate, so the joint state never entangles.
pub(crate) struct ProductEngine {
    qubit_indices: HashMap<QubitId, usize>,
    /// Per-qubit `(|0⟩, |1⟩)` amplitudes, indexed by qubit index.
    locals: Vec<[Complex<f64>; 2]>,
}

impl ProductEngine {
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, RouteError> {
        let qubit_indices = index_qubits(qubit_ids)?;
        let locals = vec![[Complex::new(1.0, 0.0), Complex::zero()]; qubit_indices.len()];
        Ok(Self {
            qubit_indices,
            locals,
        })
    }

    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), RouteError> {
        let (target, matrix) = unitary_of(op)?;
        let target_idx = lookup_index(&self.qubit_indices, &target)?;
        let [psi_0, psi_1] = self.locals[target_idx];
        self.locals[target_idx] = [
            matrix[0][0] * psi_0 + matrix[0][1] * psi_1,
            matrix[1][0] * psi_0 + matrix[1][1] * psi_1,
        ];
        Ok(())
    }

    /// Samples each qubit's bit independently (legitimate for a product
    /// state) and packs the bits into one joint outcome.
    pub(crate) fn sample_outcome<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let bits: Vec<bool> = self
            .locals
            .iter()
            .map(|[c0, c1]| {
                let n0 = c0.norm_sqr();
                let n1 = c1.norm_sqr();
                rng.random::<f64>() * (n0 + n1) >= n0
            })
            .collect();
        Outcome::from_bits(&bits)
    }
}

/// The 2x2 matrix of a unitary operation and its target qubit. `Measure`
/// is rejected; it is the simulator's responsibility.
fn unitary_of(op: &Operation) -> Result<(QubitId, [[Complex<f64>; 2]; 2]), RouteError> {
    match op {
        Operation::Superposition { target } => Ok((*target, hadamard_matrix())),
        Operation::PhaseRotation { target, theta } => Ok((*target, rz_matrix(*theta))),
        Operation::AmplitudeRotation { target, theta } => Ok((*target, ry_matrix(*theta))),
        Operation::Measure { .. } => Err(RouteError::InvalidOperation {
            message: "Measure must not be passed directly to apply_operation".to_string(),
        }),
    }
}

/// Hadamard: equal superposition transform.
fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;
    [
        [Complex::new(H, 0.0), Complex::new(H, 0.0)],
        [Complex::new(H, 0.0), Complex::new(-H, 0.0)],
    ]
}

/// Rz(θ) in the half-angle form `diag(e^{-iθ/2}, e^{iθ/2})`, i.e. the
/// pure diagonal phase gate `exp(-iθ/2)·diag(1, e^{iθ})`.
fn rz_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::from_polar(1.0, -theta / 2.0), Complex::zero()],
        [Complex::zero(), Complex::from_polar(1.0, theta / 2.0)],
    ]
}

/// Ry(θ): real rotation mixing the |0⟩ and |1⟩ amplitudes.
fn ry_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let half = theta / 2.0;
    let (sin_h, cos_h) = half.sin_cos();
    [
        [Complex::new(cos_h, 0.0), Complex::new(-sin_h, 0.0)],
        [Complex::new(sin_h, 0.0), Complex::new(cos_h, 0.0)],
    ]
}
