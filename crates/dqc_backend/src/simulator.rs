//! Simulator backend for DQC
//!
//! Gantree: L3_Backend → SimulatorBackend
//!
//! Per-shot state-vector trajectory simulator. Each shot walks the
//! operation sequence once: measurements collapse the state and write the
//! shot's classical bits, noise channels pick one Kraus operator with
//! probability ‖Kψ‖², and conditional blocks read the bits written so far.

use crate::config::{SimulatorConfig, MAX_SIMULATED_QUBITS};
use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use dqc_core::kraus::PAULI_X;
use dqc_core::{Circuit, Counts, DqcError, DqcResult, Gate, KrausChannel, Matrix2, Operation};
use num_complex::Complex64;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::Instant;

/// Simulator backend
/// Gantree: SimulatorBackend // 시뮬레이터 구현
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Number of qubits
    num_qubits: usize,

    /// Random seed
    seed: Option<u64>,

    /// Shots used by `run`
    shots: u64,

    /// Upper bound on shots per execution
    max_shots: u64,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new simulator backend
    pub fn new(num_qubits: usize) -> Self {
        let defaults = SimulatorConfig::default();
        Self {
            name: "dqc_simulator".to_string(),
            num_qubits,
            seed: None,
            shots: defaults.shots,
            max_shots: defaults.max_shots,
        }
    }

    /// Create simulator without backend-level noise
    ///
    /// Link noise lives in the circuit as channel operations, so this is
    /// the usual entry point.
    pub fn ideal(num_qubits: usize) -> Self {
        Self::new(num_qubits)
    }

    /// Create from a validated configuration
    /// Gantree: from_config(&SimulatorConfig) -> Result<Self> // 설정 기반 생성
    pub fn from_config(config: &SimulatorConfig) -> DqcResult<Self> {
        config.validate()?;
        let mut backend = Self::new(config.num_qubits)
            .with_shots(config.shots)
            .with_max_shots(config.max_shots);
        backend.seed = config.seed;
        Ok(backend)
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set shots used by `run`
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set maximum shots per execution
    pub fn with_max_shots(mut self, max_shots: u64) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Execute with the configured shot count
    pub fn run(&self, circuit: &Circuit) -> DqcResult<ExecutionResult> {
        self.execute(circuit, self.shots)
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Simulate circuit and return counts
    fn simulate(&self, circuit: &Circuit, shots: u64, rng: &mut StdRng) -> Counts {
        let mut counts: Counts = HashMap::new();

        for shot in 0..shots {
            let bitstring = self.simulate_single_shot(circuit, rng);
            log::trace!("shot {} -> {}", shot, bitstring);
            *counts.entry(bitstring).or_insert(0) += 1;
        }

        counts
    }

    /// Simulate a single shot
    fn simulate_single_shot(&self, circuit: &Circuit, rng: &mut StdRng) -> String {
        let mut shot = Trajectory::new(circuit.num_qubits(), circuit.num_clbits());

        for op in circuit.ops() {
            shot.apply(op, rng);
        }

        if circuit.num_clbits() == 0 {
            shot.sample_all(rng)
        } else {
            shot.clbit_string()
        }
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> DqcResult<ExecutionResult> {
        if circuit.num_qubits() > self.num_qubits {
            return Err(DqcError::qubit_out_of_range(
                circuit.num_qubits() - 1,
                self.num_qubits,
            ));
        }

        if circuit.num_qubits() > MAX_SIMULATED_QUBITS {
            return Err(DqcError::BackendError(format!(
                "state vector for {} qubits exceeds the {}-qubit limit",
                circuit.num_qubits(),
                MAX_SIMULATED_QUBITS
            )));
        }

        if shots == 0 || shots > self.max_shots {
            return Err(DqcError::ShotsOutOfRange(shots, 1, self.max_shots));
        }

        circuit.validate()?;

        log::debug!(
            "{}: executing {} ops on {} qubits for {} shots",
            self.name,
            circuit.gate_count(),
            circuit.num_qubits(),
            shots
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let started = Instant::now();
        let counts = self.simulate(circuit, shots, &mut rng);

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                execution_time_ms: Some(started.elapsed().as_millis() as u64),
                simulated: true,
                seed: self.seed,
                ..Default::default()
            },
        })
    }

    fn is_simulator(&self) -> bool {
        true
    }

    fn max_shots(&self) -> u64 {
        self.max_shots
    }
}

// ============================================================================
// Trajectory
// ============================================================================

/// State of one shot: amplitudes plus the classical bits written so far
struct Trajectory {
    state: Vec<Complex64>,
    n: usize,
    clbits: Vec<bool>,
}

impl Trajectory {
    fn new(num_qubits: usize, num_clbits: usize) -> Self {
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        state[0] = Complex64::new(1.0, 0.0); // |00...0⟩
        Self {
            state,
            n: num_qubits,
            clbits: vec![false; num_clbits],
        }
    }

    fn apply(&mut self, op: &Operation, rng: &mut StdRng) {
        match op {
            Operation::Gate(gate) => self.apply_gate(gate),
            Operation::Measure { qubit, clbit } => {
                let outcome = self.measure(*qubit, rng);
                self.clbits[*clbit] = outcome;
            }
            Operation::Reset(q) => self.reset(*q, rng),
            Operation::Initialize { qubit, amplitudes } => {
                self.reset(*qubit, rng);
                let [a, b] = *amplitudes;
                // Unitary whose first column is (a, b)
                let prep: Matrix2 = [[a, -b.conj()], [b, a.conj()]];
                self.apply_matrix(*qubit, &prep);
            }
            Operation::Barrier(_) => {}
            Operation::Channel { channel, qubit } => self.apply_channel(channel, *qubit, rng),
            Operation::IfTest { clbit, value, body } => {
                if self.clbits[*clbit] == *value {
                    for inner in body {
                        self.apply(inner, rng);
                    }
                }
            }
        }
    }

    // ========================================================================
    // Gates
    // ========================================================================

    fn apply_gate(&mut self, gate: &Gate) {
        match gate {
            Gate::Cnot(c, t) => self.apply_cnot(*c, *t),
            Gate::Cz(c, t) => self.apply_cz(*c, *t),
            Gate::Swap(q1, q2) => self.apply_swap(*q1, *q2),
            single => {
                if let (Some(m), Some(&q)) = (single.matrix(), single.qubits().first()) {
                    self.apply_matrix(q, &m);
                }
            }
        }
    }

    fn apply_matrix(&mut self, q: usize, m: &Matrix2) {
        self.apply_single_qubit_gate(q, |a, b| {
            (m[0][0] * a + m[0][1] * b, m[1][0] * a + m[1][1] * b)
        });
    }

    fn apply_single_qubit_gate<F>(&mut self, q: usize, f: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
    {
        let mask = 1 << q;
        for i in 0..(1 << self.n) {
            if i & mask == 0 {
                let j = i | mask;
                let (new_i, new_j) = f(self.state[i], self.state[j]);
                self.state[i] = new_i;
                self.state[j] = new_j;
            }
        }
    }

    fn apply_cnot(&mut self, control: usize, target: usize) {
        let control_mask = 1 << control;
        let target_mask = 1 << target;

        for i in 0..(1 << self.n) {
            if (i & control_mask) != 0 && (i & target_mask) == 0 {
                self.state.swap(i, i | target_mask);
            }
        }
    }

    fn apply_cz(&mut self, q1: usize, q2: usize) {
        let mask = (1 << q1) | (1 << q2);
        for (i, amp) in self.state.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;

        for i in 0..(1 << self.n) {
            if (i & mask1) != 0 && (i & mask2) == 0 {
                self.state.swap(i, i ^ mask1 ^ mask2);
            }
        }
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Probability that `q` reads 1
    fn prob_one(&self, q: usize) -> f64 {
        let mask = 1 << q;
        self.state
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Z-basis measurement with collapse
    fn measure(&mut self, q: usize, rng: &mut StdRng) -> bool {
        let p1 = self.prob_one(q).clamp(0.0, 1.0);
        let outcome = rng.gen::<f64>() < p1;
        let kept = if outcome { p1 } else { 1.0 - p1 };
        let norm = kept.sqrt();
        let mask = 1 << q;

        for (i, amp) in self.state.iter_mut().enumerate() {
            if ((i & mask) != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }

        outcome
    }

    fn reset(&mut self, q: usize, rng: &mut StdRng) {
        if self.measure(q, rng) {
            self.apply_matrix(q, &PAULI_X);
        }
    }

    // ========================================================================
    // Noise
    // ========================================================================

    /// Apply one Kraus operator, chosen with probability ‖Kψ‖²
    fn apply_channel(&mut self, channel: &KrausChannel, q: usize, rng: &mut StdRng) {
        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        let mut fallback: Option<(Vec<Complex64>, f64)> = None;

        for k in channel.operators() {
            let mut branch = Trajectory {
                state: self.state.clone(),
                n: self.n,
                clbits: Vec::new(),
            };
            branch.apply_matrix(q, k);
            let weight: f64 = branch.state.iter().map(|a| a.norm_sqr()).sum();
            if weight <= f64::EPSILON {
                continue;
            }

            cumsum += weight;
            if r < cumsum {
                self.set_normalized(branch.state, weight);
                return;
            }
            fallback = Some((branch.state, weight));
        }

        // Rounding left r just above the accumulated weight
        if let Some((state, weight)) = fallback {
            self.set_normalized(state, weight);
        }
    }

    fn set_normalized(&mut self, state: Vec<Complex64>, weight: f64) {
        let norm = weight.sqrt();
        self.state = state.into_iter().map(|a| a / norm).collect();
    }

    // ========================================================================
    // Readout
    // ========================================================================

    /// Classical bits as a key, highest index leftmost
    fn clbit_string(&self) -> String {
        self.clbits
            .iter()
            .rev()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }

    /// Sample every qubit at once, qubit 0 rightmost
    fn sample_all(&self, rng: &mut StdRng) -> String {
        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        let mut outcome = self.state.len() - 1;

        for (i, amp) in self.state.iter().enumerate() {
            cumsum += amp.norm_sqr();
            if r < cumsum {
                outcome = i;
                break;
            }
        }

        if self.n == 0 {
            return String::new();
        }
        format!("{:0width$b}", outcome, width = self.n)
    }
}

// ============================================================================
// Tests
// ============================================================================
