//! Circuit builder for DQC
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for plain circuits: state preparation, test fixtures,
//! and anything that does not need role bookkeeping.

use crate::circuit::Circuit;
use crate::error::{DqcError, DqcResult};
use crate::gate::Gate;
use crate::kraus::KrausChannel;
use crate::operation::Operation;
use crate::types::{Angle, ClbitId, QubitId};
use num_complex::Complex64;

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    /// Internal circuit being built
    /// Gantree: circuit: Circuit // 내부 회로
    circuit: Circuit,

    /// First rejected operation, reported by `try_build`
    error: Option<DqcError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create with a classical register `c` of `num_clbits` bits
    pub fn with_clbits(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::with_clbits(num_qubits, num_clbits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    fn push(mut self, op: impl Into<Operation>) -> Self {
        if let Err(err) = self.circuit.append(op) {
            self.error.get_or_insert(err);
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    /// Gantree: h(self, q) -> Self // H 추가
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Gate::H(qubit))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Gate::X(qubit))
    }

    /// Add Pauli-Y gate
    pub fn y(self, qubit: QubitId) -> Self {
        self.push(Gate::Y(qubit))
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: QubitId) -> Self {
        self.push(Gate::Z(qubit))
    }

    /// Add S gate
    pub fn s(self, qubit: QubitId) -> Self {
        self.push(Gate::S(qubit))
    }

    /// Add S-dagger gate
    pub fn sdg(self, qubit: QubitId) -> Self {
        self.push(Gate::Sdg(qubit))
    }

    /// Add T gate
    pub fn t(self, qubit: QubitId) -> Self {
        self.push(Gate::T(qubit))
    }

    /// Add T-dagger gate
    pub fn tdg(self, qubit: QubitId) -> Self {
        self.push(Gate::Tdg(qubit))
    }

    /// Add Rx rotation
    pub fn rx(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Gate::Rx(qubit, angle))
    }

    /// Add Ry rotation
    /// Gantree: ry(self, q, a) -> Self // Ry 추가
    pub fn ry(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Gate::Ry(qubit, angle))
    }

    /// Add Rz rotation
    pub fn rz(self, qubit: QubitId, angle: Angle) -> Self {
        self.push(Gate::Rz(qubit, angle))
    }

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================

    /// Add CNOT gate
    /// Gantree: cnot(self, c, t) -> Self // CNOT 추가
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.push(Gate::Cnot(control, target))
    }

    /// Alias for cnot
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.cnot(control, target)
    }

    /// Add CZ gate
    pub fn cz(self, control: QubitId, target: QubitId) -> Self {
        self.push(Gate::Cz(control, target))
    }

    /// Add SWAP gate
    pub fn swap(self, qubit1: QubitId, qubit2: QubitId) -> Self {
        self.push(Gate::Swap(qubit1, qubit2))
    }

    // ========================================================================
    // Measurement, Noise, and Control
    // ========================================================================

    /// Add measurement of `qubit` into `clbit`
    /// Gantree: measure(self, q, c) -> Self // 측정 추가
    pub fn measure(self, qubit: QubitId, clbit: ClbitId) -> Self {
        self.push(Operation::Measure { qubit, clbit })
    }

    /// Measure every qubit into a fresh `meas` register
    pub fn measure_all(mut self) -> Self {
        if let Err(err) = self.circuit.measure_all() {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Add barrier on all qubits
    pub fn barrier(self) -> Self {
        let qubits: Vec<QubitId> = (0..self.circuit.num_qubits()).collect();
        self.push(Operation::Barrier(qubits))
    }

    /// Add reset
    pub fn reset(self, qubit: QubitId) -> Self {
        self.push(Operation::Reset(qubit))
    }

    /// Prepare `a|0⟩ + b|1⟩` on `qubit`
    pub fn initialize(self, qubit: QubitId, amplitudes: [Complex64; 2]) -> Self {
        self.push(Operation::Initialize { qubit, amplitudes })
    }

    /// Insert a noise channel on `qubit`
    pub fn channel(self, channel: &KrausChannel, qubit: QubitId) -> Self {
        self.push(Operation::Channel {
            channel: channel.clone(),
            qubit,
        })
    }

    /// Add a block guarded on `clbit == value`
    pub fn if_test(self, clbit: ClbitId, value: bool, body: Vec<Operation>) -> Self {
        self.push(Operation::IfTest { clbit, value, body })
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, dropping any rejected operations
    /// Gantree: build(self) -> Circuit // 빌드
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build the circuit, failing with the first rejected operation
    pub fn try_build(self) -> DqcResult<Circuit> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.circuit),
        }
    }

    /// Peek at the circuit under construction
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3).h(0).cnot(0, 1).cnot(1, 2).build();

        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.gate_count(), 3);
        assert_eq!(circuit.count_2q(), 2);
    }

    #[test]
    fn test_builder_measure() {
        let circuit = CircuitBuilder::with_clbits(2, 2)
            .h(0)
            .cx(0, 1)
            .measure(0, 0)
            .measure(1, 1)
            .build();
        assert_eq!(circuit.count_measurements(), 2);
    }

    #[test]
    fn test_builder_measure_all() {
        let circuit = CircuitBuilder::new(3).h(0).measure_all().build();
        assert_eq!(circuit.count_measurements(), 3);
        assert!(circuit.register("meas").is_some());
    }

    #[test]
    fn test_try_build_reports_first_error() {
        let result = CircuitBuilder::new(2).h(0).x(5).cx(0, 0).try_build();
        assert_eq!(result.unwrap_err(), DqcError::qubit_out_of_range(5, 2));
    }

    #[test]
    fn test_build_drops_rejected_ops() {
        let circuit = CircuitBuilder::new(2).h(0).x(5).z(1).build();
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_conditional_block() {
        let circuit = CircuitBuilder::with_clbits(2, 1)
            .h(0)
            .measure(0, 0)
            .if_test(0, true, vec![Gate::X(1).into()])
            .try_build()
            .unwrap();
        assert_eq!(circuit.count_conditionals(), 1);
    }
}
