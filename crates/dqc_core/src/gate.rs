//! Quantum gate definitions for DQC
//!
//! Gantree: L1_Circuit → Gate
//!
//! Unitary gates used for state preparation, Bell pair generation,
//! and teleportation corrections.

use crate::kraus::{self, Matrix2};
use crate::types::{Angle, QubitId};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates (Non-Parameterized)
    // ========================================================================
    /// Hadamard gate
    /// Gantree: H(QubitId) // 하다마드
    H(QubitId),

    /// Pauli-X gate (NOT)
    /// Gantree: X(QubitId) // 파울리 X
    X(QubitId),

    /// Pauli-Y gate
    Y(QubitId),

    /// Pauli-Z gate
    /// Gantree: Z(QubitId) // 파울리 Z
    Z(QubitId),

    /// S gate (sqrt(Z))
    S(QubitId),

    /// S-dagger gate (inverse of S)
    Sdg(QubitId),

    /// T gate (fourth root of Z)
    T(QubitId),

    /// T-dagger gate (inverse of T)
    Tdg(QubitId),

    // ========================================================================
    // Single-Qubit Parameterized Rotation Gates
    // ========================================================================
    /// Rotation around X-axis
    Rx(QubitId, Angle),

    /// Rotation around Y-axis
    /// Gantree: Ry(QubitId, Angle) // Y 회전 (상태 준비)
    Ry(QubitId, Angle),

    /// Rotation around Z-axis
    Rz(QubitId, Angle),

    // ========================================================================
    // Two-Qubit Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    /// Gantree: CNOT(QubitId, QubitId) // ctrl, tgt
    Cnot(QubitId, QubitId),

    /// Controlled-Z
    Cz(QubitId, QubitId),

    /// SWAP gate
    Swap(QubitId, QubitId),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    /// Gantree: qubits(&self) -> Vec<QubitId> // 관련 큐비트
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _) => vec![*q],

            Gate::Cnot(c, t) | Gate::Cz(c, t) | Gate::Swap(c, t) => vec![*c, *t],
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        !self.is_two_qubit()
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Cz(_, _) | Gate::Swap(_, _))
    }

    /// Check if gate is parameterized
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Gate::Rx(_, _) | Gate::Ry(_, _) | Gate::Rz(_, _))
    }

    /// Rotation angle, if any
    pub fn angle(&self) -> Option<Angle> {
        match self {
            Gate::Rx(_, a) | Gate::Ry(_, a) | Gate::Rz(_, a) => Some(*a),
            _ => None,
        }
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::S(_) => "s",
            Gate::Sdg(_) => "sdg",
            Gate::T(_) => "t",
            Gate::Tdg(_) => "tdg",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::Cnot(_, _) => "cx",
            Gate::Cz(_, _) => "cz",
            Gate::Swap(_, _) => "swap",
        }
    }

    /// Unitary matrix of a single-qubit gate
    ///
    /// Returns `None` for two-qubit gates.
    pub fn matrix(&self) -> Option<Matrix2> {
        let c = |re: f64, im: f64| Complex64::new(re, im);
        let m = match self {
            Gate::H(_) => kraus::real([
                [FRAC_1_SQRT_2, FRAC_1_SQRT_2],
                [FRAC_1_SQRT_2, -FRAC_1_SQRT_2],
            ]),
            Gate::X(_) => kraus::PAULI_X,
            Gate::Y(_) => kraus::PAULI_Y,
            Gate::Z(_) => kraus::PAULI_Z,
            Gate::S(_) => [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]],
            Gate::Sdg(_) => [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, -1.0)]],
            Gate::T(_) => [
                [c(1.0, 0.0), c(0.0, 0.0)],
                [c(0.0, 0.0), c(FRAC_1_SQRT_2, FRAC_1_SQRT_2)],
            ],
            Gate::Tdg(_) => [
                [c(1.0, 0.0), c(0.0, 0.0)],
                [c(0.0, 0.0), c(FRAC_1_SQRT_2, -FRAC_1_SQRT_2)],
            ],
            Gate::Rx(_, theta) => {
                let (s, co) = (theta / 2.0).sin_cos();
                [[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
            }
            Gate::Ry(_, theta) => kraus::real({
                let (s, co) = (theta / 2.0).sin_cos();
                [[co, -s], [s, co]]
            }),
            Gate::Rz(_, theta) => [
                [Complex64::from_polar(1.0, -theta / 2.0), c(0.0, 0.0)],
                [c(0.0, 0.0), Complex64::from_polar(1.0, theta / 2.0)],
            ],
            Gate::Cnot(_, _) | Gate::Cz(_, _) | Gate::Swap(_, _) => return None,
        };
        Some(m)
    }

    /// Convert to OpenQASM 3 statement
    /// Gantree: to_qasm(&self) -> String // QASM 변환
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::Rx(q, theta) | Gate::Ry(q, theta) | Gate::Rz(q, theta) => {
                format!("{}({}) q[{}];", self.name(), theta, q)
            }
            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => {
                format!("{} q[{}], q[{}];", self.name(), a, b)
            }
            _ => format!("{} q[{}];", self.name(), self.qubits()[0]),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kraus::{dagger, matmul, IDENTITY};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn assert_unitary(m: &Matrix2) {
        let prod = matmul(&dagger(m), m);
        for i in 0..2 {
            for j in 0..2 {
                assert_abs_diff_eq!((prod[i][j] - IDENTITY[i][j]).norm(), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::H(0).qubits(), vec![0]);
        assert_eq!(Gate::Cnot(0, 1).qubits(), vec![0, 1]);
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::H(0).is_single_qubit());
        assert!(!Gate::H(0).is_two_qubit());
        assert!(Gate::Cnot(0, 1).is_two_qubit());
        assert!(Gate::Ry(0, 1.0).is_parameterized());
        assert_eq!(Gate::Ry(0, 1.0).angle(), Some(1.0));
        assert_eq!(Gate::H(0).angle(), None);
    }

    #[test]
    fn test_gate_to_qasm() {
        assert_eq!(Gate::H(0).to_qasm(), "h q[0];");
        assert_eq!(Gate::Cnot(0, 1).to_qasm(), "cx q[0], q[1];");
        assert_eq!(Gate::Ry(2, 0.5).to_qasm(), "ry(0.5) q[2];");
    }

    #[test]
    fn test_single_qubit_matrices_unitary() {
        let gates = [
            Gate::H(0),
            Gate::X(0),
            Gate::Y(0),
            Gate::Z(0),
            Gate::S(0),
            Gate::Sdg(0),
            Gate::T(0),
            Gate::Tdg(0),
            Gate::Rx(0, 0.3),
            Gate::Ry(0, 1.1),
            Gate::Rz(0, PI / 3.0),
        ];
        for gate in &gates {
            assert_unitary(&gate.matrix().unwrap());
        }
        assert!(Gate::Cnot(0, 1).matrix().is_none());
    }

    #[test]
    fn test_ry_pi_flips() {
        let m = Gate::Ry(0, PI).matrix().unwrap();
        // |0⟩ -> |1⟩
        assert_abs_diff_eq!(m[0][0].norm(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m[1][0].re, 1.0, epsilon = 1e-12);
    }
}
