//! Circuit operations for DQC
//!
//! Gantree: L1_Circuit → Operation
//!
//! Everything a circuit can hold: unitary gates, measurements, resets,
//! state initialization, noise channels, and classically conditioned blocks.

use crate::gate::Gate;
use crate::kraus::KrausChannel;
use crate::types::{ClbitId, QubitId};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the append-only operation sequence
/// Gantree: Operation // 연산 enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Unitary gate
    /// Gantree: Gate(Gate) // 게이트
    Gate(Gate),

    /// Z-basis measurement of `qubit` into `clbit`
    /// Gantree: Measure{{qubit,clbit}} // 측정
    Measure {
        /// Measured qubit
        qubit: QubitId,
        /// Destination classical bit
        clbit: ClbitId,
    },

    /// Reset qubit to |0⟩
    Reset(QubitId),

    /// Reset `qubit` and prepare `a|0⟩ + b|1⟩`
    Initialize {
        /// Prepared qubit
        qubit: QubitId,
        /// Amplitudes `[a, b]`
        amplitudes: [Complex64; 2],
    },

    /// Barrier (no state change)
    Barrier(Vec<QubitId>),

    /// Noise channel applied to one qubit
    /// Gantree: Channel{{channel,qubit}} // 노이즈 삽입
    Channel {
        /// Kraus operators
        channel: KrausChannel,
        /// Target qubit
        qubit: QubitId,
    },

    /// Block executed only when `clbit == value` at run time
    /// Gantree: IfTest{{clbit,value,body}} // 조건부 블록
    IfTest {
        /// Classical bit tested
        clbit: ClbitId,
        /// Required value
        value: bool,
        /// Guarded operations
        body: Vec<Operation>,
    },
}

impl Operation {
    /// Qubits touched by this operation (nested blocks included)
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Gate(gate) => gate.qubits(),
            Operation::Measure { qubit, .. }
            | Operation::Reset(qubit)
            | Operation::Initialize { qubit, .. }
            | Operation::Channel { qubit, .. } => vec![*qubit],
            Operation::Barrier(qs) => qs.clone(),
            Operation::IfTest { body, .. } => body.iter().flat_map(|op| op.qubits()).collect(),
        }
    }

    /// Classical bits read or written by this operation (nested blocks included)
    pub fn clbits(&self) -> Vec<ClbitId> {
        match self {
            Operation::Measure { clbit, .. } => vec![*clbit],
            Operation::IfTest { clbit, body, .. } => {
                let mut bits = vec![*clbit];
                bits.extend(body.iter().flat_map(|op| op.clbits()));
                bits
            }
            _ => vec![],
        }
    }

    /// Check if operation is a unitary gate
    pub fn is_gate(&self) -> bool {
        matches!(self, Operation::Gate(_))
    }

    /// Check if operation is a measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }

    /// Check if operation is a noise channel
    pub fn is_channel(&self) -> bool {
        matches!(self, Operation::Channel { .. })
    }

    /// Check if operation is a conditional block
    pub fn is_conditional(&self) -> bool {
        matches!(self, Operation::IfTest { .. })
    }

    /// Check if operation is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Operation::Barrier(_))
    }

    /// OpenQASM 3 lines for this operation, indented by `indent` levels
    pub fn to_qasm_lines(&self, indent: usize) -> Vec<String> {
        let pad = "  ".repeat(indent);
        match self {
            Operation::Gate(gate) => vec![format!("{}{}", pad, gate.to_qasm())],
            Operation::Measure { qubit, clbit } => {
                vec![format!("{}c[{}] = measure q[{}];", pad, clbit, qubit)]
            }
            Operation::Reset(q) => vec![format!("{}reset q[{}];", pad, q)],
            Operation::Initialize { qubit, amplitudes } => vec![format!(
                "{}// initialize q[{}] = ({})|0> + ({})|1>",
                pad, qubit, amplitudes[0], amplitudes[1]
            )],
            Operation::Barrier(qs) => {
                if qs.is_empty() {
                    vec![format!("{}barrier q;", pad)]
                } else {
                    let qubits: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                    vec![format!("{}barrier {};", pad, qubits.join(", "))]
                }
            }
            Operation::Channel { channel, qubit } => {
                vec![format!("{}// {} q[{}]", pad, channel, qubit)]
            }
            Operation::IfTest { clbit, value, body } => {
                let mut lines = vec![format!(
                    "{}if (c[{}] == {}) {{",
                    pad,
                    clbit,
                    u8::from(*value)
                )];
                for op in body {
                    lines.extend(op.to_qasm_lines(indent + 1));
                }
                lines.push(format!("{}}}", pad));
                lines
            }
        }
    }
}

impl From<Gate> for Operation {
    fn from(gate: Gate) -> Self {
        Operation::Gate(gate)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm_lines(0).join("\n"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kraus::PAULI_X;

    #[test]
    fn test_operation_qubits() {
        assert_eq!(Operation::from(Gate::Cnot(1, 2)).qubits(), vec![1, 2]);
        assert_eq!(Operation::Measure { qubit: 3, clbit: 0 }.qubits(), vec![3]);

        let cond = Operation::IfTest {
            clbit: 1,
            value: true,
            body: vec![Gate::X(3).into(), Gate::Z(0).into()],
        };
        assert_eq!(cond.qubits(), vec![3, 0]);
        assert_eq!(cond.clbits(), vec![1]);
    }

    #[test]
    fn test_if_test_qasm() {
        let cond = Operation::IfTest {
            clbit: 0,
            value: true,
            body: vec![Gate::X(3).into()],
        };
        let lines = cond.to_qasm_lines(0);
        assert_eq!(lines[0], "if (c[0] == 1) {");
        assert_eq!(lines[1], "  x q[3];");
        assert_eq!(lines[2], "}");
    }

    #[test]
    fn test_channel_listing() {
        let channel = KrausChannel::new(vec![PAULI_X])
            .unwrap()
            .with_label("Transmission noise");
        let op = Operation::Channel { channel, qubit: 2 };
        assert!(op.is_channel());
        assert_eq!(op.to_string(), "// Transmission noise(1 ops) q[2]");
    }
}
