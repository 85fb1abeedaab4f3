//! Distributed circuit
//!
//! Gantree: L4_Link → DqcCircuit
//!
//! A [`Circuit`] paired with the role registry that guards the link
//! protocol. Bell pair generation lives in `entanglement`, teleportation
//! in `teleport`.

use crate::roles::QubitRoleRegistry;
use dqc_core::{Circuit, ClassicalRegister, DqcError, DqcResult, QubitId, QubitRole};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Circuit with qubit roles
/// Gantree: DqcCircuit // 분산 회로
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DqcCircuitData")]
pub struct DqcCircuit {
    /// Operation sequence
    /// Gantree: circuit: Circuit // 연산 시퀀스
    pub(crate) circuit: Circuit,

    /// Role table, one entry per qubit
    /// Gantree: roles: QubitRoleRegistry // 역할 테이블
    pub(crate) roles: QubitRoleRegistry,

    /// Completed teleport rounds
    pub(crate) teleport_rounds: usize,
}

impl DqcCircuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Empty circuit, every qubit Computation
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self::from_circuit(Circuit::new(num_qubits))
    }

    /// Empty named circuit
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self::from_circuit(Circuit::with_name(num_qubits, name))
    }

    /// Wrap an existing circuit (for example a prepared input state)
    pub fn from_circuit(circuit: Circuit) -> Self {
        let roles = QubitRoleRegistry::new(circuit.num_qubits());
        Self {
            circuit,
            roles,
            teleport_rounds: 0,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    /// Underlying circuit
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Underlying circuit, for state preparation and extra gates
    ///
    /// Operations appended here bypass role checks.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    /// Consume into the underlying circuit
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Role table
    pub fn roles(&self) -> &QubitRoleRegistry {
        &self.roles
    }

    /// Role of one qubit
    pub fn role(&self, qubit: QubitId) -> DqcResult<QubitRole> {
        self.roles.role(qubit)
    }

    /// Number of teleport rounds appended so far
    pub fn teleport_rounds(&self) -> usize {
        self.teleport_rounds
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Tag qubits as communication qubits
    ///
    /// Atomic and idempotent, see [`QubitRoleRegistry::assign_roles`].
    /// Gantree: assign_roles(&mut, indices) -> Result<&mut Self> // 통신 큐비트
    pub fn assign_roles<I>(&mut self, indices: I) -> DqcResult<&mut Self>
    where
        I: IntoIterator<Item = QubitId>,
    {
        let changed = self.roles.assign_roles(indices)?;
        log::debug!(
            "assigned {} new communication qubits, now {:?}",
            changed,
            self.roles.communication_qubits()
        );
        Ok(self)
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Measure every qubit into a fresh `meas` register
    /// Gantree: measure_all(&mut) -> Result<Reg> // 전체 측정
    pub fn measure_all(&mut self) -> DqcResult<ClassicalRegister> {
        self.circuit.measure_all()
    }
}

#[derive(Deserialize)]
struct DqcCircuitData {
    circuit: Circuit,
    roles: QubitRoleRegistry,
    teleport_rounds: usize,
}

impl TryFrom<DqcCircuitData> for DqcCircuit {
    type Error = DqcError;

    fn try_from(data: DqcCircuitData) -> DqcResult<Self> {
        if data.roles.len() != data.circuit.num_qubits() {
            return Err(DqcError::InvalidState(format!(
                "role table covers {} qubits, circuit has {}",
                data.roles.len(),
                data.circuit.num_qubits()
            )));
        }
        Ok(Self {
            circuit: data.circuit,
            roles: data.roles,
            teleport_rounds: data.teleport_rounds,
        })
    }
}

impl fmt::Display for DqcCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "DqcCircuit({} qubits, communication={:?}, teleports={})",
            self.num_qubits(),
            self.roles.communication_qubits(),
            self.teleport_rounds
        )?;
        write!(f, "{}", self.circuit)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let dqc = DqcCircuit::new(4);
        assert_eq!(dqc.num_qubits(), 4);
        assert_eq!(dqc.roles().len(), 4);
        assert!(dqc.circuit().is_empty());
        assert_eq!(dqc.teleport_rounds(), 0);
    }

    #[test]
    fn test_assign_roles_chain() {
        let mut dqc = DqcCircuit::new(4);
        dqc.assign_roles([1]).unwrap().assign_roles([2]).unwrap();
        assert_eq!(dqc.role(1).unwrap(), QubitRole::Communication);
        assert_eq!(dqc.role(2).unwrap(), QubitRole::Communication);
        assert_eq!(dqc.role(0).unwrap(), QubitRole::Computation);
    }

    #[test]
    fn test_assign_roles_out_of_range() {
        let mut dqc = DqcCircuit::new(4);
        assert_eq!(
            dqc.assign_roles([1, 4]).unwrap_err(),
            DqcError::qubit_out_of_range(4, 4)
        );
        assert!(dqc.roles().communication_qubits().is_empty());
    }

    #[test]
    fn test_from_circuit_keeps_ops() {
        let mut circuit = Circuit::new(3);
        circuit.ry(0, 0.4).unwrap();
        let dqc = DqcCircuit::from_circuit(circuit);
        assert_eq!(dqc.circuit().gate_count(), 1);
        assert_eq!(dqc.roles().len(), 3);
    }

    #[test]
    fn test_measure_all() {
        let mut dqc = DqcCircuit::with_name(3, "link");
        let meas = dqc.measure_all().unwrap();
        assert_eq!(meas.len(), 3);
        assert_eq!(dqc.circuit().name(), Some("link"));
        assert_eq!(dqc.circuit().count_measurements(), 3);
    }

    #[test]
    fn test_deserialize_checks_width() {
        let mut dqc = DqcCircuit::new(4);
        dqc.assign_roles([1, 2]).unwrap();
        dqc.generate_bell(1, 2, None).unwrap();
        let json = serde_json::to_string(&dqc).unwrap();
        let back: DqcCircuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dqc);

        let mut value = serde_json::to_value(&dqc).unwrap();
        value["roles"] = serde_json::to_value(QubitRoleRegistry::new(2)).unwrap();
        assert!(serde_json::from_value::<DqcCircuit>(value).is_err());
    }
}
