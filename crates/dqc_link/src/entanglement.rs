//! Bell pair generation over the link
//!
//! Gantree: L4_Link → EntanglementLinkBuilder
//!
//! H(control) then CX(control → target) prepares (|00⟩ + |11⟩)/√2. When a
//! noise handle is supplied, one application of its channel lands on the
//! target leg right after the CX, modelling transmission of that half of
//! the pair to the remote node.

use crate::circuit::DqcCircuit;
use dqc_core::{DqcResult, Gate, Operation, QubitId, QubitRole};
use dqc_noise::NoiseHandle;

/// Label attached to link noise in circuit listings
pub const TRANSMISSION_LABEL: &str = "Transmission noise";

impl DqcCircuit {
    /// Entangle two communication qubits
    ///
    /// A role violation on an in-range qubit is reported before a range
    /// error on the other one.
    ///
    /// # Errors
    /// - `IndexOutOfRange` for an index outside the circuit
    /// - `RoleViolation` if either qubit is not a communication qubit
    /// - `QubitConsumed` if either qubit was measured by a teleport round
    /// - `DuplicateQubit` if `control == target`
    ///
    /// Nothing is appended when any check fails.
    /// Gantree: generate_bell(&mut, c, t, noise) -> Result<&mut Self> // 벨 쌍 생성
    pub fn generate_bell(
        &mut self,
        control: QubitId,
        target: QubitId,
        noise: Option<&NoiseHandle>,
    ) -> DqcResult<&mut Self> {
        self.roles
            .require_roles(&[control, target], QubitRole::Communication)?;
        for q in [control, target] {
            self.roles.require_available(q)?;
        }
        self.append_bell(control, target, noise)
    }

    /// Entangle any two qubits, skipping role checks
    pub fn generate_bell_local(
        &mut self,
        control: QubitId,
        target: QubitId,
        noise: Option<&NoiseHandle>,
    ) -> DqcResult<&mut Self> {
        self.append_bell(control, target, noise)
    }

    fn append_bell(
        &mut self,
        control: QubitId,
        target: QubitId,
        noise: Option<&NoiseHandle>,
    ) -> DqcResult<&mut Self> {
        let mut ops: Vec<Operation> =
            vec![Gate::H(control).into(), Gate::Cnot(control, target).into()];
        if let Some(handle) = noise {
            ops.push(Operation::Channel {
                channel: handle.channel().clone().with_label(TRANSMISSION_LABEL),
                qubit: target,
            });
        }

        self.circuit.append_all(ops)?;
        log::debug!(
            "bell pair ({}, {}) with {}",
            control,
            target,
            noise.map_or_else(|| "no noise".to_string(), |h| h.to_string())
        );
        Ok(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
