//! Teleportation protocol
//!
//! Gantree: L4_Link → TeleportationProtocol
//!
//! Moves the state of `source` to `destination` through a Bell pair already
//! shared between `local_comm` and `remote_comm`:
//!
//! ```text
//! CX(source → local_comm)
//! CX(remote_comm → destination)
//! H(remote_comm)
//! measure local_comm → bit 0, remote_comm → bit 1
//! if bit 0: X(destination)
//! if bit 1: Z(source)
//! ```
//!
//! The Z correction acts on `source`, not `destination`. With this gate
//! order the round ends with source and destination sharing
//! α|00⟩ + β|11⟩, so Z-basis statistics on the destination match the
//! source's prepared state.

use crate::circuit::DqcCircuit;
use dqc_core::{ClassicalRegister, DqcError, DqcResult, Gate, Operation, QubitId, QubitRole};
use std::collections::HashSet;

/// Base name of the 2-bit outcome register of each teleport round
pub const TELEPORT_REGISTER: &str = "tele";

impl DqcCircuit {
    /// Append one teleportation round and return its outcome register
    ///
    /// Checks run in a fixed order. A communication qubit that is in range
    /// but lacks the Communication role is reported first, even when any
    /// other index is out of range. Then come range errors on the
    /// communication qubits, consumption, range errors on `source` and
    /// `destination`, and finally duplicates. Both communication qubits are
    /// consumed by the round. That a Bell pair was
    /// prepared beforehand is the caller's responsibility.
    ///
    /// # Errors
    /// - `IndexOutOfRange` for an index outside the circuit
    /// - `RoleViolation` if a communication qubit lacks that role
    /// - `QubitConsumed` if a communication qubit was already measured
    /// - `DuplicateQubit` if the four qubits are not distinct
    ///
    /// Nothing is appended when any check fails.
    /// Gantree: teleport(&mut, src, local, remote, dest) -> Result<Reg> // 텔레포트
    pub fn teleport(
        &mut self,
        source: QubitId,
        local_comm: QubitId,
        remote_comm: QubitId,
        destination: QubitId,
    ) -> DqcResult<ClassicalRegister> {
        self.roles
            .require_roles(&[local_comm, remote_comm], QubitRole::Communication)?;
        for q in [local_comm, remote_comm] {
            self.roles.require_available(q)?;
        }
        for q in [source, destination] {
            self.roles.check_index(q)?;
        }

        let mut seen = HashSet::new();
        for q in [source, local_comm, remote_comm, destination] {
            if !seen.insert(q) {
                return Err(DqcError::DuplicateQubit(q));
            }
        }

        let name = self.next_register_name();
        let register = self.circuit.add_register(name, 2)?;
        let (bit0, bit1) = (register.bit(0)?, register.bit(1)?);

        let ops: Vec<Operation> = vec![
            Gate::Cnot(source, local_comm).into(),
            Gate::Cnot(remote_comm, destination).into(),
            Gate::H(remote_comm).into(),
            Operation::Measure {
                qubit: local_comm,
                clbit: bit0,
            },
            Operation::Measure {
                qubit: remote_comm,
                clbit: bit1,
            },
            Operation::IfTest {
                clbit: bit0,
                value: true,
                body: vec![Gate::X(destination).into()],
            },
            Operation::IfTest {
                clbit: bit1,
                value: true,
                body: vec![Gate::Z(source).into()],
            },
        ];
        self.circuit.append_all(ops)?;

        self.roles.mark_consumed(local_comm)?;
        self.roles.mark_consumed(remote_comm)?;
        self.teleport_rounds += 1;

        log::debug!(
            "teleport {} -> {} via ({}, {}) into register {}",
            source,
            destination,
            local_comm,
            remote_comm,
            register
        );
        Ok(register)
    }

    /// `tele` for the first round, then `tele_1`, `tele_2`, ...
    fn next_register_name(&self) -> String {
        let mut round = self.teleport_rounds;
        loop {
            let name = if round == 0 {
                TELEPORT_REGISTER.to_string()
            } else {
                format!("{}_{}", TELEPORT_REGISTER, round)
            };
            if self.circuit.register(&name).is_none() {
                return name;
            }
            round += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn linked() -> DqcCircuit {
        let mut dqc = DqcCircuit::new(4);
        dqc.assign_roles([1, 2]).unwrap();
        dqc.generate_bell(1, 2, None).unwrap();
        dqc
    }

    #[test]
    fn test_teleport_sequence() {
        let mut dqc = linked();
        let reg = dqc.teleport(0, 1, 2, 3).unwrap();
        assert_eq!(reg.name(), TELEPORT_REGISTER);
        assert_eq!(reg.len(), 2);

        let ops = &dqc.circuit().ops()[2..];
        assert_eq!(ops[0], Operation::Gate(Gate::Cnot(0, 1)));
        assert_eq!(ops[1], Operation::Gate(Gate::Cnot(2, 3)));
        assert_eq!(ops[2], Operation::Gate(Gate::H(2)));
        assert_eq!(ops[3], Operation::Measure { qubit: 1, clbit: 0 });
        assert_eq!(ops[4], Operation::Measure { qubit: 2, clbit: 1 });
        assert_eq!(
            ops[5],
            Operation::IfTest {
                clbit: 0,
                value: true,
                body: vec![Gate::X(3).into()]
            }
        );
        assert_eq!(
            ops[6],
            Operation::IfTest {
                clbit: 1,
                value: true,
                body: vec![Gate::Z(0).into()]
            }
        );
        assert_eq!(dqc.teleport_rounds(), 1);
    }

    #[test]
    fn test_role_violation_first() {
        let mut dqc = DqcCircuit::new(4);
        dqc.assign_roles([2]).unwrap();

        // local_comm is a computation qubit; destination is also out of range
        let err = dqc.teleport(0, 1, 2, 99).unwrap_err();
        assert_eq!(
            err,
            DqcError::RoleViolation {
                qubit: 1,
                expected: QubitRole::Communication,
                actual: QubitRole::Computation,
            }
        );
    }

    #[test]
    fn test_role_violation_beats_out_of_range_comm() {
        let mut dqc = DqcCircuit::new(4);
        dqc.assign_roles([1]).unwrap();

        // remote_comm 2 is in range but still a computation qubit
        assert!(matches!(
            dqc.teleport(0, 99, 2, 3),
            Err(DqcError::RoleViolation { qubit: 2, .. })
        ));

        dqc.assign_roles([2]).unwrap();
        assert_eq!(
            dqc.teleport(0, 99, 2, 3).unwrap_err(),
            DqcError::qubit_out_of_range(99, 4)
        );
    }

    #[test]
    fn test_out_of_range() {
        let mut dqc = linked();
        assert_eq!(
            dqc.teleport(0, 1, 2, 4).unwrap_err(),
            DqcError::qubit_out_of_range(4, 4)
        );
        assert_eq!(
            dqc.teleport(0, 1, 7, 3).unwrap_err(),
            DqcError::qubit_out_of_range(7, 4)
        );
    }

    #[test]
    fn test_failure_leaves_circuit_untouched() {
        let mut dqc = linked();
        let before = dqc.clone();

        assert!(dqc.teleport(0, 1, 2, 9).is_err());
        assert!(dqc.teleport(1, 1, 2, 3).is_err());
        assert_eq!(dqc, before);
    }

    #[test]
    fn test_duplicate_qubits() {
        let mut dqc = linked();
        assert_eq!(
            dqc.teleport(0, 1, 2, 0).unwrap_err(),
            DqcError::DuplicateQubit(0)
        );
        assert_eq!(
            dqc.teleport(0, 1, 1, 3).unwrap_err(),
            DqcError::DuplicateQubit(1)
        );
    }

    #[test]
    fn test_communication_qubits_consumed() {
        let mut dqc = linked();
        dqc.teleport(0, 1, 2, 3).unwrap();
        assert!(dqc.roles().is_consumed(1));
        assert!(dqc.roles().is_consumed(2));

        assert_eq!(
            dqc.teleport(0, 1, 2, 3).unwrap_err(),
            DqcError::QubitConsumed(1)
        );
        assert_eq!(
            dqc.generate_bell(1, 2, None).unwrap_err(),
            DqcError::QubitConsumed(1)
        );
    }

    #[test]
    fn test_register_names_per_round() {
        let mut dqc = DqcCircuit::new(7);
        dqc.assign_roles([1, 2, 4, 5]).unwrap();

        dqc.generate_bell(1, 2, None).unwrap();
        let first = dqc.teleport(0, 1, 2, 3).unwrap();

        dqc.generate_bell(4, 5, None).unwrap();
        let second = dqc.teleport(3, 4, 5, 6).unwrap();

        assert_eq!(first.name(), "tele");
        assert_eq!(second.name(), "tele_1");
        assert_eq!(second.offset(), 2);
        assert_eq!(dqc.circuit().num_clbits(), 4);
    }

    #[test]
    fn test_register_name_skips_taken() {
        let mut dqc = linked();
        dqc.circuit_mut().add_register("tele", 1).unwrap();
        let reg = dqc.teleport(0, 1, 2, 3).unwrap();
        assert_eq!(reg.name(), "tele_1");
        assert_eq!(reg.offset(), 1);
    }
}
