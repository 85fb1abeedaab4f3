//! Qubit role registry
//!
//! Gantree: L4_Link → QubitRoleRegistry
//!
//! Flat per-qubit table of roles plus a consumed flag for communication
//! qubits that a teleport round has already measured. Roles only ever move
//! from Computation to Communication.

use dqc_core::{DqcError, DqcResult, QubitId, QubitRole};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-qubit role table
/// Gantree: QubitRoleRegistry // 역할 테이블
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistryData")]
pub struct QubitRoleRegistry {
    /// Role of each qubit, indexed by qubit
    /// Gantree: roles: Vec<QubitRole> // 역할
    roles: Vec<QubitRole>,

    /// Set once a teleport round measures the qubit
    /// Gantree: consumed: Vec<bool> // 소비 여부
    consumed: Vec<bool>,
}

impl QubitRoleRegistry {
    /// Every qubit starts as Computation
    pub fn new(num_qubits: usize) -> Self {
        Self {
            roles: vec![QubitRole::Computation; num_qubits],
            consumed: vec![false; num_qubits],
        }
    }

    /// Number of qubits tracked
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Fail with `IndexOutOfRange` unless `qubit` is tracked
    pub fn check_index(&self, qubit: QubitId) -> DqcResult<()> {
        if qubit >= self.roles.len() {
            return Err(DqcError::qubit_out_of_range(qubit, self.roles.len()));
        }
        Ok(())
    }

    /// Role of `qubit`
    pub fn role(&self, qubit: QubitId) -> DqcResult<QubitRole> {
        self.check_index(qubit)?;
        Ok(self.roles[qubit])
    }

    /// Mark every index as Communication
    ///
    /// All indices are checked before any is marked. Indices that already
    /// carry the Communication role are left alone. Returns how many qubits
    /// changed role.
    /// Gantree: assign_roles(&mut, indices) -> Result<usize> // 통신 큐비트 지정
    pub fn assign_roles<I>(&mut self, indices: I) -> DqcResult<usize>
    where
        I: IntoIterator<Item = QubitId>,
    {
        let indices: Vec<QubitId> = indices.into_iter().collect();
        for &q in &indices {
            self.check_index(q)?;
        }

        let mut changed = 0;
        for q in indices {
            if !self.roles[q].is_communication() {
                self.roles[q] = QubitRole::Communication;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Fail with `RoleViolation` unless `qubit` has the `expected` role
    /// Gantree: require_role(&self, q, role) -> Result // 역할 검사
    pub fn require_role(&self, qubit: QubitId, expected: QubitRole) -> DqcResult<()> {
        let actual = self.role(qubit)?;
        if actual != expected {
            return Err(DqcError::RoleViolation {
                qubit,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Fail unless every index in `qubits` has the `expected` role
    ///
    /// A `RoleViolation` on any in-range index is reported before an
    /// `IndexOutOfRange` anywhere in the list.
    pub fn require_roles(&self, qubits: &[QubitId], expected: QubitRole) -> DqcResult<()> {
        for &q in qubits.iter().filter(|&&q| q < self.roles.len()) {
            self.require_role(q, expected)?;
        }
        for &q in qubits {
            self.check_index(q)?;
        }
        Ok(())
    }

    /// Check if a teleport round already measured `qubit`
    pub fn is_consumed(&self, qubit: QubitId) -> bool {
        self.consumed.get(qubit).copied().unwrap_or(false)
    }

    /// Fail with `QubitConsumed` if `qubit` was already measured
    pub fn require_available(&self, qubit: QubitId) -> DqcResult<()> {
        self.check_index(qubit)?;
        if self.consumed[qubit] {
            return Err(DqcError::QubitConsumed(qubit));
        }
        Ok(())
    }

    /// Record that a teleport round measured `qubit`
    pub fn mark_consumed(&mut self, qubit: QubitId) -> DqcResult<()> {
        self.check_index(qubit)?;
        self.consumed[qubit] = true;
        Ok(())
    }

    /// Indices currently tagged Communication, ascending
    pub fn communication_qubits(&self) -> Vec<QubitId> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, role)| role.is_communication())
            .map(|(q, _)| q)
            .collect()
    }
}

/// Unchecked wire form of the role table
#[derive(Deserialize)]
struct RegistryData {
    roles: Vec<QubitRole>,
    consumed: Vec<bool>,
}

impl TryFrom<RegistryData> for QubitRoleRegistry {
    type Error = DqcError;

    fn try_from(data: RegistryData) -> DqcResult<Self> {
        if data.roles.len() != data.consumed.len() {
            return Err(DqcError::InvalidState(format!(
                "{} roles but {} consumed flags",
                data.roles.len(),
                data.consumed.len()
            )));
        }

        // Only communication qubits are ever consumed
        if let Some(q) = (0..data.roles.len())
            .find(|&q| data.consumed[q] && !data.roles[q].is_communication())
        {
            return Err(DqcError::RoleViolation {
                qubit: q,
                expected: QubitRole::Communication,
                actual: data.roles[q],
            });
        }

        Ok(Self {
            roles: data.roles,
            consumed: data.consumed,
        })
    }
}

impl fmt::Display for QubitRoleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QubitRoleRegistry({} qubits, communication={:?})",
            self.roles.len(),
            self.communication_qubits()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
