//! Error types for DQC
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by the circuit facade, the noise factory,
//! the link protocol, and the backends.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use crate::types::{IndexSpace, QubitId, QubitRole};
use thiserror::Error;

/// Main error type for DQC
/// Gantree: DqcError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DqcError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Qubit or classical bit index outside the declared bounds
    /// Gantree: IndexOutOfRange{{space,index,bound}} // 인덱스 범위
    #[error("{space} index {index} out of range: must be in [0, {bound})")]
    IndexOutOfRange {
        space: IndexSpace,
        index: usize,
        bound: usize,
    },

    /// Probability-like parameter outside [0, 1]
    /// Gantree: InvalidProbability{{param,value}} // 확률 범위
    #[error("Invalid probability {param}={value}: must be in range [0, 1]")]
    InvalidProbability { param: String, value: f64 },

    /// Non-finite rotation angle
    #[error("Invalid angle {0}: must be finite")]
    InvalidAngle(f64),

    /// Amplitudes that do not describe a normalized single-qubit state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ========================================================================
    // Role Errors
    // ========================================================================
    /// Qubit role does not match what the operation requires
    /// Gantree: RoleViolation{{qubit,expected,actual}} // 역할 위반
    #[error("Role violation on qubit {qubit}: expected {expected}, found {actual}")]
    RoleViolation {
        qubit: QubitId,
        expected: QubitRole,
        actual: QubitRole,
    },

    /// Communication qubit already measured by a teleport round
    /// Gantree: QubitConsumed{{qubit}} // 소비된 통신 큐비트
    #[error("Communication qubit {0} was consumed by an earlier measurement")]
    QubitConsumed(QubitId),

    // ========================================================================
    // Noise Errors
    // ========================================================================
    /// Unrecognized noise channel kind
    /// Gantree: UnknownNoiseKind(String) // 노이즈 종류
    #[error("Unknown noise kind '{0}'")]
    UnknownNoiseKind(String),

    /// Operator set rejected by the Kraus constructor
    /// Gantree: InvalidOperator(String) // 크라우스 검증
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Same qubit used twice by one multi-qubit operation
    #[error("Qubit {0} used more than once in a single operation")]
    DuplicateQubit(QubitId),

    /// Classical register name already taken
    #[error("Classical register '{0}' already exists")]
    DuplicateRegister(String),

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    /// Gantree: BackendError(String) // 백엔드
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Shots out of range
    #[error("Shots {0} out of range [{1}, {2}]")]
    ShotsOutOfRange(u64, u64, u64),

    // ========================================================================
    // Configuration / I/O Errors
    // ========================================================================
    /// Configuration rejected by `validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for DQC operations
/// Gantree: DqcResult<T> // type alias
pub type DqcResult<T> = Result<T, DqcError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for DqcError {
    fn from(err: serde_json::Error) -> Self {
        DqcError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl DqcError {
    /// Shorthand for an out-of-range qubit index
    pub fn qubit_out_of_range(index: usize, bound: usize) -> Self {
        DqcError::IndexOutOfRange {
            space: IndexSpace::Qubit,
            index,
            bound,
        }
    }

    /// Shorthand for an out-of-range classical bit index
    pub fn clbit_out_of_range(index: usize, bound: usize) -> Self {
        DqcError::IndexOutOfRange {
            space: IndexSpace::Clbit,
            index,
            bound,
        }
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DqcError::IndexOutOfRange { .. }
                | DqcError::InvalidProbability { .. }
                | DqcError::InvalidAngle(_)
                | DqcError::InvalidState(_)
                | DqcError::UnknownNoiseKind(_)
                | DqcError::InvalidOperator(_)
                | DqcError::DuplicateQubit(_)
        )
    }

    /// Check if error comes from qubit role bookkeeping
    pub fn is_role_error(&self) -> bool {
        matches!(
            self,
            DqcError::RoleViolation { .. } | DqcError::QubitConsumed(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
