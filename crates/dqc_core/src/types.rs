//! Core types for DQC
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Provides fundamental type aliases and validated wrapper types
//! used throughout the DQC system.

use crate::error::{DqcError, DqcResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Classical bit identifier (0-indexed, flat across registers)
/// Gantree: ClbitId // pub type ClbitId = usize
pub type ClbitId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Index Space
// ============================================================================

/// Which index array an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexSpace {
    /// Quantum bit array
    Qubit,
    /// Classical bit array
    Clbit,
}

impl fmt::Display for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpace::Qubit => write!(f, "qubit"),
            IndexSpace::Clbit => write!(f, "classical bit"),
        }
    }
}

// ============================================================================
// Qubit Role
// ============================================================================

/// Role of a qubit within a distributed circuit
/// Gantree: QubitRole // 계산/통신
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QubitRole {
    /// Carries logical state (default)
    /// Gantree: Computation // 계산 큐비트
    #[default]
    Computation,

    /// Reserved for entanglement distribution between nodes
    /// Gantree: Communication // 통신 큐비트
    Communication,
}

impl QubitRole {
    /// Check if this is a communication role
    pub fn is_communication(&self) -> bool {
        matches!(self, QubitRole::Communication)
    }
}

impl fmt::Display for QubitRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitRole::Computation => write!(f, "computation"),
            QubitRole::Communication => write!(f, "communication"),
        }
    }
}

// ============================================================================
// Probability (Validated Wrapper)
// ============================================================================

/// Probability value in range [0, 1]
/// Gantree: Probability // 범위 검증 구조체
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Create a new Probability with validation
    /// Gantree: new(f64) -> Result<Self> // 생성+검증
    pub fn new(value: f64) -> DqcResult<Self> {
        Self::named("p", value)
    }

    /// Create a Probability, reporting `param` as the offending name on failure
    ///
    /// NaN is rejected along with values outside [0, 1].
    pub fn named(param: &str, value: f64) -> DqcResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DqcError::InvalidProbability {
                param: param.to_string(),
                value,
            });
        }
        Ok(Self(value))
    }

    /// Get the probability value
    /// Gantree: value() -> f64 // 값 반환
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the complement (1 - p)
    /// Gantree: complement() -> f64 // 1-p
    #[inline]
    pub fn complement(&self) -> f64 {
        1.0 - self.0
    }

    /// Zero probability
    pub const ZERO: Self = Self(0.0);

    /// Certainty (p = 1)
    pub const ONE: Self = Self(1.0);
}

impl Default for Probability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = DqcError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ============================================================================
// Classical Register
// ============================================================================

/// Named, contiguous slice of the circuit's classical bit array
/// Gantree: ClassicalRegister // 고전 레지스터
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    name: String,
    offset: ClbitId,
    size: usize,
}

impl ClassicalRegister {
    /// Create a register descriptor
    pub fn new(name: impl Into<String>, offset: ClbitId, size: usize) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
        }
    }

    /// Register name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flat index of the first bit
    pub fn offset(&self) -> ClbitId {
        self.offset
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Flat classical bit index of the `i`-th bit in this register
    pub fn bit(&self, i: usize) -> DqcResult<ClbitId> {
        if i >= self.size {
            return Err(DqcError::clbit_out_of_range(i, self.size));
        }
        Ok(self.offset + i)
    }

    /// All flat classical bit indices, low bit first
    pub fn bits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.offset..self.offset + self.size
    }
}

impl fmt::Display for ClassicalRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.size)
    }
}

// ============================================================================
// Tests
// ============================================================================
