//! Backend execution types and traits
//!
//! Gantree: L3_Backend → BackendTrait
//!
//! Defines the interface for executing a finalized circuit and the
//! outcome-count container it returns.

use dqc_core::{Circuit, ClbitId, Counts, DqcError, DqcResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of circuit execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count), highest classical bit leftmost
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Additional info
    pub extra: HashMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Get most frequent bitstring
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(bs, &count)| (bs, count))
    }

    /// Counts restricted to `clbits`
    ///
    /// The first listed bit becomes the rightmost character of each key,
    /// so `marginal(&[0, 3])` yields keys `c3 c0`.
    /// Gantree: marginal(&self, clbits) -> Result<Counts> // 주변 분포
    pub fn marginal(&self, clbits: &[ClbitId]) -> DqcResult<Counts> {
        let mut marginal: Counts = HashMap::new();

        for (bitstring, &count) in &self.counts {
            let bits = bitstring.as_bytes();
            let width = bits.len();
            let mut key = String::with_capacity(clbits.len());
            for &clbit in clbits.iter().rev() {
                if clbit >= width {
                    return Err(DqcError::clbit_out_of_range(clbit, width));
                }
                key.push(char::from(bits[width - 1 - clbit]));
            }
            *marginal.entry(key).or_insert(0) += count;
        }

        Ok(marginal)
    }

    /// Fraction of shots in which `clbit` read 1
    pub fn bit_probability(&self, clbit: ClbitId) -> DqcResult<f64> {
        let marginal = self.marginal(&[clbit])?;
        let ones = marginal.get("1").copied().unwrap_or(0);
        Ok(ones as f64 / self.shots as f64)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={})",
            self.metadata.backend,
            self.shots,
            self.counts.len()
        )
    }
}

/// Quantum backend trait
/// Gantree: BackendTrait // 백엔드 인터페이스
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Get number of qubits
    fn num_qubits(&self) -> usize;

    /// Execute a circuit
    /// Gantree: execute(circuit, shots) -> Result<ExecutionResult>
    fn execute(&self, circuit: &Circuit, shots: u64) -> DqcResult<ExecutionResult>;

    /// Execute multiple circuits (batch)
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> DqcResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        100_000
    }
}

// ============================================================================
// Tests
// ============================================================================
