//! Simulator configuration
//!
//! Gantree: L3_Backend → SimulatorConfig

use dqc_core::{DqcError, DqcResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Widest register the state-vector simulator accepts
pub const MAX_SIMULATED_QUBITS: usize = 24;

/// Simulator configuration
/// Gantree: SimulatorConfig // 시뮬레이터 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Number of qubits
    /// Gantree: num_qubits: usize // 큐비트 수 (4)
    pub num_qubits: usize,

    /// Default shots for `run`
    /// Gantree: shots: u64 // 샷 수 (1000)
    pub shots: u64,

    /// Random seed
    /// Gantree: seed: Option<u64> // 시드
    #[serde(default)]
    pub seed: Option<u64>,

    /// Upper bound on shots per execution
    pub max_shots: u64,
}

impl SimulatorConfig {
    /// Two-node link with two communication qubits, 1000 shots
    pub fn default_4q() -> Self {
        Self {
            num_qubits: 4,
            shots: 1000,
            seed: None,
            max_shots: 100_000,
        }
    }

    /// Set number of qubits
    pub fn with_qubits(mut self, n: usize) -> Self {
        self.num_qubits = n;
        self
    }

    /// Set number of shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set max shots
    pub fn with_max_shots(mut self, max_shots: u64) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> DqcResult<()> {
        if self.num_qubits == 0 {
            return Err(DqcError::InvalidConfig("num_qubits must be > 0".to_string()));
        }

        if self.num_qubits > MAX_SIMULATED_QUBITS {
            return Err(DqcError::InvalidConfig(format!(
                "num_qubits must be <= {}, got {}",
                MAX_SIMULATED_QUBITS, self.num_qubits
            )));
        }

        if self.max_shots == 0 {
            return Err(DqcError::InvalidConfig("max_shots must be > 0".to_string()));
        }

        if self.shots == 0 || self.shots > self.max_shots {
            return Err(DqcError::ShotsOutOfRange(self.shots, 1, self.max_shots));
        }

        Ok(())
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> DqcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self::default_4q()
    }
}

impl fmt::Display for SimulatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimulatorConfig({}Q, shots={}, max_shots={}, seed={:?})",
            self.num_qubits, self.shots, self.max_shots, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_4q() {
        let config = SimulatorConfig::default();
        assert_eq!(config.num_qubits, 4);
        assert_eq!(config.shots, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(SimulatorConfig::default().with_qubits(0).validate().is_err());
        assert!(SimulatorConfig::default().with_qubits(30).validate().is_err());
        assert_eq!(
            SimulatorConfig::default().with_shots(0).validate().unwrap_err(),
            DqcError::ShotsOutOfRange(0, 1, 100_000)
        );
        assert!(SimulatorConfig::default()
            .with_shots(500)
            .with_max_shots(100)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json() {
        let config = SimulatorConfig::from_json(
            r#"{"num_qubits": 4, "shots": 2048, "seed": 7, "max_shots": 10000}"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.shots, 2048);
        assert!(config.validate().is_ok());
    }
}
