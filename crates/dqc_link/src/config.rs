//! Link configuration
//!
//! Gantree: L4_Link → LinkConfig
//!
//! Describes a two-node link: circuit width, which qubits are reserved for
//! entanglement distribution, and the transmission noise on the link.

use crate::circuit::DqcCircuit;
use dqc_core::{DqcError, DqcResult, QubitId};
use dqc_noise::{NoiseHandle, NoiseSpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Link configuration
/// Gantree: LinkConfig // 링크 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Number of qubits across both nodes
    /// Gantree: num_qubits: usize // 큐비트 수 (4)
    pub num_qubits: usize,

    /// Qubits tagged Communication
    /// Gantree: communication_qubits: Vec<QubitId> // 통신 큐비트 ([1, 2])
    pub communication_qubits: Vec<QubitId>,

    /// Transmission noise, if any
    /// Gantree: noise: Option<NoiseSpec> // 링크 노이즈
    #[serde(default)]
    pub noise: Option<NoiseSpec>,

    /// Circuit name
    #[serde(default)]
    pub label: Option<String>,
}

impl LinkConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Source 0, communication pair (1, 2), destination 3, depolarizing p=0.5
    /// Gantree: two_node_4q() -> Self // 기본 4큐비트 링크
    pub fn two_node_4q() -> Self {
        Self {
            num_qubits: 4,
            communication_qubits: vec![1, 2],
            noise: Some(NoiseSpec::depolarizing(0.5)),
            label: None,
        }
    }

    /// Same layout with a perfect link
    pub fn noiseless_4q() -> Self {
        Self::two_node_4q().without_noise()
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set number of qubits
    pub fn with_qubits(mut self, n: usize) -> Self {
        self.num_qubits = n;
        self
    }

    /// Set communication qubits
    pub fn with_communication_qubits(mut self, qubits: Vec<QubitId>) -> Self {
        self.communication_qubits = qubits;
        self
    }

    /// Set link noise
    pub fn with_noise(mut self, noise: NoiseSpec) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Remove link noise
    pub fn without_noise(mut self) -> Self {
        self.noise = None;
        self
    }

    /// Set circuit name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> DqcResult<()> {
        if self.num_qubits < 2 {
            return Err(DqcError::InvalidConfig(format!(
                "num_qubits must be >= 2, got {}",
                self.num_qubits
            )));
        }

        if let Some(&q) = self
            .communication_qubits
            .iter()
            .find(|&&q| q >= self.num_qubits)
        {
            return Err(DqcError::qubit_out_of_range(q, self.num_qubits));
        }

        if let Some(noise) = &self.noise {
            noise.validate()?;
        }

        Ok(())
    }

    // ========================================================================
    // Assembly
    // ========================================================================

    /// Role-assigned circuit plus the resolved link noise
    /// Gantree: build_circuit(&self) -> Result<(DqcCircuit, Option<NoiseHandle>)> // 조립
    pub fn build_circuit(&self) -> DqcResult<(DqcCircuit, Option<NoiseHandle>)> {
        self.validate()?;

        let mut dqc = match &self.label {
            Some(label) => DqcCircuit::with_name(self.num_qubits, label.clone()),
            None => DqcCircuit::new(self.num_qubits),
        };
        dqc.assign_roles(self.communication_qubits.iter().copied())?;

        let noise = self.noise.as_ref().map(NoiseSpec::build).transpose()?;
        Ok((dqc, noise))
    }

    // ========================================================================
    // JSON
    // ========================================================================

    /// Parse from JSON
    pub fn from_json(json: &str) -> DqcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> DqcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::two_node_4q()
    }
}

impl fmt::Display for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LinkConfig({}Q, communication={:?}, noise={})",
            self.num_qubits,
            self.communication_qubits,
            self.noise
                .as_ref()
                .map_or_else(|| "none".to_string(), |n| n.to_string())
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dqc_core::QubitRole;
    use dqc_noise::NoiseKind;

    #[test]
    fn test_two_node_4q() {
        let config = LinkConfig::two_node_4q();
        assert!(config.validate().is_ok());

        let (dqc, noise) = config.build_circuit().unwrap();
        assert_eq!(dqc.num_qubits(), 4);
        assert_eq!(dqc.roles().communication_qubits(), vec![1, 2]);
        assert_eq!(dqc.role(0).unwrap(), QubitRole::Computation);

        let noise = noise.unwrap();
        assert_eq!(noise.kind(), NoiseKind::Depolarizing);
        assert_eq!(noise.param("p"), Some(0.5));
    }

    #[test]
    fn test_noiseless() {
        let (_, noise) = LinkConfig::noiseless_4q().build_circuit().unwrap();
        assert!(noise.is_none());
    }

    #[test]
    fn test_validation() {
        let config = LinkConfig::two_node_4q().with_communication_qubits(vec![1, 4]);
        assert_eq!(
            config.validate().unwrap_err(),
            DqcError::qubit_out_of_range(4, 4)
        );

        let config = LinkConfig::two_node_4q().with_qubits(1);
        assert!(matches!(
            config.validate(),
            Err(DqcError::InvalidConfig(_))
        ));

        let config = LinkConfig::two_node_4q().with_noise(NoiseSpec::depolarizing(1.5));
        assert!(matches!(
            config.build_circuit(),
            Err(DqcError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn test_label_names_circuit() {
        let (dqc, _) = LinkConfig::noiseless_4q()
            .with_label("alice-bob")
            .build_circuit()
            .unwrap();
        assert_eq!(dqc.circuit().name(), Some("alice-bob"));
    }

    #[test]
    fn test_from_json() {
        let config = LinkConfig::from_json(
            r#"{
                "num_qubits": 6,
                "communication_qubits": [2, 3],
                "noise": {"kind": "amplitude_damping", "params": {"gamma": 0.2}}
            }"#,
        )
        .unwrap();
        assert_eq!(config.num_qubits, 6);
        assert!(config.label.is_none());

        let (dqc, noise) = config.build_circuit().unwrap();
        assert_eq!(dqc.roles().communication_qubits(), vec![2, 3]);
        assert_eq!(noise.unwrap().kind(), NoiseKind::AmplitudeDamping);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LinkConfig::two_node_4q().with_label("demo");
        let back = LinkConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(config, back);
    }
}
