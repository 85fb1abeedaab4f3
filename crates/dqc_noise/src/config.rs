//! Noise configuration
//!
//! Gantree: L2_Noise → NoiseSpec
//!
//! Serializable description of a link noise channel, resolved into a
//! [`NoiseHandle`] by the factory.

use crate::factory::{self, NoiseHandle};
use crate::kind::NoiseKind;
use crate::params::NoiseParams;
use dqc_core::{DqcResult, Matrix2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Noise channel configuration
/// Gantree: NoiseSpec // 노이즈 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Kind name (canonical or legacy spelling)
    /// Gantree: kind: String // 종류 이름
    pub kind: String,

    /// Scalar parameters; omitted ones take the kind's defaults
    /// Gantree: params: BTreeMap<String, f64> // 파라미터
    #[serde(default)]
    pub params: BTreeMap<String, f64>,

    /// Kraus operators for `kraus_custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operators: Option<Vec<Matrix2>>,
}

impl NoiseSpec {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Kind with default parameters
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: BTreeMap::new(),
            operators: None,
        }
    }

    /// Depolarizing link noise
    /// Gantree: depolarizing(p) -> Self // 탈분극 프리셋
    pub fn depolarizing(p: f64) -> Self {
        Self::new(NoiseKind::Depolarizing.as_str()).with_param("p", p)
    }

    /// Amplitude damping link noise
    pub fn amplitude_damping(gamma: f64) -> Self {
        Self::new(NoiseKind::AmplitudeDamping.as_str()).with_param("gamma", gamma)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set a scalar parameter
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Set custom Kraus operators
    pub fn with_operators(mut self, operators: Vec<Matrix2>) -> Self {
        self.operators = Some(operators);
        self
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Factory parameters described by this spec
    pub fn to_params(&self) -> NoiseParams {
        let params = NoiseParams::from(self.params.clone());
        match &self.operators {
            Some(ops) => params.with_operators(ops.clone()),
            None => params,
        }
    }

    /// Build the noise handle
    /// Gantree: build(&self) -> Result<NoiseHandle> // 핸들 생성
    pub fn build(&self) -> DqcResult<NoiseHandle> {
        factory::build(&self.kind, &self.to_params())
    }

    /// Validate by building once and discarding the handle
    /// Gantree: validate(&self) -> Result // 검증
    pub fn validate(&self) -> DqcResult<()> {
        self.build().map(|_| ())
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

impl fmt::Display for NoiseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoiseSpec({}", self.kind)?;
        for (name, value) in &self.params {
            write!(f, ", {}={}", name, value)?;
        }
        if let Some(ops) = &self.operators {
            write!(f, ", {} operators", ops.len())?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Tests
// ============================================================================
