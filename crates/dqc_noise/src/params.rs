//! Keyword parameters for the noise factory
//!
//! Gantree: L2_Noise → NoiseParams

use dqc_core::Matrix2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named scalar parameters plus an optional operator list
/// Gantree: NoiseParams // 키워드 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Scalar parameters by name
    /// Gantree: values: BTreeMap<String, f64> // p, gamma, lambda
    #[serde(default)]
    values: BTreeMap<String, f64>,

    /// Kraus operators for `kraus_custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    operators: Option<Vec<Matrix2>>,
}

impl NoiseParams {
    /// Empty parameter set (every kind falls back to its defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single `p`
    pub fn p(value: f64) -> Self {
        Self::new().with("p", value)
    }

    /// Shorthand for a single `gamma`
    pub fn gamma(value: f64) -> Self {
        Self::new().with("gamma", value)
    }

    /// Set a scalar parameter
    /// Gantree: with(self, name, v) -> Self // 파라미터 설정
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Set the operator list
    pub fn with_operators(mut self, operators: Vec<Matrix2>) -> Self {
        self.operators = Some(operators);
        self
    }

    /// Get a scalar parameter
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Get the operator list, if set
    pub fn operators(&self) -> Option<&[Matrix2]> {
        self.operators.as_deref()
    }

    /// Names of all scalar parameters that were set
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Check if nothing was set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.operators.is_none()
    }
}

impl From<BTreeMap<String, f64>> for NoiseParams {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self {
            values,
            operators: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqc_core::kraus::IDENTITY;

    #[test]
    fn test_params_builder() {
        let params = NoiseParams::new().with("gamma", 0.2).with("p", 0.4);
        assert_eq!(params.get("gamma"), Some(0.2));
        assert_eq!(params.get("p"), Some(0.4));
        assert_eq!(params.get("lambda"), None);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["gamma", "p"]);
    }

    #[test]
    fn test_params_operators() {
        let params = NoiseParams::new().with_operators(vec![IDENTITY]);
        assert_eq!(params.operators().map(|ops| ops.len()), Some(1));
        assert!(!params.is_empty());
        assert!(NoiseParams::new().is_empty());
    }
}
