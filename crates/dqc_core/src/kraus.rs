//! Single-qubit Kraus operators
//!
//! Gantree: L1_Circuit → KrausChannel
//!
//! Operator-level representation of a noise channel as the executor sees it.
//! The constructor enforces the completeness relation Σ Kᵢ†Kᵢ = I, so every
//! channel that reaches a circuit is trace preserving.

use crate::error::{DqcError, DqcResult};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2x2 complex matrix, row-major
pub type Matrix2 = [[Complex64; 2]; 2];

/// Absolute tolerance for the completeness check
pub const COMPLETENESS_TOLERANCE: f64 = 1e-8;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

// ============================================================================
// Matrix Helpers
// ============================================================================

/// Identity
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// Pauli-X
pub const PAULI_X: Matrix2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y
pub const PAULI_Y: Matrix2 = [[ZERO, Complex64::new(0.0, -1.0)], [I, ZERO]];

/// Pauli-Z
pub const PAULI_Z: Matrix2 = [[ONE, ZERO], [ZERO, Complex64::new(-1.0, 0.0)]];

/// Build a real-valued matrix
pub fn real(m: [[f64; 2]; 2]) -> Matrix2 {
    [
        [Complex64::new(m[0][0], 0.0), Complex64::new(m[0][1], 0.0)],
        [Complex64::new(m[1][0], 0.0), Complex64::new(m[1][1], 0.0)],
    ]
}

/// Multiply every entry by a real factor
pub fn scale(m: &Matrix2, factor: f64) -> Matrix2 {
    [
        [m[0][0] * factor, m[0][1] * factor],
        [m[1][0] * factor, m[1][1] * factor],
    ]
}

/// Conjugate transpose
pub fn dagger(m: &Matrix2) -> Matrix2 {
    [
        [m[0][0].conj(), m[1][0].conj()],
        [m[0][1].conj(), m[1][1].conj()],
    ]
}

/// Matrix product `a · b`
pub fn matmul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[ZERO; 2]; 2];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j];
        }
    }
    out
}

// ============================================================================
// KrausChannel
// ============================================================================

/// Validated set of single-qubit Kraus operators
/// Gantree: KrausChannel // 크라우스 채널
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KrausChannelData")]
pub struct KrausChannel {
    /// Display label used in circuit listings
    label: String,

    /// Kraus operators Kᵢ
    operators: Vec<Matrix2>,
}

impl KrausChannel {
    /// Create a channel from operators, checking completeness
    /// Gantree: new(ops) -> Result<Self> // 생성+검증
    pub fn new(operators: Vec<Matrix2>) -> DqcResult<Self> {
        if operators.is_empty() {
            return Err(DqcError::InvalidOperator(
                "operator list is empty".to_string(),
            ));
        }

        let finite = operators
            .iter()
            .flat_map(|m| m.iter().flatten())
            .all(|c| c.re.is_finite() && c.im.is_finite());
        if !finite {
            return Err(DqcError::InvalidOperator(
                "operator entries must be finite".to_string(),
            ));
        }

        let deviation = completeness_deviation(&operators);
        if deviation > COMPLETENESS_TOLERANCE {
            return Err(DqcError::InvalidOperator(format!(
                "sum of K†K deviates from identity by {:.3e}",
                deviation
            )));
        }

        Ok(Self {
            label: "kraus".to_string(),
            operators,
        })
    }

    /// Attach a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Kraus operators
    pub fn operators(&self) -> &[Matrix2] {
        &self.operators
    }

    /// Number of Kraus operators
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Always false for a constructed channel
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// A single complete Kraus operator is a unitary
    pub fn is_unitary(&self) -> bool {
        self.operators.len() == 1
    }
}

/// Unchecked wire form, validated through [`KrausChannel::new`]
#[derive(Deserialize)]
struct KrausChannelData {
    label: String,
    operators: Vec<Matrix2>,
}

impl TryFrom<KrausChannelData> for KrausChannel {
    type Error = DqcError;

    fn try_from(data: KrausChannelData) -> DqcResult<Self> {
        Ok(Self::new(data.operators)?.with_label(data.label))
    }
}

impl fmt::Display for KrausChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} ops)", self.label, self.operators.len())
    }
}

/// Largest entry-wise deviation of Σ K†K from the identity
fn completeness_deviation(operators: &[Matrix2]) -> f64 {
    let mut sum = [[ZERO; 2]; 2];
    for k in operators {
        let kk = matmul(&dagger(k), k);
        for i in 0..2 {
            for j in 0..2 {
                sum[i][j] += kk[i][j];
            }
        }
    }

    let mut worst: f64 = 0.0;
    for i in 0..2 {
        for j in 0..2 {
            worst = worst.max((sum[i][j] - IDENTITY[i][j]).norm());
        }
    }
    worst
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pauli_products() {
        // XY = iZ
        let xy = matmul(&PAULI_X, &PAULI_Y);
        assert_abs_diff_eq!(xy[0][0].im, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(xy[1][1].im, -1.0, epsilon = 1e-12);

        // Z† Z = I
        let zz = matmul(&dagger(&PAULI_Z), &PAULI_Z);
        assert_eq!(zz, IDENTITY);
    }

    #[test]
    fn test_valid_channel() {
        let k0 = scale(&IDENTITY, 0.9_f64.sqrt());
        let k1 = scale(&PAULI_Z, 0.1_f64.sqrt());
        let channel = KrausChannel::new(vec![k0, k1]).unwrap();
        assert_eq!(channel.len(), 2);
        assert_eq!(channel.label(), "kraus");
    }

    #[test]
    fn test_incomplete_channel_rejected() {
        let k0 = scale(&IDENTITY, 0.5);
        let err = KrausChannel::new(vec![k0]).unwrap_err();
        assert!(matches!(err, DqcError::InvalidOperator(_)));
    }

    #[test]
    fn test_empty_channel_rejected() {
        assert!(KrausChannel::new(vec![]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let k0 = real([[f64::NAN, 0.0], [0.0, 1.0]]);
        assert!(KrausChannel::new(vec![k0]).is_err());
    }

    #[test]
    fn test_unitary_channel() {
        let channel = KrausChannel::new(vec![PAULI_X]).unwrap().with_label("flip");
        assert!(channel.is_unitary());
        assert_eq!(channel.to_string(), "flip(1 ops)");
    }

    #[test]
    fn test_deserialize_checks_completeness() {
        let channel = KrausChannel::new(vec![PAULI_X]).unwrap().with_label("flip");
        let json = serde_json::to_string(&channel).unwrap();
        let back: KrausChannel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, channel);

        let leaky = serde_json::json!({
            "label": "leaky",
            "operators": [scale(&IDENTITY, 0.5)],
        });
        let err = serde_json::from_value::<KrausChannel>(leaky).unwrap_err();
        assert!(err.to_string().contains("Invalid operator"));

        let empty = serde_json::json!({ "label": "none", "operators": [] });
        assert!(serde_json::from_value::<KrausChannel>(empty).is_err());
    }
}
