//! Noise channel factory
//!
//! Gantree: L2_Noise → NoiseChannelFactory
//!
//! Turns a (kind, parameters) pair into an immutable [`NoiseHandle`]
//! holding validated Kraus operators. Every probability-valued parameter is
//! range-checked before any operator is built, and the resulting channel
//! always satisfies Σ Kᵢ†Kᵢ = I.

use crate::kind::NoiseKind;
use crate::params::NoiseParams;
use dqc_core::kraus::{real, scale, IDENTITY, PAULI_X, PAULI_Y, PAULI_Z};
use dqc_core::{DqcError, DqcResult, KrausChannel, Matrix2, Probability};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance on `gamma + lambda <= 1` for combined damping
const SUM_TOLERANCE: f64 = 1e-12;

// ============================================================================
// NoiseHandle
// ============================================================================

/// Immutable, reusable single-qubit noise channel
/// Gantree: NoiseHandle // 노이즈 핸들
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NoiseHandleData")]
pub struct NoiseHandle {
    /// Channel family
    /// Gantree: kind: NoiseKind // 종류
    kind: NoiseKind,

    /// Resolved parameters (defaults filled in)
    /// Gantree: params: BTreeMap<String, f64> // 해석된 파라미터
    params: BTreeMap<String, f64>,

    /// Validated Kraus operators
    /// Gantree: channel: KrausChannel // 크라우스 연산자
    channel: KrausChannel,
}

impl NoiseHandle {
    /// Channel family
    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Resolved parameters
    pub fn params(&self) -> &BTreeMap<String, f64> {
        &self.params
    }

    /// Resolved value of one parameter
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Kraus channel to insert into a circuit
    pub fn channel(&self) -> &KrausChannel {
        &self.channel
    }

    /// Kraus operators
    pub fn operators(&self) -> &[Matrix2] {
        self.channel.operators()
    }

    // ========================================================================
    // Typed Constructors
    // ========================================================================

    /// Depolarizing channel
    /// Gantree: depolarizing(p) -> Result<Self> // 탈분극
    pub fn depolarizing(p: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::Depolarizing, &NoiseParams::p(p))
    }

    /// Bit flip channel
    pub fn bit_flip(p: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::BitFlip, &NoiseParams::p(p))
    }

    /// Y flip channel
    pub fn y_flip(p: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::YFlip, &NoiseParams::p(p))
    }

    /// Phase flip channel
    pub fn phase_flip(p: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::PhaseFlip, &NoiseParams::p(p))
    }

    /// Amplitude damping channel
    pub fn amplitude_damping(gamma: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::AmplitudeDamping, &NoiseParams::gamma(gamma))
    }

    /// Generalized amplitude damping with excited-state population `p`
    pub fn generalized_amplitude_damping(gamma: f64, p: f64) -> DqcResult<Self> {
        let params = NoiseParams::new().with("gamma", gamma).with("p", p);
        build_kind(NoiseKind::GeneralizedAmplitudeDamping, &params)
    }

    /// Phase damping channel
    pub fn phase_damping(gamma: f64) -> DqcResult<Self> {
        build_kind(NoiseKind::PhaseDamping, &NoiseParams::gamma(gamma))
    }

    /// Combined phase and amplitude damping
    pub fn phase_amplitude_damping(gamma: f64, lambda: f64) -> DqcResult<Self> {
        let params = NoiseParams::new()
            .with("gamma", gamma)
            .with("lambda", lambda);
        build_kind(NoiseKind::PhaseAmplitudeDamping, &params)
    }

    /// Channel from caller-supplied Kraus operators
    pub fn kraus_custom(operators: Vec<Matrix2>) -> DqcResult<Self> {
        build_kind(
            NoiseKind::KrausCustom,
            &NoiseParams::new().with_operators(operators),
        )
    }
}

impl fmt::Display for NoiseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(
            f,
            "{}({}; {} ops)",
            self.kind,
            params.join(", "),
            self.channel.len()
        )
    }
}

/// Unchecked wire form, rebuilt through [`build_kind`]
#[derive(Deserialize)]
struct NoiseHandleData {
    kind: NoiseKind,
    params: BTreeMap<String, f64>,
    channel: KrausChannel,
}

impl TryFrom<NoiseHandleData> for NoiseHandle {
    type Error = DqcError;

    fn try_from(data: NoiseHandleData) -> DqcResult<Self> {
        if let Some(name) = data.params.keys().find(|name| !data.kind.accepts(name)) {
            return Err(DqcError::InvalidConfig(format!(
                "{} has no parameter '{}'",
                data.kind, name
            )));
        }

        let mut params = NoiseParams::from(data.params);
        if data.kind.takes_operators() {
            params = params.with_operators(data.channel.operators().to_vec());
        }
        build_kind(data.kind, &params)
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Build a noise channel from a kind name and keyword parameters
///
/// Legacy spellings (`bitflip`, `Yflip`, `phaseflip`, `kraus`) are accepted.
/// Parameters the kind does not read are ignored with a warning.
///
/// # Errors
/// - `UnknownNoiseKind` for an unrecognized name
/// - `InvalidProbability` for a parameter outside [0, 1] or NaN
/// - `InvalidOperator` for custom operators that fail completeness
///
/// Gantree: build(kind, params) -> Result<NoiseHandle> // 팩토리
pub fn build(kind: &str, params: &NoiseParams) -> DqcResult<NoiseHandle> {
    let kind: NoiseKind = kind.parse()?;
    build_kind(kind, params)
}

/// Build a noise channel from an already-parsed kind
pub fn build_kind(kind: NoiseKind, params: &NoiseParams) -> DqcResult<NoiseHandle> {
    warn_unused(kind, params);

    let mut resolved = BTreeMap::new();
    for spec in kind.parameters() {
        let value = params.get(spec.name).unwrap_or(spec.default);
        let prob = Probability::named(spec.name, value)?;
        resolved.insert(spec.name.to_string(), prob.value());
    }

    let operators = kraus_operators(kind, &resolved, params)?;
    let channel = KrausChannel::new(operators)?.with_label(kind.as_str());

    log::debug!("built noise channel {} with {:?}", kind, resolved);

    Ok(NoiseHandle {
        kind,
        params: resolved,
        channel,
    })
}

fn warn_unused(kind: NoiseKind, params: &NoiseParams) {
    for name in params.names() {
        if !kind.accepts(name) {
            log::warn!("{} ignores parameter '{}'", kind, name);
        }
    }
    if params.operators().is_some() && !kind.takes_operators() {
        log::warn!("{} ignores the supplied operator list", kind);
    }
}

/// Kraus operators for `kind`, with every parameter already range-checked
fn kraus_operators(
    kind: NoiseKind,
    resolved: &BTreeMap<String, f64>,
    params: &NoiseParams,
) -> DqcResult<Vec<Matrix2>> {
    let get = |name: &str| resolved.get(name).copied().unwrap_or(0.0);

    let ops = match kind {
        NoiseKind::Depolarizing => {
            let p = get("p");
            let pauli = (p / 4.0).sqrt();
            vec![
                scale(&IDENTITY, (1.0 - 3.0 * p / 4.0).sqrt()),
                scale(&PAULI_X, pauli),
                scale(&PAULI_Y, pauli),
                scale(&PAULI_Z, pauli),
            ]
        }
        NoiseKind::BitFlip => pauli_flip(&PAULI_X, get("p")),
        NoiseKind::YFlip => pauli_flip(&PAULI_Y, get("p")),
        NoiseKind::PhaseFlip => pauli_flip(&PAULI_Z, get("p")),
        NoiseKind::AmplitudeDamping => {
            let gamma = get("gamma");
            vec![
                real([[1.0, 0.0], [0.0, (1.0 - gamma).sqrt()]]),
                real([[0.0, gamma.sqrt()], [0.0, 0.0]]),
            ]
        }
        NoiseKind::GeneralizedAmplitudeDamping => {
            let gamma = get("gamma");
            let p = get("p");
            let (ground, excited) = ((1.0 - p).sqrt(), p.sqrt());
            vec![
                scale(&real([[1.0, 0.0], [0.0, (1.0 - gamma).sqrt()]]), ground),
                scale(&real([[0.0, gamma.sqrt()], [0.0, 0.0]]), ground),
                scale(&real([[(1.0 - gamma).sqrt(), 0.0], [0.0, 1.0]]), excited),
                scale(&real([[0.0, 0.0], [gamma.sqrt(), 0.0]]), excited),
            ]
        }
        NoiseKind::PhaseDamping => {
            let lambda = get("gamma");
            vec![
                real([[1.0, 0.0], [0.0, (1.0 - lambda).sqrt()]]),
                real([[0.0, 0.0], [0.0, lambda.sqrt()]]),
            ]
        }
        NoiseKind::PhaseAmplitudeDamping => {
            let gamma = get("gamma");
            let lambda = get("lambda");
            if gamma + lambda > 1.0 + SUM_TOLERANCE {
                return Err(DqcError::InvalidProbability {
                    param: "gamma + lambda".to_string(),
                    value: gamma + lambda,
                });
            }
            let keep = (1.0 - gamma - lambda).max(0.0).sqrt();
            vec![
                real([[1.0, 0.0], [0.0, keep]]),
                real([[0.0, gamma.sqrt()], [0.0, 0.0]]),
                real([[0.0, 0.0], [0.0, lambda.sqrt()]]),
            ]
        }
        NoiseKind::KrausCustom => match params.operators() {
            Some(ops) => ops.to_vec(),
            None => vec![
                scale(&IDENTITY, 0.9_f64.sqrt()),
                scale(&PAULI_Z, 0.1_f64.sqrt()),
            ],
        },
    };
    Ok(ops)
}

fn pauli_flip(pauli: &Matrix2, p: f64) -> Vec<Matrix2> {
    vec![scale(&IDENTITY, (1.0 - p).sqrt()), scale(pauli, p.sqrt())]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use dqc_core::kraus::{dagger, matmul};

    fn assert_complete(handle: &NoiseHandle) {
        let mut sum = [[0.0_f64; 2]; 2];
        for k in handle.operators() {
            let kk = matmul(&dagger(k), k);
            for i in 0..2 {
                for j in 0..2 {
                    assert_abs_diff_eq!(kk[i][j].im, 0.0, epsilon = 1e-12);
                    sum[i][j] += kk[i][j].re;
                }
            }
        }
        assert_abs_diff_eq!(sum[0][0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sum[1][1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sum[0][1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sum[1][0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_every_kind_with_defaults() {
        for kind in NoiseKind::ALL {
            let handle = build(kind.as_str(), &NoiseParams::new()).unwrap();
            assert_eq!(handle.kind(), kind);
            assert_complete(&handle);
        }
    }

    #[test]
    fn test_defaults_resolved() {
        let gad = build("generalized_amplitude_damping", &NoiseParams::new()).unwrap();
        assert_eq!(gad.param("gamma"), Some(0.1));
        assert_eq!(gad.param("p"), Some(0.3));
        assert_eq!(gad.operators().len(), 4);

        let dep = build("depolarizing", &NoiseParams::new()).unwrap();
        assert_eq!(dep.param("p"), Some(0.1));
    }

    #[test]
    fn test_probability_bounds() {
        for p in [0.0, 0.5, 1.0] {
            let handle = NoiseHandle::depolarizing(p).unwrap();
            assert_eq!(handle.kind(), NoiseKind::Depolarizing);
            assert_complete(&handle);
        }

        for p in [-0.01, 1.5, f64::NAN] {
            let err = build("depolarizing", &NoiseParams::p(p)).unwrap_err();
            assert!(matches!(err, DqcError::InvalidProbability { ref param, .. } if param == "p"));
        }
    }

    #[test]
    fn test_second_parameter_checked() {
        let err = NoiseHandle::generalized_amplitude_damping(0.2, 1.2).unwrap_err();
        assert_eq!(
            err,
            DqcError::InvalidProbability {
                param: "p".into(),
                value: 1.2
            }
        );
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            build("foo", &NoiseParams::new()).unwrap_err(),
            DqcError::UnknownNoiseKind("foo".into())
        );
    }

    #[test]
    fn test_depolarizing_full_strength_weights() {
        // p = 1: every Pauli (identity included) with weight 1/4
        let handle = NoiseHandle::depolarizing(1.0).unwrap();
        for k in handle.operators() {
            let weight: f64 = k.iter().flatten().map(|c| c.norm_sqr()).sum::<f64>() / 2.0;
            assert_abs_diff_eq!(weight, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flip_channels() {
        let handle = NoiseHandle::bit_flip(0.3).unwrap();
        assert_abs_diff_eq!(handle.operators()[1][0][1].re, 0.3_f64.sqrt(), epsilon = 1e-12);

        let handle = NoiseHandle::phase_flip(0.3).unwrap();
        assert_abs_diff_eq!(handle.operators()[1][1][1].re, -(0.3_f64.sqrt()), epsilon = 1e-12);

        assert_complete(&NoiseHandle::y_flip(0.7).unwrap());
    }

    #[test]
    fn test_damping_channels() {
        let ad = NoiseHandle::amplitude_damping(1.0).unwrap();
        // |1⟩ decays to |0⟩ with certainty
        assert_abs_diff_eq!(ad.operators()[1][0][1].re, 1.0, epsilon = 1e-12);
        assert_complete(&ad);

        assert_complete(&NoiseHandle::phase_damping(0.4).unwrap());
        assert_complete(&NoiseHandle::generalized_amplitude_damping(0.6, 0.25).unwrap());
        assert!(NoiseHandle::amplitude_damping(2.0).is_err());
    }

    #[test]
    fn test_phase_amplitude_damping_sum() {
        assert_complete(&NoiseHandle::phase_amplitude_damping(0.4, 0.6).unwrap());

        let err = NoiseHandle::phase_amplitude_damping(0.7, 0.6).unwrap_err();
        assert!(matches!(
            err,
            DqcError::InvalidProbability { ref param, .. } if param == "gamma + lambda"
        ));
    }

    #[test]
    fn test_kraus_custom() {
        let default = build("kraus", &NoiseParams::new()).unwrap();
        assert_eq!(default.kind(), NoiseKind::KrausCustom);
        assert_eq!(default.operators().len(), 2);

        let ok = NoiseHandle::kraus_custom(vec![PAULI_X]).unwrap();
        assert!(ok.channel().is_unitary());

        let err = NoiseHandle::kraus_custom(vec![scale(&IDENTITY, 0.5)]).unwrap_err();
        assert!(matches!(err, DqcError::InvalidOperator(_)));
    }

    #[test]
    fn test_unused_params_ignored() {
        let params = NoiseParams::p(0.2).with("gamma", 5.0);
        let handle = build("bitflip", &params).unwrap();
        assert_eq!(handle.param("p"), Some(0.2));
        assert_eq!(handle.param("gamma"), None);
    }

    #[test]
    fn test_handle_reusable() {
        let handle = NoiseHandle::depolarizing(0.5).unwrap();
        let copy = handle.clone();
        assert_eq!(handle, copy);
        assert_eq!(handle.channel().label(), "depolarizing");
        assert_eq!(handle.to_string(), "depolarizing(p=0.5; 4 ops)");
    }

    #[test]
    fn test_out_of_range_parameter_per_kind() {
        for kind in NoiseKind::ALL {
            for spec in kind.parameters() {
                for bad in [-0.01, 1.5, f64::NAN] {
                    let params = NoiseParams::new().with(spec.name, bad);
                    let err = build_kind(kind, &params).unwrap_err();
                    assert!(
                        matches!(err, DqcError::InvalidProbability { ref param, .. } if param == spec.name),
                        "{} {}={} gave {:?}",
                        kind,
                        spec.name,
                        bad,
                        err
                    );
                }

                let handle = build_kind(kind, &NoiseParams::new().with(spec.name, 0.2)).unwrap();
                assert_eq!(handle.kind(), kind);
                assert_eq!(handle.param(spec.name), Some(0.2));
                assert_complete(&handle);
            }
        }
    }

    #[test]
    fn test_deserialize_rebuilds_channel() {
        let handle = NoiseHandle::generalized_amplitude_damping(0.2, 0.4).unwrap();
        let json = serde_json::to_string(&handle).unwrap();
        let back: NoiseHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handle);

        let custom = NoiseHandle::kraus_custom(vec![PAULI_Y]).unwrap();
        let back: NoiseHandle =
            serde_json::from_str(&serde_json::to_string(&custom).unwrap()).unwrap();
        assert_eq!(back, custom);

        let mut value = serde_json::to_value(&handle).unwrap();
        value["params"]["p"] = serde_json::json!(1.5);
        let err = serde_json::from_value::<NoiseHandle>(value).unwrap_err();
        assert!(err.to_string().contains("Invalid probability p=1.5"));

        let mut value = serde_json::to_value(&handle).unwrap();
        value["params"]["lambda"] = serde_json::json!(0.1);
        assert!(serde_json::from_value::<NoiseHandle>(value).is_err());
    }

    #[test]
    fn test_generalized_damping_is_thermal() {
        let gad = build(
            "generalized_amplitude_damping",
            &NoiseParams::gamma(0.2).with("p", 0.4),
        )
        .unwrap();
        assert_eq!(gad.operators().len(), 4);
        // Excited-state leg: √p·√gamma lifts |0⟩ to |1⟩
        assert_abs_diff_eq!(gad.operators()[3][1][0].re, (0.4_f64 * 0.2).sqrt(), epsilon = 1e-12);

        // The combined channel older scripts meant by that name
        let combined = NoiseHandle::phase_amplitude_damping(0.2, 0.4).unwrap();
        assert_eq!(combined.kind(), NoiseKind::PhaseAmplitudeDamping);
        assert_eq!(combined.operators().len(), 3);
        assert_ne!(gad.operators(), combined.operators());
    }
}
