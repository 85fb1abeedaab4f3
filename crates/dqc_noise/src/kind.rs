//! Noise channel kinds
//!
//! Gantree: L2_Noise → NoiseKind
//!
//! Closed set of single-qubit channel families the factory can build, with
//! the parameters each one reads and their defaults.

use dqc_core::{DqcError, DqcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named parameter of a noise kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Parameter name as passed by callers
    pub name: &'static str,
    /// Value used when the caller omits it
    pub default: f64,
}

impl ParamSpec {
    const fn new(name: &'static str, default: f64) -> Self {
        Self { name, default }
    }
}

const P_ONLY: &[ParamSpec] = &[ParamSpec::new("p", 0.1)];
const GAMMA_ONLY: &[ParamSpec] = &[ParamSpec::new("gamma", 0.1)];
const GAMMA_P: &[ParamSpec] = &[ParamSpec::new("gamma", 0.1), ParamSpec::new("p", 0.3)];
const GAMMA_LAMBDA: &[ParamSpec] = &[
    ParamSpec::new("gamma", 0.1),
    ParamSpec::new("lambda", 0.3),
];

/// Noise channel family
/// Gantree: NoiseKind // 노이즈 종류 enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Symmetric depolarizing: I with 1-3p/4, X/Y/Z with p/4 each
    /// Gantree: Depolarizing // p
    Depolarizing,

    /// X with probability p
    /// Gantree: BitFlip // p
    BitFlip,

    /// Y with probability p
    YFlip,

    /// Z with probability p
    /// Gantree: PhaseFlip // p
    PhaseFlip,

    /// Energy relaxation towards |0⟩
    /// Gantree: AmplitudeDamping // gamma
    AmplitudeDamping,

    /// Relaxation towards a thermal state with excited population p
    ///
    /// This is true generalized amplitude damping: four Kraus operators,
    /// √(1-p)·{A0, A1} and √p·{A2, A3}. Older link scripts used the name
    /// `generalized_amplitude_damping` for combined amplitude and phase
    /// damping with (gamma, p). When porting such a script, build
    /// [`NoiseKind::PhaseAmplitudeDamping`] with `lambda` set to the old `p`.
    /// Gantree: GeneralizedAmplitudeDamping // gamma, p
    GeneralizedAmplitudeDamping,

    /// Loss of coherence without energy exchange
    /// Gantree: PhaseDamping // gamma
    PhaseDamping,

    /// Combined amplitude and phase damping
    /// Gantree: PhaseAmplitudeDamping // gamma, lambda
    PhaseAmplitudeDamping,

    /// Caller-supplied Kraus operators
    /// Gantree: KrausCustom // operators
    KrausCustom,
}

impl NoiseKind {
    /// Every kind, in declaration order
    pub const ALL: [NoiseKind; 9] = [
        NoiseKind::Depolarizing,
        NoiseKind::BitFlip,
        NoiseKind::YFlip,
        NoiseKind::PhaseFlip,
        NoiseKind::AmplitudeDamping,
        NoiseKind::GeneralizedAmplitudeDamping,
        NoiseKind::PhaseDamping,
        NoiseKind::PhaseAmplitudeDamping,
        NoiseKind::KrausCustom,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseKind::Depolarizing => "depolarizing",
            NoiseKind::BitFlip => "bit_flip",
            NoiseKind::YFlip => "y_flip",
            NoiseKind::PhaseFlip => "phase_flip",
            NoiseKind::AmplitudeDamping => "amplitude_damping",
            NoiseKind::GeneralizedAmplitudeDamping => "generalized_amplitude_damping",
            NoiseKind::PhaseDamping => "phase_damping",
            NoiseKind::PhaseAmplitudeDamping => "phase_amplitude_damping",
            NoiseKind::KrausCustom => "kraus_custom",
        }
    }

    /// Scalar parameters this kind reads, with defaults
    /// Gantree: parameters(&self) -> &[ParamSpec] // 파라미터 목록
    pub fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            NoiseKind::Depolarizing
            | NoiseKind::BitFlip
            | NoiseKind::YFlip
            | NoiseKind::PhaseFlip => P_ONLY,
            NoiseKind::AmplitudeDamping | NoiseKind::PhaseDamping => GAMMA_ONLY,
            NoiseKind::GeneralizedAmplitudeDamping => GAMMA_P,
            NoiseKind::PhaseAmplitudeDamping => GAMMA_LAMBDA,
            NoiseKind::KrausCustom => &[],
        }
    }

    /// Whether this kind reads a caller-supplied operator list
    pub fn takes_operators(&self) -> bool {
        matches!(self, NoiseKind::KrausCustom)
    }

    /// Whether `name` is one of this kind's scalar parameters
    pub fn accepts(&self, name: &str) -> bool {
        self.parameters().iter().any(|spec| spec.name == name)
    }
}

impl FromStr for NoiseKind {
    type Err = DqcError;

    /// Parse a canonical name or one of the legacy spellings
    /// (`bitflip`, `Yflip`, `phaseflip`, `kraus`)
    fn from_str(s: &str) -> DqcResult<Self> {
        let kind = match s {
            "depolarizing" => NoiseKind::Depolarizing,
            "bit_flip" | "bitflip" => NoiseKind::BitFlip,
            "y_flip" | "Yflip" => NoiseKind::YFlip,
            "phase_flip" | "phaseflip" => NoiseKind::PhaseFlip,
            "amplitude_damping" => NoiseKind::AmplitudeDamping,
            "generalized_amplitude_damping" => NoiseKind::GeneralizedAmplitudeDamping,
            "phase_damping" => NoiseKind::PhaseDamping,
            "phase_amplitude_damping" => NoiseKind::PhaseAmplitudeDamping,
            "kraus_custom" | "kraus" => NoiseKind::KrausCustom,
            other => return Err(DqcError::UnknownNoiseKind(other.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_roundtrip() {
        for kind in NoiseKind::ALL {
            assert_eq!(kind.as_str().parse::<NoiseKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!("bitflip".parse::<NoiseKind>().unwrap(), NoiseKind::BitFlip);
        assert_eq!("Yflip".parse::<NoiseKind>().unwrap(), NoiseKind::YFlip);
        assert_eq!(
            "phaseflip".parse::<NoiseKind>().unwrap(),
            NoiseKind::PhaseFlip
        );
        assert_eq!("kraus".parse::<NoiseKind>().unwrap(), NoiseKind::KrausCustom);
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "foo".parse::<NoiseKind>().unwrap_err(),
            DqcError::UnknownNoiseKind("foo".into())
        );
        // Names are case sensitive
        assert!("Depolarizing".parse::<NoiseKind>().is_err());
    }

    #[test]
    fn test_parameter_defaults() {
        let gad = NoiseKind::GeneralizedAmplitudeDamping.parameters();
        assert_eq!(gad[0].name, "gamma");
        assert_eq!(gad[1].default, 0.3);

        assert!(NoiseKind::Depolarizing.accepts("p"));
        assert!(!NoiseKind::Depolarizing.accepts("gamma"));
        assert!(NoiseKind::KrausCustom.parameters().is_empty());
        assert!(NoiseKind::KrausCustom.takes_operators());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&NoiseKind::GeneralizedAmplitudeDamping).unwrap();
        assert_eq!(json, "\"generalized_amplitude_damping\"");
    }
}
