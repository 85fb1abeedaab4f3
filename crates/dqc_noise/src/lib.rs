//! # DQC Noise
//!
//! Noise channel factory for the entanglement link.
//!
//! ## Gantree Architecture
//!
//! ```text
//! dqc_noise // L2: Noise Channels (완료)
//!     NoiseKind // 노이즈 종류 (완료)
//!         depolarizing, bit_flip, y_flip, phase_flip
//!         amplitude_damping, generalized_amplitude_damping
//!         phase_damping, phase_amplitude_damping, kraus_custom
//!         parameters(), FromStr (legacy aliases)
//!     NoiseParams // 키워드 파라미터 (완료)
//!     NoiseChannelFactory // 팩토리 (완료)
//!         build(kind, params) -> NoiseHandle
//!         range check -> Kraus operators -> completeness
//!     NoiseSpec // 직렬화 설정 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dqc_noise::prelude::*;
//!
//! let handle = build("depolarizing", &NoiseParams::p(0.5)).unwrap();
//! assert_eq!(handle.kind(), NoiseKind::Depolarizing);
//! assert_eq!(handle.operators().len(), 4);
//!
//! // Out-of-range probabilities never reach operator construction
//! assert!(build("depolarizing", &NoiseParams::p(1.5)).is_err());
//! ```
//!
//! ## From Configuration
//!
//! ```rust
//! use dqc_noise::prelude::*;
//!
//! let spec = NoiseSpec::from_json(r#"{"kind": "amplitude_damping", "params": {"gamma": 0.2}}"#)
//!     .unwrap();
//! let handle = spec.build().unwrap();
//! println!("{}", handle);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Noise kinds (Gantree: L2_Noise → NoiseKind)
pub mod kind;

/// Factory parameters (Gantree: L2_Noise → NoiseParams)
pub mod params;

/// Channel factory (Gantree: L2_Noise → NoiseChannelFactory)
pub mod factory;

/// Serializable configuration (Gantree: L2_Noise → NoiseSpec)
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::NoiseSpec;
pub use factory::{build, build_kind, NoiseHandle};
pub use kind::{NoiseKind, ParamSpec};
pub use params::NoiseParams;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::config::NoiseSpec;
    pub use crate::factory::{build, build_kind, NoiseHandle};
    pub use crate::kind::NoiseKind;
    pub use crate::params::NoiseParams;
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================
