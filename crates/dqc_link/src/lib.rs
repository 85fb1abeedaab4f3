//! # DQC Link
//!
//! Point-to-point quantum teleportation link between two processing nodes.
//!
//! ## Gantree Architecture
//!
//! ```text
//! dqc_link // L4: Teleportation Link (완료)
//!     QubitRoleRegistry // 역할 테이블 (완료)
//!         assign_roles(), require_role(), consumed tracking
//!     DqcCircuit // 역할 포함 회로 (완료)
//!     EntanglementLinkBuilder // 벨 쌍 + 전송 노이즈 (완료)
//!         generate_bell(), generate_bell_local()
//!     TeleportationProtocol // 텔레포트 (완료)
//!         CX, CX, H, measure x2, if_test X / Z
//!     LinkConfig // 링크 설정 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dqc_link::prelude::*;
//!
//! let mut dqc = DqcCircuit::new(4);
//! dqc.assign_roles([1, 2]).unwrap();
//!
//! let noise = build("depolarizing", &NoiseParams::p(0.1)).unwrap();
//! dqc.generate_bell(1, 2, Some(&noise)).unwrap();
//!
//! // source 0, local 1, remote 2, destination 3
//! let outcome = dqc.teleport(0, 1, 2, 3).unwrap();
//! assert_eq!(outcome.len(), 2);
//! println!("{}", dqc.circuit().to_qasm());
//! ```
//!
//! ## From Configuration
//!
//! ```rust
//! use dqc_link::prelude::*;
//!
//! let (mut dqc, noise) = LinkConfig::two_node_4q().build_circuit().unwrap();
//! dqc.circuit_mut().h(0).unwrap();
//! dqc.generate_bell(1, 2, noise.as_ref()).unwrap();
//! dqc.teleport(0, 1, 2, 3).unwrap();
//! dqc.measure_all().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Qubit roles (Gantree: L4_Link → QubitRoleRegistry)
pub mod roles;

/// Role-aware circuit (Gantree: L4_Link → DqcCircuit)
pub mod circuit;

/// Bell pair generation (Gantree: L4_Link → EntanglementLinkBuilder)
pub mod entanglement;

/// Teleportation (Gantree: L4_Link → TeleportationProtocol)
pub mod teleport;

/// Link configuration (Gantree: L4_Link → LinkConfig)
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use circuit::DqcCircuit;
pub use config::LinkConfig;
pub use entanglement::TRANSMISSION_LABEL;
pub use roles::QubitRoleRegistry;
pub use teleport::TELEPORT_REGISTER;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Link types plus the core and noise items needed to drive them
    //!
    //! ```rust
    //! use dqc_link::prelude::*;
    //! ```

    pub use crate::circuit::DqcCircuit;
    pub use crate::config::LinkConfig;
    pub use crate::roles::QubitRoleRegistry;
    pub use dqc_core::{ClassicalRegister, DqcError, DqcResult, QubitId, QubitRole};
    pub use dqc_noise::{build, NoiseHandle, NoiseKind, NoiseParams, NoiseSpec};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
