//! # DQC Core
//!
//! Core types, Kraus operators, and circuits for the distributed quantum
//! computing link.
//!
//! ## Gantree Architecture
//!
//! ```text
//! dqc_core // L0+L1: Foundation + Circuit (완료)
//!     L0_Foundation // 기반 타입/에러 (완료)
//!         CoreTypes // QubitId, QubitRole, Probability, ClassicalRegister (완료)
//!         Errors // DqcError (완료)
//!     L1_Circuit // 회로 구조 (완료)
//!         Gate // 유니터리 게이트 (완료)
//!         KrausChannel // 크라우스 연산자 + 완전성 검증 (완료)
//!         Operation // 측정/노이즈/조건부 블록 (완료)
//!         Circuit // 추가 전용 연산 시퀀스 (완료)
//!         CircuitBuilder // 빌더 패턴 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dqc_core::prelude::*;
//!
//! // Bell pair with both halves measured
//! let circuit = CircuitBuilder::with_clbits(2, 2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .measure(0, 0)
//!     .measure(1, 1)
//!     .build();
//!
//! assert_eq!(circuit.count_2q(), 1);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Conditional Corrections
//!
//! ```rust
//! use dqc_core::prelude::*;
//!
//! let mut circuit = Circuit::new(2);
//! let reg = circuit.add_register("m", 1).unwrap();
//! circuit.h(0).unwrap().measure(0, reg.bit(0).unwrap()).unwrap();
//! circuit
//!     .if_test(reg.bit(0).unwrap(), true, vec![Gate::X(1).into()])
//!     .unwrap();
//!
//! assert_eq!(circuit.count_conditionals(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Kraus operators (Gantree: L1_Circuit → KrausChannel)
pub mod kraus;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Circuit operations (Gantree: L1_Circuit → Operation)
pub mod operation;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use error::{DqcError, DqcResult};
pub use gate::Gate;
pub use kraus::{KrausChannel, Matrix2};
pub use operation::Operation;
pub use types::{
    Angle, ClassicalRegister, ClbitId, Counts, IndexSpace, Probability, QubitId, QubitRole,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use dqc_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::error::{DqcError, DqcResult};
    pub use crate::gate::Gate;
    pub use crate::kraus::{KrausChannel, Matrix2};
    pub use crate::operation::Operation;
    pub use crate::types::{
        Angle, ClassicalRegister, ClbitId, Counts, IndexSpace, Probability, QubitId, QubitRole,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::kraus::{scale, IDENTITY, PAULI_Z};

    #[test]
    fn test_teleport_shaped_circuit() {
        // Same layout the link protocol produces: 4 qubits, one 2-bit register
        let mut circuit = Circuit::new(4);
        circuit.h(1).unwrap().cx(1, 2).unwrap();
        circuit.cx(0, 1).unwrap().cx(2, 3).unwrap().h(2).unwrap();

        let tele = circuit.add_register("tele", 2).unwrap();
        circuit.measure(1, tele.bit(0).unwrap()).unwrap();
        circuit.measure(2, tele.bit(1).unwrap()).unwrap();
        circuit
            .if_test(tele.bit(0).unwrap(), true, vec![Gate::X(3).into()])
            .unwrap();
        circuit
            .if_test(tele.bit(1).unwrap(), true, vec![Gate::Z(0).into()])
            .unwrap();

        assert_eq!(circuit.count_2q(), 3);
        assert_eq!(circuit.count_measurements(), 2);
        assert_eq!(circuit.count_conditionals(), 2);
        assert_eq!(circuit.used_qubits().len(), 4);
    }

    #[test]
    fn test_noisy_circuit_listing() {
        let channel = KrausChannel::new(vec![
            scale(&IDENTITY, 0.9_f64.sqrt()),
            scale(&PAULI_Z, 0.1_f64.sqrt()),
        ])
        .unwrap()
        .with_label("Transmission noise");

        let circuit = CircuitBuilder::new(2)
            .h(0)
            .cx(0, 1)
            .channel(&channel, 1)
            .try_build()
            .unwrap();

        assert_eq!(circuit.count_channels(), 1);
        assert!(circuit.to_qasm().contains("// Transmission noise(2 ops) q[1]"));
    }

    #[test]
    fn test_probability_validation() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        assert!(Probability::new(-0.1).is_err());
        assert!(Probability::new(1.1).is_err());
    }

    #[test]
    fn test_serde_roundtrip_circuit() {
        let circuit = CircuitBuilder::with_clbits(2, 1)
            .ry(0, 0.25)
            .cx(0, 1)
            .measure(1, 0)
            .build();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(circuit, back);
    }
}
