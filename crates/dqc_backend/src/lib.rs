//! # DQC Backend
//!
//! Circuit execution and trajectory simulation for DQC.
//!
//! ## Gantree Architecture
//!
//! ```text
//! dqc_backend // L3: Backend (완료)
//!     BackendTrait // 백엔드 인터페이스 (완료)
//!         execute(), execute_batch(), max_shots()
//!     ExecutionResult // 실행 결과 (완료)
//!         probability(), most_frequent(), marginal(), bit_probability()
//!     SimulatorBackend // 궤적 시뮬레이터 (완료)
//!         mid-circuit measurement, Kraus sampling, if_test
//!     SimulatorConfig // 설정 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dqc_backend::prelude::*;
//! use dqc_core::CircuitBuilder;
//!
//! let backend = SimulatorBackend::ideal(2).with_seed(42);
//!
//! let circuit = CircuitBuilder::with_clbits(2, 2)
//!     .h(0)
//!     .cnot(0, 1)
//!     .measure(0, 0)
//!     .measure(1, 1)
//!     .build();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! println!("P(00) = {:.3}", result.probability("00"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (Gantree: L3_Backend)
pub mod execution;

/// Simulator configuration (Gantree: L3_Backend → SimulatorConfig)
pub mod config;

/// Simulator backend (Gantree: L3_Backend → SimulatorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SimulatorConfig;
pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use simulator::SimulatorBackend;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use dqc_backend::prelude::*;
    //! ```

    pub use crate::config::SimulatorConfig;
    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::SimulatorBackend;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use dqc_core::{Circuit, CircuitBuilder};
    use dqc_noise::NoiseHandle;

    #[test]
    fn test_bell_state() {
        let backend = SimulatorBackend::ideal(2).with_seed(42);

        let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).build();

        let result = backend.execute(&circuit, 10000).unwrap();

        let p00 = result.probability("00");
        let p11 = result.probability("11");

        assert!((p00 - 0.5).abs() < 0.05);
        assert!((p11 - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_depolarized_bell_half_decorrelates() {
        let backend = SimulatorBackend::ideal(2).with_seed(42);
        let noise = NoiseHandle::depolarizing(1.0).unwrap();

        let mut circuit = Circuit::with_clbits(2, 2);
        circuit.h(0).unwrap().cx(0, 1).unwrap();
        circuit.apply_channel(noise.channel(), 1).unwrap();
        circuit.measure(0, 0).unwrap().measure(1, 1).unwrap();

        let result = backend.execute(&circuit, 4000).unwrap();

        // Maximally mixed: all four outcomes near 1/4
        for key in ["00", "01", "10", "11"] {
            let p = result.probability(key);
            assert!((p - 0.25).abs() < 0.04, "P({}) = {}", key, p);
        }
    }

    #[test]
    fn test_amplitude_damping_relaxes() {
        let backend = SimulatorBackend::ideal(1).with_seed(8);
        let noise = NoiseHandle::amplitude_damping(1.0).unwrap();

        let circuit = CircuitBuilder::with_clbits(1, 1)
            .x(0)
            .channel(noise.channel(), 0)
            .measure(0, 0)
            .build();

        let result = backend.execute(&circuit, 200).unwrap();
        assert_eq!(result.probability("0"), 1.0);
    }

    #[test]
    fn test_phase_flip_invisible_in_z_basis() {
        let backend = SimulatorBackend::ideal(1).with_seed(4);
        let noise = NoiseHandle::phase_flip(0.5).unwrap();

        // Z errors only show up after rotating back to the Z basis
        let plain = CircuitBuilder::with_clbits(1, 1)
            .channel(noise.channel(), 0)
            .measure(0, 0)
            .build();
        assert_eq!(backend.execute(&plain, 500).unwrap().probability("0"), 1.0);

        let rotated = CircuitBuilder::with_clbits(1, 1)
            .h(0)
            .channel(noise.channel(), 0)
            .h(0)
            .measure(0, 0)
            .build();
        let p1 = backend.execute(&rotated, 4000).unwrap().probability("1");
        assert!((p1 - 0.5).abs() < 0.04, "P(1) = {}", p1);
    }

    #[test]
    fn test_batch_execution() {
        let backend = SimulatorBackend::ideal(3).with_seed(42);

        let circuits: Vec<_> = (0..5)
            .map(|i| CircuitBuilder::new(2).h(0).rz(0, i as f64 * 0.2).build())
            .collect();

        let results = backend.execute_batch(&circuits, 100).unwrap();

        assert_eq!(results.len(), 5);
        for result in &results {
            assert_eq!(result.shots, 100);
        }
    }
}
