// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse-level open-quantum-system simulator.
//!
//! Simulates a small qubit register driven by analog control pulses under
//! the Lindblad master equation. A symbolic Hamiltonian description (Pauli
//! products with complex coefficients, variable substitution, bounded
//! summation, channel tags) is compiled into a superoperator on the
//! vectorized density matrix and integrated with adaptive Runge–Kutta.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  Hamiltonian   │   │   Superoperator   │   │  Time stepping   │
//! │  parser        │──▶│   builder         │──▶│  (BS3(2)/ROS2)   │
//! │  (term trees)  │   │   (Kron lifting)  │   │  + events        │
//! └────────────────┘   └──────────────────┘   └──────────────────┘
//!          ▲                     ▲
//!    vars, h_str        pulse channel controller
//!                     (waveforms · LO · frame changes)
//! ```
//!
//! # Example
//!
//! ```
//! use pulse_sim::hamiltonian::parse_hamiltonian_json;
//! use pulse_sim::pulse::{BackendChannelConfig, PulseChannelController};
//! use pulse_sim::Instance;
//!
//! let controller = PulseChannelController::new(
//!     BackendChannelConfig::new(0.1, vec![0.0]),
//! ).unwrap();
//! let mut instance = Instance::initialize(1, 0.01, 1.0, 100_000, controller).unwrap();
//!
//! let terms = parse_hamiltonian_json(
//!     r#"{"h_str": ["omega*Z0"], "vars": {"omega": 3.1}}"#,
//! ).unwrap();
//! for term in &terms {
//!     instance.install_term(term).unwrap();
//! }
//! instance.add_qubit_decay(0, 1e-3).unwrap();
//!
//! let result = instance.run().unwrap();
//! assert!(result.step_count > 0);
//! ```

pub mod algebra;
pub mod error;
pub mod export;
pub mod expr;
pub mod hamiltonian;
pub mod instance;
pub mod liouville;
pub mod logging;
pub mod pulse;
pub mod solver;

pub use error::{AssemblyError, Error, IntegratorError, ParseError, Result};
pub use instance::{Instance, RunResult};
pub use logging::{init_logging, LogVerbosity};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
