// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Liouville-space assembly.
//!
//! Parsed Hamiltonian terms are lifted into superoperators on the
//! vectorized density matrix via Kronecker products; qubit decay enters as
//! Lindblad dissipators. Without dissipators the assembly falls back to the
//! Schrödinger generator on the Hilbert-space vector.

pub mod builder;
pub mod kron;

pub use builder::{Liouvillian, LiouvillianBuilder, SolveMode, TimeDepTerm};
