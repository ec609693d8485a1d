// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Step events.
//!
//! Events fire between accepted steps and never terminate the integration.
//! In Lindblad mode a normalize event fires at every accepted step to
//! correct numerical trace drift. Gate crossings belong to circuit mode;
//! the pulse engine only carries the interface.

use ndarray::Array1;
use num_complex::Complex64;

use crate::liouville::{Liouvillian, SolveMode};

/// Handler classes the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Rescale the state so Tr(ρ) = 1 (Lindblad) or ‖ψ‖ = 1 (Schrödinger).
    Normalize,
    /// A gate boundary was crossed (circuit mode). Interface only; the
    /// pulse engine never schedules it.
    GateCrossing { time: f64 },
}

/// Renormalize the state in place. Returns the pre-normalization trace
/// (or squared norm) for diagnostics; a value near zero leaves the state
/// untouched.
pub(crate) fn apply_normalize(sys: &Liouvillian, y: &mut Array1<Complex64>) -> f64 {
    let measure = sys.trace(y);
    let scale = match sys.mode {
        SolveMode::Lindblad => measure,
        SolveMode::Schroedinger => measure.sqrt(),
    };
    if scale.abs() > 1e-300 {
        let inv = Complex64::new(1.0 / scale, 0.0);
        y.mapv_inplace(|z| z * inv);
    }
    measure
}
