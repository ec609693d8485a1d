// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures.

use ndarray::Array2;
use num_complex::Complex64;

use crate::pulse::BackendChannelConfig;

/// Mock one-qubit OpenPulse backend: the sample period and LO frequency of
/// the reference fake backend, plus three small test pulses.
pub fn fake_1q_backend() -> BackendChannelConfig {
    let i = Complex64::new(0.0, 1.0);
    let zero = Complex64::new(0.0, 0.0);
    let mut config = BackendChannelConfig::new(3.5555555555555554, vec![4.919909215047782]);
    config.add_pulse("test_pulse_1", vec![zero, 0.1 * i]);
    config.add_pulse("test_pulse_2", vec![zero, 0.1 * i, i]);
    config.add_pulse(
        "test_pulse_3",
        vec![zero, 0.1 * i, i, Complex64::new(0.5, 0.0)],
    );
    config
}

/// ρ = |1⟩⟨1|
pub fn excited_rho() -> Array2<Complex64> {
    let mut rho = Array2::zeros((2, 2));
    rho[[1, 1]] = Complex64::new(1.0, 0.0);
    rho
}

/// ρ = |+⟩⟨+|
pub fn plus_rho() -> Array2<Complex64> {
    let half = Complex64::new(0.5, 0.0);
    Array2::from_elem((2, 2), half)
}
