// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rosenbrock-W stepping for stiff problems.
//!
//! Two-stage, second-order, L-stable ROS2 with γ = 1 + 1/√2. Each stage
//! solves (I − γ·dt·B(t))·k = r; the factorization is shared between the
//! stages. An embedded first-order solution provides the error estimate.
//!
//! Ref: Verwer, Spee, Blom & Hundsdorfer (1999), "A second-order Rosenbrock
//! method applied to photochemical dispersion problems", SIAM J. Sci.
//! Comput. 20(4), 1456.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::IntegratorError;

use super::linalg::LuFactors;
use super::rk::{error_norm, RhsEval, StepResult};

/// One trial ROS2 step from (t, y) over dt.
///
/// Fails only when the stage matrix cannot be factored; step-size control
/// is the caller's job.
pub(crate) fn ros2_step(
    rhs: &mut RhsEval<'_>,
    t: f64,
    y: &Array1<Complex64>,
    dt: f64,
    atol: f64,
    rtol: f64,
) -> Result<StepResult, IntegratorError> {
    let dim = y.len();
    let gamma = 1.0 + 1.0 / std::f64::consts::SQRT_2;

    // W = I − γ·dt·B(t), factored once for both stages.
    let b_now = rhs.matrix_at(t);
    let mut w = Array2::<Complex64>::zeros((dim, dim));
    let scale = Complex64::new(-gamma * dt, 0.0);
    for ((i, j), val) in b_now.indexed_iter() {
        w[[i, j]] = scale * val;
        if i == j {
            w[[i, j]] += 1.0;
        }
    }
    let factors = LuFactors::factor(w).ok_or_else(|| {
        IntegratorError::SingularSystem(format!("Rosenbrock stage matrix at t = {t:.6}"))
    })?;

    // Stage 1: W·k1 = dt·f(t, y)
    let mut f1 = Array1::zeros(dim);
    rhs.eval(t, y, &mut f1);
    let dt_c = Complex64::new(dt, 0.0);
    let k1 = factors.solve(&(f1 * dt_c));

    // Stage 2: W·k2 = dt·f(t + dt, y + k1) − 2·k1
    let y1 = y + &k1;
    let mut f2 = Array1::zeros(dim);
    rhs.eval(t + dt, &y1, &mut f2);
    let two = Complex64::new(2.0, 0.0);
    let rhs2 = f2 * dt_c - &k1 * two;
    let k2 = factors.solve(&rhs2);

    // y_{n+1} = y_n + (3/2)k1 + (1/2)k2, embedded ŷ = y_n + k1.
    let mut y_new = Array1::zeros(dim);
    let mut err_vec = Array1::zeros(dim);
    for i in 0..dim {
        y_new[i] = y[i] + 1.5 * k1[i] + 0.5 * k2[i];
        err_vec[i] = 0.5 * (k1[i] + k2[i]);
    }

    let err = error_norm(&err_vec, y, &y_new, atol, rtol);
    Ok(StepResult { y_new, err })
}
