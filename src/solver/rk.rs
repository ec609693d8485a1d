// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adaptive Bogacki–Shampine 3(2) stepping.
//!
//! Third-order accepted solution with an embedded second-order error
//! estimate, the default explicit pair for the non-stiff path.
//!
//! Ref: Bogacki & Shampine (1989), "A 3(2) pair of Runge–Kutta formulas",
//! Appl. Math. Lett. 2(4), 321.

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::liouville::Liouvillian;
use crate::pulse::PulseChannelController;

/// Evaluates dy/dt = B(t)·y with one working matrix reused across stage
/// evaluations. A drift-only system materializes B once.
pub(crate) struct RhsEval<'a> {
    sys: &'a Liouvillian,
    controller: &'a PulseChannelController,
    work: Array2<Complex64>,
    constant: bool,
}

impl<'a> RhsEval<'a> {
    pub fn new(sys: &'a Liouvillian, controller: &'a PulseChannelController) -> Self {
        let mut work = Array2::zeros((sys.dim, sys.dim));
        let constant = sys.time_dep.is_empty();
        if constant {
            work.assign(&sys.drift);
        }
        Self {
            sys,
            controller,
            work,
            constant,
        }
    }

    /// Materialize B(t) into the working matrix and return it.
    pub fn matrix_at(&mut self, t: f64) -> &Array2<Complex64> {
        if !self.constant {
            self.sys.rhs_matrix(self.controller, t, &mut self.work);
        }
        &self.work
    }

    /// out = B(t)·y
    pub fn eval(&mut self, t: f64, y: &Array1<Complex64>, out: &mut Array1<Complex64>) {
        if !self.constant {
            self.sys.rhs_matrix(self.controller, t, &mut self.work);
        }
        general_mat_vec_mul(
            Complex64::new(1.0, 0.0),
            &self.work,
            y,
            Complex64::new(0.0, 0.0),
            out,
        );
    }
}

/// Preallocated stage buffers.
pub(crate) struct Workspace {
    k1: Array1<Complex64>,
    k2: Array1<Complex64>,
    k3: Array1<Complex64>,
    k4: Array1<Complex64>,
    stage: Array1<Complex64>,
}

impl Workspace {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: Array1::zeros(dim),
            k2: Array1::zeros(dim),
            k3: Array1::zeros(dim),
            k4: Array1::zeros(dim),
            stage: Array1::zeros(dim),
        }
    }
}

/// Outcome of one trial step: the candidate state and the scaled error
/// norm (≤ 1 means accept).
pub(crate) struct StepResult {
    pub y_new: Array1<Complex64>,
    pub err: f64,
}

/// Weighted max-norm of the embedded error estimate.
pub(crate) fn error_norm(
    err_vec: &Array1<Complex64>,
    y_old: &Array1<Complex64>,
    y_new: &Array1<Complex64>,
    atol: f64,
    rtol: f64,
) -> f64 {
    let mut norm = 0.0f64;
    for i in 0..err_vec.len() {
        let scale = atol + rtol * y_old[i].norm().max(y_new[i].norm());
        norm = norm.max(err_vec[i].norm() / scale);
    }
    norm
}

/// One trial Bogacki–Shampine 3(2) step from (t, y) over dt.
pub(crate) fn bs32_step(
    rhs: &mut RhsEval<'_>,
    t: f64,
    y: &Array1<Complex64>,
    dt: f64,
    atol: f64,
    rtol: f64,
    ws: &mut Workspace,
) -> StepResult {
    let dim = y.len();
    let dt_c = Complex64::new(dt, 0.0);

    rhs.eval(t, y, &mut ws.k1);

    // k2 = f(t + dt/2, y + dt/2·k1)
    for i in 0..dim {
        ws.stage[i] = y[i] + dt_c * 0.5 * ws.k1[i];
    }
    rhs.eval(t + 0.5 * dt, &ws.stage, &mut ws.k2);

    // k3 = f(t + 3dt/4, y + 3dt/4·k2)
    for i in 0..dim {
        ws.stage[i] = y[i] + dt_c * 0.75 * ws.k2[i];
    }
    rhs.eval(t + 0.75 * dt, &ws.stage, &mut ws.k3);

    // Third-order solution.
    let (b1, b2, b3) = (2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0);
    let mut y_new = Array1::zeros(dim);
    for i in 0..dim {
        y_new[i] = y[i] + dt_c * (b1 * ws.k1[i] + b2 * ws.k2[i] + b3 * ws.k3[i]);
    }

    // Embedded second-order solution through the FSAL stage.
    rhs.eval(t + dt, &y_new, &mut ws.k4);
    let (e1, e2, e3, e4) = (7.0 / 24.0, 0.25, 1.0 / 3.0, 0.125);
    for i in 0..dim {
        let y2 = y[i] + dt_c * (e1 * ws.k1[i] + e2 * ws.k2[i] + e3 * ws.k3[i] + e4 * ws.k4[i]);
        ws.stage[i] = y_new[i] - y2;
    }

    let err = error_norm(&ws.stage, y, &y_new, atol, rtol);
    StepResult { y_new, err }
}
