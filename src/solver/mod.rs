// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-stepping engine.
//!
//! Advances dy/dt = B(t)·y with adaptive step-size control: the explicit
//! Bogacki–Shampine 3(2) pair by default, a Rosenbrock-W alternative when
//! the problem is flagged stiff. The engine stops at t ≥ t_max (exact final
//! time is stepped over, never interpolated), after `step_max` steps, or
//! when the monitor requests it. Rejected trial steps are invisible to the
//! monitor and the recorded trajectory.

pub mod events;
mod linalg;
mod rk;
mod rosenbrock;

use ndarray::Array1;
use num_complex::Complex64;
use tracing::{debug, info, warn};

use crate::error::{IntegratorError, Result};
use crate::liouville::{Liouvillian, SolveMode};
use crate::pulse::PulseChannelController;

pub use events::Event;
use events::apply_normalize;
use rk::{bs32_step, RhsEval, Workspace};
use rosenbrock::ros2_step;

/// Step-size safety factor and growth clamps shared by both steppers.
const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

/// Integration options.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Integration horizon; the final accepted step may overshoot it.
    pub t_max: f64,
    /// Initial step size.
    pub dt: f64,
    /// Hard cap on accepted steps; reaching it is a normal stop.
    pub step_max: usize,
    /// Relative tolerance of the local error test.
    pub rtol: f64,
    /// Absolute tolerance of the local error test.
    pub atol: f64,
    /// Select the Rosenbrock-W branch.
    pub stiff: bool,
}

impl SolverOptions {
    pub fn new(t_max: f64, dt: f64, step_max: usize) -> Self {
        Self {
            t_max,
            dt,
            step_max,
            rtol: 1e-8,
            atol: 1e-10,
            stiff: false,
        }
    }
}

/// Populations recorded at one accepted step.
#[derive(Debug, Clone, PartialEq)]
pub struct TsData {
    pub time: f64,
    /// Computational-basis diagonal, length 2ᴺ.
    pub populations: Vec<f64>,
}

/// Monitor verdict after an accepted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorControl {
    Continue,
    Stop,
}

/// Read-only view of the state handed to the monitor.
pub struct StateView<'a> {
    sys: &'a Liouvillian,
    y: &'a Array1<Complex64>,
}

impl StateView<'_> {
    pub fn mode(&self) -> SolveMode {
        self.sys.mode
    }

    pub fn populations(&self) -> Vec<f64> {
        self.sys.populations(self.y)
    }

    /// Tr(ρ), or ⟨ψ|ψ⟩ in Schrödinger mode.
    pub fn trace(&self) -> f64 {
        self.sys.trace(self.y)
    }

    pub fn raw(&self) -> &Array1<Complex64> {
        self.y
    }
}

/// Monitor callback: (step index, time, state) → continue/stop.
pub type Monitor = Box<dyn FnMut(usize, f64, &StateView<'_>) -> MonitorControl>;

/// Completed integration.
#[derive(Debug, Clone)]
pub struct Evolution {
    /// Final state vector (vec(ρ) or |ψ⟩).
    pub y: Array1<Complex64>,
    /// Per-step population trajectory, initial state included.
    pub ts_data: Vec<TsData>,
    /// Accepted steps taken.
    pub steps: usize,
    /// Time actually reached (≥ t_max unless stopped early).
    pub t_final: f64,
}

/// Integrate the assembled system from `y0` over `[0, t_max]`.
pub fn evolve(
    sys: &Liouvillian,
    controller: &PulseChannelController,
    y0: Array1<Complex64>,
    opts: &SolverOptions,
    mut monitor: Option<&mut dyn FnMut(usize, f64, &StateView<'_>) -> MonitorControl>,
) -> Result<Evolution> {
    if !(opts.dt > 0.0) {
        return Err(IntegratorError::StepSizeCollapse { t: 0.0, dt: opts.dt }.into());
    }

    let mut y = y0;
    let mut t = 0.0;
    let mut dt = opts.dt;
    let dt_min = 1e-14 * opts.t_max.max(1.0);
    // The local error exponent follows the embedded order: 1/3 for the
    // 3(2) pair, 1/2 for ROS2.
    let exponent = if opts.stiff { 0.5 } else { 1.0 / 3.0 };

    let mut rhs = RhsEval::new(sys, controller);
    let mut ws = Workspace::new(sys.dim);
    let events: &[Event] = match sys.mode {
        SolveMode::Lindblad => &[Event::Normalize],
        SolveMode::Schroedinger => &[],
    };

    info!(
        mode = ?sys.mode,
        dim = sys.dim,
        t_max = opts.t_max,
        stiff = opts.stiff,
        "starting integration"
    );

    let mut ts_data = vec![TsData {
        time: 0.0,
        populations: sys.populations(&y),
    }];
    let mut steps = 0usize;

    while t < opts.t_max && steps < opts.step_max {
        let trial = if opts.stiff {
            ros2_step(&mut rhs, t, &y, dt, opts.atol, opts.rtol)?
        } else {
            bs32_step(&mut rhs, t, &y, dt, opts.atol, opts.rtol, &mut ws)
        };

        let factor = (SAFETY * trial.err.max(1e-10).powf(-exponent)).clamp(MIN_FACTOR, MAX_FACTOR);

        if trial.err > 1.0 {
            dt *= factor;
            if dt < dt_min {
                return Err(IntegratorError::StepSizeCollapse { t, dt }.into());
            }
            continue;
        }

        if !trial.y_new.iter().all(|z| z.re.is_finite() && z.im.is_finite()) {
            // y keeps its last accepted value.
            return Err(IntegratorError::NonFiniteState { t: t + dt }.into());
        }

        t += dt;
        y = trial.y_new;
        steps += 1;

        for event in events {
            match event {
                Event::Normalize => {
                    apply_normalize(sys, &mut y);
                }
                Event::GateCrossing { .. } => {}
            }
        }

        ts_data.push(TsData {
            time: t,
            populations: sys.populations(&y),
        });

        if let Some(callback) = monitor.as_mut() {
            let view = StateView { sys, y: &y };
            if callback(steps, t, &view) == MonitorControl::Stop {
                debug!(step = steps, t, "monitor requested stop");
                break;
            }
        }

        dt *= factor;
    }

    info!(steps, t_final = t, "integration finished");
    Ok(Evolution {
        y,
        ts_data,
        steps,
        t_final: t,
    })
}

/// Solve for the steady state of the assembled Lindbladian.
///
/// The trace constraint is folded into the first row (1.0 added at every
/// diagonal position of vec(ρ)) and the resulting linear system is solved
/// directly. Time-dependent terms have no value at t → ∞ and are ignored.
/// Returns the computational-basis populations of the steady state.
pub fn steady_state(sys: &Liouvillian) -> Result<Vec<f64>> {
    if sys.mode != SolveMode::Lindblad {
        return Err(IntegratorError::SteadyStateUnsupported(
            "no Lindblad terms; the Schrodinger generator has no steady state".into(),
        )
        .into());
    }
    if !sys.time_dep.is_empty() {
        warn!(
            terms = sys.time_dep.len(),
            "time-dependent terms are ignored in the steady-state solve"
        );
    }

    let d = sys.hilbert_dim();
    let mut a = sys.drift.clone();
    for i in 0..d {
        a[[0, i * (d + 1)]] += 1.0;
    }
    let mut b = Array1::zeros(sys.dim);
    b[0] = Complex64::new(1.0, 0.0);

    let x = linalg::solve_dense(a, &b)
        .ok_or_else(|| IntegratorError::SingularSystem("steady-state matrix".into()))?;
    Ok(sys.populations(&x))
}
