// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Simulation instance lifecycle.
//!
//! An [`Instance`] owns the qubit register, the state vector, the term
//! builder, the pulse channel controller, and the monitor. It is the
//! binding-agnostic runtime surface: create qubits, install Hamiltonian
//! terms (typed or parsed), add decay, run, read results, clear.
//!
//! One integrator per instance: the drift and working matrices are mutated
//! during assembly and RHS evaluation, so `run` takes `&mut self`. Multiple
//! instances coexist independently.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use tracing::info;

use crate::algebra::{PauliOp, QubitOperand};
use crate::error::{AssemblyError, Error, Result};
use crate::hamiltonian::TermTree;
use crate::liouville::{LiouvillianBuilder, SolveMode};
use crate::logging::LogVerbosity;
use crate::pulse::PulseChannelController;
use crate::solver::{self, Monitor, MonitorControl, SolverOptions, StateView, TsData};

/// Initial state of the register.
#[derive(Debug, Clone, Default)]
enum InitialState {
    /// |0…0⟩⟨0…0|
    #[default]
    Ground,
    /// A pure state |ψ⟩, length 2ᴺ.
    Pure(Array1<Complex64>),
    /// A density matrix, 2ᴺ × 2ᴺ. Requires Lindblad mode.
    Density(Array2<Complex64>),
}

/// Result of one integration run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Per-qubit excited-state occupation of the final state.
    pub expectations: Vec<f64>,
    /// Accepted steps taken.
    pub step_count: usize,
    /// Per-step population trajectory, initial state included.
    pub ts_data: Vec<TsData>,
}

/// A pulse-simulation instance.
pub struct Instance {
    num_qubits: usize,
    levels: usize,
    qubits_created: bool,
    t_max: f64,
    dt: f64,
    step_max: usize,
    stiff: bool,
    verbosity: LogVerbosity,
    controller: PulseChannelController,
    builder: LiouvillianBuilder,
    initial: InitialState,
    monitor: Option<Monitor>,
    state: Option<Array1<Complex64>>,
    node_id: usize,
    num_nodes: usize,
}

impl Instance {
    /// Create an instance for `num_qubits` qubits integrating over
    /// `[0, t_max]` with initial step `dt` and at most `step_max` steps.
    pub fn initialize(
        num_qubits: usize,
        dt: f64,
        t_max: f64,
        step_max: usize,
        controller: PulseChannelController,
    ) -> Result<Self> {
        if num_qubits == 0 {
            return Err(Error::Resource("register needs at least one qubit".into()));
        }
        if !(dt > 0.0) || !(t_max > 0.0) {
            return Err(Error::Resource(format!(
                "dt and t_max must be positive, got dt = {dt}, t_max = {t_max}"
            )));
        }
        info!(num_qubits, dt, t_max, step_max, "pulse simulator initialized");
        Ok(Self {
            num_qubits,
            levels: 2,
            qubits_created: false,
            t_max,
            dt,
            step_max,
            stiff: false,
            verbosity: LogVerbosity::default(),
            controller,
            builder: LiouvillianBuilder::new(num_qubits, 2),
            initial: InitialState::Ground,
            monitor: None,
            state: None,
            node_id: 0,
            num_nodes: 1,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Levels per qudit (2 unless `create_qubits` said otherwise).
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Node (rank) identifier. Single-node builds report 0 of 1.
    pub fn node_id(&self) -> usize {
        self.node_id
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn controller(&self) -> &PulseChannelController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PulseChannelController {
        &mut self.controller
    }

    /// Fix the per-qudit level count. Must precede any term installation;
    /// calling twice is an error.
    pub fn create_qubits(&mut self, levels: usize) -> Result<()> {
        if self.qubits_created {
            return Err(Error::Resource(
                "qubits for this instance have already been created".into(),
            ));
        }
        if levels < 2 {
            return Err(Error::Resource(format!(
                "qudits need at least two levels, got {levels}"
            )));
        }
        self.levels = levels;
        self.qubits_created = true;
        self.builder = LiouvillianBuilder::new(self.num_qubits, levels);
        Ok(())
    }

    pub fn set_log_verbosity(&mut self, verbosity: LogVerbosity) {
        self.verbosity = verbosity;
    }

    pub fn log_verbosity(&self) -> LogVerbosity {
        self.verbosity
    }

    /// Select the Rosenbrock-W branch for stiff problems.
    pub fn set_stiff(&mut self, stiff: bool) {
        self.stiff = stiff;
    }

    /// Install the per-step monitor. It observes strictly increasing
    /// accepted times and may return [`MonitorControl::Stop`]; the engine
    /// honors it before the next step.
    pub fn set_monitor(
        &mut self,
        monitor: impl FnMut(usize, f64, &StateView<'_>) -> MonitorControl + 'static,
    ) {
        self.monitor = Some(Box::new(monitor));
    }

    /// Start from |ψ⟩ instead of the ground state.
    pub fn set_initial_pure(&mut self, psi: Array1<Complex64>) -> Result<()> {
        let d = 1usize << self.num_qubits;
        if psi.len() != d {
            return Err(Error::Resource(format!(
                "initial state length {} does not match Hilbert dimension {d}",
                psi.len()
            )));
        }
        self.initial = InitialState::Pure(psi);
        Ok(())
    }

    /// Start from a density matrix. Only valid when the run assembles in
    /// Lindblad mode.
    pub fn set_initial_density(&mut self, rho: Array2<Complex64>) -> Result<()> {
        let d = 1usize << self.num_qubits;
        if rho.nrows() != d || rho.ncols() != d {
            return Err(Error::Resource(format!(
                "initial density matrix must be {d} × {d}, got {} × {}",
                rho.nrows(),
                rho.ncols()
            )));
        }
        self.initial = InitialState::Density(rho);
        Ok(())
    }

    /// Add a time-independent single-operator term c · Ô on `qubit`.
    pub fn add_const_term1(
        &mut self,
        op: PauliOp,
        qubit: usize,
        c_re: f64,
        c_im: f64,
    ) -> Result<()> {
        self.builder.add_static_term(
            Complex64::new(c_re, c_im),
            &[QubitOperand::new(op, qubit)],
        )
    }

    /// Add a time-independent two-operator term c · Ô₁Ô₂.
    #[allow(clippy::too_many_arguments)]
    pub fn add_const_term2(
        &mut self,
        op1: PauliOp,
        qubit1: usize,
        op2: PauliOp,
        qubit2: usize,
        c_re: f64,
        c_im: f64,
    ) -> Result<()> {
        self.builder.add_static_term(
            Complex64::new(c_re, c_im),
            &[
                QubitOperand::new(op1, qubit1),
                QubitOperand::new(op2, qubit2),
            ],
        )
    }

    /// Add a channel-driven single-operator term s(t) · Ô, wired to
    /// `channel_id`.
    pub fn add_timedep_term1(&mut self, op: PauliOp, qubit: usize, channel_id: usize) -> Result<()> {
        if channel_id >= self.controller.registry().len() {
            return Err(AssemblyError::UnknownChannel(format!("id {channel_id}")).into());
        }
        self.builder.add_driven_term(
            Complex64::new(1.0, 0.0),
            &[QubitOperand::new(op, qubit)],
            channel_id,
        )
    }

    /// Add a channel-driven two-operator term s(t) · Ô₁Ô₂; the channel is
    /// resolved by name through the controller registry.
    pub fn add_timedep_term2(
        &mut self,
        op1: PauliOp,
        qubit1: usize,
        op2: PauliOp,
        qubit2: usize,
        channel_name: &str,
    ) -> Result<()> {
        let channel_id = self.controller.registry().id(channel_name)?;
        self.builder.add_driven_term(
            Complex64::new(1.0, 0.0),
            &[
                QubitOperand::new(op1, qubit1),
                QubitOperand::new(op2, qubit2),
            ],
            channel_id,
        )
    }

    /// Install a parsed term tree (depth-first; sums flatten).
    pub fn install_term(&mut self, term: &TermTree) -> Result<()> {
        let registry = *self.controller.registry();
        term.apply(&mut self.builder, &registry)
    }

    /// Add qubit decay: the Lindblad dissipator for √κ·σ₋ on `qubit`.
    pub fn add_qubit_decay(&mut self, qubit: usize, kappa: f64) -> Result<()> {
        self.builder.add_decay(qubit, kappa)
    }

    fn initial_vector(&self, mode: SolveMode, dim: usize) -> Result<Array1<Complex64>> {
        let d = 1usize << self.num_qubits;
        let one = Complex64::new(1.0, 0.0);
        match (&self.initial, mode) {
            (InitialState::Ground, SolveMode::Schroedinger) => {
                let mut y = Array1::zeros(dim);
                y[0] = one;
                Ok(y)
            }
            (InitialState::Ground, SolveMode::Lindblad) => {
                let mut y = Array1::zeros(dim);
                y[0] = one;
                Ok(y)
            }
            (InitialState::Pure(psi), SolveMode::Schroedinger) => Ok(psi.clone()),
            (InitialState::Pure(psi), SolveMode::Lindblad) => {
                // ρ = |ψ⟩⟨ψ|, column-stacked.
                let mut y = Array1::zeros(dim);
                for j in 0..d {
                    for i in 0..d {
                        y[j * d + i] = psi[i] * psi[j].conj();
                    }
                }
                Ok(y)
            }
            (InitialState::Density(_), SolveMode::Schroedinger) => {
                Err(AssemblyError::NonPureInitialState.into())
            }
            (InitialState::Density(rho), SolveMode::Lindblad) => {
                let mut y = Array1::zeros(dim);
                for j in 0..d {
                    for i in 0..d {
                        y[j * d + i] = rho[[i, j]];
                    }
                }
                Ok(y)
            }
        }
    }

    /// Assemble and integrate. Populations are recorded at every accepted
    /// step; the expectation vector is the per-qubit excited-state
    /// occupation of the final state.
    pub fn run(&mut self) -> Result<RunResult> {
        let sys = self.builder.build()?;
        let y0 = self.initial_vector(sys.mode, sys.dim)?;

        let mut opts = SolverOptions::new(self.t_max, self.dt, self.step_max);
        opts.stiff = self.stiff;

        let monitor: Option<&mut dyn FnMut(usize, f64, &StateView<'_>) -> MonitorControl> =
            self.monitor
                .as_mut()
                .map(|m| &mut **m as &mut dyn FnMut(usize, f64, &StateView<'_>) -> MonitorControl);

        let evolution = solver::evolve(&sys, &self.controller, y0, &opts, monitor)?;

        let final_populations = sys.populations(&evolution.y);
        let expectations = self.qubit_occupations(&final_populations);
        self.state = Some(evolution.y);

        Ok(RunResult {
            expectations,
            step_count: evolution.steps,
            ts_data: evolution.ts_data,
        })
    }

    /// Solve for the steady state of the assembled Lindbladian and return
    /// its computational-basis populations.
    pub fn steady_state(&self) -> Result<Vec<f64>> {
        let sys = self.builder.build()?;
        solver::steady_state(&sys)
    }

    /// Per-qubit excited occupation ⟨n_q⟩ from basis populations. Qubit 0
    /// is the most significant bit of the basis index.
    fn qubit_occupations(&self, populations: &[f64]) -> Vec<f64> {
        (0..self.num_qubits)
            .map(|q| {
                populations
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| (i >> (self.num_qubits - 1 - q)) & 1 == 1)
                    .map(|(_, p)| p)
                    .sum()
            })
            .collect()
    }

    /// Final state vector of the last run, if any.
    pub fn state(&self) -> Option<&Array1<Complex64>> {
        self.state.as_ref()
    }

    /// Return the instance to its post-construction state: terms, decay,
    /// schedules, and state are dropped; the register and integration
    /// window are kept. Idempotent.
    pub fn clear(&mut self) {
        self.builder.clear();
        self.controller.clear_program();
        self.initial = InitialState::Ground;
        self.state = None;
    }

    /// Release the instance. Terminal; the state and matrices are dropped.
    pub fn finalize(self) {
        info!(num_qubits = self.num_qubits, "pulse simulator finalized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pulse::{BackendChannelConfig, PulseScheduleEntry};
    use crate::test_utils;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::f64::consts::PI;

    fn bare_instance(num_qubits: usize) -> Instance {
        let lo = vec![0.0; num_qubits];
        let controller =
            PulseChannelController::new(BackendChannelConfig::new(1.0, lo)).unwrap();
        Instance::initialize(num_qubits, 0.01, 1.0, 1_000_000, controller).unwrap()
    }

    #[test]
    fn test_initialize_validates_arguments() {
        let controller =
            PulseChannelController::new(BackendChannelConfig::new(1.0, vec![0.0])).unwrap();
        assert!(Instance::initialize(0, 0.01, 1.0, 100, controller.clone()).is_err());
        assert!(Instance::initialize(1, -0.1, 1.0, 100, controller.clone()).is_err());
        assert!(Instance::initialize(1, 0.01, 0.0, 100, controller).is_err());
    }

    #[test]
    fn test_create_qubits_once() {
        let mut instance = bare_instance(1);
        instance.create_qubits(3).unwrap();
        assert_eq!(instance.levels(), 3);
        assert!(instance.create_qubits(2).is_err());
        // Two-level operators cannot land on a three-level register.
        assert!(instance.add_const_term1(PauliOp::Z, 0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_verbosity_and_node_metadata() {
        let mut instance = bare_instance(1);
        assert_eq!(instance.log_verbosity(), crate::LogVerbosity::Minimal);
        instance.set_log_verbosity(crate::LogVerbosity::DebugDiag);
        assert_eq!(instance.log_verbosity(), crate::LogVerbosity::DebugDiag);
        assert_eq!(instance.node_id(), 0);
        assert_eq!(instance.num_nodes(), 1);
    }

    #[test]
    fn test_typed_hooks_validate() {
        let mut instance = bare_instance(1);
        assert!(instance.add_const_term1(PauliOp::Z, 1, 1.0, 0.0).is_err());
        assert!(instance.add_timedep_term1(PauliOp::X, 0, 5).is_err());
        assert!(instance
            .add_timedep_term2(PauliOp::X, 0, PauliOp::X, 0, "D7")
            .is_err());
        assert!(instance.add_qubit_decay(0, -1.0).is_err());
    }

    #[test]
    fn test_install_parsed_terms_matches_typed_install() {
        // Summation plus coupling strings install the same drift as the
        // three typed terms they describe.
        let json = r#"{
            "h_str": ["_SUM[i,0,1,omega*Z{i}]", "J*X0*X1"],
            "vars": {"omega": 1.0, "J": 0.1}
        }"#;
        let terms = crate::hamiltonian::parse_hamiltonian_json(json).unwrap();

        let mut parsed = bare_instance(2);
        for term in &terms {
            parsed.install_term(term).unwrap();
        }

        let mut typed = bare_instance(2);
        typed.add_const_term1(PauliOp::Z, 0, 1.0, 0.0).unwrap();
        typed.add_const_term1(PauliOp::Z, 1, 1.0, 0.0).unwrap();
        typed
            .add_const_term2(PauliOp::X, 0, PauliOp::X, 1, 0.1, 0.0)
            .unwrap();

        let sys_parsed = parsed.builder.build().unwrap();
        let sys_typed = typed.builder.build().unwrap();
        assert_eq!(sys_parsed.dim, sys_typed.dim);
        for ((i, j), val) in sys_parsed.drift.indexed_iter() {
            assert_relative_eq!(val.re, sys_typed.drift[[i, j]].re, epsilon = 1e-12);
            assert_relative_eq!(val.im, sys_typed.drift[[i, j]].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_install_term_with_unknown_channel_fails() {
        let terms =
            crate::hamiltonian::parse_hamiltonian_json(r#"{"h_str": ["Z0||U3"]}"#).unwrap();
        let mut instance = bare_instance(1);
        let err = instance.install_term(&terms[0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_run_reports_expectations_and_trajectory() {
        // Rabi drive to the π-time: everything ends in |1⟩.
        let omega = 2.0 * PI;
        let mut instance = {
            let controller =
                PulseChannelController::new(BackendChannelConfig::new(1.0, vec![0.0])).unwrap();
            let t_pi = PI / omega;
            Instance::initialize(1, 1e-3, t_pi, 1_000_000, controller).unwrap()
        };
        instance
            .add_const_term1(PauliOp::X, 0, omega / 2.0, 0.0)
            .unwrap();
        let result = instance.run().unwrap();

        assert!(result.step_count > 0);
        assert_eq!(result.ts_data[0].populations, vec![1.0, 0.0]);
        assert_relative_eq!(result.expectations[0], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_driven_qubit_scenario() {
        // H = −(π·ν)·Z₀ + D(t)·X₀ with a resonant rectangle on D0 and
        // weak decay. P₁ climbs through the pulse window and stays below 1.
        let nu = 5.0;
        let omega = 2.0 * PI * nu;
        let kappa = 1e-4;
        let t_stop: f64 = 8.0;
        let amplitude = 0.25;

        let dt_backend: f64 = 0.01;
        let samples = (t_stop / dt_backend).ceil() as usize;
        let mut config = BackendChannelConfig::new(dt_backend, vec![omega]);
        config.add_pulse("drive", vec![Complex64::new(amplitude, 0.0); samples]);
        let mut controller = PulseChannelController::new(config).unwrap();
        controller
            .initialize(
                HashMap::from([(
                    0,
                    vec![PulseScheduleEntry {
                        name: "drive".into(),
                        start_time: 0.0,
                        stop_time: t_stop,
                    }],
                )]),
                HashMap::new(),
            )
            .unwrap();

        let mut instance =
            Instance::initialize(1, 1e-3, t_stop, 10_000_000, controller).unwrap();
        instance
            .add_const_term1(PauliOp::Z, 0, -omega / 2.0, 0.0)
            .unwrap();
        instance.add_timedep_term1(PauliOp::X, 0, 0).unwrap();
        instance.add_qubit_decay(0, kappa).unwrap();

        let result = instance.run().unwrap();

        // Excitation climbs through the window (RWA Rabi ramp)…
        let p1_at = |t: f64| {
            result
                .ts_data
                .iter()
                .min_by(|a, b| {
                    (a.time - t).abs().total_cmp(&(b.time - t).abs())
                })
                .unwrap()
                .populations[1]
        };
        assert!(p1_at(2.0) > 0.01, "no excitation by t=2");
        assert!(p1_at(4.0) > p1_at(2.0), "P1 not climbing");
        assert!(p1_at(8.0) > p1_at(4.0), "P1 not climbing");
        // …and stays strictly below full inversion.
        assert!(result.expectations[0] < 1.0);
        // RWA estimate: P₁(t) ≈ sin²(a·t/2) for drive a·cos(ωt) on resonance.
        let rwa = (amplitude * t_stop / 2.0).sin().powi(2);
        assert_relative_eq!(result.expectations[0], rwa, epsilon = 0.05);
    }

    #[test]
    fn test_superposition_initial_state() {
        let mut instance = bare_instance(1);
        let half = std::f64::consts::FRAC_1_SQRT_2;
        instance
            .set_initial_pure(Array1::from(vec![
                Complex64::new(half, 0.0),
                Complex64::new(half, 0.0),
            ]))
            .unwrap();
        instance.add_const_term1(PauliOp::Z, 0, 0.5, 0.0).unwrap();
        let result = instance.run().unwrap();
        assert_relative_eq!(result.expectations[0], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_density_initial_state_requires_lindblad() {
        let mut instance = bare_instance(1);
        instance.set_initial_density(test_utils::excited_rho()).unwrap();
        instance.add_const_term1(PauliOp::Z, 0, 0.5, 0.0).unwrap();
        // No dissipators → Schrödinger fallback → mixed start is rejected.
        assert!(instance.run().is_err());

        instance.add_qubit_decay(0, 0.1).unwrap();
        let result = instance.run().unwrap();
        assert!(result.expectations[0] < 1.0);
    }

    #[test]
    fn test_plus_state_decays_toward_ground() {
        // |+⟩⟨+| under decay: the excited population falls below ½ while
        // the trace stays 1.
        let mut instance = bare_instance(1);
        instance.set_initial_density(test_utils::plus_rho()).unwrap();
        instance.add_qubit_decay(0, 0.3).unwrap();
        let result = instance.run().unwrap();
        let last = result.ts_data.last().unwrap();
        let expected = 0.5 * (-0.3_f64 * last.time).exp();
        assert_relative_eq!(result.expectations[0], expected, epsilon = 1e-6);
        let trace: f64 = last.populations.iter().sum();
        assert_relative_eq!(trace, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_monitor_receives_steps_and_stops() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut instance = bare_instance(1);
        instance.add_const_term1(PauliOp::X, 0, 1.0, 0.0).unwrap();
        let seen = Rc::new(Cell::new(0usize));
        let seen_in_monitor = Rc::clone(&seen);
        instance.set_monitor(move |step, _t, _view| {
            seen_in_monitor.set(step);
            if step >= 3 {
                MonitorControl::Stop
            } else {
                MonitorControl::Continue
            }
        });
        let result = instance.run().unwrap();
        assert_eq!(result.step_count, 3);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn test_clear_is_idempotent_and_resets_terms() {
        let mut instance = bare_instance(1);
        instance.add_const_term1(PauliOp::X, 0, 1.0, 0.0).unwrap();
        instance.add_qubit_decay(0, 0.5).unwrap();
        instance.run().unwrap();
        assert!(instance.state().is_some());

        instance.clear();
        instance.clear();
        assert!(instance.state().is_none());

        // An empty register free-evolves: nothing ever leaves |0⟩.
        let result = instance.run().unwrap();
        assert_relative_eq!(result.expectations[0], 0.0);
    }

    #[test]
    fn test_two_qubit_expectations_from_populations() {
        let instance = bare_instance(2);
        // populations of |00⟩, |01⟩, |10⟩, |11⟩
        let occupations = instance.qubit_occupations(&[0.1, 0.2, 0.3, 0.4]);
        assert_relative_eq!(occupations[0], 0.7, epsilon = 1e-12);
        assert_relative_eq!(occupations[1], 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_steady_state_through_instance() {
        let mut instance = bare_instance(1);
        instance.add_const_term1(PauliOp::Z, 0, 0.5, 0.0).unwrap();
        instance.add_qubit_decay(0, 0.2).unwrap();
        let populations = instance.steady_state().unwrap();
        assert_relative_eq!(populations[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_fake_backend_fixture_round_trip() {
        // The mock 1-qubit OpenPulse backend drives an end-to-end parse,
        // install, and run.
        let controller = PulseChannelController::new(test_utils::fake_1q_backend()).unwrap();
        let mut instance = Instance::initialize(1, 0.1, 10.0, 100_000, controller).unwrap();

        let terms = crate::hamiltonian::parse_hamiltonian_json(
            r#"{"h_str": ["omega*Z0", "X0||D0"], "vars": {"omega": -15.5}}"#,
        )
        .unwrap();
        for term in &terms {
            instance.install_term(term).unwrap();
        }
        instance.add_qubit_decay(0, 1e-4).unwrap();

        let entry = PulseScheduleEntry {
            name: "test_pulse_3".into(),
            start_time: 0.0,
            stop_time: 10.0,
        };
        instance
            .controller_mut()
            .initialize(HashMap::from([(0, vec![entry])]), HashMap::new())
            .unwrap();

        let result = instance.run().unwrap();
        assert!(result.step_count > 0);
        let trace: f64 = result.ts_data.last().unwrap().populations.iter().sum();
        assert_relative_eq!(trace, 1.0, epsilon = 1e-6);
    }
}
