// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Superoperator assembly.
//!
//! The builder collects Hamiltonian terms (time-independent and
//! channel-driven), plus qubit decay dissipators, and assembles them into
//! the matrices the integrator consumes. When at least one dissipator is
//! present the result acts on vec(ρ) (dimension 4ᴺ); otherwise the build
//! falls back to the plain Schrödinger generator −iH on the Hilbert vector
//! (dimension 2ᴺ), which the engine uses directly.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use tracing::{debug, info};

use crate::algebra::QubitOperand;
use crate::error::{AssemblyError, Result};
use crate::pulse::PulseChannelController;

use super::kron::{embed, lift_dissipator, lift_hamiltonian};

/// Which space the assembled matrices act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// vec(ρ) of length 4ᴺ; the drift carries dissipators.
    Lindblad,
    /// |ψ⟩ of length 2ᴺ; the drift is −iH.
    Schroedinger,
}

/// One channel-driven term: the pre-lifted generator with the static
/// coefficient folded in. Its sparsity pattern is fixed at assembly; the
/// RHS only scales it by the instantaneous drive value.
#[derive(Debug, Clone)]
pub struct TimeDepTerm {
    pub channel_id: usize,
    pub generator: Array2<Complex64>,
}

#[derive(Debug, Clone)]
struct StaticTerm {
    coeff: Complex64,
    ops: Vec<QubitOperand>,
}

#[derive(Debug, Clone)]
struct DrivenTerm {
    coeff: Complex64,
    ops: Vec<QubitOperand>,
    channel_id: usize,
}

/// Accumulates terms and dissipators for one register.
#[derive(Debug, Clone)]
pub struct LiouvillianBuilder {
    num_qubits: usize,
    levels: usize,
    static_terms: Vec<StaticTerm>,
    driven_terms: Vec<DrivenTerm>,
    decays: Vec<(usize, f64)>,
}

impl LiouvillianBuilder {
    pub fn new(num_qubits: usize, levels: usize) -> Self {
        Self {
            num_qubits,
            levels,
            static_terms: Vec::new(),
            driven_terms: Vec::new(),
            decays: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn has_lindblad(&self) -> bool {
        !self.decays.is_empty()
    }

    /// Drop every installed term and dissipator.
    pub fn clear(&mut self) {
        self.static_terms.clear();
        self.driven_terms.clear();
        self.decays.clear();
    }

    fn check_operands(&self, ops: &[QubitOperand]) -> Result<()> {
        if self.levels != 2 {
            return Err(AssemblyError::LevelMismatch { levels: self.levels }.into());
        }
        if ops.is_empty() || ops.len() > 2 {
            return Err(AssemblyError::UnsupportedArity(ops.len()).into());
        }
        for operand in ops {
            if operand.qubit >= self.num_qubits {
                return Err(AssemblyError::QubitOutOfRange {
                    qubit: operand.qubit,
                    num_qubits: self.num_qubits,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Install a time-independent term c · Ô₁[·Ô₂].
    pub fn add_static_term(&mut self, coeff: Complex64, ops: &[QubitOperand]) -> Result<()> {
        self.check_operands(ops)?;
        debug!(%coeff, ops = ?ops, "static term installed");
        self.static_terms.push(StaticTerm {
            coeff,
            ops: ops.to_vec(),
        });
        Ok(())
    }

    /// Install a channel-driven term c · s(t) · Ô₁[·Ô₂].
    pub fn add_driven_term(
        &mut self,
        coeff: Complex64,
        ops: &[QubitOperand],
        channel_id: usize,
    ) -> Result<()> {
        self.check_operands(ops)?;
        debug!(%coeff, ops = ?ops, channel_id, "driven term installed");
        self.driven_terms.push(DrivenTerm {
            coeff,
            ops: ops.to_vec(),
            channel_id,
        });
        Ok(())
    }

    /// Install qubit decay: the Lindblad dissipator for √κ·σ₋ on `qubit`.
    pub fn add_decay(&mut self, qubit: usize, kappa: f64) -> Result<()> {
        if self.levels != 2 {
            return Err(AssemblyError::LevelMismatch { levels: self.levels }.into());
        }
        if qubit >= self.num_qubits {
            return Err(AssemblyError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            }
            .into());
        }
        if kappa < 0.0 {
            return Err(AssemblyError::NegativeDecayRate(kappa).into());
        }
        self.decays.push((qubit, kappa));
        Ok(())
    }

    /// Product of one or two embedded operators on the full Hilbert space.
    fn hilbert_operator(&self, ops: &[QubitOperand]) -> Array2<Complex64> {
        let first = embed(&ops[0].op.matrix(), ops[0].qubit, self.num_qubits);
        match ops.len() {
            1 => first,
            _ => {
                let second = embed(&ops[1].op.matrix(), ops[1].qubit, self.num_qubits);
                first.dot(&second)
            }
        }
    }

    /// Assemble the drift matrix and the time-dependent generators.
    ///
    /// The builder keeps its terms, so a cleared-and-refilled or re-run
    /// instance can assemble again.
    pub fn build(&self) -> Result<Liouvillian> {
        let hilbert_dim = 1usize << self.num_qubits;
        let mode = if self.has_lindblad() {
            SolveMode::Lindblad
        } else {
            SolveMode::Schroedinger
        };
        let dim = match mode {
            SolveMode::Lindblad => hilbert_dim * hilbert_dim,
            SolveMode::Schroedinger => hilbert_dim,
        };

        let minus_i = Complex64::new(0.0, -1.0);
        let mut drift = Array2::<Complex64>::zeros((dim, dim));

        for term in &self.static_terms {
            let full = self.hilbert_operator(&term.ops) * term.coeff;
            match mode {
                SolveMode::Lindblad => drift = drift + lift_hamiltonian(&full),
                SolveMode::Schroedinger => drift = drift + full * minus_i,
            }
        }

        for &(qubit, kappa) in &self.decays {
            // σ₋ = |0⟩⟨1|, the energy-lowering jump operator.
            let mut sigma_minus = Array2::<Complex64>::zeros((2, 2));
            sigma_minus[[0, 1]] = Complex64::new(kappa.sqrt(), 0.0);
            let l = embed(&sigma_minus, qubit, self.num_qubits);
            drift = drift + lift_dissipator(&l);
        }

        let mut time_dep = Vec::with_capacity(self.driven_terms.len());
        for term in &self.driven_terms {
            let full = self.hilbert_operator(&term.ops) * term.coeff;
            let generator = match mode {
                SolveMode::Lindblad => lift_hamiltonian(&full),
                SolveMode::Schroedinger => full * minus_i,
            };
            time_dep.push(TimeDepTerm {
                channel_id: term.channel_id,
                generator,
            });
        }

        info!(
            ?mode,
            dim,
            static_terms = self.static_terms.len(),
            driven_terms = time_dep.len(),
            dissipators = self.decays.len(),
            "superoperator assembled"
        );

        Ok(Liouvillian {
            mode,
            dim,
            num_qubits: self.num_qubits,
            drift,
            time_dep,
        })
    }
}

/// The assembled system: dρ/dt = B(t)·vec(ρ) (or dψ/dt = B(t)·ψ), with
/// B(t) = drift + Σ_k s_k(t)·G_k.
#[derive(Debug, Clone)]
pub struct Liouvillian {
    pub mode: SolveMode,
    pub dim: usize,
    pub num_qubits: usize,
    pub drift: Array2<Complex64>,
    pub time_dep: Vec<TimeDepTerm>,
}

impl Liouvillian {
    pub fn hilbert_dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Materialize B(t) into `work`: copy the drift, then add each driven
    /// generator scaled by its instantaneous drive value. The positions
    /// touched are fixed across evaluations; nothing reallocates.
    pub fn rhs_matrix(
        &self,
        controller: &PulseChannelController,
        t: f64,
        work: &mut Array2<Complex64>,
    ) {
        work.assign(&self.drift);
        for term in &self.time_dep {
            let signal = controller.sample(term.channel_id, t);
            if signal != 0.0 {
                work.scaled_add(Complex64::new(signal, 0.0), &term.generator);
            }
        }
    }

    /// Computational-basis populations of the state vector.
    pub fn populations(&self, y: &Array1<Complex64>) -> Vec<f64> {
        let d = self.hilbert_dim();
        match self.mode {
            SolveMode::Lindblad => (0..d).map(|i| y[i * (d + 1)].re).collect(),
            SolveMode::Schroedinger => (0..d).map(|i| y[i].norm_sqr()).collect(),
        }
    }

    /// Tr(ρ) in Lindblad mode, ⟨ψ|ψ⟩ in Schrödinger mode.
    pub fn trace(&self, y: &Array1<Complex64>) -> f64 {
        let d = self.hilbert_dim();
        match self.mode {
            SolveMode::Lindblad => (0..d).map(|i| y[i * (d + 1)].re).sum(),
            SolveMode::Schroedinger => y.iter().map(|z| z.norm_sqr()).sum(),
        }
    }
}
