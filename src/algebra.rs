// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Single-qubit operator algebra.
//!
//! The Hamiltonian language is built from six symbols over a fixed two-level
//! space: the identity, the three Pauli matrices, and the ladder operators
//! σ₊ = (X + iY)/2 and σ₋ = (X − iY)/2. Index 0 of the computational basis
//! is the ground state throughout the crate.

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::ParseError;

/// A single-qubit operator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z (|0⟩ has eigenvalue +1).
    Z,
    /// σ₊ = (X + iY)/2 = |0⟩⟨1|.
    Sp,
    /// σ₋ = (X − iY)/2 = |1⟩⟨0|.
    Sm,
}

impl PauliOp {
    /// Parse an (uppercase) operator token. Unrecognized tokens are a parse
    /// failure, never a silent default.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        match token {
            "I" => Ok(PauliOp::I),
            "X" => Ok(PauliOp::X),
            "Y" => Ok(PauliOp::Y),
            "Z" => Ok(PauliOp::Z),
            "SP" => Ok(PauliOp::Sp),
            "SM" => Ok(PauliOp::Sm),
            _ => Err(ParseError::UnknownOperator(token.to_string())),
        }
    }

    /// The canonical string form, as it appears in Hamiltonian expressions.
    pub fn as_str(&self) -> &'static str {
        match self {
            PauliOp::I => "I",
            PauliOp::X => "X",
            PauliOp::Y => "Y",
            PauliOp::Z => "Z",
            PauliOp::Sp => "SP",
            PauliOp::Sm => "SM",
        }
    }

    /// The 2×2 matrix representation.
    pub fn matrix(&self) -> Array2<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let (a, b, c, d) = match self {
            PauliOp::I => (one, zero, zero, one),
            PauliOp::X => (zero, one, one, zero),
            PauliOp::Y => (zero, -i, i, zero),
            PauliOp::Z => (one, zero, zero, -one),
            PauliOp::Sp => (zero, one, zero, zero),
            PauliOp::Sm => (zero, zero, one, zero),
        };
        let mut m = Array2::zeros((2, 2));
        m[[0, 0]] = a;
        m[[0, 1]] = b;
        m[[1, 0]] = c;
        m[[1, 1]] = d;
        m
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator symbol bound to a qubit of the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitOperand {
    pub op: PauliOp,
    pub qubit: usize,
}

impl QubitOperand {
    pub fn new(op: PauliOp, qubit: usize) -> Self {
        Self { op, qubit }
    }
}

impl fmt::Display for QubitOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.qubit)
    }
}
