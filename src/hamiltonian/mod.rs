// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hamiltonian expression compiler.
//!
//! Turns human-written Hamiltonian strings into typed term trees:
//!
//! ```text
//! Term      := SumTerm | DepTerm | IndTerm
//! SumTerm   := "_SUM[" ident "," int "," int "," body "]"
//! DepTerm   := Product "||" ChanName
//! IndTerm   := Product
//! Product   := CoeffExpr ("*" AtomicOp)*
//! AtomicOp  := OpSym digits
//! ChanName  := [DU][0-9]+
//! ```
//!
//! A term is either time-independent (a complex coefficient times a product
//! of one or two qubit operators), time-dependent (the same, tagged with the
//! drive channel that supplies its signal), or a sum of such terms produced
//! by parenthesis distribution or `_SUM` expansion.

pub mod parser;

use std::collections::HashMap;

use num_complex::Complex64;
use serde::Deserialize;
use tracing::debug;

use crate::algebra::QubitOperand;
use crate::error::{ParseError, Result};
use crate::expr::VarBinding;
use crate::liouville::LiouvillianBuilder;
use crate::pulse::ChannelRegistry;

/// A parsed Hamiltonian term.
#[derive(Debug, Clone, PartialEq)]
pub enum TermTree {
    /// Time-independent term: c · Ô₁[·Ô₂]
    Independent {
        coeff: Complex64,
        ops: Vec<QubitOperand>,
    },
    /// Time-dependent term: c · s(t) · Ô₁[·Ô₂], with s(t) supplied by the
    /// named channel at integration time.
    Dependent {
        coeff: Complex64,
        ops: Vec<QubitOperand>,
        channel: String,
    },
    /// Sum of child terms. Semantically flat; structurally may nest.
    Sum(Vec<TermTree>),
}

impl TermTree {
    /// Parse one Hamiltonian term expression over the given variable
    /// binding. Whitespace is ignored. Returns `None` on any failure; no
    /// partial trees are produced.
    pub fn try_parse(expr: &str, vars: &VarBinding) -> Option<TermTree> {
        parser::dispatch(expr, vars)
    }

    /// Install this term into the superoperator builder, resolving channel
    /// names through the registry. Sum nodes flatten depth-first.
    pub fn apply(&self, builder: &mut LiouvillianBuilder, channels: &ChannelRegistry) -> Result<()> {
        match self {
            TermTree::Independent { coeff, ops } => builder.add_static_term(*coeff, ops),
            TermTree::Dependent { coeff, ops, channel } => {
                let id = channels.id(channel)?;
                builder.add_driven_term(*coeff, ops, id)
            }
            TermTree::Sum(children) => {
                for child in children {
                    child.apply(builder, channels)?;
                }
                Ok(())
            }
        }
    }
}

/// The Hamiltonian JSON surface: term strings plus a variable map.
#[derive(Debug, Clone, Deserialize)]
pub struct HamiltonianJson {
    /// Term expressions, each parseable by [`TermTree::try_parse`].
    pub h_str: Vec<String>,
    /// Variable bindings used during coefficient evaluation.
    #[serde(default)]
    pub vars: HashMap<String, f64>,
}

/// Parse a Hamiltonian JSON document into term trees.
///
/// Fails without partial results: either every `h_str` entry parses or the
/// whole document is rejected.
pub fn parse_hamiltonian_json(json: &str) -> Result<Vec<TermTree>> {
    let doc: HamiltonianJson =
        serde_json::from_str(json).map_err(|e| ParseError::Json(e.to_string()))?;

    let mut terms = Vec::with_capacity(doc.h_str.len());
    for h_str in &doc.h_str {
        debug!(term = %h_str, "parsing Hamiltonian term");
        let term = TermTree::try_parse(h_str, &doc.vars)
            .ok_or_else(|| ParseError::Unparseable(h_str.clone()))?;
        terms.push(term);
    }
    Ok(terms)
}
