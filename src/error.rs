// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the simulator.
//!
//! Parse errors are recoverable (the caller may fix the expression and try
//! again). Assembly and resource errors are fatal for the current Instance.
//! Integrator errors are surfaced but leave the Instance valid; the state
//! keeps its last accepted value.

use std::fmt;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level simulator error.
#[derive(Debug)]
pub enum Error {
    /// Hamiltonian expression or JSON schema failure
    Parse(ParseError),
    /// Superoperator assembly failure
    Assembly(AssemblyError),
    /// Time-stepping failure
    Integrator(IntegratorError),
    /// Allocation failure or use of a finalized/uninitialized instance
    Resource(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl Error {
    /// Process exit code for CLI wrappers: 0 is success (no error value
    /// exists in that case), every error kind maps to a positive code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(_) => 1,
            Error::Assembly(_) => 2,
            Error::Integrator(_) => 3,
            Error::Resource(_) => 4,
            Error::Io(_) | Error::Serialization(_) => 5,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Assembly(e) => write!(f, "Assembly error: {}", e),
            Error::Integrator(e) => write!(f, "Integrator error: {}", e),
            Error::Resource(msg) => write!(f, "Resource error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Assembly(e) => Some(e),
            Error::Integrator(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<AssemblyError> for Error {
    fn from(e: AssemblyError) -> Self {
        Error::Assembly(e)
    }
}

impl From<IntegratorError> for Error {
    fn from(e: IntegratorError) -> Self {
        Error::Integrator(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Hamiltonian expression parse failures.
///
/// `TermTree::try_parse` itself signals failure with `None` (no partial
/// trees); these variants carry the reason when a JSON document or a typed
/// entry point needs to report it.
#[derive(Debug)]
pub enum ParseError {
    /// Operator token is not one of I, X, Y, Z, SP, SM
    UnknownOperator(String),
    /// Channel name does not match `[DU][0-9]+`
    MalformedChannel(String),
    /// Summation bounds are non-numeric or lo > hi
    BadLoopBounds { lo: String, hi: String },
    /// Summation body never references `{loop-var}`
    MissingLoopVariable(String),
    /// Coefficient expression rejected by the scalar evaluator
    BadCoefficient(String),
    /// Empty term or sub-expression
    EmptyExpression,
    /// Nested parentheses in a distributed product
    NestedParentheses(String),
    /// Whole-expression failure (reported per h_str entry)
    Unparseable(String),
    /// Hamiltonian JSON schema failure
    Json(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownOperator(tok) => write!(f, "unknown operator token '{}'", tok),
            ParseError::MalformedChannel(name) => {
                write!(f, "malformed channel name '{}' (expected D<n> or U<n>)", name)
            }
            ParseError::BadLoopBounds { lo, hi } => {
                write!(f, "bad summation bounds [{}, {}]", lo, hi)
            }
            ParseError::MissingLoopVariable(var) => {
                write!(f, "summation body never references {{{}}}", var)
            }
            ParseError::BadCoefficient(expr) => {
                write!(f, "cannot evaluate coefficient expression '{}'", expr)
            }
            ParseError::EmptyExpression => write!(f, "empty expression"),
            ParseError::NestedParentheses(expr) => {
                write!(f, "nested parentheses are not supported: '{}'", expr)
            }
            ParseError::Unparseable(expr) => {
                write!(f, "cannot parse Hamiltonian string '{}'", expr)
            }
            ParseError::Json(msg) => write!(f, "Hamiltonian JSON: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Superoperator assembly failures. Fatal for the Instance.
#[derive(Debug)]
pub enum AssemblyError {
    /// A term with zero or more than two operator factors
    UnsupportedArity(usize),
    /// Operand qubit index outside the register
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    /// Channel name did not resolve to a channel id
    UnknownChannel(String),
    /// Register levels incompatible with two-level operators
    LevelMismatch { levels: usize },
    /// Initial state incompatible with the solver mode
    NonPureInitialState,
    /// Qubit decay installed with a negative rate
    NegativeDecayRate(f64),
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::UnsupportedArity(n) => write!(
                f,
                "Hamiltonian terms must be products of one or two operators, got {}",
                n
            ),
            AssemblyError::QubitOutOfRange { qubit, num_qubits } => {
                write!(f, "qubit {} out of range for {}-qubit register", qubit, num_qubits)
            }
            AssemblyError::UnknownChannel(name) => write!(f, "unknown channel '{}'", name),
            AssemblyError::LevelMismatch { levels } => write!(
                f,
                "register with {} levels per qudit cannot host two-level operators",
                levels
            ),
            AssemblyError::NonPureInitialState => {
                write!(f, "Schrodinger mode requires a pure initial state")
            }
            AssemblyError::NegativeDecayRate(kappa) => {
                write!(f, "decay rate must be non-negative, got {}", kappa)
            }
        }
    }
}

impl std::error::Error for AssemblyError {}

/// Time-stepping failures. The state keeps its last accepted value.
#[derive(Debug)]
pub enum IntegratorError {
    /// Adaptive step size underflowed
    StepSizeCollapse { t: f64, dt: f64 },
    /// State contains NaN or Inf
    NonFiniteState { t: f64 },
    /// A stage or steady-state linear system was (near-)singular
    SingularSystem(String),
    /// Steady state requested without Lindblad terms
    SteadyStateUnsupported(String),
}

impl fmt::Display for IntegratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorError::StepSizeCollapse { t, dt } => {
                write!(f, "step size collapsed to {:.3e} at t = {:.6}", dt, t)
            }
            IntegratorError::NonFiniteState { t } => {
                write!(f, "non-finite state at t = {:.6}", t)
            }
            IntegratorError::SingularSystem(msg) => write!(f, "singular linear system: {}", msg),
            IntegratorError::SteadyStateUnsupported(msg) => {
                write!(f, "steady state unsupported: {}", msg)
            }
        }
    }
}

impl std::error::Error for IntegratorError {}
