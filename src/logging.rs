// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Log verbosity control.
//!
//! The simulator exposes the four verbosity levels of its control surface
//! and maps them onto tracing filter directives. Installing a subscriber is
//! opt-in; library code only ever emits events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Simulator log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogVerbosity {
    /// Errors only.
    None,
    /// Important progress messages.
    #[default]
    Minimal,
    /// Assembly and solver detail.
    Debug,
    /// Per-step diagnostics.
    DebugDiag,
}

impl LogVerbosity {
    /// The tracing filter directive this level corresponds to.
    pub fn filter_directive(&self) -> &'static str {
        match self {
            LogVerbosity::None => "error",
            LogVerbosity::Minimal => "info",
            LogVerbosity::Debug => "debug",
            LogVerbosity::DebugDiag => "trace",
        }
    }
}

/// Install a global fmt subscriber at the given verbosity. `RUST_LOG`
/// overrides the level when set; calling twice is harmless (the second
/// install is ignored).
pub fn init_logging(verbosity: LogVerbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
