// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse channel control.
//!
//! A backend exposes a set of analog channels: drive channels `D<i>`
//! coupled to qubit i and free control channels `U<j>`. Each channel plays
//! sampled waveforms from a shared pulse library, mixed with its LO carrier
//! and shifted by accumulated frame-change phases. The controller turns
//! (channel id, t) into the instantaneous drive value the integrator needs.

pub mod channels;
pub mod config;
pub mod controller;

pub use channels::ChannelRegistry;
pub use config::{
    BackendChannelConfig, ChannelProgram, FrameChangeEntry, PulseLibrary, PulseProgram,
    PulseScheduleEntry,
};
pub use controller::PulseChannelController;
