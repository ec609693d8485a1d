// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pulse channel controller.
//!
//! Maps (channel id, t) to the instantaneous drive value by combining the
//! scheduled baseband waveform sample, the channel LO carrier, and the
//! accumulated frame-change phase:
//!
//!   s(t) = Re{ a(t) · exp(−i·(ν_ch·t + φ_ch(t))) }
//!
//! The complex carrier is the canonical representation; the integrator RHS
//! consumes the real part.

use std::collections::HashMap;

use num_complex::Complex64;
use tracing::debug;

use crate::error::{Error, Result};

use super::channels::ChannelRegistry;
use super::config::{BackendChannelConfig, FrameChangeEntry, PulseProgram, PulseScheduleEntry};

/// Evaluates the drive signal of every channel during integration.
#[derive(Debug, Clone)]
pub struct PulseChannelController {
    config: BackendChannelConfig,
    registry: ChannelRegistry,
    /// Per channel id, sorted by start time, disjoint.
    schedules: Vec<Vec<PulseScheduleEntry>>,
    /// Per channel id, sorted by start time.
    frame_changes: Vec<Vec<FrameChangeEntry>>,
    /// Per channel id: drive LO table first, then control LO table.
    lo_freqs: Vec<f64>,
}

impl PulseChannelController {
    pub fn new(config: BackendChannelConfig) -> Result<Self> {
        config.validate()?;
        let registry = ChannelRegistry::from_config(&config);
        let lo_freqs = config
            .lo_freqs_d_channels
            .iter()
            .chain(config.lo_freqs_u_channels.iter())
            .copied()
            .collect();
        Ok(Self {
            schedules: vec![Vec::new(); registry.len()],
            frame_changes: vec![Vec::new(); registry.len()],
            lo_freqs,
            registry,
            config,
        })
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BackendChannelConfig {
        &self.config
    }

    /// LO frequency of a channel id.
    pub fn lo_freq(&self, channel_id: usize) -> f64 {
        self.lo_freqs.get(channel_id).copied().unwrap_or(0.0)
    }

    /// Install per-channel schedules and frame-change commands, keyed by
    /// channel id. Entries are sorted by start time; overlapping playback
    /// windows on one channel are rejected.
    pub fn initialize(
        &mut self,
        schedules: HashMap<usize, Vec<PulseScheduleEntry>>,
        frame_changes: HashMap<usize, Vec<FrameChangeEntry>>,
    ) -> Result<()> {
        self.clear_program();

        for (channel_id, mut entries) in schedules {
            if channel_id >= self.registry.len() {
                return Err(Error::Serialization(format!(
                    "schedule references channel id {} but only {} channels exist",
                    channel_id,
                    self.registry.len()
                )));
            }
            for entry in &entries {
                if !self.config.pulse_lib.contains_key(&entry.name) {
                    return Err(Error::Serialization(format!(
                        "pulse '{}' not found in the pulse library",
                        entry.name
                    )));
                }
                if entry.stop_time < entry.start_time {
                    return Err(Error::Serialization(format!(
                        "pulse '{}' stops at {} before it starts at {}",
                        entry.name, entry.stop_time, entry.start_time
                    )));
                }
            }
            entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
            for window in entries.windows(2) {
                if window[1].start_time < window[0].stop_time {
                    return Err(Error::Serialization(format!(
                        "overlapping schedule entries '{}' and '{}' on channel {}",
                        window[0].name, window[1].name, channel_id
                    )));
                }
            }
            debug!(channel_id, entries = entries.len(), "schedule installed");
            self.schedules[channel_id] = entries;
        }

        for (channel_id, mut entries) in frame_changes {
            if channel_id >= self.registry.len() {
                return Err(Error::Serialization(format!(
                    "frame change references channel id {} but only {} channels exist",
                    channel_id,
                    self.registry.len()
                )));
            }
            entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
            self.frame_changes[channel_id] = entries;
        }

        Ok(())
    }

    /// Install a pulse program keyed by channel names.
    pub fn load_program(&mut self, program: &PulseProgram) -> Result<()> {
        let mut schedules = HashMap::new();
        let mut frame_changes = HashMap::new();
        for (name, channel) in &program.0 {
            let id = self.registry.id(name)?;
            schedules.insert(id, channel.pulses.clone());
            frame_changes.insert(id, channel.frame_changes.clone());
        }
        self.initialize(schedules, frame_changes)
    }

    /// Drop all schedules and frame changes.
    pub fn clear_program(&mut self) {
        for schedule in &mut self.schedules {
            schedule.clear();
        }
        for changes in &mut self.frame_changes {
            changes.clear();
        }
    }

    /// Accumulated frame phase φ(t): the sum of the phase deltas of every
    /// frame change with start time ≤ t.
    pub fn frame_phase(&self, channel_id: usize, t: f64) -> f64 {
        let Some(changes) = self.frame_changes.get(channel_id) else {
            return 0.0;
        };
        changes
            .iter()
            .take_while(|fc| fc.start_time <= t)
            .map(|fc| fc.phase)
            .sum()
    }

    /// The complex drive value a(t)·exp(−i(νt + φ(t))), zero outside any
    /// playback window or past the end of the waveform.
    pub fn sample_iq(&self, channel_id: usize, t: f64) -> Complex64 {
        let zero = Complex64::new(0.0, 0.0);
        let Some(schedule) = self.schedules.get(channel_id) else {
            return zero;
        };
        let Some(entry) = schedule
            .iter()
            .find(|e| e.start_time <= t && t < e.stop_time)
        else {
            return zero;
        };
        // Entries were validated against the library at install time.
        let waveform = &self.config.pulse_lib[&entry.name];
        let index = ((t - entry.start_time) / self.config.dt).floor() as usize;
        let Some(amplitude) = waveform.get(index) else {
            return zero;
        };

        let phase = self.lo_freq(channel_id) * t + self.frame_phase(channel_id, t);
        *amplitude * Complex64::new(0.0, -phase).exp()
    }

    /// The real drive signal consumed by the integrator RHS.
    pub fn sample(&self, channel_id: usize, t: f64) -> f64 {
        self.sample_iq(channel_id, t).re
    }
}
