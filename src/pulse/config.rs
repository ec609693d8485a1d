// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend channel configuration and the pulse-program JSON surface.
//!
//! The backend config carries the sample period `dt`, one LO frequency per
//! drive channel (and optionally per control channel), and the pulse
//! library: named waveforms as sequences of complex samples, serialized as
//! `[re, im]` pairs.

use std::collections::HashMap;

use num_complex::Complex64;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Named sampled waveforms, evenly spaced at the backend sample period.
pub type PulseLibrary = HashMap<String, Vec<Complex64>>;

/// Backend-wide channel configuration.
#[derive(Debug, Clone)]
pub struct BackendChannelConfig {
    /// Sample period of every waveform in the library.
    pub dt: f64,
    /// LO frequency per drive channel; entry i belongs to `D<i>`.
    pub lo_freqs_d_channels: Vec<f64>,
    /// LO frequency per control channel; entry j belongs to `U<j>`.
    pub lo_freqs_u_channels: Vec<f64>,
    /// Pulse name → waveform samples.
    pub pulse_lib: PulseLibrary,
}

impl BackendChannelConfig {
    /// Config with drive channels only and an empty pulse library.
    pub fn new(dt: f64, lo_freqs_d_channels: Vec<f64>) -> Self {
        Self {
            dt,
            lo_freqs_d_channels,
            lo_freqs_u_channels: Vec::new(),
            pulse_lib: PulseLibrary::new(),
        }
    }

    /// Register a waveform under `name`, replacing any previous one.
    pub fn add_pulse(&mut self, name: &str, samples: Vec<Complex64>) {
        self.pulse_lib.insert(name.to_string(), samples);
    }

    /// Load from the JSON surface: `dt`, `loFreqs_dChannels`,
    /// `loFreqs_uChannels` (optional), `pulseLib` with `[re, im]` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawBackendConfig =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        let config = Self::from(raw);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt > 0.0) {
            return Err(Error::Serialization(format!(
                "backend config: dt must be positive, got {}",
                self.dt
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawBackendConfig {
    dt: f64,
    #[serde(rename = "loFreqs_dChannels")]
    lo_freqs_d_channels: Vec<f64>,
    #[serde(rename = "loFreqs_uChannels", default)]
    lo_freqs_u_channels: Vec<f64>,
    #[serde(rename = "pulseLib", default)]
    pulse_lib: HashMap<String, Vec<[f64; 2]>>,
}

impl From<RawBackendConfig> for BackendChannelConfig {
    fn from(raw: RawBackendConfig) -> Self {
        let pulse_lib = raw
            .pulse_lib
            .into_iter()
            .map(|(name, samples)| {
                let wave = samples
                    .into_iter()
                    .map(|[re, im]| Complex64::new(re, im))
                    .collect();
                (name, wave)
            })
            .collect();
        Self {
            dt: raw.dt,
            lo_freqs_d_channels: raw.lo_freqs_d_channels,
            lo_freqs_u_channels: raw.lo_freqs_u_channels,
            pulse_lib,
        }
    }
}

/// One playback window of a library pulse on a channel.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PulseScheduleEntry {
    /// Pulse library name.
    pub name: String,
    #[serde(rename = "startTime")]
    pub start_time: f64,
    #[serde(rename = "stopTime")]
    pub stop_time: f64,
}

/// A step-wise phase added to the channel carrier at `start_time`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct FrameChangeEntry {
    #[serde(rename = "startTime")]
    pub start_time: f64,
    pub phase: f64,
}

/// Per-channel playback program, keyed by channel name (`D0`, `U1`, …).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PulseProgram(pub HashMap<String, ChannelProgram>);

/// Schedule entries and frame changes for one channel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelProgram {
    #[serde(default)]
    pub pulses: Vec<PulseScheduleEntry>,
    #[serde(rename = "frameChanges", default)]
    pub frame_changes: Vec<FrameChangeEntry>,
}
