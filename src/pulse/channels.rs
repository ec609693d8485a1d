// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! Channel name resolution.
//!
//! Drive channels `D<i>` are indexed in construction order and implicitly
//! belong to qubit i; control channels `U<j>` continue the same id space.
//! Unknown names are an assembly error, never a silent no-op.

use crate::error::{AssemblyError, Result};

use super::config::BackendChannelConfig;

/// Maps channel names to dense channel ids and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRegistry {
    num_drive: usize,
    num_control: usize,
}

impl ChannelRegistry {
    pub fn new(num_drive: usize, num_control: usize) -> Self {
        Self {
            num_drive,
            num_control,
        }
    }

    /// One channel per LO frequency entry: drive channels first, control
    /// channels continuing the id space.
    pub fn from_config(config: &BackendChannelConfig) -> Self {
        Self::new(
            config.lo_freqs_d_channels.len(),
            config.lo_freqs_u_channels.len(),
        )
    }

    pub fn len(&self) -> usize {
        self.num_drive + self.num_control
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a channel name (`D<i>` or `U<j>`, case-insensitive) to its id.
    pub fn id(&self, name: &str) -> Result<usize> {
        let unknown = || AssemblyError::UnknownChannel(name.to_string());

        let upper = name.to_ascii_uppercase();
        let index: usize = upper
            .get(1..)
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or_else(unknown)?;

        match upper.as_bytes()[0] {
            b'D' if index < self.num_drive => Ok(index),
            b'U' if index < self.num_control => Ok(self.num_drive + index),
            _ => Err(unknown().into()),
        }
    }

    /// The canonical name of a channel id.
    pub fn name(&self, id: usize) -> Option<String> {
        if id < self.num_drive {
            Some(format!("D{id}"))
        } else if id < self.len() {
            Some(format!("U{}", id - self.num_drive))
        } else {
            None
        }
    }

    /// Id of the drive channel coupled to `qubit`.
    pub fn drive_channel_id(&self, qubit: usize) -> Option<usize> {
        (qubit < self.num_drive).then_some(qubit)
    }

    /// Id of the j-th control channel.
    pub fn control_channel_id(&self, j: usize) -> Option<usize> {
        (j < self.num_control).then_some(self.num_drive + j)
    }
}
