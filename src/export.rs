// Copyright 2026 PulseSim Contributors
// SPDX-License-Identifier: Apache-2.0

//! CSV export of time-stepping data.
//!
//! Writes `Time, Population[0], …, Population[M−1]` rows, each field
//! followed by a comma (readers must tolerate the trailing one). The file
//! name is stamped with the local time so repeated runs never collide.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::Result;
use crate::solver::TsData;

/// Write the trajectory next to `stem` as `<stem>_<YYYYMMDD_HH:MM:SS>.csv`.
/// An existing `.csv` suffix on the stem is stripped first. With no steps
/// recorded nothing is written and `None` is returned.
pub fn write_ts_data_csv(stem: impl AsRef<Path>, data: &[TsData]) -> Result<Option<PathBuf>> {
    if data.is_empty() {
        return Ok(None);
    }

    let stem = stem.as_ref();
    let base = stem
        .to_string_lossy()
        .strip_suffix(".csv")
        .map(str::to_string)
        .unwrap_or_else(|| stem.to_string_lossy().into_owned());
    let timestamp = Local::now().format("%Y%m%d_%H:%M:%S");
    let path = PathBuf::from(format!("{base}_{timestamp}.csv"));

    let file = File::create(&path)?;
    let mut out = BufWriter::new(file);

    let num_populations = data[0].populations.len();
    write!(out, "Time, ")?;
    for j in 0..num_populations {
        write!(out, "Population[{j}], ")?;
    }
    writeln!(out)?;

    for step in data {
        write!(out, "{}, ", step.time)?;
        for population in &step.populations {
            write!(out, "{population}, ")?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    info!(path = %path.display(), rows = data.len(), "time-stepping data written");
    Ok(Some(path))
}
