//! report::export — machine-readable outputs of a run.
//!
//! Purpose
//! -------
//! Persist the summary scalars as JSON (`summary.json`) and the
//! sliding-window series as CSV (`windows.csv`) next to the figures, so a run
//! can be inspected without re-parsing the console report.
//!
//! Conventions
//! -----------
//! - CSV columns: `time,energy_dissipation,entropy_flux,information_force`,
//!   one row per window, values written with Rust's shortest round-trip
//!   `f64` formatting.
//! - JSON field names match [`SummaryResult`]'s fields.
use crate::{
    analysis::sliding::WindowSeriesResult,
    physics::summary::SummaryResult,
    report::errors::{ReportError, ReportResult},
};
use log::info;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Header row of [`write_window_csv`].
pub const WINDOW_CSV_HEADER: &str = "time,energy_dissipation,entropy_flux,information_force";

fn io_error(path: &Path, err: std::io::Error) -> ReportError {
    ReportError::Io { path: path.display().to_string(), reason: err.to_string() }
}

/// Write `summary` as pretty-printed JSON to `path`.
///
/// Errors
/// ------
/// - `ReportError::Io` if the file cannot be created or written.
/// - `ReportError::Serialize` if serialization fails.
pub fn write_summary_json(path: &Path, summary: &SummaryResult) -> ReportResult<()> {
    let file = File::create(path).map_err(|err| io_error(path, err))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .map_err(|err| ReportError::Serialize { reason: err.to_string() })?;
    writer.write_all(b"\n").map_err(|err| io_error(path, err))?;
    writer.flush().map_err(|err| io_error(path, err))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Write the window series as CSV to `path`.
///
/// An empty series produces a file with just the header row.
pub fn write_window_csv(path: &Path, windows: &WindowSeriesResult) -> ReportResult<()> {
    let file = File::create(path).map_err(|err| io_error(path, err))?;
    let mut writer = BufWriter::new(file);
    write_window_rows(&mut writer, windows).map_err(|err| io_error(path, err))?;
    info!("wrote {} ({} windows)", path.display(), windows.len());
    Ok(())
}

fn write_window_rows<W: Write>(writer: &mut W, windows: &WindowSeriesResult) -> std::io::Result<()> {
    writeln!(writer, "{WINDOW_CSV_HEADER}")?;
    let rows = windows
        .times()
        .iter()
        .zip(windows.energy_dissipation())
        .zip(windows.entropy_flux())
        .zip(windows.information_force());
    for (((t, e), phi), f) in rows {
        writeln!(writer, "{t},{e},{phi},{f}")?;
    }
    writer.flush()
}
