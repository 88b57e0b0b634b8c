//! report — human- and machine-readable outputs of a run.
//!
//! Purpose
//! -------
//! Turn computed results into artefacts: the console summary ([`text`]), the
//! four SVG figures ([`plots`]) and optional JSON/CSV exports ([`export`]).
//!
//! Conventions
//! -----------
//! - Nothing here recomputes physics; inputs are finished
//!   [`SummaryResult`](crate::physics::SummaryResult)s and window series.
//! - All file-system and rendering failures are reported as [`ReportError`].

pub mod errors;
pub mod export;
pub mod plots;
pub mod text;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ReportError, ReportResult};
pub use self::export::{WINDOW_CSV_HEADER, write_summary_json, write_window_csv};
pub use self::plots::{FigureData, LinePlot, render_figures, render_line_plot};
pub use self::text::{SUMMARY_HEADER, SUMMARY_LABELS, format_sci, format_summary, write_summary};
