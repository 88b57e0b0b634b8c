//! pipeline — end-to-end orchestration of one analysis run.
//!
//! Purpose
//! -------
//! Connect the stages in their fixed order: load → segment → summary →
//! sliding windows → spectrum → report. [`run_analysis`] is the pure part
//! (no I/O beyond logging); [`render_outputs`] performs every side effect.
//!
//! Key behaviors
//! -------------
//! - Every stage error is converted into [`PipelineError`] via `#[from]` and
//!   propagated unchanged; nothing is retried or swallowed.
//! - Non-finite segment samples, summary scalars and window values are
//!   screened with the configured
//!   [`NonFinitePolicy`](crate::physics::NonFinitePolicy) before anything is
//!   reported, so a fatal policy never leaves a partial report. Gaps outside
//!   the segment are never looked at.
//! - [`render_outputs_to`] writes figures and exports first and the text
//!   summary last, so a failed write never follows a printed summary.
//!
//! Downstream usage
//! ----------------
//! - `main` calls [`analyze_file`] then [`render_outputs`].
//! - Library callers with in-memory data call [`run_analysis`] directly.
use crate::{
    analysis::{
        errors::AnalysisError,
        sliding::{WindowSeriesResult, sliding_window},
        spectrum::{AmplitudeSpectrum, amplitude_spectrum},
    },
    config::{ConfigError, RunConfig},
    physics::{
        errors::PhysicsError,
        summary::SummaryResult,
        validation::{enforce_policy, non_finite_quantities},
    },
    report::{
        errors::{ReportError, ReportResult},
        export::{write_summary_json, write_window_csv},
        plots::{FigureData, render_figures},
        text::write_summary,
    },
    strain::{
        errors::StrainError,
        loader::load_strain,
        segment::{Segment, extract_segment},
        series::StrainSeries,
    },
};
use log::{debug, info};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

/// Result alias for pipeline entry points.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Any failure of a run, tagged by stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Strain(#[from] StrainError),

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[cfg(feature = "python-bindings")]
impl From<PipelineError> for pyo3::PyErr {
    fn from(err: PipelineError) -> pyo3::PyErr {
        match err {
            PipelineError::Config(inner) => pyo3::exceptions::PyValueError::new_err(inner.to_string()),
            PipelineError::Strain(inner) => inner.into(),
            PipelineError::Physics(inner) => inner.into(),
            PipelineError::Analysis(inner) => inner.into(),
            PipelineError::Report(inner) => inner.into(),
        }
    }
}

/// Everything computed for one run, ready to be reported.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub segment: Segment,
    pub summary: SummaryResult,
    pub windows: WindowSeriesResult,
    /// Spectrum restricted to `[0, max_frequency]`.
    pub spectrum: AmplitudeSpectrum,
}

/// Run every computation stage over an already loaded series.
///
/// Errors
/// ------
/// - `PipelineError::Config` for an invalid `config`.
/// - `PipelineError::Strain` when the window selects no samples.
/// - `PipelineError::Analysis` for invalid or oversized windows.
/// - `PipelineError::Physics` for non-finite segment samples or results
///   under `NonFinitePolicy::Error`.
pub fn run_analysis(config: &RunConfig, series: &StrainSeries) -> PipelineResult<AnalysisOutcome> {
    config.validate()?;

    let segment = extract_segment(series, config.time_window()?)?;
    info!(
        "segment [{}, {}) s -> samples [{}, {}) ({} samples)",
        config.start_time,
        config.end_time,
        segment.start_idx(),
        segment.end_idx(),
        segment.len()
    );

    let summary = SummaryResult::from_segment(&segment, &config.constants, &config.model);
    let windows =
        sliding_window(&segment, &config.window_options(), &config.constants, &config.model)?;
    debug!("{} windows over {} segment samples", windows.len(), segment.len());

    let mut offenders = segment.non_finite_samples();
    offenders.extend(non_finite_quantities(summary.quantities()));
    offenders.extend(windows.non_finite_quantities());
    enforce_policy(config.non_finite, &offenders)?;

    let spectrum = amplitude_spectrum(segment.samples().view(), segment.dt())?
        .band(0.0, config.max_frequency);

    Ok(AnalysisOutcome { segment, summary, windows, spectrum })
}

/// Load `config.input` and run [`run_analysis`] on it.
pub fn analyze_file(config: &RunConfig) -> PipelineResult<AnalysisOutcome> {
    config.validate()?;
    let series = load_strain(&config.input, &config.loader)?;
    run_analysis(config, &series)
}

/// [`render_outputs_to`] with the summary going to stdout.
pub fn render_outputs(outcome: &AnalysisOutcome, config: &RunConfig) -> PipelineResult<Vec<PathBuf>> {
    render_outputs_to(outcome, config, &mut io::stdout().lock())
}

/// Write figures and exports as configured, then the text summary to `out`.
///
/// Returns the paths of every file written. Nothing reaches `out` when a
/// figure or export fails.
pub fn render_outputs_to<W: Write>(
    outcome: &AnalysisOutcome, config: &RunConfig, out: &mut W,
) -> PipelineResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    if config.plots {
        written.extend(render_figures(&figure_data(outcome, config), &config.output_dir)?);
    }
    if config.export {
        written.extend(write_exports(outcome, config)?);
    }
    debug!("{} report files written", written.len());

    write_summary(out, &outcome.summary)
        .map_err(|err| ReportError::Io { path: "<summary>".to_string(), reason: err.to_string() })?;
    Ok(written)
}

fn figure_data<'a>(outcome: &'a AnalysisOutcome, config: &RunConfig) -> FigureData<'a> {
    let segment_times = outcome.segment.times().as_slice().unwrap_or(&[]);
    let segment_samples = outcome.segment.samples().as_slice().unwrap_or(&[]);
    FigureData {
        segment_times,
        segment_samples,
        frequencies: outcome.spectrum.frequencies(),
        amplitudes: outcome.spectrum.amplitudes(),
        max_frequency: config.max_frequency,
        window_times: outcome.windows.times(),
        entropy_flux: outcome.windows.entropy_flux(),
        information_force: outcome.windows.information_force(),
    }
}

fn write_exports(outcome: &AnalysisOutcome, config: &RunConfig) -> ReportResult<Vec<PathBuf>> {
    fs::create_dir_all(&config.output_dir).map_err(|err| ReportError::Io {
        path: config.output_dir.display().to_string(),
        reason: err.to_string(),
    })?;
    let summary_path = config.output_dir.join("summary.json");
    let windows_path = config.output_dir.join("windows.csv");
    write_summary_json(&summary_path, &outcome.summary)?;
    write_window_csv(&windows_path, &outcome.windows)?;
    Ok(vec![summary_path, windows_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::sliding::EdgePolicy,
        physics::{constants::ModelParameters, validation::NonFinitePolicy},
        strain::series::StrainMeta,
    };
    use approx::assert_relative_eq;
    use ndarray::Array1;

    fn series(n: usize, dt: f64) -> StrainSeries {
        let samples = Array1::from_iter((0..n).map(|i| 1e-21 * (0.3 * i as f64).cos()));
        StrainSeries::new(samples, dt, StrainMeta::default()).unwrap()
    }

    fn config(start_time: f64, end_time: f64, window_size: f64, step_size: f64) -> RunConfig {
        RunConfig { start_time, end_time, window_size, step_size, ..RunConfig::default() }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - `run_analysis` wiring: segment bounds, window count, spectrum band.
    // - Error propagation by stage.
    // - Non-finite policy handling, including gaps in the strain.
    // - Output ordering of `render_outputs_to`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The outcome fields agree with each stage run on its own.
    //
    // Given
    // -----
    // - 4096 samples at dt = 1/4096, segment [0.25, 0.5), windows of 0.01 s
    //   every 0.002 s.
    //
    // Expect
    // ------
    // - 1024 segment samples, `floor((1024 - 41) / 8) + 1 = 123` windows.
    // - Spectrum bins stop at `max_frequency`.
    fn run_analysis_wires_stages_together() {
        let dt = 1.0 / 4096.0;
        let series = series(4096, dt);
        let config = RunConfig { max_frequency: 500.0, ..config(0.25, 0.5, 0.01, 0.002) };

        let outcome = run_analysis(&config, &series).unwrap();

        assert_eq!(outcome.segment.len(), 1024);
        assert_eq!(outcome.windows.window_len(), 41);
        assert_eq!(outcome.windows.step_len(), 8);
        assert_eq!(outcome.windows.len(), 123);
        let expected = SummaryResult::from_segment(&outcome.segment, &config.constants, &config.model);
        assert_eq!(outcome.summary, expected);
        assert!(outcome.spectrum.frequencies().iter().all(|&f| f <= 500.0));
        assert_relative_eq!(*outcome.spectrum.frequencies().last().unwrap(), 500.0);
    }

    #[test]
    // Purpose
    // -------
    // Stage failures surface as the matching `PipelineError` variant.
    fn stage_errors_are_tagged() {
        let series = series(100, 0.01);

        let err = run_analysis(&config(0.5, 0.5, 0.01, 0.01), &series).unwrap_err();
        assert!(matches!(err, PipelineError::Strain(StrainError::EmptySegment { .. })));

        let err = run_analysis(&config(0.0, 0.5, 0.9, 0.01), &series).unwrap_err();
        assert!(matches!(err, PipelineError::Analysis(AnalysisError::WindowExceedsSegment { .. })));

        let err = run_analysis(&config(-0.1, 0.5, 0.01, 0.01), &series).unwrap_err();
        assert!(matches!(err, PipelineError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    // Purpose
    // -------
    // `EdgePolicy::Allow` turns an oversized window into an empty series.
    fn allow_policy_gives_empty_windows() {
        let series = series(100, 0.01);
        let config = RunConfig { edge_policy: EdgePolicy::Allow, ..config(0.0, 0.5, 0.9, 0.01) };

        let outcome = run_analysis(&config, &series).unwrap();

        assert!(outcome.windows.is_empty());
        assert_eq!(outcome.segment.len(), 50);
    }

    #[test]
    // Purpose
    // -------
    // A mass small enough to overflow the temperature is fatal only under
    // `NonFinitePolicy::Error`.
    //
    // Given
    // -----
    // - mass = 1e-320 (subnormal), so `8πGMk_B` underflows to 0 and T = inf.
    //
    // Expect
    // ------
    // - `Warn` completes with a non-finite summary.
    // - `Error` fails with `PhysicsError::NonFiniteResult`.
    fn non_finite_policy_controls_failure() {
        let series = series(100, 0.01);
        let base = config(0.0, 0.5, 0.1, 0.05);
        let lenient = RunConfig { model: ModelParameters { mass: 1e-320, velocity: 1e8 }, ..base };

        let outcome = run_analysis(&lenient, &series).unwrap();
        assert!(!outcome.summary.is_finite());

        let strict = RunConfig { non_finite: NonFinitePolicy::Error, ..lenient };
        let err = run_analysis(&strict, &series).unwrap_err();
        assert!(matches!(err, PipelineError::Physics(PhysicsError::NonFiniteResult { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `render_outputs` writes figures and exports into `output_dir`.
    fn render_outputs_writes_configured_files() {
        let dir = tempfile::tempdir().unwrap();
        let series = series(400, 0.005);
        let config = RunConfig {
            output_dir: dir.path().join("out"),
            export: true,
            ..config(0.2, 1.2, 0.05, 0.025)
        };
        let outcome = run_analysis(&config, &series).unwrap();

        let written = render_outputs(&outcome, &config).unwrap();

        for name in ["strain.svg", "spectrum.svg", "entropy_flux.svg", "information_force.svg"] {
            assert!(config.output_dir.join(name).is_file(), "{name} missing");
        }
        assert!(written.contains(&config.output_dir.join("summary.json")));
        assert!(written.contains(&config.output_dir.join("windows.csv")));
    }

    #[test]
    // Purpose
    // -------
    // A NaN gap only matters when it falls inside the analysed segment.
    //
    // Given
    // -----
    // - 100 samples at dt = 0.01 with `samples[80] = NaN`.
    // - Segment [0, 0.5) (indices 0..50) and segment [0.5, 1.0) (50..100).
    //
    // Expect
    // ------
    // - The first segment yields a finite summary even under `Error`.
    // - The second fails under `Error` naming `strain[80]`, and completes
    //   with a non-finite summary under the default `Warn`.
    fn nan_gap_is_screened_only_inside_segment() {
        let mut samples = series(100, 0.01).samples().clone();
        samples[80] = f64::NAN;
        let gappy = StrainSeries::new(samples, 0.01, StrainMeta::default()).unwrap();

        let before_gap = RunConfig { non_finite: NonFinitePolicy::Error, ..config(0.0, 0.5, 0.1, 0.05) };
        let outcome = run_analysis(&before_gap, &gappy).unwrap();
        assert!(outcome.summary.is_finite());

        let over_gap = RunConfig { non_finite: NonFinitePolicy::Error, ..config(0.5, 1.0, 0.1, 0.05) };
        let err = run_analysis(&over_gap, &gappy).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Physics(PhysicsError::NonFiniteResult { ref quantity, .. }) if quantity == "strain[80]"
        ));

        let lenient = RunConfig { non_finite: NonFinitePolicy::Warn, ..over_gap };
        let outcome = run_analysis(&lenient, &gappy).unwrap();
        assert!(!outcome.summary.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // The text summary is written only after every file was produced.
    //
    // Given
    // -----
    // - `output_dir` pointing at an existing regular file, so figure
    //   rendering cannot create its directory.
    // - A second run into a fresh directory.
    //
    // Expect
    // ------
    // - The first call fails with `ReportError::Io` and the writer is empty.
    // - The second call succeeds and the writer holds the six-line summary.
    fn summary_is_written_after_report_files() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"occupied").unwrap();
        let series = series(400, 0.005);
        let blocked = RunConfig { output_dir: blocker, ..config(0.2, 1.2, 0.05, 0.025) };
        let outcome = run_analysis(&blocked, &series).unwrap();

        let mut out = Vec::new();
        let err = render_outputs_to(&outcome, &blocked, &mut out).unwrap_err();
        assert!(matches!(err, PipelineError::Report(ReportError::Io { .. })));
        assert!(out.is_empty());

        let open = RunConfig { output_dir: dir.path().join("out"), ..blocked };
        let written = render_outputs_to(&outcome, &open, &mut out).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 6);
    }
}
