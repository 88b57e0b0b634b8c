//! rust_strainflux — windowed entropy-flux analysis of gravitational-wave strain.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers, the library behind the
//! `strainflux` binary, and (with the `python-bindings` feature) the PyO3
//! bridge exposing the pure analysis to Python as `_rust_strainflux`.
//!
//! Key behaviors
//! -------------
//! - Re-export the stage modules: [`strain`] (load and segment),
//!   [`physics`] (formulas and summary), [`analysis`] (sliding windows and
//!   spectrum), [`report`] (text, figures, exports), plus [`config`] and
//!   [`pipeline`] which tie them together.
//! - Define the `StrainAnalysis` `#[pyclass]` and the `#[pymodule]`
//!   initializer when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every strain series and segment crossing a module boundary is
//!   non-empty and has a positive sample spacing. Non-finite samples are
//!   only screened inside the analysed segment.
//! - The physics formulas are evaluated literally; derived scalars are
//!   computed from stored fields so `pressure == F / v` and
//!   `energy_flow_rate == T · φ` hold exactly.
//!
//! Conventions
//! -----------
//! - SI units throughout; times are seconds from the first sample of the
//!   loaded series.
//! - Each subtree owns an `errors` module with a `thiserror` enum and a
//!   `XResult<T>` alias; [`pipeline::PipelineError`] wraps them all.
//! - Library code logs through the `log` facade and never installs a logger.
//!
//! Downstream usage
//! ----------------
//! - Most callers need only [`config::RunConfig`],
//!   [`pipeline::analyze_file`] / [`pipeline::run_analysis`] and
//!   [`pipeline::render_outputs`].
//! - Individual stages are public for callers assembling their own flow.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests; `tests/integration_strain_pipeline.rs`
//!   drives the whole pipeline from a temporary GWOSC text file.

pub mod analysis;
pub mod config;
pub mod physics;
pub mod pipeline;
pub mod report;
pub mod strain;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    pipeline::{AnalysisOutcome, run_analysis},
    utils::{build_run_config, extract_strain_series},
};

/// StrainAnalysis — Python-facing wrapper around [`run_analysis`].
///
/// Purpose
/// -------
/// Run the pure analysis over an in-memory strain array from Python and keep
/// the outcome for inspection.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `StrainAnalysis(strain, dt, start_time=0.4, end_time=0.6, window_size=0.01,
/// step_size=0.002, mass=1e30, velocity=1e8, max_frequency=1000.0)`:
/// - `strain`: `&PyAny`
///   One-dimensional array-like of `f64` values, length ≥ 1.
/// - `dt`: `f64`
///   Sample spacing in seconds, finite and > 0.
///
/// Notes
/// -----
/// - No figures are rendered from Python; use the returned arrays instead.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_strainflux.analysis")]
pub struct StrainAnalysis {
    inner: AnalysisOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl StrainAnalysis {
    #[new]
    #[pyo3(
        text_signature = "(strain, dt, /, start_time=None, end_time=None, window_size=None, \
                          step_size=None, mass=None, velocity=None, max_frequency=None)",
        signature = (
            strain,
            dt,
            start_time = None,
            end_time = None,
            window_size = None,
            step_size = None,
            mass = None,
            velocity = None,
            max_frequency = None,
        )
    )]
    pub fn new<'py>(
        strain: &Bound<'py, PyAny>, dt: f64, start_time: Option<f64>,
        end_time: Option<f64>, window_size: Option<f64>, step_size: Option<f64>,
        mass: Option<f64>, velocity: Option<f64>, max_frequency: Option<f64>,
    ) -> PyResult<StrainAnalysis> {
        let series = extract_strain_series(strain, dt)?;
        let config = build_run_config(
            start_time,
            end_time,
            window_size,
            step_size,
            mass,
            velocity,
            max_frequency,
        )?;
        let inner = run_analysis(&config, &series)?;
        Ok(StrainAnalysis { inner })
    }

    #[getter]
    pub fn energy_dissipation(&self) -> f64 {
        self.inner.summary.energy_dissipation
    }

    #[getter]
    pub fn hawking_temperature(&self) -> f64 {
        self.inner.summary.hawking_temperature
    }

    #[getter]
    pub fn entropy_flux(&self) -> f64 {
        self.inner.summary.entropy_flux
    }

    #[getter]
    pub fn information_force(&self) -> f64 {
        self.inner.summary.information_force
    }

    #[getter]
    pub fn pressure(&self) -> f64 {
        self.inner.summary.pressure
    }

    #[getter]
    pub fn energy_flow_rate(&self) -> f64 {
        self.inner.summary.energy_flow_rate
    }

    /// Midpoint time of each sliding window (s).
    #[getter]
    pub fn window_times<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.windows.times().to_vec().into_pyarray(py)
    }

    /// Entropy flux per window.
    #[getter]
    pub fn window_entropy_flux<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.windows.entropy_flux().to_vec().into_pyarray(py)
    }

    /// Information force per window.
    #[getter]
    pub fn window_information_force<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.inner.windows.information_force().to_vec().into_pyarray(py)
    }

    /// `(frequencies, amplitudes)` of the band-limited spectrum.
    pub fn spectrum<'py>(
        &self, py: Python<'py>,
    ) -> (Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>) {
        (
            self.inner.spectrum.frequencies().to_vec().into_pyarray(py),
            self.inner.spectrum.amplitudes().to_vec().into_pyarray(py),
        )
    }

    /// The console summary block as a string.
    pub fn summary_text(&self) -> String {
        report::format_summary(&self.inner.summary)
    }
}

/// Module initializer for `_rust_strainflux`.
///
/// Creates the `analysis` submodule, registers [`StrainAnalysis`] in it and
/// makes it importable as `rust_strainflux.analysis` through `sys.modules`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_strainflux<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let analysis_mod = PyModule::new(_py, "analysis")?;
    analysis_mod.add_class::<StrainAnalysis>()?;
    m.add_submodule(&analysis_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_strainflux.analysis", analysis_mod)?;
    Ok(())
}
