//! config — run configuration loaded from TOML.
//!
//! Purpose
//! -------
//! Gather every tunable of a run in [`RunConfig`]: input file and loader
//! options, analysis window, physics inputs, and output switches. Every field
//! has a default, so an empty TOML document (or no file at all) reproduces the
//! reference run over `H-H1_GWOSC_16KHZ_R1-1126259447-32.hdf5`.
//!
//! Key behaviors
//! -------------
//! - [`RunConfig::from_toml_str`] / [`RunConfig::load_from_file`] parse and
//!   then [`RunConfig::validate`] the result.
//! - Derived views ([`RunConfig::time_window`], [`RunConfig::window_options`])
//!   hand the analysis stages their typed inputs.
//!
//! Conventions
//! -----------
//! - Times and durations are in seconds, mass in kg, velocity in m/s.
//! - Policies are written as lowercase strings (`"reject"`, `"warn"`, ...).
//!
//! Examples
//! --------
//! ```toml
//! input = "strain.txt"
//! start_time = 0.4
//! end_time = 0.6
//!
//! [model]
//! mass = 2e30
//!
//! [constants]
//! G = 6.67430e-11
//! ```
use crate::{
    analysis::{
        sliding::{EdgePolicy, WindowOptions},
        spectrum::DEFAULT_MAX_FREQUENCY,
    },
    physics::{
        constants::{ModelParameters, PhysicalConstants},
        validation::NonFinitePolicy,
    },
    strain::{loader::LoaderOptions, segment::TimeWindow},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Input file of the reference run.
///
/// Reading it needs the `hdf5` feature; default builds report
/// `UnsupportedFormat` for it and take a GWOSC text file via `input`.
pub const DEFAULT_INPUT: &str = "H-H1_GWOSC_16KHZ_R1-1126259447-32.hdf5";

/// Result alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures while reading or validating a [`RunConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Strain file to analyse.
    pub input: PathBuf,
    /// Segment start (s from the first sample).
    pub start_time: f64,
    /// Segment end (s from the first sample).
    pub end_time: f64,
    /// Sliding-window length (s).
    pub window_size: f64,
    /// Sliding-window step (s).
    pub step_size: f64,
    pub constants: PhysicalConstants,
    pub model: ModelParameters,
    /// Upper edge of the spectrum plot (Hz).
    pub max_frequency: f64,
    /// Directory receiving figures and exports.
    pub output_dir: PathBuf,
    /// Render the SVG figures.
    pub plots: bool,
    /// Write `summary.json` and `windows.csv`.
    pub export: bool,
    pub edge_policy: EdgePolicy,
    pub non_finite: NonFinitePolicy,
    pub loader: LoaderOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            start_time: 0.4,
            end_time: 0.6,
            window_size: 0.01,
            step_size: 0.002,
            constants: PhysicalConstants::default(),
            model: ModelParameters::default(),
            max_frequency: DEFAULT_MAX_FREQUENCY,
            output_dir: PathBuf::from("plots"),
            plots: true,
            export: false,
            edge_policy: EdgePolicy::default(),
            non_finite: NonFinitePolicy::default(),
            loader: LoaderOptions::default(),
        }
    }
}

impl RunConfig {
    /// Read, parse, and validate a TOML file.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::Io` when the file cannot be read.
    /// - `ConfigError::Parse` / `ConfigError::Invalid` as for
    ///   [`RunConfig::from_toml_str`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<RunConfig> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        RunConfig::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document; missing keys take their defaults.
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<RunConfig> {
        let config: RunConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::Invalid` describing the first violated constraint:
    ///   a bad time window, non-positive window/step durations, invalid
    ///   constants or model parameters, a non-positive `max_frequency`, or a
    ///   non-positive `loader.fallback_dt`.
    pub fn validate(&self) -> ConfigResult<()> {
        self.time_window()?;
        positive_duration("window_size", self.window_size)?;
        positive_duration("step_size", self.step_size)?;
        self.constants.validate().map_err(invalid)?;
        self.model.validate().map_err(invalid)?;
        if !(self.max_frequency.is_finite() && self.max_frequency > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frequency must be finite and > 0, got {}",
                self.max_frequency
            )));
        }
        if let Some(dt) = self.loader.fallback_dt {
            positive_duration("loader.fallback_dt", dt)?;
        }
        Ok(())
    }

    /// The configured segment bounds as a validated [`TimeWindow`].
    pub fn time_window(&self) -> ConfigResult<TimeWindow> {
        TimeWindow::new(self.start_time, self.end_time).map_err(invalid)
    }

    /// The configured sliding-window durations and edge policy.
    pub fn window_options(&self) -> WindowOptions {
        WindowOptions::new(self.window_size, self.step_size).with_edge_policy(self.edge_policy)
    }
}

fn invalid(err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid(err.to_string())
}

fn positive_duration(name: &str, seconds: f64) -> ConfigResult<()> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and > 0, got {seconds}")))
    }
}
