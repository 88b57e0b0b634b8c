//! Errors for sliding-window and spectral analysis.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for analysis routines.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error conditions raised by the analysis stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Window or step duration is non-finite/non-positive, or rounds to
    /// zero samples.
    #[error("Invalid {which}: {seconds} s gives {samples} samples at dt = {dt}; need >= 1")]
    InvalidWindow { which: &'static str, seconds: f64, samples: usize, dt: f64 },

    /// The window is longer than the segment under `EdgePolicy::Reject`.
    #[error(
        "Window of {window_len} samples exceeds the segment length of {segment_len} samples"
    )]
    WindowExceedsSegment { window_len: usize, segment_len: usize },

    /// A transform was asked to run on zero samples.
    #[error("Cannot analyse an empty sample sequence.")]
    EmptyInput,

    /// Unknown edge-policy name.
    #[error("Invalid edge policy {name:?} (expected 'reject' or 'allow')")]
    InvalidEdgePolicy { name: String },
}

#[cfg(feature = "python-bindings")]
impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
