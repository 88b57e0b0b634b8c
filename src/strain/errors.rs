//! strain::errors — data-access and segmentation errors for strain series.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the strain loaders,
//! the [`StrainSeries`](crate::strain::series::StrainSeries) container, and
//! the segment extractor. Two families live here:
//!
//! - **Data access**: the file is missing, unreadable, or does not contain
//!   the expected dataset / spacing attribute in a usable form.
//! - **Segmentation**: the requested time window is malformed or selects
//!   zero samples.
//!
//! Conventions
//! -----------
//! - Payloads are owned `String`s / scalars so the enum stays `Clone` and
//!   `PartialEq`; I/O errors are flattened to their message.
//! - Every variant is fatal for a run. Nothing in this crate retries.
//! - When `python-bindings` is enabled, all variants map to `ValueError`
//!   with the `Display` message preserved verbatim.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for strain loading and segmentation.
pub type StrainResult<T> = Result<T, StrainError>;

/// Unified error type for strain input and segmentation.
///
/// Variants up to `UnsupportedFormat` form the data-access family (see
/// [`StrainError::is_data_access`]); the rest report violated series or
/// window invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StrainError {
    // ---- Data access ----
    /// The path does not exist.
    #[error("Strain file not found: {path}")]
    FileNotFound { path: String },

    /// The file exists but could not be opened or read.
    #[error("Failed to read strain file {path}: {reason}")]
    Io { path: String, reason: String },

    /// The expected strain dataset is absent.
    #[error("Strain file {path} has no dataset '{dataset}'")]
    MissingDataset { path: String, dataset: String },

    /// The sample-spacing attribute is absent.
    #[error("Strain file {path} has no sample-spacing attribute '{attribute}'")]
    MissingAttribute { path: String, attribute: String },

    /// A dataset, attribute, or text line could not be interpreted.
    #[error("Malformed strain data in {path}: {reason}")]
    MalformedData { path: String, reason: String },

    /// The file format is recognised but not compiled into this build.
    #[error("Unsupported strain format for {path}: {reason}")]
    UnsupportedFormat { path: String, reason: String },

    // ---- Series invariants ----
    /// The strain series holds no samples.
    #[error("Strain series is empty.")]
    EmptySeries,

    /// The sample spacing must be finite and > 0.
    #[error("Sample spacing dt must be finite and > 0; got: {dt}")]
    InvalidSpacing { dt: f64 },

    // ---- Segmentation ----
    /// Window bounds must be finite with start_time >= 0.
    #[error("Time window bounds must be finite with start >= 0; got start={start_time}, end={end_time}")]
    InvalidTimeWindow { start_time: f64, end_time: f64 },

    /// The requested window selects zero samples.
    #[error(
        "Time window [{start_time}, {end_time}) selects no samples (start_idx={start_idx}, end_idx={end_idx})"
    )]
    EmptySegment { start_time: f64, end_time: f64, start_idx: usize, end_idx: usize },
}

impl StrainError {
    /// `true` for the data-access family (missing, unreadable, or malformed
    /// input files).
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            StrainError::FileNotFound { .. }
                | StrainError::Io { .. }
                | StrainError::MissingDataset { .. }
                | StrainError::MissingAttribute { .. }
                | StrainError::MalformedData { .. }
                | StrainError::UnsupportedFormat { .. }
        )
    }
}

#[cfg(feature = "python-bindings")]
impl From<StrainError> for PyErr {
    fn from(err: StrainError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
