//! Errors for report rendering and export.

/// Result alias for reporting operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failures while writing text, figures, or exports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to render figure {path}: {reason}")]
    Render { path: String, reason: String },

    #[error("Failed to serialize report: {reason}")]
    Serialize { reason: String },
}

#[cfg(feature = "python-bindings")]
impl From<ReportError> for pyo3::PyErr {
    fn from(err: ReportError) -> pyo3::PyErr {
        pyo3::exceptions::PyIOError::new_err(err.to_string())
    }
}
