//! Errors for the physics model (parameter checks and non-finite results).

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for physics-model operations.
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Error conditions raised by the physics model.
///
/// - `InvalidParameter`: a scenario input or constant is non-finite or ≤ 0.
/// - `NonFiniteResult`: a computed quantity is NaN or ±inf and the active
///   [`NonFinitePolicy`](crate::physics::validation::NonFinitePolicy) is
///   `Error`.
/// - `InvalidPolicy`: an unknown policy name was parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("{name} must be finite and > 0; got: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Computed {quantity} is non-finite: {value}")]
    NonFiniteResult { quantity: String, value: f64 },

    #[error("Invalid non-finite policy {name:?} (expected 'warn', 'error', or 'ignore')")]
    InvalidPolicy { name: String },
}

#[cfg(feature = "python-bindings")]
impl From<PhysicsError> for PyErr {
    fn from(err: PhysicsError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
