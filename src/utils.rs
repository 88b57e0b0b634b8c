//! utils — conversions at the Python boundary.
//!
//! Only compiled with the `python-bindings` feature. Accepts numpy arrays,
//! pandas Series (through `to_numpy`) and plain sequences of floats.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use crate::{
    config::RunConfig,
    physics::constants::ModelParameters,
    strain::series::{StrainMeta, StrainSeries},
};

/// Copy Python strain samples into a validated [`StrainSeries`].
///
/// Accepted inputs, tried in order: a 1-D float64 `numpy.ndarray` (strided
/// views included), anything with a `to_numpy()` returning one (pandas
/// Series), then any sequence of floats.
///
/// Errors
/// ------
/// - `TypeError` for inputs that are none of the above.
/// - `ValueError` for empty samples or an invalid `dt`.
#[cfg(feature = "python-bindings")]
pub fn extract_strain_series(raw_data: &Bound<'_, PyAny>, dt: f64) -> PyResult<StrainSeries> {
    let samples = match raw_data.extract::<PyReadonlyArray1<f64>>() {
        Ok(array) => array.as_array().to_owned(),
        Err(_) => match raw_data
            .call_method0("to_numpy")
            .and_then(|obj| obj.extract::<PyReadonlyArray1<f64>>().map(|a| a.as_array().to_owned()))
        {
            Ok(array) => array,
            Err(_) => Array1::from(raw_data.extract::<Vec<f64>>().map_err(|_| {
                PyTypeError::new_err(
                    "strain must be a 1-D numpy.ndarray, pandas.Series or sequence of float64",
                )
            })?),
        },
    };
    Ok(StrainSeries::new(samples, dt, StrainMeta::default())?)
}

/// Build a validated [`RunConfig`] from keyword arguments, defaulting the rest.
#[cfg(feature = "python-bindings")]
pub fn build_run_config(
    start_time: Option<f64>, end_time: Option<f64>, window_size: Option<f64>,
    step_size: Option<f64>, mass: Option<f64>, velocity: Option<f64>,
    max_frequency: Option<f64>,
) -> PyResult<RunConfig> {
    let defaults = RunConfig::default();
    let model = ModelParameters::new(
        mass.unwrap_or(defaults.model.mass),
        velocity.unwrap_or(defaults.model.velocity),
    )?;
    let config = RunConfig {
        start_time: start_time.unwrap_or(defaults.start_time),
        end_time: end_time.unwrap_or(defaults.end_time),
        window_size: window_size.unwrap_or(defaults.window_size),
        step_size: step_size.unwrap_or(defaults.step_size),
        max_frequency: max_frequency.unwrap_or(defaults.max_frequency),
        model,
        plots: false,
        ..defaults
    };
    config.validate().map_err(|err| PyValueError::new_err(err.to_string()))?;
    Ok(config)
}

#[cfg(all(test, feature = "python-bindings"))]
mod tests {
    use super::*;
    use numpy::PyArray1;
    use pyo3::types::PyList;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Input shapes accepted by `extract_strain_series` and the Python
    // exception raised for everything else.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // numpy arrays and plain lists give the same series. A string raises
    // `TypeError` and an empty list raises `ValueError`.
    fn extract_strain_series_accepts_arrays_and_sequences() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let values = [1.0e-21, -2.0e-21, 1.5e-21];

            let array = PyArray1::from_slice(py, &values);
            let from_array = extract_strain_series(array.as_any(), 0.25).unwrap();
            assert_eq!(from_array.samples().to_vec(), values.to_vec());
            assert_eq!(from_array.dt(), 0.25);

            let list = PyList::new(py, values).unwrap();
            let from_list = extract_strain_series(list.as_any(), 0.25).unwrap();
            assert_eq!(from_list.samples(), from_array.samples());

            let text = "not strain".into_pyobject(py).unwrap();
            let err = extract_strain_series(text.as_any(), 0.25).unwrap_err();
            assert!(err.is_instance_of::<PyTypeError>(py));

            let empty = PyList::empty(py);
            let err = extract_strain_series(empty.as_any(), 0.25).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }
}
