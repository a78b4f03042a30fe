//! PyO3 bindings for Python integration
//!
//! Built only with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::ConditioningError;

mod filter_bindings;
mod spectrum_bindings;
mod conditioning_bindings;

impl From<ConditioningError> for PyErr {
    fn from(err: ConditioningError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn strain_conditioning(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyWindowType>()?;
    m.add_class::<spectrum_bindings::PyPsdEstimator>()?;

    m.add_function(wrap_pyfunction!(filter_bindings::bandpass, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::analytic_model, m)?)?;
    m.add_function(wrap_pyfunction!(conditioning_bindings::whiten, m)?)?;
    m.add_function(wrap_pyfunction!(conditioning_bindings::reqshift, m)?)?;
    m.add_function(wrap_pyfunction!(conditioning_bindings::write_wavfile, m)?)?;

    Ok(())
}
