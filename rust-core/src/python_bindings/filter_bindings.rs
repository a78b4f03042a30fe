//! Python bindings for band-pass filtering

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::{self, BandpassConfig, WindowType};
use crate::series::TimeSeries;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Band-pass a strain array
///
/// Args:
///     strain: Samples as numpy array
///     fs: Sample rate in Hz
///     low_hz: Lower passband edge in Hz
///     high_hz: Upper passband edge in Hz
///     transition_hz: Transition width in Hz
///     window_type: Window used for the FIR design
///
/// Returns:
///     Filtered samples, same length as the input
#[pyfunction]
#[pyo3(signature = (strain, fs, low_hz=43.0, high_hz=300.0, transition_hz=10.0, window_type=PyWindowType::Blackman))]
pub fn bandpass<'py>(
    py: Python<'py>,
    strain: PyReadonlyArray1<f64>,
    fs: f64,
    low_hz: f64,
    high_hz: f64,
    transition_hz: f64,
    window_type: PyWindowType,
) -> PyResult<&'py PyArray1<f64>> {
    let series = TimeSeries::new(strain.as_slice()?.to_vec(), fs)?;
    let config = BandpassConfig {
        low_hz,
        high_hz,
        transition_hz,
        window_type: window_type.into(),
    };
    let filtered = filters::bandpass(&series, &config)?;

    Ok(PyArray1::from_vec(py, filtered.into_samples()))
}
