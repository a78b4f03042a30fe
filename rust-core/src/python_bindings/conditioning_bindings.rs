//! Python bindings for whitening, frequency shifting and WAV output

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::audio::render;
use crate::conditioning::{self, WhiteningConfig, WhiteningNormalization};
use crate::series::TimeSeries;
use crate::spectrum::{FillPolicy, InterpolatedResponse};

/// Whiten a strain array against a sampled PSD
///
/// Args:
///     strain: Samples as numpy array
///     psd_frequencies: Frequencies of the PSD samples in Hz
///     psd: PSD values
///     dt: Sample spacing in seconds
///     fill: "nearest", "inf", a float fill value, or None to reject out-of-range frequencies
///     normalization: "half_power" (default) or "sample_spacing"
///
/// Returns:
///     Whitened samples, same length as the input
#[pyfunction]
#[pyo3(signature = (strain, psd_frequencies, psd, dt, fill=None, normalization="half_power"))]
pub fn whiten<'py>(
    py: Python<'py>,
    strain: PyReadonlyArray1<f64>,
    psd_frequencies: PyReadonlyArray1<f64>,
    psd: PyReadonlyArray1<f64>,
    dt: f64,
    fill: Option<&PyAny>,
    normalization: &str,
) -> PyResult<&'py PyArray1<f64>> {
    let series = TimeSeries::from_spacing(strain.as_slice()?.to_vec(), dt)?;
    let response = InterpolatedResponse::new(
        psd_frequencies.as_slice()?.to_vec(),
        psd.as_slice()?.to_vec(),
    )?;
    let response = match fill {
        None => response,
        Some(value) => match value.extract::<&str>() {
            Ok(name) => response.with_fill(name.parse::<FillPolicy>()?),
            Err(_) => response.with_fill(FillPolicy::Constant(value.extract::<f64>()?)),
        },
    };

    let config = WhiteningConfig {
        normalization: normalization.parse::<WhiteningNormalization>()?,
        power_floor: None,
    };

    let white = conditioning::whiten_with(&series, &response, &config)?;
    Ok(PyArray1::from_vec(py, white.into_samples()))
}

/// Shift the frequency content of a band-passed signal upward
///
/// Args:
///     data: Samples as numpy array
///     fshift: Shift in Hz (non-negative)
///     sample_rate: Sample rate in Hz
#[pyfunction]
#[pyo3(signature = (data, fshift=100.0, sample_rate=4096.0))]
pub fn reqshift<'py>(
    py: Python<'py>,
    data: PyReadonlyArray1<f64>,
    fshift: f64,
    sample_rate: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let series = TimeSeries::new(data.as_slice()?.to_vec(), sample_rate)?;
    let shifted = conditioning::frequency_shift(&series, fshift)?;
    Ok(PyArray1::from_vec(py, shifted.into_samples()))
}

/// Render samples to 16-bit audio and write a mono WAV file
#[pyfunction]
pub fn write_wavfile(filename: &str, fs: f64, data: PyReadonlyArray1<f64>) -> PyResult<()> {
    let series = TimeSeries::new(data.as_slice()?.to_vec(), fs)?;
    render(&series)?.write_wav(filename)?;
    Ok(())
}
