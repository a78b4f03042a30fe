//! Python bindings for PSD estimation and the noise model

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::series::TimeSeries;
use crate::spectrum::{self, PsdConfig, PsdEstimator};
use super::filter_bindings::PyWindowType;

/// Welch PSD estimator exposed to Python
#[pyclass(name = "PsdEstimator")]
pub struct PyPsdEstimator {
    estimator: PsdEstimator,
}

#[pymethods]
impl PyPsdEstimator {
    /// Create a new PSD estimator
    ///
    /// Args:
    ///     nfft: Samples per segment (frequency resolution is fs/nfft)
    ///     noverlap: Samples shared by consecutive segments
    ///     window_type: Window applied to each segment
    #[new]
    #[pyo3(signature = (nfft=16384, noverlap=0, window_type=PyWindowType::Hann))]
    fn new(nfft: usize, noverlap: usize, window_type: PyWindowType) -> PyResult<Self> {
        let config = PsdConfig {
            segment_length: nfft,
            overlap: noverlap,
            window_type: window_type.into(),
        };

        Ok(Self {
            estimator: PsdEstimator::new(config)?,
        })
    }

    /// Estimate the one-sided PSD
    ///
    /// Args:
    ///     strain: Samples as numpy array
    ///     fs: Sample rate in Hz
    ///
    /// Returns:
    ///     (power, frequencies) as numpy arrays
    fn estimate<'py>(
        &self,
        py: Python<'py>,
        strain: PyReadonlyArray1<f64>,
        fs: f64,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let series = TimeSeries::new(strain.as_slice()?.to_vec(), fs)?;
        let (frequencies, power) = self.estimator.estimate(&series)?.into_parts();

        Ok((PyArray1::from_vec(py, power), PyArray1::from_vec(py, frequencies)))
    }

    /// Segment length in samples
    fn nfft(&self) -> usize {
        self.estimator.config().segment_length
    }
}

/// Analytic noise floor evaluated at the given frequencies
#[pyfunction]
pub fn analytic_model<'py>(
    py: Python<'py>,
    frequencies: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray1<f64>> {
    let power = spectrum::analytic_model(frequencies.as_slice()?);
    Ok(PyArray1::from_vec(py, power))
}
