//! Uniformly sampled real-valued time series

use crate::error::{ConditioningError, Result};

/// Real samples paired with their sample rate
///
/// Invariants: at least one sample, sample rate finite and > 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl TimeSeries {
    /// Create a time series from samples and a sample rate in Hz
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(ConditioningError::EmptySeries);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ConditioningError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a time series from samples and a sample spacing in seconds
    pub fn from_spacing(samples: Vec<f64>, dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConditioningError::InvalidSampleRate(1.0 / dt));
        }
        Self::new(samples, 1.0 / dt)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sample spacing in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed series; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (N * dt)
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()))
    }

    /// Fail on the first NaN or infinite sample
    pub fn ensure_finite(&self) -> Result<()> {
        match self.samples.iter().position(|s| !s.is_finite()) {
            Some(index) => Err(ConditioningError::NonFiniteSample(index)),
            None => Ok(()),
        }
    }

    /// New series with the same sample rate and different samples
    ///
    /// Stages use this to guarantee their output keeps the input length.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Result<Self> {
        if samples.len() != self.samples.len() {
            return Err(ConditioningError::LengthMismatch {
                context: "time series output",
                expected: self.samples.len(),
                actual: samples.len(),
            });
        }

        Ok(Self {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}
