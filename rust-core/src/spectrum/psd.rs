//! Welch power spectral density estimate
//!
//! Averaged, windowed periodograms over fixed-length segments. Scaling
//! matches a one-sided density: `2·|X_k|² / (fs·Σw²)`, except at DC and,
//! for even segment lengths, the Nyquist bin which are not doubled.

use super::fft::{rfft_frequencies, SpectralTransform};
use super::response::{FillPolicy, InterpolatedResponse};
use super::windowing::{extract_windowed_segment, window_power};
use crate::error::{ConditioningError, Result};
use crate::filters::windows::{generate_window, WindowType};
use crate::series::TimeSeries;

/// Detector sample rate used by the reference configuration
pub const REFERENCE_SAMPLE_RATE: f64 = 4096.0;

/// Welch estimator configuration
#[derive(Debug, Clone)]
pub struct PsdConfig {
    /// Samples per segment; resolution is fs / segment_length
    pub segment_length: usize,

    /// Samples shared by consecutive segments
    pub overlap: usize,

    /// Window applied to each segment
    pub window_type: WindowType,
}

impl Default for PsdConfig {
    fn default() -> Self {
        Self {
            segment_length: 4 * REFERENCE_SAMPLE_RATE as usize,
            overlap: 0,
            window_type: WindowType::Hann,
        }
    }
}

impl PsdConfig {
    /// Segments of `seconds` at `sample_rate`, other settings default
    pub fn with_duration(seconds: f64, sample_rate: f64) -> Self {
        Self {
            segment_length: (seconds * sample_rate).round() as usize,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.segment_length < 2 {
            return Err(ConditioningError::InvalidSegmentLength(self.segment_length));
        }
        if self.overlap >= self.segment_length {
            return Err(ConditioningError::InvalidOverlap {
                overlap: self.overlap,
                segment_length: self.segment_length,
            });
        }
        Ok(())
    }
}

/// Sampled one-sided PSD: strictly increasing frequencies with matching power
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    frequencies: Vec<f64>,
    power: Vec<f64>,
}

impl PowerSpectrum {
    /// Pair frequencies with power values
    ///
    /// Fails on mismatched lengths, empty input, frequencies that are not
    /// strictly increasing, or NaN/negative power. `+inf` power is allowed.
    pub fn new(frequencies: Vec<f64>, power: Vec<f64>) -> Result<Self> {
        if frequencies.len() != power.len() {
            return Err(ConditioningError::LengthMismatch {
                context: "frequency/power pairs",
                expected: frequencies.len(),
                actual: power.len(),
            });
        }
        if frequencies.is_empty() {
            return Err(ConditioningError::EmptySeries);
        }
        if let Some(i) = frequencies.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(ConditioningError::NonMonotonicFrequencies(i + 1));
        }
        if let Some(index) = power.iter().position(|p| !(*p >= 0.0)) {
            return Err(ConditioningError::InvalidPower {
                index,
                value: power[index],
            });
        }

        Ok(Self { frequencies, power })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn power(&self) -> &[f64] {
        &self.power
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Amplitude spectral density, sqrt(PSD)
    pub fn asd(&self) -> Vec<f64> {
        self.power.iter().map(|p| p.sqrt()).collect()
    }

    /// Linear interpolant over this spectrum with the given fill policy
    pub fn as_function(&self, fill: FillPolicy) -> InterpolatedResponse {
        InterpolatedResponse::from_spectrum(self.clone()).with_fill(fill)
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.power)
    }
}

/// Welch PSD estimator
pub struct PsdEstimator {
    config: PsdConfig,
    transform: SpectralTransform,
    window: Vec<f64>,
}

impl PsdEstimator {
    pub fn new(config: PsdConfig) -> Result<Self> {
        config.validate()?;
        let transform = SpectralTransform::new(config.segment_length)?;
        let window = generate_window(config.window_type, config.segment_length);

        Ok(Self {
            config,
            transform,
            window,
        })
    }

    pub fn config(&self) -> &PsdConfig {
        &self.config
    }

    /// Start indices of each full segment
    ///
    /// A series shorter than one segment yields a single zero-padded segment.
    fn segment_starts(&self, len: usize) -> Vec<usize> {
        let nperseg = self.config.segment_length;
        if len <= nperseg {
            return vec![0];
        }

        let hop = nperseg - self.config.overlap;
        (0..=len - nperseg).step_by(hop).collect()
    }

    /// Estimate the one-sided PSD of a time series
    pub fn estimate(&self, series: &TimeSeries) -> Result<PowerSpectrum> {
        let fs = series.sample_rate();
        let nperseg = self.config.segment_length;
        let starts = self.segment_starts(series.len());
        let norm = fs * window_power(&self.window);

        log::debug!(
            "welch: {} segments of {} samples, resolution {:.4} Hz",
            starts.len(),
            nperseg,
            fs / nperseg as f64
        );

        let mut accum = vec![0.0; self.transform.num_bins()];
        for &start in &starts {
            let segment = extract_windowed_segment(series.samples(), start, &self.window);
            let spectrum = self.transform.forward(&TimeSeries::new(segment, fs)?)?;

            for (k, (a, c)) in accum.iter_mut().zip(spectrum.coefficients()).enumerate() {
                let mut p = c.norm_sqr() / norm;
                let is_nyquist = nperseg % 2 == 0 && k == nperseg / 2;
                if k != 0 && !is_nyquist {
                    p *= 2.0;
                }
                *a += p;
            }
        }

        let inv = 1.0 / starts.len() as f64;
        for a in accum.iter_mut() {
            *a *= inv;
        }

        PowerSpectrum::new(rfft_frequencies(nperseg, 1.0 / fs), accum)
    }
}

/// Welch PSD with `segment_length`-sample Hann segments and no overlap
pub fn estimate(series: &TimeSeries, segment_length: usize) -> Result<PowerSpectrum> {
    let config = PsdConfig {
        segment_length,
        ..PsdConfig::default()
    };
    PsdEstimator::new(config)?.estimate(series)
}
