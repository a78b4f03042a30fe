//! Real-valued forward/inverse FFT using realfft
//!
//! Follows the unnormalized numpy convention: `forward` is `rfft`,
//! `inverse` is `irfft(.., n)` including its 1/n scaling.

use crate::error::{ConditioningError, Result};
use crate::series::TimeSeries;
use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// One-sided spectrum of a real time series of length `time_len`
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySpectrum {
    /// Coefficients for bins 0..=time_len/2
    coefficients: Vec<Complex<f64>>,

    /// Length of the time series this spectrum came from
    time_len: usize,

    /// Sample rate of that time series in Hz
    sample_rate: f64,
}

impl FrequencySpectrum {
    /// Build a spectrum from raw coefficients
    ///
    /// Fails unless `coefficients.len() == time_len / 2 + 1`.
    pub fn new(coefficients: Vec<Complex<f64>>, time_len: usize, sample_rate: f64) -> Result<Self> {
        let expected = time_len / 2 + 1;
        if coefficients.len() != expected {
            return Err(ConditioningError::LengthMismatch {
                context: "frequency spectrum",
                expected,
                actual: coefficients.len(),
            });
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ConditioningError::InvalidSampleRate(sample_rate));
        }

        Ok(Self {
            coefficients,
            time_len,
            sample_rate,
        })
    }

    pub fn coefficients(&self) -> &[Complex<f64>] {
        &self.coefficients
    }

    pub fn time_len(&self) -> usize {
        self.time_len
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of bins (time_len/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.coefficients.len()
    }

    /// Frequency resolution in Hz
    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.time_len as f64
    }

    /// Bin frequencies in Hz
    pub fn frequencies(&self) -> Vec<f64> {
        rfft_frequencies(self.time_len, 1.0 / self.sample_rate)
    }

    /// |X[k]| for each bin
    pub fn magnitude(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Index of the bin with the largest magnitude
    pub fn peak_bin(&self) -> usize {
        self.coefficients
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, best_mag), (k, c)| {
                let mag = c.norm_sqr();
                if mag > best_mag {
                    (k, mag)
                } else {
                    (best, best_mag)
                }
            })
            .0
    }

    /// Same shape, different coefficients
    pub(crate) fn with_coefficients(&self, coefficients: Vec<Complex<f64>>) -> Result<Self> {
        Self::new(coefficients, self.time_len, self.sample_rate)
    }
}

/// Planned real FFT pair for a fixed length
pub struct SpectralTransform {
    /// Time-domain length
    len: usize,

    r2c: Arc<dyn RealToComplex<f64>>,

    c2r: Arc<dyn ComplexToReal<f64>>,
}

impl SpectralTransform {
    /// Plan forward and inverse transforms of length `len`
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(ConditioningError::EmptySeries);
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(len);
        let c2r = planner.plan_fft_inverse(len);

        Ok(Self { len, r2c, c2r })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn num_bins(&self) -> usize {
        self.len / 2 + 1
    }

    /// Forward transform of a time series of exactly `len` samples
    pub fn forward(&self, series: &TimeSeries) -> Result<FrequencySpectrum> {
        if series.len() != self.len {
            return Err(ConditioningError::LengthMismatch {
                context: "forward transform input",
                expected: self.len,
                actual: series.len(),
            });
        }

        // realfft uses the input as scratch space
        let mut input = series.samples().to_vec();
        let mut output = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut output)
            .map_err(|e| ConditioningError::Fft(e.to_string()))?;

        FrequencySpectrum::new(output, self.len, series.sample_rate())
    }

    /// Inverse transform back to exactly `len` samples, scaled by 1/len
    ///
    /// The imaginary parts of the DC bin and (for even `len`) the Nyquist
    /// bin carry no information for a real signal and are dropped.
    pub fn inverse(&self, spectrum: &FrequencySpectrum) -> Result<Vec<f64>> {
        if spectrum.time_len() != self.len {
            return Err(ConditioningError::LengthMismatch {
                context: "inverse transform output",
                expected: self.len,
                actual: spectrum.time_len(),
            });
        }

        let mut input = spectrum.coefficients().to_vec();
        input[0].im = 0.0;
        if self.len % 2 == 0 {
            let nyquist = self.len / 2;
            input[nyquist].im = 0.0;
        }

        let mut output = self.c2r.make_output_vec();
        self.c2r
            .process(&mut input, &mut output)
            .map_err(|e| ConditioningError::Fft(e.to_string()))?;

        let scale = 1.0 / self.len as f64;
        for sample in output.iter_mut() {
            *sample *= scale;
        }

        Ok(output)
    }
}

/// Bin frequencies `k / (n * dt)` for k = 0..=n/2
pub fn rfft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let span = n as f64 * dt;
    (0..n / 2 + 1).map(|k| k as f64 / span).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq_hz: f64, sample_rate: f64, len: usize) -> TimeSeries {
        let samples = (0..len)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
            .collect();
        TimeSeries::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_dc_signal() {
        let transform = SpectralTransform::new(100).unwrap();
        let series = TimeSeries::new(vec![1.0; 100], 100.0).unwrap();
        let spectrum = transform.forward(&series).unwrap();

        assert_eq!(spectrum.num_bins(), 51);
        assert!((spectrum.coefficients()[0].re - 100.0).abs() < 1e-9);
        assert!(spectrum.coefficients()[10].norm() < 1e-9);
    }

    #[test]
    fn test_sine_peak_bin() {
        let transform = SpectralTransform::new(4096).unwrap();
        let spectrum = transform.forward(&tone(440.0, 4096.0, 4096)).unwrap();

        assert_eq!(spectrum.peak_bin(), 440);
        let peak_mag = spectrum.magnitude()[440];
        assert!((peak_mag - 2048.0).abs() < 1e-6);
    }

    #[test]
    fn test_inverse_restores_signal() {
        for len in [1000, 1001] {
            let transform = SpectralTransform::new(len).unwrap();
            let series = tone(37.0, 1000.0, len);
            let spectrum = transform.forward(&series).unwrap();
            let restored = transform.inverse(&spectrum).unwrap();

            assert_eq!(restored.len(), len);
            for (a, b) in restored.iter().zip(series.samples()) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let transform = SpectralTransform::new(64).unwrap();
        let series = TimeSeries::new(vec![0.0; 32], 64.0).unwrap();
        assert!(matches!(
            transform.forward(&series),
            Err(ConditioningError::LengthMismatch { .. })
        ));

        let other = SpectralTransform::new(32).unwrap().forward(&series).unwrap();
        assert!(transform.inverse(&other).is_err());

        assert!(FrequencySpectrum::new(vec![Complex::new(0.0, 0.0); 3], 8, 8.0).is_err());
    }

    #[test]
    fn test_frequency_axis() {
        let freqs = rfft_frequencies(4096, 1.0 / 4096.0);

        assert_eq!(freqs.len(), 2049);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[1] - 1.0).abs() < 1e-12);
        assert!((freqs[2048] - 2048.0).abs() < 1e-9);

        let odd = rfft_frequencies(5, 0.1);
        assert_eq!(odd.len(), 3);
        assert!((odd[2] - 4.0).abs() < 1e-12);
    }
}
