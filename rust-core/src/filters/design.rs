//! Band-pass FIR design using the windowing method

use super::windows::{generate_window, WindowType};
use crate::error::{ConditioningError, Result};
use std::f64::consts::PI;

/// Band-pass specification in Hz
#[derive(Debug, Clone)]
pub struct BandpassConfig {
    /// Lower passband edge in Hz
    pub low_hz: f64,

    /// Upper passband edge in Hz
    pub high_hz: f64,

    /// Transition width in Hz (sets the filter length)
    pub transition_hz: f64,

    /// Window type
    pub window_type: WindowType,
}

impl Default for BandpassConfig {
    fn default() -> Self {
        Self {
            low_hz: 43.0,
            high_hz: 300.0,
            transition_hz: 10.0,
            window_type: WindowType::Blackman,
        }
    }
}

impl BandpassConfig {
    /// Check the band lies strictly inside (0, Nyquist)
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        let nyquist_hz = sample_rate / 2.0;
        let valid = self.low_hz > 0.0
            && self.low_hz < self.high_hz
            && self.high_hz < nyquist_hz
            && self.transition_hz > 0.0
            && self.transition_hz.is_finite();

        if valid {
            Ok(())
        } else {
            Err(ConditioningError::InvalidBand {
                low_hz: self.low_hz,
                high_hz: self.high_hz,
                nyquist_hz,
            })
        }
    }

    /// Cutoff frequencies in radians/sample
    pub fn cutoff_radians(&self, sample_rate: f64) -> (f64, f64) {
        let to_rad = 2.0 * PI / sample_rate;
        (self.low_hz * to_rad, self.high_hz * to_rad)
    }

    /// Transition width in radians/sample
    pub fn transition_radians(&self, sample_rate: f64) -> f64 {
        self.transition_hz * 2.0 * PI / sample_rate
    }
}

/// Design a band-pass FIR filter
///
/// # Algorithm
/// 1. Ideal impulse response as a difference of two sinc lowpasses
/// 2. Window of length M chosen from the transition width
/// 3. Multiply ideal response by window
///
/// # Returns
/// Coefficients h[n] for n = 0..M-1, symmetric (Type I linear phase)
pub fn design_bandpass_fir(config: &BandpassConfig, sample_rate: f64) -> Result<Vec<f64>> {
    config.validate(sample_rate)?;

    let m = config
        .window_type
        .calculate_filter_length(config.transition_radians(sample_rate));
    let (wc1, wc2) = config.cutoff_radians(sample_rate);
    let window = generate_window(config.window_type, m);

    let center = (m - 1) as f64 / 2.0;
    let h = window
        .iter()
        .enumerate()
        .map(|(n, &w)| {
            let n_shifted = n as f64 - center;
            let h_ideal = if n_shifted.abs() < 1e-10 {
                (wc2 - wc1) / PI
            } else {
                ((wc2 * n_shifted).sin() - (wc1 * n_shifted).sin()) / (PI * n_shifted)
            };
            h_ideal * w
        })
        .collect();

    Ok(h)
}

/// Magnitude response |H(f)| at the given frequencies in Hz
pub fn magnitude_response(h: &[f64], frequencies_hz: &[f64], sample_rate: f64) -> Vec<f64> {
    use num_complex::Complex64;

    frequencies_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / sample_rate;
            h.iter()
                .enumerate()
                .map(|(n, &h_n)| h_n * Complex64::from_polar(1.0, -omega * n as f64))
                .sum::<Complex64>()
                .norm()
        })
        .collect()
}
