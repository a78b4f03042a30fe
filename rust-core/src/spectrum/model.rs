//! Analytic detector noise floor
//!
//! A smooth curve used in place of (or next to) a measured PSD. The three
//! terms are summed into an amplitude-like value which is then squared into
//! a power value; plots built on this curve depend on that squaring.

use super::psd::PowerSpectrum;
use super::response::FrequencyResponse;
use crate::error::Result;

/// Coefficients of the analytic noise model
///
/// `A(f) = low_scale·(low_corner/(low_offset + f))² + flat_level + high_scale·(f/high_corner)²`,
/// `power(f) = A(f)²`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseModel {
    /// Seismic wall scale
    pub low_scale: f64,
    /// Seismic wall corner, Hz
    pub low_corner: f64,
    /// Offset keeping the seismic term finite at f = 0, Hz
    pub low_offset: f64,
    /// Flat mid-band floor
    pub flat_level: f64,
    /// Shot-noise scale
    pub high_scale: f64,
    /// Shot-noise corner, Hz
    pub high_corner: f64,
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            low_scale: 1.0e-22,
            low_corner: 18.0,
            low_offset: 0.1,
            flat_level: 0.7e-23,
            high_scale: 4.0e-23,
            high_corner: 2000.0,
        }
    }
}

impl NoiseModel {
    /// Amplitude-like composite A(f) before squaring
    pub fn composite(&self, f: f64) -> f64 {
        let low = self.low_scale * (self.low_corner / (self.low_offset + f)).powi(2);
        let high = self.high_scale * (f / self.high_corner).powi(2);
        low + self.flat_level + high
    }

    /// Power at a single frequency
    pub fn power_at(&self, f: f64) -> f64 {
        self.composite(f).powi(2)
    }

    /// Power at each frequency
    pub fn analytic_model(&self, frequencies: &[f64]) -> Vec<f64> {
        frequencies.iter().map(|&f| self.power_at(f)).collect()
    }

    /// Model sampled on a frequency grid
    pub fn sample(&self, frequencies: Vec<f64>) -> Result<PowerSpectrum> {
        let power = self.analytic_model(&frequencies);
        PowerSpectrum::new(frequencies, power)
    }
}

/// Closed form is defined everywhere, so evaluation never fails
impl FrequencyResponse for NoiseModel {
    fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
        Ok(self.analytic_model(frequencies))
    }
}

/// Reference noise model evaluated at `frequencies`
pub fn analytic_model(frequencies: &[f64]) -> Vec<f64> {
    NoiseModel::default().analytic_model(frequencies)
}
