//! Frequency -> power functions consumed by whitening
//!
//! Anything that can report a power value for each requested frequency
//! implements [`FrequencyResponse`]: a measured PSD behind a linear
//! interpolant, the analytic noise model, or a caller's own type.

use std::str::FromStr;

use super::psd::PowerSpectrum;
use crate::error::{ConditioningError, Result};

/// Maps non-negative frequencies (Hz) to non-negative power values
pub trait FrequencyResponse {
    fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>>;
}

impl<T: FrequencyResponse + ?Sized> FrequencyResponse for &T {
    fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
        (**self).evaluate(frequencies)
    }
}

impl<T: FrequencyResponse + ?Sized> FrequencyResponse for Box<T> {
    fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
        (**self).evaluate(frequencies)
    }
}

/// What an interpolant returns outside its sampled frequency range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPolicy {
    /// Value at the nearest sampled frequency; for whitening arbitrary signals
    Nearest,

    /// Fixed value on both sides
    Constant(f64),
}

impl FillPolicy {
    /// `+inf` outside the band, so out-of-band content weighs nothing
    pub fn infinite_noise() -> Self {
        FillPolicy::Constant(f64::INFINITY)
    }
}

impl FromStr for FillPolicy {
    type Err = ConditioningError;

    /// `"nearest"`, `"inf"`/`"infinite"`, or a number taken as a constant
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(FillPolicy::Nearest),
            "inf" | "infinite" => Ok(FillPolicy::infinite_noise()),
            other => other
                .parse::<f64>()
                .map(FillPolicy::Constant)
                .map_err(|_| ConditioningError::UnknownOption {
                    kind: "fill policy",
                    name: s.to_string(),
                }),
        }
    }
}

/// Piecewise-linear interpolant over a sampled PSD
///
/// Without a fill policy any out-of-domain query is an error.
#[derive(Debug, Clone)]
pub struct InterpolatedResponse {
    spectrum: PowerSpectrum,
    fill: Option<FillPolicy>,
}

impl InterpolatedResponse {
    /// Interpolant over (frequency, power) pairs, no fill policy
    pub fn new(frequencies: Vec<f64>, power: Vec<f64>) -> Result<Self> {
        Ok(Self::from_spectrum(PowerSpectrum::new(frequencies, power)?))
    }

    pub fn from_spectrum(spectrum: PowerSpectrum) -> Self {
        Self {
            spectrum,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: FillPolicy) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn fill(&self) -> Option<FillPolicy> {
        self.fill
    }

    pub fn spectrum(&self) -> &PowerSpectrum {
        &self.spectrum
    }

    /// Sampled frequency range (min, max)
    pub fn domain(&self) -> (f64, f64) {
        let freqs = self.spectrum.frequencies();
        (freqs[0], freqs[freqs.len() - 1])
    }

    fn evaluate_one(&self, f: f64) -> Result<f64> {
        let freqs = self.spectrum.frequencies();
        let power = self.spectrum.power();
        let (min, max) = self.domain();

        if f.is_nan() {
            return Ok(f64::NAN);
        }

        if f < min || f > max {
            return match self.fill {
                Some(FillPolicy::Nearest) if f < min => Ok(power[0]),
                Some(FillPolicy::Nearest) => Ok(power[power.len() - 1]),
                Some(FillPolicy::Constant(value)) => Ok(value),
                None => Err(ConditioningError::DomainExtrapolation {
                    frequency: f,
                    min,
                    max,
                }),
            };
        }

        // First knot strictly above f; f == max lands past the end
        let upper = freqs.partition_point(|&x| x <= f);
        if upper == freqs.len() {
            return Ok(power[power.len() - 1]);
        }

        let lower = upper - 1;
        let t = (f - freqs[lower]) / (freqs[upper] - freqs[lower]);
        if t == 0.0 {
            return Ok(power[lower]);
        }

        // Infinite noise on either side stays infinite between the knots
        if power[lower].is_infinite() || power[upper].is_infinite() {
            return Ok(f64::INFINITY);
        }
        Ok(power[lower] + t * (power[upper] - power[lower]))
    }
}

impl FrequencyResponse for InterpolatedResponse {
    fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
        frequencies.iter().map(|&f| self.evaluate_one(f)).collect()
    }
}

/// Build an interpolant over (frequency, power) pairs
///
/// `fill = None` makes out-of-domain evaluation fail.
pub fn as_function(
    frequencies: Vec<f64>,
    power: Vec<f64>,
    fill: Option<FillPolicy>,
) -> Result<InterpolatedResponse> {
    let response = InterpolatedResponse::new(frequencies, power)?;
    Ok(match fill {
        Some(fill) => response.with_fill(fill),
        None => response,
    })
}
