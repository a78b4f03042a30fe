//! Whitening: divide the spectrum by the noise amplitude spectral density
//!
//! The response is evaluated at every rfft bin of the input. Bins where it
//! returns zero produce non-finite output unless a power floor is set;
//! nothing is clamped implicitly.

use std::str::FromStr;

use crate::error::{ConditioningError, Result};
use crate::series::TimeSeries;
use crate::spectrum::{FrequencyResponse, SpectralTransform};

/// Per-bin scaling applied after dividing by the ASD
///
/// The two variants produce output in different units and are kept apart
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhiteningNormalization {
    /// `X_k / sqrt(P_k / 2)`: flat spectrum, variance `fs` for noise whose
    /// one-sided PSD is `P`
    #[default]
    HalfPower,

    /// `X_k / sqrt(P_k) · sqrt(2·dt)`: unit variance for noise whose
    /// one-sided PSD is `P`
    SampleSpacing,
}

impl WhiteningNormalization {
    /// Factor multiplying each coefficient for power `p` and spacing `dt`
    fn scale(&self, p: f64, dt: f64) -> f64 {
        match self {
            WhiteningNormalization::HalfPower => 1.0 / (p / 2.0).sqrt(),
            WhiteningNormalization::SampleSpacing => (2.0 * dt).sqrt() / p.sqrt(),
        }
    }
}

impl FromStr for WhiteningNormalization {
    type Err = ConditioningError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half_power" => Ok(WhiteningNormalization::HalfPower),
            "sample_spacing" => Ok(WhiteningNormalization::SampleSpacing),
            _ => Err(ConditioningError::UnknownOption {
                kind: "whitening normalization",
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WhiteningConfig {
    pub normalization: WhiteningNormalization,

    /// Power values below this are raised to it before dividing
    pub power_floor: Option<f64>,
}

/// Whiten with the reference normalization and no floor
pub fn whiten<R>(series: &TimeSeries, response: &R) -> Result<TimeSeries>
where
    R: FrequencyResponse + ?Sized,
{
    whiten_with(series, response, &WhiteningConfig::default())
}

/// Whiten with an explicit configuration
pub fn whiten_with<R>(series: &TimeSeries, response: &R, config: &WhiteningConfig) -> Result<TimeSeries>
where
    R: FrequencyResponse + ?Sized,
{
    let transform = SpectralTransform::new(series.len())?;
    let spectrum = transform.forward(series)?;
    let frequencies = spectrum.frequencies();

    let mut power = response.evaluate(&frequencies)?;
    if power.len() != frequencies.len() {
        return Err(ConditioningError::LengthMismatch {
            context: "frequency response output",
            expected: frequencies.len(),
            actual: power.len(),
        });
    }

    if let Some(floor) = config.power_floor {
        for p in power.iter_mut() {
            *p = p.max(floor);
        }
    }

    let dt = series.dt();
    let white = spectrum
        .coefficients()
        .iter()
        .zip(&power)
        .map(|(&c, &p)| c * config.normalization.scale(p, dt))
        .collect();

    let white = spectrum.with_coefficients(white)?;
    series.with_samples(transform.inverse(&white)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{estimate, FillPolicy, InterpolatedResponse, NoiseModel};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Normal};
    use std::f64::consts::PI;

    const FS: f64 = 4096.0;

    fn noisy_tone(seed: u64) -> TimeSeries {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let samples = (0..4096)
            .map(|n| {
                let t = n as f64 / FS;
                (2.0 * PI * 100.0 * t).sin() + 0.1 * normal.sample(&mut rng)
            })
            .collect();
        TimeSeries::new(samples, FS).unwrap()
    }

    fn flat(level: f64) -> InterpolatedResponse {
        InterpolatedResponse::new(vec![0.0, FS / 2.0], vec![level, level])
            .unwrap()
            .with_fill(FillPolicy::Constant(level))
    }

    #[test]
    fn test_shape_and_finite_with_unit_psd() {
        let series = noisy_tone(0);
        let white = whiten(&series, &flat(1.0)).unwrap();

        assert_eq!(white.len(), series.len());
        assert_eq!(white.sample_rate(), series.sample_rate());
        assert!(white.ensure_finite().is_ok());
    }

    #[test]
    fn test_sample_spacing_is_identity_for_flat_two_over_fs() {
        // sqrt(2·dt) / sqrt(2/fs) == 1, so every coefficient passes through
        let series = noisy_tone(1);
        let config = WhiteningConfig {
            normalization: WhiteningNormalization::SampleSpacing,
            power_floor: None,
        };
        let white = whiten_with(&series, &flat(2.0 / FS), &config).unwrap();

        for (a, b) in white.samples().iter().zip(series.samples()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_spacing_whitens_to_unit_variance() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let samples = (0..16 * 4096).map(|_| normal.sample(&mut rng)).collect();
        let series = TimeSeries::new(samples, FS).unwrap();

        // 128 segments keeps the estimate's own scatter near a percent
        let psd = estimate(&series, 512).unwrap();
        let config = WhiteningConfig {
            normalization: WhiteningNormalization::SampleSpacing,
            power_floor: None,
        };
        let white = whiten_with(&series, &psd.as_function(FillPolicy::Nearest), &config).unwrap();

        let n = white.len() as f64;
        let mean = white.samples().iter().sum::<f64>() / n;
        let variance = white.samples().iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert!((variance - 1.0).abs() < 0.05, "variance {}", variance);
    }

    #[test]
    fn test_response_with_wrong_length_is_rejected() {
        struct ShortResponse;

        impl FrequencyResponse for ShortResponse {
            fn evaluate(&self, frequencies: &[f64]) -> Result<Vec<f64>> {
                Ok(vec![1.0; frequencies.len() - 1])
            }
        }

        let series = noisy_tone(6);
        let err = whiten(&series, &ShortResponse).unwrap_err();
        assert!(matches!(
            err,
            ConditioningError::LengthMismatch { expected: 2049, actual: 2048, .. }
        ));
    }

    #[test]
    fn test_normalization_from_str() {
        assert_eq!(
            "half_power".parse::<WhiteningNormalization>().unwrap(),
            WhiteningNormalization::HalfPower
        );
        assert_eq!(
            "Sample_Spacing".parse::<WhiteningNormalization>().unwrap(),
            WhiteningNormalization::SampleSpacing
        );
        assert!(matches!(
            "unit".parse::<WhiteningNormalization>(),
            Err(ConditioningError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_normalizations_differ_by_sqrt_fs() {
        let series = noisy_tone(2);
        let response = flat(2.0 / FS);
        let half = whiten(&series, &response).unwrap();
        let spacing = whiten_with(
            &series,
            &response,
            &WhiteningConfig {
                normalization: WhiteningNormalization::SampleSpacing,
                power_floor: None,
            },
        )
        .unwrap();

        let ratio = FS.sqrt();
        for (h, s) in half.samples().iter().zip(spacing.samples()) {
            assert!((h - s * ratio).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_power_is_not_clamped() {
        let series = noisy_tone(3);
        let white = whiten(&series, &flat(0.0)).unwrap();
        assert!(white.ensure_finite().is_err());

        let config = WhiteningConfig {
            power_floor: Some(1e-6),
            ..WhiteningConfig::default()
        };
        let floored = whiten_with(&series, &flat(0.0), &config).unwrap();
        assert!(floored.ensure_finite().is_ok());
    }

    #[test]
    fn test_analytic_model_response() {
        let series = noisy_tone(4);
        let white = whiten(&series, &NoiseModel::default()).unwrap();
        assert_eq!(white.len(), 4096);
        assert!(white.ensure_finite().is_ok());
    }

    #[test]
    fn test_odd_length() {
        let series = TimeSeries::new(vec![1.0, -1.0, 0.5, 0.25, -0.5], 8.0).unwrap();
        let white = whiten(&series, &flat(1.0)).unwrap();
        assert_eq!(white.len(), 5);
    }

    #[test]
    fn test_out_of_domain_without_fill_fails() {
        let series = noisy_tone(5);
        let narrow = InterpolatedResponse::new(vec![20.0, 1000.0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(
            whiten(&series, &narrow),
            Err(ConditioningError::DomainExtrapolation { .. })
        ));
    }
}
