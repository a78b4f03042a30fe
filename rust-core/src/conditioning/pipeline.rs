//! End-to-end conditioning of one strain record
//!
//! PSD estimate -> whitening -> optional band-pass -> optional frequency
//! shift -> 16-bit audio. Every intermediate product is returned so plots
//! and matched filtering can reuse them.

use super::shift::frequency_shift;
use super::whiten::{whiten_with, WhiteningConfig};
use crate::audio::{render, AudioWaveform};
use crate::error::Result;
use crate::filters::{bandpass, BandpassConfig};
use crate::series::TimeSeries;
use crate::spectrum::{FillPolicy, FrequencyResponse, PowerSpectrum, PsdConfig, PsdEstimator};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct ConditioningConfig {
    /// Welch estimator settings
    pub psd: PsdConfig,

    /// Fill policy of the PSD interpolant used for whitening
    pub psd_fill: FillPolicy,

    pub whitening: WhiteningConfig,

    /// Band-pass applied after whitening, skipped if `None`
    pub bandpass: Option<BandpassConfig>,

    /// Upward shift in Hz applied before rendering, skipped if `None`
    pub shift_hz: Option<f64>,
}

impl Default for ConditioningConfig {
    fn default() -> Self {
        Self {
            psd: PsdConfig::default(),
            psd_fill: FillPolicy::Nearest,
            whitening: WhiteningConfig::default(),
            bandpass: Some(BandpassConfig::default()),
            shift_hz: Some(400.0),
        }
    }
}

impl ConditioningConfig {
    /// Defaults with 4 s PSD segments at `sample_rate`
    pub fn for_sample_rate(sample_rate: f64) -> Self {
        Self {
            psd: PsdConfig::with_duration(4.0, sample_rate),
            ..Self::default()
        }
    }
}

/// Products of one pipeline run
#[derive(Debug, Clone)]
pub struct ConditionedStrain {
    /// Estimated PSD, `None` when an external response was supplied
    pub psd: Option<PowerSpectrum>,

    /// Whitened strain. Units follow `WhiteningConfig::normalization`:
    /// with the default `HalfPower` Gaussian noise comes out with standard
    /// deviation near `sqrt(fs)`; with `SampleSpacing` it is near 1.
    pub whitened: TimeSeries,
    pub bandpassed: Option<TimeSeries>,
    pub shifted: Option<TimeSeries>,
    /// Rendered from the last stage that ran
    pub audio: AudioWaveform,
}

/// Runs the conditioning stages in order
pub struct ConditioningPipeline {
    config: ConditioningConfig,
    estimator: PsdEstimator,
}

impl ConditioningPipeline {
    pub fn new(config: ConditioningConfig) -> Result<Self> {
        let estimator = PsdEstimator::new(config.psd.clone())?;
        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &ConditioningConfig {
        &self.config
    }

    /// Condition `series`, whitening with its own Welch PSD
    pub fn run(&self, series: &TimeSeries) -> Result<ConditionedStrain> {
        let psd = self.estimator.estimate(series)?;
        let response = psd.as_function(self.config.psd_fill);

        let mut conditioned = self.run_with_response(series, &response)?;
        conditioned.psd = Some(psd);
        Ok(conditioned)
    }

    /// Condition `series`, whitening with a supplied response
    pub fn run_with_response<R>(&self, series: &TimeSeries, response: &R) -> Result<ConditionedStrain>
    where
        R: FrequencyResponse + ?Sized,
    {
        log::debug!(
            "conditioning {} samples at {} Hz",
            series.len(),
            series.sample_rate()
        );

        let whitened = whiten_with(series, response, &self.config.whitening)?;

        let bandpassed = match &self.config.bandpass {
            Some(band) => Some(bandpass(&whitened, band)?),
            None => None,
        };

        let pre_shift = bandpassed.as_ref().unwrap_or(&whitened);
        let shifted = match self.config.shift_hz {
            Some(shift_hz) => Some(frequency_shift(pre_shift, shift_hz)?),
            None => None,
        };

        let last = shifted.as_ref().unwrap_or(pre_shift);
        let audio = render(last)?;

        Ok(ConditionedStrain {
            psd: None,
            whitened,
            bandpassed,
            shifted,
            audio,
        })
    }
}
