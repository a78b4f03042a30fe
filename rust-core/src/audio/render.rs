//! Quantize a time series into 16-bit audio
//!
//! The peak maps to 90% of full scale, leaving headroom so no sample clips.

use crate::error::{ConditioningError, Result};
use crate::series::TimeSeries;

/// Fraction of i16 full scale the peak sample maps to
pub const HEADROOM: f64 = 0.9;

/// Largest magnitude a rendered sample can reach (0.9 × 32767, truncated)
pub const MAX_RENDERED_SAMPLE: i16 = 29490;

/// 16-bit signed PCM samples with an integer sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioWaveform {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioWaveform {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ConditioningError::InvalidSampleRate(0.0));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Render a time series as 16-bit audio at its own sample rate
///
/// The sample rate is truncated to an integer. An all-zero series has no
/// peak to scale by and renders as silence.
pub fn render(series: &TimeSeries) -> Result<AudioWaveform> {
    series.ensure_finite()?;

    let sample_rate = series.sample_rate().trunc();
    if sample_rate < 1.0 || sample_rate > u32::MAX as f64 {
        return Err(ConditioningError::InvalidSampleRate(series.sample_rate()));
    }

    let mut peak = series.peak();
    if peak == 0.0 {
        log::warn!("rendering silent input of {} samples", series.len());
        peak = 1.0;
    }

    let full_scale = f64::from(i16::MAX);
    // `as` truncates toward zero
    let samples = series
        .samples()
        .iter()
        .map(|&s| (s / peak * full_scale * HEADROOM) as i16)
        .collect();

    AudioWaveform::new(samples, sample_rate as u32)
}
