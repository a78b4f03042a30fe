//! Upward frequency shift by rotating rfft bins
//!
//! Coefficients move up by `nbins` with wrap-around, then the lowest
//! `nbins` (the wrapped-in top of the band) are zeroed. A shift of at least
//! the bin count silences the output; that is kept as-is.

use crate::error::{ConditioningError, Result};
use crate::series::TimeSeries;
use crate::spectrum::{FrequencySpectrum, SpectralTransform};
use num_complex::Complex;

/// Bin displacement for a shift in Hz at resolution `df`
pub fn bin_displacement(shift_hz: f64, df: f64) -> Result<usize> {
    if !shift_hz.is_finite() || shift_hz < 0.0 {
        return Err(ConditioningError::InvalidShift(shift_hz));
    }
    Ok((shift_hz / df).round() as usize)
}

/// Rotate coefficients up by `nbins` and zero the vacated low bins
///
/// Returns a new spectrum; the input is left untouched.
pub fn shift_spectrum(spectrum: &FrequencySpectrum, nbins: usize) -> Result<FrequencySpectrum> {
    let mut shifted = spectrum.coefficients().to_vec();
    let len = shifted.len();

    shifted.rotate_right(nbins % len);
    let zeroed = nbins.min(len);
    shifted[..zeroed].fill(Complex::new(0.0, 0.0));

    spectrum.with_coefficients(shifted)
}

/// Shift the spectral content of `series` up by `shift_hz`
///
/// The shift is rounded to the nearest multiple of the resolution
/// `sample_rate / N`. Negative shifts are rejected.
pub fn frequency_shift(series: &TimeSeries, shift_hz: f64) -> Result<TimeSeries> {
    let transform = SpectralTransform::new(series.len())?;
    let spectrum = transform.forward(series)?;

    let nbins = bin_displacement(shift_hz, spectrum.resolution())?;
    if nbins >= spectrum.num_bins() {
        log::warn!(
            "shift of {} Hz ({} bins) exceeds {} bins, output is silent",
            shift_hz,
            nbins,
            spectrum.num_bins()
        );
    }

    let shifted = shift_spectrum(&spectrum, nbins)?;
    series.with_samples(transform.inverse(&shifted)?)
}
