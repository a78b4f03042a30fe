//! Windowing of PSD segments
//!
//! Applies windows to time-domain segments before FFT to reduce spectral leakage

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input segment
/// * `window` - Window coefficients (same length as `signal`)
///
/// # Returns
/// Windowed segment
pub fn apply_window(signal: &[f64], window: &[f64]) -> Vec<f64> {
    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Extract a segment starting at `start`, zero-padded to `length`, and window it
pub fn extract_windowed_segment(signal: &[f64], start: usize, window: &[f64]) -> Vec<f64> {
    let length = window.len();
    let end = (start + length).min(signal.len());

    let mut segment = vec![0.0; length];
    if start < end {
        segment[..end - start].copy_from_slice(&signal[start..end]);
    }

    apply_window(&segment, window)
}

/// Sum of squared window coefficients
///
/// Normalizes a windowed periodogram into a density.
pub fn window_power(window: &[f64]) -> f64 {
    window.iter().map(|&w| w * w).sum()
}
