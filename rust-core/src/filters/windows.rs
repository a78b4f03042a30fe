//! Window functions for PSD segments and band-pass FIR design

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Default for PSD segments.
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,

    /// Rectangular window (no windowing)
    Rectangular,
}

impl WindowType {
    /// Mainlobe width factor A, mainlobe width is A·π/M
    pub fn mainlobe_width_factor(&self) -> f64 {
        match self {
            WindowType::Hann => 8.0,
            WindowType::Hamming => 8.0,
            WindowType::Blackman => 12.0,
            WindowType::Rectangular => 4.0,
        }
    }

    /// Filter length M for a transition width `delta_omega` in radians/sample
    ///
    /// Always odd, so the FIR has an integer group delay of (M-1)/2.
    pub fn calculate_filter_length(&self, delta_omega: f64) -> usize {
        let m = (self.mainlobe_width_factor() * PI / delta_omega).ceil() as usize;

        if m % 2 == 0 {
            m + 1
        } else {
            m.max(1)
        }
    }
}

/// Generate symmetric window coefficients w[n] for n = 0..length
///
/// A single-sample window is `[1.0]` for every type.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length == 1 {
        return vec![1.0];
    }

    let denom = (length as f64) - 1.0;
    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / denom;
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}
