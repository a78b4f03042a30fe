//! Band-pass FIR design and batch filtering

pub mod windows;
pub mod design;
pub mod fast_fir;

pub use windows::{WindowType, generate_window};
pub use design::{BandpassConfig, design_bandpass_fir};
pub use fast_fir::{FastFirFilter, bandpass};
