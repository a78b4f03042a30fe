//! Spectral transform, PSD estimation and noise models

pub mod fft;
pub mod windowing;
pub mod psd;
pub mod response;
pub mod model;

pub use fft::{rfft_frequencies, FrequencySpectrum, SpectralTransform};
pub use model::{analytic_model, NoiseModel};
pub use psd::{estimate, PowerSpectrum, PsdConfig, PsdEstimator, REFERENCE_SAMPLE_RATE};
pub use response::{as_function, FillPolicy, FrequencyResponse, InterpolatedResponse};
