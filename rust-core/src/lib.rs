//! Strain Conditioning - gravitational-wave strain whitening and sonification
//!
//! PSD estimation, whitening, band-pass, frequency shifting and 16-bit audio
//! rendering of detector strain around a candidate event.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod series;
pub mod spectrum;
pub mod filters;
pub mod conditioning;
pub mod audio;
pub mod strain;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{ConditioningError, Result};
pub use series::TimeSeries;
pub use spectrum::{FillPolicy, FrequencyResponse, InterpolatedResponse, NoiseModel, PowerSpectrum};
pub use conditioning::{frequency_shift, whiten, ConditioningConfig, ConditioningPipeline};
pub use audio::{render, AudioWaveform};
pub use strain::{StrainData, StrainLoader};
