//! Whitening and frequency shifting of strain time series

pub mod whiten;
pub mod shift;
pub mod pipeline;

pub use whiten::{whiten, whiten_with, WhiteningConfig, WhiteningNormalization};
pub use shift::{bin_displacement, frequency_shift, shift_spectrum};
pub use pipeline::{ConditionedStrain, ConditioningConfig, ConditioningPipeline};
