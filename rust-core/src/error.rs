//! Error type shared by every conditioning stage

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConditioningError {
    #[error("Time series must contain at least one sample")]
    EmptySeries,

    #[error("Sample rate must be finite and positive (found: {0})")]
    InvalidSampleRate(f64),

    #[error("Length mismatch in {context}: expected {expected}, found {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Frequency {frequency} Hz is outside the sampled domain [{min}, {max}] Hz and no fill policy is configured")]
    DomainExtrapolation { frequency: f64, min: f64, max: f64 },

    #[error("Frequencies must be strictly increasing (index {0})")]
    NonMonotonicFrequencies(usize),

    #[error("Power must be non-negative (found {value} at index {index})")]
    InvalidPower { index: usize, value: f64 },

    #[error("Unknown {kind}: {name}")]
    UnknownOption { kind: &'static str, name: String },

    #[error("Frequency shift must be finite and non-negative (found: {0} Hz)")]
    InvalidShift(f64),

    #[error("PSD segment length must be at least 2 samples (found: {0})")]
    InvalidSegmentLength(usize),

    #[error("Segment overlap {overlap} must be smaller than segment length {segment_length}")]
    InvalidOverlap { overlap: usize, segment_length: usize },

    #[error("Invalid band {low_hz}-{high_hz} Hz for Nyquist {nyquist_hz} Hz")]
    InvalidBand {
        low_hz: f64,
        high_hz: f64,
        nyquist_hz: f64,
    },

    #[error("Non-finite sample at index {0}")]
    NonFiniteSample(usize),

    #[error("Strain loader contract violated: {0}")]
    LoaderContract(String),

    #[error("FFT processing failed: {0}")]
    Fft(String),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConditioningError>;
