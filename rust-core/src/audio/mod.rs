//! Audio rendering and WAV file output

pub mod render;
pub mod output;

pub use render::{render, AudioWaveform, HEADROOM, MAX_RENDERED_SAMPLE};
