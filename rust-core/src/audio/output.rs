//! Audio file output using hound
//!
//! Mono, 16-bit signed integer PCM at the waveform's sample rate

use super::render::AudioWaveform;
use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

impl AudioWaveform {
    /// WAV header parameters for this waveform
    pub fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate(),
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    /// Write a complete WAV stream to any seekable writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut wav = WavWriter::new(writer, self.wav_spec())?;
        for &sample in self.samples() {
            wav.write_sample(sample)?;
        }
        wav.finalize()?;
        Ok(())
    }

    /// Write a WAV file, replacing any existing file at `path`
    pub fn write_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        self.write_to(file)?;

        log::debug!(
            "wrote {} samples at {} Hz to {}",
            self.len(),
            self.sample_rate(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::render::render;
    use crate::series::TimeSeries;
    use std::f64::consts::PI;
    use std::io::Cursor;

    fn tone_waveform() -> AudioWaveform {
        let fs = 4096.0;
        let samples = (0..4096)
            .map(|n| 0.5 * (2.0 * PI * 440.0 * n as f64 / fs).sin())
            .collect();
        render(&TimeSeries::new(samples, fs).unwrap()).unwrap()
    }

    #[test]
    fn test_in_memory_roundtrip() {
        let waveform = tone_waveform();
        let mut buffer = Cursor::new(Vec::new());
        waveform.write_to(&mut buffer).unwrap();

        buffer.set_position(0);
        let mut reader = hound::WavReader::new(buffer).unwrap();
        let spec = reader.spec();

        assert_eq!(spec.sample_rate, 4096);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded.len(), 4096);
        assert_eq!(decoded.as_slice(), waveform.samples());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        tone_waveform().write_wav(&path).unwrap();

        assert!(path.exists());
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 4096);
        assert_eq!(reader.len(), 4096);
    }
}
