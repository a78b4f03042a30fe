//! End-to-end scenarios over the public API

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;
use std::io::Cursor;
use strain_conditioning::spectrum::{as_function, rfft_frequencies, SpectralTransform};
use strain_conditioning::{
    frequency_shift, render, whiten, ConditioningConfig, ConditioningPipeline, FillPolicy,
    NoiseModel, TimeSeries,
};

const FS: f64 = 4096.0;

fn sine(freq_hz: f64, amplitude: f64, len: usize) -> TimeSeries {
    let samples = (0..len)
        .map(|n| amplitude * (2.0 * PI * freq_hz * n as f64 / FS).sin())
        .collect();
    TimeSeries::new(samples, FS).unwrap()
}

fn peak_frequency(series: &TimeSeries) -> f64 {
    let spectrum = SpectralTransform::new(series.len())
        .unwrap()
        .forward(series)
        .unwrap();
    spectrum.frequencies()[spectrum.peak_bin()]
}

#[test]
fn wav_roundtrip_keeps_rate_and_length() {
    let audio = render(&sine(440.0, 0.5, 4096)).unwrap();

    let mut buffer = Cursor::new(Vec::new());
    audio.write_to(&mut buffer).unwrap();
    buffer.set_position(0);

    let reader = hound::WavReader::new(buffer).unwrap();
    assert_eq!(reader.spec().sample_rate, 4096);
    assert_eq!(reader.len(), 4096);
}

#[test]
fn shift_moves_tone_by_requested_offset() {
    let x = sine(440.0, 1.0, 4096);
    let y = frequency_shift(&x, 120.0).unwrap();

    assert_eq!(y.len(), x.len());
    let moved = peak_frequency(&y) - peak_frequency(&x);
    assert!((moved - 120.0).abs() < 5.0, "moved by {}", moved);
}

#[test]
fn whitening_noisy_tone_with_flat_psd() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let samples: Vec<f64> = (0..4096)
        .map(|n| (2.0 * PI * 100.0 * n as f64 / FS).sin() + 0.1 * normal.sample(&mut rng))
        .collect();
    let x = TimeSeries::new(samples, FS).unwrap();

    let freqs = rfft_frequencies(x.len(), x.dt());
    let flat = vec![1.0; freqs.len()];
    let psd = as_function(freqs, flat, Some(FillPolicy::Constant(1.0))).unwrap();

    let w = whiten(&x, &psd).unwrap();
    assert_eq!(w.len(), x.len());
    assert!(w.samples().iter().all(|s| s.is_finite()));
}

#[test]
fn render_bounds_and_silence() {
    let loud = render(&sine(440.0, 1e6, 4096)).unwrap();
    assert!(loud.samples().iter().all(|s| s.unsigned_abs() <= 29491));

    let silent = render(&TimeSeries::new(vec![0.0; 4096], FS).unwrap()).unwrap();
    assert_eq!(silent.len(), 4096);
    assert!(silent.samples().iter().all(|&s| s == 0));
}

#[test]
fn lengths_preserved_for_arbitrary_sizes() {
    let model = NoiseModel::default();
    for len in [1usize, 2, 3, 17, 1000, 4097] {
        let x = sine(50.0, 1.0, len);
        assert_eq!(whiten(&x, &model).unwrap().len(), len);
        assert_eq!(frequency_shift(&x, 30.0).unwrap().len(), len);
        assert_eq!(render(&x).unwrap().len(), len);
    }
}

#[test]
fn pipeline_writes_audible_wav() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let normal = Normal::new(0.0, 1e-21).unwrap();
    let samples: Vec<f64> = (0..8 * 4096).map(|_| normal.sample(&mut rng)).collect();
    let strain = TimeSeries::new(samples, FS).unwrap();

    let pipeline = ConditioningPipeline::new(ConditioningConfig::for_sample_rate(FS)).unwrap();
    let out = pipeline.run(&strain).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GW150914_H1_shifted.wav");
    out.audio.write_wav(&path).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len() as usize, strain.len());
}
