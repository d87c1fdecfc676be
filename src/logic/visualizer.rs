//! Spectrum bars precomputed from a track's audio.
//!
//! Each frame holds `VIS_BINS` band levels in `[0, 1]`, sampled `VIS_FPS`
//! times per second of audio. Bands are log-spaced; each band sums the
//! power of several Goertzel filters spread across its width. Powers are
//! converted to dB against the loudest band of the whole track and squeezed
//! into a fixed dynamic range.

use crate::models::track::{TrackError, Visualization};
use rodio::{Decoder, Source};
use std::f32::consts::PI;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const VIS_FPS: f64 = 90.0;
pub const VIS_BINS: usize = 18;

const WINDOW: usize = 2048;
const DYNAMIC_RANGE_DB: f32 = 40.0;
const PREEMPHASIS: f32 = 0.97;
const MIN_FREQ: f32 = 40.0;
const MAX_FREQ: f32 = 16_000.0;
/// Goertzel filters summed per band.
const PROBES_PER_BAND: usize = 4;

/// Decodes `path` and computes its visualization frames.
pub fn compute_visualization(path: &Path) -> Result<Visualization, TrackError> {
    let file = File::open(path).map_err(|source| TrackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| TrackError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sample_rate = decoder.sample_rate();
    let channels = decoder.channels().max(1) as usize;
    let interleaved: Vec<i16> = decoder.collect();
    let mono = downmix(&interleaved, channels);

    log::info!(
        "ASSETS: Analysing {:?} ({:.1}s at {} Hz)",
        path,
        mono.len() as f64 / sample_rate.max(1) as f64,
        sample_rate
    );
    Ok(analyze(&mono, sample_rate))
}

fn downmix(interleaved: &[i16], channels: usize) -> Vec<f32> {
    interleaved
        .chunks(channels)
        .map(|frame| {
            let sum: f32 = frame.iter().map(|&s| s as f32 / i16::MAX as f32).sum();
            sum / frame.len() as f32
        })
        .collect()
}

/// Band center frequencies, log-spaced and kept below Nyquist.
fn band_frequencies(sample_rate: u32) -> Vec<f32> {
    let top = MAX_FREQ.min(sample_rate as f32 * 0.45).max(MIN_FREQ * 2.0);
    let ratio = (top / MIN_FREQ).powf(1.0 / (VIS_BINS - 1) as f32);
    (0..VIS_BINS)
        .map(|i| MIN_FREQ * ratio.powi(i as i32))
        .collect()
}

/// Filter frequencies of every band, evenly spread in log-frequency between
/// the geometric midpoints to the neighbouring band centers.
fn band_probes(sample_rate: u32) -> Vec<Vec<f32>> {
    let centers = band_frequencies(sample_rate);
    let ratio = centers[1] / centers[0];
    centers
        .iter()
        .map(|&center| {
            let low = center / ratio.sqrt();
            (0..PROBES_PER_BAND)
                .map(|k| low * ratio.powf((k as f32 + 0.5) / PROBES_PER_BAND as f32))
                .collect()
        })
        .collect()
}

/// Power of `samples` at `freq`, in arbitrary units.
fn goertzel(samples: &[f32], freq: f32, sample_rate: f32) -> f32 {
    let coeff = 2.0 * (2.0 * PI * freq / sample_rate).cos();
    let (mut s1, mut s2) = (0.0f32, 0.0f32);
    for &x in samples {
        let s = x + coeff * s1 - s2;
        s2 = s1;
        s1 = s;
    }
    (s1 * s1 + s2 * s2 - coeff * s1 * s2).max(0.0)
}

/// Computes frames from mono samples in `[-1, 1]`.
pub fn analyze(mono: &[f32], sample_rate: u32) -> Visualization {
    let rate = sample_rate.max(1);
    let duration = mono.len() as f64 / rate as f64;
    let num_frames = (duration * VIS_FPS).ceil() as usize;
    let hop = rate as f64 / VIS_FPS;

    // Boosts highs so the upper bars are not always flat.
    let emphasized: Vec<f32> = mono
        .iter()
        .enumerate()
        .map(|(i, &x)| if i == 0 { x } else { x - PREEMPHASIS * mono[i - 1] })
        .collect();

    let hann: Vec<f32> = (0..WINDOW)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / WINDOW as f32).cos())
        .collect();
    let probes = band_probes(rate);

    let mut window = vec![0.0f32; WINDOW];
    let mut powers = Vec::with_capacity(num_frames);
    let mut peak = 0.0f32;

    for frame in 0..num_frames {
        // Windows are centered on the frame time.
        let center = (frame as f64 * hop) as isize;
        let start = center - (WINDOW / 2) as isize;
        for (i, slot) in window.iter_mut().enumerate() {
            let idx = start + i as isize;
            let sample = if idx >= 0 {
                emphasized.get(idx as usize).copied().unwrap_or(0.0)
            } else {
                0.0
            };
            *slot = sample * hann[i];
        }

        let bands: Vec<f32> = probes
            .iter()
            .map(|band| {
                band.iter()
                    .map(|&f| goertzel(&window, f, rate as f32))
                    .sum::<f32>()
            })
            .collect();
        peak = bands.iter().copied().fold(peak, f32::max);
        powers.push(bands);
    }

    let reference = peak + 1e-6;
    let frames = powers
        .into_iter()
        .map(|bands| {
            bands
                .into_iter()
                .map(|p| {
                    let db = 10.0 * (p.max(1e-12) / reference).log10();
                    ((db + DYNAMIC_RANGE_DB) / DYNAMIC_RANGE_DB).clamp(0.0, 1.0)
                })
                .collect()
        })
        .collect();

    Visualization {
        fps: VIS_FPS,
        frames,
    }
}
