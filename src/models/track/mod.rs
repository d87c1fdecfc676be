//! Track records: metadata, notes and precomputed visualization.

mod error;
mod parser;

pub use error::TrackError;
pub use parser::{TRACK_EXTENSION, load_track, parse_track, reload_tracks};

use crate::models::engine::Note;
use std::path::PathBuf;
use std::sync::Arc;

/// Audio time range played as a teaser on the track select screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewWindow {
    pub start: f64,
    pub end: f64,
}

impl PreviewWindow {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Per-frame band amplitudes in `[0, 1]`, used only for cosmetic bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    /// Frames per second of audio time.
    pub fps: f64,
    pub frames: Vec<Vec<f32>>,
}

impl Visualization {
    /// Frame to show at audio time `t`.
    pub fn frame_at(&self, t: f64) -> Option<&[f32]> {
        if t < 0.0 {
            return None;
        }
        self.frames.get((t * self.fps) as usize).map(Vec::as_slice)
    }
}

/// A playable chart. Immutable once parsed; shared read-only.
#[derive(Debug, Clone)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub difficulty: u32,
    pub description: String,
    /// Audio file, resolved against the track file's directory.
    pub audio: PathBuf,
    /// Where the audio can be obtained. Never fetched by the game.
    pub audio_url: Option<String>,
    /// All notes in chronological order.
    pub notes: Vec<Note>,
    /// Time of the last event, in seconds.
    pub length: f64,
    pub preview: PreviewWindow,
    pub visualization: Option<Arc<Visualization>>,
}

impl Track {
    /// Whether the audio asset is present on disk.
    pub fn has_audio(&self) -> bool {
        self.audio.is_file()
    }

    /// Returns a copy carrying the given visualization.
    pub fn with_visualization(&self, visualization: Visualization) -> Self {
        Self {
            visualization: Some(Arc::new(visualization)),
            ..self.clone()
        }
    }
}
