use std::path::PathBuf;
use thiserror::Error;

/// Reasons a track cannot be loaded or prepared.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: {reason} ({text:?})")]
    Malformed {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Line {line}: unknown lane '{key}'")]
    UnknownLane { line: usize, key: char },

    #[error("Line {line}: time {time:.3}s is before the previous event at {previous:.3}s")]
    TimeWentBackwards {
        line: usize,
        time: f64,
        previous: f64,
    },

    #[error("Audio asset {0:?} is missing")]
    MissingAudio(PathBuf),

    #[error("Cannot decode audio {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}
