//! Line-oriented track file parser.
//!
//! Each non-blank line reads `<timestamp> <command> [args]`, `#` starts a
//! comment. A timestamp prefixed with `+` is relative to the previous event;
//! otherwise it is relative to the last `tempo` change. Timestamps are in
//! beats of the current tempo (one second per beat before any `tempo`).

use super::{PreviewWindow, Track, TrackError};
use crate::models::engine::{Lane, Note};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of track files.
pub const TRACK_EXTENSION: &str = "lkr";

/// Parser state carried from one line to the next.
struct Cursor {
    /// Seconds per timestamp unit.
    beat: f64,
    /// Absolute time of the last tempo change.
    anchor: f64,
    /// Absolute time of the previous event.
    last: f64,
}

/// Parses a track from its text. Relative asset paths resolve against `base_dir`.
pub fn parse_track(source: &str, base_dir: &Path) -> Result<Track, TrackError> {
    let mut title = "N/A".to_string();
    let mut artist = "N/A".to_string();
    let mut description = "N/A".to_string();
    let mut difficulty = 2;
    let mut audio = PathBuf::from("N/A");
    let mut audio_url = None;
    let mut preview_start = 0.0;
    let mut preview_stop = f64::INFINITY;
    let mut notes = Vec::new();

    let mut cursor = Cursor {
        beat: 1.0,
        anchor: 0.0,
        last: 0.0,
    };

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let malformed = |reason: &str| TrackError::Malformed {
            line: line_no,
            text: line.to_string(),
            reason: reason.to_string(),
        };

        let (t_str, rest) = split_token(line);
        let (cmd, args) = split_token(rest);
        if cmd.is_empty() {
            return Err(malformed("missing command"));
        }

        let offset: f64 = t_str
            .parse()
            .map_err(|_| malformed("invalid timestamp"))?;
        let base = if t_str.starts_with('+') {
            cursor.last
        } else {
            cursor.anchor
        };
        let t = offset * cursor.beat + base;

        if !t.is_finite() {
            return Err(malformed("invalid timestamp"));
        }
        if t < cursor.last {
            return Err(TrackError::TimeWentBackwards {
                line: line_no,
                time: t,
                previous: cursor.last,
            });
        }

        match cmd {
            "title" => title = args.to_string(),
            "artist" => artist = args.to_string(),
            "desc" => description = args.to_string(),
            "difficulty" => {
                difficulty = args
                    .parse()
                    .map_err(|_| malformed("difficulty must be a whole number"))?;
            }
            "audio" => {
                let mut fields = args.split_whitespace();
                let file = fields.next().ok_or_else(|| malformed("missing audio file"))?;
                audio = base_dir.join(file);
                audio_url = fields.next().map(str::to_string);
            }
            "preview" => {
                let mut fields = args.split_whitespace().map(str::parse::<f64>);
                match (fields.next(), fields.next()) {
                    (Some(Ok(start)), Some(Ok(stop))) => {
                        preview_start = start;
                        preview_stop = stop;
                    }
                    _ => return Err(malformed("preview needs a start and a stop")),
                }
            }
            "tempo" => {
                let bpm: f64 = args.parse().map_err(|_| malformed("invalid tempo"))?;
                if !(bpm.is_finite() && bpm > 0.0) {
                    return Err(malformed("tempo must be positive"));
                }
                cursor.beat = 60.0 / bpm;
                cursor.anchor = t;
            }
            "note" => {
                let mut seen = Vec::with_capacity(4);
                for key in args.chars().filter(|c| !c.is_whitespace()) {
                    let lane = Lane::from_key(key).ok_or(TrackError::UnknownLane {
                        line: line_no,
                        key,
                    })?;
                    if seen.contains(&lane) {
                        log::warn!(
                            "TRACKS: line {}: lane '{}' repeated at {:.3}s",
                            line_no,
                            lane,
                            t
                        );
                    }
                    seen.push(lane);
                    notes.push(Note::new(t, lane));
                }
            }
            other => {
                log::debug!("TRACKS: line {}: ignoring unknown command '{}'", line_no, other);
            }
        }

        cursor.last = t;
    }

    let length = cursor.last;
    let preview = PreviewWindow {
        start: preview_start.max(0.0),
        end: preview_stop.min(length),
    };

    Ok(Track {
        title,
        artist,
        difficulty,
        description,
        audio,
        audio_url,
        notes,
        length,
        preview,
        visualization: None,
    })
}

/// Splits off the first whitespace-separated token.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim()),
        None => (s, ""),
    }
}

/// Reads and parses a track file.
pub fn load_track(path: &Path) -> Result<Track, TrackError> {
    let source = fs::read_to_string(path).map_err(|source| TrackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    parse_track(&source, base_dir)
}

/// Loads every track file in `dir`, sorted by file name.
///
/// A file that fails to parse is logged and skipped; it never prevents the
/// others from loading.
pub fn reload_tracks(dir: &Path) -> Vec<Track> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("TRACKS: Cannot read track directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == TRACK_EXTENSION))
        .collect();
    paths.sort();

    let mut tracks = Vec::with_capacity(paths.len());
    for path in paths {
        match load_track(&path) {
            Ok(track) => tracks.push(track),
            Err(e) => log::warn!("TRACKS: Skipping {:?}: {}", path, e),
        }
    }

    log::info!("TRACKS: Loaded {} track(s) from {:?}", tracks.len(), dir);
    tracks
}
