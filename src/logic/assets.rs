//! Background preparation of track assets.
//!
//! At most one preparation runs at a time. The worker hands its result back
//! through a one-shot channel that the frame loop polls once per tick.

use crate::logic::visualizer::compute_visualization;
use crate::models::track::{Track, TrackError};
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use std::path::{Path, PathBuf};
use std::thread;

/// Checks the audio asset and attaches its visualization.
pub fn prepare_track_assets(track: &Track) -> Result<Track, TrackError> {
    if !track.has_audio() {
        return Err(TrackError::MissingAudio(track.audio.clone()));
    }
    let visualization = compute_visualization(&track.audio)?;
    Ok(track.with_visualization(visualization))
}

struct Pending {
    /// Audio file of the track being prepared; tracks are matched on it.
    audio: PathBuf,
    result_rx: Receiver<Result<Track, TrackError>>,
}

/// Single-slot background task runner.
#[derive(Default)]
pub struct AssetTask {
    pending: Option<Pending>,
}

impl AssetTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Audio file of the track being prepared, if any.
    pub fn pending_audio(&self) -> Option<&Path> {
        self.pending.as_ref().map(|p| p.audio.as_path())
    }

    /// Starts preparing `track`. Returns `false` (and does nothing) when a
    /// preparation is already in flight.
    pub fn request(&mut self, track: &Track) -> bool {
        let audio = track.audio.clone();
        let track = track.clone();
        self.request_with(audio, move || prepare_track_assets(&track))
    }

    pub fn request_with<F>(&mut self, audio: PathBuf, job: F) -> bool
    where
        F: FnOnce() -> Result<Track, TrackError> + Send + 'static,
    {
        if self.pending.is_some() {
            log::debug!("ASSETS: Preparation already running, ignoring request");
            return false;
        }

        let (result_tx, result_rx) = bounded(1);
        thread::Builder::new()
            .name("Asset Worker".to_string())
            .spawn(move || {
                // The receiver may be gone if the screen was dropped.
                let _ = result_tx.send(job());
            })
            .expect("Failed to spawn Asset worker");

        log::info!("ASSETS: Preparing {:?}", audio);
        self.pending = Some(Pending { audio, result_rx });
        true
    }

    /// Returns the finished result, if the worker is done.
    pub fn poll(&mut self) -> Option<(PathBuf, Result<Track, TrackError>)> {
        let pending = self.pending.as_ref()?;
        match pending.result_rx.try_recv() {
            Ok(result) => self.pending.take().map(|p| (p.audio, result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("ASSETS: Worker for {:?} died", pending.audio);
                self.pending = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::Lane;
    use crate::models::track::fixtures;
    use crossbeam_channel::bounded;
    use std::time::{Duration, Instant};

    fn wait(task: &mut AssetTask) -> (PathBuf, Result<Track, TrackError>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(done) = task.poll() {
                return done;
            }
            assert!(Instant::now() < deadline, "worker never finished");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn missing_audio_is_reported() {
        let track = fixtures::track(&[(1.0, Lane::Left)], 2.0);
        assert!(matches!(
            prepare_track_assets(&track),
            Err(TrackError::MissingAudio(_))
        ));
    }

    #[test]
    fn second_request_while_pending_is_ignored() {
        let track = fixtures::track(&[], 1.0);
        let (gate_tx, gate_rx) = bounded::<()>(0);
        let mut task = AssetTask::new();

        let first = track.clone();
        assert!(task.request_with(PathBuf::from("a.ogg"), move || {
            let _ = gate_rx.recv();
            Ok(first)
        }));
        assert!(task.is_busy());
        assert!(!task.request_with(PathBuf::from("b.ogg"), || unreachable!()));
        assert_eq!(task.pending_audio(), Some(Path::new("a.ogg")));
        assert!(task.poll().is_none());

        gate_tx.send(()).unwrap();
        let (audio, result) = wait(&mut task);
        assert_eq!(audio, PathBuf::from("a.ogg"));
        assert!(result.is_ok());
        assert!(!task.is_busy());
    }

    #[test]
    fn failure_frees_the_slot() {
        let track = fixtures::track(&[], 1.0);
        let mut task = AssetTask::new();
        assert!(task.request(&track));

        let (audio, result) = wait(&mut task);
        assert_eq!(audio, track.audio);
        assert!(result.is_err());
        assert!(task.request_with(track.audio.clone(), move || Ok(track)));
    }
}
