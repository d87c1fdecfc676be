//! Audio playback handle.
//!
//! The playback device is owned by one audio thread. Everything else talks
//! to it through an [`AudioPlayer`] handle that is passed explicitly to
//! whichever screen currently controls playback.

use crate::system::bus::{AudioClock, AudioCommand, SystemBus};
use crossbeam_channel::Sender;
use std::path::Path;
use std::sync::Arc;

/// Playback contract the game relies on.
///
/// `position_seconds` advances while playing and is frozen while paused.
pub trait AudioPlayer {
    /// Loads a file, paused at its start.
    fn load(&mut self, path: &Path);
    /// Plays the loaded file from the beginning.
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// Plays from `offset` seconds with a fade-in.
    fn seek_and_play(&mut self, offset: f64, fade_ms: u64);
    /// Current playback position in seconds from the start of the file.
    fn position_seconds(&self) -> f64;
    /// Volume in percent (0..=100).
    fn set_volume(&mut self, volume: u8);
}

/// Sends commands to the dedicated audio thread.
///
/// Commands are fire-and-forget; the position is read from the shared
/// [`AudioClock`], which is reset synchronously so a new load or seek is
/// visible before the audio thread gets to it.
pub struct AudioManager {
    cmd_tx: Sender<AudioCommand>,
    clock: Arc<AudioClock>,
    volume: u8,
}

impl AudioManager {
    pub fn new(bus: &SystemBus) -> Self {
        Self {
            cmd_tx: bus.audio_cmd_tx.clone(),
            clock: bus.audio_clock.clone(),
            volume: 100,
        }
    }

    fn send(&self, cmd: AudioCommand) {
        if let Err(e) = self.cmd_tx.send(cmd) {
            log::error!("AUDIO: Audio thread is gone, dropping {:?}", e.0);
        }
    }
}

impl AudioPlayer for AudioManager {
    fn load(&mut self, path: &Path) {
        let generation = self.clock.restart(0.0);
        self.send(AudioCommand::Load {
            path: path.to_path_buf(),
            generation,
        });
    }

    fn play(&mut self) {
        let generation = self.clock.restart(0.0);
        self.send(AudioCommand::Play { generation });
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn unpause(&mut self) {
        self.send(AudioCommand::Unpause);
    }

    fn stop(&mut self) {
        self.clock.restart(0.0);
        self.send(AudioCommand::Stop);
    }

    fn seek_and_play(&mut self, offset: f64, fade_ms: u64) {
        let generation = self.clock.restart(offset);
        self.send(AudioCommand::SeekAndPlay {
            offset_secs: offset.max(0.0),
            fade_ms,
            generation,
        });
    }

    fn position_seconds(&self) -> f64 {
        self.clock.position_seconds()
    }

    fn set_volume(&mut self, volume: u8) {
        let volume = volume.min(100);
        // Called every tick during play; only forward changes.
        if volume != self.volume {
            self.volume = volume;
            self.send(AudioCommand::SetVolume {
                volume: volume as f32 / 100.0,
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::AudioPlayer;
    use std::path::{Path, PathBuf};

    /// Scripted audio player with a hand-driven clock.
    ///
    /// `advance` only moves the position while playing, like a real device.
    #[derive(Debug, Default)]
    pub struct FakeAudio {
        pub loaded: Option<PathBuf>,
        pub playing: bool,
        pub position: f64,
        pub volume: u8,
        pub log: Vec<String>,
    }

    impl FakeAudio {
        pub fn new() -> Self {
            Self {
                volume: 100,
                ..Self::default()
            }
        }

        pub fn advance(&mut self, secs: f64) {
            if self.playing {
                self.position += secs;
            }
        }
    }

    impl AudioPlayer for FakeAudio {
        fn load(&mut self, path: &Path) {
            self.loaded = Some(path.to_path_buf());
            self.playing = false;
            self.position = 0.0;
            self.log.push(format!("load {}", path.display()));
        }

        fn play(&mut self) {
            self.playing = true;
            self.position = 0.0;
            self.log.push("play".to_string());
        }

        fn pause(&mut self) {
            self.playing = false;
            self.log.push("pause".to_string());
        }

        fn unpause(&mut self) {
            if !self.playing {
                self.log.push("unpause".to_string());
            }
            self.playing = true;
        }

        fn stop(&mut self) {
            self.playing = false;
            self.position = 0.0;
            self.log.push("stop".to_string());
        }

        fn seek_and_play(&mut self, offset: f64, fade_ms: u64) {
            self.playing = true;
            self.position = offset;
            self.log.push(format!("seek {offset} {fade_ms}"));
        }

        fn position_seconds(&self) -> f64 {
            self.position
        }

        fn set_volume(&mut self, volume: u8) {
            self.volume = volume;
        }
    }
}
