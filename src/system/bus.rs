//! Shared channel infrastructure between threads.
//!
//! The `SystemBus` connects the input thread, the audio thread and the main
//! loop. Game state itself never crosses threads; only actions, audio
//! commands and the playback position do.

use crate::input::events::GameAction;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Commands sent to the dedicated audio thread.
///
/// Commands that start a new sink carry the clock generation the sender
/// opened for them.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Load an audio file, paused at its start.
    Load { path: PathBuf, generation: u64 },
    /// Start playback from the beginning.
    Play { generation: u64 },
    Pause,
    Unpause,
    /// Stop and reset playback position.
    Stop,
    /// Restart from `offset_secs`, fading in over `fade_ms`.
    SeekAndPlay {
        offset_secs: f64,
        fade_ms: u64,
        generation: u64,
    },
    /// Volume level in `0.0..=1.0`.
    SetVolume { volume: f32 },
    Shutdown,
}

/// Lock-free playback position.
///
/// Position is `base + samples / (rate * channels)`. Every load or seek
/// starts a new generation; sample counts from an older generation are
/// discarded so a stale sink can never move the clock.
pub struct AudioClock {
    generation: AtomicU64,
    base_bits: AtomicU64,
    samples: AtomicU64,
    sample_rate: AtomicU64,
    channels: AtomicU64,
}

impl AudioClock {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            base_bits: AtomicU64::new(0f64.to_bits()),
            samples: AtomicU64::new(0),
            sample_rate: AtomicU64::new(44100),
            channels: AtomicU64::new(2),
        }
    }

    /// Starts a new generation at `base_secs`. Returns the new generation id.
    pub fn restart(&self, base_secs: f64) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.samples.store(0, Ordering::Relaxed);
        self.base_bits.store(base_secs.max(0.0).to_bits(), Ordering::Relaxed);
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn set_format(&self, sample_rate: u32, channels: u16) {
        self.sample_rate.store(sample_rate.max(1) as u64, Ordering::Relaxed);
        self.channels.store(channels.max(1) as u64, Ordering::Relaxed);
    }

    /// Counts one played sample, if `generation` is still current.
    pub fn advance(&self, generation: u64) {
        if self.generation() == generation {
            self.samples.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Overwrites the elapsed time since the base (silent playback).
    pub fn set_elapsed(&self, generation: u64, elapsed_secs: f64) {
        if self.generation() == generation {
            let rate = self.sample_rate.load(Ordering::Relaxed) as f64;
            let channels = self.channels.load(Ordering::Relaxed) as f64;
            let samples = (elapsed_secs.max(0.0) * rate * channels) as u64;
            self.samples.store(samples, Ordering::Relaxed);
        }
    }

    /// Current playback position in seconds.
    pub fn position_seconds(&self) -> f64 {
        let base = f64::from_bits(self.base_bits.load(Ordering::Relaxed));
        let samples = self.samples.load(Ordering::Relaxed) as f64;
        let rate = self.sample_rate.load(Ordering::Relaxed).max(1) as f64;
        let channels = self.channels.load(Ordering::Relaxed).max(1) as f64;
        base + samples / (rate * channels)
    }
}

impl Default for AudioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct SystemBus {
    /// Input → Main loop: decoded actions.
    pub action_tx: Sender<GameAction>,
    pub action_rx: Receiver<GameAction>,

    /// Main loop → Audio: playback commands.
    pub audio_cmd_tx: Sender<AudioCommand>,
    pub audio_cmd_rx: Receiver<AudioCommand>,

    /// Playback position shared with the audio thread.
    pub audio_clock: Arc<AudioClock>,

    shutdown: Arc<AtomicBool>,
}

impl SystemBus {
    pub fn new() -> Self {
        let (action_tx, action_rx) = unbounded();
        let (audio_cmd_tx, audio_cmd_rx) = unbounded();

        Self {
            action_tx,
            action_rx,
            audio_cmd_tx,
            audio_cmd_rx,
            audio_clock: Arc::new(AudioClock::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Asks every background thread to stop.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.audio_cmd_tx.send(AudioCommand::Shutdown);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
