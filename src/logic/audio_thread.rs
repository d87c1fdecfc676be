//! Dedicated audio thread that owns the output device.
//!
//! Decoding and seeking happen here so they never stall the frame loop.
//! When no device is available, or a file cannot be played, the worker
//! falls back to a silent wall clock so gameplay still advances.

use crate::system::bus::{AudioClock, AudioCommand, SystemBus};
use crossbeam_channel::RecvTimeoutError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How often the silent clock is republished while waiting for commands.
const SILENT_TICK: Duration = Duration::from_millis(5);

type BoxedSource = Box<dyn Source<Item = i16> + Send>;

/// Wall-clock stand-in for a sink.
struct SilentClock {
    generation: u64,
    elapsed: Duration,
    resumed_at: Option<Instant>,
}

impl SilentClock {
    fn new(generation: u64, playing: bool) -> Self {
        Self {
            generation,
            elapsed: Duration::ZERO,
            resumed_at: playing.then(Instant::now),
        }
    }

    fn elapsed(&self) -> Duration {
        self.elapsed + self.resumed_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn pause(&mut self) {
        if let Some(t) = self.resumed_at.take() {
            self.elapsed += t.elapsed();
        }
    }

    fn resume(&mut self) {
        if self.resumed_at.is_none() {
            self.resumed_at = Some(Instant::now());
        }
    }
}

enum Playback {
    Idle,
    Device(Sink),
    Silent(SilentClock),
}

struct AudioWorker {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    playback: Playback,
    current_path: Option<PathBuf>,
    volume: f32,
    clock: Arc<AudioClock>,
}

impl AudioWorker {
    fn new(bus: &SystemBus) -> Self {
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("AUDIO: Device found, audio enabled");
                (Some(stream), Some(handle))
            }
            Err(e) => {
                log::warn!(
                    "AUDIO: No audio device found ({}), running in silent mode",
                    e
                );
                (None, None)
            }
        };

        Self {
            _stream: stream,
            stream_handle,
            playback: Playback::Idle,
            current_path: None,
            volume: 1.0,
            clock: bus.audio_clock.clone(),
        }
    }

    fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load { path, generation } => {
                self.current_path = Some(path);
                self.start(0.0, 0, generation, false);
            }
            AudioCommand::Play { generation } => {
                self.start(0.0, 0, generation, true);
            }
            AudioCommand::Pause => match &mut self.playback {
                Playback::Device(sink) => sink.pause(),
                Playback::Silent(silent) => silent.pause(),
                Playback::Idle => {}
            },
            AudioCommand::Unpause => match &mut self.playback {
                Playback::Device(sink) => sink.play(),
                Playback::Silent(silent) => silent.resume(),
                Playback::Idle => {}
            },
            AudioCommand::Stop => self.stop_current(),
            AudioCommand::SeekAndPlay {
                offset_secs,
                fade_ms,
                generation,
            } => {
                self.start(offset_secs, fade_ms, generation, true);
            }
            AudioCommand::SetVolume { volume } => {
                self.volume = volume.clamp(0.0, 1.0);
                if let Playback::Device(sink) = &self.playback {
                    sink.set_volume(self.volume);
                }
            }
            AudioCommand::Shutdown => self.stop_current(),
        }
    }

    fn stop_current(&mut self) {
        if let Playback::Device(sink) = std::mem::replace(&mut self.playback, Playback::Idle) {
            sink.stop();
        }
    }

    /// Replaces the current playback with the loaded file from `offset`.
    fn start(&mut self, offset: f64, fade_ms: u64, generation: u64, playing: bool) {
        self.stop_current();

        let Some(path) = self.current_path.clone() else {
            log::warn!("AUDIO: Nothing loaded, ignoring playback request");
            return;
        };

        self.playback = match self.open_sink(&path, offset, fade_ms, generation) {
            Ok(sink) => {
                if playing {
                    sink.play();
                }
                log::info!("AUDIO: Loaded {:?} from {:.1}s", path, offset);
                Playback::Device(sink)
            }
            Err(reason) => {
                log::warn!("AUDIO: {} for {:?}, playing silently", reason, path);
                Playback::Silent(SilentClock::new(generation, playing))
            }
        };
    }

    fn open_sink(
        &self,
        path: &Path,
        offset: f64,
        fade_ms: u64,
        generation: u64,
    ) -> Result<Sink, String> {
        let handle = self
            .stream_handle
            .as_ref()
            .ok_or_else(|| "No audio device".to_string())?;
        let file = File::open(path).map_err(|e| format!("Cannot open file ({e})"))?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| format!("Cannot decode file ({e})"))?;

        self.clock.set_format(decoder.sample_rate(), decoder.channels());

        let skipped = decoder.skip_duration(Duration::from_secs_f64(offset.max(0.0)));
        let source: BoxedSource = if fade_ms > 0 {
            Box::new(skipped.fade_in(Duration::from_millis(fade_ms)))
        } else {
            Box::new(skipped)
        };

        let sink = Sink::try_new(handle).map_err(|e| format!("Failed to create sink ({e})"))?;
        sink.set_volume(self.volume);
        sink.pause();
        sink.append(AudioMonitor {
            inner: source,
            clock: self.clock.clone(),
            generation,
        });
        Ok(sink)
    }

    fn publish_silent_clock(&self) {
        if let Playback::Silent(silent) = &self.playback {
            self.clock
                .set_elapsed(silent.generation, silent.elapsed().as_secs_f64());
        }
    }
}

/// Counts every sample the device pulls into the shared clock.
struct AudioMonitor<I> {
    inner: I,
    clock: Arc<AudioClock>,
    generation: u64,
}

impl<I> Iterator for AudioMonitor<I>
where
    I: Iterator,
{
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next();
        if item.is_some() {
            self.clock.advance(self.generation);
        }
        item
    }
}

impl<I> Source for AudioMonitor<I>
where
    I: Source,
    I::Item: rodio::Sample,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }
    fn channels(&self) -> u16 {
        self.inner.channels()
    }
    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }
    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}

/// Starts the dedicated audio thread.
pub fn start_audio_thread(bus: SystemBus) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("Audio Thread".to_string())
        .spawn(move || {
            log::info!("AUDIO: Thread started");

            let mut worker = AudioWorker::new(&bus);

            loop {
                match bus.audio_cmd_rx.recv_timeout(SILENT_TICK) {
                    Ok(AudioCommand::Shutdown) => {
                        worker.handle_command(AudioCommand::Shutdown);
                        break;
                    }
                    Ok(cmd) => worker.handle_command(cmd),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                worker.publish_silent_clock();
            }

            log::info!("AUDIO: Thread stopped");
        })
        .expect("Failed to spawn Audio thread")
}
