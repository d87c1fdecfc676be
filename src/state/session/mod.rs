//! Gameplay session: timing and pause semantics around the judgment engine.
//!
//! The session aligns three clocks. The wall clock drives the countdown
//! before playback starts, the audio clock drives judging and message
//! expiry, and frames only sample both.

mod actions;
mod snapshot;

pub use actions::PauseChoice;

use crate::logic::audio::AudioPlayer;
use crate::models::engine::{NUM_LANES, PlayfieldConfig};
use crate::models::selector::{MenuEntry, Selector};
use crate::models::stats::{ResultTier, Rgb};
use crate::models::track::Track;
use crate::state::game::JudgmentEngine;
use crate::state::traits::{Transition, Update, UpdateContext};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock delay between (re)starting play and unpausing audio.
pub const COUNTDOWN: Duration = Duration::from_millis(1500);
/// How long a hit judgement stays on the HUD, in audio seconds.
pub const HIT_MESSAGE_S: f64 = 0.6;
/// How long a sweep miss stays on the HUD, in audio seconds.
pub const MISS_MESSAGE_S: f64 = 0.8;

const MISS_COLOR: Rgb = [200, 0, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No track loaded yet.
    Loading,
    /// Waiting for the wall-clock deadline; audio is paused.
    Countdown,
    Playing,
    /// Manually paused; the pause menu is active.
    Paused,
    /// The track reached its end; the results menu is active.
    Finished,
}

/// Transient HUD text, expiring in audio time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Message {
    pub text: &'static str,
    pub color: Rgb,
    pub expires_at: f64,
}

pub struct GameSession {
    /// Replaced wholesale on load and restart.
    engine: Option<JudgmentEngine>,
    phase: Phase,
    start_deadline: Option<Instant>,
    message: Option<Message>,
    /// Audio time until which each lane receptor flashes.
    highlight_until: [f64; NUM_LANES],

    pause_menu: Selector<PauseChoice>,
    results_menu: Selector<PauseChoice>,
    playfield: PlayfieldConfig,

    // Clocks and speed observed on the last tick, for snapshots.
    position: f64,
    now: Instant,
    fall_speed: u8,
}

impl GameSession {
    pub fn new(now: Instant) -> Self {
        Self {
            engine: None,
            phase: Phase::Loading,
            start_deadline: None,
            message: None,
            highlight_until: [f64::NEG_INFINITY; NUM_LANES],
            pause_menu: Selector::new(vec![
                MenuEntry::new("Resume", PauseChoice::Resume),
                MenuEntry::new("Restart", PauseChoice::Restart),
                MenuEntry::new("Settings", PauseChoice::Settings),
                MenuEntry::new("Quit", PauseChoice::Quit),
            ]),
            results_menu: Selector::new(vec![
                MenuEntry::new("Restart", PauseChoice::Restart),
                MenuEntry::new("Settings", PauseChoice::Settings),
                MenuEntry::new("Quit", PauseChoice::Quit),
            ]),
            playfield: PlayfieldConfig::new(),
            position: 0.0,
            now,
            fall_speed: 10,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn engine(&self) -> Option<&JudgmentEngine> {
        self.engine.as_ref()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Whether playback has reached the end of the track.
    pub fn is_done(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| self.position >= engine.track.length)
    }

    /// Loads `track` with a fresh engine and starts the countdown.
    pub fn load_track(&mut self, track: Arc<Track>, audio: &mut dyn AudioPlayer, now: Instant) {
        log::info!("LOGIC: Loading '{}' by {}", track.title, track.artist);
        audio.load(&track.audio);
        self.position = 0.0;
        self.engine = Some(JudgmentEngine::new(track));
        self.start_play(now);
    }

    /// Starts (or resumes) play after the countdown.
    pub fn start_play(&mut self, now: Instant) {
        if self.engine.is_none() {
            return;
        }
        self.phase = Phase::Countdown;
        self.start_deadline = Some(now + COUNTDOWN);
        self.now = now;
        self.message = None;
        self.highlight_until = [f64::NEG_INFINITY; NUM_LANES];
    }

    /// Pauses audio and opens the pause (or results) menu.
    pub fn stop_play(&mut self, audio: &mut dyn AudioPlayer) {
        if !matches!(self.phase, Phase::Countdown | Phase::Playing) {
            return;
        }
        // Actions arrive before the tick; the last tick's position may be stale.
        self.position = audio.position_seconds();
        audio.pause();
        self.start_deadline = None;
        self.message = None;
        self.pause_menu.reset();
        self.results_menu.reset();
        self.phase = if self.is_done() {
            log::info!("LOGIC: Track finished");
            Phase::Finished
        } else {
            Phase::Paused
        };
    }

    /// Replays the current track from the start with a new engine.
    pub fn restart_play(&mut self, audio: &mut dyn AudioPlayer, now: Instant) {
        let Some(track) = self.engine.as_ref().map(|e| e.track.clone()) else {
            return;
        };
        audio.pause();
        self.load_track(track, audio, now);
    }

    /// Stops playback and hands it back to the track select screen.
    pub fn close(&mut self, audio: &mut dyn AudioPlayer) -> Transition {
        audio.stop();
        Transition::ToLevelSelect
    }

    /// Digit shown while counting down, keyed off the wall clock.
    pub fn countdown_digit(&self) -> Option<u8> {
        if self.phase != Phase::Countdown {
            return None;
        }
        let remaining = self.start_deadline?.checked_duration_since(self.now)?;
        let remaining = remaining.as_secs_f64();
        if remaining > 1.0 {
            Some(3)
        } else if remaining > 0.5 {
            Some(2)
        } else if remaining > 0.0 {
            Some(1)
        } else {
            None
        }
    }

    pub fn result_tier(&self) -> Option<ResultTier> {
        if self.phase != Phase::Finished {
            return None;
        }
        let engine = self.engine.as_ref()?;
        Some(ResultTier::evaluate(
            engine.accuracy(),
            engine.best_combo,
            engine.total_notes(),
        ))
    }

    fn set_message(&mut self, text: &'static str, color: Rgb, duration: f64, now: f64) {
        self.message = Some(Message {
            text,
            color,
            expires_at: now + duration,
        });
    }
}

impl Update for GameSession {
    fn update(&mut self, ctx: &mut UpdateContext) -> Option<Transition> {
        if self.engine.is_none() {
            return None;
        }

        ctx.audio.set_volume(ctx.settings.volume);
        self.fall_speed = ctx.settings.fall_speed;
        self.now = ctx.now;

        if self.phase == Phase::Countdown
            && self.start_deadline.is_some_and(|deadline| ctx.now >= deadline)
        {
            ctx.audio.unpause();
            self.start_deadline = None;
            self.phase = Phase::Playing;
        }

        let t = ctx.audio.position_seconds();
        self.position = t;

        if !matches!(self.phase, Phase::Countdown | Phase::Playing) {
            return None;
        }

        if self.message.is_some_and(|m| m.expires_at < t) {
            self.message = None;
        }

        let missed = self.engine.as_mut().is_some_and(|engine| engine.sweep(t));
        if missed {
            self.set_message("FAILED", MISS_COLOR, MISS_MESSAGE_S, t);
        }

        if self.is_done() {
            self.stop_play(ctx.audio);
        }

        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logic::audio::testing::FakeAudio;
    use crate::models::engine::Lane;
    use crate::models::settings::SettingsState;
    use crate::models::track::fixtures;

    pub(crate) fn tick(
        session: &mut GameSession,
        audio: &mut FakeAudio,
        settings: &SettingsState,
        now: Instant,
    ) -> Option<Transition> {
        let mut ctx = UpdateContext {
            settings,
            audio,
            now,
        };
        session.update(&mut ctx)
    }

    pub(crate) fn loaded_session(audio: &mut FakeAudio, now: Instant) -> GameSession {
        let track = fixtures::track(&[(1.0, Lane::Left), (2.0, Lane::Down)], 3.0);
        let mut session = GameSession::new(now);
        session.load_track(Arc::new(track), audio, now);
        session
    }

    #[test]
    fn load_starts_countdown_with_audio_paused() {
        let mut audio = FakeAudio::new();
        let start = Instant::now();
        let session = loaded_session(&mut audio, start);

        assert_eq!(session.phase(), Phase::Countdown);
        assert!(!audio.playing);
        assert_eq!(audio.log, vec!["load missing.ogg".to_string()]);
        assert_eq!(session.countdown_digit(), Some(3));
    }

    #[test]
    fn countdown_digits_follow_wall_clock() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);

        tick(&mut session, &mut audio, &settings, start + Duration::from_millis(700));
        assert_eq!(session.countdown_digit(), Some(2));
        tick(&mut session, &mut audio, &settings, start + Duration::from_millis(1200));
        assert_eq!(session.countdown_digit(), Some(1));
        assert!(!audio.playing);

        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.countdown_digit(), None);
        assert!(audio.playing);
    }

    #[test]
    fn sweep_miss_shows_failed_message() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);

        audio.advance(1.3);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        let message = session.message().copied().unwrap();
        assert_eq!(message.text, "FAILED");
        assert!((message.expires_at - (1.3 + MISS_MESSAGE_S)).abs() < 1e-9);

        // Expires in audio time, not wall time.
        audio.advance(0.9);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        assert!(session.message().is_none());
    }

    #[test]
    fn end_of_track_finishes_with_tier() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);

        audio.advance(3.0);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(!audio.playing);
        assert!(session.is_done());
        assert_eq!(session.result_tier(), Some(ResultTier::Complete));
    }

    #[test]
    fn pause_past_the_end_opens_results() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);

        // Playback crosses the end between two ticks.
        audio.advance(3.2);
        session.stop_play(&mut audio);
        assert_eq!(session.phase(), Phase::Finished);
        assert!(session.result_tier().is_some());
        assert_eq!(session.active_menu().1, vec!["Restart", "Settings", "Quit"]);
    }

    #[test]
    fn paused_session_does_not_expire_or_sweep() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);

        audio.advance(0.5);
        session.stop_play(&mut audio);
        assert_eq!(session.phase(), Phase::Paused);

        // Wall time passes, audio time is frozen.
        tick(&mut session, &mut audio, &settings, start + Duration::from_secs(30));
        let engine = session.engine().unwrap();
        assert_eq!(engine.hit_stats.total_judged(), 0);
        assert_eq!(session.phase(), Phase::Paused);
    }

    #[test]
    fn volume_follows_settings() {
        let mut audio = FakeAudio::new();
        let mut settings = SettingsState::default();
        settings.volume = 40;
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start);
        assert_eq!(audio.volume, 40);
    }

    #[test]
    fn restart_replaces_engine() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let start = Instant::now();
        let mut session = loaded_session(&mut audio, start);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        audio.advance(2.6);
        tick(&mut session, &mut audio, &settings, start + COUNTDOWN);
        assert_eq!(session.engine().unwrap().hit_stats.missed, 2);

        let later = start + Duration::from_secs(5);
        session.restart_play(&mut audio, later);
        assert_eq!(session.phase(), Phase::Countdown);
        assert_eq!(session.engine().unwrap().hit_stats.total_judged(), 0);
        assert_eq!(audio.position, 0.0);
        assert!(!audio.playing);
    }
}
