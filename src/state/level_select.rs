//! Track select screen with looping audio previews.

use crate::input::events::{GameAction, MenuAction};
use crate::logic::assets::AssetTask;
use crate::logic::audio::AudioPlayer;
use crate::models::settings::SettingsState;
use crate::models::track::{Track, reload_tracks};
use crate::shared::snapshot::{LevelSelectSnapshot, TrackSummary};
use crate::state::traits::{
    ActionContext, HandleAction, Snapshot, Transition, Update, UpdateContext,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Fade applied when a preview (re)starts, in milliseconds.
pub const PREVIEW_FADE_MS: u64 = 1000;
/// The preview fades out over its last second.
const FADE_OUT_S: f64 = 1.0;

const STATUS_PREPARING: &str = "DOWNLOADING ASSETS...";
const STATUS_MISSING: &str = "PREVIEW NOT AVAILABLE SELECT TO DOWNLOAD";

pub struct LevelSelect {
    tracks: Vec<Arc<Track>>,
    selected: usize,
    assets: AssetTask,
    /// Audio files whose preparation failed; not retried automatically.
    failed: HashSet<PathBuf>,
    /// Whether the selected track's preview is playing.
    previewing: bool,
    /// Audio position on the last tick.
    position: f64,
}

impl LevelSelect {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            selected: 0,
            assets: AssetTask::new(),
            failed: HashSet::new(),
            previewing: false,
            position: 0.0,
        }
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn selected_track(&self) -> Option<&Arc<Track>> {
        self.tracks.get(self.selected)
    }

    /// Rescans the track directory and starts the preview.
    pub fn enter(&mut self, settings: &SettingsState, audio: &mut dyn AudioPlayer) {
        self.reload(reload_tracks(&settings.tracks_dir));
        self.start_preview(audio);
    }

    /// Replaces the track list, keeping visualizations already computed.
    pub fn reload(&mut self, tracks: Vec<Track>) {
        let previous = std::mem::take(&mut self.tracks);
        self.tracks = tracks
            .into_iter()
            .map(|mut track| {
                if track.visualization.is_none() {
                    track.visualization = previous
                        .iter()
                        .find(|old| old.audio == track.audio)
                        .and_then(|old| old.visualization.clone());
                }
                Arc::new(track)
            })
            .collect();
        self.selected = self.selected.min(self.tracks.len().saturating_sub(1));
    }

    fn start_preview(&mut self, audio: &mut dyn AudioPlayer) {
        match self.tracks.get(self.selected) {
            Some(track) if track.has_audio() => {
                audio.load(&track.audio);
                audio.seek_and_play(track.preview.start, PREVIEW_FADE_MS);
                self.position = track.preview.start;
                self.previewing = true;
            }
            _ => {
                audio.stop();
                self.position = 0.0;
                self.previewing = false;
            }
        }
    }

    fn stop_preview(&mut self, audio: &mut dyn AudioPlayer) {
        audio.stop();
        self.previewing = false;
    }

    fn step(&mut self, forward: bool, audio: &mut dyn AudioPlayer) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
        self.start_preview(audio);
    }

    /// Keeps the preview looping inside its window with a fade-out at the end.
    fn drive_preview(&mut self, ctx: &mut UpdateContext) {
        let Some(track) = self.tracks.get(self.selected).cloned() else {
            return;
        };
        if !self.previewing {
            return;
        }

        let preview = track.preview;
        let pos = ctx.audio.position_seconds();
        self.position = pos;

        if preview.duration() > 0.0 && pos >= preview.end {
            log::debug!("LOGIC: Looping preview of '{}'", track.title);
            ctx.audio.set_volume(ctx.settings.volume);
            ctx.audio.seek_and_play(preview.start, PREVIEW_FADE_MS);
            self.position = preview.start;
            return;
        }

        let scale = ((preview.end - pos) / FADE_OUT_S).clamp(0.0, 1.0);
        let volume = (ctx.settings.volume as f64 * scale).round() as u8;
        ctx.audio.set_volume(volume);
    }

    /// Collects a finished preparation, if any.
    pub fn poll_assets(&mut self) {
        if let Some((audio, result)) = self.assets.poll() {
            match result {
                Ok(prepared) => {
                    log::info!("ASSETS: '{}' is ready", prepared.title);
                    for track in self.tracks.iter_mut().filter(|t| t.audio == audio) {
                        *track = Arc::new(Track {
                            visualization: prepared.visualization.clone(),
                            ..Track::clone(track)
                        });
                    }
                }
                Err(e) => {
                    log::warn!("ASSETS: {}", e);
                    self.failed.insert(audio);
                }
            }
        }
    }

    /// Prepares the selected track's visualization in the background.
    fn prepare_selected(&mut self) {
        if self.assets.is_busy() {
            return;
        }
        if let Some(track) = self.tracks.get(self.selected)
            && track.visualization.is_none()
            && !self.failed.contains(&track.audio)
            && track.has_audio()
        {
            self.assets.request(track);
        }
    }

    fn is_preparing(&self, audio: &Path) -> bool {
        self.assets.pending_audio() == Some(audio)
    }

    fn status(&self) -> String {
        let Some(track) = self.tracks.get(self.selected) else {
            return "NO TRACKS FOUND".to_string();
        };
        if self.is_preparing(&track.audio) {
            STATUS_PREPARING.to_string()
        } else if !track.has_audio() {
            STATUS_MISSING.to_string()
        } else {
            track.description.clone()
        }
    }

    fn choose(&mut self, audio: &mut dyn AudioPlayer) -> Option<Transition> {
        let track = self.tracks.get(self.selected)?.clone();
        if track.has_audio() {
            self.stop_preview(audio);
            return Some(Transition::ToGame(track));
        }

        // Retry on explicit request even if an earlier attempt failed.
        self.failed.remove(&track.audio);
        self.assets.request(&track);
        None
    }
}

impl Default for LevelSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl Update for LevelSelect {
    fn update(&mut self, ctx: &mut UpdateContext) -> Option<Transition> {
        self.poll_assets();
        self.prepare_selected();
        self.drive_preview(ctx);
        None
    }
}

impl HandleAction for LevelSelect {
    fn handle_action(
        &mut self,
        action: GameAction,
        ctx: &mut ActionContext,
    ) -> Option<Transition> {
        match action.menu()? {
            MenuAction::Prev => {
                self.step(false, ctx.audio);
                None
            }
            MenuAction::Next => {
                self.step(true, ctx.audio);
                None
            }
            MenuAction::Primary => self.choose(ctx.audio),
            MenuAction::Secondary => {
                self.stop_preview(ctx.audio);
                Some(Transition::ToMainMenu)
            }
        }
    }
}

impl Snapshot for LevelSelect {
    type Output = LevelSelectSnapshot;

    fn create_snapshot(&self) -> LevelSelectSnapshot {
        let spectrum = self
            .selected_track()
            .filter(|_| self.previewing)
            .and_then(|track| track.visualization.as_ref())
            .and_then(|vis| vis.frame_at(self.position))
            .map(<[f32]>::to_vec);

        LevelSelectSnapshot {
            tracks: self
                .tracks
                .iter()
                .map(|track| TrackSummary {
                    title: track.title.clone(),
                    artist: track.artist.clone(),
                    difficulty: track.difficulty,
                    length: track.length,
                })
                .collect(),
            selected: self.selected,
            status: self.status(),
            spectrum,
        }
    }
}
