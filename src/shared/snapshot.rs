//! Render snapshots.
//!
//! Snapshots are immutable captures of state handed to the views each
//! frame. Views never touch live game state.

use crate::models::engine::NUM_LANES;
use crate::models::stats::{HitStats, ResultTier, Rgb};
use crate::state::game::VisibleNote;

/// What the current screen looks like.
#[derive(Clone, Debug)]
pub enum RenderState {
    /// Gameplay screen without a track yet.
    Loading,
    MainMenu(MenuSnapshot),
    LevelSelect(LevelSelectSnapshot),
    InGame(GameplaySnapshot),
}

/// A full frame: the screen plus an optional overlay drawn on top.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub screen: RenderState,
    pub overlay: Option<OverlaySnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub labels: Vec<&'static str>,
    pub selected: usize,
}

#[derive(Clone, Debug)]
pub enum OverlaySnapshot {
    Settings(SettingsSnapshot),
    Text(&'static str),
}

#[derive(Clone, Debug)]
pub struct SettingsSnapshot {
    pub menu: MenuSnapshot,
    pub fall_speed: u8,
    pub fps: u32,
    pub volume: u8,
}

/// One line of the track list.
#[derive(Clone, Debug)]
pub struct TrackSummary {
    pub title: String,
    pub artist: String,
    pub difficulty: u32,
    pub length: f64,
}

#[derive(Clone, Debug)]
pub struct LevelSelectSnapshot {
    pub tracks: Vec<TrackSummary>,
    pub selected: usize,
    /// Description, or the asset status when the track cannot be previewed.
    pub status: String,
    pub spectrum: Option<Vec<f32>>,
}

/// Pause or results panel.
#[derive(Clone, Debug)]
pub struct PauseSnapshot {
    /// Set once the track is finished.
    pub tier: Option<ResultTier>,
    pub menu: MenuSnapshot,
}

#[derive(Clone, Debug)]
pub struct GameplaySnapshot {
    pub title: String,
    pub artist: String,
    pub description: String,

    /// Audio position in seconds.
    pub position: f64,
    pub length: f64,

    pub score: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub accuracy: f64,
    pub hit_stats: HitStats,

    /// Transient judgement text and its color.
    pub message: Option<(&'static str, Rgb)>,
    /// Lanes pressed within the last flash period.
    pub lane_flash: [bool; NUM_LANES],
    pub notes: Vec<VisibleNote>,
    /// Countdown digit before playback starts.
    pub countdown: Option<u8>,
    pub spectrum: Option<Vec<f32>>,

    pub pause: Option<PauseSnapshot>,
}
