//! Traits for state management.
//!
//! These traits define the common interface for all screens.

use crate::input::events::GameAction;
use crate::logic::audio::AudioPlayer;
use crate::models::settings::SettingsState;
use crate::models::track::Track;
use crate::state::menu::TextPage;
use std::sync::Arc;
use std::time::Instant;

/// Context passed to update methods with shared resources.
pub struct UpdateContext<'a> {
    pub settings: &'a SettingsState,
    /// The one playback handle; whoever holds the context owns playback.
    pub audio: &'a mut dyn AudioPlayer,
    /// Wall-clock time of this tick.
    pub now: Instant,
}

/// Context passed to action handlers with shared resources.
pub struct ActionContext<'a> {
    pub settings: &'a SettingsState,
    pub audio: &'a mut dyn AudioPlayer,
    pub now: Instant,
}

/// Screen change requested by a state.
#[derive(Debug, Clone)]
pub enum Transition {
    ToMainMenu,
    ToLevelSelect,
    /// Start playing a track. Playback ownership moves to the session.
    ToGame(Arc<Track>),
    /// Open the settings overlay on top of the current screen.
    OpenSettings,
    /// Open a text page overlay.
    OpenText(TextPage),
    /// Exit the application.
    Exit,
}

/// Trait for creating render-ready snapshots.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    fn create_snapshot(&self) -> Self::Output;
}

/// Trait for per-frame updates.
pub trait Update {
    /// Updates the state for one frame and returns any transition.
    fn update(&mut self, ctx: &mut UpdateContext) -> Option<Transition>;
}

/// Trait for handling game actions.
pub trait HandleAction {
    fn handle_action(&mut self, action: GameAction, ctx: &mut ActionContext)
    -> Option<Transition>;
}
