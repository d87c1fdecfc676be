//! Application state enum for the state machine.

use crate::state::menu::MainMenu;
use crate::state::session::GameSession;

/// Screens driven by `GlobalState`.
pub(super) enum AppState {
    MainMenu(MainMenu),
    /// The level select screen itself lives in `GlobalState` so its track
    /// list and background work survive a round trip through gameplay.
    LevelSelect,
    Game(GameSession),
}
