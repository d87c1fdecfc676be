//! Global state management for the screen state machine.

mod app_state;

use app_state::AppState;

use crate::input::events::GameAction;
use crate::logic::audio::AudioPlayer;
use crate::models::settings::SettingsState;
use crate::shared::snapshot::{FrameSnapshot, RenderState};
use crate::state::level_select::LevelSelect;
use crate::state::menu::MainMenu;
use crate::state::overlay::Overlay;
use crate::state::session::GameSession;
use crate::state::traits::{
    ActionContext, HandleAction, Snapshot, Transition, Update, UpdateContext,
};
use std::path::PathBuf;
use std::time::Instant;

/// Owns the screens, the settings and the playback handle.
///
/// Playback moves between screens only through transitions: the level
/// select preview is stopped before a session loads its track, and the
/// session stops playback before handing back to level select.
pub struct GlobalState<A: AudioPlayer> {
    current_state: AppState,
    level_select: LevelSelect,
    overlay: Option<Overlay>,
    settings: SettingsState,
    settings_path: PathBuf,
    audio: A,
    running: bool,
}

impl<A: AudioPlayer> GlobalState<A> {
    pub fn new(audio: A, settings: SettingsState, settings_path: PathBuf) -> Self {
        log::info!("LOGIC: Initializing Global State");
        Self {
            current_state: AppState::MainMenu(MainMenu::new()),
            level_select: LevelSelect::new(),
            overlay: None,
            settings,
            settings_path,
            audio,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frame rate cap from the settings.
    pub fn fps(&self) -> u32 {
        self.settings.fps
    }

    pub fn settings(&self) -> &SettingsState {
        &self.settings
    }

    pub fn shutdown(&mut self) {
        self.audio.stop();
        self.running = false;
    }

    /// Ticks the active screen.
    pub fn update(&mut self, now: Instant) {
        let mut ctx = UpdateContext {
            settings: &self.settings,
            audio: &mut self.audio,
            now,
        };

        let transition = match &mut self.current_state {
            AppState::MainMenu(_) => {
                self.level_select.poll_assets();
                None
            }
            AppState::LevelSelect => self.level_select.update(&mut ctx),
            AppState::Game(session) => {
                self.level_select.poll_assets();
                session.update(&mut ctx)
            }
        };

        if let Some(transition) = transition {
            self.apply(transition, now);
        }
    }

    /// Routes an action to the overlay, if any, else to the active screen.
    pub fn handle_action(&mut self, action: GameAction, now: Instant) {
        if action == GameAction::Quit {
            log::info!("LOGIC: Quit requested");
            self.shutdown();
            return;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.handle(action, &mut self.settings) {
                if overlay.is_settings() {
                    self.settings.save_to(&self.settings_path);
                }
                self.overlay = None;
            }
            return;
        }

        let mut ctx = ActionContext {
            settings: &self.settings,
            audio: &mut self.audio,
            now,
        };

        let transition = match &mut self.current_state {
            AppState::MainMenu(menu) => menu.handle_action(action, &mut ctx),
            AppState::LevelSelect => self.level_select.handle_action(action, &mut ctx),
            AppState::Game(session) => session.handle_action(action, &mut ctx),
        };

        if let Some(transition) = transition {
            self.apply(transition, now);
        }
    }

    fn apply(&mut self, transition: Transition, now: Instant) {
        match transition {
            Transition::ToMainMenu => {
                self.current_state = AppState::MainMenu(MainMenu::new());
            }
            Transition::ToLevelSelect => {
                self.level_select.enter(&self.settings, &mut self.audio);
                self.current_state = AppState::LevelSelect;
            }
            Transition::ToGame(track) => {
                let mut session = GameSession::new(now);
                session.load_track(track, &mut self.audio, now);
                self.current_state = AppState::Game(session);
            }
            Transition::OpenSettings => self.overlay = Some(Overlay::settings()),
            Transition::OpenText(page) => self.overlay = Some(Overlay::Text(page)),
            Transition::Exit => self.shutdown(),
        }
    }
}

impl<A: AudioPlayer> Snapshot for GlobalState<A> {
    type Output = FrameSnapshot;

    fn create_snapshot(&self) -> FrameSnapshot {
        let screen = match &self.current_state {
            AppState::MainMenu(menu) => RenderState::MainMenu(menu.create_snapshot()),
            AppState::LevelSelect => RenderState::LevelSelect(self.level_select.create_snapshot()),
            AppState::Game(session) => session
                .create_snapshot()
                .map_or(RenderState::Loading, RenderState::InGame),
        };

        FrameSnapshot {
            screen,
            overlay: self
                .overlay
                .as_ref()
                .map(|overlay| overlay.create_snapshot(&self.settings)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::audio::testing::FakeAudio;
    use crate::models::engine::Lane;
    use crate::state::session::{COUNTDOWN, Phase};
    use crate::shared::snapshot::OverlaySnapshot;
    use std::fs;
    use std::path::Path;

    const CONFIRM: GameAction = GameAction::Space;
    const NEXT: GameAction = GameAction::Lane(Lane::Right);
    const BACK: GameAction = GameAction::Lane(Lane::Down);

    fn state(dir: &Path) -> GlobalState<FakeAudio> {
        let settings = SettingsState {
            tracks_dir: dir.join("tracks"),
            ..SettingsState::default()
        };
        GlobalState::new(FakeAudio::new(), settings, dir.join("settings.toml"))
    }

    fn write_track(dir: &Path) {
        let tracks = dir.join("tracks");
        fs::create_dir_all(&tracks).unwrap();
        fs::write(tracks.join("song.ogg"), b"fake").unwrap();
        fs::write(
            tracks.join("demo.lkr"),
            "0 title Demo\n0 audio song.ogg\n0 preview 0 2\n1 note a\n1 note s\n",
        )
        .unwrap();
    }

    fn game_phase(state: &GlobalState<FakeAudio>) -> Option<Phase> {
        match &state.current_state {
            AppState::Game(session) => Some(session.phase()),
            _ => None,
        }
    }

    #[test]
    fn play_from_main_menu_through_level_select() {
        let dir = tempfile::tempdir().unwrap();
        write_track(dir.path());
        let mut state = state(dir.path());
        let now = Instant::now();

        state.handle_action(CONFIRM, now);
        let frame = state.create_snapshot();
        let RenderState::LevelSelect(select) = frame.screen else {
            panic!("expected level select");
        };
        assert_eq!(select.tracks.len(), 1);
        assert!(state.audio.playing);

        state.handle_action(CONFIRM, now);
        assert_eq!(game_phase(&state), Some(Phase::Countdown));
        assert!(!state.audio.playing);
        assert!(
            state
                .audio
                .loaded
                .as_ref()
                .is_some_and(|p| p.ends_with("song.ogg"))
        );

        state.update(now + COUNTDOWN);
        assert_eq!(game_phase(&state), Some(Phase::Playing));
        assert!(matches!(
            state.create_snapshot().screen,
            RenderState::InGame(_)
        ));
    }

    #[test]
    fn quitting_a_session_returns_to_level_select() {
        let dir = tempfile::tempdir().unwrap();
        write_track(dir.path());
        let mut state = state(dir.path());
        let now = Instant::now();
        state.handle_action(CONFIRM, now);
        state.handle_action(CONFIRM, now);
        state.update(now + COUNTDOWN);

        // Pause, then pick Quit (last entry of the pause menu).
        state.handle_action(CONFIRM, now);
        assert_eq!(game_phase(&state), Some(Phase::Paused));
        state.handle_action(GameAction::Lane(Lane::Left), now);
        state.handle_action(CONFIRM, now);

        assert!(matches!(state.current_state, AppState::LevelSelect));
        // Preview restarted after the session released playback.
        let log = &state.audio.log;
        let stop = log.iter().rposition(|l| l == "stop").unwrap();
        assert!(log[stop + 1..].iter().any(|l| l.starts_with("seek")));
    }

    #[test]
    fn settings_overlay_edits_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(dir.path());
        let now = Instant::now();

        state.handle_action(NEXT, now);
        state.handle_action(CONFIRM, now);
        assert!(matches!(
            state.create_snapshot().overlay,
            Some(OverlaySnapshot::Settings(_))
        ));

        // Fall speed up, then move to Back and close.
        state.handle_action(CONFIRM, now);
        state.handle_action(GameAction::Lane(Lane::Left), now);
        state.handle_action(CONFIRM, now);

        assert!(state.create_snapshot().overlay.is_none());
        assert_eq!(state.settings().fall_speed, 11);
        let saved = SettingsState::load_from(&dir.path().join("settings.toml"));
        assert_eq!(saved.fall_speed, 11);
    }

    #[test]
    fn text_page_blocks_menu_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(dir.path());
        let now = Instant::now();

        state.handle_action(NEXT, now);
        state.handle_action(NEXT, now);
        state.handle_action(NEXT, now);
        state.handle_action(CONFIRM, now);
        assert!(matches!(
            state.create_snapshot().overlay,
            Some(OverlaySnapshot::Text(text)) if text.starts_with("CREDITS")
        ));

        state.handle_action(BACK, now);
        let frame = state.create_snapshot();
        assert!(frame.overlay.is_none());
        let RenderState::MainMenu(menu) = frame.screen else {
            panic!("expected main menu");
        };
        assert_eq!(menu.selected, 3);
    }

    #[test]
    fn quit_action_and_quit_entry_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state(dir.path());
        state.handle_action(GameAction::Quit, Instant::now());
        assert!(!state.is_running());

        let mut state = self::state(dir.path());
        let now = Instant::now();
        state.handle_action(GameAction::Lane(Lane::Left), now);
        state.handle_action(CONFIRM, now);
        assert!(!state.is_running());
    }
}
