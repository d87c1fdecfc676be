//! Input handling for GameSession - lane presses, pause and menu choices

use super::{GameSession, HIT_MESSAGE_S, Phase};
use crate::input::events::{GameAction, MenuAction};
use crate::models::engine::Lane;
use crate::models::selector::MenuOutcome;
use crate::models::stats::Judgement;
use crate::state::traits::{ActionContext, HandleAction, Transition};

/// How long a lane receptor flashes after a press, in audio seconds.
const LANE_FLASH_S: f64 = 0.3;

/// Entries of the pause and results menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseChoice {
    Resume,
    Restart,
    Settings,
    Quit,
}

impl GameSession {
    fn press_lane(&mut self, lane: Lane, ctx: &mut ActionContext) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let t = ctx.audio.position_seconds();
        self.highlight_until[lane.index()] = t + LANE_FLASH_S;

        let judgement = engine.hit(lane, t);
        if judgement != Judgement::Open {
            self.set_message(judgement.label(), judgement.color(), HIT_MESSAGE_S, t);
        }
    }

    fn choose(&mut self, choice: PauseChoice, ctx: &mut ActionContext) -> Option<Transition> {
        match choice {
            PauseChoice::Resume => {
                self.start_play(ctx.now);
                None
            }
            PauseChoice::Restart => {
                self.restart_play(ctx.audio, ctx.now);
                None
            }
            PauseChoice::Settings => Some(Transition::OpenSettings),
            PauseChoice::Quit => Some(self.close(ctx.audio)),
        }
    }

    fn handle_menu(&mut self, action: MenuAction, ctx: &mut ActionContext) -> Option<Transition> {
        let finished = self.phase == Phase::Finished;
        let menu = if finished {
            &mut self.results_menu
        } else {
            &mut self.pause_menu
        };

        match menu.handle(action) {
            MenuOutcome::Chosen(choice) => self.choose(choice, ctx),
            MenuOutcome::Moved => None,
            // `s` on the pause menu resumes.
            MenuOutcome::Unhandled if action == MenuAction::Secondary && !finished => {
                self.start_play(ctx.now);
                None
            }
            MenuOutcome::Unhandled => None,
        }
    }

    /// Selected entry and labels of the active pause/results menu.
    pub(super) fn active_menu(&self) -> (usize, Vec<&'static str>) {
        let menu = if self.phase == Phase::Finished {
            &self.results_menu
        } else {
            &self.pause_menu
        };
        (menu.selected(), menu.labels())
    }
}

impl HandleAction for GameSession {
    fn handle_action(
        &mut self,
        action: GameAction,
        ctx: &mut ActionContext,
    ) -> Option<Transition> {
        match self.phase {
            Phase::Loading => None,
            // The audio clock is frozen until the countdown ends.
            Phase::Countdown => {
                if action == GameAction::Space {
                    self.stop_play(ctx.audio);
                }
                None
            }
            Phase::Playing => {
                match action {
                    GameAction::Space => self.stop_play(ctx.audio),
                    GameAction::Lane(lane) => self.press_lane(lane, ctx),
                    GameAction::Quit => {}
                }
                None
            }
            Phase::Paused | Phase::Finished => {
                let menu_action = action.menu()?;
                self.handle_menu(menu_action, ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{loaded_session, tick};
    use super::super::{COUNTDOWN, GameSession};
    use super::*;
    use crate::logic::audio::testing::FakeAudio;
    use crate::models::settings::SettingsState;
    use std::time::Instant;

    fn press(
        session: &mut GameSession,
        audio: &mut FakeAudio,
        settings: &SettingsState,
        action: GameAction,
        now: Instant,
    ) -> Option<Transition> {
        let mut ctx = ActionContext {
            settings,
            audio,
            now,
        };
        session.handle_action(action, &mut ctx)
    }

    /// A session that is playing, with the audio clock at zero.
    fn playing(audio: &mut FakeAudio, settings: &SettingsState) -> (GameSession, Instant) {
        let start = Instant::now();
        let mut session = loaded_session(audio, start);
        let now = start + COUNTDOWN;
        tick(&mut session, audio, settings, now);
        (session, now)
    }

    #[test]
    fn lane_press_judges_and_flashes() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        audio.advance(1.05);
        press(&mut session, &mut audio, &settings, GameAction::Lane(Lane::Left), now);

        let engine = session.engine().unwrap();
        assert_eq!(engine.score, 20);
        let message = session.message().copied().unwrap();
        assert_eq!(message.text, "PERFECT");
        assert!((message.expires_at - (1.05 + HIT_MESSAGE_S)).abs() < 1e-9);
        assert!((session.highlight_until[Lane::Left.index()] - 1.35).abs() < 1e-9);
    }

    #[test]
    fn whiff_shows_no_message() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        press(&mut session, &mut audio, &settings, GameAction::Lane(Lane::Up), now);
        assert!(session.message().is_none());
        assert!(session.highlight_until[Lane::Up.index()] > 0.0);
    }

    #[test]
    fn space_pauses_and_menu_resumes() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Paused);
        assert!(!audio.playing);
        assert_eq!(session.active_menu().1, vec!["Resume", "Restart", "Settings", "Quit"]);

        // First entry is Resume.
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Countdown);
        assert_eq!(session.countdown_digit(), Some(3));
    }

    #[test]
    fn lane_presses_ignored_during_resume_countdown() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        audio.advance(0.95);
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Countdown);

        press(&mut session, &mut audio, &settings, GameAction::Lane(Lane::Left), now);
        let engine = session.engine().unwrap();
        assert_eq!(engine.score, 0);
        assert_eq!(engine.next_index(Lane::Left), 0);
        assert_eq!(engine.hit_stats.total_judged(), 0);
        assert!(session.message().is_none());
        assert!(session.highlight_until.iter().all(|&t| t == f64::NEG_INFINITY));

        // Space still pauses during the countdown.
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Paused);
    }

    #[test]
    fn s_resumes_from_pause() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        session.stop_play(&mut audio);
        press(&mut session, &mut audio, &settings, GameAction::Lane(Lane::Down), now);
        assert_eq!(session.phase(), Phase::Countdown);
    }

    #[test]
    fn pause_menu_settings_and_quit() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);
        session.stop_play(&mut audio);

        let next = GameAction::Lane(Lane::Right);
        press(&mut session, &mut audio, &settings, next, now);
        press(&mut session, &mut audio, &settings, next, now);
        assert!(matches!(
            press(&mut session, &mut audio, &settings, GameAction::Space, now),
            Some(Transition::OpenSettings)
        ));

        press(&mut session, &mut audio, &settings, next, now);
        assert!(matches!(
            press(&mut session, &mut audio, &settings, GameAction::Space, now),
            Some(Transition::ToLevelSelect)
        ));
        assert_eq!(audio.log.last().map(String::as_str), Some("stop"));
    }

    #[test]
    fn space_on_the_final_frame_shows_results() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        audio.advance(3.1);
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.active_menu().1, vec!["Restart", "Settings", "Quit"]);
    }

    #[test]
    fn results_menu_has_no_resume() {
        let mut audio = FakeAudio::new();
        let settings = SettingsState::default();
        let (mut session, now) = playing(&mut audio, &settings);

        audio.advance(3.0);
        tick(&mut session, &mut audio, &settings, now);
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.active_menu().1, vec!["Restart", "Settings", "Quit"]);

        // `s` does nothing once finished.
        press(&mut session, &mut audio, &settings, GameAction::Lane(Lane::Down), now);
        assert_eq!(session.phase(), Phase::Finished);

        // Restart goes back to the countdown with a fresh engine.
        press(&mut session, &mut audio, &settings, GameAction::Space, now);
        assert_eq!(session.phase(), Phase::Countdown);
        assert_eq!(session.engine().unwrap().score, 0);
    }
}
