//! Pages drawn over the current screen: settings and static text.

use crate::input::events::GameAction;
use crate::models::selector::{MenuEntry, MenuOutcome, Selector};
use crate::models::settings::SettingsState;
use crate::shared::snapshot::{MenuSnapshot, OverlaySnapshot, SettingsSnapshot};
use crate::state::menu::TextPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingChoice {
    FallSpeedUp,
    FallSpeedDown,
    FpsUp,
    FpsDown,
    VolumeUp,
    VolumeDown,
    Back,
}

/// Settings page. `w`/space raises the selected value, `s` lowers it.
pub struct SettingsMenu {
    selector: Selector<SettingChoice>,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self {
            selector: Selector::new(vec![
                MenuEntry::with_secondary(
                    "Fall speed:",
                    SettingChoice::FallSpeedUp,
                    SettingChoice::FallSpeedDown,
                ),
                MenuEntry::with_secondary("FPS:", SettingChoice::FpsUp, SettingChoice::FpsDown),
                MenuEntry::with_secondary(
                    "Volume:",
                    SettingChoice::VolumeUp,
                    SettingChoice::VolumeDown,
                ),
                MenuEntry::new("Back", SettingChoice::Back),
            ]),
        }
    }

    /// Applies a key to `settings`. Returns `true` when the page closes.
    fn handle(&mut self, action: GameAction, settings: &mut SettingsState) -> bool {
        let Some(action) = action.menu() else {
            return false;
        };
        match self.selector.handle(action) {
            MenuOutcome::Chosen(choice) => {
                match choice {
                    SettingChoice::FallSpeedUp => settings.fall_speed_up(),
                    SettingChoice::FallSpeedDown => settings.fall_speed_down(),
                    SettingChoice::FpsUp => settings.fps_up(),
                    SettingChoice::FpsDown => settings.fps_down(),
                    SettingChoice::VolumeUp => settings.volume_up(),
                    SettingChoice::VolumeDown => settings.volume_down(),
                    SettingChoice::Back => return true,
                }
                false
            }
            MenuOutcome::Moved => false,
            // `s` on Back.
            MenuOutcome::Unhandled => true,
        }
    }

    fn create_snapshot(&self, settings: &SettingsState) -> SettingsSnapshot {
        SettingsSnapshot {
            menu: MenuSnapshot {
                labels: self.selector.labels(),
                selected: self.selector.selected(),
            },
            fall_speed: settings.fall_speed,
            fps: settings.fps,
            volume: settings.volume,
        }
    }
}

impl Default for SettingsMenu {
    fn default() -> Self {
        Self::new()
    }
}

pub enum Overlay {
    Settings(SettingsMenu),
    Text(TextPage),
}

impl Overlay {
    pub fn settings() -> Self {
        Overlay::Settings(SettingsMenu::new())
    }

    /// Feeds a key to the overlay. Returns `true` when it closes.
    pub fn handle(&mut self, action: GameAction, settings: &mut SettingsState) -> bool {
        match self {
            Overlay::Settings(menu) => menu.handle(action, settings),
            // Any lane key or space closes a text page.
            Overlay::Text(_) => action != GameAction::Quit,
        }
    }

    pub fn is_settings(&self) -> bool {
        matches!(self, Overlay::Settings(_))
    }

    pub fn create_snapshot(&self, settings: &SettingsState) -> OverlaySnapshot {
        match self {
            Overlay::Settings(menu) => OverlaySnapshot::Settings(menu.create_snapshot(settings)),
            Overlay::Text(page) => OverlaySnapshot::Text(page.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::Lane;

    const UP: GameAction = GameAction::Space;
    const DOWN: GameAction = GameAction::Lane(Lane::Down);
    const NEXT: GameAction = GameAction::Lane(Lane::Right);

    #[test]
    fn settings_page_edits_values() {
        let mut settings = SettingsState::default();
        let mut overlay = Overlay::settings();

        assert!(!overlay.handle(UP, &mut settings));
        assert_eq!(settings.fall_speed, 11);
        assert!(!overlay.handle(DOWN, &mut settings));
        assert!(!overlay.handle(DOWN, &mut settings));
        assert_eq!(settings.fall_speed, 9);

        overlay.handle(NEXT, &mut settings);
        overlay.handle(UP, &mut settings);
        assert_eq!(settings.fps, 120);

        overlay.handle(NEXT, &mut settings);
        overlay.handle(DOWN, &mut settings);
        assert_eq!(settings.volume, 90);

        let OverlaySnapshot::Settings(snap) = overlay.create_snapshot(&settings) else {
            panic!("expected settings snapshot");
        };
        assert_eq!(snap.menu.selected, 2);
        assert_eq!((snap.fall_speed, snap.fps, snap.volume), (9, 120, 90));
    }

    #[test]
    fn back_closes_with_either_key() {
        let mut settings = SettingsState::default();
        let mut overlay = Overlay::settings();
        overlay.handle(GameAction::Lane(Lane::Left), &mut settings);
        assert!(overlay.handle(UP, &mut settings));

        let mut overlay = Overlay::settings();
        overlay.handle(GameAction::Lane(Lane::Left), &mut settings);
        assert!(overlay.handle(DOWN, &mut settings));
        assert_eq!(settings, SettingsState::default());
    }

    #[test]
    fn text_page_closes_on_any_key() {
        let mut settings = SettingsState::default();
        for action in [UP, DOWN, NEXT, GameAction::Lane(Lane::Up)] {
            let mut overlay = Overlay::Text(TextPage::Credits);
            assert!(overlay.handle(action, &mut settings));
        }
        let mut overlay = Overlay::Text(TextPage::About);
        assert!(!overlay.handle(GameAction::Quit, &mut settings));
        assert!(matches!(
            overlay.create_snapshot(&settings),
            OverlaySnapshot::Text(text) if text.starts_with("ABOUT")
        ));
    }
}
