use crate::models::engine::Lane;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press decoded from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl RawInputEvent {
    /// Keeps key-down events only; repeats and releases are dropped.
    pub fn from_crossterm(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        Some(Self {
            code: event.code,
            modifiers: event.modifiers,
        })
    }

    pub fn char(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// Discrete input delivered to the active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// One of the four lane keys.
    Lane(Lane),
    /// Space bar: pause in gameplay, confirm in menus.
    Space,
    /// Leave the game immediately (Ctrl-C).
    Quit,
}

/// How menus interpret the lane keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Prev,
    Next,
    Primary,
    Secondary,
}

impl GameAction {
    /// Menu meaning of this action: `a`/`d` move, `w`/space enter, `s` back.
    pub fn menu(self) -> Option<MenuAction> {
        match self {
            GameAction::Lane(Lane::Left) => Some(MenuAction::Prev),
            GameAction::Lane(Lane::Right) => Some(MenuAction::Next),
            GameAction::Lane(Lane::Up) | GameAction::Space => Some(MenuAction::Primary),
            GameAction::Lane(Lane::Down) => Some(MenuAction::Secondary),
            GameAction::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_mapping() {
        assert_eq!(GameAction::Lane(Lane::Left).menu(), Some(MenuAction::Prev));
        assert_eq!(GameAction::Lane(Lane::Right).menu(), Some(MenuAction::Next));
        assert_eq!(GameAction::Lane(Lane::Up).menu(), Some(MenuAction::Primary));
        assert_eq!(GameAction::Space.menu(), Some(MenuAction::Primary));
        assert_eq!(GameAction::Lane(Lane::Down).menu(), Some(MenuAction::Secondary));
        assert_eq!(GameAction::Quit.menu(), None);
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(RawInputEvent::from_crossterm(&event).is_some());
        event.kind = KeyEventKind::Release;
        assert!(RawInputEvent::from_crossterm(&event).is_none());
    }
}
