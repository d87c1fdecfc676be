use super::events::{GameAction, RawInputEvent};
use crate::models::engine::Lane;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Maps decoded key presses to game actions.
pub struct InputManager {
    bindings: HashMap<KeyCode, GameAction>,
}

impl InputManager {
    pub fn new() -> Self {
        let mut manager = Self {
            bindings: HashMap::new(),
        };
        manager.load_default_bindings();
        manager
    }

    pub fn process(&self, event: RawInputEvent) -> Option<GameAction> {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
                _ => None,
            };
        }

        // Shift or caps lock should not change which lane is hit.
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings.get(&code).copied()
    }

    fn load_default_bindings(&mut self) {
        for lane in Lane::ALL {
            self.bindings
                .insert(KeyCode::Char(lane.key()), GameAction::Lane(lane));
        }
        self.bindings.insert(KeyCode::Char(' '), GameAction::Space);

        // Arrow keys mirror the lanes.
        self.bindings.insert(KeyCode::Left, GameAction::Lane(Lane::Left));
        self.bindings.insert(KeyCode::Down, GameAction::Lane(Lane::Down));
        self.bindings.insert(KeyCode::Up, GameAction::Lane(Lane::Up));
        self.bindings.insert(KeyCode::Right, GameAction::Lane(Lane::Right));
        self.bindings.insert(KeyCode::Enter, GameAction::Space);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
