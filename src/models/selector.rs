//! Fixed, ordered menus navigated with the lane keys.

use crate::input::events::MenuAction;

/// One menu line: a label and what `w`/space and `s` do on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry<A> {
    pub label: &'static str,
    pub primary: A,
    /// When `None`, `s` is left to the enclosing screen (usually "back").
    pub secondary: Option<A>,
}

impl<A> MenuEntry<A> {
    pub const fn new(label: &'static str, primary: A) -> Self {
        Self {
            label,
            primary,
            secondary: None,
        }
    }

    pub const fn with_secondary(label: &'static str, primary: A, secondary: A) -> Self {
        Self {
            label,
            primary,
            secondary: Some(secondary),
        }
    }
}

/// Result of feeding a key to a [`Selector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome<A> {
    /// The cursor moved.
    Moved,
    /// An entry action fired.
    Chosen(A),
    /// Not handled here; the caller decides.
    Unhandled,
}

/// Cursor over a fixed list of entries. Moving wraps around.
#[derive(Debug, Clone)]
pub struct Selector<A> {
    entries: Vec<MenuEntry<A>>,
    index: usize,
}

impl<A: Copy> Selector<A> {
    pub fn new(entries: Vec<MenuEntry<A>>) -> Self {
        Self { entries, index: 0 }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn selected(&self) -> usize {
        self.index
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.label).collect()
    }

    pub fn handle(&mut self, action: MenuAction) -> MenuOutcome<A> {
        let len = self.entries.len();
        if len == 0 {
            return MenuOutcome::Unhandled;
        }
        match action {
            MenuAction::Prev => {
                self.index = (self.index + len - 1) % len;
                MenuOutcome::Moved
            }
            MenuAction::Next => {
                self.index = (self.index + 1) % len;
                MenuOutcome::Moved
            }
            MenuAction::Primary => MenuOutcome::Chosen(self.entries[self.index].primary),
            MenuAction::Secondary => match self.entries[self.index].secondary {
                Some(action) => MenuOutcome::Chosen(action),
                None => MenuOutcome::Unhandled,
            },
        }
    }
}
