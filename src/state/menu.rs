//! Main menu and the static text pages reachable from it.

use crate::input::events::GameAction;
use crate::models::selector::{MenuEntry, MenuOutcome, Selector};
use crate::shared::snapshot::MenuSnapshot;
use crate::state::traits::{ActionContext, HandleAction, Snapshot, Transition};

const ABOUT_TEXT: &str = "ABOUT

Lanefall is a four-lane rhythm game for the terminal.
Notes fall down four lanes; hit a, s, w or d as a note
crosses the line. Perfect hits score 20, good hits 15.

Tracks are plain text files in the tracks directory.
Each one names its audio file, a tempo and the notes.


[press any key to close]";

const CREDITS_TEXT: &str = "CREDITS

Game design and code: the Lanefall contributors.

Built on rodio for audio, crossterm for the terminal,
and the many people who make the Rust ecosystem.

Every track belongs to its artist.


[press any key to close]";

/// A static page shown over the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPage {
    About,
    Credits,
}

impl TextPage {
    pub fn text(self) -> &'static str {
        match self {
            TextPage::About => ABOUT_TEXT,
            TextPage::Credits => CREDITS_TEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Play,
    Settings,
    About,
    Credits,
    Quit,
}

pub struct MainMenu {
    selector: Selector<MainChoice>,
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            selector: Selector::new(vec![
                MenuEntry::new("PLAY", MainChoice::Play),
                MenuEntry::new("SETTINGS", MainChoice::Settings),
                MenuEntry::new("ABOUT", MainChoice::About),
                MenuEntry::new("CREDITS", MainChoice::Credits),
                MenuEntry::new("QUIT", MainChoice::Quit),
            ]),
        }
    }
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl HandleAction for MainMenu {
    fn handle_action(
        &mut self,
        action: GameAction,
        _ctx: &mut ActionContext,
    ) -> Option<Transition> {
        match self.selector.handle(action.menu()?) {
            MenuOutcome::Chosen(choice) => Some(match choice {
                MainChoice::Play => Transition::ToLevelSelect,
                MainChoice::Settings => Transition::OpenSettings,
                MainChoice::About => Transition::OpenText(TextPage::About),
                MainChoice::Credits => Transition::OpenText(TextPage::Credits),
                MainChoice::Quit => Transition::Exit,
            }),
            MenuOutcome::Moved | MenuOutcome::Unhandled => None,
        }
    }
}

impl Snapshot for MainMenu {
    type Output = MenuSnapshot;

    fn create_snapshot(&self) -> MenuSnapshot {
        MenuSnapshot {
            labels: self.selector.labels(),
            selected: self.selector.selected(),
        }
    }
}
