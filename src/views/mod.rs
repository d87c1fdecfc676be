//! Views: pure functions from snapshots to the character grid.

pub mod gameplay;
pub mod glyphs;
pub mod grid;
pub mod level_select;
pub mod menu;
pub mod overlay;
pub mod result;

use crate::shared::snapshot::{FrameSnapshot, RenderState};
use grid::Grid;

/// Redraws the whole grid for one frame.
pub fn draw_frame(grid: &mut Grid, frame: &FrameSnapshot) {
    grid.clear();
    match &frame.screen {
        RenderState::Loading => {
            let mut screen = grid.full();
            screen.border();
            screen.print(11, 35, "LOADING...");
        }
        RenderState::MainMenu(menu) => menu::draw(grid, menu),
        RenderState::LevelSelect(select) => level_select::draw(grid, select),
        RenderState::InGame(game) => gameplay::draw(grid, game),
    }

    if let Some(overlay) = &frame.overlay {
        overlay::draw(grid, overlay);
    }
}
