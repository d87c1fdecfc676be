//! Main menu view and the shared menu list widget.

use crate::shared::snapshot::MenuSnapshot;
use crate::views::glyphs::LOGO;
use crate::views::grid::{Grid, Region};

/// Cursor drawn in front of the selected entry.
pub const POINTER: &str = " > ";

/// Draws menu labels one per row, with the pointer on the selected one.
pub fn draw_menu(region: &mut Region, menu: &MenuSnapshot) {
    for (i, label) in menu.labels.iter().enumerate() {
        if i == menu.selected {
            region.print(i, 0, POINTER);
        }
        region.print(i, POINTER.len(), label);
    }
}

pub fn draw(grid: &mut Grid, menu: &MenuSnapshot) {
    let mut screen = grid.full();
    screen.border();
    screen.stamp(4, 9, &LOGO);
    screen.print(10, 9, "A RHYTHM GAME FOR THE TERMINAL");

    draw_menu(&mut screen.sub(12, 9, 17, 50), menu);

    screen.print(18, 9, "←→ select");
    screen.print(19, 9, "↑ enter");
}
