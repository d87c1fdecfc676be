//! Settings page and text pages drawn on top of the current screen.

use crate::shared::snapshot::{OverlaySnapshot, SettingsSnapshot};
use crate::views::grid::Grid;
use crate::views::menu::draw_menu;

pub fn draw(grid: &mut Grid, overlay: &OverlaySnapshot) {
    match overlay {
        OverlaySnapshot::Settings(settings) => draw_settings(grid, settings),
        OverlaySnapshot::Text(text) => draw_text(grid, text),
    }
}

fn draw_settings(grid: &mut Grid, snap: &SettingsSnapshot) {
    let mut panel = grid.region(4, 19, 18, 62);
    panel.border();
    panel.print(1, 3, "SETTINGS");

    draw_menu(&mut panel.sub(3, 3, 7, 20), &snap.menu);

    // Fall speed is shown as a percentage of the default.
    panel.print(3, 18, &format!("{}0%", snap.fall_speed));
    panel.print(4, 11, &snap.fps.to_string());
    panel.print(5, 14, &format!("{}%", snap.volume));

    panel.print(8, 3, "←→ select");
    panel.print(9, 3, "↑↓ edit");
}

fn draw_text(grid: &mut Grid, text: &str) {
    let mut panel = grid.region(2, 4, 22, 76);
    panel.border();
    for (i, line) in text.lines().enumerate() {
        panel.print(i + 1, 2, line);
    }
}
