//! Track select view: track list on the left, details and preview on the right.

use crate::shared::snapshot::LevelSelectSnapshot;
use crate::views::gameplay::bar_width;
use crate::views::glyphs::RECORD;
use crate::views::grid::{Grid, format_time, wrap};

const LIST_FIRST_ROW: usize = 3;
/// Entries shown at once; the list scrolls to keep the selection visible.
const LIST_ROWS: usize = 12;
const STATUS_WIDTH: usize = 21;
/// Difficulty stars are capped so the line stays inside the panel.
const MAX_STARS: u32 = 10;

pub fn draw(grid: &mut Grid, snap: &LevelSelectSnapshot) {
    grid.full().border();

    {
        let mut left = grid.region(2, 4, 22, 34);
        left.border();
        left.print(1, 2, "SELECT TRACK");

        let first = snap.selected.saturating_sub(LIST_ROWS - 1);
        for (i, track) in snap.tracks.iter().skip(first).take(LIST_ROWS).enumerate() {
            left.print(LIST_FIRST_ROW + i, 4, &track.title);
        }
        if !snap.tracks.is_empty() {
            left.print(LIST_FIRST_ROW + snap.selected - first, 2, ">");
        }

        left.print(16, 2, "←→ select");
        left.print(17, 2, "↑ enter");
        left.print(18, 2, "↓ back");
    }

    let mut right = grid.region(2, 33, 22, 76);
    right.border();
    right.stamp(1, 5, &RECORD);

    if let Some(track) = snap.tracks.get(snap.selected) {
        right.print(5, 14, &track.title);
        right.print(6, 14, &track.artist);
        let stars = "★".repeat(track.difficulty.min(MAX_STARS) as usize);
        right.print(7, 14, &format!("{:<3} | {}", stars, format_time(track.length)));
    }

    for (i, line) in wrap(&snap.status, STATUS_WIDTH).iter().enumerate() {
        right.print(12 + i, 14, line);
    }

    if let Some(frame) = &snap.spectrum {
        for (i, &level) in frame.iter().enumerate() {
            right.hline(i + 1, 2, 2 + bar_width(level), '#');
        }
    }
}
