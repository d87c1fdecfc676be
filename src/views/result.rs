//! Pause and results panel drawn over gameplay.

use crate::shared::snapshot::{GameplaySnapshot, PauseSnapshot};
use crate::views::grid::{Grid, wrap};
use crate::views::menu::draw_menu;

/// Panel bounds on the screen: rows 4..18, columns 19..62.
const PANEL: (usize, usize, usize, usize) = (4, 19, 18, 62);
const DESCRIPTION_WIDTH: usize = 23;
const DESCRIPTION_LINES: usize = 3;

pub fn draw(grid: &mut Grid, snap: &GameplaySnapshot, pause: &PauseSnapshot) {
    let (top, left, bottom, right) = PANEL;
    let mut panel = grid.region(top, left, bottom, right);
    panel.border();

    let heading = pause.tier.map_or("PAUSED", |tier| tier.label());
    panel.print(1, 3, heading);

    draw_menu(&mut panel.sub(3, 2, 7, 14), &pause.menu);

    panel.print(8, 3, "←→ select");
    panel.print(9, 3, "↑ enter");
    panel.print(10, 3, "↓ back");

    let mut stats = panel.sub(0, 15, 14, 44);
    stats.border();
    stats.print(1, 3, &format!("{} | {}", snap.title, snap.artist));
    for (i, line) in wrap(&snap.description, DESCRIPTION_WIDTH)
        .iter()
        .take(DESCRIPTION_LINES)
        .enumerate()
    {
        stats.print(2 + i, 3, line);
    }
    stats.print(5, 3, &format!("SCORE: {}", snap.score));
    stats.print(6, 3, &format!("COMBO: {}", snap.combo));
    stats.print(7, 3, &format!("BEST COMBO: {}", snap.best_combo));
    stats.print(8, 3, &format!("ACCURACY: {:>6.2}%", snap.accuracy * 100.0));

    let hits = &snap.hit_stats;
    stats.print(10, 3, &format!("PERFECT: {}", hits.perfect));
    stats.print(11, 3, &format!("GOOD: {}", hits.good));
    // Misses count as failures on this panel.
    stats.print(12, 3, &format!("FAILED: {}", hits.failed + hits.missed));
}
