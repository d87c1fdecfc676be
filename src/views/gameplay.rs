//! Gameplay rendering view.

use crate::models::engine::Lane;
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::game::VisibleNote;
use crate::views::glyphs::{self, BLOCKS};
use crate::views::grid::{BRIGHT_FG, DEFAULT_FG, Grid, Region, format_time};
use crate::views::result;

/// Row of the judgment line.
const LINE_ROW: usize = 19;
/// Row where the receptor arrows start.
const RECEPTOR_ROW: usize = 20;
/// First row below the HUD bar.
const FIELD_TOP: usize = 3;
const FIELD_BOTTOM: usize = 23;

/// Spectrum bins drawn beside the upper playfield; the rest go below the line.
const UPPER_BINS: usize = 15;
const BAR_LEFT: usize = 2;
const BAR_RIGHT: usize = 77;

/// Screen column of a lane's track.
pub fn lane_column(lane: Lane) -> usize {
    16 + 16 * lane.index()
}

pub fn draw(grid: &mut Grid, snap: &GameplaySnapshot) {
    let mut screen = grid.full();
    screen.border();

    draw_stats_bar(&mut screen, snap);

    screen.hline(LINE_ROW, 1, screen.cols() - 1, '-');
    for lane in Lane::ALL {
        draw_lane(&mut screen, lane, snap.lane_flash[lane.index()]);
    }
    for note in &snap.notes {
        draw_note(&mut screen, note);
    }

    if let Some(lines) = snap.countdown.and_then(glyphs::digit) {
        screen.stamp(4, 38, lines);
    }

    if let Some(frame) = &snap.spectrum {
        draw_spectrum(&mut screen, frame);
    }

    let time = format!(
        "{:>5} / {:>5}",
        format_time(snap.position),
        format_time(snap.length)
    );
    screen.print(3, 2, &time);

    if let Some(pause) = &snap.pause {
        result::draw(grid, snap, pause);
    }
}

fn draw_stats_bar(screen: &mut Region, snap: &GameplaySnapshot) {
    let cols = screen.cols();
    screen.sub(0, 0, 3, cols).border();
    screen.print(1, 2, &format!("{} | {}", snap.title, snap.artist));
    screen.print(1, 30, &format!("SCORE: {}", snap.score));
    screen.print(1, 44, &format!("COMBO: {}", snap.combo));
    screen.print(1, 58, &format!("ACC: {:>6.2}%", snap.accuracy * 100.0));
    if let Some((text, color)) = snap.message {
        screen.print_colored(1, 71, text, color);
    }
}

fn draw_lane(screen: &mut Region, lane: Lane, flash: bool) {
    let col = lane_column(lane);
    screen.vline(col, FIELD_TOP, LINE_ROW, '|');
    screen.set(LINE_ROW, col, '*');
    screen.stamp(RECEPTOR_ROW, col - 2, &glyphs::arrow(lane));
    let fg = if flash { BRIGHT_FG } else { DEFAULT_FG };
    screen.tint(RECEPTOR_ROW, col - 2, FIELD_BOTTOM, col + 2, fg);
}

/// Draws a note with eighth-cell precision.
///
/// The note occupies the lower part of its row and, when it sits between
/// rows, the upper part of the next one (drawn with swapped colors).
fn draw_note(screen: &mut Region, note: &VisibleNote) {
    if note.row < 0.0 {
        return;
    }
    let col = lane_column(note.lane);
    let color = note.judgement.color();
    let row = note.row.floor() as usize;
    let eighths = ((note.row - row as f64) * 8.0) as usize;
    let ch = BLOCKS[8 - eighths.min(8)];

    if (FIELD_TOP..FIELD_BOTTOM).contains(&row) {
        screen.set_colored(row, col, ch, color);
    }
    if eighths > 0
        && (FIELD_TOP - 1..FIELD_BOTTOM - 1).contains(&row)
        && let Some(cell) = screen.cell_mut(row + 1, col)
    {
        cell.fg = cell.bg;
        cell.bg = color;
        cell.ch = ch;
    }
}

fn draw_spectrum(screen: &mut Region, frame: &[f32]) {
    for (i, &level) in frame.iter().enumerate() {
        let row = if i < UPPER_BINS {
            4 + i
        } else {
            RECEPTOR_ROW + i - UPPER_BINS
        };
        let width = bar_width(level);
        screen.hline(row, BAR_LEFT, BAR_LEFT + width, '#');
        screen.hline(row, BAR_RIGHT - width, BAR_RIGHT, '#');
    }
}

/// Length of a spectrum bar for a level in `[0, 1]`.
pub fn bar_width(level: f32) -> usize {
    (12.0 * level.clamp(0.0, 1.0).powf(1.5)) as usize
}
