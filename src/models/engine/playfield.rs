//! Playfield layout and the time-to-row projection of falling notes.

use crate::models::stats::Judgement;

/// Rows (in grid cells) that define where notes travel.
#[derive(Debug, Clone, Copy)]
pub struct PlayfieldConfig {
    /// Row of the judgment line; a note sits here exactly on time.
    pub anchor_row: f64,
    /// Notes at or above this row are not drawn.
    pub top_row: f64,
    /// Notes at or below this row are not drawn.
    pub bottom_row: f64,
    /// How long a judged note stays pinned on the anchor row.
    pub flash_s: f64,
}

impl PlayfieldConfig {
    pub fn new() -> Self {
        Self {
            anchor_row: 19.0,
            top_row: 4.0,
            bottom_row: 23.0,
            flash_s: 0.3,
        }
    }

    /// Row of a falling note. `speed` is in rows per second.
    ///
    /// Notes approach from the top: a note in the future has a smaller row.
    pub fn fall_row(&self, speed: f64, now: f64, note_time: f64) -> f64 {
        self.anchor_row + speed * (now - note_time)
    }

    /// Where a note should be drawn, or `None` when it is not visible.
    ///
    /// Open and missed notes keep falling. Hit notes (perfect, good, failed)
    /// flash on the anchor row for `flash_s` after being judged.
    pub fn project(
        &self,
        speed: f64,
        now: f64,
        note_time: f64,
        judgement: Judgement,
        judged_at: Option<f64>,
    ) -> Option<f64> {
        match judgement {
            Judgement::Open | Judgement::Missed => {
                let row = self.fall_row(speed, now, note_time);
                (self.top_row < row && row < self.bottom_row).then_some(row)
            }
            Judgement::Perfect | Judgement::Good | Judgement::Failed => {
                let judged_at = judged_at.unwrap_or(note_time);
                (now - judged_at <= self.flash_s).then_some(self.anchor_row)
            }
        }
    }

    /// Latest note time that can already be on screen at `now`.
    pub fn latest_visible(&self, speed: f64, now: f64) -> f64 {
        now + (self.anchor_row - self.top_row) / speed.max(f64::EPSILON)
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::new()
    }
}
