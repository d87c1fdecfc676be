//! Note processing - sweep, apply_judgement

use super::{JudgmentEngine, NoteState};
use crate::models::engine::Lane;
use crate::models::stats::Judgement;

impl JudgmentEngine {
    /// Force-misses every note whose Good band has fully elapsed at `now`.
    ///
    /// Returns whether at least one note was missed by this call.
    pub fn sweep(&mut self, now: f64) -> bool {
        let mut missed_any = false;

        for lane in Lane::ALL {
            while let Some(note) = self.next_due(lane) {
                if !self.hit_window.is_overdue(note.time, now) {
                    break;
                }
                self.apply_judgement(lane, Judgement::Missed, now);
                missed_any = true;
            }
        }

        missed_any
    }

    /// Closes out the lane's next due note with `judgement`.
    pub(crate) fn apply_judgement(&mut self, lane: Lane, judgement: Judgement, at: f64) {
        let lane_idx = lane.index();
        let index = self.next_index[lane_idx];
        let Some(state) = self.states[lane_idx].get_mut(index) else {
            return;
        };

        *state = NoteState {
            judgement,
            judged_at: Some(at),
        };
        self.next_index[lane_idx] += 1;
        self.hit_stats.record(judgement);
        self.score += judgement.points();

        if judgement.breaks_combo() {
            self.combo = 0;
        } else {
            self.combo += 1;
            self.best_combo = self.best_combo.max(self.combo);
        }
    }
}
