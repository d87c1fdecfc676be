//! Key presses - hit

use super::JudgmentEngine;
use crate::models::engine::Lane;
use crate::models::stats::Judgement;

impl JudgmentEngine {
    /// Resolves the lane's next due note against a press at `at` seconds.
    ///
    /// Returns `Open` without touching any state when the lane has no
    /// note left or the press is too early to count.
    pub fn hit(&mut self, lane: Lane, at: f64) -> Judgement {
        let Some(note) = self.next_due(lane) else {
            return Judgement::Open;
        };

        let judgement = self.hit_window.judge(at - note.time);
        if judgement != Judgement::Open {
            self.apply_judgement(lane, judgement, at);
        }
        judgement
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::two_note_engine;
    use super::*;
    use crate::models::engine::NoteId;

    #[test]
    fn perfect_then_lane_exhausted() {
        let mut engine = two_note_engine();
        assert_eq!(engine.hit(Lane::Left, 1.05), Judgement::Perfect);
        assert_eq!(engine.score, 20);
        assert_eq!(engine.combo, 1);

        assert_eq!(engine.hit(Lane::Left, 1.05), Judgement::Open);
        assert_eq!(engine.score, 20);
        assert_eq!(engine.next_index(Lane::Left), 1);
    }

    #[test]
    fn good_inside_wide_band() {
        let mut engine = two_note_engine();
        assert_eq!(engine.hit(Lane::Down, 2.2), Judgement::Good);
        assert_eq!(engine.score, 15);
        assert_eq!(engine.combo, 1);
        assert_eq!(engine.best_combo, 1);
    }

    #[test]
    fn too_early_press_is_ignored() {
        let mut engine = two_note_engine();
        assert_eq!(engine.hit(Lane::Down, 1.55), Judgement::Open);
        assert_eq!(engine.next_index(Lane::Down), 0);
        assert_eq!(
            engine.judgement(NoteId {
                lane: Lane::Down,
                index: 0
            }),
            Judgement::Open
        );
        assert_eq!(engine.hit_stats.total_judged(), 0);
    }

    #[test]
    fn early_failed_band() {
        let mut engine = two_note_engine();
        // Between -0.4 and -0.25: pressed, but too early for Good.
        assert_eq!(engine.hit(Lane::Down, 1.65), Judgement::Failed);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.combo, 0);
        assert_eq!(engine.hit_stats.failed, 1);
    }

    #[test]
    fn late_press_fails_and_breaks_combo() {
        let mut engine = two_note_engine();
        engine.hit(Lane::Left, 1.0);
        assert_eq!(engine.combo, 1);

        assert_eq!(engine.hit(Lane::Down, 3.5), Judgement::Failed);
        assert_eq!(engine.combo, 0);
        assert_eq!(engine.best_combo, 1);
    }

    #[test]
    fn judgement_records_press_time() {
        let mut engine = two_note_engine();
        engine.hit(Lane::Left, 0.95);
        let state = engine
            .note_state(NoteId {
                lane: Lane::Left,
                index: 0,
            })
            .unwrap();
        assert_eq!(state.judgement, Judgement::Perfect);
        assert_eq!(state.judged_at, Some(0.95));
    }

    #[test]
    fn same_timestamp_notes_are_judged_one_by_one() {
        use crate::models::track::fixtures;
        use std::sync::Arc;

        let track = fixtures::track(&[(1.0, Lane::Up), (1.0, Lane::Up)], 2.0);
        let mut engine = JudgmentEngine::new(Arc::new(track));
        assert_eq!(engine.hit(Lane::Up, 1.0), Judgement::Perfect);
        assert_eq!(engine.hit(Lane::Up, 1.01), Judgement::Perfect);
        assert_eq!(engine.hit(Lane::Up, 1.02), Judgement::Open);
        assert_eq!(engine.combo, 2);
    }
}
