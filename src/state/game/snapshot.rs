//! Presentation projection - visible_notes

use super::JudgmentEngine;
use crate::models::engine::{Lane, PlayfieldConfig};
use crate::models::stats::Judgement;

/// A note to draw, already mapped to a (fractional) grid row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleNote {
    pub lane: Lane,
    pub row: f64,
    pub judgement: Judgement,
}

impl JudgmentEngine {
    /// Notes visible at `now` for the given fall speed (rows per second).
    ///
    /// Read-only: speed changes the layout, never the judging.
    pub fn visible_notes(
        &self,
        playfield: &PlayfieldConfig,
        speed: f64,
        now: f64,
    ) -> Vec<VisibleNote> {
        let latest = playfield.latest_visible(speed, now);
        let mut visible = Vec::new();

        for lane in Lane::ALL {
            let times = self.timeline.lane(lane);
            let states = &self.states[lane.index()];
            // Judged notes come first in a lane, so the first Open note past
            // the top of the screen ends the lane.
            for (&time, &state) in times.iter().zip(states) {
                if time > latest && state.judgement == Judgement::Open {
                    break;
                }
                if let Some(row) =
                    playfield.project(speed, now, time, state.judgement, state.judged_at)
                {
                    visible.push(VisibleNote {
                        lane,
                        row,
                        judgement: state.judgement,
                    });
                }
            }
        }

        visible
    }
}
