//! Note-timing judgment engine.
//!
//! The `JudgmentEngine` owns the mutable judging state of one run:
//! - the next due note of every lane
//! - the judgement of every note
//! - score, combo and hit statistics
//!
//! It never reads a clock. Every operation takes the current audio time,
//! which keeps it deterministic under jitter and easy to test.

mod input;
mod notes;
mod snapshot;

pub use snapshot::VisibleNote;

use crate::models::engine::{HitWindow, Lane, NUM_LANES, Note, NoteId, NoteTimeline};
use crate::models::stats::{HitStats, Judgement};
use crate::models::track::Track;
use std::sync::Arc;

/// Judging state of a single note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteState {
    pub judgement: Judgement,
    /// Audio time at which the note left `Open`.
    pub judged_at: Option<f64>,
}

impl NoteState {
    const OPEN: Self = Self {
        judgement: Judgement::Open,
        judged_at: None,
    };
}

pub struct JudgmentEngine {
    /// The track being played. Shared, never mutated.
    pub track: Arc<Track>,
    pub timeline: NoteTimeline,
    pub hit_window: HitWindow,

    /// Index of the next unjudged note in each lane. Only increases.
    next_index: [usize; NUM_LANES],
    /// Judging state, indexed like the timeline lanes.
    states: [Vec<NoteState>; NUM_LANES],

    pub hit_stats: HitStats,
    pub combo: u32,
    pub best_combo: u32,
    pub score: u32,
}

impl JudgmentEngine {
    pub fn new(track: Arc<Track>) -> Self {
        let timeline = NoteTimeline::new(&track.notes);
        let states = Lane::ALL.map(|lane| vec![NoteState::OPEN; timeline.lane(lane).len()]);

        Self {
            track,
            timeline,
            hit_window: HitWindow::new(),
            next_index: [0; NUM_LANES],
            states,
            hit_stats: HitStats::new(),
            combo: 0,
            best_combo: 0,
            score: 0,
        }
    }

    /// The lane's next unjudged note, if any.
    pub fn next_due(&self, lane: Lane) -> Option<Note> {
        self.timeline.get(NoteId {
            lane,
            index: self.next_index[lane.index()],
        })
    }

    pub fn next_index(&self, lane: Lane) -> usize {
        self.next_index[lane.index()]
    }

    pub fn note_state(&self, id: NoteId) -> Option<NoteState> {
        self.states[id.lane.index()].get(id.index).copied()
    }

    pub fn judgement(&self, id: NoteId) -> Judgement {
        self.note_state(id)
            .map_or(Judgement::Open, |state| state.judgement)
    }

    pub fn total_notes(&self) -> usize {
        self.timeline.len()
    }

    /// Whether every note has been judged.
    pub fn is_exhausted(&self) -> bool {
        Lane::ALL.iter().all(|&lane| self.next_due(lane).is_none())
    }

    /// `(perfect + good / 2) / judged`, or `1.0` before anything is judged.
    pub fn accuracy(&self) -> f64 {
        self.hit_stats.accuracy()
    }
}
