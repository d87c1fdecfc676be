//! Note events and the per-lane timeline built from a track.

use super::lane::{Lane, NUM_LANES};

/// A single timed note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// When the note should be hit, in seconds of audio time.
    pub time: f64,
    pub lane: Lane,
}

impl Note {
    pub fn new(time: f64, lane: Lane) -> Self {
        Self { time, lane }
    }
}

/// Identifies a note by its lane and its position within that lane.
///
/// Two notes with the same timestamp in one lane are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId {
    pub lane: Lane,
    pub index: usize,
}

/// Immutable per-lane view of a track's notes.
///
/// Each lane holds its note times in chronological order so the next due
/// note of a lane is a single index lookup.
#[derive(Debug, Clone, Default)]
pub struct NoteTimeline {
    lanes: [Vec<f64>; NUM_LANES],
}

impl NoteTimeline {
    /// Partitions notes by lane, keeping chronological order.
    pub fn new(notes: &[Note]) -> Self {
        let mut lanes: [Vec<f64>; NUM_LANES] = Default::default();
        for note in notes {
            lanes[note.lane.index()].push(note.time);
        }
        // Stable: equal timestamps keep their source order.
        for times in &mut lanes {
            times.sort_by(|a, b| a.total_cmp(b));
        }
        Self { lanes }
    }

    /// Note times of one lane.
    pub fn lane(&self, lane: Lane) -> &[f64] {
        &self.lanes[lane.index()]
    }

    /// Looks up a note by id.
    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.lane(id.lane)
            .get(id.index)
            .map(|&time| Note::new(time, id.lane))
    }

    /// Total number of notes across all lanes.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
