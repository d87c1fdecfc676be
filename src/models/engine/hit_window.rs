//! Timing thresholds used to judge a key press against a note.

use crate::models::stats::Judgement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    /// Half-width of the Perfect band, in seconds.
    pub perfect_s: f64,
    /// Half-width of the Good band, in seconds.
    pub good_s: f64,
    /// How early a press may come and still count as Failed.
    /// Anything earlier is ignored.
    pub failed_early_s: f64,
}

impl HitWindow {
    pub fn new() -> Self {
        Self {
            perfect_s: 0.1,
            good_s: 0.25,
            failed_early_s: 0.4,
        }
    }

    /// Judges a press `delta` seconds away from the note (`press - note`).
    ///
    /// Bands are open intervals checked tightest first. Late presses past
    /// the Good band are Failed with no upper bound; presses at or before
    /// `-failed_early_s` return `Open` and leave the note pending.
    pub fn judge(&self, delta: f64) -> Judgement {
        if -self.perfect_s < delta && delta < self.perfect_s {
            Judgement::Perfect
        } else if -self.good_s < delta && delta < self.good_s {
            Judgement::Good
        } else if delta > -self.failed_early_s {
            Judgement::Failed
        } else {
            Judgement::Open
        }
    }

    /// Whether a note at `note_time` can no longer be hit within the Good band.
    ///
    /// The sweep force-misses exactly these notes.
    pub fn is_overdue(&self, note_time: f64, now: f64) -> bool {
        note_time <= now - self.good_s
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new()
    }
}
