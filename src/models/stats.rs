//! Judgements, hit statistics and result tiers.
//!
//! This module defines how a single note is judged and how the judged
//! notes of a run add up to a score, an accuracy and a final tier.

/// RGB color used by the terminal renderer.
pub type Rgb = [u8; 3];

/// Timing outcome of a note.
///
/// Every note starts `Open`. Once it leaves `Open` it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Judgement {
    /// Not judged yet (also returned for ignored presses).
    Open,
    /// Pressed inside the tight window.
    Perfect,
    /// Pressed inside the wide window.
    Good,
    /// Pressed, but outside both windows.
    Failed,
    /// Never pressed; closed out by the sweep.
    Missed,
}

impl Judgement {
    /// Points awarded when a note receives this judgement.
    pub fn points(self) -> u32 {
        match self {
            Judgement::Perfect => 20,
            Judgement::Good => 15,
            Judgement::Open | Judgement::Failed | Judgement::Missed => 0,
        }
    }

    /// Whether this judgement resets the combo.
    pub fn breaks_combo(self) -> bool {
        match self {
            Judgement::Failed | Judgement::Missed => true,
            Judgement::Open | Judgement::Perfect | Judgement::Good => false,
        }
    }

    /// Text flashed on the HUD right after a press.
    pub fn label(self) -> &'static str {
        match self {
            Judgement::Open => "",
            Judgement::Perfect => "PERFECT",
            Judgement::Good => "GOOD",
            Judgement::Failed | Judgement::Missed => "FAILED",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Judgement::Open | Judgement::Perfect => [255, 255, 0],
            Judgement::Good => [0, 180, 255],
            Judgement::Failed | Judgement::Missed => [230, 0, 0],
        }
    }
}

/// Per-outcome counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitStats {
    pub perfect: u32,
    pub good: u32,
    pub failed: u32,
    pub missed: u32,
}

impl HitStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one judged note. `Open` is not a judged outcome and is ignored.
    pub fn record(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Open => {}
            Judgement::Perfect => self.perfect += 1,
            Judgement::Good => self.good += 1,
            Judgement::Failed => self.failed += 1,
            Judgement::Missed => self.missed += 1,
        }
    }

    /// Number of notes that have left the `Open` state.
    pub fn total_judged(&self) -> u32 {
        self.perfect + self.good + self.failed + self.missed
    }

    /// Accuracy in `[0, 1]`: Perfect counts fully, Good counts half.
    ///
    /// Defined as `1.0` while nothing has been judged.
    pub fn accuracy(&self) -> f64 {
        let total = self.total_judged();
        if total == 0 {
            return 1.0;
        }
        (self.perfect as f64 + 0.5 * self.good as f64) / total as f64
    }
}

/// Headline shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTier {
    Perfect,
    FullCombo,
    Great,
    Good,
    Complete,
}

impl ResultTier {
    /// Picks the tier for a finished run. First matching rule wins.
    pub fn evaluate(accuracy: f64, best_combo: u32, total_notes: usize) -> Self {
        if accuracy == 1.0 {
            ResultTier::Perfect
        } else if best_combo as usize == total_notes {
            ResultTier::FullCombo
        } else if accuracy >= 0.9 {
            ResultTier::Great
        } else if accuracy >= 0.6 {
            ResultTier::Good
        } else {
            ResultTier::Complete
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResultTier::Perfect => "PERFECT",
            ResultTier::FullCombo => "FULL COMBO",
            ResultTier::Great => "GREAT",
            ResultTier::Good => "GOOD",
            ResultTier::Complete => "COMPLETE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_optimistic_when_empty() {
        assert_eq!(HitStats::new().accuracy(), 1.0);
    }

    #[test]
    fn accuracy_weights_good_by_half() {
        let mut stats = HitStats::new();
        stats.record(Judgement::Perfect);
        stats.record(Judgement::Good);
        stats.record(Judgement::Missed);
        stats.record(Judgement::Failed);
        assert_eq!(stats.total_judged(), 4);
        assert!((stats.accuracy() - 1.5 / 4.0).abs() < 1e-12);
    }

    #[test]
    fn open_is_not_counted() {
        let mut stats = HitStats::new();
        stats.record(Judgement::Open);
        assert_eq!(stats.total_judged(), 0);
    }

    #[test]
    fn tiers_follow_rule_order() {
        assert_eq!(ResultTier::evaluate(1.0, 3, 10), ResultTier::Perfect);
        // Full combo beats Great even with high accuracy.
        assert_eq!(ResultTier::evaluate(0.95, 10, 10), ResultTier::FullCombo);
        assert_eq!(ResultTier::evaluate(0.95, 4, 10), ResultTier::Great);
        assert_eq!(ResultTier::evaluate(0.9, 4, 10), ResultTier::Great);
        assert_eq!(ResultTier::evaluate(0.6, 4, 10), ResultTier::Good);
        assert_eq!(ResultTier::evaluate(0.59, 4, 10), ResultTier::Complete);
    }

    #[test]
    fn only_failures_break_combo() {
        assert!(Judgement::Failed.breaks_combo());
        assert!(Judgement::Missed.breaks_combo());
        assert!(!Judgement::Perfect.breaks_combo());
        assert!(!Judgement::Good.breaks_combo());
    }
}
