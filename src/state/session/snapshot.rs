//! Snapshot creation for GameSession

use super::{GameSession, Phase};
use crate::models::engine::Lane;
use crate::shared::snapshot::{GameplaySnapshot, MenuSnapshot, PauseSnapshot};
use crate::state::traits::Snapshot;

impl Snapshot for GameSession {
    type Output = Option<GameplaySnapshot>;

    fn create_snapshot(&self) -> Self::Output {
        let engine = self.engine.as_ref()?;
        let track = &engine.track;
        let t = self.position;

        let pause = matches!(self.phase, Phase::Paused | Phase::Finished).then(|| {
            let (selected, labels) = self.active_menu();
            PauseSnapshot {
                tier: self.result_tier(),
                menu: MenuSnapshot { labels, selected },
            }
        });

        Some(GameplaySnapshot {
            title: track.title.clone(),
            artist: track.artist.clone(),
            description: track.description.clone(),
            position: t,
            length: track.length,
            score: engine.score,
            combo: engine.combo,
            best_combo: engine.best_combo,
            accuracy: engine.accuracy(),
            hit_stats: engine.hit_stats.clone(),
            message: self.message.map(|m| (m.text, m.color)),
            lane_flash: Lane::ALL.map(|lane| self.highlight_until[lane.index()] > t),
            notes: engine.visible_notes(&self.playfield, self.fall_speed as f64, t),
            countdown: self.countdown_digit(),
            spectrum: track
                .visualization
                .as_ref()
                .and_then(|vis| vis.frame_at(t))
                .map(<[f32]>::to_vec),
            pause,
        })
    }
}
