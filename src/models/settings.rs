//! Player settings persisted as TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default settings file, relative to the working directory.
pub const SETTINGS_PATH: &str = "settings.toml";

pub const MIN_FALL_SPEED: u8 = 1;
pub const MAX_FALL_SPEED: u8 = 20;
/// Frame rate caps offered in the settings screen.
pub const FPS_STEPS: [u32; 3] = [30, 60, 120];
pub const VOLUME_STEP: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    /// Note fall rate in rows per second (1..=20).
    pub fall_speed: u8,
    /// Frame rate cap.
    pub fps: u32,
    /// Music volume in percent (0..=100).
    pub volume: u8,
    /// Directory scanned for track files.
    pub tracks_dir: PathBuf,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            fall_speed: 10,
            fps: 60,
            volume: 100,
            tracks_dir: PathBuf::from("tracks"),
        }
    }
}

impl SettingsState {
    /// Loads settings from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::info!("SETTINGS: No settings at {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };
        match toml::from_str::<Self>(&content) {
            Ok(settings) => settings.clamped(),
            Err(e) => {
                log::error!("SETTINGS: Failed to parse {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Writes settings to `path`. Failures are logged.
    pub fn save_to(&self, path: &Path) {
        let result = toml::to_string_pretty(self)
            .map_err(|e| e.to_string())
            .and_then(|content| fs::write(path, content).map_err(|e| e.to_string()));
        match result {
            Ok(()) => log::info!("SETTINGS: Saved to {:?}", path),
            Err(e) => log::error!("SETTINGS: Failed to save {:?}: {}", path, e),
        }
    }

    /// Brings every field back into its valid range.
    fn clamped(mut self) -> Self {
        self.fall_speed = self.fall_speed.clamp(MIN_FALL_SPEED, MAX_FALL_SPEED);
        self.volume = self.volume.min(100);
        if !FPS_STEPS.contains(&self.fps) {
            self.fps = FPS_STEPS
                .iter()
                .copied()
                .min_by_key(|step| step.abs_diff(self.fps))
                .unwrap_or(60);
        }
        self
    }

    pub fn fall_speed_up(&mut self) {
        self.fall_speed = (self.fall_speed + 1).min(MAX_FALL_SPEED);
    }

    pub fn fall_speed_down(&mut self) {
        self.fall_speed = self.fall_speed.saturating_sub(1).max(MIN_FALL_SPEED);
    }

    pub fn fps_up(&mut self) {
        self.fps = match self.fps {
            30 => 60,
            _ => 120,
        };
    }

    pub fn fps_down(&mut self) {
        self.fps = match self.fps {
            120 => 60,
            _ => 30,
        };
    }

    pub fn volume_up(&mut self) {
        self.volume = (self.volume + VOLUME_STEP).min(100);
    }

    pub fn volume_down(&mut self) {
        self.volume = self.volume.saturating_sub(VOLUME_STEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = SettingsState::default();
        settings.fall_speed_up();
        settings.volume_down();
        settings.fps_up();
        settings.save_to(&path);

        assert_eq!(SettingsState::load_from(&path), settings);
    }

    #[test]
    fn missing_or_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        assert_eq!(SettingsState::load_from(&path), SettingsState::default());

        fs::write(&path, "fall_speed = [").unwrap();
        assert_eq!(SettingsState::load_from(&path), SettingsState::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "fall_speed = 99\nfps = 75\n").unwrap();

        let settings = SettingsState::load_from(&path);
        assert_eq!(settings.fall_speed, MAX_FALL_SPEED);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.volume, 100);
    }

    #[test]
    fn editing_saturates() {
        let mut s = SettingsState::default();
        for _ in 0..30 {
            s.fall_speed_up();
            s.fps_up();
            s.volume_up();
        }
        assert_eq!((s.fall_speed, s.fps, s.volume), (20, 120, 100));
        for _ in 0..30 {
            s.fall_speed_down();
            s.fps_down();
            s.volume_down();
        }
        assert_eq!((s.fall_speed, s.fps, s.volume), (1, 30, 0));
    }
}
