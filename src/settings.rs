//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file. Also carries the unlock
//! progress (collectibles, achievements, crown) between runs.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{ClimbMode, Crown, Progress, WidthPreset, WidthProfile};

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Number of selectable music tracks (numbered from 1)
pub const MUSIC_TRACKS: u8 = 10;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Climb started from the quick-start path
    pub climb_mode: ClimbMode,
    /// Platform width shrink preset
    pub width_preset: WidthPreset,

    // === Audio ===
    /// Selected background track, None for silence
    pub music_track: Option<u8>,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Unlocks ===
    pub progress: Progress,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            climb_mode: ClimbMode::Normal,
            width_preset: WidthPreset::Standard,
            music_track: None,
            master_volume: 0.8,
            progress: Progress::new(),
        }
    }
}

impl Settings {
    /// Width profile for new towers
    pub fn width_profile(&self) -> WidthProfile {
        self.width_preset.profile()
    }

    /// Pick a music track (1..=MUSIC_TRACKS) or None; out-of-range tracks are rejected
    pub fn select_music(&mut self, track: Option<u8>) -> bool {
        match track {
            Some(t) if !(1..=MUSIC_TRACKS).contains(&t) => false,
            _ => {
                self.music_track = track;
                true
            }
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Crown worn above the player, if any
    pub fn crown(&self) -> Option<Crown> {
        self.progress.crown
    }

    fn read(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(io::Error::from)
    }

    fn write(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(mut settings) => {
                settings.set_master_volume(settings.master_volume);
                if !settings.select_music(settings.music_track) {
                    settings.music_track = None;
                }
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.write(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("needed_climb_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.climb_mode, ClimbMode::Normal);
        assert_eq!(settings.width_profile(), WidthProfile::STANDARD);
        assert_eq!(settings.music_track, None);
        assert_eq!(settings.crown(), None);
    }

    #[test]
    fn test_select_music_range() {
        let mut settings = Settings::default();
        assert!(settings.select_music(Some(10)));
        assert_eq!(settings.music_track, Some(10));
        assert!(!settings.select_music(Some(0)));
        assert!(!settings.select_music(Some(11)));
        assert_eq!(settings.music_track, Some(10));
        assert!(settings.select_music(None));
        assert_eq!(settings.music_track, None);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(1.7);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_master_volume(-0.2);
        assert_eq!(settings.master_volume, 0.0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("settings.json");
        let mut settings = Settings {
            climb_mode: ClimbMode::Harder,
            width_preset: WidthPreset::Compact,
            ..Default::default()
        };
        settings.select_music(Some(3));
        settings.progress.collect(2);
        assert!(settings.progress.select_crown(Crown::Collectible(2)));
        settings.save(&path);

        let loaded = Settings::load(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.width_profile(), WidthProfile::COMPACT);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_and_corrupt_files() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "climb_mode": "Harder", "music_track": 42 }"#).unwrap();
        let loaded = Settings::load(&path);
        assert_eq!(loaded.climb_mode, ClimbMode::Harder);
        assert_eq!(loaded.music_track, None);
        assert_eq!(loaded.master_volume, 0.8);

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }
}
