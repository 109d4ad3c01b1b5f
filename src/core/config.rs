// Orrery Configuration
// Demo configuration structures and the ron file they load from

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "orrery.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: ron::error::SpannedError,
    },
}

/// Main demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct OrreryConfig {
    pub window_title: String,
    pub window_width: f32,
    pub window_height: f32,
    pub vsync: bool,
    pub quality: QualityPreset,
    /// Frame rate the auto performance scaler tries to hold.
    pub target_fps: f32,
    /// Seconds between performance checks.
    pub perf_check_interval: f32,
    /// Multiplier on every body's orbit step.
    pub orbit_speed: f32,
    /// Camera distance where labels start fading out.
    pub label_fade_start: f32,
    /// Camera distance where labels are fully faded.
    pub label_fade_end: f32,
    /// Camera distance where galaxy-scaling starts.
    pub galaxy_start: f32,
    /// Camera distance where galaxy-scaling reaches its minimum scale.
    pub galaxy_end: f32,
    pub galaxy_min_scale: f32,
    pub bloom_enabled: bool,
    pub chromatic_aberration_enabled: bool,
    pub god_rays_enabled: bool,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            window_title: "Orrery".to_string(),
            window_width: 1280.0,
            window_height: 720.0,
            vsync: true,
            quality: QualityPreset::High,
            target_fps: 50.0,
            perf_check_interval: 2.0,
            orbit_speed: 1.0,
            label_fade_start: 80.0,
            label_fade_end: 220.0,
            galaxy_start: 250.0,
            galaxy_end: 600.0,
            galaxy_min_scale: 0.15,
            bloom_enabled: true,
            chromatic_aberration_enabled: true,
            god_rays_enabled: true,
        }
    }
}

/// Rendering quality preset, mapped onto MSAA and shadow settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QualityPreset {
    Low,
    Medium,
    High,
}

impl QualityPreset {
    pub fn msaa_samples(self) -> u32 {
        match self {
            QualityPreset::Low => 1,
            QualityPreset::Medium => 2,
            QualityPreset::High => 4,
        }
    }

    pub fn shadows_enabled(self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

impl OrreryConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads the config file, falling back to defaults when it is missing
    /// or malformed. A missing file is the normal first-run case.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(err @ ConfigError::Parse { .. }) => {
                warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_ron() {
        let config = OrreryConfig {
            quality: QualityPreset::Low,
            target_fps: 30.0,
            ..Default::default()
        };
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        let back: OrreryConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.quality, QualityPreset::Low);
        assert_eq!(back.target_fps, 30.0);
        assert_eq!(back.window_title, config.window_title);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("orrery-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ron");
        std::fs::write(&path, "(window_title: 42)").unwrap();
        let config = OrreryConfig::load_or_default(&path);
        assert_eq!(config.window_title, OrreryConfig::default().window_title);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = OrreryConfig::load_or_default("does/not/exist.ron");
        assert_eq!(config.target_fps, OrreryConfig::default().target_fps);
    }

    #[test]
    fn quality_presets_order_sensibly() {
        assert!(QualityPreset::Low.msaa_samples() < QualityPreset::High.msaa_samples());
        assert!(!QualityPreset::Low.shadows_enabled());
        assert!(QualityPreset::High.shadows_enabled());
    }
}
