// Orrery Core Resources
// Scene context, simulation clock, and persisted viewer state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::components::BodyKind;

pub const STATE_FILE: &str = "orrery_state.ron";

/// Explicit scene context built once the bodies are spawned.
///
/// Update systems take this instead of poking ambient globals, so the
/// body list is in one place and never structurally changes after build.
#[derive(Resource, Default)]
pub struct SceneContext {
    pub root: Option<Entity>,
    pub sun: Option<Entity>,
    pub bodies: Vec<BodyEntry>,
}

pub struct BodyEntry {
    pub entity: Entity,
    pub name: String,
    pub kind: BodyKind,
}

impl SceneContext {
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.bodies
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.entity)
    }
}

/// Frame clock for the procedural animation systems.
#[derive(Resource, Default)]
pub struct SimClock {
    pub elapsed: f32,
    /// Frame delta normalized to the 60 Hz reference frame.
    pub ratio: f32,
    pub frame: u64,
}

/// Camera and focus state persisted across runs.
///
/// The browser original saved this through its hot-reload dispose/accept
/// hooks; here it is written on exit and restored at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct ViewerState {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub pivot: [f32; 3],
    pub focused_body: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            radius: 90.0,
            pivot: [0.0, 0.0, 0.0],
            focused_body: None,
        }
    }
}

impl ViewerState {
    /// Restores saved state, silently starting fresh when the file is
    /// absent and warning when it is unreadable.
    pub fn restore(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match ron::from_str(&text) {
            Ok(state) => {
                info!("restored viewer state from {}", path.display());
                state
            }
            Err(err) => {
                warn!("ignoring corrupt viewer state {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let text = ron::ser::to_string_pretty(self, Default::default())?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_state_round_trips() {
        let dir = std::env::temp_dir().join("orrery-state-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.ron");
        let state = ViewerState {
            yaw: 1.5,
            pitch: -0.2,
            radius: 42.0,
            pivot: [1.0, 2.0, 3.0],
            focused_body: Some("Mars".to_string()),
        };
        state.save(&path).unwrap();
        let restored = ViewerState::restore(&path);
        assert_eq!(restored.radius, 42.0);
        assert_eq!(restored.focused_body.as_deref(), Some("Mars"));
        assert_eq!(restored.pivot, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn corrupt_state_starts_fresh() {
        let dir = std::env::temp_dir().join("orrery-state-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corrupt.ron");
        std::fs::write(&path, "not ron at all {{{").unwrap();
        let restored = ViewerState::restore(&path);
        assert_eq!(restored.radius, ViewerState::default().radius);
    }
}
