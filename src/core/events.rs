// Orrery Core Events
// Events flowing between picking, camera, and the performance scaler

use bevy::prelude::*;

/// A confirmed pointer interaction asking the camera to focus a body.
#[derive(Debug, Clone, Copy, Event)]
pub struct FocusRequest {
    pub body: Entity,
}

/// Emitted once a focus tween reaches its target.
#[derive(Debug, Clone, Copy, Event)]
pub struct FocusCompleted {
    pub body: Entity,
}

/// The auto performance scaler applied a degradation step.
#[derive(Debug, Clone, Event)]
pub struct PerfDegraded {
    pub step: crate::rendering::perf::DegradeStep,
    pub measured_fps: f32,
}
