// Orrery Core Components
// ECS components carried by the celestial bodies and their attachments

use bevy::prelude::*;
use bevy::reflect::Reflect;

use crate::core::math::OrbitPhase;

/// Marker component for the system root entity all bodies hang off.
#[derive(Component, Reflect, Default)]
pub struct SystemRoot;

/// What a body is; the sun gets emissive treatment and no orbit.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// A named celestial body backed by one sphere mesh.
#[derive(Component, Reflect)]
pub struct SolarBody {
    pub name: String,
    pub kind: BodyKind,
    /// Render radius of the sphere, also the picking radius.
    pub radius: f32,
}

/// Cosmetic orbit around a center captured at spawn time.
///
/// Not gravitational: a fixed angular step per reference frame, applied to
/// two independent phase accumulators (see `core::math::OrbitPhase`).
#[derive(Component, Reflect)]
pub struct OrbitState {
    pub center: Vec3,
    pub radius: f32,
    pub step: f32,
    #[reflect(ignore)]
    pub phase: OrbitPhase,
}

impl OrbitState {
    pub fn new(center: Vec3, radius: f32, step: f32, initial_phase: f32) -> Self {
        Self {
            center,
            radius,
            step,
            phase: OrbitPhase::new(initial_phase),
        }
    }
}

/// Self-rotation about the local Y axis, radians per reference frame.
#[derive(Component, Reflect)]
pub struct AxialSpin {
    pub speed: f32,
}

/// Cloud shell above a planet surface, counter-rotating slowly.
#[derive(Component, Reflect)]
pub struct CloudLayer {
    pub speed: f32,
}

/// UI text node showing a body's name; follows its screen position.
#[derive(Component)]
pub struct BodyLabel {
    pub body: Entity,
    pub base_font_size: f32,
}

/// Marker for the main demo camera.
#[derive(Component)]
pub struct OrreryMainCamera;

/// Marker for the directional light that carries the volumetric shafts.
#[derive(Component)]
pub struct ShaftLight;

/// Marker for the sky dome sphere that follows the camera.
#[derive(Component)]
pub struct SkyDome;
