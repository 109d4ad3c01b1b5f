/// Camera Module
/// Orbit rig around a pivot, pointer-driven control, and focus tweens

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::core::components::{OrreryMainCamera, SolarBody};
use crate::core::events::{FocusCompleted, FocusRequest};
use crate::core::math::ease_in_out_cubic;
use crate::core::resources::{SceneContext, ViewerState};

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
const MIN_RADIUS: f32 = 8.0;
const MAX_RADIUS: f32 = 1200.0;
const DRAG_SPEED: f32 = 0.005;
const KEY_ORBIT_SPEED: f32 = 260.0;
const FOCUS_DURATION: f32 = 1.6;

/// Yaw/pitch/radius orbit around a pivot point.
#[derive(Component, Debug, Clone)]
pub struct OrbitRig {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub pivot: Vec3,
}

impl OrbitRig {
    pub fn from_state(state: &ViewerState) -> Self {
        let mut rig = Self {
            yaw: state.yaw,
            pitch: state.pitch,
            radius: state.radius,
            pivot: Vec3::from_array(state.pivot),
        };
        rig.clamp();
        rig
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.pivot
            + self.radius * Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch)
    }

    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw += delta.x * DRAG_SPEED;
        self.pitch += delta.y * DRAG_SPEED;
        self.clamp();
    }

    pub fn apply_zoom(&mut self, amount: f32) {
        self.radius *= 1.0 - amount * 0.1;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.radius = self.radius.clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

/// In-flight camera focus animation toward a picked body. A new
/// confirmation replaces the component, retargeting the glide.
#[derive(Component, Debug, Clone)]
pub struct FocusTween {
    pub target: Entity,
    pub target_name: String,
    pub start_pivot: Vec3,
    pub end_pivot: Vec3,
    pub start_radius: f32,
    pub end_radius: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl FocusTween {
    /// Eased pivot and radius at the current elapsed time.
    pub fn sample(&self) -> (Vec3, f32) {
        let t = ease_in_out_cubic(self.elapsed / self.duration);
        (
            self.start_pivot.lerp(self.end_pivot, t),
            self.start_radius + (self.end_radius - self.start_radius) * t,
        )
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

pub fn setup_camera(mut commands: Commands, state: Res<ViewerState>) {
    info!("Setting up camera");

    let rig = OrbitRig::from_state(&state);
    let transform = Transform::from_translation(rig.eye()).looking_at(rig.pivot, Vec3::Y);

    commands.spawn((
        OrreryMainCamera,
        rig,
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::AcesFitted,
            projection: Projection::Perspective(PerspectiveProjection {
                far: 10_000.0,
                ..default()
            }),
            transform,
            ..default()
        },
        Name::new("Main Camera"),
    ));
}

/// Re-requests focus on the body that was focused when the previous run
/// exited; the camera glides back to it on startup.
pub fn restore_focus(
    state: Res<ViewerState>,
    context: Res<SceneContext>,
    mut focus_events: EventWriter<FocusRequest>,
) {
    let Some(name) = state.focused_body.as_deref() else {
        return;
    };
    if let Some(body) = context.find(name) {
        info!("restoring focus on {name}");
        focus_events.send(FocusRequest { body });
    }
}

pub fn update_camera_rig(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mut rig_query: Query<&mut OrbitRig, With<OrreryMainCamera>>,
) {
    let mut rotation_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        rotation_delta += motion.delta;
    }

    let mut wheel_delta = 0.0;
    for wheel in mouse_wheel.read() {
        wheel_delta += wheel.y;
    }

    let mut key_delta = Vec2::ZERO;
    if keyboard_input.pressed(KeyCode::ArrowLeft) {
        key_delta.x -= 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowRight) {
        key_delta.x += 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowUp) {
        key_delta.y += 1.0;
    }
    if keyboard_input.pressed(KeyCode::ArrowDown) {
        key_delta.y -= 1.0;
    }

    let Ok(mut rig) = rig_query.get_single_mut() else {
        return;
    };

    if mouse_input.pressed(MouseButton::Left) && rotation_delta != Vec2::ZERO {
        rig.apply_drag(rotation_delta);
    }
    if key_delta != Vec2::ZERO {
        rig.apply_drag(key_delta * KEY_ORBIT_SPEED * time.delta_seconds());
    }
    if wheel_delta != 0.0 {
        rig.apply_zoom(wheel_delta);
    }
}

pub fn apply_focus_requests(
    mut commands: Commands,
    mut focus_events: EventReader<FocusRequest>,
    body_query: Query<(&GlobalTransform, &SolarBody)>,
    camera_query: Query<(Entity, &OrbitRig), With<OrreryMainCamera>>,
) {
    let Some(request) = focus_events.read().last() else {
        return;
    };
    let Ok((camera, rig)) = camera_query.get_single() else {
        return;
    };
    let Ok((transform, body)) = body_query.get(request.body) else {
        return;
    };

    info!("focusing {}", body.name);
    commands.entity(camera).insert(FocusTween {
        target: request.body,
        target_name: body.name.clone(),
        start_pivot: rig.pivot,
        end_pivot: transform.translation(),
        start_radius: rig.radius,
        end_radius: (body.radius * 6.0).max(MIN_RADIUS),
        elapsed: 0.0,
        duration: FOCUS_DURATION,
    });
}

pub fn update_focus_tween(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<ViewerState>,
    mut completed_events: EventWriter<FocusCompleted>,
    mut query: Query<(Entity, &mut OrbitRig, &mut FocusTween), With<OrreryMainCamera>>,
) {
    let Ok((camera, mut rig, mut tween)) = query.get_single_mut() else {
        return;
    };

    tween.elapsed += time.delta_seconds();
    let (pivot, radius) = tween.sample();
    rig.pivot = pivot;
    rig.radius = radius;

    if tween.finished() {
        state.focused_body = Some(tween.target_name.clone());
        completed_events.send(FocusCompleted { body: tween.target });
        commands.entity(camera).remove::<FocusTween>();
    }
}

pub fn write_camera_transform(
    mut query: Query<(&OrbitRig, &mut Transform), With<OrreryMainCamera>>,
) {
    for (rig, mut transform) in &mut query {
        *transform = Transform::from_translation(rig.eye()).looking_at(rig.pivot, Vec3::Y);
    }
}

/// Mirrors the rig into the persisted viewer state every frame so the
/// exit hook always writes the latest pose.
pub fn sync_viewer_state(
    rig_query: Query<&OrbitRig, With<OrreryMainCamera>>,
    mut state: ResMut<ViewerState>,
) {
    let Ok(rig) = rig_query.get_single() else {
        return;
    };
    state.yaw = rig.yaw;
    state.pitch = rig.pitch;
    state.radius = rig.radius;
    state.pivot = rig.pivot.to_array();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> OrbitRig {
        OrbitRig {
            yaw: 0.0,
            pitch: 0.0,
            radius: 100.0,
            pivot: Vec3::ZERO,
        }
    }

    #[test]
    fn pitch_clamps_away_from_poles() {
        let mut rig = rig();
        rig.apply_drag(Vec2::new(0.0, 1e6));
        assert!(rig.pitch <= PITCH_LIMIT);
        rig.apply_drag(Vec2::new(0.0, -1e7));
        assert!(rig.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn zoom_clamps_radius() {
        let mut rig = rig();
        for _ in 0..200 {
            rig.apply_zoom(1.0);
        }
        assert_eq!(rig.radius, MIN_RADIUS);
        for _ in 0..200 {
            rig.apply_zoom(-1.0);
        }
        assert_eq!(rig.radius, MAX_RADIUS);
    }

    #[test]
    fn eye_sits_at_radius_from_pivot() {
        let rig = rig();
        assert!((rig.eye().distance(rig.pivot) - rig.radius).abs() < 1e-3);
    }

    fn tween() -> FocusTween {
        FocusTween {
            target: Entity::from_raw(7),
            target_name: "Mars".to_string(),
            start_pivot: Vec3::ZERO,
            end_pivot: Vec3::new(10.0, 0.0, 0.0),
            start_radius: 100.0,
            end_radius: 20.0,
            elapsed: 0.0,
            duration: 2.0,
        }
    }

    #[test]
    fn tween_starts_at_start_and_converges_to_end() {
        let mut tween = tween();
        let (pivot, radius) = tween.sample();
        assert_eq!(pivot, Vec3::ZERO);
        assert_eq!(radius, 100.0);

        tween.elapsed = tween.duration;
        assert!(tween.finished());
        let (pivot, radius) = tween.sample();
        assert!((pivot - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        assert!((radius - 20.0).abs() < 1e-4);
    }

    #[test]
    fn tween_midpoint_is_halfway() {
        let mut tween = tween();
        tween.elapsed = 1.0;
        let (pivot, radius) = tween.sample();
        assert!((pivot.x - 5.0).abs() < 1e-4);
        assert!((radius - 60.0).abs() < 1e-4);
    }
}
