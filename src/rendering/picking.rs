/// Picking Module
/// Analytic ray/sphere picking and the press-move-release confirmation

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::components::{OrreryMainCamera, SolarBody};
use crate::core::events::FocusRequest;

/// Pixels the cursor may travel between press and release before the
/// interaction is treated as a camera drag instead of a click.
const DRAG_CANCEL_THRESHOLD: f32 = 6.0;

/// Two-step pointer confirmation: a press captures the picked body, any
/// real drag cancels it, and a release confirms only when it lands on the
/// body the press captured.
#[derive(Debug, Default)]
pub struct PointerConfirm {
    pending: Option<(Entity, Vec2)>,
}

impl PointerConfirm {
    pub fn press(&mut self, target: Option<Entity>, at: Vec2) {
        self.pending = target.map(|entity| (entity, at));
    }

    pub fn moved(&mut self, to: Vec2, threshold: f32) {
        if let Some((_, at)) = self.pending {
            if at.distance(to) > threshold {
                self.pending = None;
            }
        }
    }

    pub fn release(&mut self, target: Option<Entity>) -> Option<Entity> {
        let pending = self.pending.take();
        match (pending, target) {
            (Some((pressed, _)), Some(released)) if pressed == released => Some(released),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Resource, Default)]
pub struct PickState {
    pub confirm: PointerConfirm,
}

/// Nearest positive ray/sphere intersection distance, if any.
pub fn ray_sphere_intersect(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t = -b - sqrt_d;
    if t > 0.0 {
        return Some(t);
    }
    let t = -b + sqrt_d;
    (t > 0.0).then_some(t)
}

fn pick_body_at_cursor(
    cursor: Vec2,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    bodies: &Query<(Entity, &GlobalTransform), With<SolarBody>>,
) -> Option<Entity> {
    let ray = camera.viewport_to_world(camera_transform, cursor)?;
    let direction = *ray.direction;

    let mut nearest: Option<(f32, Entity)> = None;
    for (entity, transform) in bodies.iter() {
        // Bodies are unit spheres whose size lives in the transform scale,
        // so the world radius already includes galaxy-mode scaling.
        let world_radius = transform.compute_transform().scale.x;
        if let Some(t) =
            ray_sphere_intersect(ray.origin, direction, transform.translation(), world_radius)
        {
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, entity));
            }
        }
    }
    nearest.map(|(_, entity)| entity)
}

pub fn handle_pointer_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<OrreryMainCamera>>,
    bodies: Query<(Entity, &GlobalTransform), With<SolarBody>>,
    mut state: ResMut<PickState>,
    mut focus_events: EventWriter<FocusRequest>,
) {
    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    if mouse_input.just_pressed(MouseButton::Left) {
        let picked = pick_body_at_cursor(cursor, camera, camera_transform, &bodies);
        state.confirm.press(picked, cursor);
    } else if state.confirm.is_pending() {
        state.confirm.moved(cursor, DRAG_CANCEL_THRESHOLD);
    }

    if mouse_input.just_released(MouseButton::Left) {
        let picked = pick_body_at_cursor(cursor, camera, camera_transform, &bodies);
        if let Some(body) = state.confirm.release(picked) {
            focus_events.send(FocusRequest { body });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_on_same_target_confirms() {
        let mut confirm = PointerConfirm::default();
        let body = Entity::from_raw(3);
        confirm.press(Some(body), Vec2::new(100.0, 100.0));
        assert_eq!(confirm.release(Some(body)), Some(body));
    }

    #[test]
    fn moving_between_press_and_release_cancels() {
        let mut confirm = PointerConfirm::default();
        let body = Entity::from_raw(3);
        confirm.press(Some(body), Vec2::new(100.0, 100.0));
        confirm.moved(Vec2::new(130.0, 100.0), DRAG_CANCEL_THRESHOLD);
        assert_eq!(confirm.release(Some(body)), None);
    }

    #[test]
    fn small_jitter_does_not_cancel() {
        let mut confirm = PointerConfirm::default();
        let body = Entity::from_raw(3);
        confirm.press(Some(body), Vec2::new(100.0, 100.0));
        confirm.moved(Vec2::new(102.0, 101.0), DRAG_CANCEL_THRESHOLD);
        assert_eq!(confirm.release(Some(body)), Some(body));
    }

    #[test]
    fn releasing_on_a_different_target_cancels() {
        let mut confirm = PointerConfirm::default();
        confirm.press(Some(Entity::from_raw(3)), Vec2::ZERO);
        assert_eq!(confirm.release(Some(Entity::from_raw(4))), None);
        // the pending pick is consumed either way
        assert!(!confirm.is_pending());
    }

    #[test]
    fn pressing_empty_space_never_confirms() {
        let mut confirm = PointerConfirm::default();
        confirm.press(None, Vec2::ZERO);
        assert!(!confirm.is_pending());
        assert_eq!(confirm.release(Some(Entity::from_raw(1))), None);
    }

    #[test]
    fn ray_hits_sphere_ahead() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 10.0), 2.0);
        assert!((t.unwrap() - 8.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_offset_sphere() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(10.0, 0.0, 10.0), 2.0);
        assert!(t.is_none());
    }

    #[test]
    fn sphere_behind_ray_is_ignored() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 2.0);
        assert!(t.is_none());
    }

    #[test]
    fn ray_starting_inside_hits_the_far_wall() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 2.0);
        assert!((t.unwrap() - 2.0).abs() < 1e-4);
    }
}
