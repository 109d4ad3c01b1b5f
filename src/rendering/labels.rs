/// Labels Module
/// Screen-space name tags that track body positions and fade by distance

use bevy::prelude::*;

use crate::core::components::{BodyKind, BodyLabel, OrreryMainCamera};
use crate::core::config::OrreryConfig;
use crate::core::math::{distance_fraction, lerp};
use crate::core::resources::SceneContext;

const STAR_FONT_SIZE: f32 = 22.0;
const PLANET_FONT_SIZE: f32 = 16.0;
const LABEL_OFFSET_Y: f32 = -30.0;

pub fn setup_labels(mut commands: Commands, context: Res<SceneContext>) {
    for entry in &context.bodies {
        let base_font_size = match entry.kind {
            BodyKind::Star => STAR_FONT_SIZE,
            BodyKind::Planet => PLANET_FONT_SIZE,
        };
        commands.spawn((
            BodyLabel {
                body: entry.entity,
                base_font_size,
            },
            TextBundle::from_section(
                entry.name.clone(),
                TextStyle {
                    font_size: base_font_size,
                    color: Color::WHITE,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            }),
            Name::new(format!("{} Label", entry.name)),
        ));
    }
    info!("spawned {} labels", context.bodies.len());
}

/// Per-frame label placement: project each body to the viewport, hide it
/// behind the camera, and fade/scale it with camera distance.
pub fn update_labels(
    config: Res<OrreryConfig>,
    camera_query: Query<(&Camera, &GlobalTransform), With<OrreryMainCamera>>,
    body_query: Query<&GlobalTransform>,
    mut label_query: Query<(&BodyLabel, &mut Style, &mut Text, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let camera_pos = camera_transform.translation();

    for (label, mut style, mut text, mut visibility) in &mut label_query {
        let Ok(body_transform) = body_query.get(label.body) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let body_pos = body_transform.translation();

        let Some(screen) = camera.world_to_viewport(camera_transform, body_pos) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let distance = camera_pos.distance(body_pos);
        let fade = label_fade(config.label_fade_start, config.label_fade_end, distance);
        if fade <= 0.01 {
            *visibility = Visibility::Hidden;
            continue;
        }

        *visibility = Visibility::Visible;
        let scale = lerp(1.0, 0.6, 1.0 - fade);
        let font_size = label.base_font_size * scale;
        style.left = Val::Px(screen.x - font_size * 0.5);
        style.top = Val::Px(screen.y + LABEL_OFFSET_Y * scale);
        let section = &mut text.sections[0].style;
        section.font_size = font_size;
        section.color = Color::srgba(1.0, 1.0, 1.0, fade);
    }
}

/// Opacity for a label at `distance`: fully visible inside `start`, gone
/// past `end`.
pub fn label_fade(start: f32, end: f32, distance: f32) -> f32 {
    1.0 - distance_fraction(start, end, distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_opaque_up_close() {
        assert_eq!(label_fade(80.0, 220.0, 10.0), 1.0);
        assert_eq!(label_fade(80.0, 220.0, 80.0), 1.0);
    }

    #[test]
    fn labels_vanish_past_the_far_threshold() {
        assert_eq!(label_fade(80.0, 220.0, 220.0), 0.0);
        assert_eq!(label_fade(80.0, 220.0, 1000.0), 0.0);
    }

    #[test]
    fn fade_decreases_with_distance() {
        let mut last = f32::INFINITY;
        for distance in [0.0, 100.0, 150.0, 200.0, 300.0] {
            let fade = label_fade(80.0, 220.0, distance);
            assert!((0.0..=1.0).contains(&fade));
            assert!(fade <= last);
            last = fade;
        }
    }
}
