/// Lighting Module
/// Sun point light and the volumetric shaft light behind the god rays

use bevy::pbr::VolumetricLight;
use bevy::prelude::*;

use crate::core::components::{OrreryMainCamera, ShaftLight};
use crate::core::config::OrreryConfig;
use crate::core::resources::SceneContext;
use crate::rendering::camera::OrbitRig;

/// Marker for the point light parented at the sun.
#[derive(Component)]
pub struct SunLight;

pub fn setup_lighting(
    mut commands: Commands,
    config: Res<OrreryConfig>,
    context: Res<SceneContext>,
) {
    info!("Setting up lighting");

    let Some(sun) = context.sun else {
        warn!("no sun entity; lighting not spawned");
        return;
    };

    commands.entity(sun).with_children(|parent| {
        parent.spawn((
            SunLight,
            PointLightBundle {
                point_light: PointLight {
                    color: Color::srgb(1.0, 0.95, 0.85),
                    intensity: 2_000_000_000.0,
                    range: 3000.0,
                    shadows_enabled: config.quality.shadows_enabled(),
                    ..default()
                },
                ..default()
            },
            Name::new("Sunlight"),
        ));
    });

    // Bevy only renders volumetric shafts for directional lights, so a dim
    // directional stand-in is kept aimed from the sun toward the pivot.
    commands.spawn((
        ShaftLight,
        VolumetricLight,
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                color: Color::srgb(1.0, 0.9, 0.7),
                illuminance: 400.0,
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_rotation(Quat::from_rotation_x(
                -std::f32::consts::FRAC_PI_4,
            )),
            ..default()
        },
        Name::new("Sun Shafts"),
    ));
}

pub fn align_shaft_light(
    context: Res<SceneContext>,
    body_query: Query<&GlobalTransform>,
    rig_query: Query<&OrbitRig, With<OrreryMainCamera>>,
    mut shaft_query: Query<&mut Transform, With<ShaftLight>>,
) {
    let Some(sun) = context.sun else {
        return;
    };
    let Ok(sun_transform) = body_query.get(sun) else {
        return;
    };
    let Ok(rig) = rig_query.get_single() else {
        return;
    };
    let direction = (rig.pivot - sun_transform.translation()).normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }
    for mut transform in &mut shaft_query {
        transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, direction);
    }
}
