/// 3D Scene Module
/// System root, star dome, HDR environment, and galaxy-scaling mode

use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;

use crate::core::components::{OrreryMainCamera, SkyDome, SystemRoot};
use crate::core::config::OrreryConfig;
use crate::core::math::{distance_fraction, lerp};
use crate::core::resources::SceneContext;
use crate::rendering::camera::OrbitRig;

pub fn setup_scene(mut commands: Commands, mut context: ResMut<SceneContext>) {
    info!("Setting up scene root");

    let root = commands
        .spawn((
            SystemRoot,
            Name::new("System Root"),
            SpatialBundle::default(),
        ))
        .id();
    context.root = Some(root);

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.7, 0.75, 0.9),
        brightness: 60.0,
    });
}

/// Large inverted star sphere standing in for a skybox; it tracks the
/// camera so the stars never parallax.
pub fn setup_sky_dome(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    let sky_mesh = meshes.add(Sphere::new(1.0).mesh().uv(48, 24));
    let sky_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(asset_server.load("textures/stars_milky_way.jpg")),
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    });
    commands.spawn((
        SkyDome,
        NotShadowCaster,
        NotShadowReceiver,
        PbrBundle {
            mesh: sky_mesh,
            material: sky_material,
            transform: Transform::from_scale(Vec3::splat(4000.0)),
            ..default()
        },
        Name::new("Sky Dome"),
    ));
}

/// Image-based lighting from prefiltered environment maps on the camera.
pub fn attach_environment(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    camera_query: Query<Entity, With<OrreryMainCamera>>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    commands.entity(camera).insert(EnvironmentMapLight {
        diffuse_map: asset_server.load("environment/space_diffuse.ktx2"),
        specular_map: asset_server.load("environment/space_specular.ktx2"),
        intensity: 150.0,
    });
}

pub fn sync_sky_dome_to_camera(
    camera_query: Query<&Transform, (With<OrreryMainCamera>, Without<SkyDome>)>,
    mut sky_query: Query<&mut Transform, (With<SkyDome>, Without<OrreryMainCamera>)>,
) {
    let Ok(camera_transform) = camera_query.get_single() else {
        return;
    };
    for mut transform in &mut sky_query {
        transform.translation = camera_transform.translation;
    }
}

/// Shrinks the whole system uniformly as the camera pulls out past the
/// galaxy threshold, so the far view reads as a distant galaxy.
pub fn apply_galaxy_scale(
    config: Res<OrreryConfig>,
    rig_query: Query<&OrbitRig, With<OrreryMainCamera>>,
    mut root_query: Query<&mut Transform, With<SystemRoot>>,
) {
    let Ok(rig) = rig_query.get_single() else {
        return;
    };
    let Ok(mut transform) = root_query.get_single_mut() else {
        return;
    };
    let scale = galaxy_scale(
        config.galaxy_start,
        config.galaxy_end,
        config.galaxy_min_scale,
        rig.radius,
    );
    transform.scale = Vec3::splat(scale);
}

pub fn galaxy_scale(start: f32, end: f32, min_scale: f32, camera_radius: f32) -> f32 {
    let fraction = distance_fraction(start, end, camera_radius);
    lerp(1.0, min_scale, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn galaxy_scale_is_unity_inside_threshold() {
        assert_eq!(galaxy_scale(250.0, 600.0, 0.15, 100.0), 1.0);
        assert_eq!(galaxy_scale(250.0, 600.0, 0.15, 250.0), 1.0);
    }

    #[test]
    fn galaxy_scale_bottoms_out_at_min() {
        assert_eq!(galaxy_scale(250.0, 600.0, 0.15, 600.0), 0.15);
        assert_eq!(galaxy_scale(250.0, 600.0, 0.15, 5000.0), 0.15);
    }

    #[test]
    fn galaxy_scale_shrinks_monotonically() {
        let mut last = f32::INFINITY;
        for radius in [100.0, 300.0, 400.0, 500.0, 700.0] {
            let scale = galaxy_scale(250.0, 600.0, 0.15, radius);
            assert!(scale <= last);
            last = scale;
        }
    }
}
