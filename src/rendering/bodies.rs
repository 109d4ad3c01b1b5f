/// Celestial Bodies Module
/// Spawns the sun and planets from a static catalog and animates them

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

use crate::core::components::{
    AxialSpin, BodyKind, CloudLayer, OrbitState, SolarBody, SystemRoot,
};
use crate::core::config::OrreryConfig;
use crate::core::resources::{BodyEntry, SceneContext, SimClock};

/// One catalog entry. Radii and distances are scene units, not physical;
/// orbit steps are radians per 60 Hz reference frame.
pub struct BodySpec {
    pub name: &'static str,
    pub kind: BodyKind,
    pub radius: f32,
    pub orbit_radius: f32,
    pub orbit_step: f32,
    pub initial_phase: f32,
    pub spin_speed: f32,
    pub base_color: [f32; 3],
    pub texture: Option<&'static str>,
    pub clouds: Option<CloudSpec>,
    pub ring: Option<RingSpec>,
}

pub struct CloudSpec {
    pub texture: &'static str,
    pub speed: f32,
}

pub struct RingSpec {
    pub texture: &'static str,
    pub inner: f32,
    pub outer: f32,
}

pub fn body_catalog() -> &'static [BodySpec] {
    const CATALOG: &[BodySpec] = &[
        BodySpec {
            name: "Sun",
            kind: BodyKind::Star,
            radius: 16.0,
            orbit_radius: 0.0,
            orbit_step: 0.0,
            initial_phase: 0.0,
            spin_speed: 0.0005,
            base_color: [1.0, 0.85, 0.45],
            texture: Some("textures/sun.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Mercury",
            kind: BodyKind::Planet,
            radius: 0.9,
            orbit_radius: 26.0,
            orbit_step: 0.0080,
            initial_phase: 0.4,
            spin_speed: 0.0008,
            base_color: [0.55, 0.52, 0.48],
            texture: Some("textures/mercury.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Venus",
            kind: BodyKind::Planet,
            radius: 1.6,
            orbit_radius: 36.0,
            orbit_step: 0.0058,
            initial_phase: 2.1,
            spin_speed: -0.0004,
            base_color: [0.85, 0.72, 0.48],
            texture: Some("textures/venus.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Earth",
            kind: BodyKind::Planet,
            radius: 1.7,
            orbit_radius: 48.0,
            orbit_step: 0.0048,
            initial_phase: 4.8,
            spin_speed: 0.0090,
            base_color: [0.35, 0.5, 0.75],
            texture: Some("textures/earth.jpg"),
            clouds: Some(CloudSpec {
                texture: "textures/earth_clouds.jpg",
                speed: 0.0022,
            }),
            ring: None,
        },
        BodySpec {
            name: "Mars",
            kind: BodyKind::Planet,
            radius: 1.1,
            orbit_radius: 62.0,
            orbit_step: 0.0038,
            initial_phase: 1.3,
            spin_speed: 0.0088,
            base_color: [0.78, 0.42, 0.26],
            texture: Some("textures/mars.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Jupiter",
            kind: BodyKind::Planet,
            radius: 6.5,
            orbit_radius: 92.0,
            orbit_step: 0.0021,
            initial_phase: 5.5,
            spin_speed: 0.0210,
            base_color: [0.76, 0.66, 0.54],
            texture: Some("textures/jupiter.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Saturn",
            kind: BodyKind::Planet,
            radius: 5.6,
            orbit_radius: 122.0,
            orbit_step: 0.0016,
            initial_phase: 0.9,
            spin_speed: 0.0200,
            base_color: [0.82, 0.74, 0.56],
            texture: Some("textures/saturn.jpg"),
            clouds: None,
            ring: Some(RingSpec {
                texture: "textures/saturn_ring.png",
                inner: 1.25,
                outer: 2.25,
            }),
        },
        BodySpec {
            name: "Uranus",
            kind: BodyKind::Planet,
            radius: 3.0,
            orbit_radius: 152.0,
            orbit_step: 0.0011,
            initial_phase: 3.7,
            spin_speed: -0.0120,
            base_color: [0.58, 0.78, 0.82],
            texture: Some("textures/uranus.jpg"),
            clouds: None,
            ring: None,
        },
        BodySpec {
            name: "Neptune",
            kind: BodyKind::Planet,
            radius: 2.9,
            orbit_radius: 180.0,
            orbit_step: 0.0009,
            initial_phase: 5.9,
            spin_speed: 0.0130,
            base_color: [0.3, 0.42, 0.85],
            texture: Some("textures/neptune.jpg"),
            clouds: None,
            ring: None,
        },
    ];
    CATALOG
}

/// Shared unit-radius sphere meshes at three tessellation levels. Bodies
/// carry their size in the transform scale, so every body swaps between
/// the same three handles.
#[derive(Resource)]
pub struct SphereLods {
    pub levels: [Handle<Mesh>; 3],
}

/// Picks the detail level from the camera distance, normalized by the
/// body's render radius.
pub fn lod_index(distance: f32, radius: f32) -> usize {
    let normalized = distance / radius.max(0.001);
    if normalized < 60.0 {
        0
    } else if normalized < 180.0 {
        1
    } else {
        2
    }
}

pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut context: ResMut<SceneContext>,
    root_query: Query<Entity, With<SystemRoot>>,
) {
    info!("Building solar system scene");

    let Ok(root) = root_query.get_single() else {
        warn!("no system root; bodies not spawned");
        return;
    };

    let lods = SphereLods {
        levels: [
            meshes.add(Sphere::new(1.0).mesh().uv(64, 32)),
            meshes.add(Sphere::new(1.0).mesh().uv(32, 18)),
            meshes.add(Sphere::new(1.0).mesh().uv(12, 8)),
        ],
    };

    for spec in body_catalog() {
        let entity = spawn_body(
            &mut commands,
            &mut meshes,
            &mut materials,
            &asset_server,
            &lods,
            spec,
            root,
        );
        if spec.kind == BodyKind::Star {
            context.sun = Some(entity);
        }
        context.bodies.push(BodyEntry {
            entity,
            name: spec.name.to_string(),
            kind: spec.kind,
        });
    }

    commands.insert_resource(lods);
    info!("spawned {} bodies", context.bodies.len());
}

fn spawn_body(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
    lods: &SphereLods,
    spec: &BodySpec,
    root: Entity,
) -> Entity {
    let base_color = Color::srgb(spec.base_color[0], spec.base_color[1], spec.base_color[2]);
    let material = match spec.kind {
        BodyKind::Star => materials.add(StandardMaterial {
            base_color,
            base_color_texture: spec.texture.map(|path| asset_server.load(path)),
            emissive: base_color.to_linear() * 8.0,
            emissive_texture: spec.texture.map(|path| asset_server.load(path)),
            perceptual_roughness: 1.0,
            ..default()
        }),
        BodyKind::Planet => materials.add(StandardMaterial {
            base_color,
            base_color_texture: spec.texture.map(|path| asset_server.load(path)),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        }),
    };

    let orbit = OrbitState::new(Vec3::ZERO, spec.orbit_radius, spec.orbit_step, spec.initial_phase);
    let position = Vec3::from_array(orbit.phase.position(orbit.center.to_array(), orbit.radius));

    let entity = commands
        .spawn((
            SolarBody {
                name: spec.name.to_string(),
                kind: spec.kind,
                radius: spec.radius,
            },
            AxialSpin { speed: spec.spin_speed },
            PbrBundle {
                mesh: lods.levels[0].clone(),
                material,
                transform: Transform::from_translation(position)
                    .with_scale(Vec3::splat(spec.radius)),
                ..default()
            },
            Name::new(spec.name),
        ))
        .id();
    commands.entity(entity).set_parent(root);

    if spec.kind == BodyKind::Planet {
        commands.entity(entity).insert(orbit);
    } else {
        commands.entity(entity).insert(NotShadowCaster);
    }

    if let Some(clouds) = &spec.clouds {
        let cloud_material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.4),
            base_color_texture: Some(asset_server.load(clouds.texture)),
            alpha_mode: AlphaMode::Blend,
            perceptual_roughness: 1.0,
            ..default()
        });
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                CloudLayer { speed: clouds.speed },
                NotShadowCaster,
                PbrBundle {
                    mesh: lods.levels[0].clone(),
                    material: cloud_material,
                    transform: Transform::from_scale(Vec3::splat(1.03)),
                    ..default()
                },
                Name::new(format!("{} Clouds", spec.name)),
            ));
        });
    }

    if let Some(ring) = &spec.ring {
        let ring_material = materials.add(StandardMaterial {
            base_color: Color::srgba(0.9, 0.85, 0.7, 0.8),
            base_color_texture: Some(asset_server.load(ring.texture)),
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            double_sided: true,
            unlit: true,
            ..default()
        });
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                NotShadowCaster,
                PbrBundle {
                    mesh: meshes.add(Annulus::new(ring.inner, ring.outer)),
                    material: ring_material,
                    transform: Transform::from_rotation(Quat::from_rotation_x(
                        -std::f32::consts::FRAC_PI_2,
                    )),
                    ..default()
                },
                Name::new(format!("{} Ring", spec.name)),
            ));
        });
    }

    entity
}

/// Advances every planet's phase accumulators and recomputes its position
/// around the sun position captured at spawn.
pub fn advance_orbits(
    clock: Res<SimClock>,
    config: Res<OrreryConfig>,
    mut query: Query<(&mut Transform, &mut OrbitState)>,
) {
    for (mut transform, mut orbit) in &mut query {
        let step = orbit.step * config.orbit_speed;
        let ratio = clock.ratio;
        orbit.phase.advance(step, ratio);
        transform.translation =
            Vec3::from_array(orbit.phase.position(orbit.center.to_array(), orbit.radius));
    }
}

pub fn spin_bodies(clock: Res<SimClock>, mut query: Query<(&mut Transform, &AxialSpin)>) {
    for (mut transform, spin) in &mut query {
        transform.rotate_y(spin.speed * clock.ratio);
    }
}

/// Cloud shells drift against the planet's spin.
pub fn rotate_clouds(clock: Res<SimClock>, mut query: Query<(&mut Transform, &CloudLayer)>) {
    for (mut transform, clouds) in &mut query {
        transform.rotate_y(-clouds.speed * clock.ratio);
    }
}

pub fn update_body_lod(
    lods: Option<Res<SphereLods>>,
    camera_query: Query<&GlobalTransform, With<crate::core::components::OrreryMainCamera>>,
    mut body_query: Query<(&GlobalTransform, &SolarBody, &mut Handle<Mesh>)>,
) {
    let Some(lods) = lods else {
        return;
    };
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    let camera_pos = camera.translation();
    for (transform, body, mut mesh) in &mut body_query {
        let distance = camera_pos.distance(transform.translation());
        let level = lod_index(distance, body.radius);
        let wanted = &lods.levels[level];
        if *mesh != *wanted {
            *mesh = wanted.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in body_catalog() {
            assert!(seen.insert(spec.name), "duplicate body name {}", spec.name);
        }
    }

    #[test]
    fn catalog_has_one_star_at_center() {
        let stars: Vec<_> = body_catalog()
            .iter()
            .filter(|spec| spec.kind == BodyKind::Star)
            .collect();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].orbit_radius, 0.0);
        assert_eq!(stars[0].orbit_step, 0.0);
    }

    #[test]
    fn planets_orbit_outside_the_sun() {
        let sun_radius = body_catalog()
            .iter()
            .find(|spec| spec.kind == BodyKind::Star)
            .unwrap()
            .radius;
        for spec in body_catalog() {
            if spec.kind == BodyKind::Planet {
                assert!(spec.orbit_radius > sun_radius, "{} orbits inside sun", spec.name);
            }
        }
    }

    #[test]
    fn lod_levels_step_down_with_distance() {
        let radius = 2.0;
        assert_eq!(lod_index(10.0, radius), 0);
        assert_eq!(lod_index(200.0, radius), 1);
        assert_eq!(lod_index(1000.0, radius), 2);
        // monotone in distance
        let mut last = 0;
        for d in [1.0, 50.0, 150.0, 400.0, 2000.0] {
            let level = lod_index(d, radius);
            assert!(level >= last);
            last = level;
        }
    }
}
