/// Orrery Rendering Module
/// Scene construction, bodies, camera, labels, effects, picking

pub mod bodies;
pub mod camera;
pub mod labels;
pub mod lighting;
pub mod perf;
pub mod picking;
pub mod post_processing;
pub mod scene;

use bevy::prelude::*;

use bodies::*;
use camera::*;
use labels::*;
use lighting::*;
use perf::*;
use picking::*;
use post_processing::*;
use scene::*;

pub struct OrreryRenderingPlugin;

impl Plugin for OrreryRenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickState>()
            // Scene construction
            .add_systems(
                Startup,
                (
                    setup_scene,
                    spawn_bodies.after(setup_scene),
                    setup_lighting.after(spawn_bodies),
                    setup_labels.after(spawn_bodies),
                    setup_sky_dome,
                    setup_camera,
                    attach_environment.after(setup_camera),
                    setup_post_processing,
                    setup_perf_scaler,
                ),
            )
            .add_systems(PostStartup, restore_focus)
            // Procedural animation, in registration order
            .add_systems(
                Update,
                (advance_orbits, spin_bodies, rotate_clouds, update_body_lod).chain(),
            )
            // Interaction and camera, in registration order
            .add_systems(
                Update,
                (
                    handle_pointer_input,
                    update_camera_rig,
                    apply_focus_requests,
                    update_focus_tween,
                    write_camera_transform,
                    sync_viewer_state,
                    apply_galaxy_scale,
                    sync_sky_dome_to_camera,
                    update_labels,
                )
                    .chain()
                    .after(update_body_lod),
            )
            // Effects and performance scaling
            .add_systems(
                Update,
                (run_perf_scaler, apply_effects, align_shaft_light).chain(),
            );
    }
}
