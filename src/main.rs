// Orrery - Main Entry Point
// A 3D solar-system visual demo built on Bevy

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowMode};

mod core;
mod rendering;

use crate::core::config::{OrreryConfig, CONFIG_FILE};
use crate::core::OrreryCorePlugin;
use rendering::OrreryRenderingPlugin;

fn main() {
    let config = OrreryConfig::load_or_default(CONFIG_FILE);

    let present_mode = if config.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window_title.clone(),
                resolution: (config.window_width, config.window_height).into(),
                mode: WindowMode::Windowed,
                present_mode,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        .add_plugins(OrreryCorePlugin)
        .add_plugins(OrreryRenderingPlugin)
        .run();
}
