// Orrery Core Module
// Configuration, components, resources, events, and the sim clock

pub mod components;
pub mod config;
pub mod events;
pub mod math;
pub mod resources;
pub mod systems;

use bevy::prelude::*;

use events::*;
use resources::{SceneContext, SimClock, ViewerState, STATE_FILE};
use systems::*;

pub struct OrreryCorePlugin;

// The config resource is inserted by main() before the window plugin is
// built, since the window itself is configured from it.
impl Plugin for OrreryCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerState::restore(STATE_FILE))
            .init_resource::<SceneContext>()
            .init_resource::<SimClock>()
            .add_event::<FocusRequest>()
            .add_event::<FocusCompleted>()
            .add_event::<PerfDegraded>()
            .add_systems(First, advance_sim_clock)
            .add_systems(Last, save_viewer_state_on_exit);

        app.register_type::<components::SystemRoot>()
            .register_type::<components::SolarBody>()
            .register_type::<components::OrbitState>()
            .register_type::<components::AxialSpin>()
            .register_type::<components::CloudLayer>();
    }
}
