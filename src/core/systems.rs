// Orrery Core Systems
// Clock bookkeeping and viewer-state persistence

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::core::math::animation_ratio;
use crate::core::resources::{SimClock, ViewerState, STATE_FILE};

pub fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.elapsed = time.elapsed_seconds();
    clock.ratio = animation_ratio(time.delta_seconds());
    clock.frame += 1;
}

/// Writes the viewer state file when the app shuts down, the native
/// stand-in for the original's hot-reload dispose hook.
pub fn save_viewer_state_on_exit(
    mut exit_events: EventReader<AppExit>,
    state: Res<ViewerState>,
) {
    if exit_events.read().next().is_none() {
        return;
    }
    match state.save(STATE_FILE) {
        Ok(()) => info!("saved viewer state to {STATE_FILE}"),
        Err(err) => warn!("failed to save viewer state: {err}"),
    }
}
