/// Performance Scaling Module
/// Degrades effects step by step while the frame rate sits under target

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::core::config::OrreryConfig;
use crate::core::events::PerfDegraded;
use crate::rendering::post_processing::EffectSettings;

/// One rung of the degrade ladder, cheapest savings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeStep {
    DisableMsaa,
    DisableGodRays,
    DisableChromaticAberration,
    DisableBloom,
    DisableShadows,
}

pub const DEGRADE_LADDER: [DegradeStep; 5] = [
    DegradeStep::DisableMsaa,
    DegradeStep::DisableGodRays,
    DegradeStep::DisableChromaticAberration,
    DegradeStep::DisableBloom,
    DegradeStep::DisableShadows,
];

/// Ladder walker. Each evaluation under target advances one rung; the
/// scaler never climbs back up.
#[derive(Debug)]
pub struct PerfScaler {
    target_fps: f32,
    next_rung: usize,
}

impl PerfScaler {
    pub fn new(target_fps: f32) -> Self {
        Self {
            target_fps,
            next_rung: 0,
        }
    }

    pub fn evaluate(&mut self, fps: f32) -> Option<DegradeStep> {
        if fps >= self.target_fps {
            return None;
        }
        let step = DEGRADE_LADDER.get(self.next_rung).copied()?;
        self.next_rung += 1;
        Some(step)
    }

    pub fn exhausted(&self) -> bool {
        self.next_rung >= DEGRADE_LADDER.len()
    }
}

pub fn apply_degrade_step(settings: &mut EffectSettings, step: DegradeStep) {
    match step {
        DegradeStep::DisableMsaa => settings.msaa_samples = 1,
        DegradeStep::DisableGodRays => settings.god_rays = false,
        DegradeStep::DisableChromaticAberration => settings.chromatic_aberration = false,
        DegradeStep::DisableBloom => settings.bloom = false,
        DegradeStep::DisableShadows => settings.shadows = false,
    }
}

#[derive(Resource)]
pub struct PerfState {
    pub scaler: PerfScaler,
    pub timer: Timer,
}

pub fn setup_perf_scaler(mut commands: Commands, config: Res<OrreryConfig>) {
    commands.insert_resource(PerfState {
        scaler: PerfScaler::new(config.target_fps),
        timer: Timer::from_seconds(config.perf_check_interval, TimerMode::Repeating),
    });
}

pub fn run_perf_scaler(
    time: Res<Time>,
    diagnostics: Res<DiagnosticsStore>,
    mut state: ResMut<PerfState>,
    mut settings: ResMut<EffectSettings>,
    mut events: EventWriter<PerfDegraded>,
) {
    if !state.timer.tick(time.delta()).just_finished() || state.scaler.exhausted() {
        return;
    }
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|diagnostic| diagnostic.smoothed())
    else {
        return;
    };
    let fps = fps as f32;

    if let Some(step) = state.scaler.evaluate(fps) {
        warn!("frame rate {fps:.0} below target; applying {step:?}");
        apply_degrade_step(&mut settings, step);
        events.send(PerfDegraded {
            step,
            measured_fps: fps,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EffectSettings {
        EffectSettings {
            bloom: true,
            chromatic_aberration: true,
            god_rays: true,
            msaa_samples: 4,
            shadows: true,
        }
    }

    #[test]
    fn no_action_while_on_target() {
        let mut scaler = PerfScaler::new(50.0);
        assert_eq!(scaler.evaluate(60.0), None);
        assert_eq!(scaler.evaluate(50.0), None);
        // the ladder position did not advance
        assert_eq!(scaler.evaluate(20.0), Some(DegradeStep::DisableMsaa));
    }

    #[test]
    fn ladder_applies_in_order_and_stops() {
        let mut scaler = PerfScaler::new(50.0);
        let mut applied = Vec::new();
        while let Some(step) = scaler.evaluate(10.0) {
            applied.push(step);
        }
        assert_eq!(applied, DEGRADE_LADDER.to_vec());
        assert!(scaler.exhausted());
        assert_eq!(scaler.evaluate(10.0), None);
    }

    #[test]
    fn steps_toggle_the_matching_setting() {
        let mut effects = settings();
        apply_degrade_step(&mut effects, DegradeStep::DisableMsaa);
        assert_eq!(effects.msaa_samples, 1);
        apply_degrade_step(&mut effects, DegradeStep::DisableGodRays);
        assert!(!effects.god_rays);
        apply_degrade_step(&mut effects, DegradeStep::DisableChromaticAberration);
        assert!(!effects.chromatic_aberration);
        apply_degrade_step(&mut effects, DegradeStep::DisableBloom);
        assert!(!effects.bloom);
        apply_degrade_step(&mut effects, DegradeStep::DisableShadows);
        assert!(!effects.shadows);
    }

    #[test]
    fn recovery_above_target_pauses_mid_ladder() {
        let mut scaler = PerfScaler::new(50.0);
        assert_eq!(scaler.evaluate(30.0), Some(DegradeStep::DisableMsaa));
        assert_eq!(scaler.evaluate(55.0), None);
        assert_eq!(scaler.evaluate(30.0), Some(DegradeStep::DisableGodRays));
    }
}
