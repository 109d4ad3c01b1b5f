// Orrery Core Math
// Pure helpers driving label fade, galaxy scaling, focus easing and orbits

/// Maps `value` into [0, 1] between the `start` and `end` thresholds.
///
/// Returns 0 at or below `start`, 1 at or beyond `end`, and the linear
/// fraction in between. Degenerate ranges are a caller bug: `start == end`
/// would divide by zero, so it asserts instead of returning NaN.
pub fn distance_fraction(start: f32, end: f32, value: f32) -> f32 {
    assert!(
        start != end,
        "distance_fraction called with a degenerate range (start == end == {start})"
    );
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

/// Cubic ease-in-out over t in [0, 1], used by the camera focus tween.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = -2.0 * t + 2.0;
        1.0 - f * f * f / 2.0
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Per-axis orbit phase accumulators.
///
/// The x and z phases advance by the same step but are tracked separately,
/// so the walk is not re-normalized to a single circular parameter and can
/// drift off a perfect circle over very long runs. That drift is part of
/// the demo's look and is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitPhase {
    pub x: f32,
    pub z: f32,
}

impl OrbitPhase {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(initial: f32) -> Self {
        Self { x: initial, z: initial }
    }

    /// Advances both accumulators by `step` scaled by the frame-timing
    /// ratio (1.0 at the 60 Hz reference frame).
    pub fn advance(&mut self, step: f32, ratio: f32) {
        self.x += step * ratio;
        self.z += step * ratio;
    }

    /// Position on the orbit of `radius` around `center`, in the XZ plane.
    pub fn position(&self, center: [f32; 3], radius: f32) -> [f32; 3] {
        [
            center[0] + radius * self.x.cos(),
            center[1],
            center[2] + radius * self.z.sin(),
        ]
    }
}

/// Frame-timing ratio normalizing a frame delta to the 60 Hz reference.
pub fn animation_ratio(delta_seconds: f32) -> f32 {
    delta_seconds * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn distance_fraction_endpoints() {
        assert_eq!(distance_fraction(10.0, 20.0, 5.0), 0.0);
        assert_eq!(distance_fraction(10.0, 20.0, 10.0), 0.0);
        assert_eq!(distance_fraction(10.0, 20.0, 20.0), 1.0);
        assert_eq!(distance_fraction(10.0, 20.0, 25.0), 1.0);
        assert_eq!(distance_fraction(10.0, 20.0, 15.0), 0.5);
    }

    #[test]
    fn distance_fraction_is_monotone() {
        let mut last = 0.0;
        for i in 0..=100 {
            let value = 8.0 + i as f32 * 0.2;
            let f = distance_fraction(10.0, 20.0, value);
            assert!((0.0..=1.0).contains(&f));
            assert!(f >= last);
            last = f;
        }
    }

    #[test]
    #[should_panic(expected = "degenerate range")]
    fn distance_fraction_rejects_empty_range() {
        distance_fraction(5.0, 5.0, 5.0);
    }

    #[test]
    fn ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // out-of-range input clamps rather than extrapolating
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn orbit_phase_is_periodic() {
        let step = TAU / 360.0;
        let mut phase = OrbitPhase::ZERO;
        let start = phase.position([0.0, 0.0, 0.0], 10.0);
        for _ in 0..360 {
            phase.advance(step, 1.0);
        }
        let end = phase.position([0.0, 0.0, 0.0], 10.0);
        for (a, b) in start.iter().zip(end.iter()) {
            assert!((a - b).abs() < 1e-3, "{start:?} vs {end:?}");
        }
    }

    #[test]
    fn orbit_phase_scales_with_ratio() {
        let mut a = OrbitPhase::ZERO;
        let mut b = OrbitPhase::ZERO;
        a.advance(0.01, 2.0);
        b.advance(0.01, 1.0);
        b.advance(0.01, 1.0);
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.z - b.z).abs() < 1e-6);
    }

    #[test]
    fn orbit_position_offsets_from_center() {
        let phase = OrbitPhase::ZERO;
        let pos = phase.position([5.0, 1.0, -3.0], 2.0);
        assert_eq!(pos, [7.0, 1.0, -3.0]);
    }

    #[test]
    fn animation_ratio_is_unity_at_sixty_hz() {
        assert!((animation_ratio(1.0 / 60.0) - 1.0).abs() < 1e-6);
    }
}
