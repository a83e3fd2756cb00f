// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Largest gap between pointer samples, in milliseconds, still treated as
/// continuous motion.
const MAX_SAMPLE_GAP_MS: f64 = 100.0;

/// Divisor taming raw pointer speed down to impulse-sized velocities.
const SPEED_SCALE: f64 = 50.0;

/// Finite-difference pointer velocity for flow-field impulses.
///
/// This is deliberately simpler than the drag path's regression-based
/// tracker: impulses are decorative and immediately diffused and damped, so
/// sample noise is harmless and a two-point estimate is enough. Gaps longer
/// than 100 ms (typically the first event after the pointer re-enters, or a
/// stall) produce no impulse rather than a huge spurious one.
///
/// ```rust
/// use driftfield_flow::PointerProbe;
/// use kurbo::Point;
///
/// let mut probe = PointerProbe::new();
/// assert!(probe.observe(Point::new(0.0, 0.0), 0.0).is_none());
/// let impulse = probe.observe(Point::new(10.0, 0.0), 20.0).unwrap();
/// // 10 px over 20 ms is 500 px/s, scaled down by 50.
/// assert!((impulse.x - 10.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerProbe {
    last: Option<(Point, f64)>,
}

impl PointerProbe {
    /// Creates a probe with no pointer history.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Records a pointer position, returning the impulse velocity to inject
    /// if this sample continues recent motion.
    ///
    /// Returns `None` for the first sample after construction, after
    /// [`PointerProbe::leave`], or when the gap since the previous sample is
    /// non-positive or at least 100 ms.
    pub fn observe(&mut self, position: Point, now_ms: f64) -> Option<Vec2> {
        let previous = self.last.replace((position, now_ms));
        let (previous_position, previous_ms) = previous?;
        let gap_ms = now_ms - previous_ms;
        if gap_ms <= 0.0 || gap_ms >= MAX_SAMPLE_GAP_MS {
            return None;
        }
        let dt_seconds = gap_ms / 1000.0;
        Some((position - previous_position) / dt_seconds / SPEED_SCALE)
    }

    /// Forgets the pointer history; call when the pointer leaves the panel.
    pub fn leave(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_produces_nothing() {
        let mut probe = PointerProbe::new();
        assert!(probe.observe(Point::new(5.0, 5.0), 100.0).is_none());
    }

    #[test]
    fn velocity_is_scaled_finite_difference() {
        let mut probe = PointerProbe::new();
        probe.observe(Point::new(0.0, 0.0), 0.0);
        let impulse = probe.observe(Point::new(5.0, -10.0), 10.0).unwrap();
        // (5, -10) px over 10 ms is (500, -1000) px/s; divided by 50.
        assert!((impulse.x - 10.0).abs() < 1e-9);
        assert!((impulse.y + 20.0).abs() < 1e-9);
    }

    #[test]
    fn long_gaps_produce_nothing() {
        let mut probe = PointerProbe::new();
        probe.observe(Point::new(0.0, 0.0), 0.0);
        assert!(probe.observe(Point::new(50.0, 0.0), 100.0).is_none());
        // The rejected sample still becomes history for the next one.
        assert!(probe.observe(Point::new(60.0, 0.0), 110.0).is_some());
    }

    #[test]
    fn zero_or_negative_gaps_produce_nothing() {
        let mut probe = PointerProbe::new();
        probe.observe(Point::new(0.0, 0.0), 50.0);
        assert!(probe.observe(Point::new(10.0, 0.0), 50.0).is_none());
    }

    #[test]
    fn leave_resets_history() {
        let mut probe = PointerProbe::new();
        probe.observe(Point::new(0.0, 0.0), 0.0);
        probe.leave();
        assert!(probe.observe(Point::new(10.0, 0.0), 10.0).is_none());
    }
}
