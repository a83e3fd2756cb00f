// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Default recency window over which samples contribute to the velocity
/// estimate, in milliseconds.
pub const DEFAULT_WINDOW_MS: f64 = 100.0;

/// Default minimum regression weight, so the oldest retained sample is never
/// fully discounted.
pub const DEFAULT_WEIGHT_FLOOR: f64 = 0.1;

/// Regression denominators at or below this are treated as degenerate.
const DENOMINATOR_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug)]
struct Sample {
    pos: Point,
    t_ms: f64,
}

/// Windowed position history for one pan gesture, with an instantaneous
/// velocity estimate.
///
/// The tracker retains `(position, timestamp)` samples for the gesture in
/// progress, pruning from the front anything older than the recency window.
/// Velocity is a *weighted linear regression* of position against time over
/// the retained window: each sample's weight falls off linearly with age and
/// is floored at a minimum. Pointer events arrive at irregular intervals, so
/// two-point finite differencing is noisy; the regression smooths that out
/// while staying a closed-form O(window) computation on a window bounded by
/// the time cutoff.
///
/// Call [`VelocityTracker::start`] once per gesture, then
/// [`VelocityTracker::track`] on every move. The tracker carries no state
/// between gestures.
///
/// ```rust
/// use driftfield_momentum::VelocityTracker;
/// use kurbo::Point;
///
/// let mut tracker = VelocityTracker::new();
/// tracker.start(Point::new(0.0, 0.0), 0.0);
/// let velocity = tracker.track(Point::new(10.0, 0.0), 50.0);
/// // 10 px over 50 ms is 200 px/s.
/// assert!((velocity.x - 200.0).abs() < 1e-6);
/// assert_eq!(velocity.y, 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; 16]>,
    window_ms: f64,
    weight_floor: f64,
}

impl VelocityTracker {
    /// Creates a tracker with the default window and weight floor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEFAULT_WINDOW_MS, DEFAULT_WEIGHT_FLOOR)
    }

    /// Creates a tracker with a custom recency window and weight floor.
    #[must_use]
    pub fn with_window(window_ms: f64, weight_floor: f64) -> Self {
        Self {
            samples: SmallVec::new(),
            window_ms,
            weight_floor,
        }
    }

    /// Begins a new gesture at `pos`, discarding any previous history.
    ///
    /// Must be called exactly once per gesture, before any
    /// [`VelocityTracker::track`] calls.
    pub fn start(&mut self, pos: Point, now_ms: f64) {
        self.samples.clear();
        self.samples.push(Sample { pos, t_ms: now_ms });
    }

    /// Records a move sample and returns the current velocity estimate in
    /// pixels per second.
    ///
    /// Timestamps must be monotonically non-decreasing within a gesture;
    /// samples that have aged out of the recency window relative to this
    /// newest sample are pruned from the front.
    pub fn track(&mut self, pos: Point, now_ms: f64) -> Vec2 {
        self.samples.push(Sample { pos, t_ms: now_ms });
        self.prune(now_ms);
        self.velocity(now_ms)
    }

    /// Estimates the instantaneous velocity at `now_ms`, in pixels per
    /// second.
    ///
    /// Only samples within the recency window ending at `now_ms` contribute,
    /// so a pause before release (no move events while holding still) decays
    /// naturally to zero instead of replaying stale motion. Fewer than two
    /// contributing samples, or samples that all share one timestamp, yield
    /// `Vec2::ZERO`.
    #[must_use]
    pub fn velocity(&self, now_ms: f64) -> Vec2 {
        let cutoff = now_ms - self.window_ms;
        let live = self.samples.iter().filter(|s| s.t_ms >= cutoff);

        let mut weight_sum = 0.0;
        let mut t_sum = 0.0;
        let mut x_sum = 0.0;
        let mut y_sum = 0.0;
        let mut count = 0_usize;
        for sample in live.clone() {
            let w = self.weight(now_ms - sample.t_ms);
            weight_sum += w;
            t_sum += w * sample.t_ms;
            x_sum += w * sample.pos.x;
            y_sum += w * sample.pos.y;
            count += 1;
        }
        if count < 2 {
            return Vec2::ZERO;
        }

        let t_mean = t_sum / weight_sum;
        let x_mean = x_sum / weight_sum;
        let y_mean = y_sum / weight_sum;

        let mut denominator = 0.0;
        let mut x_numerator = 0.0;
        let mut y_numerator = 0.0;
        for sample in live {
            let w = self.weight(now_ms - sample.t_ms);
            let dt = sample.t_ms - t_mean;
            denominator += w * dt * dt;
            x_numerator += w * dt * (sample.pos.x - x_mean);
            y_numerator += w * dt * (sample.pos.y - y_mean);
        }
        if denominator <= DENOMINATOR_EPSILON {
            return Vec2::ZERO;
        }

        // Slopes are px/ms; report px/s.
        Vec2::new(
            x_numerator / denominator * 1000.0,
            y_numerator / denominator * 1000.0,
        )
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discards all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn prune(&mut self, newest_ms: f64) {
        let cutoff = newest_ms - self.window_ms;
        let keep_from = self
            .samples
            .iter()
            .position(|s| s.t_ms >= cutoff)
            .unwrap_or(self.samples.len());
        if keep_from > 0 {
            self.samples.drain(..keep_from);
        }
    }

    fn weight(&self, age_ms: f64) -> f64 {
        (1.0 - age_ms / self.window_ms).max(self.weight_floor)
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}
