// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bitflags::bitflags;
use kurbo::{Point, Vec2};

/// Tunables for the inertial glide.
///
/// The defaults reproduce the feel of classic kinetic scrolling: releasing a
/// drag at velocity `v` overshoots by `amplitude * v` pixels and eases back
/// exponentially with the given time constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    /// Minimum per-axis velocity, in px/s, for that axis to glide at all.
    pub min_velocity: f64,
    /// Velocity multiplier determining the glide distance.
    pub amplitude: f64,
    /// Exponential decay time constant in milliseconds; higher glides
    /// longer.
    pub time_constant_ms: f64,
    /// Remaining per-axis displacement, in pixels, below which that axis is
    /// frozen at its target.
    pub stop_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            min_velocity: 5.0,
            amplitude: 0.25,
            time_constant_ms: 342.0,
            stop_threshold: 0.5,
        }
    }
}

bitflags! {
    /// Axes still animating within a glide.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct GlideAxes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
    }
}

/// Outcome of [`GlideAnimator::begin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlideStart {
    /// Both axes were below the velocity threshold. The position is already
    /// settled and no frame will be scheduled.
    Settled(Point),
    /// A glide is running; advance it with [`GlideAnimator::step`].
    Gliding {
        /// The resting position the glide decays toward.
        target: Point,
    },
}

/// One emitted glide frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideFrame {
    /// Position to display for this frame.
    pub position: Point,
    /// `true` on the final frame; `position` then equals the target exactly
    /// and the animator is idle again.
    pub settled: bool,
}

#[derive(Clone, Debug)]
struct Glide {
    target: Point,
    amplitude: Vec2,
    start_ms: f64,
    axes: GlideAxes,
    last_position: Point,
}

/// Exponentially decaying free-glide animation for the post-release phase of
/// a pan gesture.
///
/// [`GlideAnimator::begin`] takes the release position and the tracker's
/// velocity estimate. Each axis is considered independently: an axis whose
/// velocity exceeds [`MomentumConfig::min_velocity`] receives a displacement
/// amplitude of `amplitude * velocity` added to its target; a sub-threshold
/// axis does not animate. The displayed position at elapsed time `t` is
/// `target - amplitude * exp(-t / time_constant)` per active axis, so the
/// first frame starts at the release position and the motion eases into the
/// target. An axis whose remaining displacement falls below
/// [`MomentumConfig::stop_threshold`] is frozen at the target; once both
/// axes are frozen the glide reports itself settled and stops.
///
/// Only one glide can be active; `begin` cancels any prior run
/// (cancel-then-restart, not queueing). [`GlideAnimator::cancel`] reports
/// whether a run was actually live, which callers use to detect external
/// state that went stale during the animation.
#[derive(Clone, Debug, Default)]
pub struct GlideAnimator {
    config: MomentumConfig,
    active: Option<Glide>,
}

impl GlideAnimator {
    /// Creates an animator with the given configuration.
    #[must_use]
    pub fn new(config: MomentumConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// The animator's configuration.
    #[must_use]
    pub fn config(&self) -> &MomentumConfig {
        &self.config
    }

    /// Starts a glide from `current` with the given release velocity in
    /// px/s, cancelling any glide already in flight.
    ///
    /// Returns [`GlideStart::Settled`] without scheduling anything when both
    /// axes are below the velocity threshold.
    pub fn begin(&mut self, current: Point, velocity: Vec2, now_ms: f64) -> GlideStart {
        self.cancel();

        let mut amplitude = Vec2::ZERO;
        let mut target = current;
        let mut axes = GlideAxes::empty();
        if velocity.x.abs() > self.config.min_velocity {
            amplitude.x = self.config.amplitude * velocity.x;
            target.x += amplitude.x;
            axes |= GlideAxes::X;
        }
        if velocity.y.abs() > self.config.min_velocity {
            amplitude.y = self.config.amplitude * velocity.y;
            target.y += amplitude.y;
            axes |= GlideAxes::Y;
        }

        if axes.is_empty() {
            return GlideStart::Settled(current);
        }
        self.active = Some(Glide {
            target,
            amplitude,
            start_ms: now_ms,
            axes,
            last_position: current,
        });
        GlideStart::Gliding { target }
    }

    /// Advances the glide to `now_ms`, returning the frame to display, or
    /// `None` if no glide is active.
    ///
    /// The final frame has [`GlideFrame::settled`] set and leaves the
    /// animator idle.
    pub fn step(&mut self, now_ms: f64) -> Option<GlideFrame> {
        let glide = self.active.as_mut()?;
        let elapsed = now_ms - glide.start_ms;
        let decay = (-elapsed / self.config.time_constant_ms).exp();

        let mut position = glide.target;
        if glide.axes.contains(GlideAxes::X) {
            let dx = -glide.amplitude.x * decay;
            if dx.abs() > self.config.stop_threshold {
                position.x = glide.target.x + dx;
            } else {
                glide.axes.remove(GlideAxes::X);
            }
        }
        if glide.axes.contains(GlideAxes::Y) {
            let dy = -glide.amplitude.y * decay;
            if dy.abs() > self.config.stop_threshold {
                position.y = glide.target.y + dy;
            } else {
                glide.axes.remove(GlideAxes::Y);
            }
        }

        glide.last_position = position;
        if glide.axes.is_empty() {
            let frame = GlideFrame {
                position: glide.target,
                settled: true,
            };
            self.active = None;
            Some(frame)
        } else {
            Some(GlideFrame {
                position,
                settled: false,
            })
        }
    }

    /// Cancels any in-flight glide immediately; no frame is emitted.
    ///
    /// Returns `true` if a glide was actually running.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Returns `true` while a glide is in flight.
    #[must_use]
    pub fn is_gliding(&self) -> bool {
        self.active.is_some()
    }

    /// The most recently emitted position of the in-flight glide, if any.
    ///
    /// Callers resynchronize externally tracked state from this before
    /// cancelling a glide to start a new gesture.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.active.as_ref().map(|glide| glide.last_position)
    }

    /// The resting position of the in-flight glide, if any.
    #[must_use]
    pub fn target(&self) -> Option<Point> {
        self.active.as_ref().map(|glide| glide.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_velocity_settles_immediately() {
        let mut animator = GlideAnimator::default();
        let start = animator.begin(Point::new(10.0, 20.0), Vec2::ZERO, 0.0);
        assert_eq!(start, GlideStart::Settled(Point::new(10.0, 20.0)));
        assert!(!animator.is_gliding());
        assert!(animator.step(16.0).is_none());
    }

    #[test]
    fn sub_threshold_axes_do_not_animate() {
        let mut animator = GlideAnimator::default();
        // Both components below the 5 px/s default threshold.
        let start = animator.begin(Point::ORIGIN, Vec2::new(4.9, -4.9), 0.0);
        assert_eq!(start, GlideStart::Settled(Point::ORIGIN));
    }

    #[test]
    fn amplitude_offsets_the_target() {
        let mut animator = GlideAnimator::default();
        let start = animator.begin(Point::new(100.0, 50.0), Vec2::new(100.0, 0.0), 0.0);
        // amplitude 0.25 * 100 px/s = 25 px beyond the release point.
        assert_eq!(
            start,
            GlideStart::Gliding {
                target: Point::new(125.0, 50.0)
            }
        );
    }

    #[test]
    fn first_frame_starts_at_release_position() {
        let mut animator = GlideAnimator::default();
        animator.begin(Point::new(100.0, 0.0), Vec2::new(100.0, 0.0), 0.0);
        let frame = animator.step(0.0).unwrap();
        assert!((frame.position.x - 100.0).abs() < 1e-9);
        assert!(!frame.settled);
    }

    #[test]
    fn displacement_strictly_decreases_until_settled() {
        let mut animator = GlideAnimator::default();
        animator.begin(Point::ORIGIN, Vec2::new(100.0, 0.0), 0.0);
        let target = animator.target().unwrap();

        let mut now = 0.0;
        let mut remaining = f64::INFINITY;
        loop {
            now += 16.0;
            let frame = animator.step(now).unwrap();
            let distance = (target.x - frame.position.x).abs();
            if frame.settled {
                assert_eq!(frame.position, target);
                break;
            }
            assert!(distance < remaining);
            remaining = distance;
        }
        assert!(!animator.is_gliding());
    }

    #[test]
    fn settles_within_expected_horizon() {
        // amplitude 25 px decaying below 0.5 px needs t > tau * ln(50),
        // about 1.34 s with the default time constant.
        let mut animator = GlideAnimator::default();
        animator.begin(Point::ORIGIN, Vec2::new(100.0, 0.0), 0.0);
        let frame = animator.step(1500.0).unwrap();
        assert!(frame.settled);
    }

    #[test]
    fn axes_glide_independently() {
        let mut animator = GlideAnimator::default();
        // X well above threshold, Y below: Y must hold its position.
        animator.begin(Point::new(0.0, 7.0), Vec2::new(200.0, 2.0), 0.0);
        let frame = animator.step(100.0).unwrap();
        assert_eq!(frame.position.y, 7.0);
        assert!(frame.position.x > 0.0);
    }

    #[test]
    fn fast_axis_settles_after_slow_axis_freezes() {
        // Unequal amplitudes: the small axis freezes first, the large axis
        // keeps gliding.
        let config = MomentumConfig::default();
        let mut animator = GlideAnimator::new(config);
        animator.begin(Point::ORIGIN, Vec2::new(400.0, 8.0), 0.0);
        // amplitude y = 2 px; below 0.5 px once decay < 0.25, i.e. after
        // tau * ln 4 ~ 474 ms. amplitude x = 100 px is still far out.
        let frame = animator.step(500.0).unwrap();
        assert!(!frame.settled);
        assert_eq!(frame.position.y, animator.target().unwrap().y);
        assert!((frame.position.x - animator.target().unwrap().x).abs() > 1.0);
    }

    #[test]
    fn begin_cancels_prior_run() {
        let mut animator = GlideAnimator::default();
        animator.begin(Point::ORIGIN, Vec2::new(100.0, 0.0), 0.0);
        let first_target = animator.target().unwrap();

        animator.begin(Point::new(500.0, 0.0), Vec2::new(-100.0, 0.0), 200.0);
        let second_target = animator.target().unwrap();
        assert_ne!(first_target, second_target);
        assert_eq!(second_target, Point::new(475.0, 0.0));
    }

    #[test]
    fn cancel_reports_whether_a_run_was_live() {
        let mut animator = GlideAnimator::default();
        assert!(!animator.cancel());

        animator.begin(Point::ORIGIN, Vec2::new(100.0, 0.0), 0.0);
        assert!(animator.cancel());
        assert!(!animator.cancel());
        assert!(animator.step(16.0).is_none());
    }

    #[test]
    fn last_position_tracks_emitted_frames() {
        let mut animator = GlideAnimator::default();
        animator.begin(Point::new(10.0, 0.0), Vec2::new(100.0, 0.0), 0.0);
        assert_eq!(animator.last_position(), Some(Point::new(10.0, 0.0)));

        let frame = animator.step(50.0).unwrap();
        assert_eq!(animator.last_position(), Some(frame.position));
    }

    #[test]
    fn negative_velocity_glides_backwards() {
        let mut animator = GlideAnimator::default();
        animator.begin(Point::new(100.0, 0.0), Vec2::new(-200.0, 0.0), 0.0);
        assert_eq!(animator.target(), Some(Point::new(50.0, 0.0)));
        let frame = animator.step(100.0).unwrap();
        assert!(frame.position.x < 100.0);
        assert!(frame.position.x > 50.0);
    }
}
