// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftfield Momentum: kinetic-scroll physics for pan gestures.
//!
//! This crate provides the two halves of driftfield's momentum model:
//!
//! - [`VelocityTracker`]: a time-windowed history of gesture positions and a
//!   robust instantaneous velocity estimate computed by weighted linear
//!   regression over that window.
//! - [`GlideAnimator`]: the post-release inertial animation, an exponential
//!   decay from a momentum target back to rest, advanced frame by frame by
//!   the caller.
//!
//! Both are headless state machines: every method takes the current time in
//! milliseconds as an explicit parameter and nothing here schedules frames
//! or reads a clock. Hosts drive them from their own frame loop (see
//! `driftfield_timing`), which also makes the physics fully deterministic
//! under test.
//!
//! ## Gesture lifecycle
//!
//! ```rust
//! use driftfield_momentum::{GlideAnimator, GlideStart, VelocityTracker};
//! use kurbo::Point;
//!
//! let mut tracker = VelocityTracker::new();
//! let mut glide = GlideAnimator::default();
//!
//! // Pointer down at the current pan offset.
//! tracker.start(Point::new(0.0, 0.0), 0.0);
//!
//! // Pointer moves arrive at whatever rate the platform delivers them.
//! tracker.track(Point::new(40.0, 0.0), 40.0);
//! tracker.track(Point::new(100.0, 0.0), 90.0);
//!
//! // Release: hand the windowed velocity estimate to the glide.
//! let velocity = tracker.velocity(90.0);
//! match glide.begin(Point::new(100.0, 0.0), velocity, 90.0) {
//!     GlideStart::Gliding { target } => {
//!         assert!(target.x > 100.0);
//!         // Per displayed frame: advance and render glide.step(now).
//!     }
//!     GlideStart::Settled(_) => { /* below threshold: nothing to animate */ }
//! }
//! ```
//!
//! Degenerate inputs are policy, not errors: an empty or single-sample
//! window estimates zero velocity, and a release with both axes below the
//! minimum velocity settles immediately without scheduling a single frame.

mod glide;
mod tracker;

pub use glide::{GlideAnimator, GlideFrame, GlideStart, MomentumConfig};
pub use tracker::{DEFAULT_WEIGHT_FLOOR, DEFAULT_WINDOW_MS, VelocityTracker};
