// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftfield Viewport: the authoritative pan/zoom transform and the gesture
//! state machine that arbitrates its writers.
//!
//! An infinite canvas has one transform and many would-be writers: the drag
//! gesture, the pinch/modifier-wheel zoom, the plain wheel pan, the momentum
//! glide, and programmatic zoom buttons. [`CanvasController`] makes the
//! transform single-writer: gestures enter through explicit update methods
//! (scale clamped into [`ScaleLimits`] at every write site), the glide
//! animates through [`CanvasController::glide_step`], and whenever internal
//! animation has moved the transform past what an external gesture library
//! believes, the controller hands back the value to overwrite it with.
//!
//! The gesture phases form a small state machine,
//! `Idle → Dragging → (Idle | Gliding) → Idle`, with pinch running
//! orthogonally and never entering `Gliding`. Starting a new drag always
//! cancels a running glide before accepting input.
//!
//! ## Example
//!
//! ```rust
//! use driftfield_viewport::{CanvasController, GlideProgress, ReleaseOutcome};
//! use kurbo::{Size, Vec2};
//!
//! let mut controller = CanvasController::new(Size::new(1280.0, 800.0));
//! let origin = controller.transform().pan;
//!
//! // A quick rightward drag: 120 px in 60 ms.
//! controller.begin_drag(0.0);
//! for step in 1..=6 {
//!     let t = f64::from(step) * 10.0;
//!     controller.drag_update(origin + Vec2::new(2.0 * t, 0.0), 1.0, t);
//! }
//!
//! // Release fast enough and the canvas keeps gliding.
//! let ReleaseOutcome::Gliding { .. } = controller.end_drag(60.0) else {
//!     panic!("2000 px/s is well above the momentum threshold");
//! };
//! let mut now = 60.0;
//! loop {
//!     now += 16.0;
//!     match controller.glide_step(now) {
//!         GlideProgress::Moving(_) => continue,
//!         GlideProgress::Settled(final_transform) => {
//!             assert!(final_transform.pan.x > origin.x + 120.0);
//!             break;
//!         }
//!         GlideProgress::Idle => unreachable!("glide settles before idling"),
//!     }
//! }
//! ```
//!
//! Rendering is out of scope: the observable artifact per frame is the
//! [`CanvasTransform`] snapshot, which embedders apply to whatever surface
//! they draw.

mod controller;
mod transform;

pub use controller::{
    CanvasController, ControllerDebugInfo, DEFAULT_ZOOM_STEP, GesturePhase, GlideProgress,
    ReleaseOutcome,
};
pub use transform::{CanvasTransform, ScaleLimits};
