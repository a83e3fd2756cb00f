// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, Vec2};

use driftfield_momentum::{GlideAnimator, GlideStart, MomentumConfig, VelocityTracker};

use crate::transform::{CanvasTransform, ScaleLimits};

/// Multiplicative scale change applied by one programmatic zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.3;

/// Fraction of the view size used as the home pan offset, placing the intro
/// area in the upper-left region with neighboring content peeking in.
const HOME_PAN_FRACTION: f64 = 0.35;

/// Phase of the gesture state machine.
///
/// Transitions: `Idle → Dragging → (Idle | Gliding) → Idle`. Pinch runs
/// `Idle/Dragging → Pinching → Idle` and never enters `Gliding`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture or animation in progress.
    #[default]
    Idle,
    /// A pointer drag is updating the transform directly.
    Dragging,
    /// A pinch (or modifier-wheel zoom) is updating the transform directly.
    Pinching,
    /// A momentum glide is animating the pan offset.
    Gliding,
}

/// Result of releasing a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReleaseOutcome {
    /// Release velocity was below threshold on both axes; the gesture ends
    /// where it stands and no frame will be scheduled.
    Settled,
    /// A glide is running; drive [`CanvasController::glide_step`] once per
    /// frame until it reports settling.
    Gliding {
        /// Pan offset the glide decays toward.
        target: Point,
    },
}

/// Per-frame glide progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlideProgress {
    /// No glide is active; stop scheduling frames.
    Idle,
    /// The glide advanced; re-render with the enclosed transform.
    Moving(CanvasTransform),
    /// The glide reached rest. Push the enclosed transform back into the
    /// external gesture library so the next gesture starts consistent.
    Settled(CanvasTransform),
}

/// Debug snapshot of a [`CanvasController`].
#[derive(Clone, Copy, Debug)]
pub struct ControllerDebugInfo {
    /// Current authoritative transform.
    pub transform: CanvasTransform,
    /// Current gesture phase.
    pub phase: GesturePhase,
    /// Scale bounds enforced at every write.
    pub scale_limits: ScaleLimits,
    /// Programmatic zoom step factor.
    pub zoom_step: f64,
    /// View size used for zoom centering and the home transform.
    pub view_size: Size,
    /// Resting pan offset of the in-flight glide, if one is running.
    pub glide_target: Option<Point>,
}

/// Owner of the authoritative canvas transform, arbitrating between drag
/// gestures, pinch/wheel input, momentum glides, and programmatic zoom
/// commands.
///
/// The controller is the *single writer* of the transform. An external
/// gesture library may compute transforms during a gesture, but they enter
/// only through [`CanvasController::drag_update`] /
/// [`CanvasController::pinch_update`] (scale clamped at the door), and
/// whenever internal animation has moved the transform the controller hands
/// back the value the embedder must push into that library:
///
/// - [`CanvasController::begin_drag`] returns `Some(transform)` when it
///   interrupted a glide, because the externally tracked transform went
///   stale while the glide animated.
/// - [`GlideProgress::Settled`] carries the final transform for the same
///   reason.
/// - The programmatic commands ([`CanvasController::zoom_in`],
///   [`CanvasController::zoom_out`], [`CanvasController::recenter`],
///   [`CanvasController::wheel_pan`]) return the new transform
///   unconditionally.
///
/// Methods taking `now_ms` expect timestamps from one monotonic clock (see
/// `driftfield_timing`).
#[derive(Clone, Debug)]
pub struct CanvasController {
    transform: CanvasTransform,
    limits: ScaleLimits,
    zoom_step: f64,
    view_size: Size,
    phase: GesturePhase,
    tracker: VelocityTracker,
    glide: GlideAnimator,
}

impl CanvasController {
    /// Creates a controller for a view of the given size, positioned at the
    /// home transform.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut controller = Self {
            transform: CanvasTransform::IDENTITY,
            limits: ScaleLimits::default(),
            zoom_step: DEFAULT_ZOOM_STEP,
            view_size,
            phase: GesturePhase::default(),
            tracker: VelocityTracker::new(),
            glide: GlideAnimator::default(),
        };
        controller.transform = controller.home_transform();
        controller
    }

    /// Current authoritative transform.
    #[must_use]
    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Scale bounds enforced at every transform write.
    #[must_use]
    pub fn scale_limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Sets the scale bounds and clamps the current transform into them.
    pub fn set_scale_limits(&mut self, limits: ScaleLimits) {
        self.limits = limits;
        self.transform = self.transform.clamped(limits);
    }

    /// Sets the programmatic zoom step factor.
    pub fn set_zoom_step(&mut self, factor: f64) {
        self.zoom_step = factor;
    }

    /// View size used for zoom centering and the home transform.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Updates the view size (for example on window resize).
    ///
    /// The transform is left untouched; only future zoom centering and
    /// recentering use the new size.
    pub fn set_view_size(&mut self, view_size: Size) {
        self.view_size = view_size;
    }

    /// Replaces the momentum configuration, cancelling any in-flight glide.
    pub fn set_momentum_config(&mut self, config: MomentumConfig) {
        self.interrupt_glide();
        self.glide = GlideAnimator::new(config);
    }

    /// The home transform: intro region in view at scale 1.
    #[must_use]
    pub fn home_transform(&self) -> CanvasTransform {
        CanvasTransform::new(
            Vec2::new(
                self.view_size.width * HOME_PAN_FRACTION,
                self.view_size.height * HOME_PAN_FRACTION,
            ),
            1.0,
        )
    }

    /// Begins a drag gesture.
    ///
    /// Any running glide is cancelled first. If one was in flight, the
    /// externally tracked transform is stale relative to the internally
    /// animated one; the authoritative transform is resynchronized from the
    /// glide's last emitted position and returned so the embedder can
    /// overwrite the gesture library's state before it processes the drag.
    pub fn begin_drag(&mut self, now_ms: f64) -> Option<CanvasTransform> {
        let interrupted = self.interrupt_glide();
        self.phase = GesturePhase::Dragging;
        self.tracker.start(self.transform.pan.to_point(), now_ms);
        interrupted.then_some(self.transform)
    }

    /// Applies one externally computed drag step.
    ///
    /// The transform is taken verbatim apart from scale clamping, and the
    /// new pan offset feeds the velocity tracker. Returns the transform to
    /// render with, or `None` if no drag is in progress.
    pub fn drag_update(
        &mut self,
        pan: Vec2,
        scale: f64,
        now_ms: f64,
    ) -> Option<CanvasTransform> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        self.transform = CanvasTransform::new(pan, self.limits.clamp(scale));
        self.tracker.track(pan.to_point(), now_ms);
        Some(self.transform)
    }

    /// Ends a drag with a pointer release, handing off to momentum.
    ///
    /// The velocity estimate uses only samples still inside the recency
    /// window at this instant, so pausing before release yields no glide.
    /// Scale stays fixed for the whole glide; only the pan offset animates.
    pub fn end_drag(&mut self, now_ms: f64) -> ReleaseOutcome {
        if self.phase != GesturePhase::Dragging {
            return ReleaseOutcome::Settled;
        }
        let velocity = self.tracker.velocity(now_ms);
        self.tracker.clear();
        match self
            .glide
            .begin(self.transform.pan.to_point(), velocity, now_ms)
        {
            GlideStart::Settled(_) => {
                self.phase = GesturePhase::Idle;
                ReleaseOutcome::Settled
            }
            GlideStart::Gliding { target } => {
                self.phase = GesturePhase::Gliding;
                ReleaseOutcome::Gliding { target }
            }
        }
    }

    /// Advances an active glide to `now_ms`.
    ///
    /// Writes the frame's pan offset into the authoritative transform
    /// (scale untouched). On the final frame the settled position is
    /// committed and [`GlideProgress::Settled`] asks the embedder to
    /// resynchronize the gesture library.
    pub fn glide_step(&mut self, now_ms: f64) -> GlideProgress {
        if self.phase != GesturePhase::Gliding {
            return GlideProgress::Idle;
        }
        match self.glide.step(now_ms) {
            None => {
                self.phase = GesturePhase::Idle;
                GlideProgress::Idle
            }
            Some(frame) => {
                self.transform.pan = frame.position.to_vec2();
                if frame.settled {
                    self.phase = GesturePhase::Idle;
                    GlideProgress::Settled(self.transform)
                } else {
                    GlideProgress::Moving(self.transform)
                }
            }
        }
    }

    /// Begins a pinch (or modifier-wheel zoom) gesture.
    ///
    /// Like [`CanvasController::begin_drag`], returns the resynchronized
    /// transform when a glide was interrupted. A pinch starting mid-drag
    /// abandons the drag's velocity tracking; pinches never glide.
    pub fn begin_pinch(&mut self) -> Option<CanvasTransform> {
        let interrupted = self.interrupt_glide();
        self.tracker.clear();
        self.phase = GesturePhase::Pinching;
        interrupted.then_some(self.transform)
    }

    /// Applies one externally computed pinch step, clamping scale.
    ///
    /// Returns the transform to render with, or `None` if no pinch is in
    /// progress.
    pub fn pinch_update(&mut self, pan: Vec2, scale: f64) -> Option<CanvasTransform> {
        if self.phase != GesturePhase::Pinching {
            return None;
        }
        self.transform = CanvasTransform::new(pan, self.limits.clamp(scale));
        Some(self.transform)
    }

    /// Ends a pinch. Never hands off to momentum.
    pub fn end_pinch(&mut self) {
        if self.phase == GesturePhase::Pinching {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Pans directly by a wheel delta, with no momentum.
    ///
    /// A glide in flight is cancelled first (after resynchronizing from its
    /// last emitted position); letting it continue would overwrite this pan
    /// on its next frame. Returns the new transform.
    pub fn wheel_pan(&mut self, delta: Vec2) -> CanvasTransform {
        self.interrupt_glide();
        self.transform.pan += delta;
        self.transform
    }

    /// Zooms in one step about the view center.
    pub fn zoom_in(&mut self) -> CanvasTransform {
        self.zoom_step_by(self.zoom_step)
    }

    /// Zooms out one step about the view center.
    pub fn zoom_out(&mut self) -> CanvasTransform {
        self.zoom_step_by(self.zoom_step.recip())
    }

    /// Restores the home transform.
    pub fn recenter(&mut self) -> CanvasTransform {
        self.interrupt_glide();
        self.transform = self.home_transform().clamped(self.limits);
        self.transform
    }

    /// Debug snapshot of the controller state.
    #[must_use]
    pub fn debug_info(&self) -> ControllerDebugInfo {
        ControllerDebugInfo {
            transform: self.transform,
            phase: self.phase,
            scale_limits: self.limits,
            zoom_step: self.zoom_step,
            view_size: self.view_size,
            glide_target: self.glide.target(),
        }
    }

    /// Multiplies scale by `factor`, keeping the world point under the view
    /// center fixed.
    fn zoom_step_by(&mut self, factor: f64) -> CanvasTransform {
        self.interrupt_glide();
        let old_scale = self.transform.scale;
        let new_scale = self.limits.clamp(old_scale * factor);
        if (new_scale - old_scale).abs() < f64::EPSILON {
            return self.transform;
        }
        // Solve for the pan that keeps the center's world coordinate fixed:
        // center - pan' = (center - pan) * (k' / k).
        let center = Vec2::new(self.view_size.width / 2.0, self.view_size.height / 2.0);
        self.transform.pan = center - (center - self.transform.pan) * (new_scale / old_scale);
        self.transform.scale = new_scale;
        self.transform
    }

    /// Cancels a running glide, resynchronizing the authoritative transform
    /// from the last internally animated position. Returns whether a glide
    /// was actually interrupted.
    fn interrupt_glide(&mut self) -> bool {
        let stale = self.glide.last_position();
        if self.glide.cancel() {
            if let Some(position) = stale {
                self.transform.pan = position.to_vec2();
            }
            self.phase = GesturePhase::Idle;
            true
        } else {
            false
        }
    }
}
