// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drag-and-glide trace.
//!
//! Drives a [`CanvasController`] through a fast rightward drag, releases it,
//! and pumps glide frames off a manually stepped clock, printing the
//! transform the embedder would render each frame.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Size, Vec2};

use driftfield_timing::{Clock, FrameControl, FramePump, ManualClock};
use driftfield_viewport::{CanvasController, GlideProgress, ReleaseOutcome};

fn main() {
    let clock = ManualClock::new(0.0);
    let mut pump = FramePump::new();
    let controller = Rc::new(RefCell::new(CanvasController::new(Size::new(
        1280.0, 800.0,
    ))));

    let origin = controller.borrow().transform().pan;
    println!("home transform: pan = {origin:?}, scale = 1");

    // Drag 120 px to the right over 100 ms.
    controller.borrow_mut().begin_drag(clock.now_ms());
    for _ in 0..10 {
        clock.advance(10.0);
        let pan = origin + Vec2::new(1.2 * clock.now_ms(), 0.0);
        controller
            .borrow_mut()
            .drag_update(pan, 1.0, clock.now_ms());
    }

    match controller.borrow_mut().end_drag(clock.now_ms()) {
        ReleaseOutcome::Settled => {
            println!("released below the momentum threshold; nothing to animate");
            return;
        }
        ReleaseOutcome::Gliding { target } => {
            println!("released at ~1200 px/s; gliding toward {target:?}");
        }
    }

    let glider = Rc::clone(&controller);
    pump.request(move |now_ms| match glider.borrow_mut().glide_step(now_ms) {
        GlideProgress::Moving(transform) => {
            println!("  t = {now_ms:>6.0} ms  pan.x = {:.2}", transform.pan.x);
            FrameControl::Continue
        }
        GlideProgress::Settled(transform) => {
            println!("settled at pan.x = {:.2}", transform.pan.x);
            FrameControl::Stop
        }
        GlideProgress::Idle => FrameControl::Stop,
    });

    while !pump.is_empty() {
        clock.advance(16.0);
        pump.tick(clock.now_ms());
    }
}
