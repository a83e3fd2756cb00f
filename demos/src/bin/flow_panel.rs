// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless flow-panel session.
//!
//! Sweeps a pointer across the scene's flow panel in world coordinates,
//! stirring the velocity field through the panel mapping, then prints a few
//! rendered ASCII frames as the field diffuses and calms down.

use kurbo::Vec2;

use driftfield_flow::{FlowField, PointerProbe};
use driftfield_scene::SceneLayout;

fn main() {
    let scene = SceneLayout::new();
    let panel = *scene.flow_panel();
    let mut field = FlowField::default();
    let mut probe = PointerProbe::new();

    // Diagonal sweep through the panel, one sample every 16 ms.
    let start = panel.origin + Vec2::new(40.0, 40.0);
    for step in 0..24 {
        let t = f64::from(step);
        let world = start + Vec2::new(16.0 * t, 9.0 * t);
        let Some(local) = panel.to_local(world) else {
            probe.leave();
            continue;
        };
        if let Some(impulse) = probe.observe(local, t * 16.0) {
            field.stir(panel.size(), local, impulse);
        }
    }

    for i in 0..4 {
        let frame = field.frames(0.05).next().expect("frames are infinite");
        println!("--- frame {i} (peak {:.2}) ---", field.peak_magnitude());
        println!("{frame}");
    }
}
