// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftfield Flow: the interactive ASCII flow field.
//!
//! A fixed-size grid of 2D velocities is simulated on a continuous loop,
//! independent of the viewport: each tick diffuses every cell toward its
//! neighbors and applies exponential friction, and pointer motion near the
//! panel injects velocity impulses with linear distance falloff. The grid's
//! only rendered artifact is a character frame: each cell's speed picks a
//! glyph from a density-ordered palette.
//!
//! The simulation is decorative. It is not a fluid solver; the update rule
//! is the cheapest thing that looks viscous, and the pointer velocity is a
//! raw finite difference (see [`PointerProbe`]) rather than the regression
//! the pan-gesture momentum path uses, because impulse noise disappears into
//! the diffusion anyway.
//!
//! ## Example
//!
//! ```rust
//! use driftfield_flow::{FlowField, PointerProbe};
//! use kurbo::{Point, Size};
//!
//! let mut field = FlowField::default();
//! let mut probe = PointerProbe::new();
//! let panel = Size::new(480.0, 300.0);
//!
//! // Pointer sweeps across the panel; each move stirs the field.
//! for step in 0..10 {
//!     let t = f64::from(step);
//!     let position = Point::new(40.0 * t, 150.0);
//!     if let Some(impulse) = probe.observe(position, t * 16.0) {
//!         field.stir(panel, position, impulse);
//!     }
//! }
//!
//! // The frame sequence is infinite; pull as many frames as you display.
//! let frame = field.frames(0.016).next().unwrap();
//! assert_eq!(frame.lines().count(), field.rows());
//! ```

mod field;
mod pointer;
mod render;

pub use field::{FlowField, FlowFieldConfig};
pub use pointer::PointerProbe;
pub use render::{DENSITY_PALETTE, Frames, glyph_for_magnitude};
