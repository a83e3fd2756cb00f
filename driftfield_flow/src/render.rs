// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::field::FlowField;

/// Characters ordered by visual density, sparsest to densest.
pub const DENSITY_PALETTE: [char; 9] = [' ', '·', ':', '-', '~', '+', '=', '#', '@'];

/// Maps a velocity magnitude to a palette glyph.
///
/// The magnitude is normalized against `cap` and clamped at 1, so anything
/// at or above the cap renders as the densest glyph and a still cell renders
/// as a space.
#[must_use]
pub fn glyph_for_magnitude(magnitude: f64, cap: f64) -> char {
    let normalized = (magnitude / cap).min(1.0);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "normalized is clamped to [0, 1] before indexing"
    )]
    let index = (normalized * (DENSITY_PALETTE.len() - 1) as f64).floor() as usize;
    DENSITY_PALETTE[index.min(DENSITY_PALETTE.len() - 1)]
}

impl FlowField {
    /// Renders the grid as one complete character frame.
    ///
    /// Rows are joined with `'\n'`; each row holds one glyph per cell.
    #[must_use]
    pub fn render(&self) -> String {
        let cap = self.config().magnitude_cap;
        let mut frame = String::with_capacity((self.cols() + 1) * self.rows() * 2);
        for row in 0..self.rows() {
            if row > 0 {
                frame.push('\n');
            }
            for col in 0..self.cols() {
                frame.push(glyph_for_magnitude(self.cell(col, row).hypot(), cap));
            }
        }
        frame
    }

    /// An infinite sequence of rendered frames, advancing the simulation by
    /// a fixed `dt_seconds` per frame.
    ///
    /// The sequence is lazy (nothing simulates until a frame is pulled) and
    /// restartable: dropping it and calling `frames` again continues from
    /// the field's current state. Consumers always see a complete,
    /// freshly regenerated frame.
    pub fn frames(&mut self, dt_seconds: f64) -> Frames<'_> {
        Frames {
            field: self,
            dt_seconds,
        }
    }
}

/// Iterator of rendered flow-field frames; see [`FlowField::frames`].
#[derive(Debug)]
pub struct Frames<'a> {
    field: &'a mut FlowField,
    dt_seconds: f64,
}

impl Iterator for Frames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.field.tick(self.dt_seconds);
        Some(self.field.render())
    }
}
