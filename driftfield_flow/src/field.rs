// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::mem;

use kurbo::{Point, Size, Vec2};

/// Tunables for the flow-field simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowFieldConfig {
    /// Grid width in cells.
    pub cols: usize,
    /// Grid height in cells.
    pub rows: usize,
    /// Rate at which a cell is pulled toward its neighbor average, per
    /// second.
    pub diffusion_rate: f64,
    /// Exponential friction constant, per second.
    pub damping: f64,
    /// Upper bound on a single tick's `dt` in seconds. Resuming after a
    /// long pause (a backgrounded tab) must not integrate one huge step.
    pub max_dt: f64,
    /// Impulse radius in cells.
    pub impulse_radius: i64,
    /// Scale applied to injected impulse velocity.
    pub impulse_intensity: f64,
    /// Velocity magnitude that maps to the densest glyph.
    pub magnitude_cap: f64,
}

impl Default for FlowFieldConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 25,
            diffusion_rate: 2.0,
            damping: 1.5,
            max_dt: 0.05,
            impulse_radius: 3,
            impulse_intensity: 0.3,
            magnitude_cap: 3.0,
        }
    }
}

/// A fixed-size grid of 2D velocities simulating a decorative viscous flow.
///
/// Each [`FlowField::tick`] pulls every cell toward the unweighted average
/// of its up-to-8 neighbors (neighbors outside the grid are skipped, not
/// treated as still air, so edge cells are not artificially damped) and then
/// applies exponential friction. This is a cheap O(cells × 8) approximation
/// of viscous diffusion chosen for visual plausibility, not physical
/// accuracy. Ticks read the previous tick's complete state through a back
/// buffer; there is no read-during-write hazard.
///
/// Pointer interaction arrives as impulses ([`FlowField::inject`] /
/// [`FlowField::stir`]) that accumulate onto cell velocities with linear
/// distance falloff. Nothing bounds cell magnitude, but friction guarantees
/// decay toward zero absent new input.
#[derive(Clone, Debug)]
pub struct FlowField {
    config: FlowFieldConfig,
    cells: Vec<Vec2>,
    back: Vec<Vec2>,
}

impl FlowField {
    /// Creates a still field with the given configuration.
    #[must_use]
    pub fn new(config: FlowFieldConfig) -> Self {
        let len = config.cols * config.rows;
        Self {
            config,
            cells: vec![Vec2::ZERO; len],
            back: vec![Vec2::ZERO; len],
        }
    }

    /// The field's configuration.
    #[must_use]
    pub fn config(&self) -> &FlowFieldConfig {
        &self.config
    }

    /// Grid width in cells.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.config.cols
    }

    /// Grid height in cells.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Velocity of the cell at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` is outside the grid.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Vec2 {
        assert!(
            col < self.config.cols && row < self.config.rows,
            "cell ({col}, {row}) outside {}x{} grid",
            self.config.cols,
            self.config.rows
        );
        self.cells[row * self.config.cols + col]
    }

    /// Advances the simulation by `dt_seconds` of real time.
    ///
    /// `dt` is capped at [`FlowFieldConfig::max_dt`]; non-positive values
    /// are ignored.
    pub fn tick(&mut self, dt_seconds: f64) {
        let dt = dt_seconds.min(self.config.max_dt);
        if dt <= 0.0 {
            return;
        }
        let cols = self.config.cols;
        let rows = self.config.rows;
        let rate = self.config.diffusion_rate * dt;
        let friction = (-self.config.damping * dt).exp();

        for row in 0..rows {
            for col in 0..cols {
                let mut sum = Vec2::ZERO;
                let mut neighbors = 0.0;
                for dr in -1_isize..=1 {
                    for dc in -1_isize..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        let (Some(nr), Some(nc)) =
                            (row.checked_add_signed(dr), col.checked_add_signed(dc))
                        else {
                            continue;
                        };
                        if nr < rows && nc < cols {
                            sum += self.cells[nr * cols + nc];
                            neighbors += 1.0;
                        }
                    }
                }
                let mut velocity = self.cells[row * cols + col];
                if neighbors > 0.0 {
                    velocity += (sum / neighbors - velocity) * rate;
                }
                self.back[row * cols + col] = velocity * friction;
            }
        }
        mem::swap(&mut self.cells, &mut self.back);
    }

    /// Adds an impulse centered on cell `(col, row)`.
    ///
    /// All cells within the impulse radius receive `velocity` scaled by the
    /// configured intensity and a linear falloff with distance; the impulse
    /// accumulates on top of existing cell velocity. Centers outside the
    /// grid still affect the in-grid cells within the radius.
    pub fn inject(&mut self, col: i64, row: i64, velocity: Vec2) {
        let radius = self.config.impulse_radius;
        if radius <= 0 {
            return;
        }
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let r = row + dr;
                let c = col + dc;
                if r < 0 || c < 0 {
                    continue;
                }
                #[expect(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    reason = "non-negative and bounds-checked against the grid below"
                )]
                let (r, c) = (r as usize, c as usize);
                if r >= self.config.rows || c >= self.config.cols {
                    continue;
                }
                let distance = ((dr * dr + dc * dc) as f64).sqrt();
                let falloff = (1.0 - distance / radius as f64).max(0.0);
                self.cells[r * self.config.cols + c] +=
                    velocity * falloff * self.config.impulse_intensity;
            }
        }
    }

    /// Adds an impulse at a pixel position within a rendered surface of the
    /// given size, mapping the position to the cell under it.
    ///
    /// Positions outside the surface, or degenerate surface sizes, are
    /// ignored.
    pub fn stir(&mut self, surface: Size, position: Point, velocity: Vec2) {
        if surface.width <= 0.0 || surface.height <= 0.0 {
            return;
        }
        if position.x < 0.0
            || position.y < 0.0
            || position.x >= surface.width
            || position.y >= surface.height
        {
            return;
        }
        let cell_width = surface.width / self.config.cols as f64;
        let cell_height = surface.height / self.config.rows as f64;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "bounds-checked position over a small grid"
        )]
        let (col, row) = (
            (position.x / cell_width).floor() as i64,
            (position.y / cell_height).floor() as i64,
        );
        self.inject(col, row, velocity);
    }

    /// Largest velocity magnitude currently in the grid.
    #[must_use]
    pub fn peak_magnitude(&self) -> f64 {
        self.cells.iter().map(|v| v.hypot()).fold(0.0, f64::max)
    }

    /// Resets every cell to rest.
    pub fn still(&mut self) {
        self.cells.fill(Vec2::ZERO);
    }
}

impl Default for FlowField {
    fn default() -> Self {
        Self::new(FlowFieldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> FlowField {
        FlowField::new(FlowFieldConfig {
            cols: 9,
            rows: 7,
            ..FlowFieldConfig::default()
        })
    }

    #[test]
    fn new_field_is_still() {
        let field = small_field();
        assert_eq!(field.peak_magnitude(), 0.0);
    }

    #[test]
    fn impulse_center_gets_full_intensity() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(10.0, 0.0));
        // Falloff 1 at distance 0: intensity 0.3 of the injected velocity.
        assert_eq!(field.cell(4, 3), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn impulse_falls_off_linearly_and_ends_at_radius() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(10.0, 0.0));
        // Distance 1 of radius 3: falloff 2/3.
        let adjacent = field.cell(5, 3);
        assert!((adjacent.x - 10.0 * (2.0 / 3.0) * 0.3).abs() < 1e-9);
        // Distance 3 (the radius itself): falloff 0.
        assert_eq!(field.cell(7, 3), Vec2::ZERO);
    }

    #[test]
    fn impulses_accumulate() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(10.0, 0.0));
        field.inject(4, 3, Vec2::new(0.0, 10.0));
        assert_eq!(field.cell(4, 3), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn off_grid_impulse_center_still_reaches_edge_cells() {
        let mut field = small_field();
        field.inject(-1, 3, Vec2::new(10.0, 0.0));
        // (0, 3) is at distance 1 from the off-grid center.
        assert!(field.cell(0, 3).x > 0.0);
    }

    #[test]
    fn diffusion_spreads_one_ring_per_tick() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(100.0, 0.0));
        // (7, 3) sits exactly at the impulse radius: still at rest, but its
        // neighbor (6, 3) is moving.
        assert_eq!(field.cell(7, 3), Vec2::ZERO);
        field.tick(0.05);
        assert!(field.cell(7, 3).x > 0.0);
        // The far corner has no moving neighbor yet, so one tick cannot
        // reach it.
        assert_eq!(field.cell(0, 0), Vec2::ZERO);
    }

    #[test]
    fn undisturbed_field_decays_toward_rest() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(50.0, 25.0));
        let mut previous = field.peak_magnitude();
        for _ in 0..200 {
            field.tick(0.016);
            let peak = field.peak_magnitude();
            assert!(peak <= previous + 1e-12);
            previous = peak;
        }
        assert!(previous < 0.15);
    }

    #[test]
    fn uniform_field_stays_uniform_under_diffusion() {
        // Boundary cells average only their existing neighbors; a uniform
        // field must therefore stay exactly uniform, corners included.
        let mut field = small_field();
        let v = Vec2::new(2.0, -1.0);
        field.cells.fill(v);
        field.tick(0.05);
        let friction = (-field.config().damping * 0.05).exp();
        let expected = v * friction;
        for row in 0..field.rows() {
            for col in 0..field.cols() {
                let cell = field.cell(col, row);
                assert!((cell.x - expected.x).abs() < 1e-12);
                assert!((cell.y - expected.y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn dt_is_capped() {
        let mut a = small_field();
        let mut b = small_field();
        a.inject(4, 3, Vec2::new(10.0, 0.0));
        b.inject(4, 3, Vec2::new(10.0, 0.0));

        a.tick(10.0);
        b.tick(0.05);
        for row in 0..a.rows() {
            for col in 0..a.cols() {
                assert_eq!(a.cell(col, row), b.cell(col, row));
            }
        }
    }

    #[test]
    fn non_positive_dt_is_ignored() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(10.0, 0.0));
        let before = field.cell(4, 3);
        field.tick(0.0);
        field.tick(-1.0);
        assert_eq!(field.cell(4, 3), before);
    }

    #[test]
    fn stir_maps_surface_position_to_cell() {
        let mut field = small_field();
        let surface = Size::new(90.0, 70.0);
        // Cell (2, 5): 10 px wide, 10 px tall cells.
        field.stir(surface, Point::new(25.0, 55.0), Vec2::new(10.0, 0.0));
        assert_eq!(field.cell(2, 5), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn stir_outside_surface_is_ignored() {
        let mut field = small_field();
        let surface = Size::new(90.0, 70.0);
        field.stir(surface, Point::new(-5.0, 10.0), Vec2::new(10.0, 0.0));
        field.stir(surface, Point::new(95.0, 10.0), Vec2::new(10.0, 0.0));
        assert_eq!(field.peak_magnitude(), 0.0);
    }

    #[test]
    fn still_resets_the_grid() {
        let mut field = small_field();
        field.inject(4, 3, Vec2::new(10.0, 10.0));
        field.still();
        assert_eq!(field.peak_magnitude(), 0.0);
    }
}
