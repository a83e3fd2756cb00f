// Copyright 2026 the Driftfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Inclusive scale bounds applied at every transform write.
///
/// Out-of-range scales are clamped, never rejected; no code path may publish
/// a transform whose scale lies outside these bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    /// Smallest permitted scale.
    pub min: f64,
    /// Largest permitted scale.
    pub max: f64,
}

impl ScaleLimits {
    /// Creates limits, normalizing the pair so that `min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps `scale` into the permitted range.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.3, max: 2.0 }
    }
}

/// Uniform pan + zoom transform over the canvas world.
///
/// Mirrors the `translate(x, y) scale(k)` form used by SVG canvases: a world
/// point maps to view space by scaling about the origin and then offsetting
/// by `pan` (in view pixels).
///
/// ```rust
/// use driftfield_viewport::CanvasTransform;
/// use kurbo::{Point, Vec2};
///
/// let transform = CanvasTransform::new(Vec2::new(100.0, 50.0), 2.0);
/// let view = transform.world_to_view(Point::new(10.0, 10.0));
/// assert_eq!(view, Point::new(120.0, 70.0));
/// let world = transform.view_to_world(view);
/// assert!((world.x - 10.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    /// Pan offset in view pixels.
    pub pan: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
}

impl CanvasTransform {
    /// The identity transform: no pan, scale 1.
    pub const IDENTITY: Self = Self {
        pan: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from a pan offset and scale.
    #[must_use]
    pub fn new(pan: Vec2, scale: f64) -> Self {
        Self { pan, scale }
    }

    /// The equivalent affine map from world to view coordinates.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// Maps a world-space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view(&self, pt: Point) -> Point {
        self.to_affine() * pt
    }

    /// Maps a view/device-space point into world coordinates.
    #[must_use]
    pub fn view_to_world(&self, pt: Point) -> Point {
        self.to_affine().inverse() * pt
    }

    /// Returns this transform with its scale clamped into `limits`.
    #[must_use]
    pub fn clamped(self, limits: ScaleLimits) -> Self {
        Self {
            pan: self.pan,
            scale: limits.clamp(self.scale),
        }
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_points_to_themselves() {
        let pt = Point::new(13.0, -7.0);
        assert_eq!(CanvasTransform::IDENTITY.world_to_view(pt), pt);
    }

    #[test]
    fn world_view_roundtrip() {
        let transform = CanvasTransform::new(Vec2::new(-40.0, 12.0), 0.7);
        let world = Point::new(250.0, 300.0);
        let back = transform.view_to_world(transform.world_to_view(world));
        assert!((back.x - world.x).abs() < 1e-9);
        assert!((back.y - world.y).abs() < 1e-9);
    }

    #[test]
    fn scale_applies_before_pan() {
        let transform = CanvasTransform::new(Vec2::new(100.0, 0.0), 2.0);
        // translate(100, 0) scale(2): world x=10 lands at 120, not 220.
        assert_eq!(
            transform.world_to_view(Point::new(10.0, 0.0)),
            Point::new(120.0, 0.0)
        );
    }

    #[test]
    fn limits_normalize_inverted_pairs() {
        let limits = ScaleLimits::new(3.0, 0.5);
        assert_eq!(limits.min, 0.5);
        assert_eq!(limits.max, 3.0);
    }

    #[test]
    fn clamped_only_touches_scale() {
        let limits = ScaleLimits::default();
        let transform = CanvasTransform::new(Vec2::new(5.0, 5.0), 9.0).clamped(limits);
        assert_eq!(transform.scale, 2.0);
        assert_eq!(transform.pan, Vec2::new(5.0, 5.0));

        let transform = CanvasTransform::new(Vec2::ZERO, 0.01).clamped(limits);
        assert_eq!(transform.scale, 0.3);
    }
}
