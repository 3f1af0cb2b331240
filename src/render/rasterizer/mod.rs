//! Band-limited polygon rasterization.
//!
//! Polygons are scan converted one band at a time. Every edge is walked with
//! integer Bresenham stepping and widens a per-scanline `[min, max]` span;
//! the spans are then flat filled. This gives a correct fill for convex
//! polygons of any arity. Non-convex input under or over fills without error.

mod span;

pub use span::SpanRasterizer;

use crate::math::vec2::Point2;

/// Largest polygon arity the renderer draws.
pub const MAX_ARITY: usize = 4;

/// A screen-space polygon with its final fill color, ready to be drawn into
/// any band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawPolygon {
    points: [Point2; MAX_ARITY],
    arity: u8,
    pub color: u16,
}

impl DrawPolygon {
    /// # Panics
    /// Panics if `points` has more than [`MAX_ARITY`] entries.
    pub fn new(points: &[Point2], color: u16) -> Self {
        let mut stored = [Point2::ZERO; MAX_ARITY];
        stored[..points.len()].copy_from_slice(points);
        Self {
            points: stored,
            arity: points.len() as u8,
            color,
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points[..self.arity as usize]
    }

    /// Screen rows `(top, bottom)` touched by the polygon.
    pub fn y_range(&self) -> (i32, i32) {
        self.points()
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_arity() {
        let tri = DrawPolygon::new(&[Point2::new(0, 5), Point2::new(3, -2), Point2::new(1, 9)], 1);
        assert_eq!(tri.points().len(), 3);
        assert_eq!(tri.y_range(), (-2, 9));

        let quad = DrawPolygon::new(&[Point2::ZERO; 4], 1);
        assert_eq!(quad.points().len(), 4);
    }
}
