//! Per-scanline span accumulation and flat fill.
//!
//! # Algorithm
//!
//! For one band and one polygon:
//!
//! 1. Reset every band line to the empty span `min = width + 1`, `max = -1`.
//! 2. Walk each edge `p[i] -> p[i + 1]` (wrapping back to `p[0]`) with
//!    Bresenham. Every visited point on a band line widens that line's span;
//!    `min` is clamped to `0` and `max` to `width - 1` as it is recorded.
//!    Edges whose endpoints are both above or both below the band are
//!    skipped without stepping.
//! 3. Fill every line whose `max > min`, inclusive of both ends.
//!
//! A line is drawn only when its span is at least two pixels wide, so
//! degenerate slivers and polygon tips disappear rather than leave single
//! stray pixels.

use super::DrawPolygon;
use crate::math::vec2::Point2;
use crate::render::band::Band;

/// Reusable span table for one band.
#[derive(Debug, Clone)]
pub struct SpanRasterizer {
    min_x: Vec<i32>,
    max_x: Vec<i32>,
    width: i32,
}

impl SpanRasterizer {
    pub fn new(width: u32, band_height: u32) -> Self {
        Self {
            min_x: vec![0; band_height as usize],
            max_x: vec![0; band_height as usize],
            width: width as i32,
        }
    }

    fn reset(&mut self, rows: usize) {
        self.min_x[..rows].fill(self.width + 1);
        self.max_x[..rows].fill(-1);
    }

    /// Widen the spans of band rows `y0..y_end` along the edge `a -> b`.
    fn walk_edge(&mut self, a: Point2, b: Point2, y0: i32, y_end: i32) {
        if (a.y < y0 && b.y < y0) || (a.y >= y_end && b.y >= y_end) {
            return;
        }

        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (a.x, a.y);

        loop {
            if y >= y0 && y < y_end {
                let row = (y - y0) as usize;
                if x < self.min_x[row] {
                    self.min_x[row] = x.max(0);
                }
                if x > self.max_x[row] {
                    self.max_x[row] = x.min(self.width - 1);
                }
            }

            if x == b.x && y == b.y {
                break;
            }
            let err2 = 2 * err;
            if err2 > -dy {
                err -= dy;
                x += sx;
            }
            if err2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Scan convert the polygon outlined by `points` into `band`.
    ///
    /// `points` must describe a convex polygon in screen coordinates.
    pub fn fill_polygon(&mut self, points: &[Point2], band: &mut Band, color: u16) {
        let rows = band.height() as usize;
        let y0 = band.y0() as i32;
        let y_end = band.y_end() as i32;

        self.reset(rows);
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.walk_edge(a, b, y0, y_end);
        }

        for row in 0..rows {
            let (min, max) = (self.min_x[row], self.max_x[row]);
            if max > min {
                band.fill_span(row as i32, min, max, color);
            }
        }
    }

    /// Draw a prepared polygon, skipping it early when it misses the band.
    #[inline]
    pub fn draw(&mut self, polygon: &DrawPolygon, band: &mut Band) {
        let (top, bottom) = polygon.y_range();
        if bottom < band.y0() as i32 || top >= band.y_end() as i32 {
            return;
        }
        self.fill_polygon(polygon.points(), band, polygon.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::band::BandBuffer;

    const W: u32 = 64;

    fn count_row(band: &Band, y: i32, color: u16) -> usize {
        (0..W as i32)
            .filter(|&x| band.get_pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn right_triangle_span_widths() {
        let mut buffer = BandBuffer::new(W, 64);
        let mut band = buffer.band(0, 64);
        let mut raster = SpanRasterizer::new(W, 64);
        let tri = [Point2::new(10, 10), Point2::new(30, 10), Point2::new(10, 30)];

        raster.fill_polygon(&tri, &mut band, 1);

        // The hypotenuse crosses row y at x = 40 - y.
        for y in 10..30 {
            assert_eq!(count_row(&band, y, 1), (31 - y) as usize, "row {y}");
            assert_eq!(band.get_pixel(10, y), Some(1));
            assert_eq!(band.get_pixel(40 - y, y), Some(1));
        }
        // Single-pixel tip is not filled.
        assert_eq!(count_row(&band, 30, 1), 0);
        assert_eq!(count_row(&band, 9, 1), 0);
    }

    #[test]
    fn axis_aligned_quad_is_inclusive() {
        let mut buffer = BandBuffer::new(W, 16);
        let mut band = buffer.band(0, 16);
        let mut raster = SpanRasterizer::new(W, 16);
        let quad = [
            Point2::new(4, 2),
            Point2::new(12, 2),
            Point2::new(12, 8),
            Point2::new(4, 8),
        ];
        raster.fill_polygon(&quad, &mut band, 3);

        for y in 2..=8 {
            assert_eq!(count_row(&band, y, 3), 9);
        }
        assert_eq!(band.pixels().iter().filter(|&&p| p == 3).count(), 9 * 7);
    }

    #[test]
    fn only_rows_inside_the_band_are_touched() {
        let mut buffer = BandBuffer::new(W, 16);
        let mut raster = SpanRasterizer::new(W, 16);
        let quad = [
            Point2::new(4, 10),
            Point2::new(20, 10),
            Point2::new(20, 40),
            Point2::new(4, 40),
        ];

        let mut band = buffer.band(16, 16);
        raster.fill_polygon(&quad, &mut band, 5);
        assert!(band.pixels().iter().all(|&p| p == 5 || p == 0));
        for y in 0..16 {
            assert_eq!(count_row(&band, y, 5), 17);
        }
    }

    #[test]
    fn clipped_to_screen_width() {
        let mut buffer = BandBuffer::new(W, 16);
        let mut band = buffer.band(0, 16);
        let mut raster = SpanRasterizer::new(W, 16);
        let quad = [
            Point2::new(-30, 0),
            Point2::new(100, 0),
            Point2::new(100, 5),
            Point2::new(-30, 5),
        ];
        raster.fill_polygon(&quad, &mut band, 2);
        for y in 0..=5 {
            assert_eq!(count_row(&band, y, 2), W as usize);
        }
    }

    #[test]
    fn fully_off_screen_polygon_draws_nothing() {
        let mut buffer = BandBuffer::new(W, 16);
        let mut band = buffer.band(0, 16);
        let mut raster = SpanRasterizer::new(W, 16);

        let right = [Point2::new(70, 1), Point2::new(90, 1), Point2::new(80, 12)];
        raster.fill_polygon(&right, &mut band, 4);
        let left = [Point2::new(-70, 1), Point2::new(-10, 1), Point2::new(-40, 12)];
        raster.fill_polygon(&left, &mut band, 4);
        let below = DrawPolygon::new(&[Point2::new(0, 20), Point2::new(9, 20), Point2::new(5, 30)], 4);
        raster.draw(&below, &mut band);

        assert!(band.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn later_polygons_overwrite_earlier() {
        let mut buffer = BandBuffer::new(W, 16);
        let mut band = buffer.band(0, 16);
        let mut raster = SpanRasterizer::new(W, 16);
        let big = DrawPolygon::new(
            &[Point2::new(0, 0), Point2::new(20, 0), Point2::new(20, 10), Point2::new(0, 10)],
            1,
        );
        let small = DrawPolygon::new(
            &[Point2::new(5, 2), Point2::new(10, 2), Point2::new(10, 6), Point2::new(5, 6)],
            2,
        );
        raster.draw(&big, &mut band);
        raster.draw(&small, &mut band);
        assert_eq!(band.get_pixel(7, 4), Some(2));
        assert_eq!(band.get_pixel(15, 4), Some(1));
    }
}
