//! Fixed-point perspective projection.
//!
//! [`Projection`] holds the camera constants and maps camera-space vertices
//! to integer screen coordinates:
//!
//! ```text
//! fac = scale * near / (z + near + dolly)
//! x'  = (100 * width/2  + fac * x + 50) / 100
//! y'  = (100 * height/2 + fac * y + 50) / 100
//! ```
//!
//! `fac` carries two extra decimal digits, hence the `100` and the `+50`
//! rounding bias.

use crate::math::trig::{fast_sin, MAX_SIN};
use crate::math::vec2::Point2;
use crate::math::vec3::Vec3i;

/// Distance from the camera to the object origin.
pub const CAMERA_Z: i32 = 200;
/// Near-plane distance in the projection denominator.
pub const NEAR: i32 = 300;
/// Smallest denominator allowed in the perspective divide.
pub const MIN_DEPTH: i32 = 1;

/// Resting distance of the animated dolly.
const DOLLY_BASE: i32 = 150;
/// Swing of the animated dolly around its resting distance.
const DOLLY_SWING: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    width: i32,
    height: i32,
    /// Screen-space scale, a quarter of the screen height.
    scale: i32,
    near: i32,
    camera_z: i32,
}

/// Result of projecting one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projected {
    pub point: Point2,
    /// The denominator fell below [`MIN_DEPTH`] and was clamped.
    pub clamped: bool,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            scale: height as i32 / 4,
            near: NEAR,
            camera_z: CAMERA_Z,
        }
    }

    pub fn camera_z(&self) -> i32 {
        self.camera_z
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Extra camera distance at animation tick `tick`; period 120 ticks.
    pub fn dolly(tick: i32) -> i32 {
        DOLLY_BASE + DOLLY_SWING * fast_sin(3 * tick) / MAX_SIN
    }

    /// Perspective factor (scaled by 100) for camera-space depth `z`.
    ///
    /// The second value reports whether the denominator was clamped.
    #[inline]
    pub fn factor(&self, z: i32, dolly: i32) -> (i32, bool) {
        let depth = z + self.near + dolly;
        let clamped = depth < MIN_DEPTH;
        (self.scale * self.near / depth.max(MIN_DEPTH), clamped)
    }

    /// Project a camera-space vertex to integer screen coordinates.
    #[inline]
    pub fn project(&self, v: Vec3i, dolly: i32) -> Projected {
        let (fac, clamped) = self.factor(v.z, dolly);
        let fac = i64::from(fac);
        let x = (100 * i64::from(self.width) / 2 + fac * i64::from(v.x) + 50) / 100;
        let y = (100 * i64::from(self.height) / 2 + fac * i64::from(v.y) + 50) / 100;
        Projected {
            point: Point2::new(narrow(x), narrow(y)),
            clamped,
        }
    }

    /// Screen center.
    pub fn center(&self) -> Point2 {
        Point2::new(self.width / 2, self.height / 2)
    }
}

/// Saturate a screen coordinate into `i32`.
#[inline]
fn narrow(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_quarter_height() {
        assert_eq!(Projection::new(128, 160).scale(), 40);
    }

    #[test]
    fn dolly_oscillates() {
        assert_eq!(Projection::dolly(0), 150);
        assert_eq!(Projection::dolly(30), 450);
        assert_eq!(Projection::dolly(90), -150);
        assert_eq!(Projection::dolly(120), Projection::dolly(0));
    }

    #[test]
    fn origin_projects_to_center() {
        let projection = Projection::new(128, 160);
        let p = projection.project(Vec3i::new(0, 0, CAMERA_Z), 150);
        assert_eq!(p.point, projection.center());
        assert!(!p.clamped);
    }

    #[test]
    fn rounds_with_half_bias() {
        let projection = Projection::new(128, 160);
        // fac = 40 * 300 / (100 + 300 + 150) = 21
        let p = projection.project(Vec3i::new(100, -100, 100), 150);
        assert_eq!(p.point, Point2::new(85, 59));
    }

    #[test]
    fn degenerate_depth_is_clamped() {
        let projection = Projection::new(128, 160);
        let (fac, clamped) = projection.factor(-NEAR - 150, 150);
        assert!(clamped);
        assert_eq!(fac, 40 * NEAR / MIN_DEPTH);

        let p = projection.project(Vec3i::new(10, 10, -1000), 150);
        assert!(p.clamped);
    }

    #[test]
    fn wide_products_do_not_overflow() {
        // fac = 512 * 300 at a clamped depth; fac * x is about 1e10.
        let projection = Projection::new(128, 2048);
        let p = projection.project(Vec3i::new(65_000, -65_000, -NEAR - 1), 0);
        assert!(p.clamped);
        assert_eq!(p.point, Point2::new(99_840_064, -99_838_975));
    }
}
