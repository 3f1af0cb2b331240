use std::ops::{Add, Neg, Sub};

use super::trig::MAX_SIN;

/// Integer 3D vector used for object-space and camera-space coordinates.
///
/// Components are `i32`. Products with two trig values (up to 255 * 255 times
/// a coordinate) are widened to `i64` by the transform stage, and models keep
/// their coordinates within [`MAX_COORD`](crate::config::MAX_COORD).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3i {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Rotate about the Z axis with precomputed fixed-point `cos`/`sin`.
    pub fn rotate_z(&self, cos: i32, sin: i32) -> Self {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (cos, sin, max_sin) = (i64::from(cos), i64::from(sin), i64::from(MAX_SIN));
        Self {
            x: ((x * cos - y * sin) / max_sin) as i32,
            y: ((y * cos + x * sin) / max_sin) as i32,
            z: self.z,
        }
    }

    /// Z component of the cross product of the XY projections of `a - self`
    /// and `c - self`.
    ///
    /// Its sign gives the winding of the triangle `(a, self, c)` as seen down
    /// the Z axis, its magnitude twice the projected area.
    pub fn cross_z(&self, a: Self, c: Self) -> i64 {
        let (x1, y1) = ((a.x - self.x) as i64, (a.y - self.y) as i64);
        let (x2, y2) = ((c.x - self.x) as i64, (c.y - self.y) as i64);
        x1 * y2 - y1 * x2
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3i> for Vec3i {
    type Output = Vec3i;

    fn add(self, rhs: Vec3i) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3i> for Vec3i {
    type Output = Vec3i;

    fn sub(self, rhs: Vec3i) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Neg for Vec3i {
    type Output = Vec3i;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}
