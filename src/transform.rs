//! Vertex transform stage.
//!
//! Rotates every model vertex by the two scene angles, moves it in front of
//! the camera and projects it. Results land in [`TransformBuffers`], which the
//! engine allocates once and overwrites every frame.

use crate::config::MAX_VERTS;
use crate::math::trig::{fast_cos, fast_sin, wrap_degrees, MAX_SIN};
use crate::math::vec2::Point2;
use crate::math::vec3::Vec3i;
use crate::model::Model;
use crate::projection::Projection;

/// Object orientation as two whole-degree angles.
///
/// `yaw` (angle 0) turns the object in the X/Z plane and is applied first;
/// `pitch` (angle 1) then tilts the result in the Y/Z plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotation {
    yaw: i32,
    pitch: i32,
}

impl Rotation {
    pub fn new(yaw: i32, pitch: i32) -> Self {
        Self {
            yaw: wrap_degrees(yaw),
            pitch: wrap_degrees(pitch),
        }
    }

    pub fn yaw(&self) -> i32 {
        self.yaw
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }

    /// Accumulate per-frame increments, wrapping both angles into `0..360`.
    pub fn rotate(&mut self, d_yaw: i32, d_pitch: i32) -> &mut Self {
        self.yaw = wrap_degrees(self.yaw + d_yaw);
        self.pitch = wrap_degrees(self.pitch + d_pitch);
        self
    }

    /// Fixed-point sines and cosines for this orientation.
    pub fn basis(&self) -> RotationBasis {
        RotationBasis {
            cos0: fast_cos(self.yaw),
            sin0: fast_sin(self.yaw),
            cos1: fast_cos(self.pitch),
            sin1: fast_sin(self.pitch),
        }
    }
}

/// Trig values of a [`Rotation`], computed once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationBasis {
    cos0: i32,
    sin0: i32,
    cos1: i32,
    sin1: i32,
}

impl RotationBasis {
    /// Rotate an object-space vertex; the result is still centered on the origin.
    #[inline]
    pub fn apply(&self, v: Vec3i) -> Vec3i {
        let [cos0, sin0, cos1, sin1] = [self.cos0, self.sin0, self.cos1, self.sin1].map(i64::from);
        let (vx, vy, vz) = (i64::from(v.x), i64::from(v.y), i64::from(v.z));
        let max_sin = i64::from(MAX_SIN);
        // Divide by MAX_SIN after every trig product so values stay in object units.
        // Double trig products of a MAX_COORD vertex need more than 32 bits.
        let x = (cos0 * vx + sin0 * vz) / max_sin;
        let y = (cos1 * vy + (cos0 * sin1 * vz - sin0 * sin1 * vx) / max_sin) / max_sin;
        let z = ((cos0 * cos1 * vz - sin0 * cos1 * vx) / max_sin - sin1 * vy) / max_sin;
        // |result| <= 3 * MAX_COORD for a validated model.
        Vec3i::new(x as i32, y as i32, z as i32)
    }
}

/// Per-frame camera-space and screen-space vertex buffers.
#[derive(Debug, Default)]
pub struct TransformBuffers {
    transformed: Vec<Vec3i>,
    projected: Vec<Point2>,
}

impl TransformBuffers {
    pub fn new() -> Self {
        Self {
            transformed: Vec::with_capacity(MAX_VERTS),
            projected: Vec::with_capacity(MAX_VERTS),
        }
    }

    /// Camera-space vertices of the last transformed model.
    pub fn transformed(&self) -> &[Vec3i] {
        &self.transformed
    }

    /// Screen-space vertices of the last transformed model.
    pub fn projected(&self) -> &[Point2] {
        &self.projected
    }
}

/// Transform and project every vertex of `model`.
///
/// Returns how many vertices needed their perspective denominator clamped.
pub fn transform_vertices(
    model: &Model,
    rotation: Rotation,
    dolly: i32,
    projection: &Projection,
    buffers: &mut TransformBuffers,
) -> usize {
    let basis = rotation.basis();
    let offset = Vec3i::new(0, 0, projection.camera_z());

    buffers.transformed.clear();
    buffers.projected.clear();

    let mut clamped = 0;
    for &vertex in model.vertices() {
        let camera = basis.apply(vertex) + offset;
        let projected = projection.project(camera, dolly);
        clamped += projected.clamped as usize;

        buffers.transformed.push(camera);
        buffers.projected.push(projected.point);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_COORD;
    use crate::mesh::{CUBE_QUADS, CUBE_VERTICES};

    fn cube() -> Model {
        Model::from_static_quads("cube", &CUBE_VERTICES, &CUBE_QUADS, None).unwrap()
    }

    #[test]
    fn angles_wrap() {
        let mut r = Rotation::new(358, -4);
        assert_eq!(r.pitch(), 356);
        r.rotate(2, 4).rotate(2, 4);
        assert_eq!((r.yaw(), r.pitch()), (2, 4));
    }

    #[test]
    fn identity_rotation_keeps_vertices() {
        let basis = Rotation::default().basis();
        let v = Vec3i::new(-100, 37, 90);
        assert_eq!(basis.apply(v), v);
    }

    #[test]
    fn half_turn_yaw_mirrors_x_and_z() {
        let basis = Rotation::new(180, 0).basis();
        assert_eq!(basis.apply(Vec3i::new(100, 20, -50)), Vec3i::new(-100, 20, 50));
    }

    #[test]
    fn quarter_pitch_moves_y_into_z() {
        let basis = Rotation::new(0, 90).basis();
        assert_eq!(basis.apply(Vec3i::new(0, 100, 0)), Vec3i::new(0, 0, -100));
        assert_eq!(basis.apply(Vec3i::new(0, 0, 100)), Vec3i::new(0, 100, 0));
    }

    #[test]
    fn yaw_is_applied_before_pitch() {
        // Yaw 90 sends +x to -z; pitch 90 then sends -z to -y.
        let basis = Rotation::new(90, 90).basis();
        assert_eq!(basis.apply(Vec3i::new(100, 0, 0)), Vec3i::new(0, -100, 0));
    }

    #[test]
    fn cube_at_rest_sits_in_front_of_camera() {
        let mut buffers = TransformBuffers::new();
        let projection = Projection::new(128, 160);
        let clamped = transform_vertices(&cube(), Rotation::default(), 150, &projection, &mut buffers);

        assert_eq!(clamped, 0);
        assert_eq!(buffers.transformed().len(), 8);
        assert_eq!(buffers.transformed()[0], Vec3i::new(-100, -100, 100));
        assert_eq!(buffers.transformed()[6], Vec3i::new(100, 100, 300));
        // Near face: fac 21; far face: fac 16.
        assert_eq!(buffers.projected()[0], Point2::new(43, 59));
        assert_eq!(buffers.projected()[2], Point2::new(85, 101));
        assert_eq!(buffers.projected()[6], Point2::new(80, 96));
    }

    #[test]
    fn extreme_vertex_does_not_overflow() {
        // Both trig products of the y term reach 180 * 255 * 32000 at (45, 90).
        let basis = Rotation::new(45, 90).basis();
        let s = i64::from(fast_sin(45));
        let expected_y = (2 * s * 255 * 32_000 / 255 / 255) as i32;
        assert_eq!(
            basis.apply(Vec3i::new(-32_000, 0, 32_000)),
            Vec3i::new(0, expected_y, 0)
        );

        let model = Model::new(
            "extreme",
            vec![
                Vec3i::new(-MAX_COORD, MAX_COORD, MAX_COORD),
                Vec3i::new(MAX_COORD, -MAX_COORD, -MAX_COORD),
                Vec3i::new(MAX_COORD, MAX_COORD, -MAX_COORD),
            ],
            crate::model::Faces::Triangles(vec![[0u16, 1, 2]].into()),
            None,
        )
        .unwrap();
        let mut buffers = TransformBuffers::new();
        let projection = Projection::new(128, 160);
        for yaw in (0..360).step_by(15) {
            for pitch in (0..360).step_by(15) {
                transform_vertices(&model, Rotation::new(yaw, pitch), 450, &projection, &mut buffers);
                assert_eq!(buffers.projected().len(), 3);
            }
        }
    }

    #[test]
    fn buffers_are_reused() {
        let mut buffers = TransformBuffers::new();
        let projection = Projection::new(128, 160);
        for _ in 0..3 {
            transform_vertices(&cube(), Rotation::new(30, 60), 0, &projection, &mut buffers);
        }
        assert_eq!(buffers.projected().len(), 8);
        assert!(buffers.transformed.capacity() >= MAX_VERTS);
    }
}
