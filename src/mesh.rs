//! Built-in solids.
//!
//! The quad solids are plain `const` tables. The curved triangle solids are
//! embedded Wavefront OBJ files parsed with `tobj` when the roster is built.
//! Coordinates are integer object-space units; the camera sits 200 units in
//! front of the origin, so the solids span roughly +-100.
//!
//! Winding: quad solids list each face so that the camera-space cross
//! product is negative when the face points at the camera (orientation 0).
//! The OBJ solids use the opposite, counter-clockwise convention
//! (orientation 1).

use std::borrow::Cow;

use crate::colors::{
    CYAN, DARK_BLUE, DARK_CYAN, DARK_GREEN, DARK_MAGENTA, DARK_RED, DARK_YELLOW, GREEN, GREY,
    MAGENTA, ORANGE, YELLOW,
};
use crate::error::{LoadError, ModelFault};
use crate::math::vec3::Vec3i;
use crate::model::{Faces, Model};

pub const CUBE_VERTICES: [Vec3i; 8] = [
    Vec3i::new(-100, -100, -100),
    Vec3i::new(100, -100, -100),
    Vec3i::new(100, 100, -100),
    Vec3i::new(-100, 100, -100),
    Vec3i::new(-100, -100, 100),
    Vec3i::new(100, -100, 100),
    Vec3i::new(100, 100, 100),
    Vec3i::new(-100, 100, 100),
];

// Front (-z), right, back, left, top (-y), bottom.
pub const CUBE_QUADS: [[u16; 4]; 6] = [
    [0, 1, 2, 3],
    [1, 5, 6, 2],
    [4, 7, 6, 5],
    [0, 3, 7, 4],
    [0, 4, 5, 1],
    [3, 2, 6, 7],
];

/// Six 70-unit arms around a hidden 60-unit core.
pub const CROSS_VERTICES: [Vec3i; 32] = [
    Vec3i::new(-100, -30, -30),
    Vec3i::new(-30, -30, -30),
    Vec3i::new(-30, 30, -30),
    Vec3i::new(-100, 30, -30),
    Vec3i::new(-100, -30, 30),
    Vec3i::new(-30, -30, 30),
    Vec3i::new(-30, 30, 30),
    Vec3i::new(-100, 30, 30),
    Vec3i::new(30, -30, -30),
    Vec3i::new(100, -30, -30),
    Vec3i::new(100, 30, -30),
    Vec3i::new(30, 30, -30),
    Vec3i::new(30, -30, 30),
    Vec3i::new(100, -30, 30),
    Vec3i::new(100, 30, 30),
    Vec3i::new(30, 30, 30),
    Vec3i::new(-30, -100, -30),
    Vec3i::new(30, -100, -30),
    Vec3i::new(-30, -100, 30),
    Vec3i::new(30, -100, 30),
    Vec3i::new(30, 100, -30),
    Vec3i::new(-30, 100, -30),
    Vec3i::new(30, 100, 30),
    Vec3i::new(-30, 100, 30),
    Vec3i::new(-30, -30, -100),
    Vec3i::new(30, -30, -100),
    Vec3i::new(30, 30, -100),
    Vec3i::new(-30, 30, -100),
    Vec3i::new(-30, -30, 100),
    Vec3i::new(30, -30, 100),
    Vec3i::new(30, 30, 100),
    Vec3i::new(-30, 30, 100),
];

pub const CROSS_QUADS: [[u16; 4]; 30] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 3, 7, 4],
    [0, 4, 5, 1],
    [3, 2, 6, 7],
    [8, 9, 10, 11],
    [9, 13, 14, 10],
    [12, 15, 14, 13],
    [8, 12, 13, 9],
    [11, 10, 14, 15],
    [16, 17, 8, 1],
    [17, 19, 12, 8],
    [18, 5, 12, 19],
    [16, 1, 5, 18],
    [16, 18, 19, 17],
    [2, 11, 20, 21],
    [11, 15, 22, 20],
    [6, 23, 22, 15],
    [2, 21, 23, 6],
    [21, 20, 22, 23],
    [24, 25, 26, 27],
    [25, 8, 11, 26],
    [24, 27, 2, 1],
    [24, 1, 8, 25],
    [27, 26, 11, 2],
    [12, 29, 30, 15],
    [28, 31, 30, 29],
    [5, 6, 31, 28],
    [5, 28, 29, 12],
    [6, 15, 30, 31],
];

/// Hexagonal prism; each cap is split into two trapezoids.
pub const PRISM_VERTICES: [Vec3i; 12] = [
    Vec3i::new(78, -60, 45),
    Vec3i::new(0, -60, 90),
    Vec3i::new(-78, -60, 45),
    Vec3i::new(-78, -60, -45),
    Vec3i::new(0, -60, -90),
    Vec3i::new(78, -60, -45),
    Vec3i::new(78, 60, 45),
    Vec3i::new(0, 60, 90),
    Vec3i::new(-78, 60, 45),
    Vec3i::new(-78, 60, -45),
    Vec3i::new(0, 60, -90),
    Vec3i::new(78, 60, -45),
];

pub const PRISM_QUADS: [[u16; 4]; 10] = [
    [0, 1, 7, 6],
    [1, 2, 8, 7],
    [2, 3, 9, 8],
    [3, 4, 10, 9],
    [4, 5, 11, 10],
    [5, 0, 6, 11],
    [0, 3, 2, 1],
    [3, 0, 5, 4],
    [6, 7, 8, 9],
    [9, 10, 11, 6],
];

/// Four 70-unit cubes on alternate corners of a 120-unit lattice.
pub const CUBES_VERTICES: [Vec3i; 32] = [
    Vec3i::new(-95, -95, -95),
    Vec3i::new(-25, -95, -95),
    Vec3i::new(-25, -25, -95),
    Vec3i::new(-95, -25, -95),
    Vec3i::new(-95, -95, -25),
    Vec3i::new(-25, -95, -25),
    Vec3i::new(-25, -25, -25),
    Vec3i::new(-95, -25, -25),
    Vec3i::new(25, -95, 25),
    Vec3i::new(95, -95, 25),
    Vec3i::new(95, -25, 25),
    Vec3i::new(25, -25, 25),
    Vec3i::new(25, -95, 95),
    Vec3i::new(95, -95, 95),
    Vec3i::new(95, -25, 95),
    Vec3i::new(25, -25, 95),
    Vec3i::new(-95, 25, 25),
    Vec3i::new(-25, 25, 25),
    Vec3i::new(-25, 95, 25),
    Vec3i::new(-95, 95, 25),
    Vec3i::new(-95, 25, 95),
    Vec3i::new(-25, 25, 95),
    Vec3i::new(-25, 95, 95),
    Vec3i::new(-95, 95, 95),
    Vec3i::new(25, 25, -95),
    Vec3i::new(95, 25, -95),
    Vec3i::new(95, 95, -95),
    Vec3i::new(25, 95, -95),
    Vec3i::new(25, 25, -25),
    Vec3i::new(95, 25, -25),
    Vec3i::new(95, 95, -25),
    Vec3i::new(25, 95, -25),
];

pub const CUBES_QUADS: [[u16; 4]; 24] = [
    [0, 1, 2, 3],
    [1, 5, 6, 2],
    [4, 7, 6, 5],
    [0, 3, 7, 4],
    [0, 4, 5, 1],
    [3, 2, 6, 7],
    [8, 9, 10, 11],
    [9, 13, 14, 10],
    [12, 15, 14, 13],
    [8, 11, 15, 12],
    [8, 12, 13, 9],
    [11, 10, 14, 15],
    [16, 17, 18, 19],
    [17, 21, 22, 18],
    [20, 23, 22, 21],
    [16, 19, 23, 20],
    [16, 20, 21, 17],
    [19, 18, 22, 23],
    [24, 25, 26, 27],
    [25, 29, 30, 26],
    [28, 31, 30, 29],
    [24, 27, 31, 28],
    [24, 28, 29, 25],
    [27, 26, 30, 31],
];

pub const CUBE_COLORS: [u16; 6] = [CYAN[0], MAGENTA[0], CYAN[1], MAGENTA[1], YELLOW[0], YELLOW[1]];

// One hue per arm, five faces each: three sides, far cap, last side.
pub const CROSS_COLORS: [u16; 30] = [
    CYAN[0], CYAN[1], CYAN[2], CYAN[1], CYAN[2],
    MAGENTA[0], MAGENTA[1], MAGENTA[2], MAGENTA[1], MAGENTA[2],
    YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[1], YELLOW[2],
    ORANGE[0], ORANGE[1], ORANGE[2], ORANGE[1], ORANGE[2],
    GREEN[0], GREEN[1], GREEN[2], GREEN[1], GREEN[2],
    GREY[0], GREY[1], GREY[2], GREY[1], GREY[2],
];

pub const PRISM_COLORS: [u16; 10] = [
    ORANGE[0], ORANGE[1], ORANGE[2], ORANGE[0], ORANGE[1], ORANGE[2],
    DARK_RED, DARK_RED, DARK_YELLOW, DARK_YELLOW,
];

pub const CUBES_COLORS: [u16; 24] = [
    CYAN[0], CYAN[1], CYAN[0], CYAN[1], CYAN[2], CYAN[2],
    MAGENTA[0], MAGENTA[1], MAGENTA[0], MAGENTA[1], MAGENTA[2], MAGENTA[2],
    YELLOW[0], YELLOW[1], YELLOW[0], YELLOW[1], YELLOW[2], YELLOW[2],
    GREEN[0], GREEN[1], GREEN[0], GREEN[1], GREEN[2], GREEN[2],
];

/// Palette repeated over the faces of the cone.
pub const CONE_PALETTE: [u16; 4] = [ORANGE[0], ORANGE[2], DARK_RED, DARK_YELLOW];
/// Palette repeated over the faces of the torus.
pub const TORUS_PALETTE: [u16; 6] = [
    DARK_CYAN, DARK_BLUE, DARK_MAGENTA, DARK_GREEN, CYAN[1], MAGENTA[1],
];

pub const CONE_OBJ: &str = include_str!("../assets/models/cone.obj");
pub const SPHERE_OBJ: &str = include_str!("../assets/models/sphere.obj");
pub const TORUS_OBJ: &str = include_str!("../assets/models/torus.obj");
pub const KNOT_OBJ: &str = include_str!("../assets/models/knot.obj");

/// Parse an embedded OBJ into a triangle model.
///
/// All objects in the file are merged into one vertex/face list. Faces must
/// all be triangles; coordinates are rounded to integers.
pub fn load_obj_str(name: &'static str, source: &str) -> Result<Model, LoadError> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };
    let mut reader = source.as_bytes();
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &options, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| LoadError::Obj { name, source })?;

    let invalid = |reason| LoadError::InvalidModel {
        name: name.to_string(),
        reason,
    };

    let mut vertices = Vec::new();
    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let base = vertices.len() as u32;

        // tobj leaves face_arities empty when every face is a triangle.
        if let Some((face, &arity)) = mesh.face_arities.iter().enumerate().find(|&(_, &a)| a != 3) {
            return Err(invalid(if arity == 4 {
                ModelFault::MixedArity { face, arity }
            } else {
                ModelFault::UnsupportedArity(arity)
            }));
        }
        if mesh.indices.len() % 3 != 0 {
            return Err(invalid(ModelFault::UnsupportedArity(mesh.indices.len() as u32 % 3)));
        }

        vertices.extend(mesh.positions.chunks_exact(3).map(|p| {
            Vec3i::new(p[0].round() as i32, p[1].round() as i32, p[2].round() as i32)
        }));

        for (face, tri) in mesh.indices.chunks_exact(3).enumerate() {
            let mut out = [0u16; 3];
            for (slot, &index) in out.iter_mut().zip(tri) {
                let index = base + index;
                *slot = u16::try_from(index)
                    .map_err(|_| invalid(ModelFault::IndexOutOfRange { face, index }))?;
            }
            triangles.push(out);
        }
    }

    Model::new(name, vertices, Faces::Triangles(Cow::Owned(triangles)), None)
}
