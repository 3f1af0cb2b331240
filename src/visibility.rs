//! Backface culling and painter's ordering.
//!
//! Both run once per frame on the camera-space vertices. The resulting
//! [`VisibleList`] is frozen for the rest of the frame and redrawn into every
//! band.
//!
//! Facing is decided by the sign of the 2D cross product of the first two
//! edges of each face, taken in camera-space X/Y (not after projection). The
//! ordering is by summed vertex depth, which for a uniform-arity model sorts
//! the same as average depth. Interpenetrating or coplanar faces can come out
//! in the wrong order; there is no depth buffer to fix that up.

use crate::config::MAX_POLYS;
use crate::math::vec3::Vec3i;
use crate::model::Model;
use crate::sorting::selection_sort_by_depth_descending;

/// Which cross-product sign counts as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Faces wound clockwise on screen (negative cross product) are visible.
    #[default]
    Clockwise,
    /// Faces wound counter-clockwise on screen (positive cross product) are visible.
    CounterClockwise,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }

    /// Edge-on faces (zero cross product) are never visible.
    #[inline]
    pub fn is_front(self, cross_z: i64) -> bool {
        match self {
            Orientation::Clockwise => cross_z < 0,
            Orientation::CounterClockwise => cross_z > 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullSettings {
    pub backface_cull: bool,
    pub orientation: Orientation,
}

impl CullSettings {
    pub fn new(backface_cull: bool, orientation: Orientation) -> Self {
        Self {
            backface_cull,
            orientation,
        }
    }
}

/// A face that survived culling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisiblePolygon {
    /// Index into the model's face list.
    pub index: u16,
    /// Sum of the camera-space Z of the face's vertices.
    pub depth: i32,
    /// Magnitude of the facing cross product, the fake-light input.
    pub norm_z: i64,
}

/// Faces to draw this frame, furthest first.
#[derive(Debug, Default)]
pub struct VisibleList {
    polygons: Vec<VisiblePolygon>,
}

impl VisibleList {
    pub fn new() -> Self {
        Self {
            polygons: Vec::with_capacity(MAX_POLYS),
        }
    }

    pub fn as_slice(&self) -> &[VisiblePolygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.polygons.iter().map(|p| p.index as usize)
    }
}

/// Signed facing value of a face: `(v0 - v1) x (v2 - v1)` in camera X/Y.
#[inline]
pub fn face_cross_z(face: &[u16], vertices: &[Vec3i]) -> i64 {
    let v0 = vertices[face[0] as usize];
    let v1 = vertices[face[1] as usize];
    let v2 = vertices[face[2] as usize];
    v1.cross_z(v0, v2)
}

/// Cull back faces of `model` and sort the survivors back to front.
///
/// `transformed` must hold the camera-space vertices of `model`.
pub fn cull_and_sort(
    model: &Model,
    transformed: &[Vec3i],
    settings: CullSettings,
    visible: &mut VisibleList,
) {
    visible.polygons.clear();

    for (i, face) in model.faces().iter().enumerate() {
        let cross = face_cross_z(face, transformed);
        if settings.backface_cull && !settings.orientation.is_front(cross) {
            continue;
        }
        let depth = face.iter().map(|&v| transformed[v as usize].z).sum();
        visible.polygons.push(VisiblePolygon {
            index: i as u16,
            depth,
            norm_z: cross.abs(),
        });
    }

    selection_sort_by_depth_descending(&mut visible.polygons, |p| p.depth);
    log::trace!(
        "{}: {} of {} faces visible",
        model.name(),
        visible.len(),
        model.faces().len()
    );
}
