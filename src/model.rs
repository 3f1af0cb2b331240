//! Immutable model records.
//!
//! A [`Model`] bundles a vertex array, a face list of uniform arity and an
//! optional per-face color table. The built-in solids borrow `'static` data;
//! models parsed from OBJ assets own theirs. Either way a model is never
//! mutated once built, and the showcase only selects between them.

use std::borrow::Cow;

use crate::config::{MAX_COORD, MAX_POLYS, MAX_VERTS};
use crate::error::{LoadError, ModelFault};
use crate::math::vec3::Vec3i;

/// Number of vertices per face, uniform across a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    #[default]
    Quads,
    Triangles,
}

impl PolygonMode {
    pub fn arity(self) -> usize {
        match self {
            PolygonMode::Quads => 4,
            PolygonMode::Triangles => 3,
        }
    }
}

/// Face index lists. The arity lives in the variant so a quad model can never
/// be walked with a triangle stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Faces {
    Quads(Cow<'static, [[u16; 4]]>),
    Triangles(Cow<'static, [[u16; 3]]>),
}

impl Faces {
    pub fn len(&self) -> usize {
        match self {
            Faces::Quads(q) => q.len(),
            Faces::Triangles(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> PolygonMode {
        match self {
            Faces::Quads(_) => PolygonMode::Quads,
            Faces::Triangles(_) => PolygonMode::Triangles,
        }
    }

    /// Vertex indices of face `i`.
    #[inline]
    pub fn face(&self, i: usize) -> &[u16] {
        match self {
            Faces::Quads(q) => &q[i],
            Faces::Triangles(t) => &t[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u16]> + '_ {
        (0..self.len()).map(move |i| self.face(i))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    name: Cow<'static, str>,
    vertices: Cow<'static, [Vec3i]>,
    faces: Faces,
    colors: Option<Cow<'static, [u16]>>,
}

impl Model {
    /// Build a model and check its invariants.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        vertices: impl Into<Cow<'static, [Vec3i]>>,
        faces: Faces,
        colors: Option<Cow<'static, [u16]>>,
    ) -> Result<Self, LoadError> {
        let model = Self {
            name: name.into(),
            vertices: vertices.into(),
            faces,
            colors,
        };
        model
            .validate()
            .map_err(|reason| LoadError::InvalidModel {
                name: model.name.to_string(),
                reason,
            })?;
        Ok(model)
    }

    /// Borrow compile-time quad data.
    pub fn from_static_quads(
        name: &'static str,
        vertices: &'static [Vec3i],
        quads: &'static [[u16; 4]],
        colors: Option<&'static [u16]>,
    ) -> Result<Self, LoadError> {
        Self::new(
            name,
            vertices,
            Faces::Quads(Cow::Borrowed(quads)),
            colors.map(Cow::Borrowed),
        )
    }

    /// Same geometry with a per-face color table that repeats `palette`.
    pub fn with_cycled_colors(&self, palette: &[u16]) -> Self {
        let colors = if palette.is_empty() {
            None
        } else {
            Some(Cow::Owned(
                palette.iter().copied().cycle().take(self.faces.len()).collect(),
            ))
        };
        Self {
            colors,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3i] {
        &self.vertices
    }

    pub fn faces(&self) -> &Faces {
        &self.faces
    }

    pub fn mode(&self) -> PolygonMode {
        self.faces.mode()
    }

    pub fn colors(&self) -> Option<&[u16]> {
        self.colors.as_deref()
    }

    /// Color of face `i`, if the model carries a color table.
    pub fn face_color(&self, i: usize) -> Option<u16> {
        self.colors.as_ref().and_then(|c| c.get(i).copied())
    }

    pub fn validate(&self) -> Result<(), ModelFault> {
        if self.faces.is_empty() {
            return Err(ModelFault::NoFaces);
        }
        if self.vertices.len() > MAX_VERTS {
            return Err(ModelFault::TooManyVertices(self.vertices.len()));
        }
        if self.faces.len() > MAX_POLYS {
            return Err(ModelFault::TooManyPolygons(self.faces.len()));
        }
        for (vertex, v) in self.vertices.iter().enumerate() {
            let out_of_range = [v.x, v.y, v.z]
                .into_iter()
                .find(|c| c.unsigned_abs() > MAX_COORD as u32);
            if let Some(value) = out_of_range {
                return Err(ModelFault::CoordinateRange { vertex, value });
            }
        }
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&index) = indices
                .iter()
                .find(|&&i| i as usize >= self.vertices.len())
            {
                return Err(ModelFault::IndexOutOfRange {
                    face,
                    index: index as u32,
                });
            }
        }
        if let Some(colors) = &self.colors {
            if colors.len() != self.faces.len() {
                return Err(ModelFault::ColorCount {
                    colors: colors.len(),
                    faces: self.faces.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{CUBE_COLORS, CUBE_QUADS, CUBE_VERTICES};

    fn cube() -> Model {
        Model::from_static_quads("cube", &CUBE_VERTICES, &CUBE_QUADS, Some(&CUBE_COLORS)).unwrap()
    }

    #[test]
    fn static_cube_is_valid() {
        let model = cube();
        assert_eq!(model.vertices().len(), 8);
        assert_eq!(model.faces().len(), 6);
        assert_eq!(model.mode(), PolygonMode::Quads);
        assert_eq!(model.face_color(0), Some(CUBE_COLORS[0]));
    }

    #[test]
    fn face_slices_match_arity() {
        let model = cube();
        assert!(model.faces().iter().all(|f| f.len() == 4));

        let tri = Model::new(
            "tri",
            vec![Vec3i::ZERO, Vec3i::new(1, 0, 0), Vec3i::new(0, 1, 0)],
            Faces::Triangles(Cow::Owned(vec![[0, 1, 2]])),
            None,
        )
        .unwrap();
        assert_eq!(tri.faces().face(0), &[0, 1, 2]);
        assert_eq!(tri.mode().arity(), 3);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Model::new(
            "broken",
            vec![Vec3i::ZERO, Vec3i::new(1, 0, 0), Vec3i::new(0, 1, 0)],
            Faces::Triangles(Cow::Owned(vec![[0, 1, 3]])),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidModel {
                reason: ModelFault::IndexOutOfRange { face: 0, index: 3 },
                ..
            }
        ));
    }

    #[test]
    fn rejects_color_count_mismatch() {
        let err = Model::from_static_quads("cube", &CUBE_VERTICES, &CUBE_QUADS, Some(&[0; 2]))
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidModel {
                reason: ModelFault::ColorCount { colors: 2, faces: 6 },
                ..
            }
        ));
    }

    #[test]
    fn rejects_too_many_vertices() {
        let err = Model::new(
            "big",
            vec![Vec3i::ZERO; MAX_VERTS + 1],
            Faces::Triangles(Cow::Owned(vec![[0, 1, 2]])),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidModel {
                reason: ModelFault::TooManyVertices(_),
                ..
            }
        ));
    }

    #[test]
    fn rejects_coordinates_outside_i16_range() {
        let faces = || Faces::Triangles(Cow::Owned(vec![[0, 1, 2]]));
        let edge = vec![Vec3i::new(-MAX_COORD, 0, MAX_COORD), Vec3i::ZERO, Vec3i::new(1, 1, 1)];
        assert!(Model::new("edge", edge, faces(), None).is_ok());

        let err = Model::new(
            "huge",
            vec![Vec3i::ZERO, Vec3i::new(1, 1, 1), Vec3i::new(0, -40_000, 0)],
            faces(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidModel {
                reason: ModelFault::CoordinateRange { vertex: 2, value: -40_000 },
                ..
            }
        ));
    }

    #[test]
    fn cycled_colors_cover_every_face() {
        let model = cube().with_cycled_colors(&[1, 2, 3, 4]);
        assert_eq!(model.colors(), Some(&[1, 2, 3, 4, 1, 2][..]));
        assert_eq!(model.validate(), Ok(()));
        assert_eq!(cube().with_cycled_colors(&[]).colors(), None);
    }
}
