//! Fake lighting.
//!
//! There is no light direction. A face's brightness is the magnitude of the
//! camera-space cross product computed by the backface test: faces that are
//! large and turned towards the viewer get a bigger value and a brighter shade.

use crate::colors::rgb565;
use crate::model::Model;
use crate::visibility::VisiblePolygon;

/// Used when a palette-shaded model carries no color table.
pub const DEFAULT_LIGHT_THRESHOLD: i32 = 20_000;

/// Maps the cross-product magnitude to a warm grey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeLight {
    /// Magnitude that reaches full brightness.
    threshold: i32,
}

impl FakeLight {
    pub const fn new(threshold: i32) -> Self {
        Self {
            threshold: if threshold < 1 { 1 } else { threshold },
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Brightness in `0..=255` for a cross-product magnitude.
    #[inline]
    pub fn intensity(&self, norm_z: i64) -> u8 {
        (norm_z * 255 / self.threshold as i64).clamp(0, 255) as u8
    }

    /// RGB565 shade with the blue channel halved.
    #[inline]
    pub fn shade(&self, norm_z: i64) -> u16 {
        let c = self.intensity(norm_z);
        rgb565(c, c, c / 2)
    }
}

impl Default for FakeLight {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_THRESHOLD)
    }
}

/// How polygons get their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// The model's per-face color table.
    #[default]
    Palette,
    FakeLight(FakeLight),
}

impl Shading {
    pub const fn fake_light(threshold: i32) -> Self {
        Shading::FakeLight(FakeLight::new(threshold))
    }

    /// Final fill color of a visible polygon.
    pub fn color_for(&self, model: &Model, polygon: &VisiblePolygon) -> u16 {
        match self {
            Shading::FakeLight(light) => light.shade(polygon.norm_z),
            Shading::Palette => model
                .face_color(polygon.index as usize)
                .unwrap_or_else(|| FakeLight::default().shade(polygon.norm_z)),
        }
    }
}
