//! Per-band frame loop.
//!
//! Visibility is decided once per frame and frozen into a list of
//! [`DrawPolygon`]s. The [`BandRenderer`] then walks the screen top to bottom
//! one band at a time: background first, then every polygon in painter's
//! order, then the finished band goes to the [`Display`]. A polygon that
//! spans several bands has its edges walked once per band it touches. That
//! redundant edge walking is what keeps the pixel storage at one band.

use super::background::{BackgroundMode, Backgrounds};
use super::band::BandBuffer;
use super::rasterizer::{DrawPolygon, SpanRasterizer};
use crate::display::Display;
use crate::light::Shading;
use crate::math::vec2::Point2;
use crate::model::Model;
use crate::starfield::Starfield;
use crate::visibility::VisibleList;

/// Everything a band needs that stays fixed for the whole frame.
pub struct FrameInputs<'a> {
    pub backgrounds: &'a Backgrounds,
    pub background: BackgroundMode,
    pub tick: i32,
    pub starfield: &'a Starfield,
    pub polygons: &'a [DrawPolygon],
}

/// Resolve the sorted visible faces of `model` into screen-space polygons
/// with their final color.
pub fn build_draw_list(
    model: &Model,
    visible: &VisibleList,
    projected: &[Point2],
    shading: &Shading,
    out: &mut Vec<DrawPolygon>,
) {
    out.clear();
    let faces = model.faces();
    for polygon in visible.as_slice() {
        let face = faces.face(polygon.index as usize);
        let mut points = [Point2::ZERO; 4];
        for (slot, &v) in points.iter_mut().zip(face) {
            *slot = projected[v as usize];
        }
        out.push(DrawPolygon::new(
            &points[..face.len()],
            shading.color_for(model, polygon),
        ));
    }
}

pub struct BandRenderer {
    buffer: BandBuffer,
    raster: SpanRasterizer,
    height: u32,
}

impl BandRenderer {
    pub fn new(width: u32, height: u32, band_height: u32) -> Self {
        Self {
            buffer: BandBuffer::new(width, band_height),
            raster: SpanRasterizer::new(width, band_height),
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn band_height(&self) -> u32 {
        self.buffer.band_height()
    }

    /// Draw and push every band of one frame.
    ///
    /// Returns the number of bands pushed.
    pub fn render<D: Display>(
        &mut self,
        frame: &FrameInputs<'_>,
        display: &mut D,
    ) -> Result<u32, D::Error> {
        let width = self.buffer.width();
        let band_height = self.buffer.band_height();
        let mut bands = 0;

        let mut y0 = 0;
        while y0 < self.height {
            let rows = band_height.min(self.height - y0);
            let mut band = self.buffer.band(y0, rows);

            frame
                .backgrounds
                .draw(frame.background, frame.tick, frame.starfield, &mut band);
            for polygon in frame.polygons {
                self.raster.draw(polygon, &mut band);
            }

            display.push_band(0, y0, width, rows, band.pixels())?;
            bands += 1;
            y0 += band_height;
        }
        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::rgb565;
    use crate::display::FrameCapture;
    use crate::visibility::{cull_and_sort, CullSettings};
    use crate::mesh::{CUBE_COLORS, CUBE_QUADS, CUBE_VERTICES};
    use crate::projection::Projection;
    use crate::transform::{transform_vertices, Rotation, TransformBuffers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const RED: u16 = rgb565(255, 0, 0);

    fn square(x0: i32, y0: i32, x1: i32, y1: i32, color: u16) -> DrawPolygon {
        DrawPolygon::new(
            &[
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
            color,
        )
    }

    fn render_with(band_height: u32, polygons: &[DrawPolygon], background: BackgroundMode) -> FrameCapture {
        let backgrounds = Backgrounds::load().unwrap();
        let starfield = Starfield::new(40, 20, 64, 80, &mut StdRng::seed_from_u64(5));
        let mut renderer = BandRenderer::new(64, 80, band_height);
        let mut capture = FrameCapture::new(64, 80);
        let frame = FrameInputs {
            backgrounds: &backgrounds,
            background,
            tick: 33,
            starfield: &starfield,
            polygons,
        };
        let bands = renderer.render(&frame, &mut capture).unwrap();
        assert_eq!(bands, 80u32.div_ceil(band_height));
        capture
    }

    #[test]
    fn pushes_every_band_once() {
        let capture = render_with(16, &[], BackgroundMode::Checker);
        assert_eq!(capture.bands_pushed(), 5);
        let capture = render_with(30, &[], BackgroundMode::Checker);
        assert_eq!(capture.bands_pushed(), 3);
    }

    #[test]
    fn polygon_across_bands_is_seamless() {
        let polygons = [square(10, 5, 50, 70, RED)];
        let whole = render_with(80, &polygons, BackgroundMode::Tiles);
        for band_height in [1, 7, 16, 33] {
            assert_eq!(render_with(band_height, &polygons, BackgroundMode::Tiles), whole);
        }
        assert_eq!(whole.pixel(30, 40), Some(RED));
        assert_eq!(whole.pixel(10, 5), Some(RED));
        assert_eq!(whole.pixel(50, 70), Some(RED));
        assert_ne!(whole.pixel(51, 40), Some(RED));
    }

    #[test]
    fn later_polygons_are_on_top() {
        let blue = rgb565(0, 0, 255);
        let polygons = [square(0, 0, 40, 40, RED), square(20, 20, 60, 60, blue)];
        let capture = render_with(16, &polygons, BackgroundMode::Starfield);
        assert_eq!(capture.pixel(10, 10), Some(RED));
        assert_eq!(capture.pixel(30, 30), Some(blue));
        assert_eq!(capture.pixel(50, 50), Some(blue));
    }

    #[test]
    fn draw_list_follows_visible_order() {
        let model =
            Model::from_static_quads("cube", &CUBE_VERTICES, &CUBE_QUADS, Some(&CUBE_COLORS)).unwrap();
        let mut buffers = TransformBuffers::new();
        transform_vertices(&model, Rotation::new(30, 30), 150, &Projection::new(128, 160), &mut buffers);
        let mut visible = VisibleList::new();
        cull_and_sort(&model, buffers.transformed(), CullSettings::new(true, Default::default()), &mut visible);

        let mut list = Vec::new();
        build_draw_list(&model, &visible, buffers.projected(), &Shading::Palette, &mut list);

        assert_eq!(list.len(), visible.len());
        for (polygon, face) in list.iter().zip(visible.as_slice()) {
            assert_eq!(polygon.color, CUBE_COLORS[face.index as usize]);
            let indices = model.faces().face(face.index as usize);
            assert_eq!(polygon.points()[0], buffers.projected()[indices[0] as usize]);
            assert_eq!(polygon.points().len(), 4);
        }
    }
}
