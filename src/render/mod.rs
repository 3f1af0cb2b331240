//! Band-based drawing: background layer, polygon rasterizer and the frame loop.

pub mod background;
pub mod band;
pub mod rasterizer;
pub mod renderer;

pub use background::{BackgroundMode, Backgrounds, Pattern};
pub use band::{Band, BandBuffer};
pub use rasterizer::{DrawPolygon, SpanRasterizer};
pub use renderer::{build_draw_list, BandRenderer, FrameInputs};
