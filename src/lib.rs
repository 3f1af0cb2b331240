//! A banded fixed-point software 3D renderer.
//!
//! Built for displays driven by a controller with far less RAM than one
//! frame: the screen is drawn a few scanlines at a time into a small band
//! buffer, with all geometry in integer fixed-point math. Visibility is
//! computed once per frame; each band then redraws the frozen, depth-sorted
//! polygon list over one of several animated backgrounds.
//!
//! SDL2 stands in for the LCD on the desktop.
//!
//! # Quick Start
//!
//! ```ignore
//! use banded3d::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default())?;
//! let mut frame = FrameCapture::new(128, 160);
//! engine.render_frame(&mut frame)?;
//! frame.save("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod colors;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod scene;
pub mod starfield;
pub mod transform;
pub mod visibility;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod render;
pub(crate) mod sorting;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use display::{Display, FrameCapture};
pub use engine::{Engine, FrameStats};
pub use error::{ConfigError, EngineError, LoadError};
pub use model::Model;
pub use render::BackgroundMode;
pub use scene::{Clock, SceneState};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use banded3d::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, FrameStats};

    // Scene
    pub use crate::render::BackgroundMode;
    pub use crate::scene::{Clock, SceneState, Solid};

    // Model
    pub use crate::model::{Model, PolygonMode};

    // Math
    pub use crate::math::vec2::Point2;
    pub use crate::math::vec3::Vec3i;

    // Display
    pub use crate::display::{Display, FrameCapture};

    // Window & Input
    pub use crate::window::{Window, WindowEvent, DEFAULT_SCALE};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{Band, BandBuffer, DrawPolygon, SpanRasterizer};
}
