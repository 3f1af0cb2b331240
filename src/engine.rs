//! Frame driver.
//!
//! The [`Engine`] owns every per-frame buffer and runs the pipeline:
//!
//! 1. transform and project the current model's vertices,
//! 2. advance the starfield when it is the active background,
//! 3. cull and sort once, freezing the draw list for the frame,
//! 4. draw each band (background, then polygons) and push it to the display,
//! 5. step the animation.
//!
//! Switching between showcase entries is driven by [`Engine::poll_switch`]
//! with the current time from a [`Clock`].

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{RenderConfig, MAX_POLYS};
use crate::display::Display;
use crate::error::EngineError;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::{build_draw_list, BackgroundMode, Backgrounds, BandRenderer, DrawPolygon, FrameInputs};
use crate::scene::{Clock, ModelSet, SceneState, Showcase};
use crate::starfield::Starfield;
use crate::transform::{transform_vertices, TransformBuffers};
use crate::visibility::{cull_and_sort, VisibleList};

/// Timing and polygon counts since the last showcase switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Render time of the last frame.
    pub frame_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub frames: u64,
    pub total_polygons: usize,
    pub visible_polygons: usize,
    /// Vertices whose perspective denominator was clamped in the last frame.
    pub clamped_vertices: usize,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_ms: 0,
            min_ms: u64::MAX,
            max_ms: 0,
            frames: 0,
            total_polygons: 0,
            visible_polygons: 0,
            clamped_vertices: 0,
        }
    }
}

fn fps(ms: u64) -> u64 {
    1000 / ms.max(1)
}

impl FrameStats {
    pub fn record(&mut self, frame_ms: u64) {
        self.frame_ms = frame_ms;
        self.min_ms = self.min_ms.min(frame_ms);
        self.max_ms = self.max_ms.max(frame_ms);
        self.frames += 1;
    }

    pub fn fps(&self) -> u64 {
        fps(self.frame_ms)
    }

    /// Slowest and fastest frame rate since the last reset.
    pub fn fps_range(&self) -> (u64, u64) {
        if self.frames == 0 {
            return (0, 0);
        }
        (fps(self.max_ms), fps(self.min_ms))
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slow, fast) = self.fps_range();
        let min_ms = if self.frames == 0 { 0 } else { self.min_ms };
        write!(
            f,
            "{} ms {} fps | {}-{} ms {}-{} fps | total/vis {}/{}",
            self.frame_ms,
            self.fps(),
            min_ms,
            self.max_ms,
            slow,
            fast,
            self.total_polygons,
            self.visible_polygons
        )
    }
}

pub struct Engine {
    config: RenderConfig,
    models: ModelSet,
    backgrounds: Backgrounds,
    scene: SceneState,
    showcase: Showcase,
    projection: Projection,
    buffers: TransformBuffers,
    visible: VisibleList,
    draw_list: Vec<DrawPolygon>,
    starfield: Starfield,
    rng: StdRng,
    renderer: BandRenderer,
    stats: FrameStats,
}

impl Engine {
    /// Validate `config`, build the models and decode the patterns.
    pub fn new(config: RenderConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let models = ModelSet::load()?;
        let backgrounds = Backgrounds::load()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let starfield = Starfield::new(
            config.star_count,
            config.star_speed,
            config.width,
            config.height,
            &mut rng,
        );

        log::info!(
            "engine ready: {}x{} screen, {} bands of {} lines, {} stars",
            config.width,
            config.height,
            config.band_count(),
            config.band_height,
            config.star_count
        );

        Ok(Self {
            models,
            backgrounds,
            scene: SceneState::new(),
            showcase: Showcase::new(config.switch_interval_ms, 0),
            projection: Projection::new(config.width, config.height),
            buffers: TransformBuffers::new(),
            visible: VisibleList::new(),
            draw_list: Vec::with_capacity(MAX_POLYS),
            starfield,
            rng,
            renderer: BandRenderer::new(config.width, config.height, config.band_height),
            stats: FrameStats::default(),
            config,
        })
    }

    /// Replace the scene, e.g. to start from a given roster slot.
    pub fn with_scene(mut self, scene: SceneState) -> Self {
        self.scene = scene;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.scene
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn starfield_mut(&mut self) -> &mut Starfield {
        &mut self.starfield
    }

    /// The model of the current showcase entry.
    pub fn model(&self) -> &Model {
        self.models.get(self.scene.entry().solid)
    }

    /// Sorted faces of the last rendered frame.
    pub fn visible(&self) -> &VisibleList {
        &self.visible
    }

    /// Restart the switch interval from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.showcase = Showcase::new(self.config.switch_interval_ms, now_ms);
        self.stats = FrameStats::default();
    }

    /// Advance to the next showcase entry if the interval has elapsed.
    pub fn poll_switch(&mut self, now_ms: u64) -> bool {
        let previous = self.stats;
        if !self.showcase.poll(now_ms, &mut self.scene) {
            return false;
        }
        let entry = self.scene.entry();
        log::info!(
            "showing #{} {} ({:?}) on {}; previous: {}",
            self.scene.entry_index(),
            entry.solid.name(),
            entry.shading,
            self.scene.background,
            previous
        );
        self.stats = FrameStats::default();
        true
    }

    /// Render one frame into `display` and advance the animation.
    pub fn render_frame<D: Display>(&mut self, display: &mut D) -> Result<(), D::Error> {
        let model = self.models.get(self.scene.entry().solid);

        let clamped = transform_vertices(
            model,
            self.scene.rotation,
            self.scene.dolly(),
            &self.projection,
            &mut self.buffers,
        );
        if clamped > 0 {
            log::debug!("{}: {clamped} vertices at minimum projection depth", model.name());
        }

        if self.scene.background == BackgroundMode::Starfield {
            self.starfield.update(&mut self.rng);
        }

        cull_and_sort(model, self.buffers.transformed(), self.scene.cull(), &mut self.visible);
        build_draw_list(
            model,
            &self.visible,
            self.buffers.projected(),
            &self.scene.shading(),
            &mut self.draw_list,
        );

        let frame = FrameInputs {
            backgrounds: &self.backgrounds,
            background: self.scene.background,
            tick: self.scene.tick,
            starfield: &self.starfield,
            polygons: &self.draw_list,
        };
        self.renderer.render(&frame, display)?;

        self.stats.total_polygons = model.faces().len();
        self.stats.visible_polygons = self.visible.len();
        self.stats.clamped_vertices = clamped;
        self.scene.advance_frame();
        Ok(())
    }

    /// One iteration of the main loop: poll the switch, render, time it.
    pub fn step<C: Clock, D: Display>(&mut self, clock: &C, display: &mut D) -> Result<(), D::Error> {
        self.poll_switch(clock.millis());
        let started = clock.millis();
        self.render_frame(display)?;
        self.stats.record(clock.millis().saturating_sub(started));
        log::debug!("frame: {}", self.stats);
        Ok(())
    }
}
