//! Animation and showcase state.
//!
//! [`SceneState`] is everything that changes between frames: which roster
//! entry is on screen, the background mode, the object orientation and the
//! animation tick. [`Showcase`] advances it through [`ROSTER`] on a wall-clock
//! interval read from a [`Clock`].

use crate::error::LoadError;
use crate::light::Shading;
use crate::mesh;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::background::BackgroundMode;
use crate::transform::Rotation;
use crate::visibility::{CullSettings, Orientation};

/// Per-frame yaw increment in degrees.
pub const YAW_STEP: i32 = 2;
/// Per-frame pitch increment in degrees.
pub const PITCH_STEP: i32 = 4;
/// The animation tick wraps at this value.
pub const TICK_PERIOD: i32 = 360;

/// Monotonic millisecond time source.
pub trait Clock {
    fn millis(&self) -> u64;
}

impl<F: Fn() -> u64> Clock for F {
    fn millis(&self) -> u64 {
        self()
    }
}

/// The solids available to the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solid {
    Cube,
    Cross,
    Prism,
    Cubes,
    Cone,
    Sphere,
    Torus,
    Knot,
}

impl Solid {
    pub const ALL: [Solid; 8] = [
        Solid::Cube,
        Solid::Cross,
        Solid::Prism,
        Solid::Cubes,
        Solid::Cone,
        Solid::Sphere,
        Solid::Torus,
        Solid::Knot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Solid::Cube => "cube",
            Solid::Cross => "cross",
            Solid::Prism => "prism",
            Solid::Cubes => "cubes",
            Solid::Cone => "cone",
            Solid::Sphere => "sphere",
            Solid::Torus => "torus",
            Solid::Knot => "knot",
        }
    }

    /// Build the model record for this solid from the embedded data.
    pub fn build(self) -> Result<Model, LoadError> {
        let name = self.name();
        match self {
            Solid::Cube => Model::from_static_quads(
                name,
                &mesh::CUBE_VERTICES,
                &mesh::CUBE_QUADS,
                Some(&mesh::CUBE_COLORS),
            ),
            Solid::Cross => Model::from_static_quads(
                name,
                &mesh::CROSS_VERTICES,
                &mesh::CROSS_QUADS,
                Some(&mesh::CROSS_COLORS),
            ),
            Solid::Prism => Model::from_static_quads(
                name,
                &mesh::PRISM_VERTICES,
                &mesh::PRISM_QUADS,
                Some(&mesh::PRISM_COLORS),
            ),
            Solid::Cubes => Model::from_static_quads(
                name,
                &mesh::CUBES_VERTICES,
                &mesh::CUBES_QUADS,
                Some(&mesh::CUBES_COLORS),
            ),
            Solid::Cone => Ok(mesh::load_obj_str(name, mesh::CONE_OBJ)?
                .with_cycled_colors(&mesh::CONE_PALETTE)),
            Solid::Sphere => mesh::load_obj_str(name, mesh::SPHERE_OBJ),
            Solid::Torus => Ok(mesh::load_obj_str(name, mesh::TORUS_OBJ)?
                .with_cycled_colors(&mesh::TORUS_PALETTE)),
            Solid::Knot => mesh::load_obj_str(name, mesh::KNOT_OBJ),
        }
    }
}

/// Every solid, built once and never mutated.
#[derive(Debug, Clone)]
pub struct ModelSet {
    /// In [`Solid::ALL`] order.
    models: Vec<Model>,
}

impl ModelSet {
    pub fn load() -> Result<Self, LoadError> {
        let models = Solid::ALL
            .iter()
            .map(|solid| solid.build())
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("built {} models", models.len());
        Ok(Self { models })
    }

    pub fn get(&self, solid: Solid) -> &Model {
        &self.models[solid as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> + '_ {
        self.models.iter()
    }
}

/// One showcase slot: a solid plus the flags it is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowcaseEntry {
    pub solid: Solid,
    pub shading: Shading,
    pub cull: CullSettings,
}

impl ShowcaseEntry {
    const fn new(solid: Solid, shading: Shading, backface_cull: bool, orientation: Orientation) -> Self {
        Self {
            solid,
            shading,
            cull: CullSettings {
                backface_cull,
                orientation,
            },
        }
    }
}

const CW: Orientation = Orientation::Clockwise;
const CCW: Orientation = Orientation::CounterClockwise;

/// Showcase order. Colored and fake-lit variants alternate.
pub static ROSTER: [ShowcaseEntry; 13] = [
    ShowcaseEntry::new(Solid::Cube, Shading::Palette, true, CW),
    ShowcaseEntry::new(Solid::Cube, Shading::fake_light(44_000), true, CW),
    ShowcaseEntry::new(Solid::Cross, Shading::Palette, true, CW),
    ShowcaseEntry::new(Solid::Cross, Shading::fake_light(14_000), true, CW),
    ShowcaseEntry::new(Solid::Prism, Shading::Palette, true, CW),
    ShowcaseEntry::new(Solid::Prism, Shading::fake_light(20_000), true, CW),
    // The cluster's inner faces touch; without culling painter's order shows them.
    ShowcaseEntry::new(Solid::Cubes, Shading::Palette, false, CW),
    ShowcaseEntry::new(Solid::Cubes, Shading::fake_light(14_000), true, CW),
    ShowcaseEntry::new(Solid::Cone, Shading::Palette, true, CCW),
    ShowcaseEntry::new(Solid::Sphere, Shading::fake_light(58_000), true, CCW),
    ShowcaseEntry::new(Solid::Torus, Shading::Palette, true, CCW),
    ShowcaseEntry::new(Solid::Torus, Shading::fake_light(20_000), true, CCW),
    ShowcaseEntry::new(Solid::Knot, Shading::fake_light(20_000), true, CCW),
];

/// Mutable animation and selection state, threaded through every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneState {
    entry: usize,
    pub background: BackgroundMode,
    pub rotation: Rotation,
    /// Animation tick in `0..TICK_PERIOD`, drives the dolly and the scroll.
    pub tick: i32,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            entry: 0,
            background: BackgroundMode::default(),
            rotation: Rotation::default(),
            tick: 0,
        }
    }

    /// Start at roster slot `entry` (wrapped) with the given background.
    pub fn at(entry: usize, background: BackgroundMode) -> Self {
        Self {
            entry: entry % ROSTER.len(),
            background,
            ..Self::new()
        }
    }

    pub fn entry_index(&self) -> usize {
        self.entry
    }

    pub fn entry(&self) -> &'static ShowcaseEntry {
        &ROSTER[self.entry]
    }

    pub fn cull(&self) -> CullSettings {
        self.entry().cull
    }

    pub fn shading(&self) -> Shading {
        self.entry().shading
    }

    pub fn dolly(&self) -> i32 {
        Projection::dolly(self.tick)
    }

    /// Step the animation by one frame.
    pub fn advance_frame(&mut self) {
        self.tick = (self.tick + 1) % TICK_PERIOD;
        self.rotation.rotate(YAW_STEP, PITCH_STEP);
    }

    /// Move to the next roster entry and background mode. Orientation and
    /// tick carry over.
    pub fn next_entry(&mut self) {
        self.entry = (self.entry + 1) % ROSTER.len();
        self.background = self.background.next();
    }
}

/// Wall-clock switching between roster entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showcase {
    interval_ms: u64,
    last_switch_ms: u64,
}

impl Showcase {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_switch_ms: now_ms,
        }
    }

    /// Switch `scene` to its next entry once the interval has elapsed.
    ///
    /// Non-blocking. Returns whether a switch happened.
    pub fn poll(&mut self, now_ms: u64, scene: &mut SceneState) -> bool {
        if now_ms.saturating_sub(self.last_switch_ms) < self.interval_ms {
            return false;
        }
        self.last_switch_ms = now_ms;
        scene.next_entry();
        true
    }
}
