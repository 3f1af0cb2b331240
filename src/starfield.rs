//! Particle starfield simulation.
//!
//! Stars fly towards the camera at a constant speed and are projected with a
//! plain `100 * x / z` divide around the screen center. A star that leaves
//! the screen or the `[STAR_NEAR_Z, STAR_FAR_Z]` depth range is respawned at a
//! random position outside a dead zone around the view axis.
//!
//! Drawing lives in [`crate::render::background`]; this module only moves
//! stars.

use crate::colors::rgb565;
use crate::math::vec2::Point2;
use crate::math::vec3::Vec3i;

/// Spawn range of the X and Y coordinates.
pub const STAR_SPREAD: i32 = 500;
/// Coordinates closer than this to the view axis are pushed out to it.
pub const STAR_DEAD_ZONE: i32 = 80;
/// Closest depth a star may reach before it respawns.
pub const STAR_NEAR_Z: i32 = 20;
/// Furthest spawn depth; stars beyond it respawn.
pub const STAR_FAR_Z: i32 = 2000;
/// Nearest spawn depth.
pub const STAR_SPAWN_NEAR_Z: i32 = 100;

/// Projection scale of the starfield divide.
const STAR_FOCAL: i32 = 100;
/// Fixed-point cosine and sine of the per-tick spin (about 0.45 degrees).
const SPIN_COS: i32 = 254;
const SPIN_SIN: i32 = 2;

const MIN_BRIGHTNESS: i32 = 40;
const MAX_BRIGHTNESS: i32 = 255;

/// Bounded integer randomness used to place respawned stars.
pub trait RandomSource {
    /// Uniform value in `min..=max`.
    fn random_range(&mut self, min: i32, max: i32) -> i32;
}

impl<R: rand::Rng> RandomSource for R {
    fn random_range(&mut self, min: i32, max: i32) -> i32 {
        rand::Rng::random_range(self, min..=max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub pos: Vec3i,
    /// Projection after the last update.
    pub screen: Point2,
    /// Projection before the last update.
    pub prev_screen: Point2,
}

impl Star {
    pub fn new(pos: Vec3i) -> Self {
        Self {
            pos,
            screen: Point2::ZERO,
            prev_screen: Point2::ZERO,
        }
    }

    /// Fresh star at a random position outside the dead zone.
    pub fn spawn<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let x = rng.random_range(-STAR_SPREAD, STAR_SPREAD);
        let y = rng.random_range(-STAR_SPREAD, STAR_SPREAD);
        let z = rng.random_range(STAR_SPAWN_NEAR_Z, STAR_FAR_Z);
        Self::new(Vec3i::new(push_out_of_dead_zone(x), push_out_of_dead_zone(y), z))
    }

    /// Grey level in `40..=255`, brighter when closer.
    pub fn brightness(&self) -> u8 {
        (MAX_BRIGHTNESS - self.pos.z / 5).clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS) as u8
    }

    pub fn color(&self) -> u16 {
        let c = self.brightness();
        rgb565(c, c, c)
    }
}

fn push_out_of_dead_zone(v: i32) -> i32 {
    if v.abs() < STAR_DEAD_ZONE {
        if v < 0 {
            -STAR_DEAD_ZONE
        } else {
            STAR_DEAD_ZONE
        }
    } else {
        v
    }
}

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
    speed: i32,
    spin: bool,
    width: i32,
    height: i32,
}

impl Starfield {
    /// Spawn `count` stars and run one update so every star has a projection.
    pub fn new<R: RandomSource + ?Sized>(
        count: usize,
        speed: i32,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Self {
        let stars = (0..count).map(|_| Star::spawn(rng)).collect();
        let mut field = Self::from_stars(stars, speed, width, height);
        field.update(rng);
        for star in &mut field.stars {
            star.prev_screen = star.screen;
        }
        field
    }

    /// Starfield with caller-placed stars; nothing is projected until [`Self::update`].
    pub fn from_stars(stars: Vec<Star>, speed: i32, width: u32, height: u32) -> Self {
        Self {
            stars,
            speed,
            spin: true,
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn spin(&self) -> bool {
        self.spin
    }

    /// Enable the slow roll about the view axis.
    pub fn set_spin(&mut self, spin: bool) {
        self.spin = spin;
    }

    fn project(&self, pos: Vec3i) -> Point2 {
        Point2::new(
            self.width / 2 + STAR_FOCAL * pos.x / pos.z,
            self.height / 2 + STAR_FOCAL * pos.y / pos.z,
        )
    }

    fn on_screen(&self, p: Point2) -> bool {
        (0..self.width).contains(&p.x) && (0..self.height).contains(&p.y)
    }

    /// Advance every star by one tick.
    ///
    /// Returns the number of stars that respawned.
    pub fn update<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        let mut respawned = 0;
        for i in 0..self.stars.len() {
            let mut star = self.stars[i];
            if self.spin {
                star.pos = star.pos.rotate_z(SPIN_COS, SPIN_SIN);
            }
            star.pos.z -= self.speed;
            star.prev_screen = star.screen;

            let in_depth = (STAR_NEAR_Z..=STAR_FAR_Z).contains(&star.pos.z);
            if in_depth {
                star.screen = self.project(star.pos);
            }
            if !in_depth || !self.on_screen(star.screen) {
                // The replacement may itself project off screen; it is
                // caught again on the next tick.
                star = Star::spawn(rng);
                star.screen = self.project(star.pos);
                star.prev_screen = star.screen;
                respawned += 1;
            }
            self.stars[i] = star;
        }
        log::trace!("starfield: {respawned} of {} stars respawned", self.stars.len());
        respawned
    }
}
