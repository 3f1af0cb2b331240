//! Background layer drawn into each band before the geometry.
//!
//! Tiled patterns and the checkerboard scroll along a Lissajous path driven
//! by the animation tick. Offsets are taken in screen coordinates so every
//! band decomposition composes into the same image.

use crate::colors::{rgb565, BLACK, CHECKER_DARK, CHECKER_LIGHT};
use crate::error::LoadError;
use crate::math::trig::fast_sin;
use crate::render::band::Band;
use crate::starfield::Starfield;

/// Side length of a tiled pattern.
pub const PATTERN_SIZE: u32 = 32;
const PATTERN_MASK: i32 = PATTERN_SIZE as i32 - 1;

/// Checker period in pixels; half of it is one tile.
const CHECKER_PERIOD: i32 = 64;
const CHECKER_TILE: i32 = CHECKER_PERIOD / 2;

const BRICKS_PNG: &[u8] = include_bytes!("../../assets/patterns/bricks.png");
const WEAVE_PNG: &[u8] = include_bytes!("../../assets/patterns/weave.png");
const TILES_PNG: &[u8] = include_bytes!("../../assets/patterns/tiles.png");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    #[default]
    Bricks,
    Weave,
    Tiles,
    Starfield,
    Checker,
}

impl BackgroundMode {
    pub const ALL: [BackgroundMode; 5] = [
        BackgroundMode::Bricks,
        BackgroundMode::Weave,
        BackgroundMode::Tiles,
        BackgroundMode::Starfield,
        BackgroundMode::Checker,
    ];

    /// The mode that follows this one, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            BackgroundMode::Bricks => "bricks",
            BackgroundMode::Weave => "weave",
            BackgroundMode::Tiles => "tiles",
            BackgroundMode::Starfield => "starfield",
            BackgroundMode::Checker => "checker",
        }
    }
}

impl std::fmt::Display for BackgroundMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 32x32 RGB565 tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    texels: Vec<u16>,
}

impl Pattern {
    /// Decode an embedded image and convert it to RGB565.
    pub fn from_image_bytes(name: &'static str, bytes: &[u8]) -> Result<Self, LoadError> {
        let img = image::load_from_memory(bytes)
            .map_err(|source| LoadError::Image { name, source })?
            .to_rgb8();
        let (width, height) = img.dimensions();
        if width != PATTERN_SIZE || height != PATTERN_SIZE {
            return Err(LoadError::PatternSize {
                name,
                width,
                height,
            });
        }
        let texels = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                rgb565(r, g, b)
            })
            .collect();
        Ok(Self { texels })
    }

    /// Texel at `(x, y)`, wrapping in both directions.
    #[inline]
    pub fn texel(&self, x: i32, y: i32) -> u16 {
        self.texels[((y & PATTERN_MASK) * PATTERN_SIZE as i32 + (x & PATTERN_MASK)) as usize]
    }
}

/// Scroll offset of the patterns and the checkerboard at `tick`.
///
/// Divides by 256 rather than the sine scale so the offset never jumps when
/// the sine peaks.
pub fn scroll_offset(tick: i32) -> (i32, i32) {
    (25 * fast_sin(4 * tick) / 256 + 50, 25 * fast_sin(5 * tick) / 256 + 50)
}

pub fn draw_pattern(pattern: &Pattern, tick: i32, band: &mut Band) {
    let (xo, yo) = scroll_offset(tick);
    let yo = yo + band.y0() as i32;
    for y in 0..band.height() {
        let row = band.row_mut(y);
        for (x, px) in row.iter_mut().enumerate() {
            *px = pattern.texel(x as i32 + xo, y as i32 + yo);
        }
    }
}

pub fn draw_checker(tick: i32, band: &mut Band) {
    let (xo, yo) = scroll_offset(tick);
    let yo = yo + band.y0() as i32;
    for y in 0..band.height() {
        let top = (y as i32 + yo).rem_euclid(CHECKER_PERIOD) < CHECKER_TILE;
        let row = band.row_mut(y);
        for (x, px) in row.iter_mut().enumerate() {
            let left = (x as i32 + xo).rem_euclid(CHECKER_PERIOD) < CHECKER_TILE;
            *px = if left == top { CHECKER_DARK } else { CHECKER_LIGHT };
        }
    }
}

/// Clear the band to black and plot every star that lands in it.
pub fn draw_stars(starfield: &Starfield, band: &mut Band) {
    band.fill(BLACK);
    let y0 = band.y0() as i32;
    for star in starfield.stars() {
        band.set_pixel(star.screen.x, star.screen.y - y0, star.color());
    }
}

/// The three tiled patterns, decoded once at startup.
#[derive(Debug, Clone)]
pub struct Backgrounds {
    bricks: Pattern,
    weave: Pattern,
    tiles: Pattern,
}

impl Backgrounds {
    pub fn load() -> Result<Self, LoadError> {
        let backgrounds = Self {
            bricks: Pattern::from_image_bytes("bricks", BRICKS_PNG)?,
            weave: Pattern::from_image_bytes("weave", WEAVE_PNG)?,
            tiles: Pattern::from_image_bytes("tiles", TILES_PNG)?,
        };
        log::debug!("decoded 3 background patterns");
        Ok(backgrounds)
    }

    pub fn pattern(&self, mode: BackgroundMode) -> Option<&Pattern> {
        match mode {
            BackgroundMode::Bricks => Some(&self.bricks),
            BackgroundMode::Weave => Some(&self.weave),
            BackgroundMode::Tiles => Some(&self.tiles),
            BackgroundMode::Starfield | BackgroundMode::Checker => None,
        }
    }

    /// Fill `band` with the background for `mode`.
    pub fn draw(&self, mode: BackgroundMode, tick: i32, starfield: &Starfield, band: &mut Band) {
        match mode {
            BackgroundMode::Starfield => draw_stars(starfield, band),
            BackgroundMode::Checker => draw_checker(tick, band),
            BackgroundMode::Bricks | BackgroundMode::Weave | BackgroundMode::Tiles => {
                if let Some(pattern) = self.pattern(mode) {
                    draw_pattern(pattern, tick, band);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3i;
    use crate::render::band::BandBuffer;
    use crate::starfield::Star;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const W: u32 = 48;

    fn render(backgrounds: &Backgrounds, mode: BackgroundMode, tick: i32, stars: &Starfield, band_height: u32) -> Vec<u16> {
        let height = 64;
        let mut buffer = BandBuffer::new(W, band_height);
        let mut out = Vec::new();
        for y0 in (0..height).step_by(band_height as usize) {
            let mut band = buffer.band(y0, band_height.min(height - y0));
            backgrounds.draw(mode, tick, stars, &mut band);
            out.extend_from_slice(band.pixels());
        }
        out
    }

    #[test]
    fn modes_cycle() {
        let mut mode = BackgroundMode::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, BackgroundMode::ALL);
        assert_eq!(mode, BackgroundMode::Bricks);
    }

    #[test]
    fn embedded_patterns_decode() {
        let backgrounds = Backgrounds::load().unwrap();
        for mode in [BackgroundMode::Bricks, BackgroundMode::Weave, BackgroundMode::Tiles] {
            let pattern = backgrounds.pattern(mode).unwrap();
            assert_eq!(pattern.texels.len(), (PATTERN_SIZE * PATTERN_SIZE) as usize);
        }
        assert!(backgrounds.pattern(BackgroundMode::Checker).is_none());
    }

    #[test]
    fn wrong_size_pattern_is_rejected() {
        let mut png = Vec::new();
        image::RgbImage::new(16, 32)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let err = Pattern::from_image_bytes("small", &png).unwrap_err();
        assert!(matches!(err, LoadError::PatternSize { width: 16, height: 32, .. }));
    }

    #[test]
    fn garbage_pattern_is_an_image_error() {
        let err = Pattern::from_image_bytes("junk", b"not an image").unwrap_err();
        assert!(matches!(err, LoadError::Image { name: "junk", .. }));
    }

    #[test]
    fn texels_wrap() {
        let pattern = Pattern {
            texels: (0..1024).map(|i| i as u16).collect(),
        };
        assert_eq!(pattern.texel(0, 0), 0);
        assert_eq!(pattern.texel(33, 1), 33);
        assert_eq!(pattern.texel(-1, 0), 31);
        assert_eq!(pattern.texel(2, 64 + 3), 3 * 32 + 2);
    }

    #[test]
    fn scroll_stays_positive() {
        for tick in 0..360 {
            let (x, y) = scroll_offset(tick);
            assert!((26..=74).contains(&x) && (26..=74).contains(&y), "tick {tick}");
        }
        assert_eq!(scroll_offset(0), (50, 50));
    }

    #[test]
    fn checker_tiles_alternate() {
        let mut buffer = BandBuffer::new(128, 64);
        let mut band = buffer.band(0, 64);
        // Offset (50, 50) at tick 0: screen (14, 14) lands on checker cell (0, 0).
        draw_checker(0, &mut band);
        assert_eq!(band.get_pixel(14, 14), Some(CHECKER_DARK));
        assert_eq!(band.get_pixel(13, 14), Some(CHECKER_LIGHT));
        assert_eq!(band.get_pixel(14, 13), Some(CHECKER_LIGHT));
        assert_eq!(band.get_pixel(13, 13), Some(CHECKER_DARK));
        assert_eq!(band.get_pixel(45, 45), Some(CHECKER_DARK));
        assert_eq!(band.get_pixel(46, 45), Some(CHECKER_LIGHT));
    }

    #[test]
    fn stars_are_plotted_on_every_band_row() {
        let mut stars = Starfield::from_stars(
            vec![Star::new(Vec3i::new(200, 200, 1000))],
            20,
            W,
            64,
        );
        stars.set_spin(false);
        stars.update(&mut StdRng::seed_from_u64(3));
        let star = stars.stars()[0];
        // Lands on the first row of the second band.
        assert_eq!(star.screen.y, 32 + 20);

        let mut buffer = BandBuffer::new(W, 20);
        let mut band = buffer.band(52, 12);
        draw_stars(&stars, &mut band);
        assert_eq!(band.get_pixel(star.screen.x, 0), Some(star.color()));
        assert_eq!(band.pixels().iter().filter(|&&p| p != BLACK).count(), 1);
    }

    #[test]
    fn band_height_does_not_change_the_image() {
        let backgrounds = Backgrounds::load().unwrap();
        let mut stars = Starfield::new(60, 20, W, 64, &mut StdRng::seed_from_u64(11));
        stars.set_spin(true);
        for mode in BackgroundMode::ALL {
            for tick in [0, 17, 200] {
                let whole = render(&backgrounds, mode, tick, &stars, 64);
                for band_height in [1, 7, 16] {
                    assert_eq!(render(&backgrounds, mode, tick, &stars, band_height), whole, "{mode} tick {tick}");
                }
            }
        }
    }
}
