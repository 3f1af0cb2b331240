//! Build-time configuration of the renderer.
//!
//! The constants describe the reference target (a 128x160 RGB565 LCD with
//! room for a 16-line band). [`RenderConfig`] carries the same values at
//! runtime so a scene can be rendered with a different band height.

use crate::error::ConfigError;

pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 160;

/// Scanlines per band. 16 for ST7789-class targets, 32 fits an ST7735 build.
pub const BAND_HEIGHT: u32 = 16;

pub const NUM_STARS: usize = 150;
pub const STAR_SPEED: i32 = 20;

/// Capacity of the transformed/projected vertex buffers.
pub const MAX_VERTS: usize = 140;
/// Capacity of the visible-polygon list.
pub const MAX_POLYS: usize = 240;

/// Wall-clock time each showcase entry stays on screen.
pub const SWITCH_INTERVAL_MS: u64 = 3000;

pub const DEFAULT_SEED: u64 = 0x6766_7833_64;

/// Largest absolute vertex coordinate a model may use (the `i16` range).
pub const MAX_COORD: i32 = i16::MAX as i32;

/// Largest screen dimension the i16-range fixed-point math is sized for.
const MAX_DIMENSION: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub band_height: u32,
    pub star_count: usize,
    pub star_speed: i32,
    pub switch_interval_ms: u64,
    /// Seed for star respawn positions.
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            band_height: BAND_HEIGHT,
            star_count: NUM_STARS,
            star_speed: STAR_SPEED,
            switch_interval_ms: SWITCH_INTERVAL_MS,
            seed: DEFAULT_SEED,
        }
    }
}

impl RenderConfig {
    pub fn with_band_height(mut self, band_height: u32) -> Self {
        self.band_height = band_height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of bands needed to cover the screen; the last one may be short.
    pub fn band_count(&self) -> u32 {
        self.height.div_ceil(self.band_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyScreen);
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::ScreenTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.band_height == 0 || self.band_height > self.height {
            return Err(ConfigError::BandHeight {
                band_height: self.band_height,
                height: self.height,
            });
        }
        if self.star_count == 0 {
            return Err(ConfigError::NoStars);
        }
        if self.star_speed <= 0 {
            return Err(ConfigError::StarSpeed(self.star_speed));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(RenderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn band_count_rounds_up() {
        let config = RenderConfig::default();
        assert_eq!(config.band_count(), 10);
        assert_eq!(config.with_band_height(32).band_count(), 5);
        assert_eq!(config.with_band_height(48).band_count(), 4);
        assert_eq!(config.with_band_height(160).band_count(), 1);
    }

    #[test]
    fn rejects_bad_band_height() {
        let config = RenderConfig::default();
        assert!(matches!(
            config.with_band_height(0).validate(),
            Err(ConfigError::BandHeight { .. })
        ));
        assert!(matches!(
            config.with_band_height(161).validate(),
            Err(ConfigError::BandHeight { .. })
        ));
    }

    #[test]
    fn rejects_empty_screen() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyScreen));
    }

    #[test]
    fn rejects_oversized_screen() {
        let config = RenderConfig {
            width: MAX_DIMENSION + 1,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ScreenTooLarge {
                width: MAX_DIMENSION + 1,
                height: SCREEN_HEIGHT,
            })
        );

        let config = RenderConfig {
            width: MAX_DIMENSION,
            height: MAX_DIMENSION,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_starfield() {
        let config = RenderConfig {
            star_count: 0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoStars));
    }

    #[test]
    fn rejects_non_positive_star_speed() {
        for star_speed in [0, -5] {
            let config = RenderConfig {
                star_speed,
                ..RenderConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::StarSpeed(star_speed)));
        }
    }
}
