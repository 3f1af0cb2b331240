//! RGB565 color helpers and the palette used by the built-in models.
//!
//! Pixels are packed 16-bit RGB565 as the LCD controller expects them:
//! 5 bits red, 6 bits green, 5 bits blue, red in the high bits.

/// Pack 8-bit channels into RGB565.
#[inline]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
}

/// Expand RGB565 back to 8-bit channels, replicating the high bits into the low ones.
#[inline]
pub const fn to_rgb888(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 11) & 0x1F) as u8;
    let g = ((color >> 5) & 0x3F) as u8;
    let b = (color & 0x1F) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

/// Expand RGB565 to opaque ARGB8888 for desktop presentation.
#[inline]
pub const fn to_argb8888(color: u16) -> u32 {
    let (r, g, b) = to_rgb888(color);
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;

// Three shades per hue: light, dark, mid.
pub const CYAN: [u16; 3] = [rgb565(0, 250, 250), rgb565(0, 180, 180), rgb565(0, 210, 210)];
pub const MAGENTA: [u16; 3] = [rgb565(250, 0, 250), rgb565(180, 0, 180), rgb565(210, 0, 210)];
pub const YELLOW: [u16; 3] = [rgb565(250, 250, 0), rgb565(180, 180, 0), rgb565(210, 210, 0)];
pub const ORANGE: [u16; 3] = [rgb565(250, 150, 0), rgb565(180, 100, 0), rgb565(210, 140, 0)];
pub const GREEN: [u16; 3] = [rgb565(0, 250, 0), rgb565(0, 180, 0), rgb565(0, 210, 0)];
pub const GREY: [u16; 3] = [rgb565(250, 250, 250), rgb565(180, 180, 180), rgb565(210, 210, 210)];

pub const DARK_RED: u16 = rgb565(150, 0, 0);
pub const DARK_GREEN: u16 = rgb565(0, 150, 0);
pub const DARK_BLUE: u16 = rgb565(0, 0, 150);
pub const DARK_CYAN: u16 = rgb565(0, 150, 150);
pub const DARK_YELLOW: u16 = rgb565(150, 150, 0);
pub const DARK_MAGENTA: u16 = rgb565(150, 0, 150);

/// Checkerboard tiles.
pub const CHECKER_DARK: u16 = rgb565(40, 40, 20);
pub const CHECKER_LIGHT: u16 = rgb565(80, 80, 40);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_primaries() {
        assert_eq!(rgb565(255, 0, 0), 0xF800);
        assert_eq!(rgb565(0, 255, 0), 0x07E0);
        assert_eq!(rgb565(0, 0, 255), 0x001F);
        assert_eq!(rgb565(255, 255, 255), WHITE);
    }

    #[test]
    fn expands_to_full_range() {
        assert_eq!(to_rgb888(WHITE), (255, 255, 255));
        assert_eq!(to_rgb888(BLACK), (0, 0, 0));
        assert_eq!(to_argb8888(0xF800), 0xFFFF_0000);
    }

    #[test]
    fn expansion_keeps_high_bits() {
        let (r, g, b) = to_rgb888(rgb565(200, 100, 50));
        assert_eq!(r & 0xF8, 200 & 0xF8);
        assert_eq!(g & 0xFC, 100 & 0xFC);
        assert_eq!(b & 0xF8, 50 & 0xF8);
    }
}
