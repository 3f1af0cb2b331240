//! Band buffer: the only pixel storage of the renderer.
//!
//! The screen is drawn a few scanlines at a time into a [`BandBuffer`] sized
//! for one band. [`Band`] is a borrowed view of that storage that also knows
//! where on the screen the band sits, so drawing code can work in screen
//! coordinates and ask the band to translate.

/// Owner of the band pixel storage, allocated once for the lifetime of the engine.
#[derive(Debug, Clone)]
pub struct BandBuffer {
    pixels: Vec<u16>,
    width: u32,
    band_height: u32,
}

impl BandBuffer {
    pub fn new(width: u32, band_height: u32) -> Self {
        Self {
            pixels: vec![0; (width * band_height) as usize],
            width,
            band_height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn band_height(&self) -> u32 {
        self.band_height
    }

    /// View for the band starting at screen row `y0`.
    ///
    /// `height` is capped to the buffer's band height; the last band of a
    /// screen whose height is not a multiple of the band height is shorter.
    pub fn band(&mut self, y0: u32, height: u32) -> Band<'_> {
        let height = height.min(self.band_height);
        let len = (self.width * height) as usize;
        Band::new(&mut self.pixels[..len], self.width, height, y0)
    }
}

/// A band of full-width scanlines at a fixed screen offset.
///
/// Pixel accessors take band-local coordinates and silently ignore
/// out-of-bounds writes, like a clipped framebuffer.
pub struct Band<'a> {
    pixels: &'a mut [u16],
    width: u32,
    height: u32,
    y0: u32,
}

impl<'a> Band<'a> {
    /// # Panics
    /// Panics in debug builds if the slice length doesn't match `width * height`.
    pub fn new(pixels: &'a mut [u16], width: u32, height: u32, y0: u32) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width * height) as usize,
            "Band buffer size doesn't match dimensions"
        );
        Self {
            pixels,
            width,
            height,
            y0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Screen row of the band's first line.
    pub fn y0(&self) -> u32 {
        self.y0
    }

    /// Screen row just past the band.
    pub fn y_end(&self) -> u32 {
        self.y0 + self.height
    }

    /// Does screen row `y` fall inside this band?
    #[inline]
    pub fn contains_row(&self, y: i32) -> bool {
        y >= self.y0 as i32 && y < self.y_end() as i32
    }

    pub fn pixels(&self) -> &[u16] {
        self.pixels
    }

    /// Band-local row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u16] {
        let start = (y * self.width) as usize;
        &mut self.pixels[start..start + self.width as usize]
    }

    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u16) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u16> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }

    /// Fill band-local row `y` from `x0` to `x1` inclusive, clipped to the band.
    #[inline]
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: u16) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        if x0 > x1 {
            return;
        }
        let row = self.row_mut(y as u32);
        row[x0 as usize..=x1 as usize].fill(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_band_is_short() {
        let mut buffer = BandBuffer::new(8, 16);
        let band = buffer.band(32, 4);
        assert_eq!(band.height(), 4);
        assert_eq!(band.pixels().len(), 32);
        assert_eq!(band.y_end(), 36);

        let band = buffer.band(0, 100);
        assert_eq!(band.height(), 16);
    }

    #[test]
    fn contains_screen_rows() {
        let mut buffer = BandBuffer::new(8, 16);
        let band = buffer.band(16, 16);
        assert!(!band.contains_row(15));
        assert!(band.contains_row(16));
        assert!(band.contains_row(31));
        assert!(!band.contains_row(32));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buffer = BandBuffer::new(4, 2);
        let mut band = buffer.band(0, 2);
        band.set_pixel(-1, 0, 7);
        band.set_pixel(4, 0, 7);
        band.set_pixel(0, 2, 7);
        assert!(band.pixels().iter().all(|&p| p == 0));

        band.set_pixel(3, 1, 7);
        assert_eq!(band.get_pixel(3, 1), Some(7));
        assert_eq!(band.get_pixel(4, 1), None);
    }

    #[test]
    fn spans_are_inclusive_and_clipped() {
        let mut buffer = BandBuffer::new(6, 2);
        let mut band = buffer.band(0, 2);
        band.fill_span(1, -3, 2, 9);
        assert_eq!(band.pixels(), &[0, 0, 0, 0, 0, 0, 9, 9, 9, 0, 0, 0]);

        band.fill(1);
        band.fill_span(0, 4, 10, 5);
        band.fill_span(5, 0, 5, 5);
        assert_eq!(band.pixels(), &[1, 1, 1, 1, 5, 5, 1, 1, 1, 1, 1, 1]);
    }
}
