//! Display collaborator.
//!
//! The renderer never owns a full frame. It hands each finished band to a
//! [`Display`], which blits it to the physical screen (or a window, or
//! memory). [`FrameCapture`] is the in-memory implementation used for tests
//! and screenshots.

use std::convert::Infallible;
use std::path::Path;

use crate::colors::to_rgb888;

/// Sink for finished bands of RGB565 pixels.
pub trait Display {
    type Error;

    /// Blit a `width` x `height` block of packed pixels with its top-left
    /// corner at `(x, y)`. `pixels` is row-major with no padding.
    fn push_band(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u16],
    ) -> Result<(), Self::Error>;
}

impl<D: Display + ?Sized> Display for &mut D {
    type Error = D::Error;

    fn push_band(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        (**self).push_band(x, y, width, height, pixels)
    }
}

/// Full-screen RGB565 frame assembled from pushed bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCapture {
    pixels: Vec<u16>,
    width: u32,
    height: u32,
    bands_pushed: usize,
}

impl FrameCapture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height) as usize],
            width,
            height,
            bands_pushed: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u16> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    /// Bands received since creation.
    pub fn bands_pushed(&self) -> usize {
        self.bands_pushed
    }

    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b) = to_rgb888(self.pixels[(y * self.width + x) as usize]);
            image::Rgb([r, g, b])
        })
    }

    /// Write the captured frame as an image; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_rgb_image().save(path)
    }
}

impl Display for FrameCapture {
    type Error = Infallible;

    fn push_band(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        self.bands_pushed += 1;
        if x >= self.width {
            return Ok(());
        }
        for row in 0..height {
            let sy = y + row;
            if sy >= self.height {
                break;
            }
            let cols = width.min(self.width.saturating_sub(x)) as usize;
            let src = (row * width) as usize;
            let dst = (sy * self.width + x) as usize;
            self.pixels[dst..dst + cols].copy_from_slice(&pixels[src..src + cols]);
        }
        Ok(())
    }
}
