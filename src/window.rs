//! SDL2 stand-in for the LCD.
//!
//! [`Window`] implements [`Display`]: each pushed band is expanded from
//! RGB565 to ARGB8888 and copied into the matching rows of a streaming
//! texture, which is scaled up when the frame is presented. A copy of the
//! frame is kept in a [`FrameCapture`] for screenshots.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::colors::to_argb8888;
use crate::display::{Display, FrameCapture};
use crate::engine::FrameStats;
use crate::scene::Clock;

/// Integer upscale of the window over the render resolution.
pub const DEFAULT_SCALE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    /// `S`: save the current frame.
    Screenshot,
    /// `Space`: toggle the starfield roll.
    ToggleSpin,
}

/// Millisecond clock backed by SDL's timer.
#[derive(Clone)]
pub struct SdlClock(sdl2::TimerSubsystem);

impl Clock for SdlClock {
    fn millis(&self) -> u64 {
        self.0.ticks64()
    }
}

pub struct Window {
    // Declared before its creator so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    _texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    title: String,
    width: u32,
    height: u32,
    /// ARGB8888 bytes of the band being uploaded.
    staging: Vec<u8>,
    capture: FrameCapture,
}

impl Window {
    /// Open a `width` x `height` render surface shown `scale` times larger.
    pub fn new(title: &str, width: u32, height: u32, scale: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width * scale, height * scale)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is declared first, so it is dropped before its creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        log::info!("window {width}x{height} at {scale}x");

        Ok(Self {
            texture,
            _texture_creator: texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            title: title.to_owned(),
            width,
            height,
            staging: Vec::with_capacity((width * height * 4) as usize),
            capture: FrameCapture::new(width, height),
        })
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(Keycode::S),
                    repeat: false,
                    ..
                } => return WindowEvent::Screenshot,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => return WindowEvent::ToggleSpin,
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Show everything pushed since the last call, scaled to the window.
    pub fn present(&mut self) -> Result<(), String> {
        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Put the frame statistics in the title bar.
    pub fn show_stats(&mut self, stats: &FrameStats) -> Result<(), String> {
        let title = format!("{} | {}", self.title, stats);
        self.canvas
            .window_mut()
            .set_title(&title)
            .map_err(|e| e.to_string())
    }

    /// The last complete frame.
    pub fn frame(&self) -> &FrameCapture {
        &self.capture
    }

    pub fn clock(&self) -> SdlClock {
        SdlClock(self.timer_subsystem.clone())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Display for Window {
    type Error = String;

    fn push_band(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        self.staging.clear();
        self.staging
            .extend(pixels.iter().flat_map(|&p| to_argb8888(p).to_ne_bytes()));
        self.texture
            .update(
                Rect::new(x as i32, y as i32, width, height),
                &self.staging,
                (width * 4) as usize,
            )
            .map_err(|e| e.to_string())?;
        self.capture
            .push_band(x, y, width, height, pixels)
            .unwrap_or_else(|never| match never {});
        Ok(())
    }
}
