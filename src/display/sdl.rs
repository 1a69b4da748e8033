//! SDL2 host surface
//!
//! Presents each frame through a streaming texture stretched over the
//! window. Only built with the `sdl` feature.

use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window as SdlWindow, WindowContext};
use sdl2::EventPump;

use super::{Surface, BYTES_PER_PIXEL};
use crate::error::{Error, Result};

// Serialized buffers are R,G,B,A in memory; SDL names packed formats by the
// u32 layout, which flips with endianness.
#[cfg(target_endian = "little")]
const FRAME_FORMAT: PixelFormatEnum = PixelFormatEnum::ABGR8888;
#[cfg(target_endian = "big")]
const FRAME_FORMAT: PixelFormatEnum = PixelFormatEnum::RGBA8888;

pub struct SdlSurface {
    canvas: Canvas<SdlWindow>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

fn surface_error(err: impl ToString) -> Error {
    Error::Surface(err.to_string())
}

impl SdlSurface {
    /// Open a centered window; `vsync` locks presentation to the monitor refresh
    pub fn new(title: &str, width: u32, height: u32, vsync: bool) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(surface_error)?;
        let video_subsystem = sdl_context.video().map_err(surface_error)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(surface_error)?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(surface_error)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(surface_error)?;
        info!("SDL window {}x{} (vsync: {})", width, height, vsync);

        Ok(Self {
            canvas,
            texture_creator,
            event_pump,
            width,
            height,
        })
    }
}

impl Surface for SdlSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.canvas
            .window_mut()
            .set_size(width, height)
            .map_err(surface_error)?;
        self.width = width;
        self.height = height;
        debug!("SDL window resized to {}x{}", width, height);
        Ok(())
    }

    fn present(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<()> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(FRAME_FORMAT, width, height)
            .map_err(surface_error)?;
        texture
            .update(None, bytes, width as usize * BYTES_PER_PIXEL)
            .map_err(surface_error)?;

        self.canvas.copy(&texture, None, None).map_err(surface_error)?;
        self.canvas.present();
        Ok(())
    }

    fn poll_close_requested(&mut self) -> bool {
        let mut close = false;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => close = true,
                _ => {},
            }
        }
        close
    }
}
