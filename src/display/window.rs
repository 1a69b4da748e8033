use log::debug;
use serde::{Deserialize, Serialize};

use super::{DrawableObject, PixelBuffer, Surface};
use crate::color::Color;
use crate::error::{Error, Result};

/// Lifecycle of a window, driven by whoever owns the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Open,
    Closed,
}

/// Requested window size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowOptions {
    pub size_x: i32,
    pub size_y: i32,
}

impl WindowOptions {
    pub fn new(size_x: i32, size_y: i32) -> Self {
        Self { size_x, size_y }
    }
}

/// A pixel buffer bound to a host [`Surface`].
///
/// The window borrows the surface for its whole life; `render` flushes the
/// buffer into it. Typical frame loop:
///
/// ```
/// use easel::{Color, DrawableObject, MemorySurface, Window, WindowOptions};
///
/// let mut surface = MemorySurface::new(0, 0).close_after(3);
/// let mut window = Window::new(&mut surface, WindowOptions::new(10, 10))?;
/// while window.is_open() {
///     window.clear(Color::BLACK);
///     window.draw().pixel(0, 0, Color::RED)?.stop_drawing()?;
///     window.render()?;
///     window.pump();
/// }
/// # Ok::<(), easel::Error>(())
/// ```
pub struct Window<'s> {
    surface: &'s mut dyn Surface,
    buffer: PixelBuffer,
    state: WindowState,
}

impl<'s> Window<'s> {
    /// Size the surface to `options` and bind a fresh buffer to it
    pub fn new(surface: &'s mut dyn Surface, options: WindowOptions) -> Result<Self> {
        let buffer = PixelBuffer::new(options.size_x, options.size_y)?;
        surface.resize(buffer.width(), buffer.height())?;
        debug!(
            "Opened {}x{} window on a new surface",
            buffer.width(),
            buffer.height()
        );
        Ok(Self {
            surface,
            buffer,
            state: WindowState::Open,
        })
    }

    /// Bind to an existing surface, adopting its current size
    pub fn from_surface(surface: &'s mut dyn Surface) -> Result<Self> {
        let (width, height) = surface.size();
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        let buffer = PixelBuffer::new(width as i32, height as i32)?;
        debug!("Opened {}x{} window on an existing surface", width, height);
        Ok(Self {
            surface,
            buffer,
            state: WindowState::Open,
        })
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == WindowState::Open
    }

    #[inline]
    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn close(&mut self) {
        if self.state == WindowState::Open {
            debug!("Window closed");
        }
        self.state = WindowState::Closed;
    }

    /// Close the window if the host surface asked for it
    pub fn pump(&mut self) -> WindowState {
        if self.surface.poll_close_requested() {
            self.close();
        }
        self.state
    }

    pub fn clear(&mut self, color: Color) -> &mut Self {
        self.buffer.clear(color);
        self
    }

    /// Flush the buffer to the bound surface
    pub fn render(&mut self) -> Result<&mut Self> {
        let data = self.buffer.serialize();
        self.surface.present(&data.bytes, data.width, data.height)?;
        Ok(self)
    }
}

impl DrawableObject for Window<'_> {
    fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}
