mod pixel_buffer;
mod record;
#[cfg(feature = "sdl")]
mod sdl;
mod texture;
mod window;

pub use pixel_buffer::{PixelBuffer, SerializedBuffer, BYTES_PER_PIXEL};
pub use record::{PixelEntry, TextureRecord};
#[cfg(feature = "sdl")]
pub use sdl::SdlSurface;
pub use texture::Texture;
pub use window::{Window, WindowOptions, WindowState};

use crate::color::Color;
use crate::draw::DrawingContext;
use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

// ============================================================================
// Host surface
// ============================================================================

/// The host-side image a [`Window`] flushes its pixels into.
///
/// `present` receives the serialized RGBA bytes of the whole buffer.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    fn present(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<()>;

    /// Whether the host asked for the window to close since the last poll
    fn poll_close_requested(&mut self) -> bool {
        false
    }
}

/// Headless surface that keeps the last presented frame in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    frames_presented: u64,
    close_after: Option<u64>,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Request a close once `frames` frames have been presented
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Bytes of the most recent frame (empty before the first present)
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Decode the most recent frame back into a buffer
    pub fn last_frame(&self) -> Option<PixelBuffer> {
        PixelBuffer::deserialize(&self.frame, self.width, self.height).ok()
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.frame.clear();
        Ok(())
    }

    fn present(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<()> {
        if (width, height) != (self.width, self.height) {
            return Err(Error::SizeMismatch {
                expected: (self.width, self.height),
                actual: (width, height),
            });
        }
        self.frame.clear();
        self.frame.extend_from_slice(bytes);
        self.frames_presented += 1;
        Ok(())
    }

    fn poll_close_requested(&mut self) -> bool {
        self.close_after
            .is_some_and(|limit| self.frames_presented >= limit)
    }
}

// ============================================================================
// DrawableObject
// ============================================================================

/// Shared capability set of everything backed by a [`PixelBuffer`]
pub trait DrawableObject {
    fn buffer(&self) -> &PixelBuffer;

    fn buffer_mut(&mut self) -> &mut PixelBuffer;

    fn size_x(&self) -> u32 {
        self.buffer().width()
    }

    fn size_y(&self) -> u32 {
        self.buffer().height()
    }

    fn read_pixel(&self, x: i32, y: i32) -> Result<Color> {
        self.buffer().read_pixel(x, y)
    }

    fn write_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.buffer_mut().write_pixel(x, y, color)?;
        Ok(self)
    }

    fn read_region(&self, x: i32, y: i32, x_size: i32, y_size: i32) -> Result<Vec<Color>> {
        self.buffer().read_region(x, y, x_size, y_size)
    }

    /// Start a chain of draw calls on this object
    fn draw(&mut self) -> DrawingContext<'_> {
        DrawingContext::new(self.buffer_mut())
    }

    fn tint_region(
        &mut self,
        tint: Color,
        factor: f32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> &mut Self
    where
        Self: Sized,
    {
        self.buffer_mut()
            .tint_region(tint, factor, x, y, width, height);
        self
    }

    fn serialize(&self) -> SerializedBuffer {
        self.buffer().serialize()
    }

    /// Replace the contents with previously serialized data of the same size
    fn load(&mut self, bytes: &[u8], width: u32, height: u32) -> Result<&mut Self>
    where
        Self: Sized,
    {
        let expected = self.buffer().size();
        if expected != (width, height) {
            return Err(Error::SizeMismatch {
                expected,
                actual: (width, height),
            });
        }
        *self.buffer_mut() = PixelBuffer::deserialize(bytes, width, height)?;
        Ok(self)
    }
}

impl DrawableObject for PixelBuffer {
    fn buffer(&self) -> &PixelBuffer {
        self
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        self
    }
}
