//! Standalone textures
//!
//! A [`Texture`] is a pixel buffer with no host binding. It can be created
//! empty, rebuilt from serialized bytes, or decoded from a converter record.

use log::debug;

use super::{DrawableObject, PixelBuffer, TextureRecord};
use crate::composite;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    buffer: PixelBuffer,
}

impl Texture {
    /// Create a new empty (transparent) texture
    pub fn new(size_x: i32, size_y: i32) -> Result<Self> {
        Ok(Self {
            buffer: PixelBuffer::new(size_x, size_y)?,
        })
    }

    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Decode a converter record (numeric or string pixels)
    pub fn from_record(record: &TextureRecord) -> Result<Self> {
        let buffer = record.decode()?;
        debug!("Decoded {}x{} texture record", buffer.width(), buffer.height());
        Ok(Self { buffer })
    }

    /// Parse a JSON texture record and decode it
    pub fn from_json(text: &str) -> Result<Self> {
        let record: TextureRecord = serde_json::from_str(text)?;
        Self::from_record(&record)
    }

    pub fn deserialize(bytes: &[u8], width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            buffer: PixelBuffer::deserialize(bytes, width, height)?,
        })
    }

    pub fn to_record(&self) -> TextureRecord {
        TextureRecord::from_buffer(&self.buffer)
    }

    /// Alpha-composite `src` onto `dest` in place, top-left corner at (x, y)
    pub fn draw<'d, D: DrawableObject>(dest: &'d mut D, src: &Texture, x: i32, y: i32) -> &'d mut D {
        composite::draw_buffer_onto(dest.buffer_mut(), &src.buffer, x, y);
        dest
    }

    /// A new texture holding `src` composited over this one; both stay untouched
    pub fn composited(&self, src: &Texture, x: i32, y: i32) -> Texture {
        Self {
            buffer: composite::composite(&self.buffer, &src.buffer, x, y),
        }
    }
}

impl DrawableObject for Texture {
    fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}

impl From<PixelBuffer> for Texture {
    fn from(buffer: PixelBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}
