//! Serde model of texture records written by the asset converter

use serde::{Deserialize, Serialize};

use super::PixelBuffer;
use crate::color::Color;
use crate::error::{Error, Result};

/// One pixel of a texture record: either the packed `0xRRGGBBAA` value or
/// the compact hex string form (`"RRGGBB"` / `"RRGGBBAA"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PixelEntry {
    Packed(u32),
    Encoded(String),
}

impl PixelEntry {
    pub fn to_color(&self) -> Result<Color> {
        match self {
            PixelEntry::Packed(packed) => Ok(Color::from_packed(*packed)),
            PixelEntry::Encoded(text) => Color::parse_hex(text),
        }
    }
}

impl From<Color> for PixelEntry {
    fn from(color: Color) -> Self {
        PixelEntry::Packed(color.to_packed())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRecord {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<PixelEntry>,
}

impl TextureRecord {
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.pixels().iter().copied().map(PixelEntry::from).collect(),
        }
    }

    /// Validate the record and build the pixel buffer it describes
    pub fn decode(&self) -> Result<PixelBuffer> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidTextureData(format!(
                "size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(Error::InvalidTextureData(format!(
                "expected {} pixels for {}x{}, found {}",
                expected,
                self.width,
                self.height,
                self.pixels.len()
            )));
        }

        let pixels = self
            .pixels
            .iter()
            .map(PixelEntry::to_color)
            .collect::<Result<Vec<_>>>()?;
        PixelBuffer::from_pixels(self.width, self.height, pixels)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
