use std::io::Write;

use crate::color::Color;
use crate::error::{Error, RegionParameter, Result};

/// Bytes per pixel in the serialized form (R, G, B, A)
pub const BYTES_PER_PIXEL: usize = 4;

// ============================================================================
// Serialized form
// ============================================================================

/// Raw buffer contents plus dimensions, enough to rebuild an identical buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedBuffer {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Row-major grid of colors with the origin at the top-left corner.
///
/// The size is fixed at creation. Direct pixel access (`read_pixel`,
/// `write_pixel`, `read_region`) is bounds checked and fails loudly; the span
/// helpers used by the rasterizer clip silently instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let (width, height) = checked_size(width as i64, height as i64)?;
        Ok(Self::filled(width, height, Color::TRANSPARENT))
    }

    /// Create a buffer of a known-valid size filled with `color`
    pub(crate) fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing row-major color vector
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let (width, height) = checked_size(width as i64, height as i64)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::SerializedLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// All pixels in row-major order
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    /// Index of pixel (x, y) in the flat vector
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    // ========================================================================
    // Checked access
    // ========================================================================

    pub fn read_pixel(&self, x: i32, y: i32) -> Result<Color> {
        self.get_pixel(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Write one pixel. Out-of-bounds writes are rejected, never clipped.
    pub fn write_pixel(&mut self, x: i32, y: i32, color: Color) -> Result<&mut Self> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let idx = self.pixel_index(x as u32, y as u32);
        self.pixels[idx] = color;
        Ok(self)
    }

    /// Read a pixel, `None` when out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Row-major colors of the `x_size` x `y_size` block starting at (x, y)
    pub fn read_region(&self, x: i32, y: i32, x_size: i32, y_size: i32) -> Result<Vec<Color>> {
        if x < 0 {
            return Err(Error::InvalidRegionParameter(RegionParameter::X));
        }
        if y < 0 {
            return Err(Error::InvalidRegionParameter(RegionParameter::Y));
        }
        if x_size < 1 {
            return Err(Error::InvalidRegionParameter(RegionParameter::XSize));
        }
        if y_size < 1 {
            return Err(Error::InvalidRegionParameter(RegionParameter::YSize));
        }

        let (w, h) = (self.width as i64, self.height as i64);
        let x_end = x as i64 + x_size as i64;
        let y_end = y as i64 + y_size as i64;
        if x_end > w || y_end > h {
            // Report the first missing pixel in row-major order
            let (mx, my) = if x as i64 >= w || y as i64 >= h {
                (x, y)
            } else if x_end > w {
                (self.width as i32, y)
            } else {
                (x, self.height as i32)
            };
            return Err(self.out_of_bounds(mx, my));
        }

        let mut colors = Vec::with_capacity(x_size as usize * y_size as usize);
        for py in y..y + y_size {
            let row = self.pixel_index(x as u32, py as u32);
            colors.extend_from_slice(&self.pixels[row..row + x_size as usize]);
        }
        Ok(colors)
    }

    /// Single-pixel region read (both extents default to 1)
    pub fn read_region_default(&self, x: i32, y: i32) -> Result<Vec<Color>> {
        self.read_region(x, y, 1, 1)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Tint every pixel of the region towards `tint`, clipped to the buffer
    pub fn tint_region(
        &mut self,
        tint: Color,
        factor: f32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> &mut Self {
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, width, height) else {
            return self;
        };
        for py in y0..y1 {
            let row = self.pixel_index(0, py);
            for cell in &mut self.pixels[row + x0 as usize..row + x1 as usize] {
                *cell = cell.tint(tint, factor);
            }
        }
        self
    }

    /// Intersect a rectangle with the buffer, returning `[x0, x1) x [y0, y1)`
    fn clip_rect(&self, x: i32, y: i32, width: i32, height: i32) -> Option<(u32, u32, u32, u32)> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + width as i64).min(self.width as i64);
        let y1 = (y as i64 + height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    // ========================================================================
    // Clipped primitives for the rasterizer
    // ========================================================================

    /// Set a single pixel, silently ignoring out-of-bounds coordinates
    #[inline]
    pub(crate) fn plot(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    /// Draw an inclusive horizontal span, clipped to the buffer
    pub(crate) fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Color) {
        if y < 0 || y as i64 >= self.height as i64 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0) as i64;
        let end = (x2 as i64).min(self.width as i64 - 1);
        if start > end {
            return;
        }

        let row = self.pixel_index(0, y as u32);
        self.pixels[row + start as usize..=row + end as usize].fill(color);
    }

    /// Fill `[x, x + width) x [y, y + height)`, clipped to the buffer
    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, width, height) else {
            return;
        };
        for py in y0..y1 {
            let row = self.pixel_index(0, py);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Raw RGBA bytes, row-major, 4 bytes per pixel
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * BYTES_PER_PIXEL);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_bytes());
        }
        bytes
    }

    pub fn serialize(&self) -> SerializedBuffer {
        SerializedBuffer {
            bytes: self.to_bytes(),
            width: self.width,
            height: self.height,
        }
    }

    /// Rebuild a buffer from `serialize` output
    pub fn deserialize(bytes: &[u8], width: u32, height: u32) -> Result<Self> {
        let (width, height) = checked_size(width as i64, height as i64)?;
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(Error::SerializedLength {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Color::from_bytes([px[0], px[1], px[2], px[3]]))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Write the buffer as a binary PPM (alpha is dropped)
    pub fn write_ppm(&self, mut out: impl Write) -> Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks_exact(self.width as usize) {
            row.clear();
            for color in line {
                row.extend_from_slice(&[color.r(), color.g(), color.b()]);
            }
            out.write_all(&row)?;
        }
        Ok(())
    }
}

fn checked_size(width: i64, height: i64) -> Result<(u32, u32)> {
    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok((width as u32, height as u32))
}
