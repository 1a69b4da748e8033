use log::trace;

use super::{Point, ShapeOptions, Stroke};
use crate::color::Color;
use crate::composite;
use crate::display::PixelBuffer;
use crate::error::{Error, Result};
use crate::font::Font;

/// Fluent wrapper binding a target buffer to the draw calls.
///
/// The context is active until [`stop_drawing`](Self::stop_drawing) hands the
/// buffer back; every call after that fails with
/// [`Error::DrawingContextMisuse`].
///
/// ```
/// use easel::{Color, DrawableObject, PixelBuffer, Point, ShapeOptions};
///
/// let mut buffer = PixelBuffer::new(10, 10)?;
/// let target = buffer
///     .draw()
///     .rectangle(0, 0, 5, 5, Color::RED, &ShapeOptions::new())?
///     .line(Point::new(0, 9), Point::new(9, 9), 1, Color::WHITE)?
///     .stop_drawing()?;
/// assert_eq!(target.read_pixel(2, 2)?, Color::RED);
/// # Ok::<(), easel::Error>(())
/// ```
#[derive(Debug)]
pub struct DrawingContext<'a> {
    target: Option<&'a mut PixelBuffer>,
}

impl<'a> DrawingContext<'a> {
    pub fn new(target: &'a mut PixelBuffer) -> Self {
        Self {
            target: Some(target),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    fn target(&mut self) -> Result<&mut PixelBuffer> {
        self.target.as_deref_mut().ok_or(Error::DrawingContextMisuse)
    }

    pub fn pixel(&mut self, x: i32, y: i32, color: Color) -> Result<&mut Self> {
        super::pixel(self.target()?, x, y, color);
        Ok(self)
    }

    pub fn line(&mut self, from: Point, to: Point, thickness: i32, color: Color) -> Result<&mut Self> {
        super::line(self.target()?, from, to, thickness, color)?;
        Ok(self)
    }

    pub fn rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
        options: &ShapeOptions,
    ) -> Result<&mut Self> {
        super::rectangle(self.target()?, x, y, width, height, color, options)?;
        Ok(self)
    }

    pub fn circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
        options: &ShapeOptions,
    ) -> Result<&mut Self> {
        super::circle(self.target()?, cx, cy, radius, color, options)?;
        Ok(self)
    }

    pub fn triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Color,
        stroke: Option<Stroke>,
    ) -> Result<&mut Self> {
        super::triangle(self.target()?, a, b, c, color, stroke)?;
        Ok(self)
    }

    pub fn polygon(&mut self, corners: &[Point], color: Color, stroke: Option<Stroke>) -> Result<&mut Self> {
        super::polygon(self.target()?, corners, color, stroke)?;
        Ok(self)
    }

    pub fn flood_fill(&mut self, x: i32, y: i32, color: Color) -> Result<&mut Self> {
        let filled = super::flood_fill(self.target()?, x, y, color);
        trace!("Flood fill from ({}, {}) recolored {} pixels", x, y, filled);
        Ok(self)
    }

    /// Alpha-composite another buffer with its top-left corner at (x, y)
    pub fn buffer(&mut self, src: &PixelBuffer, x: i32, y: i32) -> Result<&mut Self> {
        composite::draw_buffer_onto(self.target()?, src, x, y);
        Ok(self)
    }

    pub fn tint_region(
        &mut self,
        tint: Color,
        factor: f32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<&mut Self> {
        self.target()?
            .tint_region(tint, factor, x, y, width, height);
        Ok(self)
    }

    pub fn text(&mut self, font: &Font, text: &str, x: i32, y: i32, color: Color) -> Result<&mut Self> {
        font.draw(self.target()?, text, x, y, color);
        Ok(self)
    }

    /// Finish the chain and hand the target back
    pub fn stop_drawing(&mut self) -> Result<&'a mut PixelBuffer> {
        self.target.take().ok_or(Error::DrawingContextMisuse)
    }
}
