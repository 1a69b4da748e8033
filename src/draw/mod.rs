//! Shape rasterization
//!
//! Stateless algorithms that plot shapes into a [`PixelBuffer`]. Every write
//! is clipped to the buffer: shapes partially or fully off the buffer are
//! never an error. Only malformed shape parameters (non-positive sizes,
//! thickness below 1, too few corners) are rejected.
//!
//! Coordinates name pixel corners: pixel `(i, j)` covers `[i, i + 1) x
//! [j, j + 1)` and is sampled at its center. A 4x4 rectangle at (0, 0) and
//! the polygon `(0,0) (4,0) (4,4) (0,4)` cover the same 16 pixels.

mod context;

pub use context::DrawingContext;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::display::PixelBuffer;
use crate::error::{Error, Result};

// ============================================================================
// Shape parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Outline drawn along a shape's boundary, on top of its fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub thickness: i32,
}

impl Stroke {
    pub fn new(color: Color, thickness: i32) -> Self {
        Self { color, thickness }
    }
}

/// Optional stroke and rotation shared by rectangles and circles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeOptions {
    pub stroke: Option<Stroke>,
    /// Radians, clockwise on screen
    pub rotation: f32,
}

impl ShapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }
}

fn check_stroke(stroke: Option<Stroke>) -> Result<Option<Stroke>> {
    match stroke {
        Some(s) if s.thickness < 1 => Err(Error::shape(format!(
            "stroke thickness must be at least 1, got {}",
            s.thickness
        ))),
        other => Ok(other),
    }
}

// ============================================================================
// Pixel and line
// ============================================================================

#[inline]
pub fn pixel(target: &mut PixelBuffer, x: i32, y: i32, color: Color) {
    target.plot(x, y, color);
}

/// Draw a line between two pixels.
///
/// Thickness 1 is a plain Bresenham line. Thicker lines are filled as a quad
/// expanded by `thickness / 2` on each side of the segment. A zero-length
/// thick line is a disk of radius `thickness / 2`.
pub fn line(target: &mut PixelBuffer, from: Point, to: Point, thickness: i32, color: Color) -> Result<()> {
    if thickness < 1 {
        return Err(Error::shape(format!(
            "line thickness must be at least 1, got {thickness}"
        )));
    }
    if thickness == 1 {
        bresenham(target, from, to, color);
        return Ok(());
    }

    let dx = (to.x as f32) - (from.x as f32);
    let dy = (to.y as f32) - (from.y as f32);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 0.001 {
        fill_disk(target, from.x, from.y, thickness / 2, color);
        return Ok(());
    }

    // Perpendicular offset, applied around pixel centers
    let half = thickness as f32 / 2.0;
    let ox = -dy / len * half;
    let oy = dx / len * half;
    let (x0, y0) = (from.x as f32 + 0.5, from.y as f32 + 0.5);
    let (x1, y1) = (to.x as f32 + 0.5, to.y as f32 + 0.5);
    let quad = [
        (x0 + ox, y0 + oy),
        (x1 + ox, y1 + oy),
        (x1 - ox, y1 - oy),
        (x0 - ox, y0 - oy),
    ];
    fill_rings(target, &[&quad], color);
    bresenham(target, from, to, color);
    Ok(())
}

/// Bresenham's line with Cohen-Sutherland clipping
fn bresenham(target: &mut PixelBuffer, from: Point, to: Point, color: Color) {
    let Some((x0, y0, x1, y1)) = clip_line(
        target.width() as i64,
        target.height() as i64,
        from.x as i64,
        from.y as i64,
        to.x as i64,
        to.y as i64,
    ) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        target.plot(x as i32, y as i32, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Cohen-Sutherland clipping against `[0, w) x [0, h)`
fn clip_line(
    w: i64,
    h: i64,
    mut x0: i64,
    mut y0: i64,
    mut x1: i64,
    mut y1: i64,
) -> Option<(i64, i64, i64, i64)> {
    const INSIDE: u8 = 0;
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const BOTTOM: u8 = 4;
    const TOP: u8 = 8;
    // Converges in at most 4 rounds for any finite input
    const MAX_ITERATIONS: u32 = 16;

    let outcode = |x: i64, y: i64| -> u8 {
        let mut code = INSIDE;
        if x < 0 {
            code |= LEFT;
        } else if x >= w {
            code |= RIGHT;
        }
        if y < 0 {
            code |= TOP;
        } else if y >= h {
            code |= BOTTOM;
        }
        code
    };
    // a0 + d * num / den, widened so far-off endpoints cannot overflow
    let step = |a0: i64, d: i64, num: i64, den: i64| -> i64 {
        (a0 as i128 + d as i128 * num as i128 / den as i128) as i64
    };

    let mut code0 = outcode(x0, y0);
    let mut code1 = outcode(x1, y1);

    for _ in 0..MAX_ITERATIONS {
        if (code0 | code1) == 0 {
            return Some((x0, y0, x1, y1));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code_out = if code0 != 0 { code0 } else { code1 };
        let dx = x1 - x0;
        let dy = y1 - y0;
        let (x, y);

        if (code_out & BOTTOM) != 0 {
            if dy == 0 {
                return None;
            }
            x = step(x0, dx, h - 1 - y0, dy);
            y = h - 1;
        } else if (code_out & TOP) != 0 {
            if dy == 0 {
                return None;
            }
            x = step(x0, dx, -y0, dy);
            y = 0;
        } else if (code_out & RIGHT) != 0 {
            if dx == 0 {
                return None;
            }
            y = step(y0, dy, w - 1 - x0, dx);
            x = w - 1;
        } else {
            if dx == 0 {
                return None;
            }
            y = step(y0, dy, -x0, dx);
            x = 0;
        }

        if code_out == code0 {
            x0 = x;
            y0 = y;
            code0 = outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1);
        }
    }

    None
}

// ============================================================================
// Rectangle
// ============================================================================

/// Fill (and optionally stroke) a `width x height` rectangle at (x, y).
///
/// The stroke is an inset border painted over the outermost rows and
/// columns. With a rotation the corners are rotated about the center and
/// both fill and stroke are rasterized as quadrilaterals.
pub fn rectangle(
    target: &mut PixelBuffer,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    color: Color,
    options: &ShapeOptions,
) -> Result<()> {
    if width <= 0 || height <= 0 {
        return Err(Error::shape(format!(
            "rectangle size must be positive, got {width}x{height}"
        )));
    }
    if !options.rotation.is_finite() {
        return Err(Error::shape(format!(
            "rotation must be finite, got {}",
            options.rotation
        )));
    }
    let stroke = check_stroke(options.stroke)?;

    if options.rotation == 0.0 {
        target.fill_rect(x, y, width, height, color);
        if let Some(stroke) = stroke {
            let tx = stroke.thickness.min(width);
            let ty = stroke.thickness.min(height);
            target.fill_rect(x, y, width, ty, stroke.color);
            // Past i32::MAX the band is off the buffer anyway
            target.fill_rect(x, y.saturating_add(height - ty), width, ty, stroke.color);
            target.fill_rect(x, y, tx, height, stroke.color);
            target.fill_rect(x.saturating_add(width - tx), y, tx, height, stroke.color);
        }
        return Ok(());
    }

    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let center = (x as f32 + half_w, y as f32 + half_h);
    let outer = rotated_quad(center, half_w, half_h, options.rotation);
    fill_rings(target, &[&outer], color);

    if let Some(stroke) = stroke {
        let t = stroke.thickness as f32;
        if t >= half_w || t >= half_h {
            fill_rings(target, &[&outer], stroke.color);
        } else {
            let inner = rotated_quad(center, half_w - t, half_h - t, options.rotation);
            fill_rings(target, &[&outer, &inner], stroke.color);
        }
    }
    Ok(())
}

fn rotated_quad(center: (f32, f32), half_w: f32, half_h: f32, angle: f32) -> [(f32, f32); 4] {
    let (sin, cos) = angle.sin_cos();
    let rotate = |dx: f32, dy: f32| {
        (
            center.0 + dx * cos - dy * sin,
            center.1 + dx * sin + dy * cos,
        )
    };
    [
        rotate(-half_w, -half_h),
        rotate(half_w, -half_h),
        rotate(half_w, half_h),
        rotate(-half_w, half_h),
    ]
}

// ============================================================================
// Circle
// ============================================================================

/// Fill (and optionally stroke) a disk of `radius` about (cx, cy).
///
/// The stroke is an inset ring `thickness` pixels wide. Rotation is accepted
/// for symmetry with rectangles and has no effect on the geometry.
pub fn circle(
    target: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Color,
    options: &ShapeOptions,
) -> Result<()> {
    if radius <= 0 {
        return Err(Error::shape(format!("circle radius must be positive, got {radius}")));
    }
    let stroke = check_stroke(options.stroke)?;

    fill_disk(target, cx, cy, radius, color);
    if let Some(stroke) = stroke {
        let inner = radius - stroke.thickness;
        if inner <= 0 {
            fill_disk(target, cx, cy, radius, stroke.color);
        } else {
            fill_ring(target, cx, cy, radius, inner, stroke.color);
        }
    }
    Ok(())
}

/// Largest `x` with `x * x <= n`
fn isqrt(n: i64) -> i64 {
    let mut x = (n as f64).sqrt() as i64;
    while x > 0 && x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

/// Inclusive span on row `y`, clipped before narrowing to i32
fn span(target: &mut PixelBuffer, x0: i64, x1: i64, y: i64, color: Color) {
    if y < 0 || y >= target.height() as i64 {
        return;
    }
    let start = x0.max(0);
    let end = x1.min(target.width() as i64 - 1);
    if start <= end {
        target.hline(start as i32, end as i32, y as i32, color);
    }
}

/// Buffer rows covered by `[cy - r, cy + r]`, or `None` when the disk's box misses
fn disk_rows(target: &PixelBuffer, cx: i64, cy: i64, r: i64) -> Option<(i64, i64)> {
    let (w, h) = (target.width() as i64, target.height() as i64);
    if cx + r < 0 || cx - r >= w || cy + r < 0 || cy - r >= h {
        return None;
    }
    Some(((cy - r).max(0), (cy + r).min(h - 1)))
}

// A pixel belongs to a disk of radius r when its center lies within r + 1/2:
// dx^2 + dy^2 <= r^2 + r for integer offsets.
fn fill_disk(target: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        target.plot(cx, cy, color);
        return;
    }
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    let Some((top, bottom)) = disk_rows(target, cx, cy, r) else {
        return;
    };
    for y in top..=bottom {
        let dy = y - cy;
        let hw = isqrt(r * r + r - dy * dy);
        span(target, cx - hw, cx + hw, y, color);
    }
}

/// Rows of the outer disk minus the disk of radius `inner`
fn fill_ring(target: &mut PixelBuffer, cx: i32, cy: i32, outer: i32, inner: i32, color: Color) {
    let (cx, cy, ro, ri) = (cx as i64, cy as i64, outer as i64, inner as i64);
    let Some((top, bottom)) = disk_rows(target, cx, cy, ro) else {
        return;
    };
    for y in top..=bottom {
        let dy = y - cy;
        let ho = isqrt(ro * ro + ro - dy * dy);
        if dy.abs() <= ri {
            let hi = isqrt(ri * ri + ri - dy * dy);
            span(target, cx - ho, cx - hi - 1, y, color);
            span(target, cx + hi + 1, cx + ho, y, color);
        } else {
            span(target, cx - ho, cx + ho, y, color);
        }
    }
}

// ============================================================================
// Triangle and polygon
// ============================================================================

/// Fill a triangle using edge functions evaluated at pixel centers.
///
/// Both windings rasterize identically; a zero-area triangle draws nothing.
pub fn triangle(
    target: &mut PixelBuffer,
    a: Point,
    b: Point,
    c: Point,
    color: Color,
    stroke: Option<Stroke>,
) -> Result<()> {
    let stroke = check_stroke(stroke)?;

    // Doubled coordinates keep pixel centers (2i + 1) integral
    // and i128 keeps the cross products of far-off corners exact
    let dbl = |p: Point| (2 * p.x as i128, 2 * p.y as i128);
    let (a2, mut b2, mut c2) = (dbl(a), dbl(b), dbl(c));
    let edge = |p: (i128, i128), q: (i128, i128), s: (i128, i128)| {
        (q.0 - p.0) * (s.1 - p.1) - (q.1 - p.1) * (s.0 - p.0)
    };

    let area = edge(a2, b2, c2);
    if area != 0 {
        if area < 0 {
            std::mem::swap(&mut b2, &mut c2);
        }

        let (w, h) = (target.width() as i64, target.height() as i64);
        let min_x = a.x.min(b.x).min(c.x) as i64;
        let max_x = a.x.max(b.x).max(c.x) as i64;
        let min_y = a.y.min(b.y).min(c.y) as i64;
        let max_y = a.y.max(b.y).max(c.y) as i64;

        for py in min_y.max(0)..max_y.min(h) {
            let sy = 2 * py as i128 + 1;
            // Longest run of inside pixels on this row
            let mut span: Option<(i64, i64)> = None;
            for px in min_x.max(0)..max_x.min(w) {
                let s = (2 * px as i128 + 1, sy);
                if edge(a2, b2, s) >= 0 && edge(b2, c2, s) >= 0 && edge(c2, a2, s) >= 0 {
                    span = Some(span.map_or((px, px), |(start, _)| (start, px)));
                }
            }
            if let Some((start, end)) = span {
                target.hline(start as i32, end as i32, py as i32, color);
            }
        }
    }

    if let Some(stroke) = stroke {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            line(target, p, q, stroke.thickness, stroke.color)?;
        }
    }
    Ok(())
}

/// Fill an arbitrary polygon with the even-odd rule.
///
/// Self-intersecting polygons are allowed: regions covered an even number of
/// times stay unfilled. The stroke follows every edge, closing last to first.
pub fn polygon(target: &mut PixelBuffer, corners: &[Point], color: Color, stroke: Option<Stroke>) -> Result<()> {
    if corners.len() < 3 {
        return Err(Error::shape(format!(
            "polygon needs at least 3 corners, got {}",
            corners.len()
        )));
    }
    let stroke = check_stroke(stroke)?;

    let ring: Vec<(f32, f32)> = corners.iter().map(|p| (p.x as f32, p.y as f32)).collect();
    fill_rings(target, &[&ring], color);

    if let Some(stroke) = stroke {
        let n = corners.len();
        for i in 0..n {
            line(target, corners[i], corners[(i + 1) % n], stroke.thickness, stroke.color)?;
        }
    }
    Ok(())
}

/// Even-odd scanline fill of one or more closed rings, sampled at pixel centers
fn fill_rings(target: &mut PixelBuffer, rings: &[&[(f32, f32)]], color: Color) {
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for &(_, y) in rings.iter().flat_map(|ring| ring.iter()) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y > max_y {
        return;
    }

    let min_y = (min_y.floor() as i32).max(0);
    let max_y = (max_y.ceil() as i32).min(target.height() as i32 - 1);

    let mut intersections = Vec::new();
    for y in min_y..=max_y {
        intersections.clear();
        let yf = y as f32 + 0.5;

        for ring in rings {
            let n = ring.len();
            for i in 0..n {
                let (x1, y1) = ring[i];
                let (x2, y2) = ring[(i + 1) % n];
                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    intersections.push(x1 + (yf - y1) / (y2 - y1) * (x2 - x1));
                }
            }
        }

        intersections.sort_unstable_by(f32::total_cmp);
        for pair in intersections.chunks_exact(2) {
            // Pixels whose centers fall in [xa, xb)
            let start = (pair[0] - 0.5).ceil() as i64;
            let end = (pair[1] - 0.5).ceil() as i64 - 1;
            span(target, start, end, y as i64, color);
        }
    }
}

// ============================================================================
// Flood fill
// ============================================================================

/// 4-connected fill of the region matching the seed's color.
///
/// Returns the number of pixels recolored. A seed outside the buffer, or one
/// already of the fill color, recolors nothing.
pub fn flood_fill(target: &mut PixelBuffer, x: i32, y: i32, color: Color) -> usize {
    let Some(original) = target.get_pixel(x, y) else {
        return 0;
    };
    if original == color {
        return 0;
    }

    let width = target.width() as usize;
    let index = |x: i32, y: i32| y as usize * width + x as usize;
    let mut visited = vec![false; target.pixels().len()];
    let mut stack = vec![(x, y)];
    visited[index(x, y)] = true;
    let mut filled = 0;

    while let Some((px, py)) = stack.pop() {
        target.plot(px, py, color);
        filled += 1;

        for (nx, ny) in [(px - 1, py), (px + 1, py), (px, py - 1), (px, py + 1)] {
            if !target.in_bounds(nx, ny) || visited[index(nx, ny)] {
                continue;
            }
            if target.get_pixel(nx, ny) == Some(original) {
                visited[index(nx, ny)] = true;
                stack.push((nx, ny));
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: i32, h: i32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(w, h).unwrap();
        buffer.clear(Color::BLACK);
        buffer
    }

    fn count(buffer: &PixelBuffer, color: Color) -> usize {
        buffer.pixels().iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn test_line_endpoints_and_length() {
        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(1, 1), Point::new(8, 1), 1, Color::RED).unwrap();
        assert_eq!(count(&buf, Color::RED), 8);

        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(0, 0), Point::new(9, 9), 1, Color::RED).unwrap();
        for i in 0..10 {
            assert_eq!(buf.read_pixel(i, i).unwrap(), Color::RED);
        }
        assert_eq!(count(&buf, Color::RED), 10);
    }

    #[test]
    fn test_line_is_clipped() {
        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(-50, 5), Point::new(50, 5), 1, Color::RED).unwrap();
        assert_eq!(count(&buf, Color::RED), 10);

        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(-5, -5), Point::new(-1, -20), 1, Color::RED).unwrap();
        assert_eq!(count(&buf, Color::RED), 0);

        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(i32::MIN, 0), Point::new(i32::MAX, 9), 1, Color::RED).unwrap();
        assert!(count(&buf, Color::RED) > 0);
    }

    #[test]
    fn test_line_rejects_zero_thickness() {
        let mut buf = canvas(4, 4);
        assert!(matches!(
            line(&mut buf, Point::new(0, 0), Point::new(3, 3), 0, Color::RED),
            Err(Error::InvalidShapeParameter(_))
        ));
    }

    #[test]
    fn test_thick_line_covers_band() {
        let mut buf = canvas(20, 20);
        line(&mut buf, Point::new(2, 10), Point::new(17, 10), 4, Color::RED).unwrap();
        for y in 8..=11 {
            assert_eq!(buf.read_pixel(10, y).unwrap(), Color::RED, "row {y}");
        }
        assert_eq!(buf.read_pixel(10, 6).unwrap(), Color::BLACK);
        assert_eq!(buf.read_pixel(10, 13).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_zero_length_thick_line_is_a_disk() {
        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(5, 5), Point::new(5, 5), 4, Color::RED).unwrap();
        assert_eq!(buf.read_pixel(5, 5).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(7, 5).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(8, 5).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_rectangle_inside_sets_exact_area() {
        let mut buf = canvas(10, 10);
        rectangle(&mut buf, 2, 3, 4, 5, Color::RED, &ShapeOptions::new()).unwrap();
        assert_eq!(count(&buf, Color::RED), 20);
        assert_eq!(buf.read_pixel(2, 3).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(5, 7).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(6, 7).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_rectangle_outside_changes_nothing() {
        let mut buf = canvas(10, 10);
        let before = buf.clone();
        rectangle(&mut buf, 20, 20, 5, 5, Color::RED, &ShapeOptions::new()).unwrap();
        rectangle(&mut buf, -10, 0, 5, 5, Color::RED, &ShapeOptions::new().rotated(0.3)).unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_rectangle_rejects_bad_size() {
        let mut buf = canvas(4, 4);
        assert!(rectangle(&mut buf, 0, 0, 0, 2, Color::RED, &ShapeOptions::new()).is_err());
        assert!(rectangle(&mut buf, 0, 0, 2, -1, Color::RED, &ShapeOptions::new()).is_err());
        let bad_stroke = ShapeOptions::new().with_stroke(Stroke::new(Color::RED, 0));
        assert!(rectangle(&mut buf, 0, 0, 2, 2, Color::RED, &bad_stroke).is_err());
    }

    #[test]
    fn test_rectangle_stroke_is_inset() {
        let mut buf = canvas(10, 10);
        let options = ShapeOptions::new().with_stroke(Stroke::new(Color::WHITE, 1));
        rectangle(&mut buf, 1, 1, 5, 5, Color::RED, &options).unwrap();
        assert_eq!(count(&buf, Color::WHITE), 16);
        assert_eq!(count(&buf, Color::RED), 9);
        assert_eq!(buf.read_pixel(1, 1).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(3, 3).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(0, 0).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_rectangle_half_turn_matches_unrotated() {
        let mut plain = canvas(12, 12);
        let mut turned = canvas(12, 12);
        rectangle(&mut plain, 2, 3, 6, 4, Color::RED, &ShapeOptions::new()).unwrap();
        rectangle(
            &mut turned,
            2,
            3,
            6,
            4,
            Color::RED,
            &ShapeOptions::new().rotated(std::f32::consts::PI),
        )
        .unwrap();
        assert_eq!(plain, turned);
    }

    #[test]
    fn test_rotated_rectangle_quarter_turn_swaps_extent() {
        let mut buf = canvas(20, 20);
        rectangle(
            &mut buf,
            4,
            8,
            12,
            4,
            Color::RED,
            &ShapeOptions::new().rotated(std::f32::consts::FRAC_PI_2),
        )
        .unwrap();
        // Center (10, 10); now 4 wide and 12 tall
        assert_eq!(buf.read_pixel(10, 5).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(10, 14).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(5, 10).unwrap(), Color::BLACK);
        assert_eq!(count(&buf, Color::RED), 48);
    }

    #[test]
    fn test_rotated_rectangle_stroke_leaves_interior() {
        let mut buf = canvas(30, 30);
        let options = ShapeOptions::new()
            .rotated(0.4)
            .with_stroke(Stroke::new(Color::WHITE, 2));
        rectangle(&mut buf, 5, 5, 20, 20, Color::RED, &options).unwrap();
        assert_eq!(buf.read_pixel(15, 15).unwrap(), Color::RED);
        assert!(count(&buf, Color::WHITE) > 0);
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut buf = canvas(21, 21);
        circle(&mut buf, 10, 10, 5, Color::RED, &ShapeOptions::new()).unwrap();
        assert_eq!(buf.read_pixel(10, 10).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(15, 10).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(10, 5).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(16, 10).unwrap(), Color::BLACK);
        assert_eq!(buf.read_pixel(14, 14).unwrap(), Color::BLACK);
        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(buf.read_pixel(x, y).unwrap(), buf.read_pixel(20 - x, y).unwrap());
                assert_eq!(buf.read_pixel(x, y).unwrap(), buf.read_pixel(y, x).unwrap());
            }
        }
    }

    #[test]
    fn test_circle_rotation_is_noop() {
        let mut plain = canvas(16, 16);
        let mut turned = canvas(16, 16);
        circle(&mut plain, 8, 8, 6, Color::RED, &ShapeOptions::new()).unwrap();
        circle(&mut turned, 8, 8, 6, Color::RED, &ShapeOptions::new().rotated(1.2)).unwrap();
        assert_eq!(plain, turned);
    }

    #[test]
    fn test_circle_stroke_ring() {
        let mut buf = canvas(21, 21);
        let options = ShapeOptions::new().with_stroke(Stroke::new(Color::WHITE, 2));
        circle(&mut buf, 10, 10, 6, Color::RED, &options).unwrap();
        assert_eq!(buf.read_pixel(10, 10).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(16, 10).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(15, 10).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(14, 10).unwrap(), Color::RED);
        assert!(circle(&mut buf, 0, 0, 0, Color::RED, &ShapeOptions::new()).is_err());
    }

    #[test]
    fn test_triangle_winding_independent() {
        let (a, b, c) = (Point::new(1, 1), Point::new(12, 3), Point::new(4, 11));
        let mut cw = canvas(14, 14);
        let mut ccw = canvas(14, 14);
        triangle(&mut cw, a, b, c, Color::RED, None).unwrap();
        triangle(&mut ccw, a, c, b, Color::RED, None).unwrap();
        assert_eq!(cw, ccw);
        assert!(count(&cw, Color::RED) > 0);
    }

    #[test]
    fn test_degenerate_triangle_draws_nothing() {
        let mut buf = canvas(10, 10);
        let before = buf.clone();
        triangle(&mut buf, Point::new(0, 0), Point::new(4, 4), Point::new(8, 8), Color::RED, None)
            .unwrap();
        triangle(&mut buf, Point::new(3, 3), Point::new(3, 3), Point::new(3, 3), Color::RED, None)
            .unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_right_triangle_area() {
        let mut buf = canvas(10, 10);
        triangle(&mut buf, Point::new(0, 0), Point::new(4, 0), Point::new(0, 4), Color::RED, None)
            .unwrap();
        // Rows hold 4, 3, 2, 1 pixel centers below the hypotenuse (inclusive edge)
        assert_eq!(count(&buf, Color::RED), 10);
    }

    #[test]
    fn test_triangle_stroke_outlines_edges() {
        let mut buf = canvas(10, 10);
        let stroke = Some(Stroke::new(Color::WHITE, 1));
        triangle(&mut buf, Point::new(1, 1), Point::new(8, 1), Point::new(1, 8), Color::RED, stroke)
            .unwrap();
        assert_eq!(buf.read_pixel(1, 1).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(8, 1).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(1, 8).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(4, 5).unwrap(), Color::WHITE);
        assert_eq!(buf.read_pixel(3, 3).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(0, 0).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_zero_area_triangle_still_strokes() {
        let mut buf = canvas(10, 10);
        let stroke = Some(Stroke::new(Color::WHITE, 1));
        triangle(&mut buf, Point::new(0, 0), Point::new(4, 4), Point::new(8, 8), Color::RED, stroke)
            .unwrap();
        assert_eq!(count(&buf, Color::RED), 0);
        assert_eq!(count(&buf, Color::WHITE), 9);
        for i in 0..=8 {
            assert_eq!(buf.read_pixel(i, i).unwrap(), Color::WHITE);
        }
    }

    #[test]
    fn test_far_triangles_are_clipped() {
        let mut buf = canvas(8, 8);
        triangle(
            &mut buf,
            Point::new(-2_000_000_000, 0),
            Point::new(2_000_000_000, 0),
            Point::new(0, 2_000_000_000),
            Color::RED,
            None,
        )
        .unwrap();
        assert_eq!(count(&buf, Color::RED), 64);

        let mut buf = canvas(8, 8);
        triangle(
            &mut buf,
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
            Point::new(0, i32::MAX),
            Color::RED,
            Some(Stroke::new(Color::WHITE, 1)),
        )
        .unwrap();
        assert_eq!(count(&buf, Color::RED), 64);

        let mut buf = canvas(8, 8);
        let before = buf.clone();
        triangle(
            &mut buf,
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MAX - 5, i32::MAX),
            Point::new(i32::MAX, i32::MAX - 5),
            Color::RED,
            None,
        )
        .unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_far_rectangles_are_clipped() {
        let stroked = ShapeOptions::new().with_stroke(Stroke::new(Color::WHITE, 1));
        let mut buf = canvas(8, 8);
        let before = buf.clone();
        rectangle(&mut buf, i32::MAX - 2, 0, 5, 5, Color::RED, &stroked).unwrap();
        rectangle(&mut buf, 0, i32::MAX - 2, 5, 5, Color::RED, &stroked).unwrap();
        rectangle(&mut buf, i32::MIN, i32::MIN, 5, 5, Color::RED, &stroked).unwrap();
        rectangle(&mut buf, i32::MAX - 2, i32::MAX - 2, 5, 5, Color::RED, &stroked.rotated(0.3))
            .unwrap();
        assert_eq!(buf, before);

        // Only the interior reaches the buffer; the border lies off its edges
        rectangle(&mut buf, -5, -5, i32::MAX, i32::MAX, Color::RED, &stroked).unwrap();
        assert_eq!(count(&buf, Color::RED), 64);
    }

    #[test]
    fn test_far_circles_are_clipped() {
        let stroked = ShapeOptions::new().with_stroke(Stroke::new(Color::WHITE, 1));
        let mut buf = canvas(8, 8);
        let before = buf.clone();
        circle(&mut buf, i32::MAX, 0, 5, Color::RED, &ShapeOptions::new()).unwrap();
        circle(&mut buf, i32::MIN, i32::MIN, 5, Color::RED, &stroked).unwrap();
        circle(&mut buf, 0, i32::MAX, 5, Color::RED, &stroked).unwrap();
        circle(&mut buf, i32::MIN, i32::MIN, i32::MAX, Color::RED, &ShapeOptions::new()).unwrap();
        line(&mut buf, Point::new(i32::MAX, 0), Point::new(i32::MAX, 0), 4, Color::RED).unwrap();
        assert_eq!(buf, before);

        // A huge disk covering the buffer, its ring entirely off-buffer
        circle(&mut buf, 4, 4, i32::MAX, Color::RED, &stroked).unwrap();
        assert_eq!(count(&buf, Color::RED), 64);
    }

    #[test]
    fn test_circle_ring_stays_inside_disk() {
        let mut plain = canvas(21, 21);
        let mut stroked = canvas(21, 21);
        circle(&mut plain, 10, 10, 7, Color::RED, &ShapeOptions::new()).unwrap();
        let options = ShapeOptions::new().with_stroke(Stroke::new(Color::WHITE, 1));
        circle(&mut stroked, 10, 10, 7, Color::RED, &options).unwrap();
        for (a, b) in plain.pixels().iter().zip(stroked.pixels()) {
            assert_eq!(*a == Color::BLACK, *b == Color::BLACK);
        }
        assert!(count(&stroked, Color::WHITE) > 0);
    }

    #[test]
    fn test_far_polygons_are_clipped() {
        let corners = [
            Point::new(i32::MIN, i32::MIN),
            Point::new(i32::MAX, i32::MIN),
            Point::new(i32::MAX, i32::MAX),
            Point::new(i32::MIN, i32::MAX),
        ];
        let mut buf = canvas(8, 8);
        polygon(&mut buf, &corners, Color::RED, Some(Stroke::new(Color::WHITE, 1))).unwrap();
        assert_eq!(count(&buf, Color::RED), 64);

        let mut buf = canvas(8, 8);
        let before = buf.clone();
        let far = [Point::new(i32::MIN, 0), Point::new(i32::MIN + 4, 0), Point::new(i32::MIN, 4)];
        polygon(&mut buf, &far, Color::RED, None).unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_polygon_square_matches_rectangle() {
        let mut poly = canvas(10, 10);
        let mut rect = canvas(10, 10);
        let corners = [Point::new(2, 2), Point::new(6, 2), Point::new(6, 7), Point::new(2, 7)];
        polygon(&mut poly, &corners, Color::RED, None).unwrap();
        rectangle(&mut rect, 2, 2, 4, 5, Color::RED, &ShapeOptions::new()).unwrap();
        assert_eq!(poly, rect);
    }

    #[test]
    fn test_polygon_even_odd_leaves_overlap_hole() {
        // Outer square traced, then an inner square traced inside it as one ring
        let corners = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(0, 0),
            Point::new(3, 3),
            Point::new(7, 3),
            Point::new(7, 7),
            Point::new(3, 7),
            Point::new(3, 3),
        ];
        let mut buf = canvas(10, 10);
        polygon(&mut buf, &corners, Color::RED, None).unwrap();
        assert_eq!(buf.read_pixel(1, 1).unwrap(), Color::RED);
        assert_eq!(buf.read_pixel(5, 5).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_polygon_needs_three_corners() {
        let mut buf = canvas(4, 4);
        assert!(matches!(
            polygon(&mut buf, &[Point::new(0, 0), Point::new(3, 3)], Color::RED, None),
            Err(Error::InvalidShapeParameter(_))
        ));
    }

    #[test]
    fn test_polygon_stroke_wraps_last_to_first() {
        let mut buf = canvas(10, 10);
        let corners = [Point::new(1, 1), Point::new(8, 1), Point::new(8, 8)];
        polygon(
            &mut buf,
            &corners,
            Color::RED,
            Some(Stroke::new(Color::WHITE, 1)),
        )
        .unwrap();
        // The closing edge runs along the diagonal
        assert_eq!(buf.read_pixel(4, 4).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_flood_fill_uniform_buffer() {
        let mut buf = canvas(17, 9);
        assert_eq!(flood_fill(&mut buf, 8, 4, Color::RED), 17 * 9);
        assert_eq!(count(&buf, Color::RED), 17 * 9);
    }

    #[test]
    fn test_flood_fill_stops_at_boundary() {
        let mut buf = canvas(10, 10);
        line(&mut buf, Point::new(5, 0), Point::new(5, 9), 1, Color::WHITE).unwrap();
        assert_eq!(flood_fill(&mut buf, 0, 0, Color::RED), 50);
        assert_eq!(buf.read_pixel(7, 7).unwrap(), Color::BLACK);
        assert_eq!(buf.read_pixel(5, 3).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_flood_fill_noop_cases() {
        let mut buf = canvas(4, 4);
        assert_eq!(flood_fill(&mut buf, -1, 0, Color::RED), 0);
        assert_eq!(flood_fill(&mut buf, 0, 0, Color::BLACK), 0);
    }

    #[test]
    fn test_shape_options_serde_defaults() {
        let options: ShapeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ShapeOptions::default());
        let options: ShapeOptions =
            serde_json::from_str(r#"{"stroke": {"color": 255, "thickness": 2}}"#).unwrap();
        assert_eq!(options.stroke, Some(Stroke::new(Color::from_packed(255), 2)));
    }
}
