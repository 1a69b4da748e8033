//! Source-over alpha compositing of one buffer onto another

use crate::color::Color;
use crate::display::PixelBuffer;

/// Blend one source pixel over a destination pixel.
///
/// Channels are normalized to [0, 1]:
/// `outA = sA + dA(1 - sA)`, `outC = (sC sA + dC dA (1 - sA)) / outA`.
pub fn blend_over(src: Color, dst: Color) -> Color {
    match src.a() {
        255 => return src,
        0 => return dst,
        _ => {},
    }

    let sa = src.a() as f32 / 255.0;
    let da = dst.a() as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Color::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| -> f32 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        (s * sa + d * da * (1.0 - sa)) / out_a * 255.0
    };
    Color::new(
        channel(src.r(), dst.r()),
        channel(src.g(), dst.g()),
        channel(src.b(), dst.b()),
        out_a * 255.0,
    )
}

/// Composite `src` onto `dest` with its top-left corner at (x, y), clipped
pub fn draw_buffer_onto(dest: &mut PixelBuffer, src: &PixelBuffer, x: i32, y: i32) {
    let src_w = src.width() as i64;
    let src_h = src.height() as i64;
    let dst_w = dest.width() as i64;
    let dst_h = dest.height() as i64;

    for sy in 0..src_h {
        let dy = y as i64 + sy;
        if dy < 0 || dy >= dst_h {
            continue;
        }
        for sx in 0..src_w {
            let dx = x as i64 + sx;
            if dx < 0 || dx >= dst_w {
                continue;
            }

            let Some(s) = src.get_pixel(sx as i32, sy as i32) else {
                continue;
            };
            if s.a() == 0 {
                continue;
            }
            let (dx, dy) = (dx as i32, dy as i32);
            if let Some(d) = dest.get_pixel(dx, dy) {
                dest.plot(dx, dy, blend_over(s, d));
            }
        }
    }
}

/// Like [`draw_buffer_onto`] but into a fresh copy; both inputs stay untouched
pub fn composite(dest: &PixelBuffer, src: &PixelBuffer, x: i32, y: i32) -> PixelBuffer {
    let mut out = dest.clone();
    draw_buffer_onto(&mut out, src, x, y);
    out
}

/// Tint a clipped region of `target` towards `tint`
pub fn tint_region(
    target: &mut PixelBuffer,
    tint: Color,
    factor: f32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    target.tint_region(tint, factor, x, y, width, height);
}
