//! Packed RGBA colors
//!
//! A [`Color`] is four 8-bit channels packed into one `u32` as `0xRRGGBBAA`.
//! Colors are plain `Copy` values: every "setter" returns a new color.
//!
//! Channel inputs wider than `u8` are converted with a saturating clamp
//! (floats are rounded first, NaN becomes 0), so `Color::new(300, -5, 0, 255)`
//! is `(255, 0, 0, 255)`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Conversion of a numeric channel value into the `0..=255` range
pub trait IntoChannel {
    fn into_channel(self) -> u8;
}

impl IntoChannel for u8 {
    #[inline]
    fn into_channel(self) -> u8 {
        self
    }
}

impl IntoChannel for i32 {
    #[inline]
    fn into_channel(self) -> u8 {
        self.clamp(0, 255) as u8
    }
}

impl IntoChannel for i64 {
    #[inline]
    fn into_channel(self) -> u8 {
        self.clamp(0, 255) as u8
    }
}

impl IntoChannel for u32 {
    #[inline]
    fn into_channel(self) -> u8 {
        self.min(255) as u8
    }
}

impl IntoChannel for f32 {
    #[inline]
    fn into_channel(self) -> u8 {
        if self.is_nan() {
            return 0;
        }
        self.round().clamp(0.0, 255.0) as u8
    }
}

impl IntoChannel for f64 {
    #[inline]
    fn into_channel(self) -> u8 {
        if self.is_nan() {
            return 0;
        }
        self.round().clamp(0.0, 255.0) as u8
    }
}

/// An immutable RGBA color
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Color(u32);

impl Color {
    pub const RED: Self = Self::from_rgba(255, 0, 0, 255);
    pub const GREEN: Self = Self::from_rgba(0, 255, 0, 255);
    pub const BLUE: Self = Self::from_rgba(0, 0, 255, 255);
    pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);
    pub const YELLOW: Self = Self::from_rgba(255, 255, 0, 255);
    pub const MAGENTA: Self = Self::from_rgba(255, 0, 255, 255);
    pub const CYAN: Self = Self::from_rgba(0, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::from_rgba(0, 0, 0, 0);

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_be_bytes([r, g, b, a]))
    }

    /// Build a color from any numeric channel values, clamping each to `0..=255`
    pub fn new(
        r: impl IntoChannel,
        g: impl IntoChannel,
        b: impl IntoChannel,
        a: impl IntoChannel,
    ) -> Self {
        Self::from_rgba(
            r.into_channel(),
            g.into_channel(),
            b.into_channel(),
            a.into_channel(),
        )
    }

    /// Opaque color (alpha forced to 255)
    pub fn new_rgb(r: impl IntoChannel, g: impl IntoChannel, b: impl IntoChannel) -> Self {
        Self::from_rgba(r.into_channel(), g.into_channel(), b.into_channel(), 255)
    }

    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self(packed)
    }

    #[inline]
    pub const fn to_packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// All four channels in (r, g, b, a) order
    #[inline]
    pub const fn read(self) -> (u8, u8, u8, u8) {
        let [r, g, b, a] = self.0.to_be_bytes();
        (r, g, b, a)
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub fn set_r(self, r: impl IntoChannel) -> Self {
        let [_, g, b, a] = self.to_bytes();
        Self::from_rgba(r.into_channel(), g, b, a)
    }

    pub fn set_g(self, g: impl IntoChannel) -> Self {
        let [r, _, b, a] = self.to_bytes();
        Self::from_rgba(r, g.into_channel(), b, a)
    }

    pub fn set_b(self, b: impl IntoChannel) -> Self {
        let [r, g, _, a] = self.to_bytes();
        Self::from_rgba(r, g, b.into_channel(), a)
    }

    pub fn set_a(self, a: impl IntoChannel) -> Self {
        let [r, g, b, _] = self.to_bytes();
        Self::from_rgba(r, g, b, a.into_channel())
    }

    /// Linear interpolation towards `other`, per channel (alpha included).
    ///
    /// `factor` is clamped to [0, 1]; 0 returns `self` and 1 returns `other`.
    pub fn tint(self, other: Self, factor: f32) -> Self {
        let t = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }

        let lerp = |a: u8, b: u8| -> u8 { (a as f32 * (1.0 - t) + b as f32 * t).into_channel() };
        Self::from_rgba(
            lerp(self.r(), other.r()),
            lerp(self.g(), other.g()),
            lerp(self.b(), other.b()),
            lerp(self.a(), other.a()),
        )
    }

    /// Parse the compact `RRGGBB` / `RRGGBBAA` form (optional leading `#`)
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(text.to_string());

        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok(Self::from_rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl Default for Color {
    /// Opaque black: unspecified color channels are 0, alpha is 255
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgba(r, g, b, 255)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::from_rgba(r, g, b, a)
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (r, g, b, a) = self.read();
        write!(f, "Color({r}, {g}, {b}, {a})")
    }
}
