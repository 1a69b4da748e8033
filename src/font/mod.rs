//! Bitmap fonts
//!
//! A [`Font`] maps characters to [`Glyph`] bitmaps with no color of their
//! own; the draw color is substituted for every "on" cell and "off" cells
//! leave the target untouched. Fonts are built once from a [`StoredFont`]
//! record and never change afterwards.

mod record;

use std::collections::HashMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub use record::{GlyphData, StoredFont, SUPPORTED_FONT_VERSION};

use crate::color::Color;
use crate::display::DrawableObject;
use crate::error::{Error, Result};

/// A normalized glyph bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Glyph {
    /// `cells` is row-major and must hold `width * height` entries
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_on(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[(y * self.width + x) as usize]
    }
}

/// Layout parameters applied on top of a stored font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontOptions {
    /// Horizontal gap after every glyph
    pub spacing: i32,
    /// Vertical gap between lines
    pub line_padding: i32,
    /// Advance for characters without a glyph; falls back to the space glyph
    pub default_advance: Option<u32>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            spacing: 1,
            line_padding: 2,
            default_advance: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
    options: FontOptions,
    line_height: u32,
}

impl Font {
    /// Build a font with default layout options
    pub fn from_stored(stored: &StoredFont) -> Result<Self> {
        Self::from_stored_with(stored, FontOptions::default())
    }

    pub fn from_stored_with(stored: &StoredFont, options: FontOptions) -> Result<Self> {
        if stored.version != SUPPORTED_FONT_VERSION {
            return Err(Error::UnsupportedFontVersion {
                found: stored.version.clone(),
                expected: SUPPORTED_FONT_VERSION.to_string(),
            });
        }

        let mut glyphs = HashMap::with_capacity(stored.letters.len());
        for (key, data) in &stored.letters {
            let mut chars = key.chars();
            let (Some(letter), None) = (chars.next(), chars.next()) else {
                return Err(Error::InvalidGlyph {
                    letter: key.clone(),
                    reason: "key must be exactly one character".into(),
                });
            };
            glyphs.insert(letter, data.to_glyph(letter)?);
        }

        let line_height = glyphs.values().map(Glyph::height).max().unwrap_or(0);
        debug!(
            "Loaded font with {} glyphs (line height {})",
            glyphs.len(),
            line_height
        );
        Ok(Self {
            glyphs,
            options,
            line_height,
        })
    }

    /// Parse a JSON font record and build it
    pub fn from_json(text: &str) -> Result<Self> {
        let stored: StoredFont = serde_json::from_str(text)?;
        Self::from_stored(&stored)
    }

    pub fn with_options(mut self, options: FontOptions) -> Self {
        self.options = options;
        self
    }

    pub fn glyph(&self, letter: char) -> Option<&Glyph> {
        self.glyphs.get(&letter)
    }

    pub fn options(&self) -> FontOptions {
        self.options
    }

    /// Height of the tallest glyph
    pub fn line_height(&self) -> u32 {
        self.line_height
    }

    fn line_advance(&self) -> i32 {
        self.line_height as i32 + self.options.line_padding
    }

    /// Horizontal advance of one character, spacing included
    fn advance(&self, letter: char) -> i32 {
        let width = match self.glyphs.get(&letter) {
            Some(glyph) => glyph.width,
            None => self
                .options
                .default_advance
                .or_else(|| self.glyphs.get(&' ').map(Glyph::width))
                .unwrap_or(0),
        };
        width as i32 + self.options.spacing
    }

    /// Draw `text` with its top-left corner at (x, y).
    ///
    /// `\n` returns to `x` and moves down one line; `\r` is ignored. Glyph
    /// cells falling outside the target are clipped.
    pub fn draw<D: DrawableObject>(&self, target: &mut D, text: &str, x: i32, y: i32, color: Color) -> &Self {
        let buffer = target.buffer_mut();
        let (mut cx, mut cy) = (x, y);

        for letter in text.chars() {
            match letter {
                '\n' => {
                    cx = x;
                    cy = cy.saturating_add(self.line_advance());
                },
                '\r' => {},
                _ => {
                    match self.glyphs.get(&letter) {
                        Some(glyph) => {
                            for gy in 0..glyph.height {
                                for gx in 0..glyph.width {
                                    if glyph.is_on(gx, gy) {
                                        buffer.plot(
                                            cx.saturating_add(gx as i32),
                                            cy.saturating_add(gy as i32),
                                            color,
                                        );
                                    }
                                }
                            }
                        },
                        None => trace!("No glyph for {:?}, skipping", letter),
                    }
                    cx = cx.saturating_add(self.advance(letter));
                },
            }
        }
        self
    }

    /// Size of the box `draw` would cover for `text`
    pub fn measure(&self, text: &str) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }

        let mut widest = 0i64;
        let mut lines = 0i64;
        for line in text.split('\n') {
            lines += 1;
            let advance: i64 = line
                .chars()
                .filter(|&c| c != '\r')
                .map(|c| self.advance(c) as i64)
                .sum();
            let has_glyphs = line.chars().any(|c| c != '\r');
            // The trailing gap after the last glyph is not part of the box
            let width = if has_glyphs {
                advance - self.options.spacing as i64
            } else {
                0
            };
            widest = widest.max(width);
        }

        let height = lines * self.line_height as i64 + (lines - 1) * self.options.line_padding as i64;
        (widest.max(0) as u32, height.max(0) as u32)
    }
}

impl TryFrom<&StoredFont> for Font {
    type Error = Error;

    fn try_from(stored: &StoredFont) -> Result<Self> {
        Self::from_stored(stored)
    }
}
