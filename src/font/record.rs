//! Serde model of font records written by the asset converter

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Glyph;
use crate::error::{Error, Result};

pub const SUPPORTED_FONT_VERSION: &str = "1.0";

/// A font as stored on disk: a format version and one glyph per letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFont {
    pub version: String,
    pub letters: BTreeMap<String, GlyphData>,
}

/// The encodings a glyph bitmap may arrive in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GlyphData {
    /// 8x8 bitmap; row 0 is the most significant byte, the MSB of each
    /// byte is the leftmost column
    Packed(u64),
    /// `[width, height, bits...]` with the bits row-major, MSB first
    Bytes(Vec<u8>),
    /// Explicit rows, non-zero cells are on
    Grid(Vec<Vec<u8>>),
}

impl GlyphData {
    /// Normalize into a [`Glyph`]
    pub fn to_glyph(&self, letter: char) -> Result<Glyph> {
        let invalid = |reason: String| Error::InvalidGlyph {
            letter: letter.to_string(),
            reason,
        };

        match self {
            GlyphData::Packed(bits) => {
                let cells = (0..64).map(|i| bits >> (63 - i) & 1 == 1).collect();
                Ok(Glyph::from_cells(8, 8, cells))
            },
            GlyphData::Bytes(data) => {
                let [width, height, bits @ ..] = data.as_slice() else {
                    return Err(invalid("missing width/height header".into()));
                };
                let (width, height) = (*width as u32, *height as u32);
                if width == 0 || height == 0 {
                    return Err(invalid(format!("empty size {width}x{height}")));
                }
                let count = (width * height) as usize;
                if bits.len() * 8 < count {
                    return Err(invalid(format!(
                        "truncated: {count} bits needed, {} bytes given",
                        bits.len()
                    )));
                }
                let cells = (0..count)
                    .map(|i| bits[i / 8] >> (7 - i % 8) & 1 == 1)
                    .collect();
                Ok(Glyph::from_cells(width, height, cells))
            },
            GlyphData::Grid(rows) => {
                let width = rows.first().map_or(0, Vec::len);
                if width == 0 {
                    return Err(invalid("empty grid".into()));
                }
                if let Some(row) = rows.iter().position(|r| r.len() != width) {
                    return Err(invalid(format!(
                        "row {row} has {} cells, expected {width}",
                        rows[row].len()
                    )));
                }
                let cells = rows.iter().flatten().map(|&c| c != 0).collect();
                Ok(Glyph::from_cells(width as u32, rows.len() as u32, cells))
            },
        }
    }
}
