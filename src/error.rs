use std::fmt;

use thiserror::Error;

/// Which argument of a region read was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionParameter {
    X,
    Y,
    XSize,
    YSize,
}

impl fmt::Display for RegionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::XSize => "XSize",
            Self::YSize => "YSize",
        };
        f.write_str(tag)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid buffer dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: i64, height: i64 },
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("{0}")]
    InvalidRegionParameter(RegionParameter),
    #[error("Invalid shape parameter: {0}")]
    InvalidShapeParameter(String),
    #[error("Unsupported font version {found:?} (expected {expected:?})")]
    UnsupportedFontVersion { found: String, expected: String },
    #[error("Drawing context used after stop_drawing")]
    DrawingContextMisuse,
    #[error("Serialized buffer holds {actual} bytes, expected {expected}")]
    SerializedLength { expected: usize, actual: usize },
    #[error("Buffer size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Invalid texture data: {0}")]
    InvalidTextureData(String),
    #[error("Invalid glyph {letter:?}: {reason}")]
    InvalidGlyph { letter: String, reason: String },
    #[error("Invalid color {0:?}")]
    InvalidColor(String),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::InvalidShapeParameter(reason.into())
    }

    /// The region tag, if this is a region-read rejection
    pub fn region_parameter(&self) -> Option<RegionParameter> {
        match self {
            Self::InvalidRegionParameter(p) => Some(*p),
            _ => None,
        }
    }
}
