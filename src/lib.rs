//! Software 2D rasterization and compositing.
//!
//! Pixel buffers, shape rasterization, alpha compositing and bitmap fonts,
//! with a [`Window`] that flushes frames to any host [`Surface`].

pub mod color;
pub mod composite;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod font;
pub mod scene;

pub use color::{Color, IntoChannel};
pub use config::{Command, Config};
#[cfg(feature = "sdl")]
pub use display::SdlSurface;
pub use display::{
    DrawableObject, MemorySurface, PixelBuffer, PixelEntry, SerializedBuffer, Surface, Texture,
    TextureRecord, Window, WindowOptions, WindowState,
};
pub use draw::{DrawingContext, Point, ShapeOptions, Stroke};
pub use error::{Error, RegionParameter, Result};
pub use font::{Font, FontOptions, Glyph, GlyphData, StoredFont, SUPPORTED_FONT_VERSION};
pub use scene::{Scene, ShapeSpec};
