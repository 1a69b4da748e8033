//! Scene draw lists
//!
//! A [`Scene`] is a background color plus an ordered list of shapes, stored
//! as JSON and replayed through a [`DrawingContext`] every frame.

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::display::DrawableObject;
use crate::draw::{DrawingContext, Point, ShapeOptions, Stroke};
use crate::error::Result;
use crate::font::Font;

fn default_thickness() -> i32 {
    1
}

fn default_background() -> Color {
    Color::BLACK
}

/// One draw call of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Pixel {
        x: i32,
        y: i32,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        #[serde(default = "default_thickness")]
        thickness: i32,
        color: Color,
    },
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
        #[serde(default)]
        stroke: Option<Stroke>,
        #[serde(default)]
        rotation: f32,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        color: Color,
        #[serde(default)]
        stroke: Option<Stroke>,
    },
    Triangle {
        a: Point,
        b: Point,
        c: Point,
        color: Color,
        #[serde(default)]
        stroke: Option<Stroke>,
    },
    Polygon {
        corners: Vec<Point>,
        color: Color,
        #[serde(default)]
        stroke: Option<Stroke>,
    },
    FloodFill {
        x: i32,
        y: i32,
        color: Color,
    },
    Tint {
        color: Color,
        factor: f32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    },
}

impl ShapeSpec {
    fn apply(&self, ctx: &mut DrawingContext<'_>, font: Option<&Font>) -> Result<()> {
        match self {
            ShapeSpec::Pixel { x, y, color } => {
                ctx.pixel(*x, *y, *color)?;
            },
            ShapeSpec::Line {
                from,
                to,
                thickness,
                color,
            } => {
                ctx.line(*from, *to, *thickness, *color)?;
            },
            ShapeSpec::Rectangle {
                x,
                y,
                width,
                height,
                color,
                stroke,
                rotation,
            } => {
                let options = ShapeOptions {
                    stroke: *stroke,
                    rotation: *rotation,
                };
                ctx.rectangle(*x, *y, *width, *height, *color, &options)?;
            },
            ShapeSpec::Circle {
                x,
                y,
                radius,
                color,
                stroke,
            } => {
                let options = ShapeOptions {
                    stroke: *stroke,
                    ..ShapeOptions::default()
                };
                ctx.circle(*x, *y, *radius, *color, &options)?;
            },
            ShapeSpec::Triangle {
                a,
                b,
                c,
                color,
                stroke,
            } => {
                ctx.triangle(*a, *b, *c, *color, *stroke)?;
            },
            ShapeSpec::Polygon {
                corners,
                color,
                stroke,
            } => {
                ctx.polygon(corners, *color, *stroke)?;
            },
            ShapeSpec::FloodFill { x, y, color } => {
                ctx.flood_fill(*x, *y, *color)?;
            },
            ShapeSpec::Tint {
                color,
                factor,
                x,
                y,
                width,
                height,
            } => {
                ctx.tint_region(*color, *factor, *x, *y, *width, *height)?;
            },
            ShapeSpec::Text { text, x, y, color } => match font {
                Some(font) => {
                    ctx.text(font, text, *x, *y, *color)?;
                },
                None => warn!("Skipping text {:?}: no font loaded", text),
            },
        }
        Ok(())
    }
}

/// A background color and the shapes drawn over it, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: default_background(),
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn add_shape(&mut self, shape: ShapeSpec) {
        self.shapes.push(shape);
    }

    /// Clear `target` to the background and replay every shape
    pub fn draw<D: DrawableObject>(&self, target: &mut D, font: Option<&Font>) -> Result<()> {
        target.buffer_mut().clear(self.background);
        let mut ctx = target.draw();
        for shape in &self.shapes {
            shape.apply(&mut ctx, font)?;
        }
        ctx.stop_drawing()?;
        Ok(())
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let scene: Self = serde_json::from_str(&json)?;
        debug!(
            "Loaded scene {:?} with {} shapes from {}",
            scene.name,
            scene.shapes.len(),
            path.display()
        );
        Ok(scene)
    }

    /// The scene the binary shows when none is given
    pub fn demo(width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let mut scene = Self::new("demo").with_background(Color::from_rgba(16, 16, 32, 255));

        scene.add_shape(ShapeSpec::Rectangle {
            x: w / 8,
            y: h / 8,
            width: (w / 3).max(1),
            height: (h / 3).max(1),
            color: Color::RED,
            stroke: Some(Stroke::new(Color::WHITE, 2)),
            rotation: 0.0,
        });
        scene.add_shape(ShapeSpec::Rectangle {
            x: w / 2,
            y: h / 8,
            width: (w / 3).max(1),
            height: (h / 4).max(1),
            color: Color::CYAN,
            stroke: None,
            rotation: 0.4,
        });
        scene.add_shape(ShapeSpec::Circle {
            x: w / 4,
            y: h * 3 / 4,
            radius: (w.min(h) / 6).max(1),
            color: Color::YELLOW,
            stroke: Some(Stroke::new(Color::MAGENTA, 3)),
        });
        scene.add_shape(ShapeSpec::Triangle {
            a: Point::new(w / 2, h * 7 / 8),
            b: Point::new(w * 7 / 8, h * 7 / 8),
            c: Point::new(w * 11 / 16, h / 2),
            color: Color::GREEN,
            stroke: None,
        });
        scene.add_shape(ShapeSpec::Line {
            from: Point::new(0, h - 1),
            to: Point::new(w - 1, 0),
            thickness: 3,
            color: Color::WHITE,
        });
        scene.add_shape(ShapeSpec::Tint {
            color: Color::BLUE,
            factor: 0.25,
            x: 0,
            y: 0,
            width: w,
            height: h / 10,
        });
        scene
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled")
    }
}
