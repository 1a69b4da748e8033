//! Configuration of the `easel` binary
//!
//! Values come from an optional JSON file (`--config PATH`) overridden by
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{Error, Result};
use crate::font::FontOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Stop after this many frames; `None` runs until the surface closes
    pub frames: Option<u64>,
    pub scene: Option<PathBuf>,
    pub font: Option<PathBuf>,
    /// Layout applied to the font loaded from `font`
    pub font_options: FontOptions,
    /// Where to write the last frame as PPM
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            frames: None,
            scene: None,
            font: None,
            font_options: FontOptions::default(),
            output: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    Help,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{flag}: {value:?} is not a valid number")))
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidArgument(format!("{flag} needs a value")))
}

impl Config {
    /// Load a JSON config file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Parse command-line arguments (without the program name)
    pub fn from_args<I, S>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let mut config = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| Error::InvalidArgument("--config needs a path".into()))?;
                Self::load(path)?
            },
            None => Self::default(),
        };

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();

            match flag {
                "--no-vsync" => config.vsync = false,
                "--width" | "-w" => {
                    config.width = parse_number(flag, value_of(&args, i, flag)?)?;
                    i += 1;
                },
                "--height" | "-h" => {
                    config.height = parse_number(flag, value_of(&args, i, flag)?)?;
                    i += 1;
                },
                "--resolution" | "-r" => {
                    // WxH, e.g. 1920x1080
                    let text = value_of(&args, i, flag)?;
                    let (w, h) = text.split_once('x').ok_or_else(|| {
                        Error::InvalidArgument(format!("{flag}: expected WxH, got {text:?}"))
                    })?;
                    config.width = parse_number(flag, w)?;
                    config.height = parse_number(flag, h)?;
                    i += 1;
                },
                "--frames" => {
                    config.frames = Some(parse_number(flag, value_of(&args, i, flag)?)?);
                    i += 1;
                },
                "--scene" => {
                    config.scene = Some(PathBuf::from(value_of(&args, i, flag)?));
                    i += 1;
                },
                "--font" => {
                    config.font = Some(PathBuf::from(value_of(&args, i, flag)?));
                    i += 1;
                },
                "--output" | "-o" => {
                    config.output = Some(PathBuf::from(value_of(&args, i, flag)?));
                    i += 1;
                },
                // already applied above
                "--config" => i += 1,
                "--help" => return Ok(Command::Help),
                other => {
                    return Err(Error::InvalidArgument(format!("unknown option {other:?}")));
                },
            }
            i += 1;
        }

        config.validate()?;
        Ok(Command::Run(config))
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(Error::InvalidArgument(format!(
                "resolution {}x{} is out of range",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn usage() -> String {
        format!(
            "Usage: easel [OPTIONS]

Options:
  --width W, -w W           Set window width (default: {DEFAULT_WIDTH})
  --height H, -h H          Set window height (default: {DEFAULT_HEIGHT})
  --resolution WxH, -r WxH  Set resolution (e.g., 1920x1080)
  --no-vsync                Disable VSync for uncapped framerate
  --frames N                Stop after N frames
  --scene PATH              Draw the scene stored in PATH (JSON)
  --font PATH               Font record (JSON) used by text shapes
  --output PATH, -o PATH    Write the last frame to PATH as PPM
  --config PATH             Read defaults from a JSON config file
  --help                    Show this help message"
        )
    }
}
