use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use easel::{Command, Config, DrawableObject, Font, Scene, Surface, Window, WindowOptions};
use log::{error, info, warn};

#[cfg(feature = "sdl")]
fn open_surface(config: &Config) -> easel::Result<Box<dyn Surface>> {
    Ok(Box::new(easel::SdlSurface::new(
        "easel",
        config.width,
        config.height,
        config.vsync,
    )?))
}

#[cfg(not(feature = "sdl"))]
fn open_surface(config: &Config) -> easel::Result<Box<dyn Surface>> {
    info!("Built without the sdl feature, rendering headless");
    Ok(Box::new(easel::MemorySurface::new(config.width, config.height)))
}

fn load_font(config: &Config) -> easel::Result<Option<Font>> {
    let Some(path) = &config.font else {
        return Ok(None);
    };
    let font = Font::from_json(&fs::read_to_string(path)?)?.with_options(config.font_options);
    info!("Loaded font from {}", path.display());
    Ok(Some(font))
}

fn run(config: &Config) -> easel::Result<()> {
    let scene = match &config.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::demo(config.width, config.height),
    };
    let font = load_font(config)?;

    // A headless surface never asks to close
    let frame_limit = config.frames.or_else(|| {
        if cfg!(feature = "sdl") {
            None
        } else {
            warn!("No --frames given, rendering a single frame");
            Some(1)
        }
    });

    let mut surface = open_surface(config)?;
    let mut window = Window::new(
        surface.as_mut(),
        WindowOptions::new(config.width as i32, config.height as i32),
    )?;
    info!(
        "Drawing scene {:?} ({} shapes) at {}x{}",
        scene.name,
        scene.shapes.len(),
        window.size_x(),
        window.size_y()
    );

    let start = Instant::now();
    let mut frames = 0u64;
    while window.is_open() {
        scene.draw(&mut window, font.as_ref())?;
        window.render()?;
        frames += 1;

        if frame_limit.is_some_and(|limit| frames >= limit) {
            window.close();
        }
        window.pump();
    }

    let elapsed = start.elapsed();
    info!(
        "Rendered {} frames in {:.2?} ({:.1} fps)",
        frames,
        elapsed,
        frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );

    if let Some(path) = &config.output {
        let mut out = BufWriter::new(File::create(path)?);
        window.buffer().write_ppm(&mut out)?;
        out.flush()?;
        info!("Wrote last frame to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{}", Config::usage());
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            eprintln!("{e}\n\n{}", Config::usage());
            return ExitCode::FAILURE;
        },
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}
