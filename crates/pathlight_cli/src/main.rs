mod progress;
mod scenes;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pathlight_core::{load_scene, RenderSettings, SceneDescription};
use pathlight_renderer::{render, Camera, Canvas, Scene};
use progress::Progress;
use scenes::BuiltinScene;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Render a scene of spheres with a CPU path tracer and save it as PNG.
#[derive(Parser, Debug)]
#[command(name = "pathlight", version)]
pub struct Args {
    #[arg(long, value_enum, default_value_t)]
    /// Built-in scene to render when no input file is given
    scene: BuiltinScene,

    #[arg(short, long, conflicts_with = "scene")]
    /// JSON scene description to render
    input: Option<PathBuf>,

    #[arg(short, long, default_value = "output.png")]
    /// Where to write the PNG image
    output: PathBuf,

    #[arg(long)]
    /// Image width in pixels
    width: Option<u32>,

    #[arg(long)]
    /// Image height in pixels
    height: Option<u32>,

    #[arg(long = "spp")]
    /// Samples per pixel
    samples_per_pixel: Option<u32>,

    #[arg(long)]
    /// Edge length of the square render tiles
    tile_size: Option<u32>,

    #[arg(long)]
    /// Maximum number of bounces per path
    max_bounces: Option<u32>,

    #[arg(long)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the rendering is deterministic.
    seed: Option<u64>,

    #[arg(short = 'j', long)]
    /// Worker threads, defaults to one per core
    threads: Option<usize>,

    #[arg(long)]
    /// Apply gamma 2 correction before quantizing
    gamma: bool,
}

impl Args {
    /// Command line flags win over the scene file.
    fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(spp) = self.samples_per_pixel {
            settings.samples_per_pixel = spp;
        }
        if let Some(tile_size) = self.tile_size {
            settings.tile_size = tile_size;
        }
        if let Some(max_bounces) = self.max_bounces {
            settings.max_bounces = max_bounces;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.threads.is_some() {
            settings.threads = self.threads;
        }
    }
}

fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut description = match &args.input {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            log::info!("Using built-in scene {:?}", args.scene);
            args.scene.description()
        }
    };

    args.apply_overrides(&mut description.render);
    pathlight_core::loader::validate(&description).context("invalid render settings")?;
    Ok(description)
}

fn save_png(canvas: &Canvas, gamma: bool, path: &Path) -> Result<()> {
    let pixels = canvas.to_rgba8(gamma);
    let bytes: &[u8] = bytemuck::cast_slice(&pixels);
    let image = image::RgbaImage::from_raw(canvas.width(), canvas.height(), bytes.to_vec())
        .context("pixel buffer does not match image dimensions")?;

    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Saved {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let description = load_description(&args)?;
    let settings = &description.render;

    log::info!("building scene");
    let scene = Scene::from_description(&description)?;
    let camera = Camera::from_settings(&description.camera, settings.aspect_ratio())?;

    let progress = Progress::new(settings.pixel_count());
    let canvas = std::thread::scope(|s| {
        s.spawn(|| progress.report(PROGRESS_INTERVAL));
        let result = render(&scene, &camera, settings, &progress);
        progress.finish();
        result
    })?;

    save_png(&canvas, args.gamma, &args.output)
}
