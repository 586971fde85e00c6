use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{load_scene, SceneDescription};
use lumen_renderer::{RenderControl, Renderer};

/// Render a scene of diffuse spheres and boxes with Monte Carlo path tracing.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Cli {
    /// Scene description (JSON). The built-in two-sphere scene is used if omitted.
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PNG image
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    bounces: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (1 renders serially)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Abort the render after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Log per-bucket progress
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line values take precedence over the scene file.
    fn apply_overrides(&self, desc: &mut SceneDescription) {
        if let Some(width) = self.width {
            desc.image.width = width;
        }
        if let Some(height) = self.height {
            desc.image.height = height;
        }
        if let Some(samples) = self.samples {
            desc.render.samples_per_pixel = samples;
        }
        if let Some(bounces) = self.bounces {
            desc.render.max_bounces = bounces;
        }
        if let Some(seed) = self.seed {
            desc.render.seed = Some(seed);
        }
        if let Some(threads) = self.threads {
            desc.render.threads = Some(threads);
        }
    }

    fn control(&self) -> Result<RenderControl> {
        let control = RenderControl::new();
        match self.time_limit {
            Some(secs) => {
                let limit = Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("invalid time limit: {secs}"))?;
                Ok(control.with_time_limit(limit))
            }
            None => Ok(control),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    log::info!("Starting Lumen");

    let mut desc = match &cli.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the built-in scene");
            SceneDescription::default()
        }
    };
    cli.apply_overrides(&mut desc);

    let renderer = Renderer::new(&desc).context("invalid render setup")?;
    let image = renderer
        .render(&cli.control()?)
        .context("render failed")?;

    let average = image.average();
    log::info!(
        "Average radiance ({:.4}, {:.4}, {:.4})",
        average.x,
        average.y,
        average.z
    );

    image
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}
