//! Frame driver.
//!
//! Implements the per-pixel Monte Carlo average and the bucketed frame loop:
//! - One camera ray per pixel, `samples_per_pixel` independent paths averaged
//! - Buckets rendered serially or on a rayon pool, each with its own seed
//! - Cancellation and time limits checked between buckets

use std::time::Instant;

use lumen_core::{ConfigError, RenderSettings, SceneDescription};
use rand::RngCore;
use rayon::prelude::*;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
use crate::{Camera, Color, ImageBuffer, ImageError, PathTracer, RenderControl, Scene, TracerSettings};

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid scene configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render cancelled")]
    Cancelled,
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render a single pixel with multi-sampling.
///
/// Each sample regenerates the camera ray (which only draws random numbers
/// when jitter is on) and traces an independent path. `samples_per_pixel`
/// must be at least 1; `Renderer::new` rejects scenes that ask for zero.
pub(crate) fn render_pixel(
    camera: &Camera,
    tracer: &PathTracer<'_>,
    x: u32,
    y: u32,
    samples_per_pixel: u32,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(samples_per_pixel > 0, "pixel rendered with zero samples");
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += tracer.incoming_light(&ray, 0, rng);
    }

    // Average the samples
    pixel_color / samples_per_pixel as f64
}

/// A validated scene ready to render.
#[derive(Debug, Clone)]
pub struct Renderer {
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,
    seed: u64,
}

impl Renderer {
    /// Validate `desc` and build the runtime scene and camera.
    ///
    /// A missing seed is drawn from the OS and logged, so any render can
    /// be reproduced.
    pub fn new(desc: &SceneDescription) -> RenderResult<Self> {
        desc.validate()?;

        let camera = Camera::from_settings(&desc.image, &desc.camera)?.with_jitter(desc.render.jitter);
        let scene = Scene::from_description(desc);
        let seed = desc.render.seed.unwrap_or_else(rand::random);

        Ok(Self {
            scene,
            camera,
            settings: desc.render.clone(),
            seed,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tracer(&self) -> PathTracer<'_> {
        PathTracer::new(&self.scene, TracerSettings::from(&self.settings))
    }

    /// Render the averaged value of pixel (x, y).
    pub fn render_pixel(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        render_pixel(&self.camera, &self.tracer(), x, y, self.settings.samples_per_pixel, rng)
    }

    /// Render the whole frame.
    pub fn render(&self, control: &RenderControl) -> RenderResult<ImageBuffer> {
        let width = self.camera.image_width;
        let height = self.camera.image_height;
        let mut image = ImageBuffer::new(width, height)?;

        let buckets = generate_buckets(width, height, self.settings.bucket_size);
        let threads = self.settings.threads;

        log::info!(
            "Rendering {}x{} @ {} spp, {} bounces, rr {}, seed {}, {} buckets, threads {}",
            width,
            height,
            self.settings.samples_per_pixel,
            self.settings.max_bounces,
            self.settings.russian_roulette,
            self.seed,
            buckets.len(),
            threads.map_or_else(|| "auto".to_string(), |n| n.to_string())
        );

        let start = Instant::now();
        let results = match threads {
            Some(1) => self.render_serial(&buckets, control)?,
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
                pool.install(|| self.render_parallel(&buckets, control))?
            }
            None => self.render_parallel(&buckets, control)?,
        };

        for result in &results {
            for (x, y, color) in result.iter_pixels() {
                image.set(x, y, color)?;
            }
        }

        log::info!("Rendered in {:?}", start.elapsed());
        Ok(image)
    }

    fn render_one(&self, bucket: &Bucket, control: &RenderControl) -> RenderResult<BucketResult> {
        if control.should_stop() {
            return Err(RenderError::Cancelled);
        }
        Ok(render_bucket(
            bucket,
            &self.camera,
            &self.tracer(),
            self.settings.samples_per_pixel,
            self.seed,
        ))
    }

    fn render_serial(
        &self,
        buckets: &[Bucket],
        control: &RenderControl,
    ) -> RenderResult<Vec<BucketResult>> {
        buckets
            .iter()
            .map(|bucket| self.render_one(bucket, control))
            .collect::<RenderResult<Vec<_>>>()
            .inspect_err(|_| log::warn!("Render stopped before completion"))
    }

    fn render_parallel(
        &self,
        buckets: &[Bucket],
        control: &RenderControl,
    ) -> RenderResult<Vec<BucketResult>> {
        buckets
            .par_iter()
            .map(|bucket| self.render_one(bucket, control))
            .collect::<RenderResult<Vec<_>>>()
            .inspect_err(|_| log::warn!("Render stopped before completion"))
    }
}

/// Validate and render a scene description in one call.
pub fn render(desc: &SceneDescription, control: &RenderControl) -> RenderResult<ImageBuffer> {
    Renderer::new(desc)?.render(control)
}
