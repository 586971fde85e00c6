//! Lumen Renderer - CPU Monte Carlo path tracing.
//!
//! An unbiased path tracer for small scenes of diffuse spheres and boxes:
//! - Linear nearest-hit query over a closed set of shapes
//! - Importance-sampled diffuse bounces with russian roulette
//! - Bucketed frame rendering, serial or parallel, reproducible from a seed

mod bucket;
mod camera;
mod control;
mod hittable;
mod image_buffer;
mod integrator;
mod material;
mod rectangle;
mod renderer;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use control::RenderControl;
pub use hittable::{Hit, Scene, SceneObject, Shape};
pub use image_buffer::{color_to_rgb, linear_to_gamma, ImageBuffer, ImageError, ImageResult, DISPLAY_GAMMA};
pub use integrator::{PathTracer, TracerSettings, RAY_EPSILON};
pub use material::Lambertian;
pub use rectangle::Rectangle;
pub use renderer::{render, RenderError, RenderResult, Renderer};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Ray, Vec3};
