//! Monte Carlo estimator for the rendering equation.
//!
//! ```text
//!   L_o(x, w_o) = L_e(x) + ∫ f_r(x, w_o, w_i) L_i(x, w_i) |cos θ_i| dw_i
//! ```
//!
//! One direction is sampled per bounce. The path is walked iteratively with
//! a running throughput, which evaluates exactly the recursive form
//! `L_o = (L_e + f_r / pdf * cos * L_i) / rr` without growing the stack.
//!
//! Paths are truncated to emission only at `max_bounces`. That truncation
//! drops light from longer paths and is an accepted bias; russian roulette
//! on its own is unbiased.

use lumen_core::RenderSettings;
use lumen_math::{sampling::gen_f64, Color, Ray, SamplingStrategy, Vec3};
use rand::RngCore;

use crate::{Hit, Scene};

/// Offset applied along the surface normal when spawning bounce rays.
pub const RAY_EPSILON: f64 = 1e-6;

/// Estimator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerSettings {
    pub max_bounces: u32,
    /// Continuation probability in (0, 1]
    pub russian_roulette: f64,
    pub background: Color,
    pub sampling: SamplingStrategy,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for TracerSettings {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            max_bounces: settings.max_bounces,
            russian_roulette: settings.russian_roulette,
            background: settings.background,
            sampling: settings.sampling,
        }
    }
}

/// Path tracer over a read-only scene. Cheap to copy, and safe to share
/// between threads as long as each thread brings its own random stream.
#[derive(Debug, Clone, Copy)]
pub struct PathTracer<'a> {
    scene: &'a Scene,
    settings: TracerSettings,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a Scene, settings: TracerSettings) -> Self {
        Self { scene, settings }
    }

    pub fn settings(&self) -> &TracerSettings {
        &self.settings
    }

    /// Radiance arriving at `ray.origin` from direction `-ray.direction`.
    ///
    /// Escaping rays return the background without drawing any random
    /// numbers.
    pub fn incoming_light(&self, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        match self.scene.find_nearest_hit(ray) {
            Some(hit) => self.outgoing_light(&hit, -ray.direction(), depth, rng),
            None => self.settings.background,
        }
    }

    /// Radiance leaving `hit` along the unit direction `outgoing`, with
    /// `depth` bounces already taken.
    pub fn outgoing_light(
        &self,
        hit: &Hit<'_>,
        outgoing: Vec3,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let rr = self.settings.russian_roulette;

        let mut radiance = Color::ZERO;
        let mut throughput = Color::ONE;
        let mut hit = *hit;
        let mut outgoing = outgoing;
        let mut depth = depth;

        loop {
            if gen_f64(rng) >= rr {
                break;
            }
            throughput /= rr;

            let object = hit.object;
            radiance += throughput * object.emitted();

            if depth >= self.settings.max_bounces {
                break;
            }

            // Shade the side the ray arrived from
            let mut normal = hit.normal();
            if outgoing.dot(normal) < 0.0 {
                normal = -normal;
            }

            let (incoming, pdf) = self.settings.sampling.sample(normal, rng);
            let cos_theta = incoming.dot(normal).max(0.0);
            if pdf <= 0.0 || cos_theta == 0.0 {
                break;
            }
            throughput *= object.brdf(outgoing, incoming) * (cos_theta / pdf);

            let bounce = Ray::from_unit(hit.point + RAY_EPSILON * normal, incoming);
            match self.scene.find_nearest_hit(&bounce) {
                Some(next) => {
                    hit = next;
                    outgoing = -incoming;
                    depth += 1;
                }
                None => {
                    radiance += throughput * self.settings.background;
                    break;
                }
            }
        }

        radiance
    }
}
