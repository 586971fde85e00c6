//! Surface reflectance and emission.

use std::f64::consts::FRAC_1_PI;

use lumen_core::MaterialDescription;
use lumen_math::{Color, Vec3};

/// Lambertian (ideal diffuse) surface, optionally emitting light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
    emit: Color,
}

impl Lambertian {
    /// Create a non-emitting diffuse surface.
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo,
            emit: Color::ZERO,
        }
    }

    /// Create a diffuse surface that also emits `emit`.
    pub fn emissive(albedo: Color, emit: Color) -> Self {
        Self { albedo, emit }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Reflectance for light arriving along `_incoming` and leaving along
    /// `_outgoing`. Constant for a diffuse surface; the 1/pi keeps the
    /// hemispherical integral of `brdf * cos` equal to the albedo.
    #[inline]
    pub fn brdf(&self, _outgoing: Vec3, _incoming: Vec3) -> Color {
        self.albedo * FRAC_1_PI
    }

    /// Emitted radiance, identical in every direction.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.emit
    }
}

impl From<&MaterialDescription> for Lambertian {
    fn from(desc: &MaterialDescription) -> Self {
        Self::emissive(desc.diffuse_color, desc.emissive_color)
    }
}
