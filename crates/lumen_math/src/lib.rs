//! Lumen Math - vector, ray and sampling primitives for the path tracer.
//!
//! Vectors are glam's double precision `DVec3`, re-exported as [`Vec3`].
//! glam already provides the arithmetic (component-wise `*` and `/`,
//! scalar scaling, compound assignment, `dot`, `cross`); [`Vec3Ext`] adds the
//! guarded normalization the renderer relies on.

use thiserror::Error;

pub use glam::{dvec3, DVec3};

mod aabb;
mod interval;
mod ray;
pub mod sampling;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{OrthonormalBasis, SamplingStrategy};

/// 3-component double precision vector.
pub type Vec3 = DVec3;

/// Linear RGB radiance or reflectance triple.
pub type Color = Vec3;

/// Errors raised by vector operations that have no meaningful result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot normalize a zero-length or non-finite vector")]
    ZeroLength,
}

pub type MathResult<T> = Result<T, MathError>;

/// Norm helpers and checked normalization for [`Vec3`].
pub trait Vec3Ext: Sized {
    /// Euclidean length.
    fn norm(self) -> f64;

    /// Squared length, for comparisons that don't need the square root.
    fn norm2(self) -> f64;

    /// Unit vector in the same direction, or `MathError::ZeroLength`.
    fn normalized_checked(self) -> MathResult<Self>;

    /// Normalize in place. The receiver is left untouched on error.
    fn normalize_in_place(&mut self) -> MathResult<&mut Self>;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn norm(self) -> f64 {
        self.length()
    }

    #[inline]
    fn norm2(self) -> f64 {
        self.length_squared()
    }

    fn normalized_checked(self) -> MathResult<Self> {
        let n = self.norm();
        if n == 0.0 || !n.is_finite() {
            return Err(MathError::ZeroLength);
        }
        Ok(self / n)
    }

    fn normalize_in_place(&mut self) -> MathResult<&mut Self> {
        *self = self.normalized_checked()?;
        Ok(self)
    }
}
