use crate::{MathResult, Vec3, Vec3Ext};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction so intersection code can
/// treat ray parameters as Euclidean distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails with `MathError::ZeroLength` for a degenerate direction.
    pub fn new(origin: Vec3, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: direction.normalized_checked()?,
        })
    }

    /// Create a ray from a direction the caller already knows is unit length.
    #[inline]
    pub fn from_unit(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            (direction.norm2() - 1.0).abs() < 1e-6,
            "ray direction {direction:?} is not normalized"
        );
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 4.0)).unwrap();

        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.direction(), Vec3::Z);
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert_eq!(Ray::new(Vec3::ZERO, Vec3::ZERO), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }
}
