//! Sphere primitive for ray tracing.

use lumen_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Ray parameter of the visible intersection, if any.
    ///
    /// Solves |o + t*d - c|^2 = r^2. With both roots ahead of the origin the
    /// nearer one is taken; with only the far root ahead the origin is inside
    /// the sphere and that root is taken; with both behind there is no hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (h - sqrtd) / a;
        let far = (h + sqrtd) / a;

        if Interval::NON_NEGATIVE.contains(near) {
            Some(near)
        } else if Interval::NON_NEGATIVE.contains(far) {
            Some(far)
        } else {
            None
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_front() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 3.0);
        let ray = Ray::from_unit(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let t = sphere.intersect(&ray).unwrap();
        let point = ray.at(t);
        assert!((point - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-9);
        assert!((sphere.normal_at(point) - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::X);

        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 2.0).abs() < 1e-9);
        assert!((sphere.normal_at(ray.at(t)) - Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);

        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Y);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_sphere_grazing_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, 5.0), 1.0);
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);

        // Tangent ray, zero discriminant
        let t = sphere.intersect(&ray).unwrap();
        assert!((t - 5.0).abs() < 1e-6);
    }
}
