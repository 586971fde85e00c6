//! Direction sampling for the light-transport estimator.
//!
//! Local samples use a y-up convention: the local `y` component is the one
//! that ends up along the surface normal after [`align_to_normal`].

use std::f64::consts::PI;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{Vec3, Vec3Ext};

/// Below this cross-product magnitude the primary reference axis is treated
/// as parallel to the normal.
pub const PARALLEL_THRESHOLD: f64 = 1e-4;

/// Density of uniform sampling over the unit hemisphere.
pub const UNIFORM_HEMISPHERE_PDF: f64 = 1.0 / (2.0 * PI);

const PRIMARY_REFERENCE: Vec3 = Vec3::Z;
const SECONDARY_REFERENCE: Vec3 = Vec3::Y;

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniformly distributed point on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = 2.0 * gen_f64(rng) - 1.0;
    let phi = 2.0 * PI * gen_f64(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(r * phi.cos(), z, r * phi.sin())
}

/// Uniformly distributed direction on the local upper (y >= 0) hemisphere.
///
/// Folds a full-sphere sample, which keeps the distribution uniform.
pub fn uniform_hemisphere_sample(rng: &mut dyn RngCore) -> Vec3 {
    let v = random_unit_vector(rng);
    Vec3::new(v.x, v.y.abs(), v.z)
}

/// Cosine-weighted direction on the local upper hemisphere (Malley's method).
pub fn cosine_hemisphere_sample(rng: &mut dyn RngCore) -> Vec3 {
    let u = gen_f64(rng);
    let phi = 2.0 * PI * gen_f64(rng);
    let r = u.sqrt();

    Vec3::new(r * phi.cos(), (1.0 - u).max(0.0).sqrt(), r * phi.sin())
}

/// Density matching [`cosine_hemisphere_sample`] for a direction at
/// `cos_theta` from the normal.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: f64) -> f64 {
    cos_theta.max(0.0) / PI
}

/// Orthonormal frame {tangent, normal, bitangent} around a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthonormalBasis {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub bitangent: Vec3,
}

impl OrthonormalBasis {
    /// Build a frame around `normal`, which must be unit length.
    pub fn from_normal(normal: Vec3) -> Self {
        debug_assert!(
            (normal.norm2() - 1.0).abs() < 1e-6,
            "basis normal {normal:?} is not normalized"
        );

        let mut reference = PRIMARY_REFERENCE.cross(normal);
        if reference.norm() < PARALLEL_THRESHOLD {
            reference = SECONDARY_REFERENCE.cross(normal);
        }
        // The two references are orthogonal, so at most one of them can be
        // parallel to a unit normal and `reference` is never degenerate here.
        let tangent = reference / reference.norm();
        let bitangent = normal.cross(tangent);

        Self {
            tangent,
            normal,
            bitangent,
        }
    }

    /// Map a local (x, y, z) sample into world space, y along the normal.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local.x * self.tangent + local.y * self.normal + local.z * self.bitangent
    }

    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        Vec3::new(
            world.dot(self.tangent),
            world.dot(self.normal),
            world.dot(self.bitangent),
        )
    }
}

/// Rotate a local y-up direction onto the world-space `normal`.
pub fn align_to_normal(local: Vec3, normal: Vec3) -> Vec3 {
    OrthonormalBasis::from_normal(normal).to_world(local)
}

/// How bounce directions are drawn. Each variant pairs a sampler with
/// its own density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    #[default]
    UniformHemisphere,
    CosineWeighted,
}

impl SamplingStrategy {
    /// Draw a local y-up direction.
    pub fn sample_local(self, rng: &mut dyn RngCore) -> Vec3 {
        match self {
            SamplingStrategy::UniformHemisphere => uniform_hemisphere_sample(rng),
            SamplingStrategy::CosineWeighted => cosine_hemisphere_sample(rng),
        }
    }

    /// Density of `direction` around the unit `normal`.
    pub fn pdf(self, direction: Vec3, normal: Vec3) -> f64 {
        match self {
            SamplingStrategy::UniformHemisphere => UNIFORM_HEMISPHERE_PDF,
            SamplingStrategy::CosineWeighted => cosine_hemisphere_pdf(direction.dot(normal)),
        }
    }

    /// Draw a world-space direction in the hemisphere around `normal`,
    /// returned with its density.
    pub fn sample(self, normal: Vec3, rng: &mut dyn RngCore) -> (Vec3, f64) {
        let direction = align_to_normal(self.sample_local(rng), normal);
        (direction, self.pdf(direction, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_normals() -> Vec<Vec3> {
        let mut normals = vec![
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::X,
            -Vec3::Y,
            -Vec3::Z,
            Vec3::new(1e-6, 0.0, 1.0).normalize(),
            Vec3::new(1.0, 1.0, 1.0).normalize(),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            normals.push(random_unit_vector(&mut rng));
        }
        normals
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for n in test_normals() {
            let basis = OrthonormalBasis::from_normal(n);

            assert!((basis.tangent.norm() - 1.0).abs() < 1e-9, "tangent for {n:?}");
            assert!((basis.normal.norm() - 1.0).abs() < 1e-9, "normal for {n:?}");
            assert!((basis.bitangent.norm() - 1.0).abs() < 1e-9, "bitangent for {n:?}");
            assert!(basis.tangent.dot(basis.normal).abs() < 1e-9);
            assert!(basis.tangent.dot(basis.bitangent).abs() < 1e-9);
            assert!(basis.normal.dot(basis.bitangent).abs() < 1e-9);
        }
    }

    #[test]
    fn test_align_preserves_magnitude() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in test_normals() {
            let v = 3.5 * random_unit_vector(&mut rng);
            let aligned = align_to_normal(v, n);
            assert!((aligned.norm() - v.norm()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_align_maps_up_to_normal() {
        for n in test_normals() {
            let aligned = align_to_normal(Vec3::Y, n);
            assert!((aligned - n).norm() < 1e-9);
        }
    }

    #[test]
    fn test_to_local_inverts_to_world() {
        let basis = OrthonormalBasis::from_normal(Vec3::new(0.0, 0.6, 0.8));
        let v = Vec3::new(0.3, -1.2, 2.0);

        assert!((basis.to_local(basis.to_world(v)) - v).norm() < 1e-12);
    }

    #[test]
    fn test_random_unit_vector_is_isotropic() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = 200_000;

        let mut mean = Vec3::ZERO;
        let mut second_moment = Vec3::ZERO;
        let mut mean_norm = 0.0;
        for _ in 0..n {
            let v = random_unit_vector(&mut rng);
            mean += v;
            second_moment += v * v;
            mean_norm += v.norm();
        }
        mean /= n as f64;
        second_moment /= n as f64;
        mean_norm /= n as f64;

        assert!((mean_norm - 1.0).abs() < 1e-9);
        // Standard error per axis is about 1/sqrt(3n) ~ 0.0013.
        assert!(mean.abs().max_element() < 0.01, "mean {mean:?}");
        for axis in 0..3 {
            assert!(
                (second_moment[axis] - 1.0 / 3.0).abs() < 0.01,
                "second moment {second_moment:?}"
            );
        }
    }

    #[test]
    fn test_hemisphere_samples_face_up() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let u = uniform_hemisphere_sample(&mut rng);
            let c = cosine_hemisphere_sample(&mut rng);
            assert!(u.y >= 0.0);
            assert!(c.y >= 0.0);
            assert!((u.norm() - 1.0).abs() < 1e-9);
            assert!((c.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sampled_directions_stay_above_surface() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in test_normals() {
            for strategy in [SamplingStrategy::UniformHemisphere, SamplingStrategy::CosineWeighted] {
                let (dir, pdf) = strategy.sample(n, &mut rng);
                assert!(dir.dot(n) >= -1e-9);
                assert!(pdf >= 0.0);
            }
        }
    }

    #[test]
    fn test_pdf_pairs_with_sampler() {
        // Estimating the projected solid angle of the hemisphere, whose
        // exact value is pi, checks that each sampler matches its density.
        let mut rng = StdRng::seed_from_u64(99);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        let n = 100_000;

        for strategy in [SamplingStrategy::UniformHemisphere, SamplingStrategy::CosineWeighted] {
            let mut estimate = 0.0;
            let mut used = 0;
            for _ in 0..n {
                let (dir, pdf) = strategy.sample(normal, &mut rng);
                if pdf > 0.0 {
                    estimate += dir.dot(normal).max(0.0) / pdf;
                    used += 1;
                }
            }
            estimate /= used as f64;
            assert!((estimate - PI).abs() < 0.03, "{strategy:?} estimate {estimate}");
        }
    }

    #[test]
    fn test_strategy_deserializes_snake_case() {
        let s: SamplingStrategy = serde_json::from_str("\"cosine_weighted\"").unwrap();
        assert_eq!(s, SamplingStrategy::CosineWeighted);
        assert_eq!(SamplingStrategy::default(), SamplingStrategy::UniformHemisphere);
    }
}
