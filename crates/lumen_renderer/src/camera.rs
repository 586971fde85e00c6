//! Camera for primary ray generation.

use lumen_core::{CameraSettings, ImageSettings};
use lumen_math::{sampling::gen_f64, Ray, Vec3};
use rand::RngCore;

use crate::RenderError;

/// Pinhole camera looking down +Z through a screen plane.
///
/// Pixel (x, y) maps to the screen point `((x - w/2) * s, (h/2 - y) * s, d)`
/// relative to the eye, where `s = scene_span / w` and `d` is the screen
/// distance. Pixels are square, so the vertical span follows the aspect ratio.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    position: Vec3,
    screen_distance: f64,
    pixel_size: f64,
    jitter: bool,
}

impl Camera {
    /// Create a camera for a `width` x `height` image.
    pub fn new(
        width: u32,
        height: u32,
        position: Vec3,
        screen_distance: f64,
        scene_span: f64,
    ) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidCamera(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        if !(screen_distance.is_finite() && screen_distance > 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "screen distance must be positive, got {screen_distance}"
            )));
        }
        if !(scene_span.is_finite() && scene_span > 0.0) {
            return Err(RenderError::InvalidCamera(format!(
                "scene span must be positive, got {scene_span}"
            )));
        }

        Ok(Self {
            image_width: width,
            image_height: height,
            position,
            screen_distance,
            pixel_size: scene_span / width as f64,
            jitter: false,
        })
    }

    pub fn from_settings(image: &ImageSettings, camera: &CameraSettings) -> Result<Self, RenderError> {
        Self::new(
            image.width,
            image.height,
            camera.position,
            camera.screen_distance,
            camera.scene_span,
        )
    }

    /// Enable sub-pixel jitter for anti-aliasing.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Scene-space point on the screen plane for continuous pixel
    /// coordinates (px, py), relative to the eye.
    fn screen_offset(&self, px: f64, py: f64) -> Vec3 {
        let x = (px - self.image_width as f64 / 2.0) * self.pixel_size;
        let y = (self.image_height as f64 / 2.0 - py) * self.pixel_size;
        Vec3::new(x, y, self.screen_distance)
    }

    /// Generate the primary ray for pixel (x, y).
    ///
    /// Without jitter the ray passes through the pixel's corner coordinate
    /// and `rng` is not touched.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let (dx, dy) = if self.jitter {
            (gen_f64(rng), gen_f64(rng))
        } else {
            (0.0, 0.0)
        };

        // screen_distance > 0, so the offset is never zero-length
        let direction = self.screen_offset(x as f64 + dx, y as f64 + dy).normalize();
        Ray::from_unit(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn default_camera() -> Camera {
        Camera::from_settings(&ImageSettings::default(), &CameraSettings::default()).unwrap()
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let camera = Camera::new(100, 100, Vec3::new(0.0, 0.0, -5.0), 5.0, 10.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(50, 50, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, -5.0));
        assert!((ray.direction() - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_corner_ray_maps_to_screen_corner() {
        let camera = Camera::new(100, 100, Vec3::new(0.0, 0.0, -5.0), 5.0, 10.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        // Top-left pixel is at (-5, 5) on the z = 0 screen plane
        let ray = camera.get_ray(0, 0, &mut rng);
        let expected = Vec3::new(-5.0, 5.0, 5.0).normalize();
        assert!((ray.direction() - expected).length() < 1e-12);
        let t = 5.0 / ray.direction().z;
        assert!((ray.at(t) - Vec3::new(-5.0, 5.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_default_camera_matches_settings() {
        let camera = default_camera();
        assert_eq!(camera.image_width, 101);
        assert_eq!(camera.image_height, 101);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let camera = Camera::new(10, 10, Vec3::ZERO, 1.0, 10.0)
            .unwrap()
            .with_jitter(true);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..1000 {
            let ray = camera.get_ray(3, 7, &mut rng);
            let p = ray.at(1.0 / ray.direction().z);
            // Pixel (3, 7) covers x in [-2, -1), y in (-3, -2]
            assert!(p.x >= -2.0 - 1e-9 && p.x < -1.0 + 1e-9, "{p:?}");
            assert!(p.y > -3.0 - 1e-9 && p.y <= -2.0 + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn test_invalid_camera_rejected() {
        assert!(Camera::new(0, 10, Vec3::ZERO, 1.0, 1.0).is_err());
        assert!(Camera::new(10, 10, Vec3::ZERO, 0.0, 1.0).is_err());
        assert!(Camera::new(10, 10, Vec3::ZERO, 1.0, f64::NAN).is_err());
    }
}
