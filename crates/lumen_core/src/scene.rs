//! Scene description types.
//!
//! This is the configuration side of a render: what objects exist, how the
//! camera is placed and how many samples to take. The renderer builds its
//! own runtime representation from a validated [`SceneDescription`].

use lumen_math::{Color, Interval, SamplingStrategy, Vec3};
use serde::{Deserialize, Serialize};

use crate::loader::{ConfigError, ConfigResult};

/// Surface response shared by every object variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    /// Diffuse reflectance (RGB, 0-1)
    #[serde(rename = "color")]
    pub diffuse_color: Color,

    /// Emitted radiance (RGB, 0-1), zero for non-emitters
    #[serde(rename = "emission")]
    pub emissive_color: Color,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            diffuse_color: Color::ONE,
            emissive_color: Color::ZERO,
        }
    }
}

impl MaterialDescription {
    pub fn new(diffuse_color: Color, emissive_color: Color) -> Self {
        Self {
            diffuse_color,
            emissive_color,
        }
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive_color.length_squared() > 0.0
    }
}

/// One entry of the scene's object list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Sphere {
        center: Vec3,
        radius: f64,
        #[serde(flatten)]
        material: MaterialDescription,
    },
    /// Axis-aligned box centered on `center` with full extents `size`.
    Rectangle {
        center: Vec3,
        size: Vec3,
        #[serde(flatten)]
        material: MaterialDescription,
    },
}

impl ObjectDescription {
    pub fn sphere(center: Vec3, radius: f64, material: MaterialDescription) -> Self {
        ObjectDescription::Sphere {
            center,
            radius,
            material,
        }
    }

    pub fn rectangle(center: Vec3, size: Vec3, material: MaterialDescription) -> Self {
        ObjectDescription::Rectangle {
            center,
            size,
            material,
        }
    }

    pub fn material(&self) -> &MaterialDescription {
        match self {
            ObjectDescription::Sphere { material, .. } => material,
            ObjectDescription::Rectangle { material, .. } => material,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ObjectDescription::Sphere { .. } => "sphere",
            ObjectDescription::Rectangle { .. } => "rectangle",
        }
    }

    fn validate(&self, index: usize) -> ConfigResult<()> {
        match self {
            ObjectDescription::Sphere { center, radius, .. } => {
                check_finite_vec(*center, &format!("objects[{index}].center"))?;
                check_finite(*radius, &format!("objects[{index}].radius"))?;
                if *radius <= 0.0 {
                    return Err(ConfigError::InvalidGeometry {
                        index,
                        reason: format!("sphere radius must be positive, got {radius}"),
                    });
                }
            }
            ObjectDescription::Rectangle { center, size, .. } => {
                check_finite_vec(*center, &format!("objects[{index}].center"))?;
                check_finite_vec(*size, &format!("objects[{index}].size"))?;
                if size.min_element() <= 0.0 {
                    return Err(ConfigError::InvalidGeometry {
                        index,
                        reason: format!("rectangle extents must be positive, got {size}"),
                    });
                }
            }
        }

        let material = self.material();
        check_unit_color(material.diffuse_color, index, "color")?;
        check_unit_color(material.emissive_color, index, "emission")?;
        Ok(())
    }
}

/// Output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: 101,
            height: 101,
        }
    }
}

/// Sampling and scheduling parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Independent path samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Bounce depth at which paths are truncated to emission only
    pub max_bounces: u32,
    /// Russian-roulette continuation probability, in (0, 1]
    pub russian_roulette: f64,
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// Bounce direction sampler
    pub sampling: SamplingStrategy,
    /// Jitter primary rays inside the pixel footprint
    pub jitter: bool,
    /// Seed for the per-bucket random streams; drawn at random when absent
    pub seed: Option<u64>,
    /// Edge length of the square render buckets, in pixels
    pub bucket_size: u32,
    /// Worker threads; `None` uses every core, `Some(1)` renders serially
    pub threads: Option<usize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            max_bounces: 5,
            russian_roulette: 1.0,
            background: Color::ZERO,
            sampling: SamplingStrategy::UniformHemisphere,
            jitter: false,
            seed: None,
            bucket_size: 32,
            threads: None,
        }
    }
}

/// Pinhole camera looking down +Z at a screen `screen_distance` away.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub screen_distance: f64,
    /// Width of the scene visible on the screen plane
    pub scene_span: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            screen_distance: 5.0,
            scene_span: 10.0,
        }
    }
}

/// Everything needed to render one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub image: ImageSettings,
    pub render: RenderSettings,
    pub camera: CameraSettings,
    /// Absent in a scene file means no objects, not the built-in scene.
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

impl Default for SceneDescription {
    /// A blue diffuse sphere lit by a small white emitter.
    fn default() -> Self {
        Self {
            image: ImageSettings::default(),
            render: RenderSettings::default(),
            camera: CameraSettings::default(),
            objects: vec![
                ObjectDescription::sphere(
                    Vec3::new(0.0, 0.0, 5.0),
                    3.0,
                    MaterialDescription::new(Color::new(0.0, 0.0, 1.0), Color::ZERO),
                ),
                ObjectDescription::sphere(
                    Vec3::new(3.0, 3.0, 3.0),
                    1.0,
                    MaterialDescription::new(Color::ONE, Color::ONE),
                ),
            ],
        }
    }
}

impl SceneDescription {
    /// Reject configurations that would render garbage or NaN.
    pub fn validate(&self) -> ConfigResult<()> {
        let ImageSettings { width, height } = self.image;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }

        let render = &self.render;
        if render.samples_per_pixel == 0 {
            return Err(ConfigError::InvalidSampleCount);
        }
        let rr = render.russian_roulette;
        if !(rr > 0.0 && rr <= 1.0) {
            return Err(ConfigError::InvalidRussianRoulette(rr));
        }
        check_finite_vec(render.background, "render.background")?;
        if render.bucket_size == 0 {
            return Err(ConfigError::InvalidBucketSize);
        }
        if render.threads == Some(0) {
            return Err(ConfigError::InvalidThreadCount);
        }

        let camera = &self.camera;
        check_finite_vec(camera.position, "camera.position")?;
        if !(camera.scene_span.is_finite() && camera.scene_span > 0.0) {
            return Err(ConfigError::InvalidSceneSpan(camera.scene_span));
        }
        if !(camera.screen_distance.is_finite() && camera.screen_distance > 0.0) {
            return Err(ConfigError::InvalidCameraDistance(camera.screen_distance));
        }

        for (index, object) in self.objects.iter().enumerate() {
            object.validate(index)?;
        }

        Ok(())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn emitter_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|o| o.material().is_emissive())
            .count()
    }
}

fn check_finite(value: f64, field: &str) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn check_finite_vec(value: Vec3, field: &str) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite {
            field: field.to_string(),
        })
    }
}

fn check_unit_color(color: Color, index: usize, field: &'static str) -> ConfigResult<()> {
    let in_range = color.to_array().iter().all(|&c| Interval::UNIT.contains(c));
    if in_range {
        Ok(())
    } else {
        Err(ConfigError::ColorOutOfRange { index, field })
    }
}
