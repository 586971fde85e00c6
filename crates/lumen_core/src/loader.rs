//! Scene loading from JSON documents.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("samples per pixel must be positive")]
    InvalidSampleCount,

    #[error("russian roulette probability must be in (0, 1], got {0}")]
    InvalidRussianRoulette(f64),

    #[error("bucket size must be positive")]
    InvalidBucketSize,

    #[error("thread count must be positive")]
    InvalidThreadCount,

    #[error("scene span must be positive, got {0}")]
    InvalidSceneSpan(f64),

    #[error("camera screen distance must be positive, got {0}")]
    InvalidCameraDistance(f64),

    #[error("object {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },

    #[error("object {index}: {field} components must be in [0, 1]")]
    ColorOutOfRange { index: usize, field: &'static str },

    #[error("{field} must be finite")]
    NonFinite { field: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate a scene description from a JSON file.
///
/// # Example
///
/// ```ignore
/// use lumen_core::load_scene;
///
/// let scene = load_scene("scenes/two_spheres.json")?;
/// println!("Loaded {} objects", scene.object_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> ConfigResult<SceneDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene {} ({} objects, {} emitters)",
        path.display(),
        scene.object_count(),
        scene.emitter_count()
    );

    Ok(scene)
}

/// Parse and validate a scene description from a JSON string.
pub fn load_scene_from_str(text: &str) -> ConfigResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(text)?;
    scene.validate()?;

    if scene.objects.is_empty() {
        log::warn!("Scene has no objects, every pixel will be background");
    } else if scene.emitter_count() == 0 {
        log::warn!("Scene has no emitters, only the background contributes light");
    }

    Ok(scene)
}
