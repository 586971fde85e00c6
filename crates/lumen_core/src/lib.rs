//! Lumen Core - scene description and configuration loading.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `ObjectDescription`,
//!   `RenderSettings`, `CameraSettings`
//! - **Loading**: JSON parsing with validation at setup time
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects", scene.object_count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, ConfigError, ConfigResult};
pub use scene::{
    CameraSettings, ImageSettings, MaterialDescription, ObjectDescription, RenderSettings,
    SceneDescription,
};
