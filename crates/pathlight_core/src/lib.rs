//! Pathlight Core - Scene description and render configuration.
//!
//! This crate provides:
//!
//! - **Configuration**: `RenderSettings`, `CameraSettings`
//! - **Scene description**: `SceneDescription`, named materials and spheres
//! - **Loading**: JSON scene files, validated before use
//!
//! # Example
//!
//! ```ignore
//! use pathlight_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres.len(),
//!     scene.light_count());
//! ```

pub mod config;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use config::{CameraSettings, ConfigError, RenderSettings};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{MaterialDescription, SceneDescription, SphereDescription};
