//! Render and camera configuration.
//!
//! Both structs deserialize with defaults for every missing field, so a
//! scene file only has to mention what it wants to change.

use pathlight_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by [`RenderSettings::validate`] and [`CameraSettings::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("tile size must be non-zero")]
    EmptyTile,

    #[error("samples per pixel must be greater than zero")]
    NoSamples,

    #[error("bounce limit must be greater than zero")]
    NoBounces,

    #[error("worker count must be greater than zero")]
    NoThreads,

    #[error("invalid camera: {0}")]
    Camera(String),
}

/// Settings that control the image and the sampling budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Edge length of the square render tiles
    pub tile_size: u32,
    /// Primary rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum path length
    pub max_bounces: u32,
    /// Seed for all random sampling. `None` picks one at render time.
    pub seed: Option<u64>,
    /// Worker threads. `None` uses one per core.
    pub threads: Option<usize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            tile_size: 32,
            samples_per_pixel: 128,
            max_bounces: 10,
            seed: None,
            threads: None,
        }
    }
}

impl RenderSettings {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::EmptyTile);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.max_bounces == 0 {
            return Err(ConfigError::NoBounces);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::NoThreads);
        }
        Ok(())
    }
}

/// Pinhole/thin-lens camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter, 0 disables depth of field
    pub aperture: f32,
    /// Distance from the lens to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 3.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 60.0,
            aperture: 0.1,
            focus_distance: 4.0,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let forward = self.look_from - self.look_at;
        if forward.length_squared() <= f32::EPSILON {
            return Err(ConfigError::Camera("look_from and look_at coincide".into()));
        }
        if forward.cross(self.up).length_squared() <= f32::EPSILON {
            return Err(ConfigError::Camera("up vector is parallel to the view direction".into()));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::Camera(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if self.aperture < 0.0 {
            return Err(ConfigError::Camera(format!(
                "aperture must not be negative, got {}",
                self.aperture
            )));
        }
        if self.focus_distance <= 0.0 {
            return Err(ConfigError::Camera(format!(
                "focus distance must be positive, got {}",
                self.focus_distance
            )));
        }
        Ok(())
    }
}
