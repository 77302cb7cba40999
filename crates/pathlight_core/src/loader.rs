//! Scene file loading.
//!
//! Scenes are stored as JSON. A loaded description is validated as a whole
//! before it is returned, so callers never see a partially usable scene.

use std::path::Path;

use thiserror::Error;

use crate::config::ConfigError;
use crate::scene::{MaterialDescription, SceneDescription};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {index} references unknown material `{name}`")]
    UnknownMaterial { index: usize, name: String },

    #[error("sphere {index} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("sphere {index} has a non-finite center")]
    InvalidCenter { index: usize },

    #[error("material `{name}` is invalid: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] ConfigError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene description from a JSON file.
///
/// # Example
///
/// ```ignore
/// use pathlight_core::load_scene;
///
/// let scene = load_scene("scenes/glass_and_light.json")?;
/// println!("Loaded {} spheres", scene.spheres.len());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    log::info!("Loading scene from: {:?}", path);

    let contents = std::fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Parse and validate a scene description from a JSON string.
pub fn load_scene_from_str(contents: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(contents)?;
    validate(&scene)?;

    log::info!(
        "Loaded {} materials, {} spheres ({} lights)",
        scene.materials.len(),
        scene.spheres.len(),
        scene.light_count()
    );
    Ok(scene)
}

/// Check every part of a description that the renderer relies on.
pub fn validate(scene: &SceneDescription) -> LoadResult<()> {
    scene.render.validate()?;
    scene.camera.validate()?;

    for (name, material) in &scene.materials {
        validate_material(name, material)?;
    }

    for (index, sphere) in scene.spheres.iter().enumerate() {
        if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
            return Err(LoadError::InvalidRadius {
                index,
                radius: sphere.radius,
            });
        }
        if !sphere.center.is_finite() {
            return Err(LoadError::InvalidCenter { index });
        }
        if !scene.materials.contains_key(&sphere.material) {
            return Err(LoadError::UnknownMaterial {
                index,
                name: sphere.material.clone(),
            });
        }
    }

    Ok(())
}

fn validate_material(name: &str, material: &MaterialDescription) -> LoadResult<()> {
    let invalid = |reason: String| LoadError::InvalidMaterial {
        name: name.to_string(),
        reason,
    };

    match material {
        MaterialDescription::Lambertian { albedo } => {
            if albedo.min_element() < 0.0 {
                return Err(invalid(format!("negative albedo {albedo}")));
            }
        }
        MaterialDescription::Metal { albedo, roughness } => {
            if albedo.min_element() < 0.0 {
                return Err(invalid(format!("negative albedo {albedo}")));
            }
            if !roughness.is_finite() {
                return Err(invalid(format!("roughness {roughness} is not finite")));
            }
        }
        MaterialDescription::Dielectric { ior, tint } => {
            if !(*ior > 0.0 && ior.is_finite()) {
                return Err(invalid(format!("index of refraction {ior} must be positive")));
            }
            if tint.min_element() < 0.0 {
                return Err(invalid(format!("negative tint {tint}")));
            }
        }
        MaterialDescription::DiffuseLight { emit } => {
            if emit.min_element() < 0.0 {
                return Err(invalid(format!("negative emission {emit}")));
            }
        }
    }
    Ok(())
}
