//! Scene description types.
//!
//! This module defines the renderer-agnostic representation of a scene as
//! it is stored on disk: named materials, spheres referencing them by name,
//! and the camera and render settings to use.

use std::collections::BTreeMap;

use pathlight_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{CameraSettings, RenderSettings};

/// A surface material definition.
///
/// Serialized with an internal `type` tag, e.g.
/// `{ "type": "metal", "albedo": [0.8, 0.8, 0.8], "roughness": 0.1 }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Ideal diffuse reflector
    Lambertian { albedo: Vec3 },

    /// Fuzzy mirror, roughness in [0, 1]
    Metal {
        albedo: Vec3,
        #[serde(default)]
        roughness: f32,
    },

    /// Refractive material such as glass or water
    Dielectric {
        ior: f32,
        #[serde(default = "white")]
        tint: Vec3,
    },

    /// Uniform emitter
    DiffuseLight { emit: Vec3 },
}

fn white() -> Vec3 {
    Vec3::ONE
}

impl MaterialDescription {
    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        match self {
            MaterialDescription::DiffuseLight { emit } => emit.length_squared() > 0.0,
            _ => false,
        }
    }
}

/// A sphere referencing one of the scene's named materials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

impl SphereDescription {
    pub fn new(center: Vec3, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// A complete scene as loaded from a file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub render: RenderSettings,

    /// Materials by name. Several spheres may share one material.
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,

    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene with default camera and render settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material under `name`, replacing any previous definition.
    pub fn with_material(mut self, name: impl Into<String>, material: MaterialDescription) -> Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Append a sphere.
    pub fn with_sphere(mut self, sphere: SphereDescription) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Number of spheres whose material emits light.
    pub fn light_count(&self) -> usize {
        self.spheres
            .iter()
            .filter(|s| {
                self.materials
                    .get(&s.material)
                    .is_some_and(MaterialDescription::is_emissive)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_tagging() {
        let json = r#"{ "type": "diffuse_light", "emit": [4.0, 4.0, 4.0] }"#;
        let material: MaterialDescription = serde_json::from_str(json).unwrap();
        assert_eq!(
            material,
            MaterialDescription::DiffuseLight {
                emit: Vec3::splat(4.0)
            }
        );
        assert!(material.is_emissive());
    }

    #[test]
    fn test_dielectric_defaults_to_white_tint() {
        let json = r#"{ "type": "dielectric", "ior": 1.5 }"#;
        let material: MaterialDescription = serde_json::from_str(json).unwrap();
        assert_eq!(
            material,
            MaterialDescription::Dielectric {
                ior: 1.5,
                tint: Vec3::ONE
            }
        );
    }

    #[test]
    fn test_light_count() {
        let scene = SceneDescription::new()
            .with_material("lamp", MaterialDescription::DiffuseLight { emit: Vec3::ONE })
            .with_material("dark", MaterialDescription::DiffuseLight { emit: Vec3::ZERO })
            .with_material("grey", MaterialDescription::Lambertian { albedo: Vec3::splat(0.5) })
            .with_sphere(SphereDescription::new(Vec3::ZERO, 1.0, "grey"))
            .with_sphere(SphereDescription::new(Vec3::X, 0.5, "lamp"))
            .with_sphere(SphereDescription::new(Vec3::Y, 0.5, "lamp"))
            .with_sphere(SphereDescription::new(Vec3::Z, 0.5, "dark"));

        assert_eq!(scene.light_count(), 2);
    }
}
