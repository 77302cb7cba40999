//! Built-in scenes, selectable from the command line.

use clap::ValueEnum;
use pathlight_core::{MaterialDescription, SceneDescription, SphereDescription};
use pathlight_renderer::{Color, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuiltinScene {
    /// Diffuse, metal and glass spheres on a ground sphere under one light
    #[default]
    Spheres,
    /// A single diffuse sphere lit from both sides
    TwoLights,
    /// Nothing but the sky
    Empty,
}

impl BuiltinScene {
    pub fn description(self) -> SceneDescription {
        match self {
            BuiltinScene::Spheres => spheres(),
            BuiltinScene::TwoLights => two_lights(),
            BuiltinScene::Empty => SceneDescription::new(),
        }
    }
}

fn ground() -> SphereDescription {
    SphereDescription::new(Vec3::new(0.0, -100.5, 0.0), 100.0, "ground")
}

fn spheres() -> SceneDescription {
    SceneDescription::new()
        .with_material(
            "ground",
            MaterialDescription::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0),
            },
        )
        .with_material(
            "clay",
            MaterialDescription::Lambertian {
                albedo: Color::new(0.7, 0.3, 0.3),
            },
        )
        .with_material(
            "brushed",
            MaterialDescription::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                roughness: 0.3,
            },
        )
        .with_material(
            "glass",
            MaterialDescription::Dielectric {
                ior: 1.5,
                tint: Color::ONE,
            },
        )
        .with_material(
            "lamp",
            MaterialDescription::DiffuseLight {
                emit: Color::splat(4.0),
            },
        )
        .with_sphere(ground())
        .with_sphere(SphereDescription::new(Vec3::ZERO, 0.5, "clay"))
        .with_sphere(SphereDescription::new(Vec3::new(1.1, 0.0, 0.0), 0.5, "brushed"))
        .with_sphere(SphereDescription::new(Vec3::new(-1.1, 0.0, 0.0), 0.5, "glass"))
        .with_sphere(SphereDescription::new(Vec3::new(0.0, 2.0, 1.0), 0.5, "lamp"))
}

fn two_lights() -> SceneDescription {
    SceneDescription::new()
        .with_material(
            "ground",
            MaterialDescription::Lambertian {
                albedo: Color::splat(0.5),
            },
        )
        .with_material(
            "grey",
            MaterialDescription::Lambertian {
                albedo: Color::splat(0.6),
            },
        )
        .with_material(
            "warm",
            MaterialDescription::DiffuseLight {
                emit: Color::new(4.0, 2.5, 1.5),
            },
        )
        .with_material(
            "cool",
            MaterialDescription::DiffuseLight {
                emit: Color::new(1.5, 2.5, 4.0),
            },
        )
        .with_sphere(ground())
        .with_sphere(SphereDescription::new(Vec3::ZERO, 0.5, "grey"))
        .with_sphere(SphereDescription::new(Vec3::new(-2.0, 1.5, 0.5), 0.4, "warm"))
        .with_sphere(SphereDescription::new(Vec3::new(2.0, 1.5, 0.5), 0.4, "cool"))
}
