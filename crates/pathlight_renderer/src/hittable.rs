//! Renderable trait and Intersection record for ray-object intersection.

use crate::{Color, Material, Ray};
use pathlight_math::Vec3;
use rand::RngCore;

/// Placeholder material for an `Intersection` that has not been filled in.
/// Always absorbs light and never emits.
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(&self, _ray_in: &Ray, _hit: &Intersection, _rng: &mut dyn RngCore) -> Option<Ray> {
        None
    }

    fn attenuation(&self) -> Color {
        Color::ZERO
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
///
/// Only valid for the bounce that produced it.
#[derive(Clone)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Outward unit surface normal at the intersection
    pub n: Vec3,
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Material of the primitive that was hit
    pub material: &'a dyn Material,
}

impl<'a> Default for Intersection<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            n: Vec3::ZERO,
            t: f32::INFINITY,
            material: &DUMMY_MATERIAL,
        }
    }
}

/// Trait for primitives that can be placed in a scene.
pub trait Renderable: Send + Sync {
    /// Test if a ray hits this object closer than `ray.t`.
    ///
    /// On a hit, shrinks `ray.t` to the new distance, fills in `hit` and
    /// returns true. Otherwise leaves both untouched.
    fn ray_intersect<'a>(&'a self, ray: &mut Ray, hit: &mut Intersection<'a>) -> bool;

    /// The material attached to this primitive.
    fn material(&self) -> &dyn Material;

    /// A point uniformly distributed over the surface, used to sample
    /// emitters for direct lighting.
    fn sample_surface(&self, rng: &mut dyn RngCore) -> Vec3;
}
