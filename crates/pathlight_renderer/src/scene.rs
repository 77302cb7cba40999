//! Scene: the primitives to render and the lights among them.

use std::collections::BTreeMap;
use std::sync::Arc;

use pathlight_core::{MaterialDescription, SceneDescription};
use pathlight_math::Vec3;
use rand::RngCore;

use crate::{
    error::{RenderError, RenderResult},
    hittable::{Intersection, Renderable},
    Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, Ray, Sphere,
};

/// Surface samples drawn per light for each direct lighting estimate.
pub const LIGHT_SAMPLES: u32 = 10;

/// A shadow ray that lands this close to its light sample reached the light.
const OCCLUSION_EPSILON: f32 = 1e-3;

const HORIZON_COLOR: Color = Color::new(1.0, 1.0, 1.0);
const ZENITH_COLOR: Color = Color::new(0.5, 0.5, 0.9);

/// A list of renderable primitives plus the subset that emits light.
///
/// Built once, then shared read-only by every render task.
pub struct Scene {
    objects: Vec<Box<dyn Renderable>>,
    /// Indices into `objects` of primitives with an emissive material
    lights: Vec<usize>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Build a scene from a validated description.
    ///
    /// Materials are created once per name and shared by every sphere that
    /// references them.
    pub fn from_description(description: &SceneDescription) -> RenderResult<Self> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = description
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), build_material(material)))
            .collect();

        let mut scene = Self::new();
        for (index, sphere) in description.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .cloned()
                .ok_or_else(|| RenderError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;
            scene.add(Box::new(Sphere::new(sphere.center, sphere.radius, material)?));
        }

        log::info!(
            "Built scene with {} primitives, {} lights",
            scene.len(),
            scene.light_count()
        );
        if scene.light_count() == 0 {
            log::warn!("Scene has no emissive primitives, only the sky will light it");
        }
        Ok(scene)
    }

    /// Add an object, registering it as a light if its material emits.
    pub fn add(&mut self, object: Box<dyn Renderable>) {
        if object.material().is_emissive() {
            self.lights.push(self.objects.len());
        }
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get the number of emissive objects.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Iterate over the emissive objects.
    pub fn lights(&self) -> impl Iterator<Item = &dyn Renderable> {
        self.lights.iter().map(|&index| self.objects[index].as_ref())
    }

    /// Find the nearest intersection along `ray`.
    ///
    /// Every object is tested; each accepted hit shrinks `ray.t`, so the
    /// record left in `hit` belongs to the closest one.
    pub fn ray_intersect<'a>(&'a self, ray: &mut Ray, hit: &mut Intersection<'a>) -> bool {
        let mut hit_anything = false;

        for object in &self.objects {
            if object.ray_intersect(ray, hit) {
                hit_anything = true;
            }
        }

        hit_anything
    }

    /// Sky radiance for a ray that escapes the scene.
    ///
    /// Blends from white at the horizon/nadir to light blue at the zenith.
    pub fn sample_background_light(&self, direction: Vec3) -> Color {
        let unit = direction.normalize();
        let t = 0.5 * (unit.y + 1.0);
        (1.0 - t) * HORIZON_COLOR + t * ZENITH_COLOR
    }

    /// Monte Carlo estimate of the light arriving directly from emitters at `hit`.
    ///
    /// Each light contributes [`LIGHT_SAMPLES`] samples of
    /// `emitted * cos / distance^2`. The sum over all lights is divided by
    /// `LIGHT_SAMPLES` once, so with several lights their estimates add up.
    pub fn sample_direct_light(
        &self,
        _outgoing: &Ray,
        hit: &Intersection,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut light_result = Color::ZERO;

        for light in self.lights() {
            let emitted = light.material().emitted();

            for _ in 0..LIGHT_SAMPLES {
                let point_on_light = light.sample_surface(rng);
                let to_light = point_on_light - hit.p;
                let dist_squared = to_light.length_squared();
                if dist_squared <= 0.0 {
                    continue;
                }

                let light_direction = to_light / dist_squared.sqrt();
                let cos_theta = hit.n.dot(light_direction);
                if cos_theta <= 0.0 {
                    continue;
                }

                // Hitting the sampled point on the light itself is not occlusion
                let mut shadow_ray = Ray::new(hit.p, light_direction);
                let mut shadow_hit = Intersection::default();
                let unoccluded = !self.ray_intersect(&mut shadow_ray, &mut shadow_hit)
                    || shadow_hit.p.distance(point_on_light) < OCCLUSION_EPSILON;

                if unoccluded {
                    light_result += (cos_theta / dist_squared) * emitted;
                }
            }
        }

        light_result / LIGHT_SAMPLES as f32
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn build_material(description: &MaterialDescription) -> Arc<dyn Material> {
    match *description {
        MaterialDescription::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
        MaterialDescription::Metal { albedo, roughness } => Arc::new(Metal::new(albedo, roughness)),
        MaterialDescription::Dielectric { ior, tint } => {
            Arc::new(Dielectric::new(ior).with_tint(tint))
        }
        MaterialDescription::DiffuseLight { emit } => Arc::new(DiffuseLight::new(emit)),
    }
}
