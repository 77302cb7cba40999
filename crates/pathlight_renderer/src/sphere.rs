//! Sphere primitive for path tracing.

use std::sync::Arc;

use crate::{
    error::{RenderError, RenderResult},
    hittable::{Intersection, Renderable},
    sampling, Material, Ray,
};
use pathlight_math::Vec3;
use rand::RngCore;

/// Hits closer than this are treated as self-intersections.
pub const EPSILON: f32 = 1e-4;

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails if the radius is not a positive, finite number.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> RenderResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(RenderError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Renderable for Sphere {
    fn ray_intersect<'a>(&'a self, ray: &mut Ray, hit: &mut Intersection<'a>) -> bool {
        let len = ray.direction().length();
        if !(len > 0.0 && len.is_finite()) {
            return false;
        }

        // Geometric solution: project the center onto the unit direction.
        // Roots are metric distances; ray.t stays in units of the direction.
        let unit = ray.direction() / len;
        let t_max = ray.t * len;
        let r2 = self.radius * self.radius;
        let diff = self.center - ray.origin();
        let c0 = diff.dot(unit);
        let d2 = diff.dot(diff) - c0 * c0;
        if d2 > r2 {
            return false;
        }

        let c1 = (r2 - d2).sqrt();
        let mut t0 = c0 - c1;
        let mut t1 = c0 + c1;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_max || t1 < EPSILON {
            return false;
        }

        // Origin inside the sphere: take the far root
        let t = if t0 > EPSILON { t0 } else { t1 };
        if t > t_max {
            return false;
        }

        ray.t = t / len;
        hit.t = ray.t;
        hit.p = ray.origin() + t * unit;
        hit.n = (hit.p - self.center) / self.radius;
        hit.material = self.material.as_ref();

        true
    }

    fn material(&self) -> &dyn Material {
        self.material.as_ref()
    }

    fn sample_surface(&self, rng: &mut dyn RngCore) -> Vec3 {
        sampling::uniform_sphere_point(self.center, self.radius, rng)
    }
}
