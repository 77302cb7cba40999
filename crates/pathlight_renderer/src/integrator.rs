//! Light transport along a single camera ray.

use rand::RngCore;

use crate::{hittable::Intersection, Color, Ray, Scene};

/// Iterative path tracer.
///
/// Follows a path through at most `max_bounces` surface interactions,
/// adding sampled direct light at every scattering vertex and the sky or an
/// emitter where the path ends.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    max_bounces: u32,
}

impl Integrator {
    pub fn new(max_bounces: u32) -> Self {
        Self { max_bounces }
    }

    pub fn max_bounces(&self) -> u32 {
        self.max_bounces
    }

    /// Estimate the radiance arriving along `ray`.
    ///
    /// The result is not clamped.
    pub fn integrate(&self, ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        let mut accumulated = Color::ZERO;
        let mut attenuation = Color::ONE;
        let mut current = Ray::new(ray.origin(), ray.direction());

        for _ in 0..self.max_bounces {
            let mut hit = Intersection::default();

            if !scene.ray_intersect(&mut current, &mut hit) {
                accumulated += attenuation * scene.sample_background_light(current.direction());
                break;
            }

            let material = hit.material;
            match material.scatter(&current, &hit, rng) {
                Some(outgoing) => {
                    accumulated += attenuation * scene.sample_direct_light(&outgoing, &hit, rng);
                    attenuation *= material.attenuation();
                    current = outgoing;
                }
                None => {
                    // Absorbed, or the path reached an emitter
                    accumulated += attenuation * material.emitted();
                    break;
                }
            }
        }

        accumulated
    }
}
