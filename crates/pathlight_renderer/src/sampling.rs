//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so each render task can
//! own an independent, seedable stream.

use pathlight_math::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Use rejection sampling for uniform distribution on sphere
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed point on the surface of a sphere.
///
/// theta = 2*pi*u, phi = acos(2v - 1)
pub fn uniform_sphere_point(center: Vec3, radius: f32, rng: &mut dyn RngCore) -> Vec3 {
    let u = gen_f32(rng);
    let v = gen_f32(rng);
    let theta = 2.0 * PI * u;
    let phi = (2.0 * v - 1.0).acos();
    center
        + radius
            * Vec3::new(
                phi.sin() * theta.cos(),
                phi.sin() * theta.sin(),
                phi.cos(),
            )
}
