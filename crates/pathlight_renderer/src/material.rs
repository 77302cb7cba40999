//! Material trait for surface scattering.

use crate::{hittable::Intersection, sampling, Ray};
use pathlight_math::Vec3;
use rand::RngCore;

/// Color type alias (linear RGB, not clamped)
pub type Color = Vec3;

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are immutable after construction and shared between
/// primitives and render threads.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns the outgoing ray, or None if the ray is absorbed and the
    /// path terminates here.
    fn scatter(&self, ray_in: &Ray, hit: &Intersection, rng: &mut dyn RngCore) -> Option<Ray>;

    /// Color multiplied into the radiance carried along a scattered path.
    fn attenuation(&self) -> Color;

    /// Radiance emitted by the surface itself.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self) -> Color {
        Color::ZERO
    }

    /// True if the material emits any light.
    fn is_emissive(&self) -> bool {
        self.emitted().length() > 0.0
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, _ray_in: &Ray, hit: &Intersection, rng: &mut dyn RngCore) -> Option<Ray> {
        let mut scatter_direction = hit.n + sampling::random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = hit.n;
        }

        Some(Ray::new(hit.p, scatter_direction))
    }

    fn attenuation(&self) -> Color {
        self.albedo
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    roughness: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `roughness`: 0.0 = perfect mirror, 1.0 = very rough. Clamped to [0, 1].
    pub fn new(albedo: Color, roughness: f32) -> Self {
        Self {
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, hit: &Intersection, rng: &mut dyn RngCore) -> Option<Ray> {
        let reflected = reflect(ray_in.direction().normalize(), hit.n);
        let scattered_dir = if self.roughness > 0.0 {
            reflected + self.roughness * sampling::random_unit_vector(rng)
        } else {
            reflected
        };

        // Fuzz that pushes the ray below the surface absorbs it
        if scattered_dir.dot(hit.n) > 0.0 {
            Some(Ray::new(hit.p, scattered_dir))
        } else {
            None
        }
    }

    fn attenuation(&self) -> Color {
        self.albedo
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
    tint: Color,
}

impl Dielectric {
    /// Create a new untinted Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self {
            ior,
            tint: Color::ONE,
        }
    }

    /// Tint transmitted and reflected light.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Schlick's approximation for reflectance
    fn schlick(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Refract `v` through a surface with normal `n` facing the incoming side.
    ///
    /// Returns None on total internal reflection.
    pub(crate) fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
        let uv = v.normalize();
        let dt = uv.dot(n);
        let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
        if discriminant > 0.0 {
            Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
        } else {
            None
        }
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, hit: &Intersection, rng: &mut dyn RngCore) -> Option<Ray> {
        let direction = ray_in.direction();
        let d_dot_n = direction.dot(hit.n);

        // Sign of d.n tells whether we are leaving or entering the medium
        let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
            (-hit.n, self.ior, self.ior * d_dot_n / direction.length())
        } else {
            (hit.n, 1.0 / self.ior, -d_dot_n / direction.length())
        };

        let reflected = reflect(direction, hit.n);
        let scattered_dir = match Self::refract(direction, outward_normal, ni_over_nt) {
            Some(refracted) if sampling::gen_f32(rng) >= Self::schlick(cosine, self.ior) => {
                refracted
            }
            _ => reflected,
        };

        Some(Ray::new(hit.p, scattered_dir))
    }

    fn attenuation(&self) -> Color {
        self.tint
    }
}

/// Diffuse light emitter.
#[derive(Debug, Clone)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _hit: &Intersection, _rng: &mut dyn RngCore) -> Option<Ray> {
        // Lights terminate the path
        None
    }

    fn attenuation(&self) -> Color {
        Color::ZERO
    }

    fn emitted(&self) -> Color {
        self.emit
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin<'a>(n: Vec3, material: &'a dyn Material) -> Intersection<'a> {
        Intersection {
            p: Vec3::ZERO,
            n,
            t: 1.0,
            material,
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let material = Lambertian::new(Color::new(0.8, 0.3, 0.3));
        let hit = hit_at_origin(Vec3::Y, &material);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, -1.0, -1.0));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10_000 {
            let out = material
                .scatter(&ray_in, &hit, &mut rng)
                .expect("lambertian must scatter");
            assert!(out.direction().length_squared() > 0.0);
            assert!(out.direction().is_finite());
            assert_eq!(out.origin(), hit.p);
        }
        assert_eq!(material.attenuation(), Color::new(0.8, 0.3, 0.3));
        assert_eq!(material.emitted(), Color::ZERO);
    }

    #[test]
    fn test_metal_without_roughness_is_a_mirror() {
        let material = Metal::new(Color::splat(0.9), 0.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        let hit = hit_at_origin(n, &material);
        let mut rng = StdRng::seed_from_u64(11);

        for incoming in [
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-0.3, -2.0, 0.7),
            Vec3::new(0.0, -1.0, 0.0),
        ] {
            let ray_in = Ray::new(Vec3::new(0.0, 2.0, 0.0), incoming);
            let out = material.scatter(&ray_in, &hit, &mut rng).unwrap();

            let d = incoming.normalize();
            let expected = d - 2.0 * d.dot(n) * n;
            assert!((out.direction() - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_metal_roughness_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).roughness(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).roughness(), 0.0);
    }

    #[test]
    fn test_rough_metal_never_scatters_below_surface() {
        let material = Metal::new(Color::ONE, 1.0);
        let hit = hit_at_origin(Vec3::Y, &material);
        // Grazing incidence makes absorption likely for some samples
        let ray_in = Ray::new(Vec3::new(-1.0, 0.05, 0.0), Vec3::new(1.0, -0.05, 0.0));
        let mut rng = StdRng::seed_from_u64(5);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match material.scatter(&ray_in, &hit, &mut rng) {
                Some(out) => assert!(out.direction().dot(hit.n) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_normal_incidence_refracts() {
        for ior in [1.1, 1.5, 2.4] {
            // Entering: ray travels against the normal
            let refracted = Dielectric::refract(Vec3::NEG_Y, Vec3::Y, 1.0 / ior)
                .expect("no total internal reflection at normal incidence");
            assert!((refracted.normalize() - Vec3::NEG_Y).length() < 1e-5);

            // Exiting along the normal also has a solution
            assert!(Dielectric::refract(Vec3::Y, Vec3::NEG_Y, ior).is_some());
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a grazing angle cannot refract
        let grazing = Vec3::new(1.0, 0.1, 0.0);
        assert!(Dielectric::refract(grazing, Vec3::NEG_Y, 1.5).is_none());

        let material = Dielectric::new(1.5);
        let hit = hit_at_origin(Vec3::Y, &material);
        let ray_in = Ray::new(Vec3::new(-1.0, -0.1, 0.0), grazing);
        let mut rng = StdRng::seed_from_u64(3);

        // Always reflected back into the medium
        for _ in 0..100 {
            let out = material.scatter(&ray_in, &hit, &mut rng).unwrap();
            assert!(out.direction().dot(hit.n) < 0.0);
        }
    }

    #[test]
    fn test_dielectric_always_scatters() {
        let material = Dielectric::new(1.5);
        let hit = hit_at_origin(Vec3::Y, &material);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, -1.0, -1.0));
        let mut rng = StdRng::seed_from_u64(9);

        let mut reflected = 0;
        let mut transmitted = 0;
        for _ in 0..2000 {
            let out = material.scatter(&ray_in, &hit, &mut rng).unwrap();
            if out.direction().dot(hit.n) > 0.0 {
                reflected += 1;
            } else {
                transmitted += 1;
            }
        }
        // Schlick reflectance at 45 degrees for glass is a few percent
        assert!(reflected > 0);
        assert!(transmitted > reflected);
        assert_eq!(material.attenuation(), Color::ONE);
    }

    #[test]
    fn test_diffuse_light() {
        let material = DiffuseLight::new(Color::new(4.0, 2.0, 1.0));
        let hit = hit_at_origin(Vec3::Y, &material);
        let ray_in = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(material.scatter(&ray_in, &hit, &mut rng).is_none());
        assert_eq!(material.emitted(), Color::new(4.0, 2.0, 1.0));
        assert_eq!(material.attenuation(), Color::ZERO);
        assert!(material.is_emissive());
        assert!(!DiffuseLight::new(Color::ZERO).is_emissive());
    }
}
