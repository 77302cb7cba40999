use crate::Vec3;

/// A ray in 3D space with origin, direction, and a closest-hit bound.
///
/// Rays are used for path tracing - they represent a half line starting at
/// `origin` and traveling in `direction`. The direction is not required to be
/// normalized. `t` is the distance (in units of `direction`) to the nearest
/// intersection found so far; intersection routines reject anything farther
/// away and shrink it when they accept a hit, so scanning many primitives
/// converges to the globally nearest one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t: f32,
}

impl Ray {
    /// Create a new unbounded ray (`t` starts at +infinity).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t: f32::INFINITY,
        }
    }

    /// Create a ray that only accepts hits closer than `t_max`.
    pub fn with_max(origin: Vec3, direction: Vec3, t_max: f32) -> Self {
        Self {
            origin,
            direction,
            t: t_max,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.t, f32::INFINITY);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_with_max() {
        let ray = Ray::with_max(Vec3::ZERO, Vec3::Y, 5.0);
        assert_eq!(ray.t, 5.0);
        assert_eq!(ray.at(ray.t), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_ray_copy_keeps_bound() {
        let mut ray1 = Ray::new(Vec3::ZERO, Vec3::Y);
        ray1.t = 3.0;
        let ray2 = ray1; // Copy, not move

        assert_eq!(ray1.t, ray2.t);
        assert_eq!(ray1.at(1.0), ray2.at(1.0));
    }
}
