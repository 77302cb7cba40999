//! Thin-lens camera for ray generation.

use crate::{error::RenderResult, sampling, Ray};
use pathlight_core::CameraSettings;
use pathlight_math::Vec3;
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`]
/// before sampling.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,       // Vertical field of view in degrees
    aperture: f32,   // Lens diameter, 0 for a pinhole
    focus_dist: f32, // Distance from camera to plane of perfect focus
    aspect: f32,     // Image width / height

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect: 1.0,
            // Cached values (initialized to defaults)
            origin: Vec3::ZERO,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        }
    }

    /// Build an initialized camera from settings.
    ///
    /// Fails on settings that would produce a degenerate basis, such as
    /// coincident eye and target or an up vector along the view direction.
    pub fn from_settings(settings: &CameraSettings, aspect: f32) -> RenderResult<Self> {
        settings.validate()?;
        let mut camera = Self::new()
            .with_position(settings.look_from, settings.look_at, settings.up)
            .with_lens(settings.vfov, settings.aperture, settings.focus_distance)
            .with_aspect(aspect);
        camera.initialize();
        Ok(camera)
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.origin = self.look_from;
        self.lens_radius = self.aperture / 2.0;

        // Half extents of the image plane at unit distance
        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let half_width = self.aspect * half_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Image plane placed at the focus distance
        self.lower_left = self.origin
            - half_width * self.focus_dist * self.u
            - half_height * self.focus_dist * self.v
            - self.focus_dist * self.w;
        self.horizontal = 2.0 * half_width * self.focus_dist * self.u;
        self.vertical = 2.0 * half_height * self.focus_dist * self.v;
    }

    /// Generate a ray through normalized image coordinates.
    ///
    /// `(u, v)` spans `[0, 1]^2` with `v = 0` at the bottom edge. The origin
    /// is jittered across the lens disk; every ray for a given `(u, v)`
    /// passes through the same point on the focus plane.
    pub fn sample(&self, u: f32, v: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * sampling::random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left + u * self.horizontal + v * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
