//! Parallel tile scheduler.
//!
//! Renders the image tile by tile on a rayon pool:
//! - Tiles are dispatched center-out (spiral order)
//! - Each tile owns a seeded RNG, so a fixed seed reproduces the image
//!   regardless of how tiles are scheduled
//! - Anti-aliasing via jittered multi-sampling

use std::time::Instant;

use pathlight_core::RenderSettings;
use pathlight_math::Interval;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::{
    error::RenderResult,
    sampling,
    tile::{sort_spiral, TileView},
    Camera, Canvas, Color, Integrator, Scene,
};

/// Receives progress notifications from render workers.
pub trait ProgressSink: Sync {
    /// Called after `count` more pixels have been finished.
    fn pixels_completed(&self, count: usize);
}

/// Progress sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn pixels_completed(&self, _count: usize) {}
}

/// Render the scene as seen through `camera`.
///
/// Settings are validated first. The returned canvas holds averaged pixel
/// colors clamped to [0, 1].
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    progress: &dyn ProgressSink,
) -> RenderResult<Canvas> {
    settings.validate()?;

    let seed = settings.seed.unwrap_or_else(|| {
        let seed = rand::random();
        log::info!("No seed configured, using {seed}");
        seed
    });

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = settings.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let (width, height) = (settings.width, settings.height);
    let frame = Frame {
        scene,
        camera,
        integrator: Integrator::new(settings.max_bounces),
        width,
        height,
        samples_per_pixel: settings.samples_per_pixel,
        seed,
    };

    let mut canvas = Canvas::new(width, height);
    let mut views = canvas.tiles_mut(settings.tile_size);
    sort_spiral(&mut views, width, height);

    log::info!(
        "Rendering {}x{} at {} spp, {} tiles on {} threads",
        width,
        height,
        settings.samples_per_pixel,
        views.len(),
        pool.current_num_threads()
    );
    let start = Instant::now();

    pool.install(|| {
        views
            .par_iter_mut()
            .for_each(|view| frame.render_tile(view, progress));
    });
    drop(views);

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(canvas)
}

/// Everything a worker needs to shade pixels, shared by all tiles.
struct Frame<'a> {
    scene: &'a Scene,
    camera: &'a Camera,
    integrator: Integrator,
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    seed: u64,
}

impl Frame<'_> {
    fn render_tile(&self, view: &mut TileView<'_>, progress: &dyn ProgressSink) {
        let tile = *view.tile();
        log::trace!(
            "Tile {} at ({}, {}) size {}x{}",
            tile.index,
            tile.x,
            tile.y,
            tile.width,
            tile.height
        );

        let mut rng = StdRng::seed_from_u64(tile_seed(self.seed, tile.index));
        view.for_each_pixel(|x, y, pixel| {
            *pixel = self.render_pixel(x, y, &mut rng);
            progress.pixels_completed(1);
        });
    }

    /// Average `samples_per_pixel` jittered samples, clamped to [0, 1].
    fn render_pixel(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let mut pixel_color = Color::ZERO;

        for _ in 0..self.samples_per_pixel {
            // Image rows run top-down, camera v runs bottom-up
            let u = (x as f32 + sampling::gen_f32(rng)) / self.width as f32;
            let v = 1.0 - (y as f32 + sampling::gen_f32(rng)) / self.height as f32;
            let ray = self.camera.sample(u, v, rng);
            pixel_color += self.integrator.integrate(&ray, self.scene, rng);
        }

        let average = pixel_color / self.samples_per_pixel as f32;
        Color::new(
            Interval::UNIT.clamp(average.x),
            Interval::UNIT.clamp(average.y),
            Interval::UNIT.clamp(average.z),
        )
    }
}

/// Decorrelate per-tile streams derived from one render seed.
fn tile_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::{DiffuseLight, Lambertian, Material, Sphere, Vec3};
    use pathlight_core::{CameraSettings, ConfigError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn settings(size: u32, spp: u32) -> RenderSettings {
        RenderSettings {
            width: size,
            height: size,
            tile_size: 8,
            samples_per_pixel: spp,
            max_bounces: 10,
            seed: Some(1234),
            threads: Some(2),
        }
    }

    fn pinhole_camera() -> Camera {
        let camera_settings = CameraSettings {
            aperture: 0.0,
            ..CameraSettings::default()
        };
        Camera::from_settings(&camera_settings, 1.0).unwrap()
    }

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        let grey: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        let lamp: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(4.0)));
        scene.add(Box::new(Sphere::new(Vec3::ZERO, 1.0, grey).unwrap()));
        scene.add(Box::new(Sphere::new(Vec3::new(3.0, 0.0, 0.0), 0.5, lamp).unwrap()));
        scene
    }

    fn mean_luminance(canvas: &Canvas, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> f32 {
        let mut sum = 0.0;
        let mut count = 0;
        for y in ys {
            for x in xs.clone() {
                sum += canvas.get(x, y).element_sum() / 3.0;
                count += 1;
            }
        }
        sum / count as f32
    }

    #[test]
    fn test_lit_side_is_brighter() {
        let scene = lit_sphere_scene();
        let canvas = render(&scene, &pinhole_camera(), &settings(32, 64), &NoProgress).unwrap();

        for color in canvas.pixels() {
            assert!(color.min_element() >= 0.0 && color.max_element() <= 1.0);
        }

        // Mirrored bands across the sphere; the light sits at +x
        let left = mean_luminance(&canvas, 7..13, 13..19);
        let right = mean_luminance(&canvas, 19..25, 13..19);
        assert!(right > left, "right={right} left={left}");
    }

    #[test]
    fn test_camera_rays_hit_only_true_geometry() {
        let scene = lit_sphere_scene();
        let camera = pinhole_camera();
        let mut rng = StdRng::seed_from_u64(6);

        // Camera directions span eye to focus plane, far from unit length
        let corner = camera.sample(0.02, 0.02, &mut rng);
        assert!(corner.direction().length() > 2.0);
        let mut ray = corner;
        let mut hit = crate::Intersection::default();
        assert!(!scene.ray_intersect(&mut ray, &mut hit));

        let mut ray = camera.sample(0.5, 0.5, &mut rng);
        let mut hit = crate::Intersection::default();
        assert!(scene.ray_intersect(&mut ray, &mut hit));
        assert!((hit.p - Vec3::Z).length() < 1e-4);
        assert!((hit.p.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_pixels_missing_the_sphere_show_background() {
        let scene = lit_sphere_scene();
        let camera = pinhole_camera();
        let size = 32;
        let canvas = render(&scene, &camera, &settings(size, 16), &NoProgress).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        for (x, y) in [(0, 0), (size - 1, 0), (0, size - 1), (size - 1, size - 1)] {
            let u = (x as f32 + 0.5) / size as f32;
            let v = 1.0 - (y as f32 + 0.5) / size as f32;
            let expected = scene.sample_background_light(camera.sample(u, v, &mut rng).direction());
            let error = (canvas.get(x, y) - expected).abs().max_element();
            assert!(error < 0.02, "pixel ({x}, {y}) off by {error}");
        }
    }

    #[test]
    fn test_empty_scene_matches_background() {
        let scene = Scene::new();
        let camera = pinhole_camera();
        let size = 32;

        let total_error = |spp: u32| -> f32 {
            let canvas = render(&scene, &camera, &settings(size, spp), &NoProgress).unwrap();
            let mut rng = StdRng::seed_from_u64(0);
            let mut total = 0.0;
            for y in 0..size {
                for x in 0..size {
                    let u = (x as f32 + 0.5) / size as f32;
                    let v = 1.0 - (y as f32 + 0.5) / size as f32;
                    let expected =
                        scene.sample_background_light(camera.sample(u, v, &mut rng).direction());
                    let error = (canvas.get(x, y) - expected).abs().max_element();
                    if spp >= 64 {
                        assert!(error < 0.02, "pixel ({x}, {y}) off by {error}");
                    }
                    total += error;
                }
            }
            total
        };

        assert!(total_error(64) <= total_error(1));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let scene = lit_sphere_scene();
        let camera = pinhole_camera();

        let first = render(&scene, &camera, &settings(16, 4), &NoProgress).unwrap();
        let single_thread = RenderSettings {
            threads: Some(1),
            ..settings(16, 4)
        };
        let second = render(&scene, &camera, &single_thread, &NoProgress).unwrap();

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn test_progress_counts_every_pixel() {
        struct Counter(AtomicUsize);
        impl ProgressSink for Counter {
            fn pixels_completed(&self, count: usize) {
                self.0.fetch_add(count, Ordering::Relaxed);
            }
        }

        let counter = Counter(AtomicUsize::new(0));
        let settings = RenderSettings {
            width: 20,
            height: 11,
            tile_size: 6,
            ..settings(0, 1)
        };
        render(&Scene::new(), &pinhole_camera(), &settings, &counter).unwrap();

        assert_eq!(counter.0.load(Ordering::Relaxed), 20 * 11);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let bad = RenderSettings {
            samples_per_pixel: 0,
            ..settings(8, 1)
        };
        let result = render(&Scene::new(), &pinhole_camera(), &bad, &NoProgress);
        assert!(matches!(result, Err(RenderError::Config(ConfigError::NoSamples))));
    }
}
