//! Pathlight Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres lit by emissive spheres and a sky
//! gradient. Direct light is sampled explicitly at every bounce, and the
//! image is rendered in tiles on a rayon worker pool.

mod camera;
mod canvas;
mod error;
mod hittable;
mod integrator;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod tile;

pub use camera::Camera;
pub use canvas::{color_to_rgba, linear_to_gamma, Canvas};
pub use error::{RenderError, RenderResult};
pub use hittable::{Intersection, Renderable};
pub use integrator::Integrator;
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal};
pub use renderer::{render, NoProgress, ProgressSink};
pub use scene::{Scene, LIGHT_SAMPLES};
pub use sphere::Sphere;
pub use tile::{partition, sort_spiral, Tile, TileView};

/// Re-export Vec3 and common math types from pathlight_math
pub use pathlight_math::{Interval, Ray, Vec3};
