//! Simple path tracer example.
//!
//! Builds a small scene in code, renders it and saves to PPM format.

use pathlight_core::{CameraSettings, RenderSettings};
use pathlight_renderer::{
    render, Camera, Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, NoProgress,
    Scene, Sphere, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("Pathlight - Simple Example");
    println!("==========================");

    let scene = build_scene()?;
    let settings = RenderSettings {
        width: 200,
        height: 150,
        samples_per_pixel: 32,
        seed: Some(7),
        ..RenderSettings::default()
    };
    let camera_settings = CameraSettings {
        look_from: Vec3::new(0.0, 1.0, 5.0),
        look_at: Vec3::new(0.0, 0.5, 0.0),
        focus_distance: 5.0,
        ..CameraSettings::default()
    };
    let camera = Camera::from_settings(&camera_settings, settings.aspect_ratio())?;

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.width, settings.height, settings.samples_per_pixel
    );
    let start = std::time::Instant::now();
    let canvas = render(&scene, &camera, &settings, &NoProgress)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&canvas, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Result<Scene, pathlight_renderer::RenderError> {
    let mut scene = Scene::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let clay: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)));
    let chrome: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.05));
    let lamp: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(6.0, 5.5, 5.0)));

    scene.add(Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?));
    scene.add(Box::new(Sphere::new(Vec3::new(0.0, 0.5, 0.0), 0.5, glass)?));
    scene.add(Box::new(Sphere::new(Vec3::new(-1.1, 0.5, 0.0), 0.5, clay)?));
    scene.add(Box::new(Sphere::new(Vec3::new(1.1, 0.5, 0.0), 0.5, chrome)?));
    scene.add(Box::new(Sphere::new(Vec3::new(0.0, 3.0, 1.0), 0.5, lamp)?));

    println!("Created {} objects, {} lights", scene.len(), scene.light_count());
    Ok(scene)
}

fn save_ppm(canvas: &pathlight_renderer::Canvas, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", canvas.width(), canvas.height())?;
    writeln!(writer, "255")?;

    for rgba in canvas.to_rgba8(true) {
        writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
    }

    Ok(())
}
