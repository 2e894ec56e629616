//! Demo scene: a floor, a cone, a cylinder and a sphere under three lights.
//!
//! Renders the scene, picks the object under the image center, rotates the
//! cone and renders again. Both frames are saved in PPM format.
//!
//! Run with `RUST_LOG=debug` to see scene edits.

use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::Context;
use prism_renderer::{
    rotation_z, AmbientLight, Camera, Color, Cone, Cylinder, ImageBuffer, Plane, PointLight,
    Renderer, Sphere, Surface, Vec3, Viewport,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Prism Ray Caster - Demo Scene");
    println!("=============================");

    let camera = Camera::perspective(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::X);
    let mut renderer = Renderer::new(
        WIDTH,
        HEIGHT,
        camera,
        Viewport::new(2.0, 1.5),
        AmbientLight::new(0.3, Color::ONE),
    );

    for position in [
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
        Vec3::new(-0.5, 0.4, -0.2),
    ] {
        renderer.add_light(PointLight::new(position, 0.7, Color::ONE));
    }

    renderer.add_object(Plane::new(
        Vec3::new(0.0, -1.4, 0.0),
        Vec3::Y,
        Surface::new(Color::splat(0.5), 0.0).reflective(true),
    ));
    let cone = renderer.add_object(Cone::new(
        Vec3::new(0.9, 1.3, 1.0),
        Vec3::new(0.9, -1.0, 1.0),
        0.26,
        Surface::new(Color::new(1.0, 0.0, 0.0), 1.0),
    )?);
    renderer.add_object(Cylinder::new(
        Vec3::new(-1.2, 1.0, -1.2),
        Vec3::new(-1.2, -1.0, -1.2),
        0.15,
        Surface::new(Color::new(0.0, 0.0, 1.0), 1.0),
    )?);
    renderer.add_object(Sphere::new(
        Vec3::new(-0.7, -0.5, 2.0),
        1.2,
        Surface::new(Color::new(0.0, 1.0, 0.0), 1.0).reflective(true),
    ));

    let mut image = ImageBuffer::new(WIDTH, HEIGHT);
    let seconds = renderer.render(&mut image, true)?;
    println!("Rendered {}x{} in {:.3}s", WIDTH, HEIGHT, seconds);
    save_ppm(&image, "demo_scene.ppm")?;

    match renderer.select_object(WIDTH / 2, HEIGHT / 2)? {
        Some(id) => {
            let name = renderer.object(id).map_or("unknown", |o| o.name());
            println!("Center pixel shows object {} ({})", id.0, name);
        }
        None => println!("Center pixel shows the background"),
    }

    renderer
        .object_mut(cone)
        .context("cone handle is no longer valid")?
        .rotate(&rotation_z(0.5))?;

    let seconds = renderer.render(&mut image, true)?;
    println!("Re-rendered with the cone tilted in {:.3}s", seconds);
    save_ppm(&image, "demo_scene_tilted.ppm")?;

    Ok(())
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> anyhow::Result<()> {
    let file = File::create(filename).with_context(|| format!("creating {}", filename))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for y in 0..image.height {
        for x in 0..image.width {
            let rgba = image.get(x, y);
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    println!("Saved to {}", filename);
    Ok(())
}
