//! Scene renderer.
//!
//! Casts one primary ray per pixel (or several jittered ones), finds the
//! closest hit and shades it with the ambient term plus every point light
//! that is not blocked by a shadow ray.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    AmbientLight, Camera, Color, HitRecord, LightId, ObjectId, PointLight, Primitive, Ray,
    RenderError, Result, Scene, Viewport,
};
use prism_math::{clamp, hadamard, normalize, Vec3};

/// Per-light shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shading {
    /// Weighted Lambert diffuse plus a Blinn-Phong highlight
    #[default]
    BlinnPhong,
    /// Plain Lambert diffuse, no highlight
    Lambert,
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel; 1 traces the pixel center only
    pub samples_per_pixel: u32,
    /// Color of pixels whose ray hits nothing
    pub background: Color,
    /// Shading model for point lights
    pub shading: Shading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            background: Color::ZERO,
            shading: Shading::BlinnPhong,
        }
    }
}

impl RenderConfig {
    pub fn with_samples_per_pixel(mut self, samples: u32) -> Self {
        self.samples_per_pixel = samples;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clamp(color, 0.0, 1.0);
    let r = (255.0 * c.x) as u8;
    let g = (255.0 * c.y) as u8;
    let b = (255.0 * c.z) as u8;
    [r, g, b, 255]
}

/// RGBA8 image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Raw RGBA bytes (for display or saving).
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Owns the scene, camera and lighting, and turns them into images.
///
/// Scene edits take `&mut self` and rendering takes `&self`, so nothing can
/// change while a pass is in flight.
pub struct Renderer {
    width: u32,
    height: u32,
    camera: Camera,
    viewport: Viewport,
    ambient: AmbientLight,
    scene: Scene,
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer producing `width` x `height` images.
    pub fn new(
        width: u32,
        height: u32,
        camera: Camera,
        viewport: Viewport,
        ambient: AmbientLight,
    ) -> Self {
        Self {
            width,
            height,
            camera,
            viewport,
            ambient,
            scene: Scene::new(),
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_object<P: Primitive + 'static>(&mut self, object: P) -> ObjectId {
        self.scene.add_object(object)
    }

    pub fn add_light(&mut self, light: PointLight) -> LightId {
        self.scene.add_light(light)
    }

    pub fn object(&self, id: ObjectId) -> Option<&(dyn Primitive + 'static)> {
        self.scene.object(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Primitive + 'static)> {
        self.scene.object_mut(id)
    }

    pub fn light(&self, id: LightId) -> Option<&PointLight> {
        self.scene.light(id)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.scene.light_mut(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &dyn Primitive)> {
        self.scene.objects()
    }

    pub fn lights(&self) -> &[PointLight] {
        self.scene.lights()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn ambient(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render the scene into `buffer` and return the elapsed wall-clock
    /// seconds.
    ///
    /// Pixel `(i, j)` counts `j` upward from the bottom of the image and
    /// lands in buffer row `height - 1 - j`. On error `buffer` is left as
    /// it was.
    pub fn render(&self, buffer: &mut ImageBuffer, parallel: bool) -> Result<f64> {
        if buffer.width != self.width || buffer.height != self.height {
            return Err(RenderError::BufferSize {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: buffer.width,
                actual_height: buffer.height,
            });
        }

        log::info!(
            "Rendering {}x{} with {} objects, {} lights ({})",
            self.width,
            self.height,
            self.scene.len(),
            self.scene.lights().len(),
            if parallel { "parallel" } else { "sequential" }
        );
        let start = Instant::now();

        let row_len = self.width as usize * 4;
        let mut pixels = vec![0u8; row_len * self.height as usize];

        if row_len > 0 {
            if parallel {
                pixels
                    .par_chunks_mut(row_len)
                    .enumerate()
                    .try_for_each(|(row, out)| self.render_row(row, out))?;
            } else {
                pixels
                    .chunks_mut(row_len)
                    .enumerate()
                    .try_for_each(|(row, out)| self.render_row(row, out))?;
            }
        }

        buffer.pixels = pixels;

        let elapsed = start.elapsed().as_secs_f64();
        log::info!("Render finished in {:.3}s", elapsed);
        Ok(elapsed)
    }

    fn render_row(&self, row: usize, out: &mut [u8]) -> Result<()> {
        let j = self.height - 1 - row as u32;
        for (i, px) in out.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&self.pixel_color(i as u32, j)?);
        }
        Ok(())
    }

    /// Final color of pixel `(i, j)`.
    pub fn pixel_color(&self, i: u32, j: u32) -> Result<[u8; 4]> {
        let samples = self.config.samples_per_pixel.max(1);
        if samples == 1 {
            return Ok(color_to_rgba(self.sample(i as f32, j as f32)?));
        }

        // Seeded per pixel so any traversal order gives the same image
        let seed = u64::from(j) * u64::from(self.width) + u64::from(i);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut color = Color::ZERO;
        for _ in 0..samples {
            let dx = rng.gen::<f32>() - 0.5;
            let dy = rng.gen::<f32>() - 0.5;
            color += self.sample(i as f32 + dx, j as f32 + dy)?;
        }
        Ok(color_to_rgba(color / samples as f32))
    }

    /// Closest hit through the center of pixel `(i, j)`.
    pub fn trace_pixel(&self, i: u32, j: u32) -> Result<HitRecord<'_>> {
        let ray = self.primary_ray(i as f32, j as f32)?;
        Ok(self
            .scene
            .closest_hit(&ray)?
            .map_or(HitRecord::miss(ray), |(_, rec)| rec))
    }

    /// The object visible at pixel `(i, j)`, if any.
    pub fn select_object(&self, i: u32, j: u32) -> Result<Option<ObjectId>> {
        let ray = self.primary_ray(i as f32, j as f32)?;
        let selected = self.scene.closest_hit(&ray)?.map(|(id, _)| id);
        if let Some(id) = selected {
            log::debug!("Selected object {} at pixel ({}, {})", id.0, i, j);
        }
        Ok(selected)
    }

    fn primary_ray(&self, x: f32, y: f32) -> Result<Ray> {
        let u = self.viewport.to_u(x, self.width);
        let v = self.viewport.to_v(y, self.height);
        self.camera.ray_for_pixel(u, v)
    }

    fn sample(&self, x: f32, y: f32) -> Result<Color> {
        let ray = self.primary_ray(x, y)?;
        self.shade(&ray)
    }

    fn shade(&self, ray: &Ray) -> Result<Color> {
        let Some((_, rec)) = self.scene.closest_hit(ray)? else {
            return Ok(self.config.background);
        };
        let Some(object) = rec.object else {
            return Ok(self.config.background);
        };

        let intensity =
            self.light_intensity(rec.point, rec.normal, ray.direction(), object.specular_coeff())?;
        Ok(clamp(hadamard(object.color(), intensity), 0.0, 1.0))
    }

    /// Ambient term plus the contribution of every light with a clear line
    /// of sight to `point`.
    fn light_intensity(
        &self,
        point: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        specular_coeff: f32,
    ) -> Result<Color> {
        let mut intensity = self.ambient.light();

        for light in self.scene.lights() {
            let to_light = light.position - point;
            let distance = to_light.length();
            let light_dir = normalize(to_light)?;

            let shadow_ray = Ray::new(point, light_dir);
            if let Some((_, blocker)) = self.scene.closest_hit(&shadow_ray)? {
                if blocker.t < distance {
                    continue;
                }
            }

            intensity += match self.config.shading {
                Shading::BlinnPhong => {
                    light.diffuse_color(normal, light_dir, view_dir, specular_coeff)?
                }
                Shading::Lambert => light.illumination(normal.dot(light_dir)),
            };
        }

        Ok(intensity)
    }
}
