//! Sphere primitive for ray casting.

use crate::{HitRecord, Primitive, Ray, Result, Surface};
use prism_math::{min_distance, solve_quadratic, Mat4, Mat4Ext, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    surface: Surface,
    default_center: Vec3,
    default_radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, surface: Surface) -> Self {
        Self {
            center,
            radius,
            surface,
            default_center: center,
            default_radius: radius,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Primitive for Sphere {
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let Some((t1, t2)) = solve_quadratic(a, b, c) else {
            return Ok(HitRecord::miss(*ray));
        };

        // Either root may still be behind the origin; the renderer's
        // closest-hit scan discards those.
        let t = min_distance(t1, t2);
        let p = ray.at(t);
        let normal = (p - self.center) / self.radius;

        Ok(HitRecord::new(t, p, normal, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "sphere"
    }

    /// Spheres are rotationally symmetric about their center.
    fn rotate(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn translate(&mut self, m: &Mat4) -> Result<()> {
        self.center = m.apply_point(self.center);
        log::debug!("Sphere moved to {:?}", self.center);
        Ok(())
    }

    /// Uniform scale by the matrix's X factor.
    fn scale(&mut self, m: &Mat4) -> Result<()> {
        self.radius *= m.x_axis.x;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.center = self.default_center;
        self.radius = self.default_radius;
        Ok(())
    }
}
