//! Infinite plane primitive.

use crate::{HitRecord, Primitive, Ray, Result, Surface};
use prism_math::{Mat4, Vec3, EPSILON};

/// An infinite plane through `point` with normal `normal`.
///
/// The reported normal always faces the incoming ray.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    surface: Surface,
}

impl Plane {
    /// Create a new plane.
    pub fn new(point: Vec3, normal: Vec3, surface: Surface) -> Self {
        Self {
            point,
            normal,
            surface,
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Primitive for Plane {
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        let denom = ray.direction().dot(self.normal);

        // Ray is parallel to the plane
        if denom.abs() <= EPSILON {
            return Ok(HitRecord::miss(*ray));
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if t < EPSILON {
            return Ok(HitRecord::miss(*ray));
        }

        let sign = if denom > 0.0 { -1.0 } else { 1.0 };
        Ok(HitRecord::new(t, ray.at(t), sign * self.normal, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "plane"
    }

    fn rotate(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn translate(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn scale(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}
