//! Finite open cylinder (lateral surface only, no caps).

use crate::{HitRecord, Primitive, Ray, Result, Surface};
use prism_math::{min_distance, normalize, solve_quadratic, Mat4, Mat4Ext, Vec3, EPSILON};

/// A cylinder between `bottom` and `top`.
#[derive(Debug, Clone)]
pub struct Cylinder {
    top: Vec3,
    bottom: Vec3,
    radius: f32,
    surface: Surface,

    axis: Vec3,
    height: f32,

    default_top: Vec3,
    default_bottom: Vec3,
    default_radius: f32,
}

impl Cylinder {
    /// Create a new cylinder. Fails if `top` and `bottom` coincide.
    pub fn new(top: Vec3, bottom: Vec3, radius: f32, surface: Surface) -> Result<Self> {
        let mut cylinder = Self {
            top,
            bottom,
            radius,
            surface,
            axis: Vec3::ZERO,
            height: 0.0,
            default_top: top,
            default_bottom: bottom,
            default_radius: radius,
        };
        cylinder.update_frame()?;
        Ok(cylinder)
    }

    fn update_frame(&mut self) -> Result<()> {
        let along = self.top - self.bottom;
        self.axis = normalize(along)?;
        self.height = along.length();
        Ok(())
    }

    fn transform_about_pivot(&mut self, m: &Mat4) -> Result<()> {
        let pivot = self.bottom + self.axis * (self.height / 2.0);
        self.top = pivot + m.apply_point(self.top - pivot);
        self.bottom = pivot + m.apply_point(self.bottom - pivot);
        self.update_frame()
    }

    pub fn top(&self) -> Vec3 {
        self.top
    }

    pub fn bottom(&self) -> Vec3 {
        self.bottom
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Primitive for Cylinder {
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        let d = ray.direction();
        let co = ray.origin() - self.bottom;

        let da = d.dot(self.axis);
        let ba = co.dot(self.axis);

        let a = d.length_squared() - da * da;
        let b = 2.0 * (d.dot(co) - da * ba);
        let c = co.length_squared() - ba * ba - self.radius * self.radius;

        let Some((t1, t2)) = solve_quadratic(a, b, c) else {
            return Ok(HitRecord::miss(*ray));
        };

        let t = min_distance(t1, t2);
        if !t.is_finite() || t < EPSILON {
            return Ok(HitRecord::miss(*ray));
        }

        let p = ray.at(t);
        let cp = p - self.bottom;
        let h = cp.dot(self.axis);
        if h < EPSILON || h > self.height {
            return Ok(HitRecord::miss(*ray));
        }

        let normal = normalize(cp - self.axis * h)?;
        Ok(HitRecord::new(t, p, normal, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "cylinder"
    }

    fn rotate(&mut self, m: &Mat4) -> Result<()> {
        self.transform_about_pivot(m)?;
        log::debug!("Cylinder rotated, top {:?} bottom {:?}", self.top, self.bottom);
        Ok(())
    }

    fn translate(&mut self, m: &Mat4) -> Result<()> {
        self.top = m.apply_point(self.top);
        self.bottom = m.apply_point(self.bottom);
        self.update_frame()
    }

    /// Scales the endpoints about the midpoint and the radius by the X factor.
    fn scale(&mut self, m: &Mat4) -> Result<()> {
        self.transform_about_pivot(m)?;
        self.radius *= m.x_axis.x;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.top = self.default_top;
        self.bottom = self.default_bottom;
        self.radius = self.default_radius;
        self.update_frame()
    }
}
