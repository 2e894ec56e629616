//! Finite right circular cone (lateral surface only).

use crate::{HitRecord, Primitive, Ray, Result, Surface};
use prism_math::{min_distance, normalize, solve_quadratic, Mat4, Mat4Ext, Vec3, EPSILON};

/// A cone with its tip at `apex`, opening toward `base_center`.
///
/// `axis`, `height` and `cos_angle` are derived from the endpoints and
/// rebuilt after every transform.
#[derive(Debug, Clone)]
pub struct Cone {
    apex: Vec3,
    base_center: Vec3,
    half_angle: f32,
    surface: Surface,

    axis: Vec3,
    height: f32,
    cos_angle: f32,

    default_apex: Vec3,
    default_base_center: Vec3,
}

impl Cone {
    /// Create a new cone. Fails if `apex` and `base_center` coincide.
    pub fn new(apex: Vec3, base_center: Vec3, half_angle: f32, surface: Surface) -> Result<Self> {
        let mut cone = Self {
            apex,
            base_center,
            half_angle,
            surface,
            axis: Vec3::ZERO,
            height: 0.0,
            cos_angle: half_angle.cos(),
            default_apex: apex,
            default_base_center: base_center,
        };
        cone.update_frame()?;
        Ok(cone)
    }

    fn update_frame(&mut self) -> Result<()> {
        let along = self.base_center - self.apex;
        let axis = normalize(along)?;

        self.axis = axis;
        self.height = along.length();
        self.cos_angle = self.half_angle.cos();
        Ok(())
    }

    /// Midpoint of the axis; rotation and scale happen about this point.
    fn pivot(&self) -> Vec3 {
        self.apex + self.axis * (self.height / 2.0)
    }

    fn transform_about_pivot(&mut self, m: &Mat4) -> Result<()> {
        let pivot = self.pivot();
        self.apex = pivot + m.apply_point(self.apex - pivot);
        self.base_center = pivot + m.apply_point(self.base_center - pivot);
        self.update_frame()
    }

    pub fn apex(&self) -> Vec3 {
        self.apex
    }

    pub fn base_center(&self) -> Vec3 {
        self.base_center
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn half_angle(&self) -> f32 {
        self.half_angle
    }
}

impl Primitive for Cone {
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        let d = ray.direction();
        let co = ray.origin() - self.apex;

        let dv = d.dot(self.axis);
        let cv = co.dot(self.axis);
        let cos2 = self.cos_angle * self.cos_angle;

        let a = dv * dv - cos2;
        let b = 2.0 * (dv * cv - d.dot(co) * cos2);
        let c = cv * cv - co.length_squared() * cos2;

        let (t1, t2) = if a.abs() <= f32::EPSILON {
            // Parallel to a generator line: one crossing at most
            if b.abs() <= f32::EPSILON {
                return Ok(HitRecord::miss(*ray));
            }
            let t = -c / b;
            (t, t)
        } else {
            let Some(roots) = solve_quadratic(a, b, c) else {
                return Ok(HitRecord::miss(*ray));
            };
            roots
        };

        let t = min_distance(t1, t2);
        if !t.is_finite() || t < EPSILON {
            return Ok(HitRecord::miss(*ray));
        }

        let p = ray.at(t);
        let cp = p - self.apex;

        // Reject the mirrored nappe and anything past the base
        let h = cp.dot(self.axis);
        if h < EPSILON || h > self.height {
            return Ok(HitRecord::miss(*ray));
        }

        let normal = normalize(cp * (self.axis.dot(cp) / cp.dot(cp)) - self.axis)?;
        Ok(HitRecord::new(t, p, normal, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "cone"
    }

    fn rotate(&mut self, m: &Mat4) -> Result<()> {
        self.transform_about_pivot(m)?;
        log::debug!("Cone rotated, apex {:?} base {:?}", self.apex, self.base_center);
        Ok(())
    }

    fn translate(&mut self, m: &Mat4) -> Result<()> {
        self.apex = m.apply_point(self.apex);
        self.base_center = m.apply_point(self.base_center);
        self.update_frame()
    }

    fn scale(&mut self, m: &Mat4) -> Result<()> {
        self.transform_about_pivot(m)
    }

    fn reset(&mut self) -> Result<()> {
        self.apex = self.default_apex;
        self.base_center = self.default_base_center;
        self.update_frame()
    }
}
