//! Axis-aligned bounding box used as an accept/reject gate.

use crate::{HitRecord, Primitive, Ray, Result, Surface};
use prism_math::{Mat4, Vec3};

/// Axis-aligned box between two corners.
///
/// A hit only fills in `t` (the entry distance); `point` and `normal` stay
/// zero. The box is meant for pretests, not for shading.
#[derive(Debug, Clone)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
    surface: Surface,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            surface: Surface::default(),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl Primitive for BoundingBox {
    /// Slab test: clip the ray against each axis in turn.
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        let origin = ray.origin();
        let inv_dir = ray.direction().recip();

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let mut t0 = (self.min[axis] - origin[axis]) * inv_dir[axis];
            let mut t1 = (self.max[axis] - origin[axis]) * inv_dir[axis];
            if inv_dir[axis] < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t0.max(t_near);
            t_far = t1.min(t_far);

            if t_far < t_near {
                return Ok(HitRecord::miss(*ray));
            }
        }

        // Box entirely behind the origin
        if t_far < 0.0 {
            return Ok(HitRecord::miss(*ray));
        }

        Ok(HitRecord::new(t_near, Vec3::ZERO, Vec3::ZERO, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "bounding box"
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

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{scaling, translation};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_box_hit() {
        let bbox = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let rec = bbox.hit(&ray).unwrap();

        assert!(rec.hit);
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert_eq!(rec.point, Vec3::ZERO);
        assert_eq!(rec.normal, Vec3::ZERO);
    }

    #[test]
    fn test_box_diagonal_hit() {
        let bbox = unit_box();
        let ray = Ray::new(Vec3::splat(-3.0), Vec3::ONE.normalize());
        let rec = bbox.hit(&ray).unwrap();

        assert!(rec.hit);
        assert!((rec.t - 2.0 * 3.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_box_miss() {
        let bbox = unit_box();

        // Passes beside the box
        let beside = Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z);
        assert!(!bbox.hit(&beside).unwrap().hit);

        // Slabs overlap only behind the box on one axis
        let skew = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::new(1.0, 1.0, 0.0).normalize());
        assert!(!bbox.hit(&skew).unwrap().hit);
    }

    #[test]
    fn test_box_behind_ray() {
        let bbox = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let rec = bbox.hit(&ray).unwrap();
        assert!(!rec.hit);
        assert_eq!(rec.t, -1.0);
    }

    #[test]
    fn test_origin_inside_box() {
        let bbox = unit_box();
        let rec = bbox.hit(&Ray::new(Vec3::ZERO, Vec3::X)).unwrap();

        // Entry distance is behind the origin, the box still counts as hit
        assert!(rec.hit);
        assert!((rec.t + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_box_transforms_are_noops() {
        let mut bbox = unit_box();
        bbox.translate(&translation(5.0, 0.0, 0.0)).unwrap();
        bbox.scale(&scaling(3.0, 3.0, 3.0)).unwrap();

        assert_eq!(bbox.min(), Vec3::splat(-1.0));
        assert_eq!(bbox.max(), Vec3::splat(1.0));
        assert_eq!(bbox.color(), Vec3::ONE);
    }
}
