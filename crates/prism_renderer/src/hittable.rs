//! Primitive trait and HitRecord for ray-object intersection.

use std::fmt;

use crate::{Color, Ray, Result};
use prism_math::{Mat4, Vec3};

/// Surface appearance shared by every primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Base color (RGB, 0-1)
    pub color: Color,
    /// Weight of the Blinn-Phong highlight
    pub specular_coeff: f32,
    /// Whether the surface is flagged as a mirror
    pub reflect: bool,
}

impl Surface {
    /// Create a non-reflective surface.
    pub fn new(color: Color, specular_coeff: f32) -> Self {
        Self {
            color,
            specular_coeff,
            reflect: false,
        }
    }

    /// Set the reflectivity flag.
    pub fn reflective(mut self, reflect: bool) -> Self {
        self.reflect = reflect;
        self
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(Color::ONE, 0.0)
    }
}

/// Record of a ray-object intersection.
///
/// A miss is encoded as `hit == false` with `t == -1`; `point` and `normal`
/// are zero in that case and must not be read.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Whether the ray hit the primitive
    pub hit: bool,
    /// Parameter t where the intersection occurs (-1 on a miss)
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection
    pub normal: Vec3,
    /// Primitive that was hit
    pub object: Option<&'a dyn Primitive>,
    /// The incoming ray
    pub ray: Ray,
}

impl<'a> HitRecord<'a> {
    /// Sentinel distance stored in a miss.
    pub const NO_HIT: f32 = -1.0;

    /// A record for a ray that hit nothing.
    pub fn miss(ray: Ray) -> Self {
        Self {
            hit: false,
            t: Self::NO_HIT,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            object: None,
            ray,
        }
    }

    /// A record for a ray that hit `object` at distance `t`.
    pub fn new(t: f32, point: Vec3, normal: Vec3, object: &'a dyn Primitive, ray: Ray) -> Self {
        Self {
            hit: true,
            t,
            point,
            normal,
            object: Some(object),
            ray,
        }
    }
}

impl fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitRecord")
            .field("hit", &self.hit)
            .field("t", &self.t)
            .field("point", &self.point)
            .field("normal", &self.normal)
            .field("object", &self.object.map(|o| o.name()))
            .field("ray", &self.ray)
            .finish()
    }
}

/// A shape that can be intersected, shaded, and edited in place.
///
/// Every shape implements every operation. Transforms that are meaningless
/// for a shape (a plane, a box, a mesh) are explicit no-ops.
pub trait Primitive: Send + Sync {
    /// Intersect `ray` with the shape.
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>>;

    /// Surface parameters.
    fn surface(&self) -> &Surface;

    /// Short shape name for logs and picking feedback.
    fn name(&self) -> &'static str;

    /// Rotate the shape by `m`.
    fn rotate(&mut self, m: &Mat4) -> Result<()>;

    /// Translate the shape by `m`.
    fn translate(&mut self, m: &Mat4) -> Result<()>;

    /// Scale the shape by `m`.
    fn scale(&mut self, m: &Mat4) -> Result<()>;

    /// Restore the parameters passed at construction.
    fn reset(&mut self) -> Result<()>;

    fn color(&self) -> Color {
        self.surface().color
    }

    fn specular_coeff(&self) -> f32 {
        self.surface().specular_coeff
    }

    fn is_reflect_enabled(&self) -> bool {
        self.surface().reflect
    }
}
