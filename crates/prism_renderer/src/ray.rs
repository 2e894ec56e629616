//! Half-lines cast by the camera and toward lights.
//!
//! Primary rays start at the eye (or on the image plane for parallel
//! projection) and shadow rays start at a hit point. Both carry unit
//! directions, so `t` is a distance in world units.

use prism_math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point reached after travelling `t` along the ray. Negative `t` lies
    /// behind the origin; primitives report those as misses.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Looks down +Z from the world origin.
impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}
