//! Prism - CPU ray caster
//!
//! Whitted-style direct lighting over a small, closed set of analytic shapes
//! and triangle meshes:
//! - One primary ray per pixel, or several jittered samples
//! - Ambient light plus Blinn-Phong point lights with hard shadows
//! - Parallel rendering over image rows with rayon

mod camera;
mod error;
mod hittable;
mod light;
mod primitives;
mod ray;
mod renderer;
mod scene;
mod viewport;

pub use camera::{Camera, Projection};
pub use error::{RenderError, Result};
pub use hittable::{HitRecord, Primitive, Surface};
pub use light::{AmbientLight, Color, PointLight};
pub use primitives::{BoundingBox, Cone, Cylinder, NormalMode, Plane, Sphere, TriangleMesh};
pub use ray::Ray;
pub use renderer::{color_to_rgba, ImageBuffer, RenderConfig, Renderer, Shading};
pub use scene::{LightId, ObjectId, Scene};
pub use viewport::Viewport;

/// Re-export the math types and transform builders from prism_math
pub use prism_math::{
    rotation_x, rotation_y, rotation_z, scaling, translation, Mat4, MathError, Vec3,
};
