//! Closed set of scene shapes.
//!
//! Each shape implements [`Primitive`](crate::Primitive) in its own module.

mod bounding_box;
mod cone;
mod cylinder;
mod mesh;
mod plane;
mod sphere;

pub use bounding_box::BoundingBox;
pub use cone::Cone;
pub use cylinder::Cylinder;
pub use mesh::{NormalMode, TriangleMesh};
pub use plane::Plane;
pub use sphere::Sphere;
