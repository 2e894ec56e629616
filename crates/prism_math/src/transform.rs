// Affine transform builders
//
// Primitives and the camera consume plain Mat4 values. Columns hold the
// basis images, column 3 holds the translation.

use glam::{Mat4, Vec3, Vec4};

use crate::linalg::matmul;

/// Translation by `(x, y, z)`.
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

/// Non-uniform scale. Shapes that carry a scalar radius read `M[0][0]`.
pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Right-handed rotation of `theta` radians about +X.
pub fn rotation_x(theta: f32) -> Mat4 {
    let (s, c) = theta.sin_cos();
    Mat4::from_cols(
        Vec4::X,
        Vec4::new(0.0, c, s, 0.0),
        Vec4::new(0.0, -s, c, 0.0),
        Vec4::W,
    )
}

/// Right-handed rotation of `theta` radians about +Y.
pub fn rotation_y(theta: f32) -> Mat4 {
    let (s, c) = theta.sin_cos();
    Mat4::from_cols(
        Vec4::new(c, 0.0, -s, 0.0),
        Vec4::Y,
        Vec4::new(s, 0.0, c, 0.0),
        Vec4::W,
    )
}

/// Right-handed rotation of `theta` radians about +Z.
pub fn rotation_z(theta: f32) -> Mat4 {
    let (s, c) = theta.sin_cos();
    Mat4::from_cols(
        Vec4::new(c, s, 0.0, 0.0),
        Vec4::new(-s, c, 0.0, 0.0),
        Vec4::Z,
        Vec4::W,
    )
}

/// Extension trait for applying a Mat4 to 3D points and directions.
pub trait Mat4Ext {
    /// Transform a point (implicit w=1, translation applies).
    fn apply_point(&self, point: Vec3) -> Vec3;

    /// Transform a direction (implicit w=0, translation ignored).
    fn apply_direction(&self, direction: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn apply_point(&self, point: Vec3) -> Vec3 {
        matmul(self, point.extend(1.0)).truncate()
    }

    fn apply_direction(&self, direction: Vec3) -> Vec3 {
        matmul(self, direction.extend(0.0)).truncate()
    }
}
