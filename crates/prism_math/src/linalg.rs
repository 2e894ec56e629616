//! Scalar and vector helpers shared by every intersector.
//!
//! glam already provides the arithmetic (add, sub, scale, dot, cross); this
//! module adds the few operations whose exact semantics the intersectors
//! depend on: a fallible normalize, the quadratic solver and the root
//! selection rules.

use crate::{MathError, Mat4, Vec3, Vec4};

/// Tolerance used for "behind the origin", parallel-ray and self-hit tests.
pub const EPSILON: f32 = 1e-4;

/// Normalize `v` to unit length.
///
/// Fails with [`MathError::ZeroLength`] when `|v| == 0`; unlike
/// `Vec3::normalize` this never silently produces NaNs for degenerate input.
#[inline]
pub fn normalize(v: Vec3) -> Result<Vec3, MathError> {
    let len = v.length();
    if len == 0.0 {
        return Err(MathError::ZeroLength);
    }
    Ok(v / len)
}

/// Solve `a·t² + b·t + c = 0`.
///
/// Returns `None` when the discriminant is negative, otherwise both real
/// roots `((−b + √d) / 2a, (−b − √d) / 2a)`. The roots are not ordered.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t1 = (-b + root) / (2.0 * a);
    let t2 = (-b - root) / (2.0 * a);
    Some((t1, t2))
}

/// Pick the nearer root, falling back to the farther one when the nearer
/// root lies behind (or at) the ray origin.
#[inline]
pub fn min_distance(t1: f32, t2: f32) -> f32 {
    let min_t = t1.min(t2);
    let max_t = t1.max(t2);
    if min_t < EPSILON {
        max_t
    } else {
        min_t
    }
}

/// Dual of [`min_distance`]: the farther root unless it lies behind the origin.
#[inline]
pub fn max_distance(t1: f32, t2: f32) -> f32 {
    let min_t = t1.min(t2);
    let max_t = t1.max(t2);
    if max_t < EPSILON {
        min_t
    } else {
        max_t
    }
}

/// Clamp every component of `v` into `[min, max]`.
#[inline]
pub fn clamp(v: Vec3, min: f32, max: f32) -> Vec3 {
    v.clamp(Vec3::splat(min), Vec3::splat(max))
}

/// Componentwise product, used to tint light intensity by surface color.
#[inline]
pub fn hadamard(a: Vec3, b: Vec3) -> Vec3 {
    a * b
}

/// Apply `matrix` to a homogeneous vector.
///
/// `result[r] = Σ_c matrix[c][r] · v[c]` where `matrix[c]` is column `c`,
/// which is glam's column-major product.
#[inline]
pub fn matmul(matrix: &Mat4, v: Vec4) -> Vec4 {
    *matrix * v
}
