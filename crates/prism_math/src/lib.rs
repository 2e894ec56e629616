// Re-export glam for convenience
pub use glam::*;

// Prism math kernel
pub mod linalg;
pub mod transform;

pub use linalg::{
    clamp, hadamard, matmul, max_distance, min_distance, normalize, solve_quadratic, EPSILON,
};
pub use transform::{rotation_x, rotation_y, rotation_z, scaling, translation, Mat4Ext};

use thiserror::Error;

/// Errors raised by the math kernel.
///
/// These are precondition violations: they indicate degenerate geometry or
/// camera state and are never part of normal control flow.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}
