//! Error type for the renderer.

use prism_math::MathError;
use thiserror::Error;

/// Fatal errors raised while rendering or editing a scene.
///
/// Misses and occluded shadow rays are not errors; they are reported through
/// [`HitRecord`](crate::HitRecord).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("degenerate geometry: {0}")]
    Math(#[from] MathError),

    #[error("image buffer is {actual_width}x{actual_height}, renderer expects {expected_width}x{expected_height}")]
    BufferSize {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;
