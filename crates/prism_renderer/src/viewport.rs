//! Mapping from pixel coordinates onto the camera's view plane.

use serde::{Deserialize, Serialize};

/// A rectangle on the view plane, `[left, right] × [bottom, top]`.
///
/// Pixel indices are mapped to the center of their cell, so pixel 0 of a
/// 4-pixel row lands an eighth of the way in from `left`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Viewport {
    /// A viewport centered on the optical axis with half-extents
    /// `w_extent` and `h_extent`.
    pub fn new(w_extent: f32, h_extent: f32) -> Self {
        Self {
            left: -w_extent,
            right: w_extent,
            bottom: -h_extent,
            top: h_extent,
        }
    }

    /// A viewport from explicit extents.
    pub fn from_extents(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Horizontal view-plane coordinate of pixel column `x` in a `width`-wide image.
    ///
    /// `x` is fractional so sub-pixel samples can be placed anywhere in the cell.
    #[inline]
    pub fn to_u(&self, x: f32, width: u32) -> f32 {
        self.left + ((self.right - self.left) * (x + 0.5)) / width as f32
    }

    /// Vertical view-plane coordinate of pixel row `y` in a `height`-tall image.
    #[inline]
    pub fn to_v(&self, y: f32, height: u32) -> f32 {
        self.bottom + ((self.top - self.bottom) * (y + 0.5)) / height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
