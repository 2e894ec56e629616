//! Ambient and point light sources.

use crate::Result;
use prism_math::{normalize, Vec3};
use serde::{Deserialize, Serialize};

/// RGB color type (linear, nominally 0-1).
pub type Color = Vec3;

/// Weight applied to the Lambertian term.
const DIFFUSE_WEIGHT: f32 = 0.5;
/// Weight applied to the Blinn-Phong highlight.
const SPECULAR_WEIGHT: f32 = 0.7;
/// Blinn-Phong shininess exponent.
const SHININESS: i32 = 1000;

/// Constant light added to every shaded pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    coefficient: f32,
    color: Color,
    light: Color,
}

impl AmbientLight {
    /// Create an ambient light; the contributed term is `coefficient * color`.
    pub fn new(coefficient: f32, color: Color) -> Self {
        Self {
            coefficient,
            color,
            light: coefficient * color,
        }
    }

    /// The precomputed ambient term.
    #[inline]
    pub fn light(&self) -> Color {
        self.light
    }

    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(0.3, Color::ONE)
    }
}

/// An omnidirectional light at a point, casting hard shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub diffuse_coeff: f32,
    pub color: Color,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3, diffuse_coeff: f32, color: Color) -> Self {
        Self {
            position,
            diffuse_coeff,
            color,
        }
    }

    /// Lambertian diffuse plus Blinn-Phong specular contribution.
    ///
    /// `light_dir` points from the surface toward the light and `view_dir`
    /// is the direction of the incoming camera ray; both are unit length.
    /// `specular_coeff` comes from the surface being shaded.
    pub fn diffuse_color(
        &self,
        normal: Vec3,
        light_dir: Vec3,
        view_dir: Vec3,
        specular_coeff: f32,
    ) -> Result<Color> {
        let lambert = DIFFUSE_WEIGHT * self.diffuse_coeff * normal.dot(light_dir).max(0.0);

        let to_eye = normalize(-view_dir)?;

        // No half vector when the light sits straight behind the surface
        // on the view line; there is no highlight either.
        let phong = match normalize(to_eye + light_dir) {
            Ok(half) => {
                SPECULAR_WEIGHT * specular_coeff * normal.dot(half).max(0.0).powi(SHININESS)
            }
            Err(_) => 0.0,
        };

        Ok(lambert * self.color + phong * self.color)
    }

    /// Plain Lambertian illumination for a precomputed `cos(angle)`.
    #[inline]
    pub fn illumination(&self, angle: f32) -> Color {
        self.diffuse_coeff * angle.max(0.0) * self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_light() -> PointLight {
        PointLight::new(Vec3::new(0.0, 5.0, 0.0), 0.7, Color::ONE)
    }

    #[test]
    fn test_ambient_term() {
        let ambient = AmbientLight::new(0.3, Color::new(1.0, 0.5, 0.0));
        assert!((ambient.light() - Color::new(0.3, 0.15, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_lambert_head_on() {
        let light = white_light();
        // Light straight along the normal, viewer off to the side so the
        // highlight vanishes
        let c = light
            .diffuse_color(Vec3::Y, Vec3::Y, Vec3::new(1.0, 0.0, 0.0), 0.0)
            .unwrap();
        assert!((c - Color::splat(0.35)).length() < 1e-6);
    }

    #[test]
    fn test_light_behind_surface() {
        let light = white_light();
        let c = light
            .diffuse_color(Vec3::Y, -Vec3::Y, Vec3::new(1.0, 0.0, 0.0), 1.0)
            .unwrap();
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_specular_highlight() {
        let light = white_light();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        // Mirror configuration: the half vector equals the normal
        let view = Vec3::new(1.0, -1.0, 0.0).normalize();

        let without = light.diffuse_color(Vec3::Y, l, view, 0.0).unwrap();
        let with = light.diffuse_color(Vec3::Y, l, view, 1.0).unwrap();

        assert!((with - without - Color::splat(0.7)).length() < 1e-3);
    }

    #[test]
    fn test_specular_falls_off_sharply() {
        let light = white_light();
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let view = Vec3::new(0.5, -1.0, 0.0).normalize();

        let without = light.diffuse_color(Vec3::Y, l, view, 0.0).unwrap();
        let with = light.diffuse_color(Vec3::Y, l, view, 1.0).unwrap();

        // Away from the mirror direction the exponent kills the highlight
        assert!((with - without).length() < 1e-3);
    }

    #[test]
    fn test_back_lit_on_view_line() {
        let light = white_light();
        // Light straight behind a surface facing the camera: the half
        // vector cancels out and neither term contributes
        let color = light
            .diffuse_color(-Vec3::Z, Vec3::Z, Vec3::Z, 1.0)
            .unwrap();
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_zero_view_direction_is_an_error() {
        let light = white_light();
        assert!(light.diffuse_color(Vec3::Y, Vec3::Y, Vec3::ZERO, 1.0).is_err());
    }

    #[test]
    fn test_illumination() {
        let light = PointLight::new(Vec3::ZERO, 0.5, Color::new(1.0, 0.0, 1.0));
        assert_eq!(light.illumination(1.0), Color::new(0.5, 0.0, 0.5));
        assert_eq!(light.illumination(-0.3), Color::ZERO);
    }
}
