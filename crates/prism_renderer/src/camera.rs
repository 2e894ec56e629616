//! Camera for ray generation.

use crate::{Ray, Result};
use prism_math::{normalize, Mat4, Mat4Ext, Vec3};
use serde::{Deserialize, Serialize};

/// Reference axis used to rebuild the basis after a rotation.
/// `w × ROTATION_UP` matches the `v = w × u` handedness of the constructor.
const ROTATION_UP: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// How camera rays leave the view plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// All rays share the forward direction and start on the view plane.
    Parallel,
    /// All rays start at the camera position.
    #[default]
    Perspective,
}

/// Camera for generating rays into the scene.
///
/// The basis is `u` (right), `v` (up) and `w` (forward). It is only
/// orthonormal if the construction inputs were; `v` is taken as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    /// Distance from the eye to the view plane (zoom)
    distance: f32,
    projection: Projection,

    // Pose restored by reset()
    default_position: Vec3,
    default_u: Vec3,
    default_v: Vec3,
    default_w: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking along `direction`, with `right`
    /// as the horizontal axis. The up axis is `direction × right`.
    pub fn new(position: Vec3, direction: Vec3, right: Vec3, projection: Projection) -> Self {
        let w = direction;
        let u = right;
        let v = w.cross(u);

        Self {
            position,
            u,
            v,
            w,
            distance: 1.0,
            projection,
            default_position: position,
            default_u: u,
            default_v: v,
            default_w: w,
        }
    }

    /// Create a perspective camera.
    pub fn perspective(position: Vec3, direction: Vec3, right: Vec3) -> Self {
        Self::new(position, direction, right, Projection::Perspective)
    }

    /// Create a parallel (orthographic) camera.
    pub fn parallel(position: Vec3, direction: Vec3, right: Vec3) -> Self {
        Self::new(position, direction, right, Projection::Parallel)
    }

    /// Move the camera by `delta`.
    pub fn pan(&mut self, delta: Vec3) {
        self.position += delta;
        log::debug!("Camera panned to {:?}", self.position);
    }

    /// Multiply the view-plane distance by `alpha`.
    pub fn zoom(&mut self, alpha: f32) {
        self.distance *= alpha;
        log::debug!("Camera zoom distance {:.3}", self.distance);
    }

    /// Orbit the camera: `m` moves the position as a point and the forward
    /// axis as a direction, then right/up are rebuilt from scratch.
    pub fn rotate(&mut self, m: &Mat4) -> Result<()> {
        let w = normalize(m.apply_direction(self.w))?;
        let u = normalize(w.cross(ROTATION_UP))?;
        let v = normalize(w.cross(u))?;

        self.position = m.apply_point(self.position);
        self.u = u;
        self.v = v;
        self.w = w;

        log::debug!("Camera rotated to {:?}, forward {:?}", self.position, self.w);
        Ok(())
    }

    /// Restore the construction pose and a zoom distance of 1.
    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.u = self.default_u;
        self.v = self.default_v;
        self.w = self.default_w;
        self.distance = 1.0;
    }

    /// Generate the ray through view-plane coordinates `(u, v)`.
    pub fn ray_for_pixel(&self, u: f32, v: f32) -> Result<Ray> {
        let offset = u * self.u + v * self.v;

        let ray = match self.projection {
            Projection::Perspective => {
                Ray::new(self.position, normalize(offset + self.distance * self.w)?)
            }
            Projection::Parallel => Ray::new(self.position + offset, normalize(self.w)?),
        };
        Ok(ray)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn right(&self) -> Vec3 {
        self.u
    }

    pub fn up(&self) -> Vec3 {
        self.v
    }

    pub fn forward(&self) -> Vec3 {
        self.w
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{rotation_y, translation};
    use std::f32::consts::PI;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    fn front_camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, Vec3::X)
    }

    #[test]
    fn test_camera_basis() {
        let camera = front_camera();

        assert_eq!(camera.forward(), Vec3::Z);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::Y);
        assert_eq!(camera.distance(), 1.0);
    }

    #[test]
    fn test_up_axis_not_renormalized() {
        // Non-unit inputs carry straight through to the up axis
        let camera = Camera::perspective(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), Vec3::X);
        assert_eq!(camera.up(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_perspective_rays() {
        let camera = front_camera();

        let center = camera.ray_for_pixel(0.0, 0.0).unwrap();
        assert_eq!(center.origin(), Vec3::new(0.0, 0.0, -3.0));
        assert_vec_near(center.direction(), Vec3::Z);

        let corner = camera.ray_for_pixel(1.0, 1.0).unwrap();
        assert_eq!(corner.origin(), camera.position());
        assert_vec_near(corner.direction(), Vec3::ONE.normalize());
    }

    #[test]
    fn test_parallel_rays() {
        let camera = Camera::parallel(Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        let ray = camera.ray_for_pixel(0.5, -0.25).unwrap();

        // Up axis is (0, 5, 0) because the forward input was not unit length
        assert_vec_near(ray.origin(), Vec3::new(0.5, -1.25, -3.0));
        assert_vec_near(ray.direction(), Vec3::Z);
    }

    #[test]
    fn test_zoom() {
        let mut camera = front_camera();
        camera.zoom(2.0);
        assert_eq!(camera.distance(), 2.0);

        let ray = camera.ray_for_pixel(1.0, 0.0).unwrap();
        assert_vec_near(ray.direction(), Vec3::new(1.0, 0.0, 2.0).normalize());
    }

    #[test]
    fn test_pan() {
        let mut camera = front_camera();
        camera.pan(Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(camera.position(), Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_rotate_rebuilds_basis() {
        let mut camera = front_camera();
        camera.rotate(&rotation_y(PI / 2.0)).unwrap();

        assert_vec_near(camera.position(), Vec3::new(-3.0, 0.0, 0.0));
        assert_vec_near(camera.forward(), Vec3::X);
        assert_vec_near(camera.right(), -Vec3::Z);
        assert_vec_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_rotate_degenerate_forward() {
        // Looking straight along the rotation up axis has no defined right
        let mut camera = Camera::perspective(Vec3::ZERO, Vec3::Y, Vec3::X);
        assert!(camera.rotate(&Mat4::IDENTITY).is_err());
    }

    #[test]
    fn test_reset() {
        let mut camera = front_camera();
        let original = camera;

        camera.pan(Vec3::new(4.0, 0.0, 0.0));
        camera.zoom(3.0);
        camera.rotate(&rotation_y(0.4)).unwrap();
        camera.rotate(&translation(0.0, 1.0, 0.0)).unwrap();
        camera.reset();

        assert_eq!(camera, original);
    }
}
