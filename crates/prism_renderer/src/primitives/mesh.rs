//! Indexed triangle mesh with a bounding-box pretest.
//!
//! Mesh files are parsed elsewhere; this type takes positions, index triples
//! and optional per-vertex normals that have already been loaded.

use crate::{BoundingBox, HitRecord, Primitive, Ray, Result, Sphere, Surface};
use prism_math::{normalize, Mat4, Vec3, EPSILON};
use serde::{Deserialize, Serialize};

/// Minimum extent of the bounding box along any axis.
const BOX_PADDING: f32 = 0.0001;

/// Which per-vertex normals are interpolated across a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalMode {
    /// Normals as supplied by the loader
    Raw,
    /// Normalized sum of adjacent face normals
    #[default]
    Smoothed,
}

/// A triangle mesh placed at a fixed offset in the scene.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    position: Vec3,
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    raw_normals: Vec<Vec3>,
    smoothed_normals: Vec<Vec3>,
    normal_mode: NormalMode,
    bounding_box: BoundingBox,
    bounding_sphere: Sphere,
    surface: Surface,
}

impl TriangleMesh {
    /// Build a mesh from loaded geometry.
    ///
    /// `vertices` are offset by `position`. Triangles that reference a
    /// missing vertex are dropped. When `normals` is absent or does not
    /// have one entry per vertex, the smoothed normals stand in for it.
    pub fn new(
        position: Vec3,
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<Vec3>>,
        surface: Surface,
    ) -> Self {
        let vertices: Vec<Vec3> = vertices.into_iter().map(|v| v + position).collect();

        let vertex_count = vertices.len();
        let total = triangles.len();
        let triangles: Vec<[u32; 3]> = triangles
            .into_iter()
            .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
            .collect();
        if triangles.len() < total {
            log::warn!(
                "Dropped {} of {} triangles referencing missing vertices",
                total - triangles.len(),
                total
            );
        }

        let smoothed_normals = Self::compute_smoothed_normals(&vertices, &triangles);
        let raw_normals = match normals {
            Some(normals) if normals.len() == vertex_count => normals,
            Some(normals) => {
                log::debug!(
                    "Mesh has {} normals for {} vertices, using smoothed normals",
                    normals.len(),
                    vertex_count
                );
                smoothed_normals.clone()
            }
            None => smoothed_normals.clone(),
        };

        let bounding_box = Self::compute_bounds(&vertices);
        let center = bounding_box.centroid();
        let radius = vertices
            .iter()
            .map(|v| v.distance(center))
            .fold(0.0f32, f32::max);
        let bounding_sphere = Sphere::new(center, radius, surface);

        Self {
            position,
            vertices,
            triangles,
            raw_normals,
            smoothed_normals,
            normal_mode: NormalMode::default(),
            bounding_box,
            bounding_sphere,
            surface,
        }
    }

    /// Compute an axis-aligned box around the vertices, padded so that
    /// flat meshes keep a nonzero thickness.
    fn compute_bounds(vertices: &[Vec3]) -> BoundingBox {
        if vertices.is_empty() {
            return BoundingBox::new(Vec3::ZERO, Vec3::ZERO);
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in vertices {
            min = min.min(*v);
            max = max.max(*v);
        }

        for axis in 0..3 {
            if max[axis] - min[axis] < BOX_PADDING {
                min[axis] -= BOX_PADDING / 2.0;
                max[axis] += BOX_PADDING / 2.0;
            }
        }

        BoundingBox::new(min, max)
    }

    /// Each vertex normal is the normalized sum of the face normals of the
    /// triangles sharing it.
    fn compute_smoothed_normals(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; vertices.len()];

        for &[a, b, c] in triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let edge1 = vertices[b] - vertices[a];
            let edge2 = vertices[c] - vertices[a];
            let face_normal = edge1.cross(edge2);

            normals[a] += face_normal;
            normals[b] += face_normal;
            normals[c] += face_normal;
        }

        for normal in &mut normals {
            *normal = normalize(*normal).unwrap_or(Vec3::Y); // Isolated or degenerate
        }
        normals
    }

    pub fn set_normal_mode(&mut self, mode: NormalMode) {
        self.normal_mode = mode;
    }

    pub fn normal_mode(&self) -> NormalMode {
        self.normal_mode
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    fn normals(&self) -> &[Vec3] {
        match self.normal_mode {
            NormalMode::Raw => &self.raw_normals,
            NormalMode::Smoothed => &self.smoothed_normals,
        }
    }
}

impl Primitive for TriangleMesh {
    /// Möller-Trumbore against every triangle, nearest hit wins.
    ///
    /// Triangles are one-sided: the front face is the one whose
    /// `(B - A) × (C - A)` points against the ray.
    fn hit(&self, ray: &Ray) -> Result<HitRecord<'_>> {
        if self.triangles.is_empty() || !self.bounding_box.hit(ray)?.hit {
            return Ok(HitRecord::miss(*ray));
        }

        let origin = ray.origin();
        let dir = ray.direction();

        // (t, alpha, beta, triangle)
        let mut closest: Option<(f32, f32, f32, [u32; 3])> = None;

        for &tri in &self.triangles {
            let a = self.vertices[tri[0] as usize];
            let b = self.vertices[tri[1] as usize];
            let c = self.vertices[tri[2] as usize];

            let edge1 = b - a;
            let edge2 = c - a;
            let h = dir.cross(edge2);
            let det = h.dot(edge1);

            // Back-facing or parallel
            if det < EPSILON {
                continue;
            }

            let s = origin - a;
            let alpha = s.dot(h) / det;
            if !(0.0..=1.0).contains(&alpha) {
                continue;
            }

            let q = s.cross(edge1);
            let beta = dir.dot(q) / det;
            if beta < 0.0 || alpha + beta > 1.0 {
                continue;
            }

            let t = edge2.dot(q) / det;
            if t > EPSILON && closest.map_or(true, |(best, ..)| t < best) {
                closest = Some((t, alpha, beta, tri));
            }
        }

        let Some((t, alpha, beta, [ia, ib, ic])) = closest else {
            return Ok(HitRecord::miss(*ray));
        };

        let normals = self.normals();
        let gamma = 1.0 - alpha - beta;
        let normal = normalize(
            gamma * normals[ia as usize] + alpha * normals[ib as usize] + beta * normals[ic as usize],
        )?;

        Ok(HitRecord::new(t, ray.at(t), normal, self, *ray))
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }

    fn name(&self) -> &'static str {
        "mesh"
    }

    fn rotate(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn translate(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn scale(&mut self, _m: &Mat4) -> Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}
