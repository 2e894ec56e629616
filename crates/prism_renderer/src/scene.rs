//! Scene storage: primitives and point lights addressed by stable handles.

use crate::{HitRecord, PointLight, Primitive, Ray, Result};
use prism_math::EPSILON;

/// Handle to a primitive in a [`Scene`].
///
/// Handles stay valid for the life of the scene; objects are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Handle to a point light in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// Append-only collection of primitives and point lights.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Primitive>>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive and return its handle.
    pub fn add_object<P: Primitive + 'static>(&mut self, object: P) -> ObjectId {
        let id = ObjectId(self.objects.len());
        log::debug!("Added {} as object {}", object.name(), id.0);
        self.objects.push(Box::new(object));
        id
    }

    /// Add a point light and return its handle.
    pub fn add_light(&mut self, light: PointLight) -> LightId {
        let id = LightId(self.lights.len());
        log::debug!("Added light {} at {:?}", id.0, light.position);
        self.lights.push(light);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&(dyn Primitive + 'static)> {
        self.objects.get(id.0).map(|o| &**o)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut (dyn Primitive + 'static)> {
        self.objects.get_mut(id.0).map(|o| &mut **o)
    }

    pub fn light(&self, id: LightId) -> Option<&PointLight> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut PointLight> {
        self.lights.get_mut(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &dyn Primitive)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectId(i), &**o as &dyn Primitive))
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Linear scan for the nearest hit with `t > EPSILON`.
    ///
    /// Ties keep the object added first.
    pub fn closest_hit(&self, ray: &Ray) -> Result<Option<(ObjectId, HitRecord<'_>)>> {
        let mut closest: Option<(ObjectId, HitRecord<'_>)> = None;

        for (i, object) in self.objects.iter().enumerate() {
            let rec = object.hit(ray)?;
            if !rec.hit || rec.t <= EPSILON {
                continue;
            }
            if closest.as_ref().map_or(true, |(_, best)| rec.t < best.t) {
                closest = Some((ObjectId(i), rec));
            }
        }

        Ok(closest)
    }
}
