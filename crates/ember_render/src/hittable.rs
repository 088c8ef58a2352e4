//! Ray-geometry intersection interface.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::material::Material;

/// Everything the shading code needs to know about an intersection.
/// Borrows the material from the geometry that produced it.
#[derive(Clone)]
pub struct HitRecord<'a> {
    pub p: Vec3,
    pub normal: Vec3,
    pub material: &'a dyn Material,
    pub u: f32,
    pub v: f32,
    pub t: f32,
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal. The stored
    /// normal always opposes the ray; `front_face` remembers which
    /// side was struck.
    pub fn new(
        ray: &Ray,
        t: f32,
        p: Vec3,
        outward_normal: Vec3,
        u: f32,
        v: f32,
        material: &'a dyn Material,
    ) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            material,
            u,
            v,
            t,
            front_face,
        }
    }
}

/// Anything a ray can intersect.
///
/// `hit` receives the acceptable parameter range and a random source;
/// participating media consume randomness, solid geometry ignores it.
/// `bounding_box` returns `None` for unbounded geometry, which keeps
/// it out of acceleration structures.
pub trait Hittable: Send + Sync {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>>;

    /// Box enclosing the geometry over the given shutter interval.
    fn bounding_box(&self, time: Interval) -> Option<Aabb>;
}

/// A flat list of shared hittables, intersected by linear scan.
#[derive(Default)]
pub struct HittableList {
    pub objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let mut closest_so_far = ray_t.max;
        let mut closest_hit = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far), rng) {
                closest_so_far = rec.t;
                closest_hit = Some(rec);
            }
        }

        closest_hit
    }

    fn bounding_box(&self, time: Interval) -> Option<Aabb> {
        if self.objects.is_empty() {
            return None;
        }

        let mut bbox = Aabb::EMPTY;
        for object in &self.objects {
            bbox = Aabb::surrounding(&bbox, &object.bounding_box(time)?);
        }
        Some(bbox)
    }
}
