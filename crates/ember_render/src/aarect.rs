//! Axis-aligned rectangles, one type per plane orientation.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

// Rectangles are infinitely thin; pad the bounding box so the slab
// test still registers them.
const THICKNESS_PAD: f32 = 1e-4;

/// Rectangle in the plane z = k, spanning `[x0, x1] x [y0, y1]`.
/// Outward normal is +z.
pub struct XyRect {
    x0: f32,
    x1: f32,
    y0: f32,
    y1: f32,
    k: f32,
    material: Arc<dyn Material>,
}

impl XyRect {
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            x0,
            x1,
            y0,
            y1,
            k,
            material,
        }
    }
}

impl Hittable for XyRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let t = (self.k - ray.origin.z) / ray.direction.z;
        if !ray_t.contains(t) {
            return None;
        }

        let x = ray.origin.x + t * ray.direction.x;
        let y = ray.origin.y + t * ray.direction.y;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (y - self.y0) / (self.y1 - self.y0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::Z,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        Some(Aabb::from_points(
            Vec3::new(self.x0, self.y0, self.k - THICKNESS_PAD),
            Vec3::new(self.x1, self.y1, self.k + THICKNESS_PAD),
        ))
    }
}

/// Rectangle in the plane y = k, spanning `[x0, x1] x [z0, z1]`.
/// Outward normal is +y.
pub struct XzRect {
    x0: f32,
    x1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    material: Arc<dyn Material>,
}

impl XzRect {
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            x0,
            x1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for XzRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let t = (self.k - ray.origin.y) / ray.direction.y;
        if !ray_t.contains(t) {
            return None;
        }

        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;
        if x < self.x0 || x > self.x1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::Y,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        Some(Aabb::from_points(
            Vec3::new(self.x0, self.k - THICKNESS_PAD, self.z0),
            Vec3::new(self.x1, self.k + THICKNESS_PAD, self.z1),
        ))
    }
}

/// Rectangle in the plane x = k, spanning `[y0, y1] x [z0, z1]`.
/// Outward normal is +x.
pub struct YzRect {
    y0: f32,
    y1: f32,
    z0: f32,
    z1: f32,
    k: f32,
    material: Arc<dyn Material>,
}

impl YzRect {
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self {
            y0,
            y1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for YzRect {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let t = (self.k - ray.origin.x) / ray.direction.x;
        if !ray_t.contains(t) {
            return None;
        }

        let y = ray.origin.y + t * ray.direction.y;
        let z = ray.origin.z + t * ray.direction.z;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (y - self.y0) / (self.y1 - self.y0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            ray,
            t,
            ray.at(t),
            Vec3::X,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        Some(Aabb::from_points(
            Vec3::new(self.k - THICKNESS_PAD, self.y0, self.z0),
            Vec3::new(self.k + THICKNESS_PAD, self.y1, self.z1),
        ))
    }
}
