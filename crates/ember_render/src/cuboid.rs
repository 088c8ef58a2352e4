//! Axis-aligned boxes assembled from six rectangles.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::aarect::{XyRect, XzRect, YzRect};
use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::material::Material;
use crate::transform::FlipFace;

/// An axis-aligned box. The three far faces are flipped so every face
/// reports outward-facing front sides.
pub struct Cuboid {
    minimum: Vec3,
    maximum: Vec3,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<dyn Material>) -> Self {
        let mut sides = HittableList::new();

        sides.add(Arc::new(XyRect::new(
            p0.x,
            p1.x,
            p0.y,
            p1.y,
            p1.z,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(XyRect::new(
            p0.x,
            p1.x,
            p0.y,
            p1.y,
            p0.z,
            material.clone(),
        )))));

        sides.add(Arc::new(XzRect::new(
            p0.x,
            p1.x,
            p0.z,
            p1.z,
            p1.y,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(XzRect::new(
            p0.x,
            p1.x,
            p0.z,
            p1.z,
            p0.y,
            material.clone(),
        )))));

        sides.add(Arc::new(YzRect::new(
            p0.y,
            p1.y,
            p0.z,
            p1.z,
            p1.x,
            material.clone(),
        )));
        sides.add(Arc::new(FlipFace::new(Arc::new(YzRect::new(
            p0.y, p1.y, p0.z, p1.z, p0.x, material,
        )))));

        Self {
            minimum: p0,
            maximum: p1,
            sides,
        }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        self.sides.hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        Some(Aabb::from_points(self.minimum, self.maximum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ray_hits_nearest_face() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let cuboid = Cuboid::new(Vec3::new(-1.0, -1.0, -3.0), Vec3::new(1.0, 1.0, -1.0), mat);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = cuboid
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        // Front face at z = -1, not the back face at z = -3.
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn box_encloses_extents() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let cuboid = Cuboid::new(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0), mat);
        let bbox = cuboid.bounding_box(Interval::new(0.0, 1.0)).unwrap();
        assert!(bbox.x.contains(0.0) && bbox.x.contains(2.0));
        assert!(bbox.y.contains(3.0));
        assert!(bbox.z.contains(4.0));
    }
}
