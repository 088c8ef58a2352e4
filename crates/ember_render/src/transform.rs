//! Instance transforms: wrappers that reposition or reorient geometry
//! without touching the wrapped object.

use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};

/// Inverts `front_face` on every hit, leaving geometry untouched.
/// Used to orient emitters and the inward-facing sides of boxes.
pub struct FlipFace {
    inner: Arc<dyn Hittable>,
}

impl FlipFace {
    pub fn new(inner: Arc<dyn Hittable>) -> Self {
        Self { inner }
    }
}

impl Hittable for FlipFace {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let rec = self.inner.hit(ray, ray_t, rng)?;
        Some(HitRecord {
            front_face: !rec.front_face,
            ..rec
        })
    }

    fn bounding_box(&self, time: Interval) -> Option<Aabb> {
        self.inner.bounding_box(time)
    }
}

/// Translates geometry by offsetting incoming rays the opposite way.
pub struct Translate {
    inner: Arc<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(inner: Arc<dyn Hittable>, offset: Vec3) -> Self {
        Self { inner, offset }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let moved = Ray::new(ray.origin - self.offset, ray.direction, ray.time);
        let rec = self.inner.hit(&moved, ray_t, rng)?;
        Some(HitRecord {
            p: rec.p + self.offset,
            ..rec
        })
    }

    fn bounding_box(&self, time: Interval) -> Option<Aabb> {
        self.inner
            .bounding_box(time)
            .map(|bbox| bbox.translate(self.offset))
    }
}

/// Rotation about the world y axis. Rays are rotated into object
/// space, hit points and normals rotated back out. The bounding box
/// is the envelope of the eight rotated corners, computed once at
/// construction.
pub struct RotateY {
    inner: Arc<dyn Hittable>,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Option<Aabb>,
}

impl RotateY {
    pub fn new(inner: Arc<dyn Hittable>, angle_degrees: f32) -> Self {
        let radians = angle_degrees.to_radians();
        let sin_theta = radians.sin();
        let cos_theta = radians.cos();

        let bbox = inner.bounding_box(Interval::new(0.0, 1.0)).map(|bbox| {
            let mut min = Vec3::splat(f32::INFINITY);
            let mut max = Vec3::splat(f32::NEG_INFINITY);

            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        let corner = Vec3::new(
                            if i == 0 { bbox.x.min } else { bbox.x.max },
                            if j == 0 { bbox.y.min } else { bbox.y.max },
                            if k == 0 { bbox.z.min } else { bbox.z.max },
                        );
                        let rotated = Vec3::new(
                            cos_theta * corner.x + sin_theta * corner.z,
                            corner.y,
                            -sin_theta * corner.x + cos_theta * corner.z,
                        );
                        min = min.min(rotated);
                        max = max.max(rotated);
                    }
                }
            }

            Aabb::from_points(min, max)
        });

        Self {
            inner,
            sin_theta,
            cos_theta,
            bbox,
        }
    }

    #[inline]
    fn to_object(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    #[inline]
    fn to_world(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl Hittable for RotateY {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let rotated = Ray::new(
            self.to_object(ray.origin),
            self.to_object(ray.direction),
            ray.time,
        );
        let rec = self.inner.hit(&rotated, ray_t, rng)?;
        Some(HitRecord {
            p: self.to_world(rec.p),
            normal: self.to_world(rec.normal),
            ..rec
        })
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_sphere_at(center: Vec3) -> Arc<dyn Hittable> {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        Arc::new(Sphere::new(center, 1.0, mat))
    }

    #[test]
    fn translate_moves_the_hit() {
        let sphere = unit_sphere_at(Vec3::ZERO);
        let moved = Translate::new(sphere, Vec3::new(0.0, 0.0, -5.0));
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = moved
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.p.z + 4.0).abs() < 1e-4);

        let bbox = moved.bounding_box(Interval::new(0.0, 1.0)).unwrap();
        assert!(bbox.z.contains(-5.0));
    }

    #[test]
    fn flip_face_inverts_sidedness_only() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -5.0));
        let flipped = FlipFace::new(sphere);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = flipped
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        assert!(!rec.front_face);
        // Normal is untouched.
        assert!((rec.normal.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn rotate_y_quarter_turn_moves_geometry() {
        // Sphere on the +x axis, rotated 90 degrees, ends up on -z.
        let sphere = unit_sphere_at(Vec3::new(5.0, 0.0, 0.0));
        let rotated = RotateY::new(sphere, 90.0);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = rotated
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        assert!((rec.t - 4.0).abs() < 1e-3);

        let bbox = rotated.bounding_box(Interval::new(0.0, 1.0)).unwrap();
        assert!(bbox.z.contains(-5.0));
    }
}
