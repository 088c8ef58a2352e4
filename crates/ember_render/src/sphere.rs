//! Spheres, static and keyframe-animated.

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;

/// Spherical UV coordinates from a point on the unit sphere.
/// u wraps longitude, v runs pole to pole, both in `[0, 1]`.
fn sphere_uv(p: Vec3) -> (f32, f32) {
    let phi = p.z.atan2(p.x);
    let theta = p.y.asin();
    let u = 1.0 - (phi + PI) / (2.0 * PI);
    let v = (theta + FRAC_PI_2) / PI;
    (u, v)
}

// Quadratic intersection shared by both sphere variants. Prefers the
// nearer root, falls back to the farther one when the near root lies
// outside `ray_t`.
fn hit_sphere(ray: &Ray, center: Vec3, radius: f32, ray_t: Interval) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.direction.length_squared();
    let half_b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant <= 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    let mut root = (-half_b - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (-half_b + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }
    Some(root)
}

pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let t = hit_sphere(ray, self.center, self.radius, ray_t)?;
        let p = ray.at(t);
        let outward_normal = (p - self.center) / self.radius;
        let (u, v) = sphere_uv(outward_normal);
        Some(HitRecord::new(
            ray,
            t,
            p,
            outward_normal,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        let r = Vec3::splat(self.radius);
        Some(Aabb::from_points(self.center - r, self.center + r))
    }
}

/// One endpoint of a linear motion path.
#[derive(Debug, Clone, Copy)]
pub struct PositionKey {
    pub position: Vec3,
    pub time: f32,
}

/// A sphere translating linearly between two keyframes. Each ray
/// samples the center at its own shutter timestamp.
pub struct MovingSphere {
    key0: PositionKey,
    key1: PositionKey,
    radius: f32,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(key0: PositionKey, key1: PositionKey, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            key0,
            key1,
            radius,
            material,
        }
    }

    /// Center at `time`, extrapolating linearly outside the keys.
    pub fn center_at(&self, time: f32) -> Vec3 {
        let s = (time - self.key0.time) / (self.key1.time - self.key0.time);
        self.key0.position.lerp(self.key1.position, s)
    }
}

impl Hittable for MovingSphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        _rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let center = self.center_at(ray.time);
        let t = hit_sphere(ray, center, self.radius, ray_t)?;
        let p = ray.at(t);
        let outward_normal = (p - center) / self.radius;
        let (u, v) = sphere_uv(outward_normal);
        Some(HitRecord::new(
            ray,
            t,
            p,
            outward_normal,
            u,
            v,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self, time: Interval) -> Option<Aabb> {
        let r = Vec3::splat(self.radius);
        let c0 = self.center_at(time.min);
        let c1 = self.center_at(time.max);
        let box0 = Aabb::from_points(c0 - r, c0 + r);
        let box1 = Aabb::from_points(c1 - r, c1 + r);
        Some(Aabb::surrounding(&box0, &box1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn axial_ray_hits_at_distance_minus_radius() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -7.0), 2.0, mat);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        assert!((rec.t - 5.0).abs() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        assert!((rec.normal.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn grazing_miss_returns_none() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, mat);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::at_shutter_open(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());
    }

    #[test]
    fn uv_covers_the_cardinal_points() {
        // +x seam: phi = 0 so u = 0.5 at the equator.
        let (u, v) = sphere_uv(Vec3::X);
        assert!((u - 0.5).abs() < 1e-5);
        assert!((v - 0.5).abs() < 1e-5);

        // Poles map to v = 0 and v = 1.
        let (_, v) = sphere_uv(Vec3::Y);
        assert!((v - 1.0).abs() < 1e-5);
        let (_, v) = sphere_uv(-Vec3::Y);
        assert!(v.abs() < 1e-5);
    }

    #[test]
    fn moving_sphere_tracks_ray_time() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let sphere = MovingSphere::new(
            PositionKey {
                position: Vec3::new(0.0, 0.0, -5.0),
                time: 0.0,
            },
            PositionKey {
                position: Vec3::new(4.0, 0.0, -5.0),
                time: 1.0,
            },
            1.0,
            mat,
        );
        let mut rng = StdRng::seed_from_u64(0);

        // At shutter open the sphere sits on the z axis.
        let early = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere
            .hit(&early, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_some());

        // At shutter close it has moved out of this ray's path.
        let late = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert!(sphere
            .hit(&late, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());

        // The shutter-spanning box covers both endpoints.
        let bbox = sphere.bounding_box(Interval::new(0.0, 1.0)).unwrap();
        assert!(bbox.x.min <= -1.0);
        assert!(bbox.x.max >= 5.0);
    }
}
