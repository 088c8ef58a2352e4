//! Constant-density participating media.

use std::sync::Arc;

use ember_core::Texture;
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};

/// A volume of uniform density bounded by another hittable. Scatter
/// distance is sampled exponentially; a ray that would scatter past
/// the far boundary passes through unaffected. Assumes a convex
/// boundary where a ray enters and exits at most once.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    phase_function: Arc<dyn Material>,
    neg_inv_density: f32,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            phase_function: Arc::new(Isotropic::new(albedo)),
            neg_inv_density: -1.0 / density,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        // Entry point anywhere along the ray, exit strictly after it.
        let entry = self.boundary.hit(ray, Interval::UNIVERSE, rng)?;
        let exit = self
            .boundary
            .hit(ray, Interval::new(entry.t + 1e-4, f32::INFINITY), rng)?;

        let mut t_enter = entry.t.max(ray_t.min);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return None;
        }
        t_enter = t_enter.max(0.0);

        let ray_length = ray.direction.length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        let scatter_distance = self.neg_inv_density * rng.gen::<f32>().ln();
        if scatter_distance > distance_inside {
            return None;
        }

        let t = t_enter + scatter_distance / ray_length;
        Some(HitRecord {
            p: ray.at(t),
            // Arbitrary; the isotropic phase function ignores it.
            normal: Vec3::X,
            material: self.phase_function.as_ref(),
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        })
    }

    fn bounding_box(&self, time: Interval) -> Option<Aabb> {
        self.boundary.bounding_box(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use ember_core::SolidColor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn foggy_sphere(density: f32) -> ConstantMedium {
        let boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Lambertian::solid(Vec3::splat(0.5)),
        ));
        ConstantMedium::new(
            boundary,
            density,
            Arc::new(SolidColor::new(Vec3::splat(0.8))),
        )
    }

    #[test]
    fn dense_fog_scatters_inside_the_boundary() {
        let medium = foggy_sphere(1e4);
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = medium
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        // Boundary spans t in [4, 6]; a very dense medium scatters
        // essentially at the entry point.
        assert!(rec.t >= 4.0 && rec.t <= 6.0);
        assert!((rec.t - 4.0).abs() < 0.01);
    }

    #[test]
    fn thin_fog_mostly_passes_through() {
        let medium = foggy_sphere(1e-6);
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let passes = (0..100)
            .filter(|_| {
                medium
                    .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
                    .is_none()
            })
            .count();
        assert!(passes > 90);
    }

    #[test]
    fn ray_missing_the_boundary_misses_the_medium() {
        let medium = foggy_sphere(1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::at_shutter_open(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(medium
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());
    }
}
