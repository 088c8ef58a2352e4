//! Cook-Torrance microfacet material.

use std::f32::consts::{FRAC_1_PI, PI};

use ember_math::{sampling, Ray, Vec3};
use rand::RngCore;

use crate::hittable::HitRecord;
use crate::material::{Color, Material, ScatterResult};

// F0 for common dielectrics; metals take it from the albedo.
const DIELECTRIC_F0: f32 = 0.04;

/// Physically based surface with the GGX specular lobe.
///
/// The BRDF combines a metallic-weighted Lambertian diffuse term with
/// Cook-Torrance specular: GGX normal distribution, Smith geometry
/// with Schlick-GGX per-direction occlusion, and Schlick Fresnel with
/// F0 blended from 0.04 to the albedo by `metallic`. Directions are
/// sampled uniformly over the hemisphere, same pdf as the diffuse
/// materials.
pub struct CookTorrance {
    pub albedo: Color,
    pub roughness: f32,
    pub metallic: f32,
}

impl CookTorrance {
    pub fn new(albedo: Color, roughness: f32, metallic: f32) -> Self {
        Self {
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
            metallic: metallic.clamp(0.0, 1.0),
        }
    }
}

/// GGX / Trowbridge-Reitz normal distribution.
#[inline]
fn ggx_distribution(n_dot_h: f32, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom).max(1e-7)
}

/// Schlick-GGX occlusion for a single direction.
#[inline]
fn schlick_ggx(n_dot_x: f32, k: f32) -> f32 {
    n_dot_x / (n_dot_x * (1.0 - k) + k).max(1e-7)
}

/// Smith geometry term, the product of per-direction occlusion.
#[inline]
fn smith_geometry(n_dot_l: f32, n_dot_v: f32, roughness: f32) -> f32 {
    let k = (roughness + 1.0) * (roughness + 1.0) / 8.0;
    schlick_ggx(n_dot_l, k) * schlick_ggx(n_dot_v, k)
}

/// Schlick Fresnel with a colored F0.
#[inline]
fn schlick_fresnel(f0: Vec3, h_dot_v: f32) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - h_dot_v).powi(5)
}

impl Material for CookTorrance {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let n = rec.normal;
        let view = -ray_in.direction.normalize();
        let light = sampling::random_in_hemisphere(n, rng).normalize();

        let n_dot_l = n.dot(light);
        if n_dot_l <= 0.0 {
            return None;
        }
        let n_dot_v = n.dot(view).max(1e-4);

        let half = (view + light).normalize();
        let n_dot_h = n.dot(half).max(0.0);
        let h_dot_v = half.dot(view).max(0.0);

        let alpha = (self.roughness * self.roughness).max(1e-3);
        let d = ggx_distribution(n_dot_h, alpha);
        let g = smith_geometry(n_dot_l, n_dot_v, self.roughness);
        let f0 = Vec3::splat(DIELECTRIC_F0).lerp(self.albedo, self.metallic);
        let f = schlick_fresnel(f0, h_dot_v);

        let specular = d * g * f / (4.0 * n_dot_l * n_dot_v).max(1e-4);

        // Energy not reflected specularly diffuses, except in metals.
        let k_diffuse = (Vec3::ONE - f) * (1.0 - self.metallic);
        let brdf = k_diffuse * self.albedo * FRAC_1_PI + specular;

        Some(ScatterResult {
            attenuation: brdf * n_dot_l,
            scattered: Ray::new(rec.p, light, ray_in.time),
        })
    }

    fn scattering_pdf(&self, _direction: Vec3) -> f32 {
        1.0 / (2.0 * PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::material::Lambertian;
    use crate::sphere::Sphere;
    use ember_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn front_hit<'a>(
        sphere: &'a Sphere,
        rng: &mut StdRng,
    ) -> (Ray, crate::hittable::HitRecord<'a>) {
        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), rng)
            .unwrap();
        (ray, rec)
    }

    #[test]
    fn fresnel_at_normal_incidence_is_f0() {
        let f = schlick_fresnel(Vec3::splat(DIELECTRIC_F0), 1.0);
        assert!((f - Vec3::splat(DIELECTRIC_F0)).length() < 1e-6);
    }

    #[test]
    fn fresnel_at_grazing_incidence_is_white() {
        let f = schlick_fresnel(Vec3::splat(DIELECTRIC_F0), 0.0);
        assert!((f - Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn ggx_narrows_with_low_roughness() {
        // A smoother surface concentrates density at the normal.
        let smooth = ggx_distribution(1.0, 0.01);
        let rough = ggx_distribution(1.0, 0.5);
        assert!(smooth > rough);
        // Off-normal density drops for the smooth lobe.
        assert!(ggx_distribution(0.5, 0.01) < ggx_distribution(0.5, 0.5));
    }

    #[test]
    fn scatter_stays_above_the_surface() {
        let mat: Arc<dyn Material> = Arc::new(CookTorrance::new(Vec3::splat(0.8), 0.4, 0.0));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, mat.clone());
        let mut rng = StdRng::seed_from_u64(21);
        let (ray, rec) = front_hit(&sphere, &mut rng);

        for _ in 0..200 {
            if let Some(scatter) = mat.scatter(&ray, &rec, &mut rng) {
                assert!(scatter.scattered.direction.dot(rec.normal) > 0.0);
                assert!(scatter.attenuation.min_element() >= 0.0);
            }
        }
    }

    #[test]
    fn metal_tints_specular_by_albedo() {
        let gold = Vec3::new(1.0, 0.77, 0.34);
        let mat: Arc<dyn Material> = Arc::new(CookTorrance::new(gold, 0.2, 1.0));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, mat.clone());
        let mut rng = StdRng::seed_from_u64(5);
        let (ray, rec) = front_hit(&sphere, &mut rng);

        // Fully metallic: no diffuse floor, so attenuation keeps the
        // albedo's channel ordering.
        for _ in 0..50 {
            if let Some(scatter) = mat.scatter(&ray, &rec, &mut rng) {
                assert!(scatter.attenuation.x >= scatter.attenuation.y);
                assert!(scatter.attenuation.y >= scatter.attenuation.z);
            }
        }
    }

    #[test]
    fn pdf_matches_the_diffuse_materials() {
        let pbr = CookTorrance::new(Vec3::splat(0.5), 0.5, 0.0);
        let diffuse = Lambertian::solid(Vec3::splat(0.5));
        assert_eq!(pbr.scattering_pdf(Vec3::Z), diffuse.scattering_pdf(Vec3::Z));
    }
}
