//! Surface materials.

use std::f32::consts::{FRAC_1_PI, PI};
use std::sync::Arc;

use ember_core::{SolidColor, Texture};
use ember_math::{sampling, Ray, Vec3};
use rand::{Rng, RngCore};

use crate::hittable::HitRecord;

/// Linear RGB radiance or reflectance.
pub type Color = Vec3;

/// Outcome of a scattering event: the continuation ray and the
/// throughput it carries.
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

pub trait Material: Send + Sync {
    /// Sample an outgoing ray at the hit, or `None` for absorption.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Radiance emitted from the surface. Zero for everything but
    /// lights.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }

    /// Probability density of the direction chosen by `scatter`,
    /// used by the Monte Carlo integrator. Defaults to 1 for
    /// materials with deterministic continuation rays.
    fn scattering_pdf(&self, _direction: Vec3) -> f32 {
        1.0
    }
}

#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of Fresnel reflectance.
#[inline]
fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = (1.0 - refraction_ratio) / (1.0 + refraction_ratio);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

// =============================================================================
// Lambertian
// =============================================================================

/// Diffuse surface. Samples the hemisphere uniformly and carries the
/// cosine-weighted albedo, `albedo * cos(theta) / pi`, so the uniform
/// pdf of `1 / 2pi` makes the Monte Carlo estimate unbiased.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    /// Shortcut for a solid-colored diffuse material.
    pub fn solid(color: Color) -> Arc<dyn Material> {
        Arc::new(Self::new(Arc::new(SolidColor::new(color))))
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let direction = sampling::random_in_hemisphere(rec.normal, rng);
        let cos_theta = rec.normal.dot(direction);
        let albedo = self.albedo.value(rec.u, rec.v, rec.p);
        Some(ScatterResult {
            attenuation: albedo * (cos_theta * FRAC_1_PI),
            scattered: Ray::new(rec.p, direction, ray_in.time),
        })
    }

    fn scattering_pdf(&self, _direction: Vec3) -> f32 {
        1.0 / (2.0 * PI)
    }
}

// =============================================================================
// Metal
// =============================================================================

/// Mirror reflection with a fuzz sphere perturbing the bounce.
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction.normalize(), rec.normal);
        let direction = reflected + self.fuzz * sampling::random_in_unit_sphere(rng);

        // Fuzz can push the bounce under the surface; absorb it.
        if direction.dot(rec.normal) <= 0.0 {
            return None;
        }
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, direction, ray_in.time),
        })
    }
}

// =============================================================================
// Dielectric
// =============================================================================

/// Clear glass. Refracts when Snell's law permits, reflects on total
/// internal reflection or probabilistically by Fresnel reflectance.
pub struct Dielectric {
    refraction_index: f32,
}

impl Dielectric {
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction =
            if cannot_refract || reflectance(cos_theta, refraction_ratio) > rng.gen::<f32>() {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time),
        })
    }
}

// =============================================================================
// Emitters
// =============================================================================

/// Light source. Never scatters; emits the texture's value.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }

    pub fn solid(color: Color) -> Arc<dyn Material> {
        Arc::new(Self::new(Arc::new(SolidColor::new(color))))
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord<'_>,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

// =============================================================================
// Isotropic
// =============================================================================

/// Direction-free phase function used by participating media:
/// scatters uniformly over the full sphere.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, sampling::random_in_unit_sphere(rng), ray_in.time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::sphere::Sphere;
    use ember_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_unit_sphere(material: Arc<dyn Material>) -> (Ray, Sphere) {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, material);
        let ray = Ray::at_shutter_open(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        (ray, sphere)
    }

    #[test]
    fn schlick_at_normal_incidence_is_r0() {
        let ratio: f32 = 1.0 / 1.5;
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        assert!((reflectance(1.0, ratio) - r0).abs() < 1e-6);
    }

    #[test]
    fn schlick_at_grazing_incidence_approaches_one() {
        assert!(reflectance(0.0, 1.0 / 1.5) > 0.9);
    }

    #[test]
    fn lambertian_scatters_into_the_upper_hemisphere() {
        let mat = Lambertian::solid(Vec3::splat(0.5));
        let (ray, sphere) = hit_unit_sphere(mat.clone());
        let mut rng = StdRng::seed_from_u64(4);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        for _ in 0..100 {
            let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(scatter.scattered.direction.dot(rec.normal) >= 0.0);
            // Attenuation is albedo-scaled and never exceeds it.
            assert!(scatter.attenuation.x <= 0.5 / PI + 1e-5);
        }
        assert!((mat.scattering_pdf(Vec3::Z) - 1.0 / (2.0 * PI)).abs() < 1e-6);
    }

    #[test]
    fn smooth_metal_reflects_exactly() {
        let mat: Arc<dyn Material> = Arc::new(Metal::new(Vec3::splat(0.9), 0.0));
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, mat.clone());
        let mut rng = StdRng::seed_from_u64(4);

        // Hit off-center so the reflection is nontrivial.
        let ray = Ray::at_shutter_open(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();

        let expected = reflect(Vec3::new(0.0, 0.0, -1.0), rec.normal);
        assert!((scatter.scattered.direction - expected).length() < 1e-5);
        assert_eq!(scatter.attenuation, Vec3::splat(0.9));
    }

    #[test]
    fn glass_always_continues() {
        let mat: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
        let (ray, sphere) = hit_unit_sphere(mat.clone());
        let mut rng = StdRng::seed_from_u64(4);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        for _ in 0..100 {
            let scatter = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(scatter.attenuation, Color::ONE);
            assert!(scatter.scattered.direction.length() > 0.0);
        }
    }

    #[test]
    fn light_emits_and_absorbs() {
        let mat = DiffuseLight::solid(Vec3::new(4.0, 4.0, 4.0));
        let (ray, sphere) = hit_unit_sphere(mat.clone());
        let mut rng = StdRng::seed_from_u64(4);

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();
        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(rec.u, rec.v, rec.p), Vec3::splat(4.0));
    }
}
