//! Random sampling helpers.
//!
//! Every function takes `&mut dyn RngCore` so callers choose the
//! generator; renderers thread a seeded generator through for
//! reproducible output.

use glam::Vec3;
use rand::{Rng, RngCore};

/// Uniform value in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform value in `[min, max)`.
#[inline]
pub fn gen_range(min: f32, max: f32, rng: &mut dyn RngCore) -> f32 {
    min + (max - min) * rng.gen::<f32>()
}

/// Vector with each component uniform in `[min, max)`.
pub fn random_vec(min: f32, max: f32, rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        gen_range(min, max, rng),
        gen_range(min, max, rng),
        gen_range(min, max, rng),
    )
}

/// Uniform point inside the unit sphere, by rejection.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec(-1.0, 1.0, rng);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = gen_range(0.0, 2.0 * std::f32::consts::PI, rng);
    let z = gen_range(-1.0, 1.0, rng);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// Point inside the unit sphere, flipped into the hemisphere around
/// `normal`. Not normalized.
pub fn random_in_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let in_sphere = random_in_unit_sphere(rng);
    if in_sphere.dot(normal) > 0.0 {
        in_sphere
    } else {
        -in_sphere
    }
}

/// Uniform point inside the unit disk in the xy plane, by rejection.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(-1.0, 1.0, rng), gen_range(-1.0, 1.0, rng), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
