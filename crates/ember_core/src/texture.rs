//! Textures sampled by surface parameters and hit position.

use std::path::Path;
use std::sync::Arc;

use ember_math::Vec3;
use thiserror::Error;

use crate::noise::{PerlinNoise, SimplexNoise, ValueNoise, WorleyNoise};

/// Errors from loading texture assets.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A color field over surface coordinates `(u, v)` and the world
/// space hit position `p`. Procedural textures typically ignore the
/// surface coordinates and sample in 3D, so solids carved from them
/// stay continuous across faces.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3;
}

// =============================================================================
// Solid color
// =============================================================================

pub struct SolidColor {
    color: Vec3,
}

impl SolidColor {
    pub fn new(color: Vec3) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Vec3 {
        self.color
    }
}

// =============================================================================
// Checker
// =============================================================================

/// 3D checker pattern switching between two textures with the sign of
/// `sin(10x) * sin(10y) * sin(10z)`.
pub struct CheckerTexture {
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Vec3, odd: Vec3) -> Self {
        Self::new(
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Vec3 {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

// =============================================================================
// Procedural noise
// =============================================================================

/// Shading recipe applied on top of the raw noise fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseEffect {
    /// Grayscale fractal simplex noise.
    Simplex,
    /// Veined stone: a sine over z, phase-distorted by gradient noise.
    Marble,
    /// Concentric growth rings with grain wobble from value noise.
    Wood,
    /// Hot plasma granulation, warped fractal simplex.
    SunSurface,
    /// Cell walls from Worley distance.
    Cellular,
}

const MARBLE_LIGHT: Vec3 = Vec3::new(0.93, 0.91, 0.85);
const MARBLE_VEIN: Vec3 = Vec3::new(0.22, 0.26, 0.33);
const WOOD_EARLY: Vec3 = Vec3::new(0.55, 0.35, 0.16);
const WOOD_LATE: Vec3 = Vec3::new(0.27, 0.16, 0.07);
const SUN_COOL: Vec3 = Vec3::new(0.80, 0.18, 0.02);
const SUN_HOT: Vec3 = Vec3::new(1.00, 0.86, 0.30);
const CELL_DARK: Vec3 = Vec3::new(0.05, 0.10, 0.25);
const CELL_LIGHT: Vec3 = Vec3::new(0.95, 0.95, 0.95);

/// Procedural texture owning one seeded instance of each generator.
/// Two textures built with the same seed shade identically.
pub struct NoiseTexture {
    effect: NoiseEffect,
    scale: f32,
    value: ValueNoise,
    perlin: PerlinNoise,
    simplex: SimplexNoise,
    worley: WorleyNoise,
}

impl NoiseTexture {
    pub fn new(effect: NoiseEffect, scale: f32, seed: u64) -> Self {
        Self {
            effect,
            scale,
            value: ValueNoise::new(seed),
            perlin: PerlinNoise::new(seed.wrapping_add(1)),
            simplex: SimplexNoise::new(seed.wrapping_add(2)),
            worley: WorleyNoise::new(seed.wrapping_add(3)),
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Vec3 {
        let q = p * self.scale;
        match self.effect {
            NoiseEffect::Simplex => {
                let t = 0.5 * (1.0 + self.simplex.fractal3(7, q.x, q.y, q.z));
                Vec3::splat(t.clamp(0.0, 1.0))
            }
            NoiseEffect::Marble => {
                let turbulence = self.perlin.fractal3(7, q.x, q.y, q.z);
                let t = 0.5 * (1.0 + (q.z + 10.0 * turbulence).sin());
                MARBLE_LIGHT.lerp(MARBLE_VEIN, t)
            }
            NoiseEffect::Wood => {
                let wobble = self.value.fractal3(4, q.x, q.y, q.z);
                let ring = ((q.x + wobble) * (q.x + wobble) + (q.z + wobble) * (q.z + wobble))
                    .sqrt();
                let grain = (ring * 6.0).fract();
                WOOD_EARLY.lerp(WOOD_LATE, grain)
            }
            NoiseEffect::SunSurface => {
                let warp = 0.5 * self.perlin.noise3(q.x, q.y, q.z);
                let t = 0.5 * (1.0 + self.simplex.fractal3(7, q.x + warp, q.y + warp, q.z + warp));
                SUN_COOL.lerp(SUN_HOT, t.clamp(0.0, 1.0))
            }
            NoiseEffect::Cellular => {
                let d = self.worley.fractal3(5, q.x, q.y, q.z).clamp(0.0, 1.0);
                CELL_DARK.lerp(CELL_LIGHT, d)
            }
        }
    }
}

// =============================================================================
// Image
// =============================================================================

struct ImageData {
    width: u32,
    height: u32,
    /// Tightly packed RGB8 rows, top row first.
    pixels: Vec<u8>,
}

/// Texture backed by a decoded image. A failed load is reported once
/// and the texture shades solid cyan afterwards, which shows up
/// unmistakably in renders.
pub struct ImageTexture {
    data: Option<ImageData>,
}

impl ImageTexture {
    /// Load an image, falling back to the cyan error texture when the
    /// file is missing or undecodable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("could not load texture image {}: {err}", path.display());
                Self { data: None }
            }
        }
    }

    fn load(path: &Path) -> Result<Self, TextureError> {
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        log::debug!("loaded texture image {} ({width}x{height})", path.display());
        Ok(Self {
            data: Some(ImageData {
                width,
                height,
                pixels: rgb.into_raw(),
            }),
        })
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Vec3 {
        let Some(data) = &self.data else {
            return Vec3::new(0.0, 1.0, 1.0);
        };

        let u = u.clamp(0.0, 1.0);
        // Image rows run top to bottom, v runs bottom to top.
        let v = 1.0 - v.clamp(0.0, 1.0);

        let i = ((u * data.width as f32) as u32).min(data.width - 1);
        let j = ((v * data.height as f32) as u32).min(data.height - 1);
        let idx = ((j * data.width + i) * 3) as usize;

        const COLOR_SCALE: f32 = 1.0 / 255.0;
        Vec3::new(
            data.pixels[idx] as f32,
            data.pixels[idx + 1] as f32,
            data.pixels[idx + 2] as f32,
        ) * COLOR_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_ignores_coordinates() {
        let tex = SolidColor::new(Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(tex.value(0.0, 0.0, Vec3::ZERO), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(
            tex.value(0.9, 0.1, Vec3::splat(100.0)),
            Vec3::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn checker_alternates_with_sine_sign() {
        let tex = CheckerTexture::from_colors(Vec3::ONE, Vec3::ZERO);
        // sin(10 * 0.157) ~ sin(pi/2) = 1 on each axis: even color.
        let even_p = Vec3::splat(0.157);
        assert_eq!(tex.value(0.0, 0.0, even_p), Vec3::ONE);
        // Negating one axis flips one sine, so the product goes odd.
        let odd_p = Vec3::new(0.157, -0.157, 0.157);
        assert_eq!(tex.value(0.0, 0.0, odd_p), Vec3::ZERO);
    }

    #[test]
    fn noise_texture_is_deterministic_per_seed() {
        let a = NoiseTexture::new(NoiseEffect::Marble, 0.2, 42);
        let b = NoiseTexture::new(NoiseEffect::Marble, 0.2, 42);
        for i in 0..50 {
            let p = Vec3::splat(i as f32 * 0.7 - 10.0);
            assert_eq!(a.value(0.0, 0.0, p), b.value(0.0, 0.0, p));
        }
    }

    #[test]
    fn noise_texture_output_is_a_color() {
        for effect in [
            NoiseEffect::Simplex,
            NoiseEffect::Marble,
            NoiseEffect::Wood,
            NoiseEffect::SunSurface,
            NoiseEffect::Cellular,
        ] {
            let tex = NoiseTexture::new(effect, 1.0, 7);
            for i in 0..100 {
                let p = Vec3::new(i as f32 * 0.13, i as f32 * -0.07, i as f32 * 0.19);
                let c = tex.value(0.0, 0.0, p);
                for channel in [c.x, c.y, c.z] {
                    assert!((0.0..=1.0).contains(&channel), "{effect:?}: {c}");
                }
            }
        }
    }

    #[test]
    fn missing_image_shades_cyan() {
        let tex = ImageTexture::open("definitely/not/a/real/file.png");
        assert_eq!(tex.value(0.5, 0.5, Vec3::ZERO), Vec3::new(0.0, 1.0, 1.0));
    }
}
