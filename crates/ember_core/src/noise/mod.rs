//! Procedural noise generators.
//!
//! Four classic lattice noises: value noise, gradient (Perlin) noise,
//! simplex noise, and Worley cellular noise. Each generator owns its
//! permutation or hash state, derived eagerly from an explicit seed,
//! so two instances built with the same seed produce identical fields
//! with no global state involved.
//!
//! All generators expose `noise1/2/3` for a single evaluation and
//! `fractal1/2/3` for fractal Brownian motion built from the shared
//! [`FbmParams`].

mod perlin;
mod simplex;
mod value;
mod worley;

pub use perlin::PerlinNoise;
pub use simplex::SimplexNoise;
pub use value::ValueNoise;
pub use worley::WorleyNoise;

/// Fractal summation parameters shared by all generators.
///
/// Octave `i` samples the base noise at `frequency * lacunarity^i`
/// with weight `amplitude * persistence^i`; the sum is normalized by
/// the total weight so the fractal stays within the range of the base
/// noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FbmParams {
    pub frequency: f32,
    pub amplitude: f32,
    pub lacunarity: f32,
    pub persistence: f32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl FbmParams {
    /// Accumulate `octaves` evaluations of `sample`, which receives
    /// the frequency for its octave, and normalize by total weight.
    pub fn sum(&self, octaves: u32, mut sample: impl FnMut(f32) -> f32) -> f32 {
        let mut output = 0.0;
        let mut denom = 0.0;
        let mut frequency = self.frequency;
        let mut amplitude = self.amplitude;

        for _ in 0..octaves {
            output += amplitude * sample(frequency);
            denom += amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }

        output / denom
    }
}
