//! Value noise over a permuted integer lattice.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::FbmParams;

const TABLE_SIZE: usize = 256;
const TABLE_MASK: i32 = TABLE_SIZE as i32 - 1;
// Tables are mirrored past TABLE_SIZE so chained lookups like
// perm[perm[i] + j] never index out of bounds.
const MIRRORED_LEN: usize = TABLE_SIZE * 2 + 2;

/// Lattice value noise with random scalar values at integer points,
/// blended by a cubic s-curve. Output is in `[-1, 1]`.
pub struct ValueNoise {
    perm: Vec<usize>,
    values: Vec<f32>,
    pub fbm: FbmParams,
}

impl ValueNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut perm: Vec<usize> = (0..TABLE_SIZE).collect();
        perm.shuffle(&mut rng);
        let mut values: Vec<f32> = (0..TABLE_SIZE)
            .map(|_| rng.gen::<f32>() * 2.0 - 1.0)
            .collect();

        for i in 0..(MIRRORED_LEN - TABLE_SIZE) {
            let p = perm[i];
            let v = values[i];
            perm.push(p);
            values.push(v);
        }

        Self {
            perm,
            values,
            fbm: FbmParams::default(),
        }
    }

    pub fn noise1(&self, x: f32) -> f32 {
        let (bx0, bx1, rx0) = setup(x);
        let sx = s_curve(rx0);
        lerp(sx, self.values[self.perm[bx0]], self.values[self.perm[bx1]])
    }

    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        let (bx0, bx1, rx0) = setup(x);
        let (by0, by1, ry0) = setup(y);

        let i = self.perm[bx0];
        let j = self.perm[bx1];
        let b00 = self.perm[i + by0];
        let b10 = self.perm[j + by0];
        let b01 = self.perm[i + by1];
        let b11 = self.perm[j + by1];

        let sx = s_curve(rx0);
        let sy = s_curve(ry0);

        let a = lerp(sx, self.values[b00], self.values[b10]);
        let b = lerp(sx, self.values[b01], self.values[b11]);
        lerp(sy, a, b)
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let (bx0, bx1, rx0) = setup(x);
        let (by0, by1, ry0) = setup(y);
        let (bz0, bz1, rz0) = setup(z);

        let i = self.perm[bx0];
        let j = self.perm[bx1];
        let b00 = self.perm[i + by0];
        let b10 = self.perm[j + by0];
        let b01 = self.perm[i + by1];
        let b11 = self.perm[j + by1];

        let sx = s_curve(rx0);
        let sy = s_curve(ry0);
        let sz = s_curve(rz0);

        let a = lerp(sx, self.values[b00 + bz0], self.values[b10 + bz0]);
        let b = lerp(sx, self.values[b01 + bz0], self.values[b11 + bz0]);
        let c = lerp(sy, a, b);

        let a = lerp(sx, self.values[b00 + bz1], self.values[b10 + bz1]);
        let b = lerp(sx, self.values[b01 + bz1], self.values[b11 + bz1]);
        let d = lerp(sy, a, b);

        lerp(sz, c, d)
    }

    pub fn fractal1(&self, octaves: u32, x: f32) -> f32 {
        self.fbm.sum(octaves, |f| self.noise1(x * f))
    }

    pub fn fractal2(&self, octaves: u32, x: f32, y: f32) -> f32 {
        self.fbm.sum(octaves, |f| self.noise2(x * f, y * f))
    }

    pub fn fractal3(&self, octaves: u32, x: f32, y: f32, z: f32) -> f32 {
        self.fbm.sum(octaves, |f| self.noise3(x * f, y * f, z * f))
    }
}

// Shift the coordinate into positive range, then split into lattice
// cell (wrapped to the table) and fractional part.
#[inline]
fn setup(v: f32) -> (usize, usize, f32) {
    let t = v + 4096.0;
    let it = t as i32;
    let b0 = (it & TABLE_MASK) as usize;
    let b1 = ((it + 1) & TABLE_MASK) as usize;
    let r0 = t - it as f32;
    (b0, b1, r0)
}

#[inline]
fn s_curve(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}
