//! Simplex noise in one, two, and three dimensions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::FbmParams;

/// Simplex noise. Evaluates contributions from the corners of a
/// skewed simplex grid rather than a full hypercube, so higher
/// dimensions stay cheap. Output is in `[-1, 1]`.
pub struct SimplexNoise {
    perm: [u8; 256],
    pub fbm: FbmParams,
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut perm = [0u8; 256];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        perm.shuffle(&mut rng);
        Self {
            perm,
            fbm: FbmParams::default(),
        }
    }

    #[inline]
    fn hash(&self, i: i32) -> u8 {
        self.perm[(i & 255) as usize]
    }

    pub fn noise1(&self, x: f32) -> f32 {
        let i0 = fastfloor(x);
        let i1 = i0 + 1;
        let x0 = x - i0 as f32;
        let x1 = x0 - 1.0;

        let mut t0 = 1.0 - x0 * x0;
        t0 *= t0;
        let n0 = t0 * t0 * grad1(self.hash(i0), x0);

        let mut t1 = 1.0 - x1 * x1;
        t1 *= t1;
        let n1 = t1 * t1 * grad1(self.hash(i1), x1);

        // Scale chosen so the output just fits [-1, 1].
        0.395 * (n0 + n1)
    }

    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        const F2: f32 = 0.366025403; // (sqrt(3) - 1) / 2
        const G2: f32 = 0.211324865; // (3 - sqrt(3)) / 6

        let s = (x + y) * F2;
        let i = fastfloor(x + s);
        let j = fastfloor(y + s);

        let t = (i + j) as f32 * G2;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);

        // Which half of the skewed cell holds the point.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let gi0 = self.hash(i + self.hash(j) as i32);
        let gi1 = self.hash(i + i1 + self.hash(j + j1) as i32);
        let gi2 = self.hash(i + 1 + self.hash(j + 1) as i32);

        let n0 = corner2(gi0, x0, y0);
        let n1 = corner2(gi1, x1, y1);
        let n2 = corner2(gi2, x2, y2);

        45.23065 * (n0 + n1 + n2)
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        const F3: f32 = 1.0 / 3.0;
        const G3: f32 = 1.0 / 6.0;

        let s = (x + y + z) * F3;
        let i = fastfloor(x + s);
        let j = fastfloor(y + s);
        let k = fastfloor(z + s);

        let t = (i + j + k) as f32 * G3;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);
        let z0 = z - (k as f32 - t);

        // Rank the coordinates to pick the simplex traversal order.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f32 + G3;
        let y1 = y0 - j1 as f32 + G3;
        let z1 = z0 - k1 as f32 + G3;
        let x2 = x0 - i2 as f32 + 2.0 * G3;
        let y2 = y0 - j2 as f32 + 2.0 * G3;
        let z2 = z0 - k2 as f32 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let gi0 = self.hash(i + self.hash(j + self.hash(k) as i32) as i32);
        let gi1 = self.hash(i + i1 + self.hash(j + j1 + self.hash(k + k1) as i32) as i32);
        let gi2 = self.hash(i + i2 + self.hash(j + j2 + self.hash(k + k2) as i32) as i32);
        let gi3 = self.hash(i + 1 + self.hash(j + 1 + self.hash(k + 1) as i32) as i32);

        let n0 = corner3(gi0, x0, y0, z0);
        let n1 = corner3(gi1, x1, y1, z1);
        let n2 = corner3(gi2, x2, y2, z2);
        let n3 = corner3(gi3, x3, y3, z3);

        32.0 * (n0 + n1 + n2 + n3)
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

// Faster floor-to-int than f32::floor for the coordinate ranges noise
// operates on.
#[inline]
fn fastfloor(f: f32) -> i32 {
    let i = f as i32;
    if f < i as f32 {
        i - 1
    } else {
        i
    }
}

#[inline]
fn grad1(hash: u8, x: f32) -> f32 {
    let h = hash & 0x0F;
    let mut grad = 1.0 + (h & 7) as f32;
    if h & 8 != 0 {
        grad = -grad;
    }
    grad * x
}

#[inline]
fn grad2(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 0x3F;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    u + v
}

#[inline]
fn grad3(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -v } else { v };
    u + v
}

#[inline]
fn corner2(gi: u8, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * grad2(gi, x, y)
    }
}

#[inline]
fn corner3(gi: u8, x: f32, y: f32, z: f32) -> f32 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * grad3(gi, x, y, z)
    }
}
