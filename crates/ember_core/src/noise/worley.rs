//! Worley (cellular) noise.

use super::FbmParams;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const LCG_MAX: u32 = 0xFFFF_FFFF;

/// Distance-to-nearest-feature-point cellular noise. Each lattice
/// cell is hashed with FNV-1a, the hash seeds an LCG that places one
/// to three feature points in the cell, and the noise value is the
/// distance to the closest point over the 3x3(x3) neighborhood.
/// Output is nonnegative.
pub struct WorleyNoise {
    seed: u32,
    pub fbm: FbmParams,
}

impl WorleyNoise {
    pub fn new(seed: u64) -> Self {
        // Fold the seed into the 32-bit hash domain.
        let seed = (seed ^ (seed >> 32)) as u32;
        Self {
            seed,
            fbm: FbmParams::default(),
        }
    }

    pub fn noise1(&self, x: f32) -> f32 {
        let xi = x.floor() as i32;
        let mut min_dist = f32::MAX;

        for cell_x in (xi - 1)..=(xi + 1) {
            let mut random = self.hash1(cell_x);
            let count = feature_point_count(random);
            for _ in 0..count {
                random = lcg(random);
                let px = cell_x as f32 + random as f32 / LCG_MAX as f32;
                min_dist = min_dist.min((x - px).abs());
            }
        }
        min_dist
    }

    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;
        let mut min_dist = f32::MAX;

        for cell_y in (yi - 1)..=(yi + 1) {
            for cell_x in (xi - 1)..=(xi + 1) {
                let mut random = self.hash2(cell_x, cell_y);
                let count = feature_point_count(random);
                for _ in 0..count {
                    random = lcg(random);
                    let px = cell_x as f32 + random as f32 / LCG_MAX as f32;
                    random = lcg(random);
                    let py = cell_y as f32 + random as f32 / LCG_MAX as f32;
                    let d = (x - px).hypot(y - py);
                    min_dist = min_dist.min(d);
                }
            }
        }
        min_dist
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;
        let zi = z.floor() as i32;
        let mut min_dist = f32::MAX;

        for cell_z in (zi - 1)..=(zi + 1) {
            for cell_y in (yi - 1)..=(yi + 1) {
                for cell_x in (xi - 1)..=(xi + 1) {
                    let mut random = self.hash3(cell_x, cell_y, cell_z);
                    let count = feature_point_count(random);
                    for _ in 0..count {
                        random = lcg(random);
                        let px = cell_x as f32 + random as f32 / LCG_MAX as f32;
                        random = lcg(random);
                        let py = cell_y as f32 + random as f32 / LCG_MAX as f32;
                        random = lcg(random);
                        let pz = cell_z as f32 + random as f32 / LCG_MAX as f32;
                        let d = ((x - px) * (x - px)
                            + (y - py) * (y - py)
                            + (z - pz) * (z - pz))
                            .sqrt();
                        min_dist = min_dist.min(d);
                    }
                }
            }
        }
        min_dist
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

    #[inline]
    fn hash1(&self, x: i32) -> u32 {
        fnv1a(FNV_OFFSET_BASIS, (x as u32).wrapping_add(self.seed))
    }

    #[inline]
    fn hash2(&self, x: i32, y: i32) -> u32 {
        let h = fnv1a(FNV_OFFSET_BASIS, (x as u32).wrapping_add(self.seed));
        fnv1a(h, y as u32)
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        let h = fnv1a(FNV_OFFSET_BASIS, (x as u32).wrapping_add(self.seed));
        let h = fnv1a(h, y as u32);
        fnv1a(h, z as u32)
    }
}

#[inline]
fn fnv1a(hash: u32, value: u32) -> u32 {
    (hash ^ value).wrapping_mul(FNV_PRIME)
}

#[inline]
fn lcg(last: u32) -> u32 {
    last.wrapping_mul(1_103_515_245).wrapping_add(12_345) % LCG_MAX
}

// Thresholds approximate a Poisson distribution with a small mean,
// mapped onto the 32-bit hash range.
#[inline]
fn feature_point_count(hash: u32) -> u32 {
    if hash < 393_325_350 {
        1
    } else if hash < 2_700_834_071 {
        2
    } else {
        3
    }
}
