//! Gradient (Perlin) noise with the quintic fade curve.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::FbmParams;

/// Classic gradient noise over a hashed integer lattice. Gradients
/// are picked from the twelve edge directions of a cube, blended with
/// the quintic fade `6t^5 - 15t^4 + 10t^3`. Output is in `[-1, 1]`.
pub struct PerlinNoise {
    // Doubled permutation table so perm[perm[x] + y] stays in bounds.
    perm: Vec<usize>,
    pub fbm: FbmParams,
}

impl PerlinNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut perm: Vec<usize> = (0..256).collect();
        perm.shuffle(&mut rng);
        for i in 0..256 {
            let p = perm[i];
            perm.push(p);
        }

        Self {
            perm,
            fbm: FbmParams::default(),
        }
    }

    pub fn noise1(&self, x: f32) -> f32 {
        self.noise3(x, 0.0, 0.0)
    }

    pub fn noise2(&self, x: f32, y: f32) -> f32 {
        self.noise3(x, y, 0.0)
    }

    pub fn noise3(&self, x: f32, y: f32, z: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let zi = (z.floor() as i32 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let p = &self.perm;
        let aaa = p[p[p[xi] + yi] + zi];
        let aba = p[p[p[xi] + yi + 1] + zi];
        let aab = p[p[p[xi] + yi] + zi + 1];
        let abb = p[p[p[xi] + yi + 1] + zi + 1];
        let baa = p[p[p[xi + 1] + yi] + zi];
        let bba = p[p[p[xi + 1] + yi + 1] + zi];
        let bab = p[p[p[xi + 1] + yi] + zi + 1];
        let bbb = p[p[p[xi + 1] + yi + 1] + zi + 1];

        let x1 = lerp(u, grad(aaa, xf, yf, zf), grad(baa, xf - 1.0, yf, zf));
        let x2 = lerp(
            u,
            grad(aba, xf, yf - 1.0, zf),
            grad(bba, xf - 1.0, yf - 1.0, zf),
        );
        let y1 = lerp(v, x1, x2);

        let x1 = lerp(
            u,
            grad(aab, xf, yf, zf - 1.0),
            grad(bab, xf - 1.0, yf, zf - 1.0),
        );
        let x2 = lerp(
            u,
            grad(abb, xf, yf - 1.0, zf - 1.0),
            grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
        );
        let y2 = lerp(v, x1, x2);

        lerp(w, y1, y2)
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

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

// Hash the low 4 bits into one of the cube edge gradient directions.
#[inline]
fn grad(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = PerlinNoise::new(77);
        let b = PerlinNoise::new(77);
        for i in 0..100 {
            let x = i as f32 * 0.219 - 11.0;
            assert_eq!(a.noise3(x, -x, x * 0.5), b.noise3(x, -x, x * 0.5));
        }
    }

    #[test]
    fn zero_at_lattice_points() {
        // Gradient noise vanishes at every integer lattice point.
        let noise = PerlinNoise::new(3);
        for i in -5..5 {
            for j in -5..5 {
                let v = noise.noise3(i as f32, j as f32, 0.0);
                assert!(v.abs() < 1e-6, "nonzero at lattice: {v}");
            }
        }
    }

    #[test]
    fn fractal_stays_in_range() {
        let noise = PerlinNoise::new(13);
        for i in 0..500 {
            let x = i as f32 * 0.143 - 30.0;
            let v = noise.fractal3(7, x, x * 0.9, -x * 0.4);
            assert!((-1.0..=1.0).contains(&v), "out of range: {v}");
        }
    }
}
