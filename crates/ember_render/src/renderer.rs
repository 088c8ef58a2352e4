//! Integrators and the parallel render driver.

use std::sync::atomic::{AtomicBool, Ordering};

use ember_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::camera::RayCamera;
use crate::hittable::Hittable;
use crate::material::Color;

// Offset hits away from t = 0 to avoid self-intersection acne.
const T_MIN: f32 = 0.001;

/// Which integrator evaluates each camera ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceMethod {
    /// Recurse to a fixed bounce depth.
    DepthLimited,
    /// Unbiased termination: each bounce survives with the given
    /// probability and surviving paths are reweighted by it.
    RussianRoulette { survival: f32 },
}

/// Full description of a render job. A config plus a scene and camera
/// determines the output exactly.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Radiance for rays that escape the scene.
    pub background: Color,
    pub method: TraceMethod,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            method: TraceMethod::DepthLimited,
            seed: 0,
        }
    }
}

/// Depth-limited recursive tracer. Accumulates emission at every
/// bounce; a ray that exhausts its depth budget contributes black.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    depth: u32,
    rng: &mut dyn rand::RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY), rng) else {
        return background;
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);
    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emitted
                + scatter.attenuation
                    * ray_color(&scatter.scattered, background, world, depth - 1, rng)
        }
        None => emitted,
    }
}

/// Russian roulette Monte Carlo estimator. Termination is
/// probabilistic rather than depth-capped; surviving bounces are
/// divided by the material's sampling pdf and the survival
/// probability, which keeps the estimate unbiased.
pub fn ray_color_monte_carlo(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    survival: f32,
    rng: &mut dyn rand::RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY), rng) else {
        return background;
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);
    let Some(scatter) = rec.material.scatter(ray, &rec, rng) else {
        return emitted;
    };

    if rng.gen::<f32>() > survival {
        return emitted;
    }

    let pdf = rec.material.scattering_pdf(scatter.scattered.direction);
    emitted
        + scatter.attenuation
            * ray_color_monte_carlo(&scatter.scattered, background, world, survival, rng)
            / pdf
            / survival
}

/// Linear-light output image. Row 0 is the top scanline.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// Render the scene to completion.
pub fn render(camera: &dyn RayCamera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let cancel = AtomicBool::new(false);
    render_cancellable(camera, world, config, &cancel)
}

/// Render with cooperative cancellation, checked once per scanline.
/// Cancelled rows come back black; the rows finished so far keep
/// their content.
///
/// Scanlines render in parallel, each with its own random stream
/// derived from the config seed and the row index, so the output is
/// identical whatever the thread schedule.
pub fn render_cancellable(
    camera: &dyn RayCamera,
    world: &dyn Hittable,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> ImageBuffer {
    log::debug!(
        "rendering {}x{} at {} spp, depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );

    let rows: Vec<Vec<Color>> = (0..config.height)
        .into_par_iter()
        .map(|row| {
            if cancel.load(Ordering::Relaxed) {
                return vec![Color::ZERO; config.width as usize];
            }
            let mut rng = StdRng::seed_from_u64(
                config.seed ^ (row as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15),
            );
            render_row(camera, world, config, row, &mut rng)
        })
        .collect();

    if cancel.load(Ordering::Relaxed) {
        log::debug!("render cancelled");
    }

    let mut image = ImageBuffer::new(config.width, config.height);
    for (y, row) in rows.into_iter().enumerate() {
        for (x, color) in row.into_iter().enumerate() {
            image.set(x as u32, y as u32, color);
        }
    }
    image
}

fn render_row(
    camera: &dyn RayCamera,
    world: &dyn Hittable,
    config: &RenderConfig,
    row: u32,
    rng: &mut StdRng,
) -> Vec<Color> {
    let mut out = Vec::with_capacity(config.width as usize);
    // Image row 0 is the top; film t grows upward.
    let j = config.height - 1 - row;

    for i in 0..config.width {
        let mut accumulated = Color::ZERO;
        for _ in 0..config.samples_per_pixel {
            let s = (i as f32 + rng.gen::<f32>()) / (config.width - 1) as f32;
            let t = (j as f32 + rng.gen::<f32>()) / (config.height - 1) as f32;
            let ray = camera.cast_ray(s, t, rng);
            accumulated += match config.method {
                TraceMethod::DepthLimited => {
                    ray_color(&ray, config.background, world, config.max_depth, rng)
                }
                TraceMethod::RussianRoulette { survival } => {
                    ray_color_monte_carlo(&ray, config.background, world, survival, rng)
                }
            };
        }
        out.push(accumulated / config.samples_per_pixel as f32);
    }
    out
}
