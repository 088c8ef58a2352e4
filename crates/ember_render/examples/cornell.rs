//! Cornell box rendered to `cornell.ppm`.
//!
//! Run with `cargo run --release --example cornell`. Set `RUST_LOG=debug`
//! for progress output.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use ember_render::color::{write_ppm, DEFAULT_GAMMA};
use ember_render::{
    BvhNode, Cuboid, DiffuseLight, FlipFace, Interval, Lambertian, PinholeCamera, RenderConfig,
    RotateY, TraceMethod, Translate, Vec3, XyRect, XzRect, YzRect,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> std::io::Result<()> {
    env_logger::init();

    let red = Lambertian::solid(Vec3::new(0.65, 0.05, 0.05));
    let white = Lambertian::solid(Vec3::new(0.73, 0.73, 0.73));
    let green = Lambertian::solid(Vec3::new(0.12, 0.45, 0.15));
    let light = DiffuseLight::solid(Vec3::new(15.0, 15.0, 15.0));

    let mut objects: Vec<Arc<dyn ember_render::Hittable>> = Vec::new();

    // Walls, floor, ceiling, and the ceiling light.
    objects.push(Arc::new(FlipFace::new(Arc::new(YzRect::new(
        0.0, 555.0, 0.0, 555.0, 555.0, green,
    )))));
    objects.push(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    objects.push(Arc::new(FlipFace::new(Arc::new(XzRect::new(
        213.0, 343.0, 227.0, 332.0, 554.0, light,
    )))));
    objects.push(Arc::new(FlipFace::new(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )))));
    objects.push(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        white.clone(),
    )));
    objects.push(Arc::new(FlipFace::new(Arc::new(XyRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )))));

    // Two rotated boxes.
    let tall = Arc::new(Cuboid::new(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    objects.push(Arc::new(Translate::new(
        Arc::new(RotateY::new(tall, 15.0)),
        Vec3::new(265.0, 0.0, 295.0),
    )));

    let short = Arc::new(Cuboid::new(Vec3::ZERO, Vec3::splat(165.0), white));
    objects.push(Arc::new(Translate::new(
        Arc::new(RotateY::new(short, -18.0)),
        Vec3::new(130.0, 0.0, 65.0),
    )));

    let mut rng = StdRng::seed_from_u64(7);
    let world = BvhNode::build(objects, Interval::new(0.0, 1.0), &mut rng)
        .expect("cornell box geometry is bounded");

    let camera = PinholeCamera::new(
        Vec3::new(278.0, 278.0, -800.0),
        Vec3::new(278.0, 278.0, 0.0),
        Vec3::Y,
        40.0,
        1.0,
        10.0,
        0.0,
        1.0,
    );

    let config = RenderConfig {
        width: 400,
        height: 400,
        samples_per_pixel: 200,
        max_depth: 50,
        background: Vec3::ZERO,
        method: TraceMethod::RussianRoulette { survival: 0.9 },
        seed: 7,
    };

    let image = ember_render::render(&camera, &world, &config);

    let file = File::create("cornell.ppm")?;
    let mut out = BufWriter::new(file);
    write_ppm(&mut out, &image, DEFAULT_GAMMA)?;
    println!("wrote cornell.ppm");
    Ok(())
}
