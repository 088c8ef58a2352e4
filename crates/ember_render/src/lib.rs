//! Ember: a CPU path tracer.
//!
//! Geometry implements [`Hittable`], surfaces implement [`Material`],
//! and [`render`] drives one of two integrators over the scene: a
//! depth-limited recursive tracer and a Russian roulette Monte Carlo
//! estimator. Randomness is threaded explicitly, so a scene, seed,
//! and configuration fully determine the output image.

mod aarect;
mod bvh;
mod camera;
pub mod color;
mod cuboid;
mod hittable;
mod material;
mod medium;
mod pbr;
mod renderer;
mod sphere;
mod transform;

pub use aarect::{XyRect, XzRect, YzRect};
pub use bvh::{BvhError, BvhNode, MAX_OBJECTS_IN_LEAF};
pub use camera::{LensSettings, PinholeCamera, RayCamera, ThinLensCamera};
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    Color, Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use medium::ConstantMedium;
pub use pbr::CookTorrance;
pub use renderer::{
    ray_color, ray_color_monte_carlo, render, render_cancellable, ImageBuffer, RenderConfig,
    TraceMethod,
};
pub use sphere::{MovingSphere, PositionKey, Sphere};
pub use transform::{FlipFace, RotateY, Translate};

// Re-export the math crate so scene construction needs one import.
pub use ember_math::{sampling, Aabb, Interval, Plane, Ray, Vec3};
