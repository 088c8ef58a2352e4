//! Math primitives for the Ember renderer.
//!
//! Re-exports glam so downstream crates get `Vec3` and friends from a
//! single place, and adds the ray tracing specific pieces: rays,
//! intervals, axis-aligned boxes, planes, and sampling helpers.

pub use glam::*;

mod aabb;
mod interval;
mod plane;
mod ray;
pub mod sampling;

pub use aabb::Aabb;
pub use interval::Interval;
pub use plane::Plane;
pub use ray::Ray;
