//! Infinite planes, used by the thin-lens camera to aim rays at the
//! plane of sharp focus.

use glam::Vec3;

use crate::Ray;

/// A plane in implicit form `dot(normal, p) + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    d: f32,
}

impl Plane {
    /// Plane with the given normal passing through `point`.
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Intersection point with a ray, or `None` when the ray is
    /// parallel to the plane or the hit lies behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        const PARALLEL_EPS: f32 = 1e-4;

        let denom = -self.normal.dot(ray.direction);
        if denom.abs() <= PARALLEL_EPS {
            return None;
        }

        let t = (self.normal.dot(ray.origin) + self.d) / denom;
        if t >= 0.0 {
            Some(ray.at(t))
        } else {
            None
        }
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vec3::Z, Vec3::ZERO)
    }
}
