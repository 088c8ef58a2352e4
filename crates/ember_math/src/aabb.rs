//! Axis-aligned bounding boxes.

use glam::Vec3;

use crate::{Interval, Ray};

/// An axis-aligned bounding box stored as one interval per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// A box that contains nothing.
    pub const EMPTY: Self = Self {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Box spanning two corner points, given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Smallest box enclosing both inputs.
    pub fn surrounding(a: &Self, b: &Self) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    pub fn axis_interval(&self, axis: usize) -> Interval {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Index of the widest axis. Ties prefer y, then z, never x.
    pub fn longest_axis(&self) -> usize {
        let x = self.x.size();
        let y = self.y.size();
        let z = self.z.size();
        if x > y && x > z {
            0
        } else if y >= z {
            1
        } else {
            2
        }
    }

    /// Slab test: intersect the per-axis parameter intervals with
    /// `ray_t` and report whether a nonempty overlap remains. Relies
    /// on IEEE semantics of dividing by a zero direction component.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let ax = self.axis_interval(axis);
            let inv_d = 1.0 / ray.direction[axis];
            let origin = ray.origin[axis];

            let mut t0 = (ax.min - origin) * inv_d;
            let mut t1 = (ax.max - origin) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = ray_t.min.max(t0);
            ray_t.max = ray_t.max.min(t1);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Box shifted by an offset, same extents.
    pub fn translate(&self, offset: Vec3) -> Self {
        Self {
            x: self.x.add_scalar(offset.x),
            y: self.y.add_scalar(offset.y),
            z: self.z.add_scalar(offset.z),
        }
    }

    // Planar primitives produce zero-thickness boxes; give every axis a
    // small minimum extent so the slab test cannot miss them.
    fn pad_to_minimums(&mut self) {
        const DELTA: f32 = 1e-4;
        if self.x.size() < DELTA {
            self.x = self.x.expand(DELTA);
        }
        if self.y.size() < DELTA {
            self.y = self.y.expand(DELTA);
        }
        if self.z.size() < DELTA {
            self.z = self.z.expand(DELTA);
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
