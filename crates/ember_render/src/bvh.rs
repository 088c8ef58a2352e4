//! Bounding volume hierarchy.

use std::cmp::Ordering;
use std::sync::Arc;

use ember_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};
use thiserror::Error;

use crate::hittable::{HitRecord, Hittable, HittableList};

/// Spans at or below this size become leaves, stored as an unordered
/// list and scanned linearly.
pub const MAX_OBJECTS_IN_LEAF: usize = 5;

#[derive(Error, Debug)]
pub enum BvhError {
    /// Unbounded geometry (infinite planes, empty lists) cannot be
    /// placed in a hierarchy.
    #[error("hittable without a bounding box cannot be placed in a BVH")]
    MissingBoundingBox,
    #[error("cannot build a BVH from an empty scene")]
    EmptyScene,
}

/// A binary BVH over shared hittables. Construction consumes the
/// scene list; traversal visits children in order and tightens the
/// search interval with each confirmed hit, so the closest
/// intersection wins regardless of tree shape.
pub enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        objects: HittableList,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Build a hierarchy over `objects` for the given shutter
    /// interval. Fails up front if any object lacks a bounding box.
    pub fn build(
        mut objects: Vec<Arc<dyn Hittable>>,
        time: Interval,
        rng: &mut dyn RngCore,
    ) -> Result<Self, BvhError> {
        if objects.is_empty() {
            return Err(BvhError::EmptyScene);
        }
        log::debug!("building BVH over {} objects", objects.len());
        Self::build_span(&mut objects, time, rng)
    }

    fn build_span(
        objects: &mut [Arc<dyn Hittable>],
        time: Interval,
        rng: &mut dyn RngCore,
    ) -> Result<Self, BvhError> {
        if objects.len() <= MAX_OBJECTS_IN_LEAF {
            let mut leaf = HittableList::new();
            for object in objects.iter() {
                leaf.add(object.clone());
            }
            let bbox = leaf
                .bounding_box(time)
                .ok_or(BvhError::MissingBoundingBox)?;
            return Ok(BvhNode::Leaf {
                objects: leaf,
                bbox,
            });
        }

        // Sort the span by bounding box minimum along a random axis,
        // then split at the midpoint.
        let axis = rng.gen_range(0..3usize);
        let mut missing_box = false;
        objects.sort_unstable_by(|a, b| {
            match (a.bounding_box(time), b.bounding_box(time)) {
                (Some(box_a), Some(box_b)) => box_a.min_corner()[axis]
                    .partial_cmp(&box_b.min_corner()[axis])
                    .unwrap_or(Ordering::Equal),
                _ => {
                    missing_box = true;
                    Ordering::Equal
                }
            }
        });
        if missing_box {
            return Err(BvhError::MissingBoundingBox);
        }

        let mid = objects.len() / 2;
        let (left_span, right_span) = objects.split_at_mut(mid);
        let left = Self::build_span(left_span, time, rng)?;
        let right = Self::build_span(right_span, time, rng)?;
        let bbox = Aabb::surrounding(&left.bbox(), &right.bbox());

        Ok(BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        })
    }

    pub fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        match self {
            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                objects.hit(ray, ray_t, rng)
            }
            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                let hit_left = left.hit(ray, ray_t, rng);
                // A left hit caps the parameter range searched on the
                // right, so the right side can only produce a closer hit.
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rng);
                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self, _time: Interval) -> Option<Aabb> {
        Some(self.bbox())
    }
}
