//! Axis-aligned bounding box.
//!
//! Pure value type used for BVH nodes and spatial queries. All
//! intersection tests are closed-interval: boxes that merely touch
//! still count as overlapping.

use drape_types::Scalar;
use glam::Vec3;

/// An axis-aligned box spanning `[min, max]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners. `min` must be component-wise
    /// less than or equal to `max`.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box around a point, inflated by `margin` on each side.
    pub fn from_point(point: Vec3, margin: Scalar) -> Self {
        let half = Vec3::splat(margin);
        Self {
            min: point - half,
            max: point + half,
        }
    }

    /// The "nothing enclosed yet" box: grows to fit anything via [`Aabb::enclose`].
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(Scalar::INFINITY),
            max: Vec3::splat(Scalar::NEG_INFINITY),
        }
    }

    /// Expands this box (in place) to also enclose `other`.
    pub fn enclose(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// True iff the projections of the two boxes overlap on all three axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }

    /// True iff a sphere at `center` with `radius` overlaps this box.
    ///
    /// Accumulates the squared distance from the center to the box on
    /// each axis where the center lies outside `[min, max]`, then
    /// compares against `radius²`.
    pub fn intersects_sphere(&self, center: Vec3, radius: Scalar) -> bool {
        let mut dist_sq: Scalar = 0.0;
        for axis in 0..3 {
            let c = center[axis];
            if c < self.min[axis] {
                let d = c - self.min[axis];
                dist_sq += d * d;
            } else if c > self.max[axis] {
                let d = c - self.max[axis];
                dist_sq += d * d;
            }
        }
        dist_sq <= radius * radius
    }

    /// True iff this box lies entirely inside `other` (boundaries inclusive).
    pub fn fits_entirely_within(&self, other: &Aabb) -> bool {
        (self.min.x >= other.min.x && self.max.x <= other.max.x)
            && (self.min.y >= other.min.y && self.max.y <= other.max.y)
            && (self.min.z >= other.min.z && self.max.z <= other.max.z)
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        self.min + (self.max - self.min) * 0.5
    }

    /// Extent (max − min) along one axis. `axis` must be 0, 1, or 2.
    pub fn extent(&self, axis: usize) -> Scalar {
        self.max[axis] - self.min[axis]
    }
}
