/*

    Axis Aligned Bounding Box stored as center + half widths.

    Each axis of the box is a closed Interval, see interval.rs.
    Zero half widths are allowed, the box then collapses to a
    plane, line or point along that axis and every predicate
    still treats it as a closed (zero width) interval.

    @date: 9 Nov, 2025
*/

use crate::collision::{intersect_aabb_aabb, intersect_aabb_point, intersect_aabb_sphere};
use crate::interval::Interval;
use crate::shapes::Sphere;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, SmartDefault)]
pub struct Aabb {
    #[serde(rename = "Center", deserialize_with = "deser_vec3")]
    pub center: Vector3,
    #[serde(rename = "HalfWidths", deserialize_with = "deser_vec3")]
    #[default(Vector3::ONE)]
    pub half_widths: Vector3,
}

impl Aabb {
    pub fn new(center: Vector3, half_widths: Vector3) -> Self {
        Self {
            center,
            half_widths,
        }
    }

    /// Centered at origin with half width 1 on every axis
    pub fn unit() -> Self {
        Self::new(Vector3::ZERO, Vector3::ONE)
    }

    pub fn from_min_max(min: Vector3, max: Vector3) -> Self {
        debug_assert!(min.cmple(max).all(), "Invalid bounds, found max < min");
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn min(&self) -> Vector3 {
        self.center - self.half_widths
    }

    pub fn max(&self) -> Vector3 {
        self.center + self.half_widths
    }

    /// Closed slab of the box along world axis `i` (0 = x, 1 = y, 2 = z)
    #[inline]
    pub fn axis(&self, i: usize) -> Interval {
        Interval::centered(self.center[i], self.half_widths[i])
    }

    pub fn load_unit(&mut self) {
        *self = Self::unit();
    }

    pub fn scale(&mut self, value: Float) {
        self.half_widths *= value;
    }

    /// Non-uniform scale, half width i is multiplied by v[i]
    pub fn scale_axes(&mut self, v: Vector3) {
        self.half_widths *= v;
    }

    pub fn translate(&mut self, v: Vector3) {
        self.center += v;
    }

    #[inline]
    pub fn contains_point(&self, p: &Vector3) -> bool {
        intersect_aabb_point(self, p)
    }

    #[inline]
    pub fn intersects_sphere(&self, s: &Sphere) -> bool {
        intersect_aabb_sphere(self, s)
    }

    #[inline]
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        intersect_aabb_aabb(self, other)
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }
}
