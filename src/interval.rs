/*

    Responsible for creating a struct that represents
    closed ranges [a,b] along a single axis (a "slab")
    and functionality to check if x is in range, how far
    x lies outside of it, and whether two slabs overlap.

    Every box predicate reduces to three of these, one per axis.

    @author: Bartu
    @date: Sept 2025

*/

use crate::numeric::{Float};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {
    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    /// [center - half_width, center + half_width]
    #[inline]
    pub fn centered(center: Float, half_width: Float) -> Self {
        Self {
            min: center - half_width,
            max: center + half_width,
        }
    }

    /// [-half_width, half_width], i.e. a box slab in its own local frame
    #[inline]
    pub fn symmetric(half_width: Float) -> Self {
        Self {
            min: -half_width,
            max: half_width,
        }
    }

    #[inline]
    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    /// Closed-interval overlap, touching ends count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(other.max < self.min || self.max < other.min)
    }

    /// Squared distance from x to the nearer end of the interval,
    /// zero if x is already inside.
    #[inline]
    pub fn squared_distance(&self, x: Float) -> Float {
        if x < self.min {
            let d = x - self.min;
            d * d
        }
        else if x > self.max {
            let d = x - self.max;
            d * d
        }
        else { 0.0 }
    }

}
