/*

    Intersection predicates between bounding volumes.

    One free function per (volume, volume) pair, all of them
    pure: no allocation, no logging, no shared state. The
    methods on Aabb, Obb and Volume forward here.

    The single idea behind the OBB family: the box axes are
    orthonormal, so dotting (p - center) with each axis moves p
    into the box frame (multiplication by the transpose of the
    basis), where the oriented test becomes an axis aligned one
    against [-w, +w].

    None of the predicates validate their input. Non orthonormal
    axes or negative extents give unspecified answers.

    @date: 12 Nov, 2025
*/

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::obb::Obb;
use crate::shapes::Sphere;
use crate::prelude::*;

/// Index pairs into the output of `obb_vertices` for the 12 box edges,
/// x edges first, then y, then z.
pub const OBB_EDGES: [[usize; 2]; 12] = [
    [0, 4], [1, 5], [2, 6], [3, 7],
    [0, 2], [1, 3], [4, 6], [5, 7],
    [0, 1], [2, 3], [4, 5], [6, 7],
];

// ====================================================================================================
// AABB vs X
// ====================================================================================================

/// Closed interval test on x, y, z in that order, stops at the first axis that rejects.
#[inline]
pub fn intersect_aabb_point(aabb: &Aabb, v: &Vector3) -> bool {
    aabb.axis(0).contains(v.x)
        && aabb.axis(1).contains(v.y)
        && aabb.axis(2).contains(v.z)
}

/// ARVO test, see http://www.mrtc.mdh.se/projects/3Dgraphics/paperF.pdf
#[inline]
pub fn intersect_aabb_sphere(aabb: &Aabb, s: &Sphere) -> bool {
    arvo_test((0..3).map(|i| (aabb.axis(i), s.center[i])), s.radius)
}

/// Separating axis test on the world axes. Boxes that only touch intersect.
#[inline]
pub fn intersect_aabb_aabb(b1: &Aabb, b2: &Aabb) -> bool {
    (0..3).all(|i| b1.axis(i).overlaps(&b2.axis(i)))
}

// ====================================================================================================
// OBB vs X
// ====================================================================================================

#[inline]
pub fn intersect_obb_point(obb: &Obb, v: &Vector3) -> bool {
    // move box to origin
    let p = *v - obb.center;

    // scalar projection of p onto each unit axis, one axis at a time
    obb.axes()
        .iter()
        .zip(obb.half_widths.to_array())
        .all(|(axis, w)| Interval::symmetric(w).contains(axis.dot(p)))
}

/// Same ARVO test as the AABB version, done in the box frame.
/// The sphere center is projected lazily so a rejecting axis skips the remaining dot products.
#[inline]
pub fn intersect_obb_sphere(obb: &Obb, s: &Sphere) -> bool {
    let so = s.center - obb.center;
    let slabs = obb.axes()
        .into_iter()
        .zip(obb.half_widths.to_array())
        .map(move |(axis, w)| (Interval::symmetric(w), axis.dot(so)));
    arvo_test(slabs, s.radius)
}

/// Accumulates the squared distance from the sphere center to the box, one slab at a time.
/// Unlike the paper, rejects after every axis: far away boxes tend to fail on the first one.
#[inline]
fn arvo_test<I>(slabs: I, radius: Float) -> bool
where
    I: IntoIterator<Item = (Interval, Float)>,
{
    let squared_radius = radius * radius;
    let mut distance: Float = 0.0;
    for (slab, x) in slabs {
        distance += slab.squared_distance(x);
        if squared_radius < distance {
            return false;
        }
    }
    true
}

// ====================================================================================================
// OBB vertices
// ====================================================================================================

/// center +- w0*x +- w1*y +- w2*z. Sign of x varies slowest, z fastest:
/// (+,+,+), (+,+,-), (+,-,+), (+,-,-), (-,+,+), (-,+,-), (-,-,+), (-,-,-).
/// Renderers index into this order (see OBB_EDGES), do not reorder.
pub fn obb_vertices(obb: &Obb) -> [Vector3; 8] {
    let ex = obb.x_axis * obb.half_widths.x;
    let ey = obb.y_axis * obb.half_widths.y;
    let ez = obb.z_axis * obb.half_widths.z;

    let sign = |negative: bool| -> Float { if negative { -1.0 } else { 1.0 } };

    let mut b = [Vector3::ZERO; 8];
    for (n, corner) in b.iter_mut().enumerate() {
        *corner = obb.center
            + ex * sign(n & 4 != 0)
            + ey * sign(n & 2 != 0)
            + ez * sign(n & 1 != 0);
    }
    b
}
