/*

    Oriented Bounding Box: a center, three orthonormal
    axes and a half width along each of them.

    WARNING: Every predicate assumes x_axis, y_axis, z_axis
    are unit length and mutually perpendicular. Nothing
    here renormalizes them, call geometry::orthonormalize
    after composing rotations if they start to drift.

    @date: 12 Nov, 2025
*/

use crate::aabb::Aabb;
use crate::collision::{intersect_obb_point, intersect_obb_sphere, obb_vertices};
use crate::geometry::{is_orthonormal_basis, rotation_xyz};
use crate::shapes::Sphere;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, SmartDefault)]
pub struct Obb {
    pub center: Vector3,
    #[default(Vector3::X)]
    pub x_axis: Vector3,
    #[default(Vector3::Y)]
    pub y_axis: Vector3,
    #[default(Vector3::Z)]
    pub z_axis: Vector3,
    #[default(Vector3::ONE)]
    pub half_widths: Vector3,
}

impl Obb {
    pub fn new(center: Vector3, axes: [Vector3; 3], half_widths: Vector3) -> Self {
        let [x_axis, y_axis, z_axis] = axes;
        Self {
            center,
            x_axis,
            y_axis,
            z_axis,
            half_widths,
        }
    }

    /// Centered at origin, standard basis, half width 1 on every axis
    pub fn unit() -> Self {
        Self::new(Vector3::ZERO, [Vector3::X, Vector3::Y, Vector3::Z], Vector3::ONE)
    }

    /// Box axes are the ROWS of `rotation`
    pub fn from_rotation(center: Vector3, half_widths: Vector3, rotation: &Matrix3) -> Self {
        Self::new(center, [rotation.row(0), rotation.row(1), rotation.row(2)], half_widths)
    }

    /// Euler angles in radians, applied as Rx * Ry * Rz
    pub fn from_euler_xyz(center: Vector3, half_widths: Vector3, angles: Vector3) -> Self {
        Self::from_rotation(center, half_widths, &rotation_xyz(angles.x, angles.y, angles.z))
    }

    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center, [Vector3::X, Vector3::Y, Vector3::Z], aabb.half_widths)
    }

    #[inline]
    pub fn axes(&self) -> [Vector3; 3] {
        [self.x_axis, self.y_axis, self.z_axis]
    }

    pub fn is_orthonormal(&self, eps: Float) -> bool {
        is_orthonormal_basis(&self.x_axis, &self.y_axis, &self.z_axis, eps)
    }

    pub fn load_unit(&mut self) {
        *self = Self::unit();
    }

    pub fn scale(&mut self, value: Float) {
        self.half_widths *= value;
    }

    pub fn scale_axes(&mut self, v: Vector3) {
        self.half_widths *= v;
    }

    pub fn translate(&mut self, v: Vector3) {
        self.center += v;
    }

    /// Express a world space point in the box frame, i.e. multiply
    /// (p - center) by the inverse (= transpose) of the basis.
    #[inline]
    pub fn to_local(&self, p: &Vector3) -> Vector3 {
        let d = *p - self.center;
        Vector3::new(self.x_axis.dot(d), self.y_axis.dot(d), self.z_axis.dot(d))
    }

    /// Inverse of to_local
    #[inline]
    pub fn to_world(&self, q: &Vector3) -> Vector3 {
        self.center + self.x_axis * q.x + self.y_axis * q.y + self.z_axis * q.z
    }

    #[inline]
    pub fn contains_point(&self, p: &Vector3) -> bool {
        intersect_obb_point(self, p)
    }

    #[inline]
    pub fn intersects_sphere(&self, s: &Sphere) -> bool {
        intersect_obb_sphere(self, s)
    }

    /// Corners ordered (+,+,+), (+,+,-), (+,-,+), ... (-,-,-), see collision::obb_vertices
    pub fn vertices(&self) -> [Vector3; 8] {
        obb_vertices(self)
    }

    /// World axis aligned box enclosing the oriented one
    pub fn bounding_aabb(&self) -> Aabb {
        let w = self.half_widths;
        let half_widths = self.x_axis.abs() * w.x + self.y_axis.abs() * w.y + self.z_axis.abs() * w.z;
        Aabb::new(self.center, half_widths)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tilted() -> Obb {
        Obb::from_euler_xyz(
            Vector3::new(3.0, 2.0, 1.5),
            Vector3::new(2.0, 1.0, 0.5),
            radians3(Vector3::new(-15.4, -25.1, -46.6)),
        )
    }

    #[test]
    fn unit_is_standard_basis() {
        let mut b = tilted();
        b.load_unit();
        assert_eq!(b, Obb::unit());
        assert_eq!(Obb::default(), Obb::unit());
        assert_eq!(Obb::from_aabb(&Aabb::unit()), Obb::unit());
        assert!(b.is_orthonormal(1e-12));
    }

    #[test]
    fn scale_and_translate_keep_orientation() {
        let mut b = tilted();
        let axes = b.axes();
        b.scale(2.0);
        b.scale_axes(Vector3::new(1.0, 0.5, 4.0));
        b.translate(Vector3::new(-3.0, -2.0, -1.5));
        assert_eq!(b.axes(), axes);
        assert_eq!(b.half_widths, Vector3::new(4.0, 1.0, 4.0));
        assert!(b.center.length() < 1e-12);
        assert!(b.is_orthonormal(1e-9));
    }

    #[test]
    fn local_frame_round_trip() {
        let b = tilted();
        let p = Vector3::new(-0.3, 7.0, 2.2);
        let q = b.to_local(&p);
        assert!((b.to_world(&q) - p).length() < 1e-9);
        assert!(b.to_local(&b.center).length() < 1e-12);
        // a point one half width along the box x axis
        let on_face = b.center + b.x_axis * b.half_widths.x;
        assert!((b.to_local(&on_face) - Vector3::new(2.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn rows_become_axes() {
        let m = Matrix3::from_cols(Vector3::Y, Vector3::Z, Vector3::X);
        let b = Obb::from_rotation(Vector3::ZERO, Vector3::ONE, &m);
        assert_eq!(b.x_axis, m.row(0));
        assert_eq!(b.y_axis, m.row(1));
        assert_eq!(b.z_axis, m.row(2));
        assert!(b.is_orthonormal(1e-12));
    }

    #[test]
    fn bounding_aabb_contains_every_corner() {
        let b = tilted();
        let aabb = b.bounding_aabb();
        assert_eq!(aabb.center, b.center);
        // corners sit on the faces, allow for rounding
        let grown = Aabb::new(aabb.center, aabb.half_widths + Vector3::splat(1e-9));
        for v in b.vertices() {
            assert!(grown.contains_point(&v), "{v:?} outside {grown:?}");
        }
        // and is tight: some corner reaches each face
        for i in 0..3 {
            let reach = b.vertices().iter().map(|v| (v[i] - b.center[i]).abs()).fold(0.0, Float::max);
            assert!((reach - aabb.half_widths[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn axis_aligned_bounding_aabb_is_itself() {
        let b = Obb::new(Vector3::new(1.0, 1.0, 1.0), [Vector3::X, Vector3::Y, Vector3::Z], Vector3::new(3.0, 2.0, 1.0));
        assert_eq!(b.bounding_aabb(), Aabb::new(b.center, b.half_widths));
    }
}
