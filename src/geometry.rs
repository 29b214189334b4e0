/*

    Rotation helpers used to orient bounding volumes.

    Matrices below are written down row by row, the way
    they appear on paper, then transposed into bevy_math's
    column storage. Use `Matrix3::row(i)` to read them back.

    @date: 9 Oct, 2025
*/

use crate::prelude::*;

/// Rows of a 3x3 matrix into a Matrix3
#[inline]
fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Matrix3 {
    Matrix3::from_cols(r0, r1, r2).transpose()
}

/// R = Rx(r1) * Ry(r2) * Rz(r3), angles in radians
pub fn rotation_xyz(r1: Float, r2: Float, r3: Float) -> Matrix3 {
    let (s1, c1) = r1.sin_cos();
    let (s2, c2) = r2.sin_cos();
    let (s3, c3) = r3.sin_cos();

    let c3_s2 = c3 * s2;
    let s2_s3 = s2 * s3;

    from_rows(
        Vector3::new(c2 * c3, -(c2 * s3), s2),
        Vector3::new((c1 * s3) + (s1 * c3_s2), (c1 * c3) - (s1 * s2_s3), -(c2 * s1)),
        Vector3::new((s1 * s3) - (c1 * c3_s2), (c3 * s1) + (c1 * s2_s3), c1 * c2),
    )
}

/// R = Rz(r1) * Ry(r2) * Rx(r3), angles in radians
pub fn rotation_zyx(r1: Float, r2: Float, r3: Float) -> Matrix3 {
    let (s1, c1) = r1.sin_cos();
    let (s2, c2) = r2.sin_cos();
    let (s3, c3) = r3.sin_cos();

    let c3_s2 = c3 * s2;
    let s2_s3 = s2 * s3;

    from_rows(
        Vector3::new(c1 * c2, -(c3 * s1) + (c1 * s2_s3), (s1 * s3) + (c1 * c3_s2)),
        Vector3::new(c2 * s1, (c1 * c3) + (s1 * s2_s3), -(c1 * s3) + (s1 * c3_s2)),
        Vector3::new(-s2, c2 * s3, c2 * c3),
    )
}

// NOTE: There is an article on how to rotate-align without trigonometry
// https://iquilezles.org/articles/noacos/
// it does not directly apply in our case but might be handy in future.
pub fn rodrigues_rotation(axis: &Vector3, angle: Float) -> Matrix3 {

    let k = axis.normalize();
    let x = k.x;
    let y = k.y;
    let z = k.z;

    let (si, co) = angle.sin_cos();
    let ic = 1.0 - co;

    Matrix3::from_cols(
        Vector3::new(x*x*ic + co,    y*x*ic + si*z,  z*x*ic - si*y),
        Vector3::new(x*y*ic - si*z,  y*y*ic + co,    z*y*ic + si*x),
        Vector3::new(x*z*ic + si*y,  y*z*ic - si*x,  z*z*ic + co),
    )
}

/// Gram-Schmidt. Keeps the direction of `x`, then fixes `y` against it,
/// then `z` against both. Handedness of the input is preserved.
pub fn orthonormalize(x: Vector3, y: Vector3, z: Vector3) -> (Vector3, Vector3, Vector3) {
    let x = x.normalize();
    let y = (y - x * x.dot(y)).normalize();
    let z = (z - x * x.dot(z) - y * y.dot(z)).normalize();

    debug_assert_orthonormality(&x, &y, &z);
    (x, y, z)
}

/// True if all three vectors are unit length and mutually perpendicular within `eps`
pub fn is_orthonormal_basis(x: &Vector3, y: &Vector3, z: &Vector3, eps: Float) -> bool {
    (x.length_squared() - 1.0).abs() < eps
        && (y.length_squared() - 1.0).abs() < eps
        && (z.length_squared() - 1.0).abs() < eps
        && x.dot(*y).abs() < eps
        && y.dot(*z).abs() < eps
        && z.dot(*x).abs() < eps
}

pub fn debug_assert_orthonormality(x: &Vector3, y: &Vector3, z: &Vector3) {
    debug_assert!(is_orthonormal_basis(x, y, z, 1e-6), "basis is not orthonormal: {x:?} {y:?} {z:?}");
}
