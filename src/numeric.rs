/*

    Declare numeric types used throughout this repo.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change all of these:
    pub type Float = f32;
    pub type Vector3 = Vec3;
    pub type Matrix3 = Mat3;

    @date: 2 Oct, 2025
*/

use bevy_math::{DMat3, DVec3};
pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update Vector3 and Matrix3 types
pub type Vector3 = DVec3;
pub type Matrix3 = DMat3;

const DEG_TO_RAD: Float = 0.01745329252;
const RAD_TO_DEG: Float = 57.2957795131;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

#[inline]
pub fn radians(d: Float) -> Float {
    d * DEG_TO_RAD
}

#[inline]
pub fn degrees(r: Float) -> Float {
    r * RAD_TO_DEG
}

/// Componentwise degrees to radians, e.g. for euler angles read from JSON
#[inline]
pub fn radians3(d: Vector3) -> Vector3 {
    d * DEG_TO_RAD
}
