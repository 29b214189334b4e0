/*

    Declare bounding volumes: Sphere, and the closed set
    Volume = { Aabb, Obb, Sphere } for callers that hold
    volumes of mixed kinds (trigger lists, query files).

    The BoundingVolume trait gathers what every volume can do.
    Pairwise tests live in collision.rs.

    @date: Oct, 2025
*/

use std::fmt::Debug;

use crate::aabb::Aabb;
use crate::collision::{intersect_aabb_sphere, intersect_obb_sphere};
use crate::obb::Obb;
use crate::prelude::*;


// =======================================================================================================
// BoundingVolume Trait
// =======================================================================================================
pub trait BoundingVolume : Debug + Send + Sync {
    fn center(&self) -> Vector3;
    fn contains_point(&self, p: &Vector3) -> bool;
    fn intersects_sphere(&self, s: &Sphere) -> bool;
    fn bounding_aabb(&self) -> Aabb;

    fn load_unit(&mut self);
    fn scale(&mut self, value: Float);
    fn translate(&mut self, v: Vector3);
}


// =======================================================================================================
// Sphere (impl BoundingVolume)
// =======================================================================================================
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, SmartDefault)]
pub struct Sphere {
    #[serde(rename = "Center", deserialize_with = "deser_vec3")]
    pub center: Vector3,
    #[serde(rename = "Radius", deserialize_with = "deser_float")]
    #[default = 1.0]
    pub radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3, radius: Float) -> Self {
        Self {
            center,
            radius,
        }
    }

    pub fn unit() -> Self {
        Self::new(Vector3::ZERO, 1.0)
    }
}

// No non-uniform scale on purpose, the result would not be a sphere anymore
impl BoundingVolume for Sphere {
    fn center(&self) -> Vector3 {
        self.center
    }

    fn contains_point(&self, p: &Vector3) -> bool {
        self.center.distance_squared(*p) <= self.radius * self.radius
    }

    fn intersects_sphere(&self, s: &Sphere) -> bool {
        let r = self.radius + s.radius;
        self.center.distance_squared(s.center) <= r * r
    }

    fn bounding_aabb(&self) -> Aabb {
        Aabb::new(self.center, Vector3::splat(self.radius))
    }

    fn load_unit(&mut self) {
        *self = Sphere::unit();
    }

    fn scale(&mut self, value: Float) {
        self.radius *= value;
    }

    fn translate(&mut self, v: Vector3) {
        self.center += v;
    }
}

impl BoundingVolume for Aabb {
    fn center(&self) -> Vector3 {
        self.center
    }

    fn contains_point(&self, p: &Vector3) -> bool {
        Aabb::contains_point(self, p)
    }

    fn intersects_sphere(&self, s: &Sphere) -> bool {
        intersect_aabb_sphere(self, s)
    }

    fn bounding_aabb(&self) -> Aabb {
        *self
    }

    fn load_unit(&mut self) {
        Aabb::load_unit(self);
    }

    fn scale(&mut self, value: Float) {
        Aabb::scale(self, value);
    }

    fn translate(&mut self, v: Vector3) {
        Aabb::translate(self, v);
    }
}

impl BoundingVolume for Obb {
    fn center(&self) -> Vector3 {
        self.center
    }

    fn contains_point(&self, p: &Vector3) -> bool {
        Obb::contains_point(self, p)
    }

    fn intersects_sphere(&self, s: &Sphere) -> bool {
        intersect_obb_sphere(self, s)
    }

    fn bounding_aabb(&self) -> Aabb {
        Obb::bounding_aabb(self)
    }

    fn load_unit(&mut self) {
        Obb::load_unit(self);
    }

    fn scale(&mut self, value: Float) {
        Obb::scale(self, value);
    }

    fn translate(&mut self, v: Vector3) {
        Obb::translate(self, v);
    }
}


// =======================================================================================================
// Volume (closed set of the above, impl BoundingVolume)
// =======================================================================================================

// Deserialized from JSON objects carrying "_type": "aabb" | "obb" | "sphere"
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum Volume {
    Aabb(Aabb),
    Obb(Obb),
    Sphere(Sphere),
}

impl Volume {
    pub fn kind(&self) -> &'static str {
        match self {
            Volume::Aabb(_) => "aabb",
            Volume::Obb(_) => "obb",
            Volume::Sphere(_) => "sphere",
        }
    }

    /// Per axis scale. Returns false and leaves spheres untouched.
    pub fn scale_axes(&mut self, v: Vector3) -> bool {
        match self {
            Volume::Aabb(b) => { b.scale_axes(v); true }
            Volume::Obb(b) => { b.scale_axes(v); true }
            Volume::Sphere(_) => false,
        }
    }

    fn as_dyn(&self) -> &dyn BoundingVolume {
        match self {
            Volume::Aabb(b) => b,
            Volume::Obb(b) => b,
            Volume::Sphere(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn BoundingVolume {
        match self {
            Volume::Aabb(b) => b,
            Volume::Obb(b) => b,
            Volume::Sphere(s) => s,
        }
    }
}

impl BoundingVolume for Volume {
    fn center(&self) -> Vector3 {
        self.as_dyn().center()
    }

    fn contains_point(&self, p: &Vector3) -> bool {
        self.as_dyn().contains_point(p)
    }

    fn intersects_sphere(&self, s: &Sphere) -> bool {
        self.as_dyn().intersects_sphere(s)
    }

    fn bounding_aabb(&self) -> Aabb {
        self.as_dyn().bounding_aabb()
    }

    fn load_unit(&mut self) {
        self.as_dyn_mut().load_unit();
    }

    fn scale(&mut self, value: Float) {
        self.as_dyn_mut().scale(value);
    }

    fn translate(&mut self, v: Vector3) {
        self.as_dyn_mut().translate(v);
    }
}

impl From<Aabb> for Volume {
    fn from(b: Aabb) -> Self {
        Volume::Aabb(b)
    }
}

impl From<Obb> for Volume {
    fn from(b: Obb) -> Self {
        Volume::Obb(b)
    }
}

impl From<Sphere> for Volume {
    fn from(s: Sphere) -> Self {
        Volume::Sphere(s)
    }
}
