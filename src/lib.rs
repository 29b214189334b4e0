pub mod numeric;
pub mod interval;
pub mod geometry;
pub mod aabb;
pub mod obb;
pub mod shapes;
pub mod collision;
pub mod json_structs;
pub mod json_parser;
pub mod query;
pub mod trigger;

pub mod prelude;
