/*

    Declare data structs needed to parse JSON.

    - SingleOrVec: a single <object> or an array of <object>s
    - Obb: hand written Deserialize, since a box orientation
      comes either as euler angles or as three explicit axes

    @date: 13 Oct, 2025
*/

use serde::{Deserialize, de::{self, Deserializer}};

use crate::geometry::rotation_xyz;
use crate::json_parser::{deser_opt_vec3, deser_vec3, deser_vecvec3};
use crate::numeric::{Vector3, radians3};
use crate::obb::Obb;


// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrVec<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            SingleOrVec::Empty => vec![],
            SingleOrVec::Single(t) => vec![t],
            SingleOrVec::Multiple(vec) => vec,
        }
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}


// {
//   "Center": "3 2 1.5",
//   "HalfWidths": "2 1 0.5",
//   "Rotation": "-15.4 -25.1 -46.6"         <-- degrees, Rx * Ry * Rz, rows become box axes
// }
// or, instead of "Rotation",
//   "Axes": ["1 0 0", "0 1 0", "0 0 1"]
impl<'de> Deserialize<'de> for Obb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(rename = "Center", deserialize_with = "deser_vec3")]
            center: Vector3,
            #[serde(rename = "HalfWidths", deserialize_with = "deser_vec3")]
            half_widths: Vector3,
            #[serde(rename = "Rotation", default, deserialize_with = "deser_opt_vec3")]
            rotation: Option<Vector3>,
            #[serde(rename = "Axes", default, deserialize_with = "deser_vecvec3")]
            axes: Vec<Vector3>,
        }

        let helper = Helper::deserialize(deserializer)?;
        match (helper.rotation, helper.axes.as_slice()) {
            (Some(_), [_, ..]) => Err(de::Error::custom("OBB takes either Rotation or Axes, not both")),
            (Some(degrees), []) => {
                let r = radians3(degrees);
                Ok(Obb::from_rotation(helper.center, helper.half_widths, &rotation_xyz(r.x, r.y, r.z)))
            }
            (None, [x, y, z]) => Ok(Obb::new(helper.center, [*x, *y, *z], helper.half_widths)),
            (None, []) => Ok(Obb::new(helper.center, [Vector3::X, Vector3::Y, Vector3::Z], helper.half_widths)),
            (None, other) => Err(de::Error::custom(format!("OBB needs exactly 3 Axes, got {}", other.len()))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::radians;

    #[test]
    fn single_or_vec_accepts_both_forms() {
        let one: SingleOrVec<u32> = serde_json::from_str("4").unwrap();
        let many: SingleOrVec<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        let none: SingleOrVec<u32> = serde_json::from_str("null").unwrap();
        assert_eq!(one.into_vec(), vec![4]);
        assert_eq!(many.into_vec(), vec![1, 2, 3]);
        assert!(none.into_vec().is_empty());
        assert!(SingleOrVec::<u32>::default().into_vec().is_empty());
    }

    #[test]
    fn obb_from_rotation_degrees() {
        let obb: Obb = serde_json::from_str(r#"{ "Center": "3 2 1.5", "HalfWidths": "1 1 1", "Rotation": "0 0 -46.6" }"#).unwrap();
        let expected = Obb::from_rotation(Vector3::new(3.0, 2.0, 1.5), Vector3::ONE, &rotation_xyz(0.0, 0.0, -radians(46.6)));
        assert_eq!(obb.center, expected.center);
        for (a, b) in obb.axes().iter().zip(expected.axes()) {
            assert!((*a - b).length() < 1e-12);
        }
    }

    #[test]
    fn obb_from_axes_or_nothing() {
        let obb: Obb = serde_json::from_str(r#"{ "Center": [0, 0, 0], "HalfWidths": "1 2 3", "Axes": ["0 1 0", "-1 0 0", "0 0 1"] }"#).unwrap();
        assert_eq!(obb.axes(), [Vector3::Y, -Vector3::X, Vector3::Z]);

        let obb: Obb = serde_json::from_str(r#"{ "Center": "1 1 1", "HalfWidths": "1 2 3" }"#).unwrap();
        assert_eq!(obb.axes(), [Vector3::X, Vector3::Y, Vector3::Z]);
        assert_eq!(obb.half_widths, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn obb_rejects_ambiguous_orientation() {
        let both = r#"{ "Center": "0 0 0", "HalfWidths": "1 1 1", "Rotation": "0 0 0", "Axes": ["1 0 0", "0 1 0", "0 0 1"] }"#;
        let two_axes = r#"{ "Center": "0 0 0", "HalfWidths": "1 1 1", "Axes": ["1 0 0", "0 1 0"] }"#;
        assert!(serde_json::from_str::<Obb>(both).is_err());
        assert!(serde_json::from_str::<Obb>(two_axes).is_err());
    }
}
