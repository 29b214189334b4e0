/*

    Provide utilities to parse JSON query and trigger files.

    The parser is somewhat lenient, let <a> be integer or float type,
    in JSON file <a> can be given both in quotes (string) or as is.

    e.g. In JSON file both
    "Radius": "0.5" and "Radius": 0.5
    works as radius: Float in source code

    Vector3 fields are accepted as "<a> <a> <a>" strings or
    as [<a>, <a>, <a>] arrays.

    @date: 2 Oct, 2025
*/

use std::fmt::{self};
use std::marker::PhantomData;
use std::str::FromStr;
use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Deserializer};
use serde::de::{self, Visitor, SeqAccess};

use crate::prelude::*;
use crate::query::{QueryFile, QuerySet};

pub fn parse_queries(path: &str) -> Result<QuerySet, Box<dyn std::error::Error>> {
    /*
        Parse a JSON query file and validate every query in it.
    */

    let span = tracing::span!(tracing::Level::INFO, "load_queries");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path);

    // Parse JSON into QueryFile
    let root: QueryFile = serde_json::from_reader(reader)?;
    let set = root.prepare()?;
    info!("Loaded {} queries from {}", set.len(), path);
    Ok(set)
}

pub(crate) fn deser_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize usize type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_u64()
            .map(|v| v as usize)
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        serde_json::Value::String(s) => s.parse::<usize>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize float type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.trim().parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

// Use together with #[serde(default)], a missing field stays None
pub(crate) fn deser_opt_float<'de, D>(deserializer: D) -> Result<Option<Float>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_float(deserializer).map(Some)
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> serde::de::Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "a boolean or a string containing true/false")
        }

        fn visit_bool<E>(self, v: bool) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            match v.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                "1" => Ok(true),
                "0" => Ok(false),
                _ => Err(E::custom(format!("invalid bool '{}'", v))),
            }
        }

        fn visit_string<E>(self, v: String) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            self.visit_str(&v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

pub(crate) fn deser_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_bool(deserializer).map(Some)
}

pub trait From3<T>: Sized {
    fn new(x: T, y: T, z: T) -> Self;
}

impl From3<f64> for bevy_math::DVec3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z)
    }
}

pub(crate) fn deser_vec3<'de, D, V, F>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    F: Deserialize<'de> + FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    struct Vec3Visitor<V, F>(PhantomData<(V, F)>);

    impl<'de, V, F> Visitor<'de> for Vec3Visitor<V, F>
    where
        F: Deserialize<'de> + FromStr,
        F::Err: fmt::Display,
        V: From3<F>,
    {
        type Value = V;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a Vec3 as a string 'x y z' or an array [x, y, z]")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> Result<V, E>
        where
            E: de::Error,
        {
            parse_vec3_str(value).map_err(de::Error::custom)
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> Result<V, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let y: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let z: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            if seq.next_element::<F>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in Vec3 array"));
            }
            Ok(V::new(x, y, z))
        }
    }

    deserializer.deserialize_any(Vec3Visitor(PhantomData))
}

pub(crate) fn deser_opt_vec3<'de, D>(deserializer: D) -> Result<Option<Vector3>, D::Error>
where
    D: Deserializer<'de>,
{
    deser_vec3::<D, Vector3, Float>(deserializer).map(Some)
}

pub(crate) fn deser_vecvec3<'de, D>(deserializer: D) -> Result<Vec<Vector3>, D::Error>
where
    D: Deserializer<'de>,
{
    // Deserialize a vector of Vector3
    // given either a single string of "X Y Z", an array of
    // strings ["X1 Y1 Z1", "X2 Y2 Z2", ...] or an array of arrays
    #[derive(Deserialize)]
    struct Element(#[serde(deserialize_with = "deser_vec3")] Vector3);

    struct VecVec3Visitor;

    impl<'de> Visitor<'de> for VecVec3Visitor {
        type Value = Vec<Vector3>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string 'X Y Z' or an array of such vectors")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![parse_vec3_str(v).map_err(de::Error::custom)?])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(Element(elem)) = seq.next_element::<Element>()? {
                vec.push(elem);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(VecVec3Visitor)
}

/// Helper function: parse a string like "25 25 25" into Vector3
fn parse_vec3_str<V, F>(s: &str) -> Result<V, String>
where
    F: FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("Expected 3 values, got {}", parts.len()));
    }
    let x = parts[0].parse::<F>().map_err(|e| e.to_string())?;
    let y = parts[1].parse::<F>().map_err(|e| e.to_string())?;
    let z = parts[2].parse::<F>().map_err(|e| e.to_string())?;
    Ok(V::new(x, y, z))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(rename = "V", deserialize_with = "deser_vec3")]
        v: Vector3,
        #[serde(rename = "F", deserialize_with = "deser_float")]
        f: Float,
        #[serde(rename = "B", default, deserialize_with = "deser_opt_bool")]
        b: Option<bool>,
        #[serde(rename = "Id", default, deserialize_with = "deser_usize")]
        id: usize,
        #[serde(rename = "Many", default, deserialize_with = "deser_vecvec3")]
        many: Vec<Vector3>,
    }

    #[test]
    fn strings_and_numbers_are_both_accepted() {
        let a: Probe = serde_json::from_str(r#"{ "V": "1 2.5 -3", "F": "0.25", "B": "true", "Id": "7" }"#).unwrap();
        let b: Probe = serde_json::from_str(r#"{ "V": [1, 2.5, -3], "F": 0.25, "B": true, "Id": 7 }"#).unwrap();
        for p in [&a, &b] {
            assert_eq!(p.v, Vector3::new(1.0, 2.5, -3.0));
            assert_eq!(p.f, 0.25);
            assert_eq!(p.b, Some(true));
            assert_eq!(p.id, 7);
            assert!(p.many.is_empty());
        }
    }

    #[test]
    fn missing_optional_fields_default() {
        let p: Probe = serde_json::from_str(r#"{ "V": "0 0 0", "F": 1 }"#).unwrap();
        assert_eq!(p.b, None);
        assert_eq!(p.id, 0);
    }

    #[test]
    fn vector_lists_in_every_shape() {
        let p: Probe = serde_json::from_str(r#"{ "V": "0 0 0", "F": 1, "Many": ["1 0 0", [0, 1, 0], "0 0 1"] }"#).unwrap();
        assert_eq!(p.many, vec![Vector3::X, Vector3::Y, Vector3::Z]);
        let p: Probe = serde_json::from_str(r#"{ "V": "0 0 0", "F": 1, "Many": "4 5 6" }"#).unwrap();
        assert_eq!(p.many, vec![Vector3::new(4.0, 5.0, 6.0)]);
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{ "V": "1 2", "F": 1 }"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{ "V": [1, 2, 3, 4], "F": 1 }"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{ "V": "1 2 x", "F": 1 }"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{ "V": "1 2 3", "F": "abc" }"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{ "V": "1 2 3", "F": 1, "B": "maybe" }"#).is_err());
    }
}
