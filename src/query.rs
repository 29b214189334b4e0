/*

    Batches of intersection queries read from JSON.

    A query pairs one Volume with one probe (point, sphere
    or, against an AABB only, another AABB) and optionally the
    answer it is expected to give. Queries are validated once
    when loaded, evaluation afterwards cannot fail.

    Evaluation is spread over rayon's pool. The predicates
    hold no state so queries are independent of each other.

    @date: 20 Nov, 2025
*/

use rayon::prelude::*;
use std::time::Instant;

use crate::aabb::Aabb;
use crate::collision::intersect_aabb_aabb;
use crate::json_structs::SingleOrVec;
use crate::shapes::{BoundingVolume, Sphere, Volume};
use crate::prelude::*;

const ORTHONORMAL_EPSILON: Float = 1e-6;

#[derive(Debug, Deserialize, Default)]
pub struct QueryFile {
    #[serde(rename = "Queries", default)]
    pub queries: SingleOrVec<Query>,
}

impl QueryFile {
    /// Validate every query, fails on the first malformed one
    pub fn prepare(self) -> Result<QuerySet, Box<dyn std::error::Error>> {
        let queries = self.queries.into_vec();
        let mut prepared = Vec::with_capacity(queries.len());
        for (n, q) in queries.into_iter().enumerate() {
            let id = q._id;
            let p = q.prepare().map_err(|e| format!("Query #{n} (_id {id}): {e}"))?;
            prepared.push(p);
        }
        Ok(prepared)
    }
}

/// Volume as written in the file, plus optional transforms applied after construction
#[derive(Debug, Deserialize, Clone)]
pub struct VolumeDesc {
    #[serde(flatten)]
    pub volume: Volume,

    #[serde(rename = "Scale", default, deserialize_with = "deser_opt_float")]
    pub scale: Option<Float>,
    #[serde(rename = "ScaleAxes", default, deserialize_with = "deser_opt_vec3")]
    pub scale_axes: Option<Vector3>,
    #[serde(rename = "Translation", default, deserialize_with = "deser_opt_vec3")]
    pub translation: Option<Vector3>,
}

impl VolumeDesc {
    /// Apply Scale, ScaleAxes, Translation in that order and check invariants
    pub fn build(&self) -> Result<Volume, String> {
        let mut volume = self.volume;
        if let Some(s) = self.scale {
            volume.scale(s);
        }
        if let Some(v) = self.scale_axes {
            if !volume.scale_axes(v) {
                return Err("ScaleAxes is not supported for spheres".to_string());
            }
        }
        if let Some(t) = self.translation {
            volume.translate(t);
        }
        validate_volume(&volume)?;
        Ok(volume)
    }
}

/// Reject volumes the predicates give unspecified answers for
pub fn validate_volume(volume: &Volume) -> Result<(), String> {
    let non_negative = |v: Vector3| v.cmpge(Vector3::ZERO).all();
    match volume {
        Volume::Aabb(b) if !non_negative(b.half_widths) => {
            Err(format!("AABB half widths must be non-negative, got {}", b.half_widths))
        }
        Volume::Obb(b) if !non_negative(b.half_widths) => {
            Err(format!("OBB half widths must be non-negative, got {}", b.half_widths))
        }
        Volume::Obb(b) if !b.is_orthonormal(ORTHONORMAL_EPSILON) => {
            Err(format!("OBB axes are not orthonormal: {} {} {}", b.x_axis, b.y_axis, b.z_axis))
        }
        Volume::Sphere(s) if !(s.radius >= 0.0) => {
            Err(format!("Sphere radius must be non-negative, got {}", s.radius))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Query {
    #[serde(rename = "_id", default, deserialize_with = "deser_usize")]
    pub _id: usize,
    #[serde(rename = "Volume")]
    pub volume: VolumeDesc,

    #[serde(rename = "Point", default, deserialize_with = "deser_opt_vec3")]
    pub point: Option<Vector3>,
    #[serde(rename = "Sphere", default)]
    pub sphere: Option<Sphere>,
    #[serde(rename = "Box", default)]
    pub aabb: Option<Aabb>,

    #[serde(rename = "Expect", default, deserialize_with = "deser_opt_bool")]
    pub expect: Option<bool>,
}

impl Query {
    pub fn prepare(&self) -> Result<PreparedQuery, String> {
        let volume = self.volume.build()?;

        let check = match (self.point, self.sphere, self.aabb) {
            (Some(p), None, None) => Check::Point(volume, p),
            (None, Some(s), None) => {
                validate_volume(&Volume::Sphere(s))?;
                Check::Sphere(volume, s)
            }
            (None, None, Some(b)) => {
                validate_volume(&Volume::Aabb(b))?;
                match volume {
                    Volume::Aabb(a) => Check::Boxes(a, b),
                    other => return Err(format!("Box probe needs an aabb volume, got {}", other.kind())),
                }
            }
            (None, None, None) => return Err("no probe given, expected one of Point, Sphere, Box".to_string()),
            _ => return Err("more than one probe given, expected one of Point, Sphere, Box".to_string()),
        };

        Ok(PreparedQuery {
            id: self._id,
            check,
            expect: self.expect,
        })
    }
}

/// What to test, in a form where evaluation is total
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    Point(Volume, Vector3),
    Sphere(Volume, Sphere),
    Boxes(Aabb, Aabb),
}

impl Check {
    #[inline]
    pub fn evaluate(&self) -> bool {
        match self {
            Check::Point(v, p) => v.contains_point(p),
            Check::Sphere(v, s) => v.intersects_sphere(s),
            Check::Boxes(a, b) => intersect_aabb_aabb(a, b),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Check::Point(v, _) => format!("{} vs point", v.kind()),
            Check::Sphere(v, _) => format!("{} vs sphere", v.kind()),
            Check::Boxes(..) => "aabb vs aabb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreparedQuery {
    pub id: usize,
    pub check: Check,
    pub expect: Option<bool>,
}

pub type QuerySet = Vec<PreparedQuery>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOutcome {
    pub id: usize,
    pub hit: bool,
    pub expect: Option<bool>,
}

impl QueryOutcome {
    /// Queries without an expectation always pass
    pub fn passed(&self) -> bool {
        self.expect.is_none_or(|e| e == self.hit)
    }
}

/// Evaluate all queries in parallel, output order matches input order
pub fn run_queries(queries: &[PreparedQuery]) -> Vec<QueryOutcome> {
    let span = tracing::span!(tracing::Level::INFO, "run_queries");
    let _enter = span.enter();

    let start = Instant::now();

    // --- Rayon Multithreading ---
    let outcomes: Vec<QueryOutcome> = queries
        .par_iter()
        .map(|q| QueryOutcome {
            id: q.id,
            hit: q.check.evaluate(),
            expect: q.expect,
        })
        .collect();
    // -----------------------------

    for (q, outcome) in queries.iter().zip(&outcomes) {
        debug!("Query {} ({}): {}", outcome.id, q.check.describe(), outcome.hit);
        if !outcome.passed() {
            warn!("Query {} ({}) returned {} but {:?} was expected", outcome.id, q.check.describe(), outcome.hit, outcome.expect);
        }
    }
    info!("Evaluated {} queries in {:?}", outcomes.len(), start.elapsed());
    outcomes
}


#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<QuerySet, Box<dyn std::error::Error>> {
        let file: QueryFile = serde_json::from_str(json)?;
        file.prepare()
    }

    #[test]
    fn single_query_object() {
        let set = parse(r#"{ "Queries": {
            "_id": "3",
            "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1" },
            "Point": "0.3 0.1 1.1",
            "Expect": false
        } }"#).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set[0].id, 3);
        assert_eq!(set[0].check, Check::Point(Aabb::unit().into(), Vector3::new(0.3, 0.1, 1.1)));

        let out = run_queries(&set);
        assert_eq!(out, vec![QueryOutcome { id: 3, hit: false, expect: Some(false) }]);
        assert!(out[0].passed());
    }

    #[test]
    fn volume_transforms_are_applied_in_order() {
        let set = parse(r#"{ "Queries": [ {
            "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1",
                        "Scale": 2, "ScaleAxes": "1 0.5 1", "Translation": [10, 0, 0] },
            "Point": "11.9 0.9 0"
        } ] }"#).unwrap();
        match set[0].check {
            Check::Point(Volume::Aabb(b), _) => {
                assert_eq!(b, Aabb::new(Vector3::new(10.0, 0.0, 0.0), Vector3::new(2.0, 1.0, 2.0)));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(run_queries(&set)[0].hit);
    }

    #[test]
    fn every_probe_kind() {
        let set = parse(r#"{ "Queries": [
            { "_id": 1, "Volume": { "_type": "sphere", "Center": "0 0 0", "Radius": 1 }, "Point": "1 0 0", "Expect": true },
            { "_id": 2, "Volume": { "_type": "obb", "Center": "0 0 0", "HalfWidths": "1 1 1", "Rotation": "0 0 45" },
              "Sphere": { "Center": "2 0 0", "Radius": "0.6" }, "Expect": "true" },
            { "_id": 3, "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1" },
              "Box": { "Center": "2 0 0", "HalfWidths": "1 1 1" }, "Expect": 1 },
            { "_id": 4, "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1" },
              "Box": { "Center": "2.5 0 0", "HalfWidths": "1 1 1" }, "Expect": true }
        ] }"#).unwrap();
        let out = run_queries(&set);
        assert_eq!(out.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(out.iter().map(|o| o.hit).collect::<Vec<_>>(), vec![true, true, true, false]);
        assert!(out[..3].iter().all(QueryOutcome::passed));
        assert!(!out[3].passed());
    }

    #[test]
    fn malformed_queries_are_rejected() {
        let cases = [
            // no probe
            r#"{ "Queries": { "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1" } } }"#,
            // two probes
            r#"{ "Queries": { "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 1 1" },
                "Point": "0 0 0", "Sphere": { "Center": "0 0 0", "Radius": 1 } } }"#,
            // box probe against a sphere
            r#"{ "Queries": { "Volume": { "_type": "sphere", "Center": "0 0 0", "Radius": 1 },
                "Box": { "Center": "0 0 0", "HalfWidths": "1 1 1" } } }"#,
            // negative extents
            r#"{ "Queries": { "Volume": { "_type": "aabb", "Center": "0 0 0", "HalfWidths": "1 -1 1" }, "Point": "0 0 0" } }"#,
            r#"{ "Queries": { "Volume": { "_type": "sphere", "Center": "0 0 0", "Radius": 1, "Scale": -1 }, "Point": "0 0 0" } }"#,
            // skewed axes
            r#"{ "Queries": { "Volume": { "_type": "obb", "Center": "0 0 0", "HalfWidths": "1 1 1",
                "Axes": ["1 0 0", "1 1 0", "0 0 1"] }, "Point": "0 0 0" } }"#,
            // non-uniform sphere
            r#"{ "Queries": { "Volume": { "_type": "sphere", "Center": "0 0 0", "Radius": 1, "ScaleAxes": "1 2 1" }, "Point": "0 0 0" } }"#,
            // unknown volume kind
            r#"{ "Queries": { "Volume": { "_type": "capsule", "Center": "0 0 0" }, "Point": "0 0 0" } }"#,
        ];
        for json in cases {
            assert!(parse(json).is_err(), "accepted: {json}");
        }
    }

    #[test]
    fn empty_file_has_no_queries() {
        assert!(parse("{}").unwrap().is_empty());
        assert!(run_queries(&[]).is_empty());
    }
}
