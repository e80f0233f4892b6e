use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::{distance, Point2};

use super::split::SplitArrangement;
use super::{AnalysisParams, ClearancePolicy};

/// The first vertex found to break the clearance rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceViolation {
    pub vertex: Point2,
    /// Length of the shortest outgoing edge at `vertex`.
    pub shortest_edge: f64,
    /// Length of the longest outgoing edge at `vertex`.
    pub longest_edge: f64,
}

/// Outcome of a clearance run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearanceReport {
    /// Vertices that had at least one outgoing edge.
    pub checked_vertices: usize,
    pub violation: Option<ClearanceViolation>,
}

impl ClearanceReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violation.is_none()
    }
}

/// Checks a minimum-distance rule on the arrangement of segments inside a
/// bounding polygon.
///
/// Edges are directed from the smaller to the larger endpoint in `(x, y)`
/// order; each vertex is judged on the lengths of its outgoing edges
/// according to the configured [`ClearancePolicy`]. Vertices without outgoing
/// edges are skipped.
#[derive(Debug)]
pub struct ValidateClearance {
    polygon: Polygon,
    segments: Vec<Segment>,
    params: AnalysisParams,
}

impl ValidateClearance {
    /// Creates a new `ValidateClearance` check of `segments` inside
    /// `polygon`, using the default distance and policy.
    #[must_use]
    pub fn new(polygon: Polygon, segments: &[Segment]) -> Self {
        Self {
            polygon,
            segments: segments.to_vec(),
            params: AnalysisParams::default(),
        }
    }

    /// Replaces the default distance, policy and tolerance.
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the check and returns `true` if no vertex violates the rule.
    ///
    /// # Errors
    ///
    /// Same as [`ValidateClearance::report`].
    pub fn execute(&self) -> Result<bool> {
        Ok(self.report()?.passed())
    }

    /// Runs the check and reports the first violating vertex, if any.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InvalidPolygon` if the polygon self-intersects.
    /// - `OperationError::EmptyInput` for an empty segment list.
    /// - `OperationError::InvalidParameters` for invalid parameters.
    pub fn report(&self) -> Result<ClearanceReport> {
        self.params.validate()?;
        self.polygon.ensure_simple(self.params.epsilon)?;
        if self.segments.is_empty() {
            return Err(OperationError::EmptyInput("no segments to validate").into());
        }

        let arrangement = SplitArrangement::new(&self.segments)
            .within(self.polygon.clone())
            .with_params(self.params)
            .execute()?;

        let mut checked_vertices = 0;
        for vertex in arrangement.vertices() {
            let lengths: Vec<f64> = arrangement
                .outgoing(&vertex)
                .iter()
                .map(|n| distance(&vertex, n))
                .collect();
            if lengths.is_empty() {
                continue;
            }
            checked_vertices += 1;

            let shortest_edge = lengths.iter().copied().fold(f64::INFINITY, f64::min);
            let longest_edge = lengths.iter().copied().fold(0.0, f64::max);
            let violated = match self.params.policy {
                ClearancePolicy::AllNeighborsExceed => shortest_edge > self.params.min_distance,
                ClearancePolicy::AnyNeighborExceeds => longest_edge > self.params.min_distance,
            };
            if violated {
                tracing::debug!(
                    x = vertex.x,
                    y = vertex.y,
                    shortest_edge,
                    longest_edge,
                    min_distance = self.params.min_distance,
                    "clearance violated"
                );
                return Ok(ClearanceReport {
                    checked_vertices,
                    violation: Some(ClearanceViolation {
                        vertex,
                        shortest_edge,
                        longest_edge,
                    }),
                });
            }
        }

        tracing::debug!(checked_vertices, "clearance satisfied");
        Ok(ClearanceReport {
            checked_vertices,
            violation: None,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, SegplanError};
    use approx::assert_relative_eq;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b).unwrap()
    }

    fn room() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0)]).unwrap()
    }

    #[test]
    fn short_edges_pass() {
        let segs = [
            seg((0.0, 0.0), (5.0, 0.0)),
            seg((5.0, 0.0), (10.0, 0.0)),
            seg((0.0, 0.0), (0.0, 8.0)),
        ];
        let report = ValidateClearance::new(room(), &segs).report().unwrap();
        assert!(report.passed());
        assert_eq!(report.checked_vertices, 2);
    }

    #[test]
    fn long_only_vertex_fails() {
        let segs = [seg((0.0, 0.0), (5.0, 0.0)), seg((5.0, 0.0), (20.0, 0.0))];
        let report = ValidateClearance::new(room(), &segs).report().unwrap();
        let violation = report.violation.unwrap();
        assert_eq!(violation.vertex, Point2::new(5.0, 0.0));
        assert_relative_eq!(violation.shortest_edge, 15.0);
    }

    #[test]
    fn any_policy_is_stricter() {
        let segs = [seg((0.0, 0.0), (5.0, 0.0)), seg((0.0, 0.0), (0.0, 25.0))];
        let lenient = ValidateClearance::new(room(), &segs).execute().unwrap();
        assert!(lenient);

        let params = AnalysisParams {
            policy: ClearancePolicy::AnyNeighborExceeds,
            ..AnalysisParams::default()
        };
        let strict = ValidateClearance::new(room(), &segs)
            .with_params(params)
            .report()
            .unwrap();
        let violation = strict.violation.unwrap();
        assert_eq!(violation.vertex, Point2::new(0.0, 0.0));
        assert_relative_eq!(violation.longest_edge, 25.0);
    }

    #[test]
    fn pieces_outside_are_ignored() {
        // The long tail lies outside the room and is clipped away.
        let segs = [seg((25.0, 10.0), (30.0, 10.0)), seg((30.0, 10.0), (90.0, 10.0))];
        assert!(ValidateClearance::new(room(), &segs).execute().unwrap());
    }

    #[test]
    fn threshold_is_exclusive() {
        let segs = [seg((0.0, 0.0), (10.0, 0.0))];
        assert!(ValidateClearance::new(room(), &segs).execute().unwrap());
    }

    #[test]
    fn self_intersecting_polygon_is_rejected() {
        let bow =
            Polygon::from_coords(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)]).unwrap();
        let err = ValidateClearance::new(bow, &[seg((1.0, 1.0), (2.0, 1.0))])
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            SegplanError::Geometry(GeometryError::InvalidPolygon(_))
        ));
    }

    #[test]
    fn empty_segments_fail() {
        assert!(ValidateClearance::new(room(), &[]).execute().is_err());
    }
}
