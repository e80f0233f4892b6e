use crate::error::Result;
use crate::geometry::{Polygon, Segment};
use crate::math::polygon_2d::{ring_edges, PointLocation};
use crate::math::{Point2, Vector2};

use super::classify::{boundary_pieces, classify_against};
use super::AnalysisParams;

/// Decides whether a segment lies in the part of `outer` that is not covered
/// by the interior of `cut`.
///
/// Polygons whose interiors do not overlap (disjoint, or touching only along
/// their boundaries) never yield a match. Otherwise the segment must be
/// covered by `outer` and no part of it may pass through the interior of
/// `cut`. A stretch running along the boundary of `cut` is accepted only
/// when the side facing away from `cut` is still inside `outer`.
#[derive(Debug)]
pub struct DifferenceCoverage {
    outer: Polygon,
    cut: Polygon,
    segment: Segment,
    params: AnalysisParams,
}

impl DifferenceCoverage {
    /// Creates a new `DifferenceCoverage` check of `segment` against
    /// `outer` minus `cut`.
    #[must_use]
    pub fn new(outer: Polygon, cut: Polygon, segment: Segment) -> Self {
        Self {
            outer,
            cut,
            segment,
            params: AnalysisParams::default(),
        }
    }

    /// Replaces the default tolerance.
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the check and returns `true` if the segment lies in the
    /// difference.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameters` if the parameters are
    /// invalid.
    pub fn execute(&self) -> Result<bool> {
        self.params.validate()?;
        let eps = self.params.epsilon;
        if !interiors_overlap(&self.outer, &self.cut, eps) {
            tracing::debug!("polygon interiors do not overlap");
            return Ok(false);
        }
        if !classify_against(&self.outer, &self.segment, eps).is_covered() {
            return Ok(false);
        }

        let offset = side_offset(&self.segment, eps);
        let normal = unit_normal(&self.segment);
        let covered = boundary_pieces(&self.cut, &self.segment, eps)
            .iter()
            .all(|piece| match piece.location {
                PointLocation::Outside => true,
                PointLocation::Inside => false,
                PointLocation::OnBoundary => {
                    let mid = Point2::from((piece.from.coords + piece.to.coords) * 0.5);
                    [mid + normal * offset, mid - normal * offset]
                        .iter()
                        .any(|q| {
                            self.outer.covers_point(q, eps)
                                && self.cut.locate(q, eps) == PointLocation::Outside
                        })
                }
            });

        tracing::debug!(covered, "checked segment against polygon difference");
        Ok(covered)
    }
}

/// `true` if some boundary stretch of one polygon runs through the interior
/// of the other, or the two boundaries coincide.
fn interiors_overlap(a: &Polygon, b: &Polygon, eps: f64) -> bool {
    let mut all_shared = true;
    for (this, other) in [(a, b), (b, a)] {
        for (p, q) in ring_edges(this.vertices()) {
            let Ok(edge) = Segment::new(*p, *q) else {
                continue;
            };
            for piece in boundary_pieces(other, &edge, eps) {
                match piece.location {
                    PointLocation::Inside => return true,
                    PointLocation::Outside => all_shared = false,
                    PointLocation::OnBoundary => {}
                }
            }
        }
    }
    all_shared
}

fn unit_normal(seg: &Segment) -> Vector2 {
    let d = seg.direction() / seg.length();
    Vector2::new(-d.y, d.x)
}

/// Distance of the side test points: well above the tolerance, well below
/// the segment length.
fn side_offset(seg: &Segment, eps: f64) -> f64 {
    (eps * 1e3).max(seg.length() * 1e-9)
}
