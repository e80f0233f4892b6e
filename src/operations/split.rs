use crate::error::{OperationError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::intersect_2d::SegmentIntersection;
use crate::math::{lex_cmp, points_close, Point2};
use crate::topology::Arrangement;

use super::classify::{clip_to_polygon, intersect_segments};
use super::AnalysisParams;

/// Splits segments at all mutual intersections and collects the pieces into
/// an [`Arrangement`].
///
/// With [`SplitArrangement::within`], pieces outside the bounding polygon are
/// dropped and pieces that cross its boundary are clipped to it.
#[derive(Debug)]
pub struct SplitArrangement {
    segments: Vec<Segment>,
    bounds: Option<Polygon>,
    params: AnalysisParams,
}

impl SplitArrangement {
    /// Creates a new unbounded `SplitArrangement` over `segments`.
    #[must_use]
    pub fn new(segments: &[Segment]) -> Self {
        Self {
            segments: segments.to_vec(),
            bounds: None,
            params: AnalysisParams::default(),
        }
    }

    /// Restricts the arrangement to the closed region of `polygon`.
    #[must_use]
    pub fn within(mut self, polygon: Polygon) -> Self {
        self.bounds = Some(polygon);
        self
    }

    /// Replaces the default tolerance.
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the split.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::EmptyInput` for an empty segment list, or
    /// `OperationError::InvalidParameters` if the parameters are invalid.
    pub fn execute(&self) -> Result<Arrangement> {
        if self.segments.is_empty() {
            return Err(OperationError::EmptyInput("no segments to split").into());
        }
        self.params.validate()?;
        let eps = self.params.epsilon;

        let pieces = split_at_intersections(&self.segments, eps);
        let piece_count = pieces.len();

        let mut arrangement = Arrangement::new(eps);
        for piece in pieces {
            match &self.bounds {
                Some(bounds) => {
                    for kept in clip_to_polygon(bounds, &piece, eps) {
                        arrangement.insert_segment(&kept);
                    }
                }
                None => {
                    arrangement.insert_segment(&piece);
                }
            }
        }

        tracing::debug!(
            input = self.segments.len(),
            pieces = piece_count,
            vertices = arrangement.vertex_count(),
            edges = arrangement.edge_count(),
            bounded = self.bounds.is_some(),
            "built arrangement"
        );
        Ok(arrangement)
    }
}

/// Cuts every segment at the points it shares with any other segment.
pub(crate) fn split_at_intersections(segments: &[Segment], eps: f64) -> Vec<Segment> {
    let mut cuts: Vec<Vec<Point2>> = segments
        .iter()
        .map(|s| vec![*s.start(), *s.end()])
        .collect();

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            match intersect_segments(&segments[i], &segments[j], eps) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(p) => {
                    cuts[i].push(p);
                    cuts[j].push(p);
                }
                SegmentIntersection::Overlap(p, q) => {
                    cuts[i].extend([p, q]);
                    cuts[j].extend([p, q]);
                }
            }
        }
    }

    let mut pieces = Vec::new();
    for mut points in cuts {
        // Points on one segment: lexicographic order is order along it.
        points.sort_by(lex_cmp);
        points.dedup_by(|b, a| points_close(a, b, eps));
        pieces.extend(
            points
                .windows(2)
                .filter_map(|w| Segment::new(w[0], w[1]).ok()),
        );
    }
    pieces
}
