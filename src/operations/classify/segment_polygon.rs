use crate::geometry::{Polygon, Segment};
use crate::math::intersect_2d::{segment_segment_intersect_2d, SegmentIntersection};
use crate::math::polygon_2d::{ring_edges, PointLocation};
use crate::math::Point2;

/// Position of a segment relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainmentKind {
    /// Every point covered, not every point on the boundary.
    FullyInterior,
    /// Every point lies on the boundary.
    OnBoundary,
    /// Neither endpoint covered and no part of the segment inside.
    FullyExterior,
    /// Anything else: partly inside, partly outside.
    PartialCrossing,
}

impl ContainmentKind {
    /// Returns `true` for the kinds whose whole extent is covered.
    #[must_use]
    pub fn is_covered(self) -> bool {
        matches!(self, Self::FullyInterior | Self::OnBoundary)
    }
}

/// Containment kind plus how far the segment reaches outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonContainment {
    pub kind: ContainmentKind,
    /// For `PartialCrossing`, the largest boundary distance of the two
    /// endpoints (zero if both endpoints are covered). `None` otherwise.
    pub exterior_distance: Option<f64>,
}

/// A stretch of a segment between two consecutive boundary contacts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Piece {
    pub from: Point2,
    pub to: Point2,
    pub location: PointLocation,
}

/// Splits `seg` at every contact with the polygon boundary and locates the
/// midpoint of each resulting piece.
pub(crate) fn boundary_pieces(polygon: &Polygon, seg: &Segment, eps: f64) -> Vec<Piece> {
    let mut breaks: Vec<(f64, Point2)> = vec![(0.0, *seg.start()), (1.0, *seg.end())];
    for (a, b) in ring_edges(polygon.vertices()) {
        match segment_segment_intersect_2d(seg.start(), seg.end(), a, b, eps) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point(p) => breaks.push((seg.parameter_of(&p), p)),
            SegmentIntersection::Overlap(p, q) => {
                breaks.push((seg.parameter_of(&p), p));
                breaks.push((seg.parameter_of(&q), q));
            }
        }
    }
    breaks.sort_by(|x, y| x.0.total_cmp(&y.0));

    let len = seg.length();
    let mut pieces = Vec::with_capacity(breaks.len());
    let mut current = breaks[0];
    for &next in &breaks[1..] {
        if (next.0 - current.0) * len <= eps {
            continue;
        }
        let mid = seg.point_at(0.5 * (current.0 + next.0));
        pieces.push(Piece {
            from: current.1,
            to: next.1,
            location: polygon.locate(&mid, eps),
        });
        current = next;
    }

    if pieces.is_empty() {
        // Shorter than the tolerance: judge it by its midpoint alone.
        pieces.push(Piece {
            from: *seg.start(),
            to: *seg.end(),
            location: polygon.locate(&seg.point_at(0.5), eps),
        });
    }
    pieces
}

/// Classifies a segment against a polygon.
#[must_use]
pub fn classify_against(polygon: &Polygon, seg: &Segment, eps: f64) -> ContainmentKind {
    kind_from_pieces(polygon, seg, &boundary_pieces(polygon, seg, eps), eps)
}

fn kind_from_pieces(
    polygon: &Polygon,
    seg: &Segment,
    pieces: &[Piece],
    eps: f64,
) -> ContainmentKind {
    if pieces
        .iter()
        .all(|p| p.location == PointLocation::OnBoundary)
    {
        return ContainmentKind::OnBoundary;
    }
    if pieces.iter().all(|p| p.location != PointLocation::Outside) {
        return ContainmentKind::FullyInterior;
    }
    let any_covered = pieces.iter().any(|p| p.location != PointLocation::Outside);
    if !any_covered
        && !polygon.covers_point(seg.start(), eps)
        && !polygon.covers_point(seg.end(), eps)
    {
        return ContainmentKind::FullyExterior;
    }
    ContainmentKind::PartialCrossing
}

/// Classifies a segment against a polygon and, for partial crossings,
/// measures how far its endpoints reach outside.
#[must_use]
pub fn containment(polygon: &Polygon, seg: &Segment, eps: f64) -> PolygonContainment {
    let kind = classify_against(polygon, seg, eps);
    let exterior_distance = (kind == ContainmentKind::PartialCrossing).then(|| {
        polygon
            .distance_to_boundary(seg.start(), eps)
            .max(polygon.distance_to_boundary(seg.end(), eps))
    });
    PolygonContainment {
        kind,
        exterior_distance,
    }
}

/// Returns the covered portions of `seg`, clipped at the boundary.
///
/// Contiguous covered pieces are joined, so a segment that runs from the
/// interior onto the boundary comes back as a single segment.
#[must_use]
pub fn clip_to_polygon(polygon: &Polygon, seg: &Segment, eps: f64) -> Vec<Segment> {
    let pieces = boundary_pieces(polygon, seg, eps);
    if kind_from_pieces(polygon, seg, &pieces, eps).is_covered() {
        return vec![*seg];
    }

    let mut clipped = Vec::new();
    let mut run: Option<(Point2, Point2)> = None;
    for piece in &pieces {
        if piece.location == PointLocation::Outside {
            if let Some((from, to)) = run.take() {
                clipped.extend(Segment::new(from, to).ok());
            }
            continue;
        }
        run = Some(match run {
            Some((from, _)) => (from, piece.to),
            None => (piece.from, piece.to),
        });
    }
    if let Some((from, to)) = run {
        clipped.extend(Segment::new(from, to).ok());
    }
    clipped
}
