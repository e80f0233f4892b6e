use crate::geometry::Segment;
use crate::math::intersect_2d::{
    segment_segment_intersect_2d, segments_collinear, SegmentIntersection,
};
use crate::math::points_close;

/// Spatial relation between two segments.
///
/// Every kind is symmetric: `classify_segments(a, b)` and
/// `classify_segments(b, a)` always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Same line, same pair of endpoints.
    IdenticalCollinear,
    /// Same line, sharing a sub-segment of positive length.
    CollinearOverlapping,
    /// Same line, meeting only at a shared endpoint.
    CollinearDisjoint,
    /// Not parallel; the endpoint of one lies in the interior of the other.
    TouchingAtEndpoint,
    /// Not parallel; the segments cross at a point interior to both.
    CrossingInterior,
    /// Not parallel; the segments meet at an endpoint of both.
    CrossingAtSharedEndpoint,
    /// No common point.
    Disjoint,
}

impl RelationKind {
    /// The relation seen from the other segment. Every kind is its own mirror.
    #[must_use]
    pub fn mirrored(self) -> Self {
        self
    }

    /// Returns `true` for the three same-line kinds.
    #[must_use]
    pub fn is_collinear(self) -> bool {
        matches!(
            self,
            Self::IdenticalCollinear | Self::CollinearOverlapping | Self::CollinearDisjoint
        )
    }

    /// Returns `true` if the segments share at least one point.
    #[must_use]
    pub fn intersects(self) -> bool {
        self != Self::Disjoint
    }
}

/// Computes the shared point set of two segments.
#[must_use]
pub fn intersect_segments(a: &Segment, b: &Segment, eps: f64) -> SegmentIntersection {
    segment_segment_intersect_2d(a.start(), a.end(), b.start(), b.end(), eps)
}

/// Classifies the relation between two segments.
///
/// Two segments are collinear when every endpoint lies within `eps` of the
/// other segment's line; they only get a collinear kind when they also share
/// a point. Other meeting points within `eps` of an endpoint are treated as
/// touches rather than crossings.
#[must_use]
pub fn classify_segments(a: &Segment, b: &Segment, eps: f64) -> RelationKind {
    let collinear = segments_collinear(a.start(), a.end(), b.start(), b.end(), eps);
    let hit = intersect_segments(a, b, eps);

    let kind = match hit {
        SegmentIntersection::None => RelationKind::Disjoint,
        _ if same_endpoints(a, b, eps) => RelationKind::IdenticalCollinear,
        SegmentIntersection::Overlap(..) => RelationKind::CollinearOverlapping,
        SegmentIntersection::Point(_) if collinear => RelationKind::CollinearDisjoint,
        SegmentIntersection::Point(p) => {
            let at_a_end = points_close(&p, a.start(), eps) || points_close(&p, a.end(), eps);
            let at_b_end = points_close(&p, b.start(), eps) || points_close(&p, b.end(), eps);
            match (at_a_end, at_b_end) {
                (true, true) => RelationKind::CrossingAtSharedEndpoint,
                (true, false) | (false, true) => RelationKind::TouchingAtEndpoint,
                (false, false) => RelationKind::CrossingInterior,
            }
        }
    };

    tracing::trace!(?kind, "classified segment pair");
    kind
}

/// Returns `true` if both segments have the same endpoint set within `eps`.
fn same_endpoints(a: &Segment, b: &Segment, eps: f64) -> bool {
    let close = |p, q| points_close(p, q, eps);
    (close(a.start(), b.start()) && close(a.end(), b.end()))
        || (close(a.start(), b.end()) && close(a.end(), b.start()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::DEFAULT_EPSILON;
    use proptest::prelude::*;

    fn seg(a: (f64, f64), b: (f64, f64)) -> Segment {
        Segment::from_coords(a, b).unwrap()
    }

    fn classify(a: &Segment, b: &Segment) -> RelationKind {
        classify_segments(a, b, DEFAULT_EPSILON)
    }

    #[test]
    fn diagonals_cross_in_interior() {
        let a = seg((0.0, 0.0), (4.0, 4.0));
        let b = seg((0.0, 4.0), (4.0, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::CrossingInterior);
    }

    #[test]
    fn shifted_horizontal_overlap() {
        let a = seg((1.0, 1.0), (5.0, 1.0));
        let b = seg((3.0, 1.0), (7.0, 1.0));
        assert_eq!(classify(&a, &b), RelationKind::CollinearOverlapping);
    }

    #[test]
    fn contained_segment_overlaps() {
        let a = seg((0.0, 0.0), (6.0, 0.0));
        let b = seg((0.0, 0.0), (2.0, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::CollinearOverlapping);
    }

    #[test]
    fn identical_regardless_of_direction() {
        let a = seg((0.0, 0.0), (3.0, 2.0));
        let b = seg((3.0, 2.0), (0.0, 0.0));
        assert_eq!(classify(&a, &a), RelationKind::IdenticalCollinear);
        assert_eq!(classify(&a, &b), RelationKind::IdenticalCollinear);
    }

    #[test]
    fn collinear_chain_is_disjoint_kind() {
        let a = seg((0.0, 0.0), (2.0, 0.0));
        let b = seg((2.0, 0.0), (5.0, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::CollinearDisjoint);
    }

    #[test]
    fn collinear_with_gap_is_disjoint() {
        let a = seg((0.0, 0.0), (1.0, 0.0));
        let b = seg((2.0, 0.0), (3.0, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::Disjoint);
    }

    #[test]
    fn parallel_lines_are_disjoint() {
        let a = seg((0.0, 0.0), (4.0, 0.0));
        let b = seg((0.0, 1.0), (4.0, 1.0));
        assert_eq!(classify(&a, &b), RelationKind::Disjoint);
    }

    #[test]
    fn t_junction_touches() {
        let a = seg((0.0, 2.0), (4.0, 2.0));
        let b = seg((2.0, 2.0), (2.0, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::TouchingAtEndpoint);
        assert_eq!(classify(&b, &a), RelationKind::TouchingAtEndpoint);
    }

    #[test]
    fn corner_meets_at_shared_endpoint() {
        let a = seg((0.0, 0.0), (4.0, 0.0));
        let b = seg((4.0, 0.0), (4.0, 3.0));
        assert_eq!(classify(&a, &b), RelationKind::CrossingAtSharedEndpoint);
    }

    #[test]
    fn near_endpoint_noise_favours_touching() {
        let a = seg((0.0, 0.0), (4.0, 0.0));
        let b = seg((2.0, 1e-12), (2.0, 3.0));
        assert_eq!(classify(&a, &b), RelationKind::TouchingAtEndpoint);
    }

    #[test]
    fn short_and_long_sharing_an_endpoint_agree() {
        // Nearly parallel, but the long one drifts 2e-9 off the short one's line.
        let short = seg((0.0, 0.0), (0.5, 0.0));
        let long = seg((0.0, 0.0), (100.0, 2e-9));
        assert_eq!(classify(&short, &long), RelationKind::CrossingAtSharedEndpoint);
        assert_eq!(classify(&long, &short), RelationKind::CrossingAtSharedEndpoint);
    }

    #[test]
    fn tiny_diagonals_cross_in_interior() {
        let a = seg((0.0, 0.0), (2e-5, 2e-5));
        let b = seg((0.0, 2e-5), (2e-5, 0.0));
        assert_eq!(classify(&a, &b), RelationKind::CrossingInterior);
        assert_eq!(classify(&b, &a), RelationKind::CrossingInterior);
    }

    #[test]
    fn long_near_parallel_segments_cross() {
        let a = seg((0.0, 0.0), (100.0, 0.0));
        let b = seg((0.0, -5e-9), (100.0, 5e-9));
        assert_eq!(classify(&a, &b), RelationKind::CrossingInterior);
    }

    #[test]
    fn drift_within_tolerance_is_collinear() {
        let a = seg((0.0, 0.0), (100.0, 0.0));
        let b = seg((50.0, 0.0), (150.0, 5e-10));
        assert_eq!(classify(&a, &b), RelationKind::CollinearOverlapping);
        assert_eq!(classify(&b, &a), RelationKind::CollinearOverlapping);
    }

    #[test]
    fn kind_helpers() {
        assert!(RelationKind::CollinearDisjoint.is_collinear());
        assert!(!RelationKind::CrossingInterior.is_collinear());
        assert!(!RelationKind::Disjoint.intersects());
        assert_eq!(
            RelationKind::TouchingAtEndpoint.mirrored(),
            RelationKind::TouchingAtEndpoint
        );
    }

    fn arb_segment() -> impl Strategy<Value = Segment> {
        (-6i32..6, -6i32..6, -6i32..6, -6i32..6)
            .prop_filter("non-degenerate", |(x0, y0, x1, y1)| (x0, y0) != (x1, y1))
            .prop_map(|(x0, y0, x1, y1)| {
                seg(
                    (f64::from(x0), f64::from(y0)),
                    (f64::from(x1), f64::from(y1)),
                )
            })
    }

    /// Segments with sub-unit, fractional coordinates in `[-2, 2)`.
    fn arb_fine_segment() -> impl Strategy<Value = Segment> {
        (-2000i32..2000, -2000i32..2000, -2000i32..2000, -2000i32..2000)
            .prop_filter("non-degenerate", |(x0, y0, x1, y1)| (x0, y0) != (x1, y1))
            .prop_map(|(x0, y0, x1, y1)| {
                let milli = |v: i32| f64::from(v) / 1000.0;
                seg((milli(x0), milli(y0)), (milli(x1), milli(y1)))
            })
    }

    /// Two segments leaving the same point in almost the same direction: the
    /// second is scaled and tilted sideways by a few multiples of 1e-9.
    fn arb_near_parallel_pair() -> impl Strategy<Value = (Segment, Segment)> {
        (
            -1000i32..1000,
            -1000i32..1000,
            -1000i32..1000,
            -1000i32..1000,
            1i32..100_000,
            -5i32..=5,
        )
            .prop_filter("non-zero direction", |&(_, _, dx, dy, _, _)| (dx, dy) != (0, 0))
            .prop_map(|(px, py, dx, dy, scale, tilt)| {
                let milli = |v: i32| f64::from(v) / 1000.0;
                let (px, py, dx, dy) = (milli(px), milli(py), milli(dx), milli(dy));
                let k = milli(scale);
                let len = dx.hypot(dy);
                let side = f64::from(tilt) * 1e-9 / len;
                let a = seg((px, py), (px + dx, py + dy));
                let b = seg((px, py), (px + k * dx - side * dy, py + k * dy + side * dx));
                (a, b)
            })
    }

    proptest! {
        #[test]
        fn fine_segment_is_identical_to_itself(s in arb_fine_segment()) {
            prop_assert_eq!(classify(&s, &s), RelationKind::IdenticalCollinear);
        }

        #[test]
        fn fine_classification_is_symmetric(a in arb_fine_segment(), b in arb_fine_segment()) {
            prop_assert_eq!(classify(&a, &b), classify(&b, &a));
        }

        #[test]
        fn near_parallel_classification_is_symmetric((a, b) in arb_near_parallel_pair()) {
            prop_assert_eq!(classify(&a, &b), classify(&b, &a));
        }

        #[test]
        fn every_segment_is_identical_to_itself(s in arb_segment()) {
            prop_assert_eq!(classify(&s, &s), RelationKind::IdenticalCollinear);
        }

        #[test]
        fn classification_is_symmetric(a in arb_segment(), b in arb_segment()) {
            prop_assert_eq!(classify(&a, &b), classify(&b, &a).mirrored());
        }
    }
}
