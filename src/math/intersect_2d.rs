use super::distance_2d::point_to_segment_dist;
use super::{cross, distance, lex_cmp, orientation, Orientation, Point2};

/// Result of intersecting two bounded segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments share no point.
    None,
    /// The segments meet in exactly one point.
    Point(Point2),
    /// The segments are collinear and share the sub-segment `from -> to`,
    /// with `from` before `to` in `(x, y)` order.
    Overlap(Point2, Point2),
}

/// Returns `true` if `p` lies on the segment `a -> b` within `eps`.
#[must_use]
pub fn point_on_segment(p: &Point2, a: &Point2, b: &Point2, eps: f64) -> bool {
    point_to_segment_dist(p, a, b) <= eps
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &super::Vector2,
    p2: &Point2,
    d2: &super::Vector2,
    eps: f64,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() <= eps {
        return None;
    }
    let delta = p2 - p1;
    let t = cross(&delta, d2) / denom;
    let u = cross(&delta, d1) / denom;
    Some((t, u))
}

/// Returns `true` if the two segments lie on one line: every endpoint is
/// within `eps` of the other segment's supporting line.
///
/// Both directions are checked, so the answer does not depend on argument
/// order or on how long either segment is.
#[must_use]
pub fn segments_collinear(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, eps: f64) -> bool {
    [(a0, a1, b0), (a0, a1, b1), (b0, b1, a0), (b0, b1, a1)]
        .into_iter()
        .all(|(p, q, r)| orientation(p, q, r, eps) == Orientation::Collinear)
}

/// Bounded segment-segment intersection in 2D.
///
/// The pair is put in a canonical order first (endpoints and segments sorted
/// by `(x, y)`), so swapping the arguments or the endpoints of either segment
/// gives the same answer. Segments on a common line (see
/// [`segments_collinear`]) report their shared extent as a point or an
/// overlap, with overlap ends in ascending `(x, y)` order. Any other pair goes
/// through the parametric test, however close to parallel it is. Intersection
/// points within `eps` of an input endpoint are snapped to that endpoint so
/// shared vertices compare exactly.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> SegmentIntersection {
    let ((a0, a1), (b0, b1)) = canonical_pair((a0, a1), (b0, b1));

    if segments_collinear(&a0, &a1, &b0, &b1, eps) {
        return collinear_intersection(a0, a1, b0, b1, eps);
    }

    let da = a1 - a0;
    let db = b1 - b0;
    // Only exactly parallel lines have no crossing parameter; near-parallel
    // pairs fall out of the bounds check below.
    let Some((t, u)) = line_line_intersect_2d(&a0, &da, &b0, &db, 0.0) else {
        return SegmentIntersection::None;
    };

    // Use a length-scaled epsilon to include endpoints.
    let eps_t = eps / da.norm();
    let eps_u = eps / db.norm();
    if t < -eps_t || t > 1.0 + eps_t || u < -eps_u || u > 1.0 + eps_u {
        return SegmentIntersection::None;
    }

    let pt = a0 + da * t.clamp(0.0, 1.0);
    SegmentIntersection::Point(snap_to_endpoint(pt, [&a0, &a1, &b0, &b1], eps))
}

/// Sorts each segment's endpoints by `(x, y)`, then the two segments.
fn canonical_pair(
    a: (&Point2, &Point2),
    b: (&Point2, &Point2),
) -> ((Point2, Point2), (Point2, Point2)) {
    let order = |(p, q): (&Point2, &Point2)| {
        if lex_cmp(p, q).is_le() {
            (*p, *q)
        } else {
            (*q, *p)
        }
    };
    let (a, b) = (order(a), order(b));
    let a_first = lex_cmp(&a.0, &b.0)
        .then_with(|| lex_cmp(&a.1, &b.1))
        .is_le();
    if a_first {
        (a, b)
    } else {
        (b, a)
    }
}

/// Shared extent of two segments on a common line, measured along the
/// longer one.
fn collinear_intersection(
    a0: Point2,
    a1: Point2,
    b0: Point2,
    b1: Point2,
    eps: f64,
) -> SegmentIntersection {
    let ((r0, r1), (o0, o1)) = if distance(&b0, &b1) > distance(&a0, &a1) {
        ((b0, b1), (a0, a1))
    } else {
        ((a0, a1), (b0, b1))
    };

    let dr = r1 - r0;
    let len = dr.norm();
    let len_sq = len * len;
    let t0 = (o0 - r0).dot(&dr) / len_sq;
    let t1 = (o1 - r0).dot(&dr) / len_sq;
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);

    if hi < lo - eps / len {
        return SegmentIntersection::None;
    }

    let ends = [&a0, &a1, &b0, &b1];
    let from = snap_to_endpoint(r0 + dr * lo, ends, eps);
    let to = snap_to_endpoint(r0 + dr * hi, ends, eps);
    if (hi - lo) * len <= eps || from == to {
        SegmentIntersection::Point(from)
    } else {
        SegmentIntersection::Overlap(from, to)
    }
}

/// Replaces `p` with the closest of `ends` when it lies within `eps` of it.
fn snap_to_endpoint(p: Point2, ends: [&Point2; 4], eps: f64) -> Point2 {
    let mut best: Option<(f64, Point2)> = None;
    for e in ends {
        let d = distance(&p, e);
        if d <= eps && best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, *e));
        }
    }
    best.map_or(p, |(_, e)| e)
}
