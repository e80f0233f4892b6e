use super::distance_2d::point_to_segment_dist;
use super::intersect_2d::{segment_segment_intersect_2d, SegmentIntersection};
use super::Point2;

/// Classification of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    OnBoundary,
    Outside,
}

/// Iterates the edges of an implicitly closed ring.
pub fn ring_edges(ring: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    let n = ring.len();
    (0..n).map(move |i| (&ring[i], &ring[(i + 1) % n]))
}

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(ring: &[Point2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    ring_edges(ring)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f64>()
        * 0.5
}

/// Rotates a ring so it starts at the leftmost vertex (smallest x),
/// breaking ties by smallest y.
#[must_use]
pub fn rotate_to_canonical_start(ring: &[Point2]) -> Vec<Point2> {
    if ring.len() < 2 {
        return ring.to_vec();
    }
    let mut best = 0;
    for (i, pt) in ring.iter().enumerate().skip(1) {
        if super::lex_cmp(pt, &ring[best]).is_lt() {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(ring.len());
    rotated.extend_from_slice(&ring[best..]);
    rotated.extend_from_slice(&ring[..best]);
    rotated
}

/// Locates `p` relative to the ring: boundary first (within `eps`), then an
/// even-odd ray crossing count along +x.
#[must_use]
pub fn locate_point(ring: &[Point2], p: &Point2, eps: f64) -> PointLocation {
    if ring_edges(ring).any(|(a, b)| point_to_segment_dist(p, a, b) <= eps) {
        return PointLocation::OnBoundary;
    }

    let mut inside = false;
    for (a, b) in ring_edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_at = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_at {
                inside = !inside;
            }
        }
    }

    if inside {
        PointLocation::Inside
    } else {
        PointLocation::Outside
    }
}

/// Returns `true` if `p` is inside the ring or on its boundary.
#[must_use]
pub fn covers_point(ring: &[Point2], p: &Point2, eps: f64) -> bool {
    locate_point(ring, p, eps) != PointLocation::Outside
}

/// Distance from `p` to the ring boundary; zero when the ring covers `p`.
#[must_use]
pub fn distance_to_boundary(ring: &[Point2], p: &Point2, eps: f64) -> f64 {
    if covers_point(ring, p, eps) {
        return 0.0;
    }
    ring_edges(ring)
        .map(|(a, b)| point_to_segment_dist(p, a, b))
        .fold(f64::INFINITY, f64::min)
}

/// Returns `true` if no two edges of the ring intersect other than adjacent
/// edges at their shared vertex.
#[must_use]
pub fn is_simple(ring: &[Point2], eps: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a0, a1) = (&ring[i], &ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let (b0, b1) = (&ring[j], &ring[(j + 1) % n]);
            let hit = segment_segment_intersect_2d(a0, a1, b0, b1, eps);
            let adjacent_shared = if j == i + 1 {
                Some(a1)
            } else if i == 0 && j == n - 1 {
                Some(a0)
            } else {
                None
            };
            match (hit, adjacent_shared) {
                (SegmentIntersection::None, _) => {}
                (SegmentIntersection::Point(p), Some(shared)) if p == *shared => {}
                _ => return false,
            }
        }
    }
    true
}
