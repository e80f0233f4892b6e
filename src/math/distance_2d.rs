use super::Point2;

/// Returns the parameter of the projection of `p` onto the line `a -> b`,
/// clamped to `[0, 1]`.
#[must_use]
pub fn project_clamped(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        return 0.0;
    }
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from `p` to the segment `a -> b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    if d.norm_squared() < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = project_clamped(p, a, b);
    let closest = a + d * t;
    (p - closest).norm()
}
