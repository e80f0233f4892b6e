pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use std::cmp::Ordering;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default tolerance for collinearity and parallelism decisions.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Turn direction of three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(u: &Vector2, v: &Vector2) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// `c` counts as collinear when its distance from the line is `<= eps`, so
/// the decision does not depend on how long `a -> b` is.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2, eps: f64) -> Orientation {
    let ab = b - a;
    let value = cross(&ab, &(c - a));
    if value.abs() <= eps * ab.norm() {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p: &Point2, q: &Point2) -> f64 {
    (q - p).norm()
}

/// Lexicographic `(x, y)` ordering of points.
#[must_use]
pub fn lex_cmp(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Exact bit pattern of a point, with `-0.0` folded into `0.0`, so points
/// that compare equal produce the same key.
#[must_use]
pub fn point_bits(p: &Point2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Returns `true` if the two points are within `eps` of each other.
#[must_use]
pub fn points_close(a: &Point2, b: &Point2, eps: f64) -> bool {
    distance(a, b) <= eps
}
