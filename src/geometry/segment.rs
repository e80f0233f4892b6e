use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::{GeometryError, OperationError, Result, SegplanError};
use crate::math::intersect_2d::point_on_segment;
use crate::math::{distance, lex_cmp, point_bits, Point2, Vector2};

/// A bounded line segment between two distinct points.
///
/// The endpoint pair is unordered: equality ignores which endpoint was given
/// first. Segments are immutable; splitting always produces new segments.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment from two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if any coordinate is NaN or infinite,
    /// or `GeometryError::DegenerateSegment` if both endpoints coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite())
        {
            return Err(GeometryError::NonFinite.into());
        }
        if start == end {
            return Err(GeometryError::DegenerateSegment {
                x: start.x,
                y: start.y,
            }
            .into());
        }
        Ok(Self { start, end })
    }

    /// Creates a segment from two `(x, y)` coordinate pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Segment::new`].
    pub fn from_coords(start: (f64, f64), end: (f64, f64)) -> Result<Self> {
        Self::new(Point2::new(start.0, start.1), Point2::new(end.0, end.1))
    }

    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Returns the endpoints ordered lexicographically by `(x, y)`.
    #[must_use]
    pub fn canonical(&self) -> (Point2, Point2) {
        if lex_cmp(&self.start, &self.end).is_le() {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Returns the same segment with its endpoints in canonical order.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (start, end) = self.canonical();
        Self { start, end }
    }

    /// Direction vector `end - start` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Point at parameter `t`, where `t = 0` is `start` and `t = 1` is `end`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.direction() * t
    }

    /// Parameter of the orthogonal projection of `p` onto the supporting line.
    #[must_use]
    pub fn parameter_of(&self, p: &Point2) -> f64 {
        let d = self.direction();
        (p - self.start).dot(&d) / d.norm_squared()
    }

    /// Returns `true` if `p` lies on the segment within `eps`.
    #[must_use]
    pub fn contains_point(&self, p: &Point2, eps: f64) -> bool {
        point_on_segment(p, &self.start, &self.end, eps)
    }

    /// Ordering on canonical endpoints; used to make results independent of
    /// input order.
    #[must_use]
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        let (a0, a1) = self.canonical();
        let (b0, b1) = other.canonical();
        lex_cmp(&a0, &b0).then_with(|| lex_cmp(&a1, &b1))
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

// Coordinates are always finite, so equality is reflexive.
impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (a, b) = self.canonical();
        point_bits(&a).hash(state);
        point_bits(&b).hash(state);
    }
}

/// Converts a batch of coordinate pairs into segments.
///
/// # Errors
///
/// Fails on the first malformed entry with `OperationError::InvalidSegment`
/// carrying its index; no entry is skipped.
pub fn segments_from_coords(coords: &[[(f64, f64); 2]]) -> Result<Vec<Segment>> {
    coords
        .iter()
        .enumerate()
        .map(|(index, &[a, b])| {
            Segment::from_coords(a, b).map_err(|err| match err {
                SegplanError::Geometry(source) => {
                    OperationError::InvalidSegment { index, source }.into()
                }
                other => other,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate() {
        let err = Segment::from_coords((1.0, 2.0), (1.0, 2.0)).unwrap_err();
        assert!(matches!(
            err,
            SegplanError::Geometry(GeometryError::DegenerateSegment { .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let err = Segment::from_coords((f64::NAN, 0.0), (1.0, 2.0)).unwrap_err();
        assert!(matches!(err, SegplanError::Geometry(GeometryError::NonFinite)));
    }

    #[test]
    fn equality_ignores_direction() {
        let a = Segment::from_coords((0.0, 0.0), (3.0, 1.0)).unwrap();
        let b = Segment::from_coords((3.0, 1.0), (0.0, 0.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.normalized().start(), &Point2::new(0.0, 0.0));
    }

    #[test]
    fn hashing_ignores_direction_and_signed_zero() {
        let mut set = rustc_hash::FxHashSet::default();
        set.insert(Segment::from_coords((0.0, 0.0), (3.0, 1.0)).unwrap());
        set.insert(Segment::from_coords((3.0, 1.0), (0.0, 0.0)).unwrap());
        set.insert(Segment::from_coords((-0.0, 0.0), (3.0, 1.0)).unwrap());
        assert_eq!(set.len(), 1);
        set.insert(Segment::from_coords((0.0, 0.0), (3.0, 2.0)).unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn parameter_and_point_at() {
        let s = Segment::from_coords((0.0, 0.0), (4.0, 2.0)).unwrap();
        assert_relative_eq!(s.parameter_of(&Point2::new(2.0, 1.0)), 0.5);
        let p = s.point_at(0.25);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.5);
        assert_relative_eq!(s.length(), 20.0_f64.sqrt());
    }

    #[test]
    fn batch_conversion_reports_index() {
        let err = segments_from_coords(&[
            [(0.0, 0.0), (1.0, 0.0)],
            [(2.0, 2.0), (2.0, 2.0)],
        ])
        .unwrap_err();
        match err {
            SegplanError::Operation(OperationError::InvalidSegment { index, .. }) => {
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn batch_conversion_succeeds() {
        let segs = segments_from_coords(&[
            [(0.0, 0.0), (1.0, 0.0)],
            [(1.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap();
        assert_eq!(segs.len(), 2);
    }
}
