use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{
    covers_point, distance_to_boundary, is_simple, locate_point, ring_edges, signed_area_2d,
    PointLocation,
};
use crate::math::Point2;

use super::Segment;

/// A closed polygon given by its vertex ring.
///
/// The ring is stored without the closing repeat; [`Polygon::closed_ring`]
/// returns it with the first vertex appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from an ordered vertex list.
    ///
    /// A trailing copy of the first vertex is accepted and stripped, as are
    /// consecutive duplicate vertices.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for NaN/infinite coordinates, or
    /// `GeometryError::InvalidPolygon` if fewer than 3 distinct vertices remain.
    pub fn new(mut vertices: Vec<Point2>) -> Result<Self> {
        if vertices.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(GeometryError::NonFinite.into());
        }
        vertices.dedup();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeometryError::InvalidPolygon(format!(
                "at least 3 distinct vertices required, got {}",
                vertices.len()
            ))
            .into());
        }
        Ok(Self { vertices })
    }

    /// Creates a polygon from `(x, y)` coordinate pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::new`].
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// The vertex ring without the closing repeat.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// The vertex ring with the first vertex repeated at the end.
    #[must_use]
    pub fn closed_ring(&self) -> Vec<Point2> {
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        ring
    }

    /// Boundary edges in ring order.
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        ring_edges(&self.vertices)
            .filter_map(|(a, b)| Segment::new(*a, *b).ok())
            .collect()
    }

    /// Signed area; positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.vertices)
    }

    #[must_use]
    pub fn is_simple(&self, eps: f64) -> bool {
        is_simple(&self.vertices, eps)
    }

    /// Checks the polygon is free of self-intersections.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidPolygon` if two edges intersect anywhere
    /// other than at the vertex shared by neighbouring edges.
    pub fn ensure_simple(&self, eps: f64) -> Result<()> {
        if self.is_simple(eps) {
            Ok(())
        } else {
            Err(GeometryError::InvalidPolygon("polygon is self-intersecting".to_owned()).into())
        }
    }

    #[must_use]
    pub fn locate(&self, p: &Point2, eps: f64) -> PointLocation {
        locate_point(&self.vertices, p, eps)
    }

    /// Returns `true` if `p` is in the interior or on the boundary.
    #[must_use]
    pub fn covers_point(&self, p: &Point2, eps: f64) -> bool {
        covers_point(&self.vertices, p, eps)
    }

    /// Zero when `p` is covered, else the distance to the nearest edge.
    #[must_use]
    pub fn distance_to_boundary(&self, p: &Point2, eps: f64) -> f64 {
        distance_to_boundary(&self.vertices, p, eps)
    }
}
