use slotmap::SecondaryMap;

use crate::error::{GraphError, OperationError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::polygon_2d::{rotate_to_canonical_start, signed_area_2d};
use crate::math::{lex_cmp, Point2};
use crate::topology::{Arrangement, VertexId};

use super::split::split_at_intersections;
use super::AnalysisParams;

/// Recovers an ordered closed boundary from an unordered set of segments.
///
/// The segments are loaded into an adjacency graph and walked depth-first
/// from the smallest vertex in `(x, y)` order. The walk succeeds when it
/// reaches every vertex and ends next to where it started.
#[derive(Debug)]
pub struct ReconstructBoundary {
    segments: Vec<Segment>,
    split_junctions: bool,
    canonical: bool,
    params: AnalysisParams,
}

impl ReconstructBoundary {
    /// Creates a new `ReconstructBoundary` operation with junction splitting
    /// and canonical output turned off.
    #[must_use]
    pub fn new(segments: &[Segment]) -> Self {
        Self {
            segments: segments.to_vec(),
            split_junctions: false,
            canonical: false,
            params: AnalysisParams::default(),
        }
    }

    /// Splits the segments at their mutual intersections before building the
    /// graph, so T-junctions become shared vertices.
    #[must_use]
    pub fn split_junctions(mut self, split: bool) -> Self {
        self.split_junctions = split;
        self
    }

    /// Returns the ring counter-clockwise, starting at its leftmost-bottom
    /// vertex, instead of in traversal order.
    #[must_use]
    pub fn canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    /// Replaces the default tolerance.
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the reconstruction.
    ///
    /// # Errors
    ///
    /// - `OperationError::EmptyInput` for an empty segment list.
    /// - `GraphError::DisconnectedGraph` if the walk misses some vertex.
    /// - `GraphError::OpenPath` if the walk does not close into a ring.
    pub fn execute(&self) -> Result<Polygon> {
        if self.segments.is_empty() {
            return Err(OperationError::EmptyInput("no segments to reconstruct").into());
        }
        self.params.validate()?;
        let eps = self.params.epsilon;

        let graph = if self.split_junctions {
            Arrangement::from_segments(&split_at_intersections(&self.segments, eps), eps)
        } else {
            Arrangement::from_segments(&self.segments, eps)
        };

        let order = depth_first_order(&graph)?;
        if order.len() < graph.vertex_count() {
            return Err(GraphError::DisconnectedGraph {
                reached: order.len(),
                total: graph.vertex_count(),
            }
            .into());
        }

        let (first, last) = match (order.first(), order.last()) {
            (Some(&first), Some(&last)) if order.len() >= 3 => (first, last),
            _ => return Err(GraphError::OpenPath.into()),
        };
        if !graph.neighbor_ids(last).contains(&first) {
            return Err(GraphError::OpenPath.into());
        }

        let mut ring = order
            .iter()
            .map(|&id| graph.vertex(id).map(|v| v.point))
            .collect::<std::result::Result<Vec<Point2>, GraphError>>()?;

        if self.canonical {
            if signed_area_2d(&ring) < 0.0 {
                ring.reverse();
            }
            ring = rotate_to_canonical_start(&ring);
        }

        tracing::debug!(
            segments = self.segments.len(),
            vertices = ring.len(),
            "reconstructed boundary"
        );
        Polygon::new(ring)
    }
}

/// Iterative depth-first walk from the smallest vertex. Neighbours are
/// explored in ascending `(x, y)` order.
fn depth_first_order(graph: &Arrangement) -> Result<Vec<VertexId>> {
    let Some(&start) = graph.sorted_vertex_ids().first() else {
        return Ok(Vec::new());
    };

    let mut visited: SecondaryMap<VertexId, ()> = SecondaryMap::new();
    let mut order = Vec::with_capacity(graph.vertex_count());
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if visited.contains_key(id) {
            continue;
        }
        visited.insert(id, ());
        order.push(id);

        let mut next: Vec<(VertexId, Point2)> = Vec::new();
        for &n in graph.neighbor_ids(id) {
            if !visited.contains_key(n) {
                next.push((n, graph.vertex(n)?.point));
            }
        }
        // Largest first onto the stack, so the smallest is popped next.
        next.sort_by(|a, b| lex_cmp(&b.1, &a.1));
        stack.extend(next.into_iter().map(|(n, _)| n));
    }
    Ok(order)
}
