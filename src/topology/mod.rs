pub mod edge;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use vertex::{VertexData, VertexId};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::error::GraphError;
use crate::geometry::Segment;
use crate::math::{distance, lex_cmp, point_bits, Point2};

type PointKey = (u64, u64);

/// A planar graph of points joined by straight edges.
///
/// Vertices and edges live in generational arenas. Every inserted point is
/// first snapped to an existing vertex within `eps`, so two edges meeting at
/// a geometrically shared point always share the same [`VertexId`].
#[derive(Debug)]
pub struct Arrangement {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    index: FxHashMap<PointKey, VertexId>,
    eps: f64,
}

impl Arrangement {
    /// Creates an empty arrangement that snaps points within `eps`.
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            index: FxHashMap::default(),
            eps,
        }
    }

    /// Builds an arrangement directly from segments, without splitting.
    #[must_use]
    pub fn from_segments(segments: &[Segment], eps: f64) -> Self {
        let mut arrangement = Self::new(eps);
        for seg in segments {
            arrangement.insert_segment(seg);
        }
        arrangement
    }

    // --- Vertex operations ---

    /// Finds or inserts the vertex for `p`, returning its ID.
    pub fn insert_point(&mut self, p: Point2) -> VertexId {
        if let Some(id) = self.find_vertex(&p) {
            return id;
        }
        let id = self.vertices.insert(VertexData::new(p));
        self.index.insert(point_bits(&p), id);
        id
    }

    /// Looks up the vertex at `p`: exact match first, then the nearest vertex
    /// within the snapping tolerance.
    #[must_use]
    pub fn find_vertex(&self, p: &Point2) -> Option<VertexId> {
        if let Some(&id) = self.index.get(&point_bits(p)) {
            return Some(id);
        }
        self.vertices
            .iter()
            .map(|(id, v)| (id, distance(&v.point, p)))
            .filter(|&(_, d)| d <= self.eps)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Returns the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::VertexNotFound` if the ID is stale.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, GraphError> {
        self.vertices.get(id).ok_or(GraphError::VertexNotFound)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex IDs in ascending `(x, y)` order of their points.
    #[must_use]
    pub fn sorted_vertex_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices.keys().collect();
        ids.sort_by(|&a, &b| lex_cmp(&self.vertices[a].point, &self.vertices[b].point));
        ids
    }

    /// Vertex points in ascending `(x, y)` order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point2> {
        self.sorted_vertex_ids()
            .into_iter()
            .map(|id| self.vertices[id].point)
            .collect()
    }

    // --- Edge operations ---

    /// Inserts an undirected edge between the snapped endpoints of `seg`.
    ///
    /// Returns `None` when both endpoints snap to the same vertex. Inserting
    /// an edge that already exists returns the existing edge.
    pub fn insert_segment(&mut self, seg: &Segment) -> Option<EdgeId> {
        let a = self.insert_point(*seg.start());
        let b = self.insert_point(*seg.end());
        self.connect(a, b)
    }

    /// Connects two vertices, returning the edge ID.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        if a == b || !self.vertices.contains_key(a) || !self.vertices.contains_key(b) {
            return None;
        }
        if let Some(existing) = self.find_edge(a, b) {
            return Some(existing);
        }
        let id = self.edges.insert(EdgeData::new(a, b));
        self.vertices[a].neighbors.push(b);
        self.vertices[b].neighbors.push(a);
        Some(id)
    }

    fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edges
            .iter()
            .find(|(_, e)| (e.start == a && e.end == b) || (e.start == b && e.end == a))
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if an edge joins the vertices at `a` and `b`.
    #[must_use]
    pub fn contains_edge(&self, a: &Point2, b: &Point2) -> bool {
        match (self.find_vertex(a), self.find_vertex(b)) {
            (Some(va), Some(vb)) => self.vertices[va].neighbors.contains(&vb),
            _ => false,
        }
    }

    /// Neighbor IDs of a vertex; empty for an unknown ID.
    #[must_use]
    pub fn neighbor_ids(&self, id: VertexId) -> &[VertexId] {
        self.vertices
            .get(id)
            .map(|v| v.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Points connected to `p`, in ascending `(x, y)` order.
    #[must_use]
    pub fn neighbors(&self, p: &Point2) -> Vec<Point2> {
        let Some(id) = self.find_vertex(p) else {
            return Vec::new();
        };
        let mut pts: Vec<Point2> = self
            .neighbor_ids(id)
            .iter()
            .map(|&n| self.vertices[n].point)
            .collect();
        pts.sort_by(lex_cmp);
        pts
    }

    /// Neighbors of `p` that come after it in `(x, y)` order: the edges leaving
    /// `p` when every edge is directed from its smaller to its larger endpoint.
    #[must_use]
    pub fn outgoing(&self, p: &Point2) -> Vec<Point2> {
        let Some(id) = self.find_vertex(p) else {
            return Vec::new();
        };
        let origin = self.vertices[id].point;
        self.neighbors(&origin)
            .into_iter()
            .filter(|n| lex_cmp(&origin, n).is_lt())
            .collect()
    }

    /// All edges as canonical segments, sorted.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let mut segs: Vec<Segment> = self
            .edges
            .values()
            .filter_map(|e| {
                Segment::new(self.vertices[e.start].point, self.vertices[e.end].point).ok()
            })
            .map(|s| s.normalized())
            .collect();
        segs.sort_by(Segment::canonical_cmp);
        segs
    }
}
