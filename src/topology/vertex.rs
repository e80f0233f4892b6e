use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in an arrangement.
    pub struct VertexId;
}

/// Data associated with an arrangement vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The snapped position of the vertex.
    pub point: Point2,
    /// Vertices connected to this one by an edge, in insertion order.
    pub neighbors: Vec<VertexId>,
}

impl VertexData {
    /// Creates a new isolated vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            neighbors: Vec::new(),
        }
    }
}
