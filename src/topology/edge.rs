use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in an arrangement.
    pub struct EdgeId;
}

/// An undirected edge between two distinct arrangement vertices.
#[derive(Debug, Clone, Copy)]
pub struct EdgeData {
    /// Endpoint given first on insertion.
    pub start: VertexId,
    /// Endpoint given second on insertion.
    pub end: VertexId,
}

impl EdgeData {
    /// Creates a new edge.
    #[must_use]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self { start, end }
    }
}
