use thiserror::Error;

/// Top-level error type for segplan.
#[derive(Debug, Error)]
pub enum SegplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing geometric values.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment: both endpoints at ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),
}

/// Errors raised while walking a segment graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("segment graph is disconnected: reached {reached} of {total} vertices")]
    DisconnectedGraph { reached: usize, total: usize },

    #[error("traversal did not return to its starting vertex")]
    OpenPath,

    #[error("vertex not found in arrangement")]
    VertexNotFound,
}

/// Errors related to analysis operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid analysis parameters: {0}")]
    InvalidParameters(String),

    #[error("segment {index} is invalid: {source}")]
    InvalidSegment {
        index: usize,
        #[source]
        source: GeometryError,
    },
}

/// Convenience type alias for results using [`SegplanError`].
pub type Result<T> = std::result::Result<T, SegplanError>;
