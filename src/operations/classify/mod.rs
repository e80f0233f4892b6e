mod segment_polygon;
mod segment_segment;

pub(crate) use segment_polygon::boundary_pieces;
pub use segment_polygon::{
    classify_against, clip_to_polygon, containment, ContainmentKind, PolygonContainment,
};
pub use segment_segment::{classify_segments, intersect_segments, RelationKind};
