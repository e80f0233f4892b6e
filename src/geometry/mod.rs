pub mod polygon;
pub mod segment;

pub use polygon::Polygon;
pub use segment::{segments_from_coords, Segment};
