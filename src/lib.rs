pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, SegplanError};
pub use geometry::{segments_from_coords, Polygon, Segment};
pub use math::Point2;
pub use operations::{
    AnalysisParams, ClearancePolicy, ClearanceReport, DifferenceCoverage, MergeCollinear,
    ReconstructBoundary, SplitArrangement, ValidateClearance,
};
pub use topology::Arrangement;
