mod core;
mod line_geometry;
mod rounded_corner;

pub use self::core::{BBox, Point3, Tolerance, Vec3};
pub use line_geometry::{LineGeometry, rounded_corner_geometry};
pub use rounded_corner::{
    DEFAULT_RADIUS, MAX_OUTPUT_POINTS, RoundedCornerDiagnostics, RoundedCornerError,
    RoundedCornerOptions, SkippedCorner, round_corners, round_corners_uniform,
};
