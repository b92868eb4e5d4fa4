//! Renderer-facing line geometry.
//!
//! `LineGeometry` holds a flat `f32` xyz position buffer, the layout a three.js
//! `BufferGeometry` position attribute expects. Building one is the Rust side of
//! `setFromPoints`; uploading it stays with the renderer.

use super::rounded_corner::{
    RoundedCornerDiagnostics, RoundedCornerError, RoundedCornerOptions, round_corners,
};
use super::{BBox, Point3, Tolerance};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineGeometry {
    positions: Vec<f32>,
    closed: bool,
}

impl LineGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_points(points: &[Point3], closed: bool) -> Self {
        let mut positions = Vec::with_capacity(points.len() * 3);
        for point in points {
            positions.extend_from_slice(&[point.x as f32, point.y as f32, point.z as f32]);
        }
        Self { positions, closed }
    }

    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub fn into_positions(self) -> Vec<f32> {
        self.positions
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether the last vertex repeats the first to close the loop.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point3> {
        let xyz = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(
            f64::from(xyz[0]),
            f64::from(xyz[1]),
            f64::from(xyz[2]),
        ))
    }

    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|xyz| Point3::new(f64::from(xyz[0]), f64::from(xyz[1]), f64::from(xyz[2])))
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BBox> {
        let points: Vec<Point3> = self.points().collect();
        BBox::from_points(&points)
    }
}

/// Round the corners of `points` and pack the result for rendering.
///
/// Empty input yields an empty geometry; fewer than three points are packed as-is.
pub fn rounded_corner_geometry(
    points: &[Point3],
    radiuses: &[f64],
    options: RoundedCornerOptions,
    tol: Tolerance,
) -> Result<(LineGeometry, RoundedCornerDiagnostics), RoundedCornerError> {
    if points.is_empty() {
        return Ok((LineGeometry::empty(), RoundedCornerDiagnostics::default()));
    }

    let (rounded, diagnostics) = round_corners(points, radiuses, options, tol)?;
    let closed = options.closed && points.len() >= 3;
    Ok((LineGeometry::from_points(&rounded, closed), diagnostics))
}
