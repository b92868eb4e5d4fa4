//! Rounded-corner polylines.
//!
//! Replaces polyline vertices by circular arcs that are tangent to both adjacent
//! edges. Each arc is sampled into `smoothness + 1` points, so the output is still a
//! plain polyline that a renderer can upload as a line strip.
//!
//! # Rules
//! - Open polylines keep their endpoints; only interior vertices are rounded.
//! - Closed polylines round every vertex and repeat the first output point at the end.
//! - Radii are read per vertex. Every radius is clamped to half of the shortest edge of
//!   the whole polyline so neighbouring arcs cannot overlap.
//! - Corners without a well-defined arc (straight or folded-back angle, zero-length edge,
//!   zero effective radius) pass through as the original vertex and are reported in
//!   diagnostics.
//!
//! Arcs are built in 3D: the rotation axis is the normal of the plane through the arc
//! center and both tangent points, so non-planar polylines round correctly.

use std::f64::consts::PI;
use std::fmt;
use std::ops::Range;

use super::{Point3, Tolerance, Vec3};

/// Radius used when a caller has a single scalar radius and no per-vertex list.
pub const DEFAULT_RADIUS: f64 = 0.1;

/// Upper bound on the number of points a single call may produce.
pub const MAX_OUTPUT_POINTS: usize = 1 << 24;

#[derive(Debug, thiserror::Error)]
pub enum RoundedCornerError {
    #[error("missing radius for vertex {index}: only {count} radii supplied")]
    MissingRadius { index: usize, count: usize },

    #[error("radius at vertex {index} must be finite and non-negative: {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("smoothness must be between 1 and {max}, got {smoothness}", max = RoundedCornerOptions::MAX_SMOOTHNESS)]
    InvalidSmoothness { smoothness: usize },

    #[error("rounding {corners} corners with smoothness {smoothness} exceeds {max} output points", max = MAX_OUTPUT_POINTS)]
    OutputTooLarge { corners: usize, smoothness: usize },

    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedCornerOptions {
    /// Number of straight segments approximating each arc.
    pub smoothness: usize,
    /// Treat the last point as adjacent to the first.
    pub closed: bool,
}

impl RoundedCornerOptions {
    pub const DEFAULT_SMOOTHNESS: usize = 3;
    pub const MAX_SMOOTHNESS: usize = 1024;

    #[must_use]
    pub const fn new(smoothness: usize, closed: bool) -> Self {
        Self { smoothness, closed }
    }

    #[must_use]
    pub const fn open(smoothness: usize) -> Self {
        Self::new(smoothness, false)
    }

    #[must_use]
    pub const fn closed(smoothness: usize) -> Self {
        Self::new(smoothness, true)
    }
}

impl Default for RoundedCornerOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SMOOTHNESS, false)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundedCornerDiagnostics {
    pub input_point_count: usize,
    pub output_point_count: usize,
    pub corner_count: usize,
    pub rounded_corner_count: usize,
    pub skipped_corner_count: usize,
    pub clamped_corner_count: usize,
    /// Upper bound applied to every radius (half of the shortest edge).
    pub max_radius: f64,
    pub warnings: Vec<String>,
}

/// Why a corner was passed through without an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedCorner {
    ZeroLengthEdge,
    StraightAngle,
    FoldedBack,
    ZeroRadius,
    /// Bisector or arc plane normal cancelled to zero in floating point.
    UnstableFrame,
}

impl fmt::Display for SkippedCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::ZeroLengthEdge => "adjacent edge has zero length",
            Self::StraightAngle => "edges are collinear",
            Self::FoldedBack => "edges fold back onto each other",
            Self::ZeroRadius => "effective radius is zero",
            Self::UnstableFrame => "arc frame is numerically degenerate",
        };
        f.write_str(reason)
    }
}

/// A sampled fillet: `origin + start` rotated about `axis` from `0` to `sweep`.
#[derive(Debug, Clone, Copy)]
struct CornerArc {
    origin: Point3,
    start: Vec3,
    axis: Vec3,
    sweep: f64,
}

impl CornerArc {
    fn sample_into(&self, smoothness: usize, out: &mut Vec<Point3>) {
        let delta = self.sweep / smoothness as f64;
        for step in 0..=smoothness {
            let offset = self.start.rotated_about(self.axis, delta * step as f64);
            out.push(self.origin.add_vec(offset));
        }
    }
}

/// Round the corners of a polyline using one radius per vertex.
///
/// `radiuses[i]` is the fillet radius at `points[i]`. Entries for endpoints of an open
/// polyline are never read. Fewer than three points are returned unchanged.
pub fn round_corners(
    points: &[Point3],
    radiuses: &[f64],
    options: RoundedCornerOptions,
    tol: Tolerance,
) -> Result<(Vec<Point3>, RoundedCornerDiagnostics), RoundedCornerError> {
    if options.smoothness < 1 || options.smoothness > RoundedCornerOptions::MAX_SMOOTHNESS {
        return Err(RoundedCornerError::InvalidSmoothness {
            smoothness: options.smoothness,
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(RoundedCornerError::NonFinitePoint { index });
    }

    let mut diagnostics = RoundedCornerDiagnostics {
        input_point_count: points.len(),
        ..Default::default()
    };

    if points.len() < 3 {
        diagnostics.output_point_count = points.len();
        return Ok((points.to_vec(), diagnostics));
    }

    let corners = corner_range(points.len(), options.closed);
    validate_radiuses(radiuses, corners.clone())?;

    let max_radius = shortest_edge(points, options.closed) * 0.5;
    diagnostics.max_radius = max_radius;

    let n = points.len();
    let capacity = output_capacity(corners.len(), options.smoothness)?;
    let mut out = Vec::with_capacity(capacity);
    if !options.closed {
        out.push(points[0]);
    }

    for i in corners {
        diagnostics.corner_count += 1;

        let prev = points[(i + n - 1) % n];
        let corner = points[i];
        let next = points[(i + 1) % n];

        let requested = radiuses[i];
        let radius = requested.min(max_radius);
        if requested > max_radius {
            diagnostics.clamped_corner_count += 1;
        }

        match corner_arc(prev, corner, next, radius, tol) {
            Ok(arc) => {
                arc.sample_into(options.smoothness, &mut out);
                diagnostics.rounded_corner_count += 1;
            }
            Err(reason) => {
                log::debug!("corner {i} passed through: {reason}");
                diagnostics.skipped_corner_count += 1;
                diagnostics.warnings.push(format!("corner {i}: {reason}"));
                out.push(corner);
            }
        }
    }

    if options.closed {
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
    } else {
        out.push(points[n - 1]);
    }

    log::debug!(
        "rounded {} of {} corners ({} clamped to {max_radius})",
        diagnostics.rounded_corner_count,
        diagnostics.corner_count,
        diagnostics.clamped_corner_count
    );

    diagnostics.output_point_count = out.len();
    Ok((out, diagnostics))
}

/// Round every corner with the same radius.
pub fn round_corners_uniform(
    points: &[Point3],
    radius: f64,
    options: RoundedCornerOptions,
    tol: Tolerance,
) -> Result<(Vec<Point3>, RoundedCornerDiagnostics), RoundedCornerError> {
    let radiuses = vec![radius; points.len()];
    round_corners(points, &radiuses, options, tol)
}

/// Worst case: every corner rounded, plus the two endpoints or the closing point.
fn output_capacity(corners: usize, smoothness: usize) -> Result<usize, RoundedCornerError> {
    smoothness
        .checked_add(1)
        .and_then(|per_corner| corners.checked_mul(per_corner))
        .and_then(|arcs| arcs.checked_add(2))
        .filter(|&total| total <= MAX_OUTPUT_POINTS)
        .ok_or(RoundedCornerError::OutputTooLarge {
            corners,
            smoothness,
        })
}

fn corner_range(len: usize, closed: bool) -> Range<usize> {
    if closed { 0..len } else { 1..len - 1 }
}

fn validate_radiuses(radiuses: &[f64], corners: Range<usize>) -> Result<(), RoundedCornerError> {
    for index in corners {
        let Some(&radius) = radiuses.get(index) else {
            return Err(RoundedCornerError::MissingRadius {
                index,
                count: radiuses.len(),
            });
        };
        if !radius.is_finite() || radius < 0.0 {
            return Err(RoundedCornerError::InvalidRadius { index, radius });
        }
    }
    Ok(())
}

fn shortest_edge(points: &[Point3], closed: bool) -> f64 {
    let mut shortest = points
        .windows(2)
        .map(|pair| pair[0].distance_to(pair[1]))
        .fold(f64::INFINITY, f64::min);
    if closed {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            shortest = shortest.min(last.distance_to(*first));
        }
    }
    shortest
}

fn corner_arc(
    prev: Point3,
    corner: Point3,
    next: Point3,
    radius: f64,
    tol: Tolerance,
) -> Result<CornerArc, SkippedCorner> {
    let in_vec = prev.sub_point(corner);
    let out_vec = next.sub_point(corner);
    if tol.is_zero_length(in_vec.length()) || tol.is_zero_length(out_vec.length()) {
        return Err(SkippedCorner::ZeroLengthEdge);
    }
    let (Some(to_prev), Some(to_next)) = (in_vec.normalized(), out_vec.normalized()) else {
        return Err(SkippedCorner::ZeroLengthEdge);
    };

    let angle = to_prev.angle_to(to_next);
    if angle <= Tolerance::ANGLE.eps {
        return Err(SkippedCorner::FoldedBack);
    }
    if PI - angle <= Tolerance::ANGLE.eps {
        return Err(SkippedCorner::StraightAngle);
    }
    if tol.is_zero_length(radius) {
        return Err(SkippedCorner::ZeroRadius);
    }

    let Some(bisector) = (to_prev + to_next).normalized() else {
        return Err(SkippedCorner::UnstableFrame);
    };

    let half = angle * 0.5;
    let side_length = radius / half.tan();
    let center_length = (side_length * side_length + radius * radius).sqrt();

    let start_key = to_prev * side_length;
    let end_key = to_next * side_length;
    let center_key = bisector * center_length;

    let start = start_key - center_key;
    let end = end_key - center_key;
    let Some(axis) = start.cross(end).normalized() else {
        return Err(SkippedCorner::UnstableFrame);
    };

    Ok(CornerArc {
        origin: corner.add_vec(center_key),
        start,
        axis,
        sweep: start.angle_to(end),
    })
}
