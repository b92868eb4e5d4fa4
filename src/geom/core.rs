use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Unit vector in the same direction, or `None` for zero/non-finite input.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(self.mul_scalar(1.0 / len))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Unsigned angle between two vectors in `[0, π]`.
    ///
    /// Returns `π / 2` when either vector has zero length, matching the
    /// convention of three.js `Vector3.angleTo`.
    #[must_use]
    pub fn angle_to(self, rhs: Self) -> f64 {
        let denominator = (self.length_squared() * rhs.length_squared()).sqrt();
        if denominator == 0.0 {
            return std::f64::consts::FRAC_PI_2;
        }
        let cos = (self.dot(rhs) / denominator).clamp(-1.0, 1.0);
        cos.acos()
    }

    /// Rotate around a unit axis by `angle` radians (Rodrigues' formula).
    ///
    /// Positive angles rotate counter-clockwise when looking down the axis.
    #[must_use]
    pub fn rotated_about(self, axis_unit: Self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let term1 = self.mul_scalar(c);
        let term2 = axis_unit.cross(self).mul_scalar(s);
        let term3 = axis_unit.mul_scalar(axis_unit.dot(self) * (1.0 - c));
        term1 + term2 + term3
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.mul_scalar(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

/// A position in scene space.
///
/// Serializes as `{ "x": .., "y": .., "z": .. }`, the shape of a three.js
/// `Vector3`, so points can cross the wasm boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        self.sub_point(other).length()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BBox
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bbox = rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: Point3::new(acc.min.x.min(p.x), acc.min.y.min(p.y), acc.min.z.min(p.z)),
                max: Point3::new(acc.max.x.max(p.x), acc.max.y.max(p.y), acc.max.z.max(p.z)),
            },
        );
        Some(bbox)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Absolute tolerance used for degeneracy checks.
///
/// - `Tolerance::DEFAULT` - edge lengths and radii (1e-9)
/// - `Tolerance::ANGLE` - corner angles in radians (1e-9)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Tolerance for angular comparisons in radians (1e-9).
    pub const ANGLE: Self = Self { eps: 1e-9 };

    #[must_use]
    pub const fn default_geom() -> Self {
        Self::DEFAULT
    }

    #[must_use]
    pub fn is_zero_length(self, len: f64) -> bool {
        len.abs() <= self.eps
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn test_vec3_angle_to() {
        assert!((X.angle_to(Y) - FRAC_PI_2).abs() < 1e-12);
        assert!((X.angle_to(X * -1.0) - PI).abs() < 1e-12);
        assert!(X.angle_to(X * 3.0).abs() < 1e-12);
        assert!((Vec3::new(0.0, 0.0, 0.0).angle_to(X) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_rotated_about_z() {
        let rotated = X.rotated_about(Z, FRAC_PI_2);
        assert!((rotated - Y).length() < 1e-12);

        let back = rotated.rotated_about(Z, -FRAC_PI_2);
        assert!((back - X).length() < 1e-12);
    }

    #[test]
    fn test_vec3_rotation_keeps_axis_component() {
        let v = Vec3::new(1.0, 0.0, 2.0);
        let rotated = v.rotated_about(Z, 1.234);
        assert!((rotated.z - 2.0).abs() < 1e-12);
        assert!((rotated.length() - v.length()).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_normalized_rejects_zero() {
        assert!(Vec3::new(0.0, 0.0, 0.0).normalized().is_none());
        assert!(Vec3::new(f64::NAN, 0.0, 0.0).normalized().is_none());
        let n = Vec3::new(3.0, 4.0, 0.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_point3_operators() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert_eq!(b - a, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(a + Vec3::new(3.0, 4.0, 0.0), b);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
        assert!(!Point3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn test_bbox_from_points() {
        let bbox = BBox::from_points(&[
            Point3::new(0.0, 1.0, -1.0),
            Point3::new(2.0, -1.0, 0.5),
            Point3::new(1.0, 0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point3::new(0.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(2.0, 1.0, 0.5));
        assert!(BBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_zero_length_tolerance() {
        assert!(Tolerance::default_geom().is_zero_length(-1e-10));
        assert!(!Tolerance::default_geom().is_zero_length(1e-6));
    }
}
