/// Plane: half-space boundary used by the frustum.
///
/// `distance(p) = dot(normal, p) + offset`. Points with a distance >= 0 lie
/// in the inside half-space.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// Squared sine of the angle between the two edges below which three points
/// are treated as collinear. Relative, so tiny triangles still qualify.
const COLLINEAR_EPSILON: f32 = 1e-10;

/// Squared length below which a normal is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// A half-space boundary with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    /// Plane through three points.
    ///
    /// `normal = normalize(cross(c - b, a - b))`, `offset = -dot(normal, b)`.
    /// The operand order fixes the facing: swapping two points flips the
    /// inside half-space.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if the points are collinear or coincident, at any
    /// scale.
    pub fn from_three_points(a: Vec3, b: Vec3, c: Vec3) -> Result<Self> {
        let (u, v) = (c - b, a - b);
        let cross = u.cross(v);
        let scale = u.length_squared() * v.length_squared();
        if !cross.is_finite() || scale == 0.0 || cross.length_squared() <= COLLINEAR_EPSILON * scale {
            engine_bail!("sns::Plane", InvalidGeometry,
                "Cannot build a plane from collinear points {} {} {}", a, b, c);
        }
        let normal = cross.normalize();
        Ok(Self { normal, offset: -normal.dot(b) })
    }

    /// Plane with the given normal (normalized here) through `point`.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if the normal has zero length.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Result<Self> {
        if !normal.is_finite() || normal.length_squared() <= DEGENERATE_EPSILON {
            engine_bail!("sns::Plane", InvalidGeometry, "Plane normal {} has zero length", normal);
        }
        let normal = normal.normalize();
        Ok(Self { normal, offset: -normal.dot(point) })
    }

    /// Signed distance from the plane; positive on the inside.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }

    /// Same plane with the inside and outside half-spaces swapped.
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, offset: -self.offset }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod tests;
