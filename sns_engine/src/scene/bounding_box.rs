/// Bounding volumes for frustum culling.
///
/// `AABB` is the min/max form produced from mesh vertex extents at import
/// time. `BoundingBox` is the 8-corner form the frustum classifies; it stays
/// a plain point list so it can be carried through arbitrary (rotating,
/// scaling) transforms without re-fitting.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::engine_bail;

// ===== AABB =====

/// Axis-Aligned Bounding Box in mesh space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Tight box around a vertex list.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `points` is empty or contains non-finite values.
    pub fn from_points(points: &[Vec3]) -> Result<Self> {
        let Some(first) = points.first() else {
            engine_bail!("sns::AABB", InvalidResource, "Cannot bound an empty vertex list");
        };

        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }

        if !min.is_finite() || !max.is_finite() {
            engine_bail!("sns::AABB", InvalidResource, "Vertex list contains non-finite positions");
        }
        Ok(Self { min, max })
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the size along each axis
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The 8 corners of this box
    pub fn corners(&self) -> BoundingBox {
        BoundingBox::from_center_half_extents(self.center(), self.half_extents())
    }
}

// ===== 8-CORNER BOX =====

/// Sign pattern of the 8 corners, in storage order.
const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(-1.0, -1.0, -1.0),
];

/// Bounding box stored as its 8 corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    corners: [Vec3; 8],
}

impl BoundingBox {
    /// Number of corners
    pub const CORNER_COUNT: usize = 8;

    /// `center ± half_extents` for every sign permutation on x/y/z
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            corners: CORNER_SIGNS.map(|sign| center + sign * half_extents),
        }
    }

    /// Box spanning `min`..`max`
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        AABB { min, max }.corners()
    }

    /// Wrap an explicit corner list
    pub fn from_corners(corners: [Vec3; 8]) -> Self {
        Self { corners }
    }

    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Mean of the corners
    pub fn center(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / Self::CORNER_COUNT as f32
    }

    /// Translate every corner by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        for corner in &mut self.corners {
            *corner += delta;
        }
    }

    /// Corners carried through `matrix` (as points).
    pub fn transformed(&self, matrix: &Mat4) -> BoundingBox {
        Self {
            corners: self.corners.map(|corner| matrix.transform_point3(corner)),
        }
    }
}

#[cfg(test)]
#[path = "bounding_box_tests.rs"]
mod tests;
