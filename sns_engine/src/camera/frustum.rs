/// Frustum: six clipping planes for visibility culling.
///
/// Built from camera internals (field of view, aspect ratio, near/far
/// distances) and a camera pose (position, view direction, up vector).
/// Each plane keeps the frustum interior on its positive side, so a point P
/// is inside the frustum if `plane.distance(P) >= 0` for all six planes.
///
/// Internals change rarely (zoom, resize); the pose changes every frame.
/// Both setters rebuild the 8 corners and the 6 planes in place.

use glam::Vec3;
use crate::config::CameraSettings;
use crate::error::Result;
use crate::scene::BoundingBox;
use crate::{engine_bail, engine_debug};
use super::plane::Plane;

/// Result of a 3-way frustum/box classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// Every corner is behind at least one common plane
    Outside,
    /// The box straddles at least one plane
    Intersect,
    /// Every corner is inside every plane
    Inside,
}

/// Frustum plane indices
pub const PLANE_TOP: usize = 0;
pub const PLANE_BOTTOM: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Frustum corner indices (near/far, top/bottom, left/right)
pub const CORNER_NTL: usize = 0;
pub const CORNER_NTR: usize = 1;
pub const CORNER_NBL: usize = 2;
pub const CORNER_NBR: usize = 3;
pub const CORNER_FTL: usize = 4;
pub const CORNER_FTR: usize = 5;
pub const CORNER_FBL: usize = 6;
pub const CORNER_FBR: usize = 7;

/// Corner triple spanning each side face, indexed by plane (top, bottom,
/// left, right). Near and far planes come straight from the view direction.
const SIDE_FACE_CORNERS: [[usize; 3]; 4] = [
    [CORNER_NTR, CORNER_NTL, CORNER_FTL],
    [CORNER_NBL, CORNER_NBR, CORNER_FBR],
    [CORNER_NTL, CORNER_NBL, CORNER_FBL],
    [CORNER_NBR, CORNER_NTR, CORNER_FTR],
];

/// Squared length below which a basis vector is treated as zero.
const BASIS_EPSILON: f32 = 1e-12;

/// Projection-derived scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Internals {
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    tan_half_fov: f32,
    near_half_width: f32,
    near_half_height: f32,
    far_half_width: f32,
    far_half_height: f32,
}

impl Internals {
    fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Self> {
        CameraSettings { fov: fov_degrees, aspect, near, far }.validate()?;

        let tan_half_fov = (fov_degrees.to_radians() * 0.5).tan();
        let near_half_height = near * tan_half_fov;
        let far_half_height = far * tan_half_fov;
        Ok(Self {
            fov_degrees,
            aspect,
            near,
            far,
            tan_half_fov,
            near_half_width: near_half_height * aspect,
            near_half_height,
            far_half_width: far_half_height * aspect,
            far_half_height,
        })
    }
}

/// Camera pose with an orthonormal basis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pose {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Pose {
    fn new(position: Vec3, look: Vec3, up: Vec3) -> Result<Self> {
        if !position.is_finite() {
            engine_bail!("sns::Frustum", InvalidGeometry, "Camera position {} is not finite", position);
        }
        if !look.is_finite() || look.length_squared() <= BASIS_EPSILON {
            engine_bail!("sns::Frustum", InvalidGeometry, "Look direction {} has zero length", look);
        }
        if !up.is_finite() || up.length_squared() <= BASIS_EPSILON {
            engine_bail!("sns::Frustum", InvalidGeometry, "Up vector {} has zero length", up);
        }

        let forward = look.normalize();
        let right = forward.cross(up);
        if right.length_squared() <= BASIS_EPSILON {
            engine_bail!("sns::Frustum", InvalidGeometry,
                "Look direction {} is parallel to up vector {}", look, up);
        }
        let right = right.normalize();
        let up = right.cross(forward);

        Ok(Self { position, forward, right, up })
    }
}

/// Six frustum planes plus the 8 corners they were built from.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Planes: top, bottom, left, right, near, far
    planes: [Plane; 6],
    /// Corners: ntl, ntr, nbl, nbr, ftl, ftr, fbl, fbr
    corners: [Vec3; 8],
    internals: Internals,
    pose: Pose,
    culling_enabled: bool,
}

impl Frustum {
    /// Create a frustum from camera settings, placed at the origin looking
    /// down -Z with +Y up.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the settings are out of range.
    pub fn new(settings: &CameraSettings) -> Result<Self> {
        let internals = Internals::new(settings.fov, settings.aspect, settings.near, settings.far)?;
        let pose = Pose::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)?;
        let (corners, planes) = build_geometry(&internals, &pose)?;

        Ok(Self {
            planes,
            corners,
            internals,
            pose,
            culling_enabled: true,
        })
    }

    /// Update the projection parameters (zoom, resize).
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when `fov_degrees` is outside (0, 180),
    /// `aspect <= 0` or not `0 < near < far`. The frustum is left unchanged.
    pub fn set_internals(&mut self, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<()> {
        let internals = Internals::new(fov_degrees, aspect, near, far)?;
        let (corners, planes) = build_geometry(&internals, &self.pose)?;
        self.internals = internals;
        self.corners = corners;
        self.planes = planes;
        Ok(())
    }

    /// Update the camera pose.
    ///
    /// `look` is the viewing direction and need not be normalized; `up` only
    /// has to be non-parallel to `look`.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` for zero-length or parallel vectors. The frustum is
    /// left unchanged.
    pub fn set_pose(&mut self, position: Vec3, look: Vec3, up: Vec3) -> Result<()> {
        let pose = Pose::new(position, look, up)?;
        let (corners, planes) = build_geometry(&self.internals, &pose)?;
        self.pose = pose;
        self.corners = corners;
        self.planes = planes;
        Ok(())
    }

    /// Classify an 8-corner box against the frustum.
    pub fn classify(&self, bounding_box: &BoundingBox) -> FrustumTest {
        self.classify_points(bounding_box.corners())
    }

    /// Classify an arbitrary corner set against the frustum.
    ///
    /// - Culling disabled → `Inside`
    /// - All corners behind any single plane → `Outside` (returns at once)
    /// - Corners on both sides of some plane → `Intersect`, unless a later
    ///   plane rejects every corner
    /// - Otherwise → `Inside`
    ///
    /// A box that is outside the frustum but not entirely behind one plane
    /// (near a frustum edge) is reported as `Intersect`, never `Outside`.
    pub fn classify_points(&self, points: &[Vec3]) -> FrustumTest {
        if !self.culling_enabled {
            return FrustumTest::Inside;
        }

        let mut result = FrustumTest::Inside;
        for plane in &self.planes {
            let inside = points.iter().filter(|p| plane.distance(**p) >= 0.0).count();

            if inside == 0 {
                return FrustumTest::Outside;
            }
            if inside < points.len() {
                result = FrustumTest::Intersect;
            }
        }

        result
    }

    /// True if the point is on the inside of all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(point) >= 0.0)
    }

    // ===== CULLING TOGGLE =====

    /// Enable or disable culling (debug). When disabled every box is `Inside`.
    pub fn set_culling_enabled(&mut self, enabled: bool) {
        if self.culling_enabled != enabled {
            engine_debug!("sns::Frustum", "Frustum culling {}", if enabled { "enabled" } else { "disabled" });
        }
        self.culling_enabled = enabled;
    }

    /// Flip the culling flag and return the new state.
    pub fn toggle_culling(&mut self) -> bool {
        self.set_culling_enabled(!self.culling_enabled);
        self.culling_enabled
    }

    pub fn culling_enabled(&self) -> bool {
        self.culling_enabled
    }

    // ===== GETTERS =====

    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    pub fn fov_degrees(&self) -> f32 {
        self.internals.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.internals.aspect
    }

    pub fn near_distance(&self) -> f32 {
        self.internals.near
    }

    pub fn far_distance(&self) -> f32 {
        self.internals.far
    }

    pub fn tan_half_fov(&self) -> f32 {
        self.internals.tan_half_fov
    }

    /// Half width and half height of the near rectangle
    pub fn near_half_size(&self) -> (f32, f32) {
        (self.internals.near_half_width, self.internals.near_half_height)
    }

    /// Half width and half height of the far rectangle
    pub fn far_half_size(&self) -> (f32, f32) {
        (self.internals.far_half_width, self.internals.far_half_height)
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Normalized viewing direction
    pub fn forward(&self) -> Vec3 {
        self.pose.forward
    }

    /// Orthonormalized up vector
    pub fn up(&self) -> Vec3 {
        self.pose.up
    }

    /// True if the projection parameters equal `settings`.
    pub fn matches_settings(&self, settings: &CameraSettings) -> bool {
        self.internals.fov_degrees == settings.fov
            && self.internals.aspect == settings.aspect
            && self.internals.near == settings.near
            && self.internals.far == settings.far
    }
}

/// Compute the 8 corners and the 6 inward-facing planes.
///
/// Near and far planes use the view direction as normal. Each side plane
/// goes through three of its corners; its facing is then fixed by requiring
/// the corner centroid (strictly inside the frustum) to have a positive
/// distance.
fn build_geometry(internals: &Internals, pose: &Pose) -> Result<([Vec3; 8], [Plane; 6])> {
    let near_center = pose.position + pose.forward * internals.near;
    let far_center = pose.position + pose.forward * internals.far;

    let near_up = pose.up * internals.near_half_height;
    let near_right = pose.right * internals.near_half_width;
    let far_up = pose.up * internals.far_half_height;
    let far_right = pose.right * internals.far_half_width;

    let mut corners = [Vec3::ZERO; 8];
    corners[CORNER_NTL] = near_center + near_up - near_right;
    corners[CORNER_NTR] = near_center + near_up + near_right;
    corners[CORNER_NBL] = near_center - near_up - near_right;
    corners[CORNER_NBR] = near_center - near_up + near_right;
    corners[CORNER_FTL] = far_center + far_up - far_right;
    corners[CORNER_FTR] = far_center + far_up + far_right;
    corners[CORNER_FBL] = far_center - far_up - far_right;
    corners[CORNER_FBR] = far_center - far_up + far_right;

    let interior = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;

    let near_plane = Plane::from_normal_and_point(pose.forward, near_center)?;
    let far_plane = Plane::from_normal_and_point(-pose.forward, far_center)?;
    let mut planes = [near_plane; 6];
    planes[PLANE_FAR] = far_plane;
    for (plane, [a, b, c]) in planes.iter_mut().zip(SIDE_FACE_CORNERS) {
        let face = Plane::from_three_points(corners[a], corners[b], corners[c])?;
        *plane = if face.distance(interior) < 0.0 { face.flipped() } else { face };
    }

    Ok((corners, planes))
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
