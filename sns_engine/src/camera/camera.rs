/// Camera: third-person orbit camera around a target.
///
/// The camera sits `distance` units behind its target, rotated by yaw
/// (around world Y) and pitch (around the camera's X axis). Positive pitch
/// looks up. It produces view/projection matrices for the renderer and
/// feeds its pose to the culling frustum once per frame.

use glam::{Mat4, Quat, Vec3};
use crate::config::CameraSettings;
use crate::error::Result;
use super::frustum::Frustum;

/// Default orbit distance behind the target
pub const DEFAULT_DISTANCE: f32 = 6.0;

/// Pitch limit in degrees (both directions)
pub const MAX_PITCH: f32 = 90.0;

#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
    target: Vec3,
    yaw_degrees: f32,
    pitch_degrees: f32,
    distance: f32,
}

impl Camera {
    /// Create a camera orbiting `target` at the default distance.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the projection settings are out of range.
    pub fn new(settings: CameraSettings, target: Vec3) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            target,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            distance: DEFAULT_DISTANCE,
        })
    }

    // ===== CONTROLS =====

    /// Add to yaw and pitch (degrees). Yaw wraps into [0, 360), pitch is
    /// clamped to ±90.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw_degrees = (self.yaw_degrees + yaw_delta).rem_euclid(360.0);
        self.pitch_degrees = (self.pitch_degrees + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move the camera towards (negative) or away from (positive) the target.
    pub fn update_zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(0.0);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(0.0);
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Replace the projection settings.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if the settings are out of range; the camera
    /// keeps its previous settings.
    pub fn set_settings(&mut self, settings: CameraSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    // ===== POSE =====

    fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw_degrees.to_radians())
            * Quat::from_rotation_x(self.pitch_degrees.to_radians())
    }

    /// World-space eye position
    pub fn position(&self) -> Vec3 {
        self.target + self.orientation() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Unit viewing direction (towards the target)
    pub fn look_direction(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Unit up vector, orthogonal to the viewing direction
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    // ===== MATRICES =====

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position(), self.look_direction(), self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.settings.fov.to_radians(),
            self.settings.aspect,
            self.settings.near,
            self.settings.far,
        )
    }

    /// projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Push this camera into `frustum`: internals only when they changed,
    /// then the pose.
    pub fn apply_to_frustum(&self, frustum: &mut Frustum) -> Result<()> {
        if !frustum.matches_settings(&self.settings) {
            frustum.set_internals(
                self.settings.fov,
                self.settings.aspect,
                self.settings.near,
                self.settings.far,
            )?;
        }
        frustum.set_pose(self.position(), self.look_direction(), self.up())
    }

    // ===== GETTERS =====

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch_degrees
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
