/// Character controllers: movable boxes that report their position back to
/// scene nodes.

use std::fmt::Debug;
use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;

/// A movable character shape owned by a physics world.
pub trait CharacterController: Debug + Send {
    /// Current center position
    fn position(&self) -> Vec3;

    /// Teleport to `position` (no collision)
    fn set_position(&mut self, position: Vec3);

    /// Move by `displacement` over `dt` seconds and return the displacement
    /// actually applied after collision response.
    fn move_by(&mut self, displacement: Vec3, dt: f32) -> Vec3;
}

/// Box controller creation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerDesc {
    /// Initial center position
    pub position: Vec3,
    /// Half size of the box along each axis
    pub half_extents: Vec3,
}

/// Creates controllers for enemies and the player character.
pub trait ControllerFactory {
    fn create_controller(&mut self, desc: &ControllerDesc) -> Result<Box<dyn CharacterController>>;
}

// ===== KINEMATIC IMPLEMENTATION =====

/// Controller without a physics world.
///
/// Moves freely except that the bottom of its box never sinks below the
/// floor height it was created on, which turns a constant downward
/// displacement (gravity) into resting on the ground.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicController {
    position: Vec3,
    half_extents: Vec3,
    floor: f32,
}

impl KinematicController {
    pub fn new(desc: &ControllerDesc) -> Self {
        Self {
            position: desc.position,
            half_extents: desc.half_extents,
            floor: desc.position.y - desc.half_extents.y,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Lowest y the bottom of the box may reach
    pub fn floor(&self) -> f32 {
        self.floor
    }
}

impl CharacterController for KinematicController {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn move_by(&mut self, displacement: Vec3, _dt: f32) -> Vec3 {
        let old = self.position;
        let mut target = old + displacement;
        target.y = target.y.max(self.floor + self.half_extents.y);
        self.position = target;
        target - old
    }
}

/// Factory handing out `KinematicController`s.
#[derive(Debug, Default)]
pub struct KinematicControllerFactory {
    created: usize,
}

impl KinematicControllerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of controllers created so far
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ControllerFactory for KinematicControllerFactory {
    fn create_controller(&mut self, desc: &ControllerDesc) -> Result<Box<dyn CharacterController>> {
        if !desc.position.is_finite() || !desc.half_extents.is_finite() || desc.half_extents.min_element() < 0.0 {
            engine_bail!("sns::KinematicControllerFactory", InvalidResource,
                "Invalid controller box at {} with half extents {}", desc.position, desc.half_extents);
        }
        self.created += 1;
        Ok(Box::new(KinematicController::new(desc)))
    }
}

#[cfg(test)]
#[path = "character_controller_tests.rs"]
mod tests;
