//! Physics module: character controller seam.
//!
//! The scene only needs positions out of the physics world. Controllers are
//! created through a factory so a real physics backend can replace the
//! in-crate kinematic one.

mod character_controller;

pub use character_controller::{
    CharacterController, ControllerDesc, ControllerFactory,
    KinematicController, KinematicControllerFactory,
};
