/// Node roles: what a scene node represents in the game.

use glam::Vec3;
use crate::physics::CharacterController;

/// Role tag of a `SceneNode`, assigned at import time from the node name.
#[derive(Debug, Default)]
pub enum NodeRole {
    /// Plain decoration
    #[default]
    Prop,
    /// Collision-only geometry (terrain floor); excluded from the shadow pass
    StaticCollider,
    /// The player character
    Character(CharacterState),
    /// Hostile chasing the player
    Enemy(EnemyState),
}

impl NodeRole {
    pub fn is_enemy(&self) -> bool {
        matches!(self, NodeRole::Enemy(_))
    }

    pub fn is_character(&self) -> bool {
        matches!(self, NodeRole::Character(_))
    }

    pub fn as_enemy(&self) -> Option<&EnemyState> {
        match self {
            NodeRole::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterState> {
        match self {
            NodeRole::Character(character) => Some(character),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut CharacterState> {
        match self {
            NodeRole::Character(character) => Some(character),
            _ => None,
        }
    }

    /// Physics controller driving the node, if any
    pub fn controller(&self) -> Option<&dyn CharacterController> {
        match self {
            NodeRole::Enemy(enemy) => Some(enemy.controller()),
            NodeRole::Character(character) => Some(character.controller()),
            NodeRole::Prop | NodeRole::StaticCollider => None,
        }
    }
}

// ===== ENEMY =====

/// Outcome of hitting an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// The enemy survived with this many hit points
    Survived { hp: i32 },
    /// The enemy died (and has been respawned)
    Killed,
}

#[derive(Debug)]
pub struct EnemyState {
    hp: i32,
    max_hp: i32,
    damage: i32,
    spawn_position: Vec3,
    controller: Box<dyn CharacterController>,
}

impl EnemyState {
    /// Enemy at full health, spawning where the controller currently is.
    pub fn new(controller: Box<dyn CharacterController>, max_hp: i32, damage: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            damage,
            spawn_position: controller.position(),
            controller,
        }
    }

    /// Subtract `damage` and return the remaining hit points.
    pub fn hit_with_damage(&mut self, damage: i32) -> i32 {
        self.hp = self.hp.saturating_sub(damage);
        self.hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    pub fn restore_hp(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Damage dealt to the player on contact
    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }

    pub fn set_spawn_position(&mut self, position: Vec3) {
        self.spawn_position = position;
    }

    pub fn controller(&self) -> &dyn CharacterController {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn CharacterController {
        self.controller.as_mut()
    }
}

// ===== CHARACTER =====

#[derive(Debug)]
pub struct CharacterState {
    hp: i32,
    controller: Box<dyn CharacterController>,
}

impl CharacterState {
    pub fn new(controller: Box<dyn CharacterController>, hp: i32) -> Self {
        Self { hp, controller }
    }

    /// Subtract `damage`, never going below zero, and return the remaining
    /// hit points.
    pub fn inflict_damage(&mut self, damage: i32) -> i32 {
        self.hp = self.hp.saturating_sub(damage).max(0);
        self.hp
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn controller(&self) -> &dyn CharacterController {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn CharacterController {
        self.controller.as_mut()
    }
}

#[cfg(test)]
#[path = "node_role_tests.rs"]
mod tests;
