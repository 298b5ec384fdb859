/// SceneNode: one node of the transform tree.
///
/// A node owns its children and references drawables by key. Traversals
/// accumulate transforms top-down; every drawable consults the frustum in
/// the draw context before submitting.
///
/// Local matrix:
/// `translate(position) · rotate_y(yaw) · translate(starting_offset) ·
/// transform_matrix · model_matrix`

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::renderer::{MeshHandle, ShaderHandle};
use super::drawable::{DrawContext, DrawableKey};
use super::node_role::{HitResult, NodeRole};

/// Downward displacement per second applied to chasing enemies
pub const ENEMY_GRAVITY: f32 = -98.0;

/// Downward displacement per step applied to the walking character
pub const CHARACTER_GRAVITY_STEP: f32 = -10.0;

#[derive(Debug)]
pub struct SceneNode {
    name: String,
    role: NodeRole,
    model_matrix: Mat4,
    transform_matrix: Mat4,
    enabled: bool,
    position: Vec3,
    yaw_degrees: f32,
    starting_offset: Vec3,
    casts_shadow: bool,
    children: Vec<SceneNode>,
    drawables: Vec<DrawableKey>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: NodeRole::Prop,
            model_matrix: Mat4::IDENTITY,
            transform_matrix: Mat4::IDENTITY,
            enabled: true,
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            starting_offset: Vec3::ZERO,
            casts_shadow: true,
            children: Vec::new(),
            drawables: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.set_role(role);
        self
    }

    // ===== TRAVERSAL =====

    /// Local matrix with `model` in place of the stored model matrix
    fn local_matrix_with(&self, model: &Mat4) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw_degrees.to_radians())
            * Mat4::from_translation(self.starting_offset)
            * self.transform_matrix
            * *model
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix_with(&self.model_matrix)
    }

    /// Draw this subtree and return the number of draws issued.
    ///
    /// A disabled node draws nothing and its children are not visited.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, accumulated: &Mat4) -> Result<u32> {
        if !self.enabled {
            return Ok(0);
        }
        self.draw_accumulated(ctx, &(*accumulated * self.local_matrix()))
    }

    /// Draw this subtree from the root with `transform` used as the model
    /// matrix for this call only. The node is not modified.
    pub fn draw_with_transform(&self, ctx: &mut DrawContext<'_>, transform: &Mat4) -> Result<u32> {
        if !self.enabled {
            return Ok(0);
        }
        self.draw_accumulated(ctx, &self.local_matrix_with(transform))
    }

    fn draw_accumulated(&self, ctx: &mut DrawContext<'_>, world: &Mat4) -> Result<u32> {
        let mut count = 0;
        for key in &self.drawables {
            if ctx.drawable(*key)?.render_if_visible(ctx, world)? {
                count += 1;
            }
        }
        for child in &self.children {
            count += child.draw(ctx, world)?;
        }
        Ok(count)
    }

    /// Depth-only traversal for the shadow pass.
    ///
    /// Nodes that do not cast shadows are skipped together with their
    /// subtree.
    pub fn draw_depth(&self, ctx: &mut DrawContext<'_>, shader: ShaderHandle, accumulated: &Mat4) -> Result<u32> {
        if !self.enabled || !self.casts_shadow {
            return Ok(0);
        }
        let world = *accumulated * self.local_matrix();

        let mut count = 0;
        for key in &self.drawables {
            if ctx.drawable(*key)?.render_depth_if_visible(ctx, shader, &world)? {
                count += 1;
            }
        }
        for child in &self.children {
            count += child.draw_depth(ctx, shader, &world)?;
        }
        Ok(count)
    }

    /// Submit `marker` at every world-space bounding-box corner of this
    /// subtree. Returns the number of markers drawn.
    pub fn draw_bounds(&self, ctx: &mut DrawContext<'_>, marker: MeshHandle, accumulated: &Mat4) -> Result<u32> {
        if !self.enabled {
            return Ok(0);
        }
        let world = *accumulated * self.local_matrix();

        let mut count = 0;
        for key in &self.drawables {
            let world_box = ctx.drawable(*key)?.world_bounding_box(&world);
            for corner in world_box.corners() {
                ctx.command_list().draw_mesh(marker, &Mat4::from_translation(*corner))?;
                count += 1;
            }
        }
        for child in &self.children {
            count += child.draw_bounds(ctx, marker, &world)?;
        }
        Ok(count)
    }

    // ===== TRANSFORMS =====

    /// Left-multiply the model matrix: `model = matrix · model`.
    pub fn transform(&mut self, matrix: &Mat4) {
        self.model_matrix = *matrix * self.model_matrix;
    }

    pub fn set_transform_matrix(&mut self, matrix: Mat4) {
        self.transform_matrix = matrix;
    }

    pub fn reset_model_matrix(&mut self) {
        self.model_matrix = Mat4::IDENTITY;
    }

    pub fn model_matrix(&self) -> &Mat4 {
        &self.model_matrix
    }

    pub fn transform_matrix(&self) -> &Mat4 {
        &self.transform_matrix
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the rotation around +Y, in degrees.
    pub fn yaw(&mut self, angle_degrees: f32) {
        self.yaw_degrees = angle_degrees;
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    /// Move along world axes: `z += forward`, `x += strafe_left`.
    pub fn translate_by(&mut self, forward: f32, strafe_left: f32) {
        self.position.z += forward;
        self.position.x += strafe_left;
    }

    pub fn starting_offset(&self) -> Vec3 {
        self.starting_offset
    }

    pub fn set_starting_offset(&mut self, offset: Vec3) {
        self.starting_offset = offset;
    }

    // ===== STATE =====

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_casts_shadow(&mut self, casts_shadow: bool) {
        self.casts_shadow = casts_shadow;
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &NodeRole {
        &self.role
    }

    pub fn role_mut(&mut self) -> &mut NodeRole {
        &mut self.role
    }

    /// Replace the role. Static colliders stop casting shadows.
    pub fn set_role(&mut self, role: NodeRole) {
        if matches!(role, NodeRole::StaticCollider) {
            self.casts_shadow = false;
        }
        self.role = role;
    }

    // ===== HIERARCHY =====

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn add_drawable(&mut self, key: DrawableKey) {
        self.drawables.push(key);
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        &mut self.children
    }

    pub fn drawables(&self) -> &[DrawableKey] {
        &self.drawables
    }

    /// First immediate child with this name (no recursion).
    pub fn find_child_by_name(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn find_child_by_name_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    // ===== ENEMY =====

    /// Step towards `player_position` at `speed` units per second.
    ///
    /// Heading is taken on the XZ plane; gravity pulls the controller down
    /// every step. The node follows the controller position and turns to
    /// face the player. Returns false if this node is not an enemy.
    pub fn chase(&mut self, player_position: Vec3, speed: f32, dt: f32) -> bool {
        let NodeRole::Enemy(enemy) = &mut self.role else {
            return false;
        };

        let controller = enemy.controller_mut();
        let delta = player_position - controller.position();
        let heading = Vec3::new(delta.x, 0.0, delta.z).normalize_or_zero();
        if heading != Vec3::ZERO {
            let angle = (-heading.z).atan2(heading.x).to_degrees();
            self.yaw_degrees = (90.0 + angle).rem_euclid(360.0);
        }

        let displacement = Vec3::new(heading.x * speed, ENEMY_GRAVITY, heading.z * speed) * dt;
        controller.move_by(displacement, dt);
        self.position = controller.position();
        true
    }

    /// Damage this enemy. A killed enemy respawns at its spawn position with
    /// full health. Returns `None` if this node is not an enemy.
    pub fn hit(&mut self, damage: i32) -> Option<HitResult> {
        let NodeRole::Enemy(enemy) = &mut self.role else {
            return None;
        };

        let hp = enemy.hit_with_damage(damage);
        if !enemy.is_dead() {
            return Some(HitResult::Survived { hp });
        }
        let spawn = enemy.spawn_position();
        self.respawn(spawn);
        Some(HitResult::Killed)
    }

    /// Teleport to `position`, re-enable and restore health.
    /// Returns false if this node is not an enemy.
    pub fn respawn(&mut self, position: Vec3) -> bool {
        let NodeRole::Enemy(enemy) = &mut self.role else {
            return false;
        };

        enemy.controller_mut().set_position(position);
        enemy.restore_hp();
        self.position = enemy.controller().position();
        self.enabled = true;
        true
    }

    // ===== CHARACTER =====

    /// Walk relative to the current heading and apply a gravity step.
    /// Returns false if this node is not the character.
    pub fn move_character(&mut self, forward: f32, strafe_left: f32, dt: f32) -> bool {
        let NodeRole::Character(character) = &mut self.role else {
            return false;
        };

        let (sin, cos) = self.yaw_degrees.to_radians().sin_cos();
        let displacement = Vec3::new(
            forward * sin + strafe_left * cos,
            CHARACTER_GRAVITY_STEP,
            forward * cos - strafe_left * sin,
        );
        let controller = character.controller_mut();
        controller.move_by(displacement, dt);
        self.position = controller.position();
        true
    }

    /// Teleport the character. Returns false if this node is not the character.
    pub fn relocate(&mut self, position: Vec3) -> bool {
        let NodeRole::Character(character) = &mut self.role else {
            return false;
        };

        character.controller_mut().set_position(position);
        self.position = character.controller().position();
        true
    }

    /// Set the character heading in degrees. Returns false if this node is
    /// not the character.
    pub fn update_rotation(&mut self, angle_degrees: f32) -> bool {
        if !self.role.is_character() {
            return false;
        }
        self.yaw(angle_degrees);
        true
    }
}

#[cfg(test)]
#[path = "scene_node_tests.rs"]
mod tests;
