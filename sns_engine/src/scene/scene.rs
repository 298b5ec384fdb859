/// Scene: top-level nodes, the drawable store and the culling frustum.
///
/// Drawables live in a SlotMap with stable keys; nodes reference them by
/// key. The frustum is refreshed from the camera once per frame and lent
/// read-only to the traversal, which returns the number of draws issued.

use std::fmt;
use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::camera::{Camera, Frustum};
use crate::config::{CameraSettings, GameConfig};
use crate::error::Result;
use crate::renderer::{CommandList, MeshHandle, ShaderHandle};
use crate::{engine_debug, engine_warn};
use super::drawable::{DrawContext, Drawable, DrawableKey};
use super::node_role::EnemyState;
use super::scene_node::SceneNode;

/// Default enemy chase speed in units per second
pub const DEFAULT_ENEMY_SPEED: f32 = 8.0;

/// Per-frame statistics for the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Draws issued this frame
    pub visible_objects: u32,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Objects: {}", self.visible_objects)
    }
}

pub struct Scene {
    /// Top-level nodes, drawn in insertion order
    nodes: Vec<SceneNode>,
    /// Top-level node name → index in `nodes` (first node wins)
    name_index: FxHashMap<String, usize>,
    drawables: SlotMap<DrawableKey, Drawable>,
    frustum: Frustum,
    enemy_speed: f32,
}

impl Scene {
    /// Empty scene with a frustum built from `camera`.
    pub fn new(camera: &CameraSettings) -> Result<Self> {
        Ok(Self {
            nodes: Vec::new(),
            name_index: FxHashMap::default(),
            drawables: SlotMap::with_key(),
            frustum: Frustum::new(camera)?,
            enemy_speed: DEFAULT_ENEMY_SPEED,
        })
    }

    /// Empty scene configured from a game config (projection, culling flag,
    /// enemy speed).
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let mut scene = Self::new(&config.camera)?;
        scene.frustum.set_culling_enabled(config.scene.culling_enabled);
        scene.enemy_speed = config.scene.enemy_speed;
        Ok(scene)
    }

    // ===== CONTENT =====

    pub fn insert_drawable(&mut self, drawable: Drawable) -> DrawableKey {
        self.drawables.insert(drawable)
    }

    pub fn drawable(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    pub fn drawable_mut(&mut self, key: DrawableKey) -> Option<&mut Drawable> {
        self.drawables.get_mut(key)
    }

    pub fn drawable_count(&self) -> usize {
        self.drawables.len()
    }

    /// Register a top-level node and return its index.
    pub fn add_node(&mut self, node: SceneNode) -> usize {
        let index = self.nodes.len();
        if self.name_index.contains_key(node.name()) {
            engine_warn!("sns::Scene", "Duplicate node name '{}'; lookups keep the first one", node.name());
        } else {
            self.name_index.insert(node.name().to_string(), index);
        }
        self.nodes.push(node);
        index
    }

    /// Top-level node by name
    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.name_index.get(name).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        let index = *self.name_index.get(name)?;
        self.nodes.get_mut(index)
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [SceneNode] {
        &mut self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.iter().filter(|node| node.role().is_enemy())
    }

    pub fn enemies_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> + '_ {
        self.nodes.iter_mut().filter(|node| node.role().is_enemy())
    }

    /// The player character node, if one was built
    pub fn character(&self) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.role().is_character())
    }

    pub fn character_mut(&mut self) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|node| node.role().is_character())
    }

    // ===== FRUSTUM =====

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    /// Flip frustum culling (debug) and return the new state.
    pub fn toggle_culling(&mut self) -> bool {
        self.frustum.toggle_culling()
    }

    // ===== GAMEPLAY =====

    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }

    pub fn set_enemy_speed(&mut self, speed: f32) {
        self.enemy_speed = speed;
    }

    /// Let every enabled enemy chase `player_position` for `dt` seconds.
    pub fn update_enemies(&mut self, player_position: Vec3, dt: f32) {
        let speed = self.enemy_speed;
        for enemy in self.enemies_mut().filter(|node| node.is_enabled()) {
            enemy.chase(player_position, speed, dt);
        }
    }

    /// Apply the contact damage of every enabled enemy within `range` of the
    /// character. Returns the total damage dealt (0 without a character).
    pub fn apply_enemy_contacts(&mut self, range: f32) -> i32 {
        let Some(player) = self.character().map(SceneNode::position) else {
            return 0;
        };
        let total = self
            .enemies()
            .filter(|node| node.is_enabled() && node.position().distance(player) <= range)
            .filter_map(|node| node.role().as_enemy().map(EnemyState::damage))
            .fold(0i32, i32::saturating_add);
        if total == 0 {
            return 0;
        }

        let Some(character) = self.character_mut() else {
            return 0;
        };
        let name = character.name().to_string();
        if let Some(state) = character.role_mut().as_character_mut() {
            let hp = state.inflict_damage(total);
            engine_debug!("sns::Scene", "'{}' took {} contact damage, {} hp left", name, total, hp);
        }
        total
    }

    // ===== FRAME =====

    /// Refresh the frustum from `camera`, then draw every top-level node.
    pub fn render_frame(&mut self, camera: &Camera, command_list: &mut dyn CommandList) -> Result<FrameStats> {
        camera.apply_to_frustum(&mut self.frustum)?;
        self.draw(command_list)
    }

    /// Draw with the current frustum, starting from the identity matrix.
    pub fn draw(&self, command_list: &mut dyn CommandList) -> Result<FrameStats> {
        let mut ctx = DrawContext::new(&self.frustum, &self.drawables, command_list);

        let mut visible_objects = 0;
        for node in &self.nodes {
            visible_objects += node.draw(&mut ctx, &Mat4::IDENTITY)?;
        }
        Ok(FrameStats { visible_objects })
    }

    /// Shadow pass: refresh the frustum, then draw depth-only with `shader`.
    pub fn render_depth_frame(
        &mut self,
        camera: &Camera,
        shader: ShaderHandle,
        command_list: &mut dyn CommandList,
    ) -> Result<FrameStats> {
        camera.apply_to_frustum(&mut self.frustum)?;
        let mut ctx = DrawContext::new(&self.frustum, &self.drawables, command_list);

        let mut visible_objects = 0;
        for node in &self.nodes {
            visible_objects += node.draw_depth(&mut ctx, shader, &Mat4::IDENTITY)?;
        }
        Ok(FrameStats { visible_objects })
    }

    /// Debug view: draw `marker` at every world-space bounding-box corner.
    /// Returns the number of markers drawn.
    pub fn draw_bounds_debug(&self, command_list: &mut dyn CommandList, marker: MeshHandle) -> Result<u32> {
        let mut ctx = DrawContext::new(&self.frustum, &self.drawables, command_list);

        let mut markers = 0;
        for node in &self.nodes {
            markers += node.draw_bounds(&mut ctx, marker, &Mat4::IDENTITY)?;
        }
        engine_debug!("sns::Scene", "Drew {} bounding-box markers", markers);
        Ok(markers)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
