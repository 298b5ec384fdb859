/// SceneBuilder: turns imported geometry into scene nodes and drawables.
///
/// The importer hands over a node tree with raw vertex positions per mesh.
/// The builder computes bounding boxes, assigns roles from name prefixes
/// and registers the first-level nodes that carry geometry with the scene.
/// The imported root itself is never drawn.

use glam::{Mat4, Vec3};
use crate::config::SceneSettings;
use crate::error::Result;
use crate::physics::{ControllerDesc, ControllerFactory};
use crate::renderer::MeshHandle;
use crate::{engine_bail, engine_debug, engine_info};
use super::bounding_box::AABB;
use super::drawable::{Drawable, DrawableFlags};
use super::node_role::{CharacterState, EnemyState, NodeRole};
use super::scene::Scene;
use super::scene_node::SceneNode;

/// One mesh of an imported node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    /// Renderer-side mesh the drawable submits
    pub mesh: MeshHandle,
    /// Model-space vertex positions
    pub positions: Vec<Vec3>,
}

/// Node of an imported model hierarchy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportedNode {
    pub name: String,
    pub meshes: Vec<MeshData>,
    pub children: Vec<ImportedNode>,
}

impl ImportedNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_child(mut self, child: ImportedNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Placement applied to the registered nodes of one build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Uniform scale
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self { position: Vec3::ZERO, scale: 1.0 }
    }
}

/// Result of building one imported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// First-level nodes registered with the scene
    pub nodes: usize,
    pub enemies: usize,
    pub static_colliders: usize,
    pub drawables: usize,
}

pub struct SceneBuilder<'a> {
    settings: SceneSettings,
    factory: &'a mut dyn ControllerFactory,
    placement: Placement,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(settings: &SceneSettings, factory: &'a mut dyn ControllerFactory) -> Self {
        Self {
            settings: settings.clone(),
            factory,
            placement: Placement::default(),
        }
    }

    /// Position and uniform scale for the nodes built next.
    pub fn with_placement(mut self, position: Vec3, scale: f32) -> Self {
        self.placement = Placement { position, scale };
        self
    }

    pub fn set_placement(&mut self, position: Vec3, scale: f32) {
        self.placement = Placement { position, scale };
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Import a model: every first-level child of `root` with at least one
    /// mesh becomes a top-level scene node (with its whole subtree).
    ///
    /// # Errors
    ///
    /// `InvalidResource` for meshes without vertices or an invalid scale;
    /// controller creation errors are forwarded.
    pub fn build(&mut self, scene: &mut Scene, root: &ImportedNode) -> Result<BuildReport> {
        self.check_placement()?;

        let mut report = BuildReport::default();
        for child in root.children.iter().filter(|child| !child.meshes.is_empty()) {
            let node = self.build_top_level(scene, child, &mut report)?;
            match node.role() {
                NodeRole::Enemy(_) => report.enemies += 1,
                NodeRole::StaticCollider => report.static_colliders += 1,
                NodeRole::Prop | NodeRole::Character(_) => {}
            }
            scene.add_node(node);
            report.nodes += 1;
        }

        engine_info!("sns::SceneBuilder",
            "Built '{}': {} nodes ({} enemies, {} static), {} drawables",
            root.name, report.nodes, report.enemies, report.static_colliders, report.drawables);
        Ok(report)
    }

    /// Import the player character: the first first-level child with a mesh
    /// becomes the character node. Its first drawable skips culling.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if no child carries a mesh.
    pub fn build_character(&mut self, scene: &mut Scene, root: &ImportedNode) -> Result<()> {
        self.check_placement()?;

        let Some(source) = root.children.iter().find(|child| !child.meshes.is_empty()) else {
            engine_bail!("sns::SceneBuilder", InvalidResource,
                "Character model '{}' has no node with geometry", root.name);
        };

        let mut report = BuildReport::default();
        let mut node = self.build_subtree(scene, source, &mut report)?;
        self.place(&mut node);

        let extents = node_extents(source)?;
        let controller = self.factory.create_controller(&ControllerDesc {
            position: self.placement.position,
            half_extents: extents.half_extents() * self.placement.scale,
        })?;
        node.set_starting_offset(-extents.center() * self.placement.scale);
        node.set_role(NodeRole::Character(CharacterState::new(controller, self.settings.character_hp)));

        if let Some(first) = node.drawables().first().copied() {
            if let Some(drawable) = scene.drawable_mut(first) {
                drawable.set_always_visible(true);
            }
        }

        engine_info!("sns::SceneBuilder", "Built character '{}' from '{}'", source.name, root.name);
        scene.add_node(node);
        Ok(())
    }

    fn check_placement(&self) -> Result<()> {
        let Placement { position, scale } = self.placement;
        if !position.is_finite() || !scale.is_finite() || scale <= 0.0 {
            engine_bail!("sns::SceneBuilder", InvalidResource,
                "Invalid placement: position {}, scale {}", position, scale);
        }
        Ok(())
    }

    fn place(&self, node: &mut SceneNode) {
        node.set_position(self.placement.position);
        node.transform(&Mat4::from_scale(Vec3::splat(self.placement.scale)));
    }

    fn build_top_level(&mut self, scene: &mut Scene, source: &ImportedNode, report: &mut BuildReport) -> Result<SceneNode> {
        let mut node = self.build_subtree(scene, source, report)?;
        self.place(&mut node);

        if source.name.starts_with(&self.settings.enemy_prefix) {
            let extents = node_extents(source)?;
            let controller = self.factory.create_controller(&ControllerDesc {
                position: self.placement.position,
                half_extents: extents.half_extents() * self.placement.scale,
            })?;
            node.set_position(controller.position());
            node.set_starting_offset(-extents.center() * self.placement.scale);
            node.set_role(NodeRole::Enemy(EnemyState::new(
                controller,
                self.settings.enemy_hp,
                self.settings.enemy_damage,
            )));
            engine_debug!("sns::SceneBuilder", "Enemy '{}' spawns at {}", source.name, node.position());
        } else if source.name.starts_with(&self.settings.static_prefix) {
            node.set_role(NodeRole::StaticCollider);
        }

        Ok(node)
    }

    /// Node with one drawable per mesh, children built recursively (all of
    /// them, with or without geometry).
    fn build_subtree(&mut self, scene: &mut Scene, source: &ImportedNode, report: &mut BuildReport) -> Result<SceneNode> {
        let mut node = SceneNode::new(source.name.clone());

        for mesh in &source.meshes {
            let bounding_box = mesh_extents(mesh)?.corners();
            let key = scene.insert_drawable(
                Drawable::new(mesh.mesh, bounding_box).with_flags(DrawableFlags::CASTS_SHADOW),
            );
            node.add_drawable(key);
            report.drawables += 1;
        }

        for child in &source.children {
            node.add_child(self.build_subtree(scene, child, report)?);
        }
        Ok(node)
    }
}

/// Union of the vertex extents of all meshes of `source`.
fn node_extents(source: &ImportedNode) -> Result<AABB> {
    let mut extents: Option<AABB> = None;
    for mesh in &source.meshes {
        let aabb = mesh_extents(mesh)?;
        extents = Some(match extents {
            Some(total) => AABB { min: total.min.min(aabb.min), max: total.max.max(aabb.max) },
            None => aabb,
        });
    }
    match extents {
        Some(extents) => Ok(extents),
        None => {
            engine_bail!("sns::SceneBuilder", InvalidResource, "Node '{}' has no meshes", source.name)
        }
    }
}

fn mesh_extents(mesh: &MeshData) -> Result<AABB> {
    if mesh.positions.is_empty() {
        engine_bail!("sns::SceneBuilder", InvalidResource, "Mesh '{}' has no vertices", mesh.name);
    }
    AABB::from_points(&mesh.positions)
}

#[cfg(test)]
#[path = "scene_builder_tests.rs"]
mod tests;
