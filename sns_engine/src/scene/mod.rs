//! Scene module
//!
//! Scene graph nodes, drawables with their culling gate, bounding volumes
//! and the builder that turns imported geometry into nodes.

mod bounding_box;
mod drawable;
mod node_role;
mod scene;
mod scene_builder;
mod scene_node;

pub use bounding_box::{BoundingBox, AABB};
pub use drawable::{DrawContext, Drawable, DrawableFlags, DrawableKey};
pub use node_role::{CharacterState, EnemyState, HitResult, NodeRole};
pub use scene::{FrameStats, Scene, DEFAULT_ENEMY_SPEED};
pub use scene_builder::{BuildReport, ImportedNode, MeshData, Placement, SceneBuilder};
pub use scene_node::{SceneNode, CHARACTER_GRAVITY_STEP, ENEMY_GRAVITY};
