/// Drawable: a mesh plus its model-space bounding box.
///
/// Drawables are stored in the scene's slot map and referenced by key from
/// scene nodes. Each one consults the frustum before submitting its draw.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::camera::{Frustum, FrustumTest};
use crate::error::Result;
use crate::engine_err;
use crate::renderer::{CommandList, MeshHandle, ShaderHandle};
use super::bounding_box::BoundingBox;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Drawable within a Scene.
    pub struct DrawableKey;
}

// ===== FLAGS =====

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawableFlags: u32 {
        /// Skip the frustum test (player character)
        const ALWAYS_VISIBLE = 1 << 0;
        /// Rendered into the shadow depth pass
        const CASTS_SHADOW = 1 << 1;
    }
}

impl Default for DrawableFlags {
    fn default() -> Self {
        DrawableFlags::CASTS_SHADOW
    }
}

// ===== DRAW CONTEXT =====

/// Per-traversal state lent to every node and drawable.
pub struct DrawContext<'a> {
    frustum: &'a Frustum,
    drawables: &'a SlotMap<DrawableKey, Drawable>,
    command_list: &'a mut dyn CommandList,
}

impl<'a> DrawContext<'a> {
    pub fn new(
        frustum: &'a Frustum,
        drawables: &'a SlotMap<DrawableKey, Drawable>,
        command_list: &'a mut dyn CommandList,
    ) -> Self {
        Self { frustum, drawables, command_list }
    }

    pub fn frustum(&self) -> &'a Frustum {
        self.frustum
    }

    /// Resolve a drawable key.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the key does not belong to this scene.
    pub fn drawable(&self, key: DrawableKey) -> Result<&'a Drawable> {
        self.drawables.get(key).ok_or_else(|| {
            engine_err!("sns::DrawContext", InvalidResource, "Unknown drawable key {:?}", key)
        })
    }

    pub fn command_list(&mut self) -> &mut dyn CommandList {
        &mut *self.command_list
    }
}

// ===== DRAWABLE =====

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    mesh: MeshHandle,
    /// Model-space corners
    bounding_box: BoundingBox,
    flags: DrawableFlags,
}

impl Drawable {
    pub fn new(mesh: MeshHandle, bounding_box: BoundingBox) -> Self {
        Self { mesh, bounding_box, flags: DrawableFlags::default() }
    }

    pub fn with_flags(mut self, flags: DrawableFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn flags(&self) -> DrawableFlags {
        self.flags
    }

    pub fn set_always_visible(&mut self, always_visible: bool) {
        self.flags.set(DrawableFlags::ALWAYS_VISIBLE, always_visible);
    }

    pub fn is_always_visible(&self) -> bool {
        self.flags.contains(DrawableFlags::ALWAYS_VISIBLE)
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags.contains(DrawableFlags::CASTS_SHADOW)
    }

    /// Shift the stored corners by `delta` (model-space correction).
    pub fn update_bounding_box(&mut self, delta: Vec3) {
        self.bounding_box.translate(delta);
    }

    /// Bounding box carried into world space by `accumulated`.
    pub fn world_bounding_box(&self, accumulated: &Mat4) -> BoundingBox {
        self.bounding_box.transformed(accumulated)
    }

    /// True if this drawable would be submitted under `accumulated`.
    pub fn is_visible(&self, frustum: &Frustum, accumulated: &Mat4) -> bool {
        self.is_always_visible()
            || frustum.classify(&self.world_bounding_box(accumulated)) != FrustumTest::Outside
    }

    /// Submit the mesh unless its world box is outside the frustum.
    ///
    /// Returns whether a draw was issued.
    pub fn render_if_visible(&self, ctx: &mut DrawContext<'_>, accumulated: &Mat4) -> Result<bool> {
        if !self.is_visible(ctx.frustum(), accumulated) {
            return Ok(false);
        }
        ctx.command_list().draw_mesh(self.mesh, accumulated)?;
        Ok(true)
    }

    /// Depth-pass variant of `render_if_visible`. Drawables that do not cast
    /// shadows are never submitted.
    pub fn render_depth_if_visible(
        &self,
        ctx: &mut DrawContext<'_>,
        shader: ShaderHandle,
        accumulated: &Mat4,
    ) -> Result<bool> {
        if !self.casts_shadow() || !self.is_visible(ctx.frustum(), accumulated) {
            return Ok(false);
        }
        ctx.command_list().draw_mesh_depth(self.mesh, shader, accumulated)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "drawable_tests.rs"]
mod tests;
