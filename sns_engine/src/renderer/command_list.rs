/// CommandList trait - submission seam between the scene and the renderer
///
/// The scene graph never talks to a graphics API directly. Each visible
/// drawable submits its mesh together with the accumulated world transform;
/// the backend decides how to bind and draw it.

use glam::Mat4;
use crate::error::Result;

/// Opaque handle to a mesh owned by the renderer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque handle to a shader program owned by the renderer backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Command list for submitting draws
pub trait CommandList {
    /// Submit a mesh for rendering with its world transform
    ///
    /// # Arguments
    ///
    /// * `mesh` - Mesh to draw
    /// * `transform` - Model-to-world matrix
    fn draw_mesh(&mut self, mesh: MeshHandle, transform: &Mat4) -> Result<()>;

    /// Submit a mesh to a depth-only pass (shadow map)
    ///
    /// # Arguments
    ///
    /// * `mesh` - Mesh to draw
    /// * `shader` - Depth shader to draw with
    /// * `transform` - Model-to-world matrix
    fn draw_mesh_depth(&mut self, mesh: MeshHandle, shader: ShaderHandle, transform: &Mat4) -> Result<()>;
}
