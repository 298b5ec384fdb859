/// RecordingCommandList - records every submitted draw.
///
/// Used as the render backend in tests and by the headless demo. It can be
/// told to fail after a number of draws to exercise error propagation.

use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;
use super::command_list::{CommandList, MeshHandle, ShaderHandle};

/// One recorded submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Mesh { mesh: MeshHandle, transform: Mat4 },
    Depth { mesh: MeshHandle, shader: ShaderHandle, transform: Mat4 },
}

impl DrawCall {
    pub fn mesh(&self) -> MeshHandle {
        match self {
            DrawCall::Mesh { mesh, .. } | DrawCall::Depth { mesh, .. } => *mesh,
        }
    }

    pub fn transform(&self) -> &Mat4 {
        match self {
            DrawCall::Mesh { transform, .. } | DrawCall::Depth { transform, .. } => transform,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingCommandList {
    draws: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl RecordingCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` draws, then fail every further one with `BackendError`.
    pub fn failing_after(count: usize) -> Self {
        Self { draws: Vec::new(), fail_after: Some(count) }
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }

    /// Meshes in submission order
    pub fn meshes(&self) -> Vec<MeshHandle> {
        self.draws.iter().map(DrawCall::mesh).collect()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    fn record(&mut self, call: DrawCall) -> Result<()> {
        if let Some(limit) = self.fail_after {
            if self.draws.len() >= limit {
                engine_bail!("sns::RecordingCommandList", BackendError,
                    "Draw of mesh {:?} rejected after {} draws", call.mesh(), limit);
            }
        }
        self.draws.push(call);
        Ok(())
    }
}

impl CommandList for RecordingCommandList {
    fn draw_mesh(&mut self, mesh: MeshHandle, transform: &Mat4) -> Result<()> {
        self.record(DrawCall::Mesh { mesh, transform: *transform })
    }

    fn draw_mesh_depth(&mut self, mesh: MeshHandle, shader: ShaderHandle, transform: &Mat4) -> Result<()> {
        self.record(DrawCall::Depth { mesh, shader, transform: *transform })
    }
}

#[cfg(test)]
#[path = "recording_command_list_tests.rs"]
mod tests;
