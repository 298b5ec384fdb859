/// Renderer module - draw submission seam and the recording backend

pub mod command_list;
pub mod recording_command_list;

pub use command_list::{CommandList, MeshHandle, ShaderHandle};
pub use recording_command_list::{DrawCall, RecordingCommandList};
