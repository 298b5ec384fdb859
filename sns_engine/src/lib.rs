/*!
# Sun'n'Slaughter scene core

Scene graph, visibility culling and gameplay state for the Sun'n'Slaughter
game.

## Architecture

- **Frustum**: six half-space planes rebuilt from the camera every frame;
  classifies 8-corner bounding boxes as outside, intersecting or inside
- **SceneNode**: transform tree; traversals accumulate transforms top-down
  and return the number of draws issued
- **Drawable**: mesh handle plus model-space bounding box, culled against
  the frustum at draw time
- **SceneBuilder**: turns imported geometry into nodes, tagging enemies and
  static colliders by name prefix
- **CommandList**: draw submission seam to the renderer backend
- **CharacterController**: physics seam for enemies and the player
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod camera;
pub mod physics;
pub mod renderer;
pub mod scene;

// Main sns namespace module
pub mod sns {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine services (logging)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod config {
        pub use crate::config::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod physics {
        pub use crate::physics::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
