//! Camera module: orbit camera, frustum and planes.
//!
//! The frustum is rebuilt from the camera once per frame and lent
//! read-only to the scene traversal for visibility culling.

mod camera;
mod frustum;
mod plane;

pub use camera::{Camera, DEFAULT_DISTANCE, MAX_PITCH};
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_TOP, PLANE_BOTTOM, PLANE_LEFT, PLANE_RIGHT, PLANE_NEAR, PLANE_FAR,
    CORNER_NTL, CORNER_NTR, CORNER_NBL, CORNER_NBR,
    CORNER_FTL, CORNER_FTR, CORNER_FBL, CORNER_FBR,
};
pub use plane::Plane;
