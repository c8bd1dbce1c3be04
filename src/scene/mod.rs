//! Scene Graph
//!
//! - Node: named node with transform, drawable and optional animation callback
//! - Transform: position, rotation, scale with cached matrices
//! - Scene: node arena with ordered top-level nodes and fog
//! - SceneManager: every scene of the session, plus the active pointer
//! - Camera: projections, visible extent, and the camera registry
//! - Fog: linear and exponential fog

pub mod camera;
pub mod fog;
pub mod manager;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::{Camera, CameraDescriptor, CameraRegistry, Projection};
pub use fog::{Fog, FogDescriptor, setup_fog};
pub use manager::{SceneHandle, SceneManager};
pub use node::{Mesh, Node, NodeKind};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
}
