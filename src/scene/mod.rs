//! Scene graph module
//!
//! The ownership tree of scene nodes behind every entity:
//! - Node: scene node with hierarchy, transform, optional bounds and owner
//! - Transform: position, rotation, scale with cached matrices
//! - Scene: the node arena, asset instantiation, world matrices and ray picking
//! - Camera: picking camera and the external camera rig boundary

pub mod bounds;
pub mod camera;
pub mod node;
pub mod scene;
pub mod transform;

pub use bounds::{BoundingBox, Ray};
pub use camera::{Camera, CameraMove, CameraRig, RecordingRig};
pub use node::Node;
pub use scene::{Scene, SceneHit};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
