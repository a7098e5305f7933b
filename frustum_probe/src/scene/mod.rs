//! Scene module
//!
//! Node tree, geometry buffers and visibility layers of the host scene,
//! plus the per-frame image-space pass that draws distorted copies.

mod geometry;
mod layers;
mod node;
mod scene;
mod image_space_pass;

pub use geometry::{Geometry, Topology, AABB};
pub use layers::Layers;
pub use node::{Node, Transform};
pub use scene::{NodeKey, Scene};
pub use image_space_pass::ImageSpacePass;
