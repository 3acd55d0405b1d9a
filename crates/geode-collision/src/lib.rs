//! Collision support for generated terrain: axis-aligned and oriented
//! bounding boxes with a separating-axis test, and a per-mesh triangle
//! octree answering "do these two transformed meshes touch?".

mod aabb;
mod obb;
mod octree;

pub use aabb::Aabb;
pub use obb::Obb;
pub use octree::{Octree, Triangle};
