//! Level-of-detail streaming: altitude thresholds, per-cell LOD selection
//! with back-face culling and a full-detail neighborhood around the viewer,
//! and the attach interface used to hand tiles to a renderer.

mod scene;
mod streamer;
mod thresholds;

pub use scene::{LodContainer, SceneAttach};
pub use streamer::{LodStreamer, LodUpdate};
pub use thresholds::{LodError, LodThresholds};
