//! Planet heightfield storage with cross-face edge stitching, and fractal
//! terrain synthesis over it.

mod heightfield;
mod params;
mod synthesis;

pub use heightfield::Heightfield;
pub use params::{TerrainError, TerrainParams};
pub use synthesis::diamond_square;
