//! Errors from planet setup.

use geode_lod::LodError;
use geode_mesh::LayoutError;
use geode_terrain::TerrainError;

/// Any parameter rejected while setting up a planet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// Heightfield synthesis parameters.
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
    /// Tile sizes.
    #[error("tile layout: {0}")]
    Layout(#[from] LayoutError),
    /// LOD thresholds.
    #[error("lod: {0}")]
    Lod(#[from] LodError),
    /// Sea and rock levels out of order or not finite.
    #[error("height_sea ({sea}) must not exceed height_rock ({rock})")]
    SurfaceLevels {
        /// Sea level.
        sea: f32,
        /// Rock line.
        rock: f32,
    },
    /// A scale factor that must be positive is not.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidScale {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
}
