//! Validated planet parameters.

use geode_config::Config;
use geode_lod::{LodError, LodThresholds};
use geode_mesh::{SurfaceParams, TileLayout};
use geode_terrain::TerrainParams;

use crate::error::PlanetError;

/// Everything needed to generate a planet.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetSettings {
    /// Heightfield synthesis.
    pub terrain: TerrainParams,
    /// Radius, sea and rock levels, texturing.
    pub surface: SurfaceParams,
    /// Node intervals per tile side at LOD 0.
    pub max_verts_per_tile: u32,
    /// Number of LOD levels.
    pub num_lods: u8,
    /// Switching altitude per LOD, ascending.
    pub lod_altitudes: Vec<f64>,
    /// Maximum octree depth for LOD 0 sub-meshes.
    pub octree_max_depth: u32,
    /// Octree worker threads; 0 uses one per CPU.
    pub octree_workers: usize,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            terrain: TerrainParams::default(),
            surface: SurfaceParams::default(),
            max_verts_per_tile: 64,
            num_lods: 4,
            lod_altitudes: vec![100.0, 500.0, 2000.0, 8000.0],
            octree_max_depth: 5,
            octree_workers: 0,
        }
    }
}

impl PlanetSettings {
    /// Convert a loaded config and validate it.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanetError`] found by [`validate`](Self::validate).
    pub fn from_config(config: &Config) -> Result<Self, PlanetError> {
        let planet = &config.planet;
        let generation = &config.generation;
        let settings = Self {
            terrain: TerrainParams {
                num_nodes: generation.num_nodes,
                min_height: planet.min_height,
                max_height: planet.max_height,
                roughness: generation.roughness,
                seed: generation.seed,
            },
            surface: SurfaceParams {
                planet_radius: planet.radius as f32,
                height_sea: planet.height_sea,
                height_rock: planet.height_rock,
                texture_repeat: planet.texture_repeat,
                low_lod_scale: planet.low_lod_scale,
            },
            max_verts_per_tile: config.lod.max_verts_per_tile,
            num_lods: config.lod.num_lods,
            lod_altitudes: config.lod.altitudes.clone(),
            octree_max_depth: generation.octree_max_depth,
            octree_workers: generation.octree_workers,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check every parameter, in pipeline order.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanetError`] found.
    pub fn validate(&self) -> Result<(), PlanetError> {
        self.terrain.validate()?;
        self.layout()?;
        self.thresholds()?;
        let s = &self.surface;
        if !(s.height_sea <= s.height_rock) {
            return Err(PlanetError::SurfaceLevels {
                sea: s.height_sea,
                rock: s.height_rock,
            });
        }
        for (name, value) in [
            ("texture_repeat", s.texture_repeat),
            ("low_lod_scale", s.low_lod_scale),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PlanetError::InvalidScale { name, value });
            }
        }
        Ok(())
    }

    /// The tile layout these settings describe.
    ///
    /// # Errors
    ///
    /// Returns [`PlanetError::Layout`] for untileable sizes.
    pub fn layout(&self) -> Result<TileLayout, PlanetError> {
        Ok(TileLayout::new(
            self.terrain.num_nodes,
            self.max_verts_per_tile,
            self.num_lods,
        )?)
    }

    /// LOD thresholds for the configured radius.
    ///
    /// # Errors
    ///
    /// Returns [`PlanetError::Lod`] for bad altitudes or an altitude count
    /// that differs from `num_lods`.
    pub fn thresholds(&self) -> Result<LodThresholds, PlanetError> {
        let thresholds =
            LodThresholds::from_altitudes(&self.lod_altitudes, f64::from(self.surface.planet_radius))?;
        if thresholds.num_lods() != self.num_lods {
            return Err(LodError::LodCountMismatch {
                thresholds: self.lod_altitudes.len(),
                lods: self.num_lods as usize,
            }
            .into());
        }
        Ok(thresholds)
    }

    /// Worker count for the octree pool.
    pub fn worker_count(&self) -> usize {
        if self.octree_workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.octree_workers
        }
    }
}
