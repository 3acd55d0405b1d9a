//! The generated planet and its runtime LOD state.

use geode_collision::Octree;
use geode_cubesphere::FaceTransforms;
use geode_lod::{LodStreamer, LodUpdate, SceneAttach};
use geode_mesh::{MeshContext, SubMeshId, TileLayout, TileSet, build_tile_set};
use geode_terrain::{Heightfield, diamond_square};
use glam::{DVec3, Mat4};
use tracing::{info, info_span};

use crate::error::PlanetError;
use crate::octree_pool::build_octrees;
use crate::settings::PlanetSettings;

/// A fully generated planet.
///
/// Geometry and octrees are immutable after [`generate`](Self::generate);
/// only the LOD streamer state changes at runtime.
#[derive(Debug)]
pub struct Planet {
    settings: PlanetSettings,
    heightfield: Heightfield,
    transforms: FaceTransforms,
    tiles: TileSet,
    streamer: LodStreamer,
}

impl Planet {
    /// Synthesize the heightfield, mesh every tile, and build LOD 0 octrees.
    ///
    /// # Errors
    ///
    /// Returns [`PlanetError`] if the settings are invalid. Nothing is
    /// generated in that case.
    pub fn generate(settings: PlanetSettings) -> Result<Self, PlanetError> {
        let _span = info_span!("planet_generate", seed = settings.terrain.seed).entered();
        settings.validate()?;
        let layout = settings.layout()?;
        let thresholds = settings.thresholds()?;

        let mut heightfield = Heightfield::new(settings.terrain.num_nodes as i32);
        diamond_square(&mut heightfield, &settings.terrain)?;

        let transforms = FaceTransforms::new();
        let mut tiles = build_tile_set(&MeshContext {
            heightfield: &heightfield,
            transforms: &transforms,
            layout: &layout,
            surface: &settings.surface,
        });

        let octrees = build_octrees(
            tiles.lod_slice_mut(0),
            settings.octree_max_depth,
            settings.worker_count(),
        );

        let streamer = LodStreamer::new(layout, thresholds, &transforms)?;
        info!(
            num_nodes = layout.num_nodes(),
            grid_count = layout.grid_count(),
            num_lods = layout.num_lods(),
            sub_meshes = tiles.sub_mesh_count(),
            octrees,
            "Planet generated"
        );

        Ok(Self {
            settings,
            heightfield,
            transforms,
            tiles,
            streamer,
        })
    }

    /// Settings the planet was generated from.
    pub fn settings(&self) -> &PlanetSettings {
        &self.settings
    }

    /// Synthesized heights.
    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    /// Face-local to cube transforms.
    pub fn transforms(&self) -> &FaceTransforms {
        &self.transforms
    }

    /// Tile division.
    pub fn layout(&self) -> &TileLayout {
        self.tiles.layout()
    }

    /// Every tile of every LOD.
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Runtime LOD state.
    pub fn streamer(&self) -> &LodStreamer {
        &self.streamer
    }

    /// Sub-meshes currently attached at full detail.
    pub fn high_detail(&self) -> impl Iterator<Item = SubMeshId> + '_ {
        self.streamer.high_detail().iter().copied()
    }

    /// Stream LODs for a viewer at `viewer`, relative to the planet center.
    pub fn update_visible(&mut self, viewer: DVec3, sink: &mut impl SceneAttach) -> LodUpdate {
        self.streamer.update(&self.tiles, viewer, sink)
    }

    /// Detach every tile.
    pub fn hide(&mut self, sink: &mut impl SceneAttach) -> LodUpdate {
        self.streamer.hide(&self.tiles, sink)
    }

    /// Full-detail sub-meshes whose octree overlaps `probe` placed by
    /// `probe_transform`, sorted. The planet sits at the origin.
    pub fn collisions(&self, probe: &Octree, probe_transform: &Mat4) -> Vec<SubMeshId> {
        let mut hits: Vec<SubMeshId> = self
            .streamer
            .high_detail()
            .iter()
            .copied()
            .filter(|&id| {
                self.tiles
                    .sub_mesh(id)
                    .and_then(|sub| sub.octree.as_ref())
                    .is_some_and(|octree| octree.collides(probe, &Mat4::IDENTITY, probe_transform))
            })
            .collect();
        hits.sort_unstable();
        hits
    }
}
