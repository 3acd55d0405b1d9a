//! Flat storage for every tile of every LOD.

use crate::geometry::{SubMesh, TileMeshes};
use crate::layout::{SubMeshId, TileKey, TileLayout};

/// All tiles of a planet in one array, indexed by [`TileLayout::index`].
///
/// LOD is the outermost dimension, so one LOD's tiles are contiguous.
#[derive(Clone, Debug)]
pub struct TileSet {
    layout: TileLayout,
    tiles: Vec<TileMeshes>,
}

impl TileSet {
    /// Storage for `layout` with every tile empty.
    pub fn new(layout: TileLayout) -> Self {
        let tiles = vec![TileMeshes::default(); layout.tile_count()];
        Self { layout, tiles }
    }

    /// The layout this storage was sized for.
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Store a tile, replacing any previous one.
    pub fn insert(&mut self, key: TileKey, tile: TileMeshes) {
        let i = self.layout.index(key);
        self.tiles[i] = tile;
    }

    /// The tile at `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` lies outside the layout.
    pub fn get(&self, key: TileKey) -> &TileMeshes {
        &self.tiles[self.layout.index(key)]
    }

    /// Look up a sub-mesh by id; `None` if it is outside the layout or was
    /// empty when built.
    pub fn sub_mesh(&self, id: SubMeshId) -> Option<&SubMesh> {
        let key = id.tile();
        if key.lod >= self.layout.num_lods() || !self.layout.cell_in_range(key.grid_x, key.grid_y) {
            return None;
        }
        self.get(key).get(id.kind)
    }

    /// Every tile of one LOD, in cell-index order.
    pub fn lod_slice(&self, lod: u8) -> &[TileMeshes] {
        let per = self.layout.tiles_per_lod();
        let start = lod as usize * per;
        &self.tiles[start..start + per]
    }

    /// Mutable tiles of one LOD, in cell-index order.
    pub fn lod_slice_mut(&mut self, lod: u8) -> &mut [TileMeshes] {
        let per = self.layout.tiles_per_lod();
        let start = lod as usize * per;
        &mut self.tiles[start..start + per]
    }

    /// Every tile with its key, in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = (TileKey, &TileMeshes)> {
        self.layout.keys().zip(self.tiles.iter())
    }

    /// Number of non-empty sub-meshes across all tiles.
    pub fn sub_mesh_count(&self) -> usize {
        self.tiles.iter().map(|t| t.iter().count()).sum()
    }
}
