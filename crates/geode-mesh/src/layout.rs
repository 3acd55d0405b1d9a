//! Tile addressing: how each face is cut into tiles at every LOD, and the
//! flat index every per-tile array uses.

use geode_cubesphere::CubeFace;

/// Largest vertex count a 16-bit index buffer can address.
pub const MAX_TILE_VERTICES: u32 = 1 << 16;

/// Errors from rejected tile layouts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Nodes per face side must be `2^k + 1` and at least 3.
    #[error("num_nodes must be 2^k + 1 and at least 3, got {0}")]
    InvalidNumNodes(u32),
    /// The tile span must be a power of two no larger than `num_nodes - 1`.
    #[error("max_verts_per_tile must be a power of two in 1..={max}, got {span}")]
    InvalidSpan {
        /// Requested span.
        span: u32,
        /// `num_nodes - 1`.
        max: u32,
    },
    /// A tile of this span would need more than 65536 vertices.
    #[error("tile span {0} needs more than {MAX_TILE_VERTICES} vertices")]
    SpanTooLarge(u32),
    /// At least one LOD is required.
    #[error("at least one LOD level is required")]
    NoLods,
    /// The coarsest LOD would sample fewer than two nodes per tile side.
    #[error("{num_lods} LOD levels need a tile span of at least {needed}, got {span}")]
    TooManyLods {
        /// Requested LOD count.
        num_lods: u8,
        /// Required span.
        needed: u32,
        /// Configured span.
        span: u32,
    },
}

/// Which classification a sub-mesh holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceKind {
    /// Triangles with a vertex below sea level, flattened to sea level.
    Sea,
    /// Triangles at or above sea level with average height up to the rock line.
    Land,
    /// Triangles at or above sea level with average height above the rock line.
    Rock,
}

impl SurfaceKind {
    /// All kinds in storage order.
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::Sea, SurfaceKind::Land, SurfaceKind::Rock];
}

/// Address of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Level of detail; 0 is the finest.
    pub lod: u8,
    /// Cube face.
    pub face: CubeFace,
    /// Tile column on the face.
    pub grid_x: i32,
    /// Tile row on the face.
    pub grid_y: i32,
}

impl TileKey {
    /// Construct a key.
    pub const fn new(lod: u8, face: CubeFace, grid_x: i32, grid_y: i32) -> Self {
        Self {
            lod,
            face,
            grid_x,
            grid_y,
        }
    }

    /// Identifier of this tile's sub-mesh of `kind`.
    pub fn sub_mesh(self, kind: SurfaceKind) -> SubMeshId {
        SubMeshId {
            lod: self.lod,
            face: self.face,
            grid_x: self.grid_x,
            grid_y: self.grid_y,
            kind,
        }
    }
}

/// Stable handle naming one sub-mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubMeshId {
    /// Level of detail.
    pub lod: u8,
    /// Cube face.
    pub face: CubeFace,
    /// Tile column on the face.
    pub grid_x: i32,
    /// Tile row on the face.
    pub grid_y: i32,
    /// Classification.
    pub kind: SurfaceKind,
}

impl SubMeshId {
    /// The tile this sub-mesh belongs to.
    pub fn tile(self) -> TileKey {
        TileKey::new(self.lod, self.face, self.grid_x, self.grid_y)
    }
}

/// How faces are divided into tiles at each LOD.
///
/// Every LOD uses the same `grid_count × grid_count` tiles per face; coarser
/// LODs sample the tile's node range with a stride of `2^lod`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    num_nodes: i32,
    span: i32,
    grid_count: i32,
    num_lods: u8,
}

impl TileLayout {
    /// Validate and build a layout.
    ///
    /// `max_verts_per_tile` is the number of node intervals a tile spans
    /// along each side at LOD 0.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the sizes cannot be tiled exactly, a tile
    /// would overflow 16-bit indices, or the coarsest LOD would be empty.
    pub fn new(num_nodes: u32, max_verts_per_tile: u32, num_lods: u8) -> Result<Self, LayoutError> {
        if num_nodes < 3 || num_nodes > (1 << 20) + 1 || !(num_nodes - 1).is_power_of_two() {
            return Err(LayoutError::InvalidNumNodes(num_nodes));
        }
        let intervals = num_nodes - 1;
        let span = max_verts_per_tile;
        if span == 0 || !span.is_power_of_two() || span > intervals {
            return Err(LayoutError::InvalidSpan { span, max: intervals });
        }
        if u64::from(span + 1).pow(2) > u64::from(MAX_TILE_VERTICES) {
            return Err(LayoutError::SpanTooLarge(span));
        }
        if num_lods == 0 {
            return Err(LayoutError::NoLods);
        }
        let needed = 1u32.checked_shl(u32::from(num_lods) - 1).unwrap_or(u32::MAX);
        if needed > span {
            return Err(LayoutError::TooManyLods { num_lods, needed, span });
        }
        Ok(Self {
            num_nodes: num_nodes as i32,
            span: span as i32,
            grid_count: (intervals / span) as i32,
            num_lods,
        })
    }

    /// Nodes per face side.
    pub fn num_nodes(&self) -> i32 {
        self.num_nodes
    }

    /// Node intervals per tile side at LOD 0.
    pub fn span(&self) -> i32 {
        self.span
    }

    /// Tiles per face side.
    pub fn grid_count(&self) -> i32 {
        self.grid_count
    }

    /// Number of LOD levels.
    pub fn num_lods(&self) -> u8 {
        self.num_lods
    }

    /// Node stride at `lod`.
    pub fn stride(&self, lod: u8) -> i32 {
        1 << lod
    }

    /// Tiles in one LOD level.
    pub fn tiles_per_lod(&self) -> usize {
        6 * (self.grid_count * self.grid_count) as usize
    }

    /// Tiles across all LOD levels.
    pub fn tile_count(&self) -> usize {
        self.tiles_per_lod() * self.num_lods as usize
    }

    /// Flat index of `key`; LOD-major, then face, column, row.
    ///
    /// # Panics
    ///
    /// Panics if `key` lies outside the layout.
    pub fn index(&self, key: TileKey) -> usize {
        assert!(
            key.lod < self.num_lods && self.cell_in_range(key.grid_x, key.grid_y),
            "tile {key:?} outside layout {self:?}"
        );
        let g = self.grid_count as usize;
        ((key.lod as usize * 6 + key.face.index()) * g + key.grid_x as usize) * g + key.grid_y as usize
    }

    /// Index of a cell within one LOD level; used for per-cell state.
    pub fn cell_index(&self, face: CubeFace, grid_x: i32, grid_y: i32) -> usize {
        let g = self.grid_count as usize;
        (face.index() * g + grid_x as usize) * g + grid_y as usize
    }

    /// True if `(grid_x, grid_y)` is a tile on a face.
    pub fn cell_in_range(&self, grid_x: i32, grid_y: i32) -> bool {
        (0..self.grid_count).contains(&grid_x) && (0..self.grid_count).contains(&grid_y)
    }

    /// First node of a tile along one axis.
    pub fn first_node(&self, grid: i32) -> i32 {
        grid * self.span
    }

    /// Node at the center of a tile.
    pub fn center_node(&self, grid_x: i32, grid_y: i32) -> (i32, i32) {
        let half = self.span / 2;
        (grid_x * self.span + half, grid_y * self.span + half)
    }

    /// Every tile key in flat-index order.
    pub fn keys(&self) -> impl Iterator<Item = TileKey> + '_ {
        (0..self.num_lods).flat_map(move |lod| {
            CubeFace::ALL.into_iter().flat_map(move |face| {
                (0..self.grid_count).flat_map(move |gx| {
                    (0..self.grid_count).map(move |gy| TileKey::new(lod, face, gx, gy))
                })
            })
        })
    }

    /// Every `(face, grid_x, grid_y)` cell in cell-index order.
    pub fn cells(&self) -> impl Iterator<Item = (CubeFace, i32, i32)> + '_ {
        CubeFace::ALL.into_iter().flat_map(move |face| {
            (0..self.grid_count).flat_map(move |gx| (0..self.grid_count).map(move |gy| (face, gx, gy)))
        })
    }
}
