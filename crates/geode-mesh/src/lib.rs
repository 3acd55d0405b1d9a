//! Tile meshing for cube-sphere terrain: tile layout and addressing, the
//! tile mesh builder with sea/land/rock classification, and flat tile storage.

pub mod builder;
pub mod geometry;
pub mod layout;
pub mod tile_set;

pub use builder::{MeshContext, SurfaceParams, TileMeshBuilder, build_tile_set};
pub use geometry::{MeshGeometry, SubMesh, TileMeshes};
pub use layout::{LayoutError, MAX_TILE_VERTICES, SubMeshId, SurfaceKind, TileKey, TileLayout};
pub use tile_set::TileSet;
