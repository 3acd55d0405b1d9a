//! Tile mesh construction: sample a tile's node range, triangulate it, and
//! split the triangles into sea, land and rock sub-meshes.

use geode_cubesphere::FaceTransforms;
use geode_terrain::Heightfield;
use glam::{Vec2, Vec3};
use tracing::{debug, info};

use crate::geometry::{MeshGeometry, SubMesh, TileMeshes};
use crate::layout::{SurfaceKind, TileKey, TileLayout};
use crate::tile_set::TileSet;

/// Surface appearance parameters shared by every tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceParams {
    /// Radius of the zero-height sphere.
    pub planet_radius: f32,
    /// Sea level, in the same units as the heightfield.
    pub height_sea: f32,
    /// Average triangle height above which land becomes rock.
    pub height_rock: f32,
    /// Texture repeats across a whole face.
    pub texture_repeat: f32,
    /// Position scale for LOD > 0 tiles, which render in a scaled far scene.
    pub low_lod_scale: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            planet_radius: 1000.0,
            height_sea: 0.0,
            height_rock: 0.03,
            texture_repeat: 64.0,
            low_lod_scale: 1.0,
        }
    }
}

/// Read-only inputs for building tiles.
#[derive(Clone, Copy, Debug)]
pub struct MeshContext<'a> {
    /// Synthesized heights.
    pub heightfield: &'a Heightfield,
    /// Face-local to cube transforms.
    pub transforms: &'a FaceTransforms,
    /// Tile division.
    pub layout: &'a TileLayout,
    /// Sea/rock thresholds and scaling.
    pub surface: &'a SurfaceParams,
}

/// Reusable tile builder.
///
/// Owns the per-tile scratch buffers so consecutive builds do not
/// reallocate. Every [`build`](Self::build) starts from cleared scratch and
/// returns fully owned geometry.
#[derive(Debug, Default)]
pub struct TileMeshBuilder {
    heights: Vec<f32>,
    directions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    sea: Vec<u16>,
    land: Vec<u16>,
    rock: Vec<u16>,
    remap: Vec<u32>,
}

impl TileMeshBuilder {
    /// Create a builder with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.heights.clear();
        self.directions.clear();
        self.uvs.clear();
        self.sea.clear();
        self.land.clear();
        self.rock.clear();
    }

    /// Build the sub-meshes of one tile. Classifications with no triangles
    /// are left as `None`.
    ///
    /// # Panics
    ///
    /// Panics if `key` lies outside `ctx.layout`.
    pub fn build(&mut self, ctx: &MeshContext<'_>, key: TileKey) -> TileMeshes {
        let layout = ctx.layout;
        assert!(
            key.lod < layout.num_lods() && layout.cell_in_range(key.grid_x, key.grid_y),
            "tile {key:?} outside layout"
        );
        self.clear();

        let n = layout.num_nodes();
        let stride = layout.stride(key.lod);
        let samples = layout.span() / stride;
        let x0 = layout.first_node(key.grid_x);
        let y0 = layout.first_node(key.grid_y);
        let repeat = ctx.surface.texture_repeat;

        for j in 0..=samples {
            for i in 0..=samples {
                let (x, y) = (x0 + i * stride, y0 + j * stride);
                self.heights.push(ctx.heightfield.raw(key.face, x, y));
                self.directions
                    .push(ctx.transforms.node_direction(key.face, x, y, n));
                self.uvs
                    .push(Vec2::new(x as f32 / n as f32, y as f32 / n as f32) * repeat);
            }
        }

        let row = samples + 1;
        let (qx0, qy0) = (x0 / stride, y0 / stride);
        for j in 0..samples {
            for i in 0..samples {
                let a = (j * row + i) as u16;
                let b = a + 1;
                let d = a + row as u16;
                let c = d + 1;
                let tris = if (qx0 + i + qy0 + j) % 2 == 0 {
                    [[a, b, c], [a, c, d]]
                } else {
                    [[a, b, d], [b, c, d]]
                };
                for tri in tris {
                    self.classify(tri, ctx.surface);
                }
            }
        }

        let scale = if key.lod > 0 {
            ctx.surface.planet_radius * ctx.surface.low_lod_scale
        } else {
            ctx.surface.planet_radius
        };
        let sea_radius = (1.0 + ctx.surface.height_sea) * scale;

        let heights = &self.heights;
        let sea = compact(&self.sea, &mut self.remap, &self.directions, &self.uvs, |_, dir| {
            dir * sea_radius
        });
        let land_pos = |i: usize, dir: Vec3| dir * (1.0 + heights[i]) * scale;
        let land = compact(&self.land, &mut self.remap, &self.directions, &self.uvs, land_pos);
        let rock = compact(&self.rock, &mut self.remap, &self.directions, &self.uvs, land_pos);

        let wrap = |kind: SurfaceKind, geometry: Option<MeshGeometry>| {
            geometry.map(|g| SubMesh::new(key.sub_mesh(kind), g))
        };
        TileMeshes {
            sea: wrap(SurfaceKind::Sea, sea),
            land: wrap(SurfaceKind::Land, land),
            rock: wrap(SurfaceKind::Rock, rock),
        }
    }

    fn classify(&mut self, tri: [u16; 3], surface: &SurfaceParams) {
        let h = tri.map(|i| self.heights[i as usize]);
        if h.iter().any(|&v| v < surface.height_sea) {
            self.sea.extend_from_slice(&tri);
        }
        if h.iter().any(|&v| v >= surface.height_sea) {
            let average = (h[0] + h[1] + h[2]) / 3.0;
            if average > surface.height_rock {
                self.rock.extend_from_slice(&tri);
            } else {
                self.land.extend_from_slice(&tri);
            }
        }
    }
}

/// Copy the vertices referenced by `indices` into owned buffers, renumbering
/// them densely in first-use order.
fn compact(
    indices: &[u16],
    remap: &mut Vec<u32>,
    directions: &[Vec3],
    uvs: &[Vec2],
    position: impl Fn(usize, Vec3) -> Vec3,
) -> Option<MeshGeometry> {
    if indices.is_empty() {
        return None;
    }
    remap.clear();
    remap.resize(directions.len(), u32::MAX);

    let mut geometry = MeshGeometry {
        indices: Vec::with_capacity(indices.len()),
        ..Default::default()
    };
    for &src in indices {
        let src = src as usize;
        if remap[src] == u32::MAX {
            remap[src] = geometry.positions.len() as u32;
            let dir = directions[src];
            geometry.positions.push(position(src, dir));
            geometry.uvs.push(uvs[src]);
            geometry.normals.push(dir);
        }
        geometry.indices.push(remap[src] as u16);
    }
    Some(geometry)
}

/// Build every tile of every LOD with a single builder.
pub fn build_tile_set(ctx: &MeshContext<'_>) -> TileSet {
    let mut tiles = TileSet::new(*ctx.layout);
    let mut builder = TileMeshBuilder::new();
    for lod in 0..ctx.layout.num_lods() {
        let mut sub_meshes = 0usize;
        let mut triangles = 0usize;
        for (face, gx, gy) in ctx.layout.cells() {
            let key = TileKey::new(lod, face, gx, gy);
            let tile = builder.build(ctx, key);
            for sub in tile.iter() {
                sub_meshes += 1;
                triangles += sub.geometry.triangle_count();
            }
            debug!(?key, empty = tile.is_empty(), "Tile built");
            tiles.insert(key, tile);
        }
        info!(lod, sub_meshes, triangles, "LOD meshes built");
    }
    tiles
}
