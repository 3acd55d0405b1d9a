//! Owned geometry buffers for generated tiles.

use geode_collision::Octree;
use glam::{Vec2, Vec3};

use crate::layout::{SubMeshId, SurfaceKind};

/// Vertex and index buffers for one sub-mesh.
///
/// Buffers are parallel: vertex `i` is `positions[i]`, `uvs[i]`, `normals[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshGeometry {
    /// Vertex positions in planet space.
    pub positions: Vec<Vec3>,
    /// Tiled texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Unit surface normals (the un-extruded sphere direction).
    pub normals: Vec<Vec3>,
    /// Triangle list, three indices per triangle, counter-clockwise from outside.
    pub indices: Vec<u16>,
}

impl MeshGeometry {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if there are no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// One classified piece of a tile.
#[derive(Clone, Debug)]
pub struct SubMesh {
    /// Which tile and classification this is.
    pub id: SubMeshId,
    /// Geometry buffers.
    pub geometry: MeshGeometry,
    /// Collision octree, built only for LOD 0.
    pub octree: Option<Octree>,
}

impl SubMesh {
    /// Wrap geometry without an octree.
    pub fn new(id: SubMeshId, geometry: MeshGeometry) -> Self {
        Self {
            id,
            geometry,
            octree: None,
        }
    }

    /// Build and store the collision octree for this sub-mesh.
    pub fn build_octree(&mut self, max_depth: u32) {
        self.octree = Some(Octree::build(
            &self.geometry.positions,
            &self.geometry.indices,
            max_depth,
        ));
    }
}

/// The up-to-three sub-meshes of one tile.
#[derive(Clone, Debug, Default)]
pub struct TileMeshes {
    /// Submerged triangles, flattened to sea level.
    pub sea: Option<SubMesh>,
    /// Land triangles at true height.
    pub land: Option<SubMesh>,
    /// High-elevation triangles at true height.
    pub rock: Option<SubMesh>,
}

impl TileMeshes {
    /// The sub-mesh of `kind`, if the tile has one.
    pub fn get(&self, kind: SurfaceKind) -> Option<&SubMesh> {
        match kind {
            SurfaceKind::Sea => self.sea.as_ref(),
            SurfaceKind::Land => self.land.as_ref(),
            SurfaceKind::Rock => self.rock.as_ref(),
        }
    }

    /// Present sub-meshes in [`SurfaceKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &SubMesh> {
        [&self.sea, &self.land, &self.rock]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Mutable access to the present sub-meshes.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SubMesh> {
        [&mut self.sea, &mut self.land, &mut self.rock]
            .into_iter()
            .filter_map(Option::as_mut)
    }

    /// Returns true if every classification came out empty.
    pub fn is_empty(&self) -> bool {
        self.sea.is_none() && self.land.is_none() && self.rock.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TileKey;
    use geode_cubesphere::CubeFace;

    fn triangle_geometry() -> MeshGeometry {
        MeshGeometry {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            normals: vec![Vec3::Z; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_build_octree_covers_geometry() {
        let id = TileKey::new(0, CubeFace::PosZ, 0, 0).sub_mesh(SurfaceKind::Land);
        let mut sub = SubMesh::new(id, triangle_geometry());
        assert!(sub.octree.is_none());
        sub.build_octree(3);
        let octree = sub.octree.as_ref().unwrap();
        assert_eq!(octree.triangle_count(), 1);
        for p in &sub.geometry.positions {
            assert!(octree.bounds().unwrap().contains_point(*p));
        }
    }

    #[test]
    fn test_tile_meshes_iteration_order() {
        let key = TileKey::new(1, CubeFace::NegX, 0, 0);
        let tile = TileMeshes {
            sea: Some(SubMesh::new(key.sub_mesh(SurfaceKind::Sea), triangle_geometry())),
            land: None,
            rock: Some(SubMesh::new(key.sub_mesh(SurfaceKind::Rock), triangle_geometry())),
        };
        let kinds: Vec<_> = tile.iter().map(|s| s.id.kind).collect();
        assert_eq!(kinds, vec![SurfaceKind::Sea, SurfaceKind::Rock]);
        assert!(tile.get(SurfaceKind::Land).is_none());
        assert!(!tile.is_empty());
        assert!(TileMeshes::default().is_empty());
    }

    #[test]
    fn test_geometry_counts() {
        let g = triangle_geometry();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.triangle_count(), 1);
        assert_eq!(g.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
        assert!(MeshGeometry::default().is_empty());
    }
}
