//! The narrow interface between the streamer and whatever renders tiles.

use geode_mesh::SubMeshId;
use rustc_hash::FxHashMap;

/// Where an attached sub-mesh is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LodContainer {
    /// Full-detail scene (LOD 0).
    Near,
    /// Scaled far scene (LOD > 0).
    Far,
}

impl LodContainer {
    /// Container for tiles of `lod`.
    pub fn for_lod(lod: u8) -> Self {
        if lod == 0 { Self::Near } else { Self::Far }
    }
}

/// Receives attach and detach requests from the LOD streamer.
pub trait SceneAttach {
    /// Attach `id` to `container`, or detach it when `container` is `None`.
    fn attach_to(&mut self, id: SubMeshId, container: Option<LodContainer>);
}

/// Discards every request.
impl SceneAttach for () {
    fn attach_to(&mut self, _id: SubMeshId, _container: Option<LodContainer>) {}
}

/// Mirrors the attached set: attach inserts, detach removes.
impl SceneAttach for FxHashMap<SubMeshId, LodContainer> {
    fn attach_to(&mut self, id: SubMeshId, container: Option<LodContainer>) {
        match container {
            Some(c) => {
                self.insert(id, c);
            }
            None => {
                self.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_cubesphere::CubeFace;
    use geode_mesh::{SurfaceKind, TileKey};

    #[test]
    fn test_container_for_lod() {
        assert_eq!(LodContainer::for_lod(0), LodContainer::Near);
        assert_eq!(LodContainer::for_lod(1), LodContainer::Far);
        assert_eq!(LodContainer::for_lod(7), LodContainer::Far);
    }

    #[test]
    fn test_map_mirrors_attachment() {
        let id = TileKey::new(0, CubeFace::PosX, 0, 0).sub_mesh(SurfaceKind::Land);
        let mut scene = FxHashMap::default();
        scene.attach_to(id, Some(LodContainer::Near));
        assert_eq!(scene.get(&id), Some(&LodContainer::Near));
        scene.attach_to(id, None);
        assert!(scene.is_empty());
        ().attach_to(id, Some(LodContainer::Far));
    }
}
