//! Parallel collision octree construction.
//!
//! Sub-meshes are handed out over a bounded channel to a fixed set of scoped
//! worker threads. Each task owns a distinct `&mut SubMesh`, and the scope
//! joins every worker before returning.

use geode_mesh::{SubMesh, TileMeshes};
use tracing::{debug, info};

/// Queue slots per worker.
const QUEUE_DEPTH_PER_WORKER: usize = 4;

/// Build an octree of `max_depth` for every sub-mesh in `tiles`, using up to
/// `workers` threads. Returns the number of octrees built.
pub fn build_octrees(tiles: &mut [TileMeshes], max_depth: u32, workers: usize) -> usize {
    let jobs: usize = tiles.iter().map(|t| t.iter().count()).sum();
    if jobs == 0 {
        return 0;
    }
    let workers = workers.clamp(1, jobs);
    info!(jobs, workers, max_depth, "Octree pool started");

    let (tx, rx) = crossbeam_channel::bounded::<&mut SubMesh>(workers * QUEUE_DEPTH_PER_WORKER);
    let built = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let rx = rx.clone();
                scope.spawn(move || {
                    let mut count = 0usize;
                    while let Ok(sub) = rx.recv() {
                        sub.build_octree(max_depth);
                        count += 1;
                    }
                    debug!(count, "Octree worker finished");
                    count
                })
            })
            .collect();
        drop(rx);

        for sub in tiles.iter_mut().flat_map(TileMeshes::iter_mut) {
            if tx.send(sub).is_err() {
                break;
            }
        }
        drop(tx);

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .sum::<usize>()
    });

    info!(built, "Octree pool finished");
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_cubesphere::CubeFace;
    use geode_mesh::{MeshGeometry, SurfaceKind, TileKey};
    use glam::{Vec2, Vec3};

    fn tile(grid_x: i32, kinds: &[SurfaceKind]) -> TileMeshes {
        let key = TileKey::new(0, CubeFace::PosY, grid_x, 0);
        let geometry = MeshGeometry {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE],
            uvs: vec![Vec2::ZERO; 4],
            normals: vec![Vec3::Z; 4],
            indices: vec![0, 1, 2, 1, 3, 2],
        };
        let mut meshes = TileMeshes::default();
        for &kind in kinds {
            let sub = Some(SubMesh::new(key.sub_mesh(kind), geometry.clone()));
            match kind {
                SurfaceKind::Sea => meshes.sea = sub,
                SurfaceKind::Land => meshes.land = sub,
                SurfaceKind::Rock => meshes.rock = sub,
            }
        }
        meshes
    }

    #[test]
    fn test_every_sub_mesh_gets_an_octree() {
        let mut tiles: Vec<_> = (0..10)
            .map(|i| tile(i, &[SurfaceKind::Sea, SurfaceKind::Rock]))
            .collect();
        tiles.push(TileMeshes::default());
        let built = build_octrees(&mut tiles, 3, 4);
        assert_eq!(built, 20);
        for sub in tiles.iter().flat_map(TileMeshes::iter) {
            let octree = sub.octree.as_ref().expect("octree missing");
            assert_eq!(octree.triangle_count(), 2);
        }
    }

    #[test]
    fn test_more_workers_than_jobs() {
        let mut tiles = vec![tile(0, &[SurfaceKind::Land])];
        assert_eq!(build_octrees(&mut tiles, 2, 64), 1);
        assert!(tiles[0].land.as_ref().unwrap().octree.is_some());
    }

    #[test]
    fn test_single_worker_matches_many() {
        let mut one: Vec<_> = (0..6).map(|i| tile(i, &[SurfaceKind::Land])).collect();
        let mut many = one.clone();
        build_octrees(&mut one, 4, 1);
        build_octrees(&mut many, 4, 8);
        for (a, b) in one.iter().zip(&many) {
            let (a, b) = (a.land.as_ref().unwrap(), b.land.as_ref().unwrap());
            let (oa, ob) = (a.octree.as_ref().unwrap(), b.octree.as_ref().unwrap());
            assert_eq!(oa.bounds(), ob.bounds());
            assert_eq!(oa.node_count(), ob.node_count());
        }
    }

    #[test]
    fn test_no_jobs() {
        let mut tiles = vec![TileMeshes::default(); 3];
        assert_eq!(build_octrees(&mut tiles, 4, 0), 0);
    }
}
