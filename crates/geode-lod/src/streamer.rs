//! Per-cell LOD streaming around a moving viewer.
//!
//! Each `(face, grid_x, grid_y)` cell shows at most one LOD of its tile. On
//! every update the desired LOD of every cell is computed from scratch, then
//! compared with what is currently attached; only differing cells are
//! reattached. Repeating an update with the same viewer does nothing.

use geode_cubesphere::{CubeFace, FaceTransforms, GridCoord, Lattice, direction_to_cell, wrap};
use geode_mesh::{SubMeshId, TileKey, TileLayout, TileSet};
use glam::{DVec3, Vec3};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::scene::{LodContainer, SceneAttach};
use crate::thresholds::{LodError, LodThresholds};

/// Counts of the work done by one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodUpdate {
    /// Cells whose LOD changed.
    pub cells_changed: usize,
    /// Sub-meshes attached.
    pub attached: usize,
    /// Sub-meshes detached.
    pub detached: usize,
}

impl LodUpdate {
    /// Total attach and detach requests issued.
    pub fn operations(&self) -> usize {
        self.attached + self.detached
    }

    /// Returns true if the update changed nothing.
    pub fn is_empty(&self) -> bool {
        self.cells_changed == 0
    }
}

/// Chooses which LOD of each cell is attached.
#[derive(Debug)]
pub struct LodStreamer {
    layout: TileLayout,
    thresholds: LodThresholds,
    cell_directions: Vec<Vec3>,
    state: Vec<Option<u8>>,
    desired: Vec<Option<u8>>,
    high_detail: FxHashSet<SubMeshId>,
}

impl LodStreamer {
    /// Create a streamer with every cell detached.
    ///
    /// # Errors
    ///
    /// Returns [`LodError::LodCountMismatch`] if `thresholds` does not have
    /// one entry per LOD of `layout`.
    pub fn new(
        layout: TileLayout,
        thresholds: LodThresholds,
        transforms: &FaceTransforms,
    ) -> Result<Self, LodError> {
        if thresholds.num_lods() != layout.num_lods() {
            return Err(LodError::LodCountMismatch {
                thresholds: thresholds.num_lods() as usize,
                lods: layout.num_lods() as usize,
            });
        }
        let cell_directions = layout
            .cells()
            .map(|(face, gx, gy)| {
                let (x, y) = layout.center_node(gx, gy);
                transforms.node_direction(face, x, y, layout.num_nodes())
            })
            .collect::<Vec<_>>();
        let cells = cell_directions.len();
        Ok(Self {
            layout,
            thresholds,
            cell_directions,
            state: vec![None; cells],
            desired: vec![None; cells],
            high_detail: FxHashSet::default(),
        })
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// LOD currently attached at a cell, or `None` if hidden.
    pub fn current_lod(&self, face: CubeFace, grid_x: i32, grid_y: i32) -> Option<u8> {
        self.state[self.layout.cell_index(face, grid_x, grid_y)]
    }

    /// Sub-meshes currently attached at LOD 0.
    pub fn high_detail(&self) -> &FxHashSet<SubMeshId> {
        &self.high_detail
    }

    /// The cell the viewer is above.
    pub fn viewer_cell(&self, viewer: DVec3) -> GridCoord {
        direction_to_cell(viewer, self.layout.grid_count())
    }

    /// Recompute every cell's LOD for a viewer at `viewer` (planet space)
    /// and reattach the cells that changed.
    pub fn update(&mut self, tiles: &TileSet, viewer: DVec3, sink: &mut impl SceneAttach) -> LodUpdate {
        debug_assert_eq!(tiles.layout(), &self.layout, "tile set built for another layout");
        let distance_sq = viewer.length_squared();
        let baseline = self.thresholds.baseline_lod(distance_sq);

        for (desired, dir) in self.desired.iter_mut().zip(&self.cell_directions) {
            *desired = if dir.as_dvec3().dot(viewer) < 0.0 {
                None
            } else {
                Some(baseline)
            };
        }

        if distance_sq < self.thresholds.near_sq() {
            let center = self.viewer_cell(viewer);
            let g = self.layout.grid_count();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let c = wrap(
                        GridCoord::new(center.face, center.x + dx, center.y + dy),
                        Lattice::Cells,
                        g,
                    );
                    self.desired[self.layout.cell_index(c.face, c.x, c.y)] = Some(0);
                }
            }
        }

        let result = self.apply(tiles, sink);
        if !result.is_empty() {
            debug!(
                baseline,
                cells_changed = result.cells_changed,
                attached = result.attached,
                detached = result.detached,
                high_detail = self.high_detail.len(),
                "LOD update"
            );
        }
        result
    }

    /// Detach every cell.
    pub fn hide(&mut self, tiles: &TileSet, sink: &mut impl SceneAttach) -> LodUpdate {
        self.desired.fill(None);
        let result = self.apply(tiles, sink);
        debug!(detached = result.detached, "Planet hidden");
        result
    }

    fn apply(&mut self, tiles: &TileSet, sink: &mut impl SceneAttach) -> LodUpdate {
        let mut result = LodUpdate::default();
        for (i, (face, gx, gy)) in self.layout.cells().enumerate() {
            let (old, new) = (self.state[i], self.desired[i]);
            if old == new {
                continue;
            }
            if let Some(lod) = old {
                for sub in tiles.get(TileKey::new(lod, face, gx, gy)).iter() {
                    trace!(id = ?sub.id, "detach");
                    sink.attach_to(sub.id, None);
                    if lod == 0 {
                        self.high_detail.remove(&sub.id);
                    }
                    result.detached += 1;
                }
            }
            if let Some(lod) = new {
                let container = LodContainer::for_lod(lod);
                for sub in tiles.get(TileKey::new(lod, face, gx, gy)).iter() {
                    trace!(id = ?sub.id, ?container, "attach");
                    sink.attach_to(sub.id, Some(container));
                    if lod == 0 {
                        self.high_detail.insert(sub.id);
                    }
                    result.attached += 1;
                }
            }
            self.state[i] = new;
            result.cells_changed += 1;
        }
        result
    }
}
