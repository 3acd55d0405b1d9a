//! Scripted viewer descent and the bookkeeping scene it streams into.

use geode_collision::Octree;
use geode_lod::{LodContainer, SceneAttach};
use geode_mesh::SubMeshId;
use glam::{DQuat, DVec3, Vec3};
use rustc_hash::FxHashMap;

/// A descent from orbit to just above the surface.
///
/// Altitude falls geometrically so the viewer spends comparable time in
/// every LOD band, while the ground track drifts around the Y axis.
#[derive(Debug, Clone)]
pub struct FlightPath {
    /// Starting altitude as a multiple of the radius.
    pub start_altitude: f64,
    /// Final altitude as a multiple of the radius.
    pub end_altitude: f64,
    /// Ground-track rotation over the whole flight, radians.
    pub sweep: f64,
    /// Number of ticks.
    pub ticks: usize,
}

impl Default for FlightPath {
    fn default() -> Self {
        Self {
            start_altitude: 12.0,
            end_altitude: 0.004,
            sweep: 0.6,
            ticks: 120,
        }
    }
}

impl FlightPath {
    /// Viewer position at `tick` for a planet of `radius`.
    pub fn position(&self, tick: usize, radius: f64) -> DVec3 {
        let t = if self.ticks > 1 {
            tick as f64 / (self.ticks - 1) as f64
        } else {
            1.0
        };
        let altitude = self.start_altitude * (self.end_altitude / self.start_altitude).powf(t);
        let dir = DQuat::from_rotation_y(self.sweep * t) * DVec3::new(0.3, 0.2, 1.0).normalize();
        dir * radius * (1.0 + altitude)
    }

    /// Every tick's viewer position.
    pub fn positions(&self, radius: f64) -> impl Iterator<Item = DVec3> + '_ {
        (0..self.ticks).map(move |tick| self.position(tick, radius))
    }
}

/// Stand-in for a renderer: remembers what is attached where.
#[derive(Debug, Default)]
pub struct SceneStats {
    attached: FxHashMap<SubMeshId, LodContainer>,
    /// Attach requests received.
    pub attaches: usize,
    /// Detach requests received.
    pub detaches: usize,
    /// Largest number of sub-meshes attached at once.
    pub peak: usize,
}

impl SceneStats {
    /// Sub-meshes currently attached to `container`.
    pub fn count(&self, container: LodContainer) -> usize {
        self.attached.values().filter(|c| **c == container).count()
    }

    /// Sub-meshes currently attached anywhere.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }
}

impl SceneAttach for SceneStats {
    fn attach_to(&mut self, id: SubMeshId, container: Option<LodContainer>) {
        match container {
            Some(_) => self.attaches += 1,
            None => self.detaches += 1,
        }
        self.attached.attach_to(id, container);
        self.peak = self.peak.max(self.attached.len());
    }
}

/// A small double-wedge of triangles centered on the origin, reaching
/// `half_length` along every axis.
pub fn probe_octree(half_length: f32) -> Octree {
    let h = half_length;
    let positions = [
        Vec3::new(-h, 0.0, 0.0),
        Vec3::new(h, 0.0, 0.0),
        Vec3::new(0.0, -h, 0.0),
        Vec3::new(0.0, h, 0.0),
        Vec3::new(0.0, 0.0, -h),
        Vec3::new(0.0, 0.0, h),
    ];
    Octree::build(&positions, &[0, 1, 5, 2, 3, 4, 0, 3, 5, 1, 2, 4], 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geode_cubesphere::CubeFace;
    use geode_mesh::{SurfaceKind, TileKey};

    #[test]
    fn test_path_descends_monotonically() {
        let path = FlightPath::default();
        let radius = 1000.0;
        let altitudes: Vec<f64> = path.positions(radius).map(|p| p.length() - radius).collect();
        assert_eq!(altitudes.len(), path.ticks);
        assert!((altitudes[0] - 12.0 * radius).abs() < 1e-6);
        assert!((altitudes[path.ticks - 1] - 4.0).abs() < 1e-6);
        assert!(altitudes.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_scene_stats_tracks_attachment() {
        let mut scene = SceneStats::default();
        let key = TileKey::new(0, CubeFace::NegY, 0, 0);
        let land = key.sub_mesh(SurfaceKind::Land);
        let sea = key.sub_mesh(SurfaceKind::Sea);
        scene.attach_to(land, Some(LodContainer::Near));
        scene.attach_to(sea, Some(LodContainer::Far));
        assert_eq!(scene.count(LodContainer::Near), 1);
        assert_eq!(scene.peak, 2);
        scene.attach_to(land, None);
        assert_eq!(scene.attached_count(), 1);
        assert_eq!((scene.attaches, scene.detaches), (2, 1));
    }

    #[test]
    fn test_probe_spans_requested_size() {
        let probe = probe_octree(3.0);
        let bounds = probe.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::splat(-3.0));
        assert_eq!(bounds.max, Vec3::splat(3.0));
        assert_eq!(probe.triangle_count(), 4);
    }
}
