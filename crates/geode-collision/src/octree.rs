//! Triangle octree for pairwise transformed overlap queries.
//!
//! Each node keeps the triangles whose bounds fit inside its region but not
//! inside any single child octant, so a triangle is stored exactly once.

use glam::{Mat4, Vec3};
use tracing::trace;

use crate::{Aabb, Obb};

/// Three vertex positions.
pub type Triangle = [Vec3; 3];

fn triangle_bounds(tri: &Triangle) -> Aabb {
    Aabb {
        min: tri[0].min(tri[1]).min(tri[2]),
        max: tri[0].max(tri[1]).max(tri[2]),
    }
}

#[derive(Clone, Debug)]
struct OctreeNode {
    bounds: Aabb,
    triangles: Vec<Triangle>,
    children: Vec<OctreeNode>,
}

impl OctreeNode {
    fn build(bounds: Aabb, triangles: Vec<Triangle>, depth: u32, max_depth: u32) -> Self {
        if depth >= max_depth || triangles.is_empty() {
            return Self {
                bounds,
                triangles,
                children: Vec::new(),
            };
        }

        let octants: [Aabb; 8] = std::array::from_fn(|i| bounds.octant(i));
        let mut buckets: [Vec<Triangle>; 8] = Default::default();
        let mut kept = Vec::new();
        for tri in triangles {
            let tb = triangle_bounds(&tri);
            match octants.iter().position(|o| o.contains(&tb)) {
                Some(i) => buckets[i].push(tri),
                None => kept.push(tri),
            }
        }

        let children = octants
            .into_iter()
            .zip(buckets)
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(octant, bucket)| OctreeNode::build(octant, bucket, depth + 1, max_depth))
            .collect();

        Self {
            bounds,
            triangles: kept,
            children,
        }
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(OctreeNode::node_count).sum::<usize>()
    }

    fn depth(&self) -> u32 {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    fn for_each_triangle(&self, f: &mut impl FnMut(&Triangle)) {
        self.triangles.iter().for_each(&mut *f);
        for child in &self.children {
            child.for_each_triangle(f);
        }
    }
}

/// Pair of transforms used during one query.
struct QuerySpace<'a> {
    a: &'a Mat4,
    b: &'a Mat4,
}

impl QuerySpace<'_> {
    fn boxes_overlap(&self, a: &Aabb, b: &Aabb) -> bool {
        Obb::from_aabb(a, self.a).overlaps(&Obb::from_aabb(b, self.b))
    }

    fn triangles_overlap(&self, a: &[Triangle], b: &[Triangle]) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        let b_boxes: Vec<Obb> = b
            .iter()
            .map(|t| Obb::from_aabb(&triangle_bounds(t), self.b))
            .collect();
        a.iter().any(|ta| {
            let oa = Obb::from_aabb(&triangle_bounds(ta), self.a);
            b_boxes.iter().any(|ob| oa.overlaps(ob))
        })
    }

    /// Every triangle under `a` against every triangle under `b`.
    fn nodes(&self, a: &OctreeNode, b: &OctreeNode) -> bool {
        if !self.boxes_overlap(&a.bounds, &b.bounds) {
            return false;
        }
        if self.triangles_overlap(&a.triangles, &b.triangles) {
            return true;
        }
        if a.children.iter().any(|ca| self.nodes(ca, b)) {
            return true;
        }
        !a.triangles.is_empty() && b.children.iter().any(|cb| self.own_vs_subtree(a, cb))
    }

    /// Only the triangles stored directly at `a` against everything under `b`.
    fn own_vs_subtree(&self, a: &OctreeNode, b: &OctreeNode) -> bool {
        if !self.boxes_overlap(&a.bounds, &b.bounds) {
            return false;
        }
        self.triangles_overlap(&a.triangles, &b.triangles)
            || b.children.iter().any(|cb| self.own_vs_subtree(a, cb))
    }
}

/// Spatial partition of one triangle soup.
#[derive(Clone, Debug)]
pub struct Octree {
    root: Option<OctreeNode>,
    triangle_count: usize,
}

impl Octree {
    /// Build from an indexed triangle list.
    ///
    /// The root covers every position in `positions`, referenced or not.
    /// Trailing indices that do not form a whole triangle are ignored.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `positions`.
    pub fn build(positions: &[Vec3], indices: &[u16], max_depth: u32) -> Self {
        let Some(bounds) = Aabb::from_points(positions.iter().copied()) else {
            return Self {
                root: None,
                triangle_count: 0,
            };
        };
        let triangles: Vec<Triangle> = indices
            .chunks_exact(3)
            .map(|t| [positions[t[0] as usize], positions[t[1] as usize], positions[t[2] as usize]])
            .collect();
        let triangle_count = triangles.len();
        let root = OctreeNode::build(bounds, triangles, 0, max_depth);
        trace!(triangle_count, nodes = root.node_count(), "Octree built");
        Self {
            root: Some(root),
            triangle_count,
        }
    }

    /// Root bounds, or `None` when built from no positions.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| r.bounds)
    }

    /// Number of stored triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Returns true if the octree holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, OctreeNode::node_count)
    }

    /// Levels below the root.
    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, OctreeNode::depth)
    }

    /// Visit every stored triangle.
    pub fn for_each_triangle(&self, mut f: impl FnMut(&Triangle)) {
        if let Some(root) = &self.root {
            root.for_each_triangle(&mut f);
        }
    }

    /// Whether the two octrees' triangle bounds intersect once `self` is
    /// placed by `transform` and `other` by `other_transform`.
    ///
    /// Node boxes prune the search; the finest test is between individual
    /// triangle bounds. An empty octree never collides.
    pub fn collides(&self, other: &Octree, transform: &Mat4, other_transform: &Mat4) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (Some(a), Some(b)) = (&self.root, &other.root) else {
            return false;
        };
        QuerySpace {
            a: transform,
            b: other_transform,
        }
        .nodes(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A flat `n × n` grid of quads in the xy plane starting at `origin`.
    fn grid(origin: Vec3, n: u16, step: f32) -> (Vec<Vec3>, Vec<u16>) {
        let mut positions = Vec::new();
        for y in 0..=n {
            for x in 0..=n {
                positions.push(origin + Vec3::new(x as f32 * step, y as f32 * step, 0.0));
            }
        }
        let mut indices = Vec::new();
        let row = n + 1;
        for y in 0..n {
            for x in 0..n {
                let a = y * row + x;
                indices.extend_from_slice(&[a, a + 1, a + row + 1, a, a + row + 1, a + row]);
            }
        }
        (positions, indices)
    }

    #[test]
    fn test_every_triangle_stored_once() {
        let (positions, indices) = grid(Vec3::ZERO, 8, 1.0);
        let tree = Octree::build(&positions, &indices, 4);
        assert_eq!(tree.triangle_count(), 128);
        let mut seen = 0;
        tree.for_each_triangle(|_| seen += 1);
        assert_eq!(seen, 128);
        assert!(tree.depth() <= 4);
        assert!(tree.node_count() > 1);
    }

    #[test]
    fn test_root_bounds_cover_all_positions() {
        let (mut positions, indices) = grid(Vec3::new(-3.0, 2.0, 1.0), 4, 0.5);
        positions.push(Vec3::new(50.0, -50.0, 7.0));
        let tree = Octree::build(&positions, &indices, 3);
        let bounds = tree.bounds().unwrap();
        for p in &positions {
            assert!(bounds.contains_point(*p), "{p:?} outside {bounds:?}");
        }
    }

    #[test]
    fn test_nodes_hold_only_contained_triangles() {
        fn check(node: &OctreeNode) {
            for t in &node.triangles {
                assert!(node.bounds.contains(&triangle_bounds(t)));
                assert!(node.children.iter().all(|c| !c.bounds.contains(&triangle_bounds(t))));
            }
            node.children.iter().for_each(check);
        }
        let (positions, indices) = grid(Vec3::ZERO, 6, 1.0);
        let tree = Octree::build(&positions, &indices, 5);
        check(tree.root.as_ref().unwrap());
    }

    #[test]
    fn test_depth_zero_keeps_everything_at_root() {
        let (positions, indices) = grid(Vec3::ZERO, 3, 1.0);
        let tree = Octree::build(&positions, &indices, 0);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.triangle_count(), 18);
    }

    #[test]
    fn test_shared_triangle_collides() {
        let (positions, indices) = grid(Vec3::ZERO, 4, 1.0);
        let a = Octree::build(&positions, &indices, 3);
        let b = Octree::build(&positions[..], &indices[..3], 3);
        assert!(a.collides(&b, &Mat4::IDENTITY, &Mat4::IDENTITY));
        assert!(b.collides(&a, &Mat4::IDENTITY, &Mat4::IDENTITY));
    }

    #[test]
    fn test_separated_soups_do_not_collide() {
        let (pa, ia) = grid(Vec3::ZERO, 4, 1.0);
        let (pb, ib) = grid(Vec3::new(10.0, 0.0, 0.0), 4, 1.0);
        let a = Octree::build(&pa, &ia, 3);
        let b = Octree::build(&pb, &ib, 3);
        assert!(!a.collides(&b, &Mat4::IDENTITY, &Mat4::IDENTITY));
    }

    #[test]
    fn test_transform_moves_soup_into_contact() {
        let (pa, ia) = grid(Vec3::ZERO, 4, 1.0);
        let (pb, ib) = grid(Vec3::new(10.0, 0.0, 0.0), 4, 1.0);
        let a = Octree::build(&pa, &ia, 3);
        let b = Octree::build(&pb, &ib, 3);
        let pull_back = Mat4::from_translation(Vec3::new(-8.5, 0.0, 0.0));
        assert!(a.collides(&b, &Mat4::IDENTITY, &pull_back));
        let lift = Mat4::from_translation(Vec3::new(-10.0, 0.0, 3.0));
        assert!(!a.collides(&b, &Mat4::IDENTITY, &lift));
    }

    #[test]
    fn test_empty_octree_never_collides() {
        let (positions, indices) = grid(Vec3::ZERO, 2, 1.0);
        let full = Octree::build(&positions, &indices, 2);
        let no_triangles = Octree::build(&positions, &[], 2);
        let nothing = Octree::build(&[], &[], 2);
        assert!(no_triangles.bounds().is_some());
        assert!(nothing.bounds().is_none());
        for empty in [&no_triangles, &nothing] {
            assert!(!full.collides(empty, &Mat4::IDENTITY, &Mat4::IDENTITY));
            assert!(!empty.collides(&full, &Mat4::IDENTITY, &Mat4::IDENTITY));
        }
    }
}
