//! Six-face height grid with write-through edge stitching.
//!
//! Border nodes are stored once per face that touches them. [`Heightfield::set_node`]
//! keeps every copy equal by writing through to the neighbor face across each
//! edge the node lies on, so a cube-corner node updates all three of its copies.

use geode_cubesphere::{CubeFace, FaceEdge, GridCoord, Lattice, cross_edge, wrap};

/// Heights for all six cube faces, `num_nodes × num_nodes` per face.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    num_nodes: i32,
    heights: Vec<f32>,
}

impl Heightfield {
    /// Zero-filled heightfield.
    #[must_use]
    pub fn new(num_nodes: i32) -> Self {
        Self::filled(num_nodes, 0.0)
    }

    /// Heightfield with every node set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `num_nodes < 2`.
    #[must_use]
    pub fn filled(num_nodes: i32, value: f32) -> Self {
        assert!(num_nodes >= 2, "heightfield needs at least 2 nodes per side, got {num_nodes}");
        let n = num_nodes as usize;
        Self {
            num_nodes,
            heights: vec![value; 6 * n * n],
        }
    }

    /// Nodes per face side.
    #[inline]
    #[must_use]
    pub fn num_nodes(&self) -> i32 {
        self.num_nodes
    }

    #[inline]
    fn index(&self, face: CubeFace, x: i32, y: i32) -> usize {
        assert!(
            (0..self.num_nodes).contains(&x) && (0..self.num_nodes).contains(&y),
            "node ({x}, {y}) out of range on {face:?}"
        );
        let n = self.num_nodes as usize;
        (face.index() * n + y as usize) * n + x as usize
    }

    /// Write one logical node and every copy of it on adjacent faces.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside `0..num_nodes`.
    pub fn set_node(&mut self, value: f32, face: CubeFace, x: i32, y: i32) {
        let i = self.index(face, x, y);
        self.heights[i] = value;

        let last = self.num_nodes - 1;
        let on_edges = [
            (x == 0, FaceEdge::West, y),
            (x == last, FaceEdge::East, y),
            (y == 0, FaceEdge::South, x),
            (y == last, FaceEdge::North, x),
        ];
        for (on_edge, edge, along) in on_edges {
            if on_edge {
                let (nf, nx, ny) = cross_edge(face, edge, along, 0, self.num_nodes);
                let j = self.index(nf, nx, ny);
                self.heights[j] = value;
            }
        }
    }

    /// Read a node, following coordinates that run off `face` onto its
    /// neighbors.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies more than one face away.
    #[must_use]
    pub fn get_node(&self, face: CubeFace, x: i32, y: i32) -> f32 {
        let c = wrap(GridCoord::new(face, x, y), Lattice::Nodes, self.num_nodes);
        self.heights[self.index(c.face, c.x, c.y)]
    }

    /// Read an in-range node without boundary correction.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside `0..num_nodes`.
    #[inline]
    #[must_use]
    pub fn raw(&self, face: CubeFace, x: i32, y: i32) -> f32 {
        self.heights[self.index(face, x, y)]
    }

    /// All heights, indexed `(face * N + y) * N + x`.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: i32 = 9;
    const LAST: i32 = N - 1;

    fn copies_of(face: CubeFace, x: i32, y: i32) -> Vec<(CubeFace, i32, i32)> {
        let mut out = vec![(face, x, y)];
        for (on_edge, edge, along) in [
            (x == 0, FaceEdge::West, y),
            (x == LAST, FaceEdge::East, y),
            (y == 0, FaceEdge::South, x),
            (y == LAST, FaceEdge::North, x),
        ] {
            if on_edge {
                out.push(cross_edge(face, edge, along, 0, N));
            }
        }
        out
    }

    #[test]
    fn test_interior_write_touches_one_node() {
        let mut hf = Heightfield::new(N);
        hf.set_node(1.5, CubeFace::PosY, 3, 4);
        let written = hf.as_slice().iter().filter(|&&h| h != 0.0).count();
        assert_eq!(written, 1);
        assert_eq!(hf.raw(CubeFace::PosY, 3, 4), 1.5);
    }

    #[test]
    fn test_edge_write_touches_two_faces() {
        let mut hf = Heightfield::new(N);
        hf.set_node(2.0, CubeFace::NegX, 0, 5);
        let written = hf.as_slice().iter().filter(|&&h| h != 0.0).count();
        assert_eq!(written, 2);
        for (f, x, y) in copies_of(CubeFace::NegX, 0, 5) {
            assert_eq!(hf.raw(f, x, y), 2.0, "copy on {f:?} ({x}, {y})");
        }
    }

    #[test]
    fn test_corner_write_touches_three_faces() {
        for face in CubeFace::ALL {
            for (x, y) in [(0, 0), (LAST, 0), (0, LAST), (LAST, LAST)] {
                let mut hf = Heightfield::new(N);
                hf.set_node(-3.0, face, x, y);
                let copies = copies_of(face, x, y);
                let faces: Vec<_> = copies.iter().map(|c| c.0).collect();
                assert_eq!(copies.len(), 3);
                assert!(faces[0] != faces[1] && faces[1] != faces[2] && faces[0] != faces[2]);
                let written = hf.as_slice().iter().filter(|&&h| h != 0.0).count();
                assert_eq!(written, 3, "corner ({x}, {y}) of {face:?}");
            }
        }
    }

    #[test]
    fn test_stitching_holds_after_arbitrary_writes() {
        let mut hf = Heightfield::new(N);
        let mut v = 0.0f32;
        for face in CubeFace::ALL {
            for y in 0..N {
                for x in 0..N {
                    v += 0.25;
                    hf.set_node(v, face, x, y);
                }
            }
        }
        for face in CubeFace::ALL {
            for y in 0..N {
                for x in 0..N {
                    let here = hf.raw(face, x, y);
                    for (f, cx, cy) in copies_of(face, x, y) {
                        assert_eq!(hf.raw(f, cx, cy), here, "{face:?} ({x}, {y}) vs {f:?} ({cx}, {cy})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_get_node_follows_face_edges() {
        let mut hf = Heightfield::new(N);
        hf.set_node(7.0, CubeFace::PosZ, 1, 4);
        // Column 1 of PosZ seen from the neighbor, one node past the shared border.
        let adj = geode_cubesphere::face_adjacency(CubeFace::PosZ, FaceEdge::West);
        let (nf, nx, ny) = cross_edge(CubeFace::PosZ, FaceEdge::West, 4, 1, N);
        assert_eq!(adj.neighbor_face, nf);
        assert_eq!(hf.raw(CubeFace::PosZ, 1, 4), 7.0);
        let (back_x, back_y) = match adj.neighbor_edge {
            FaceEdge::West => (-1, ny),
            FaceEdge::East => (LAST + 1, ny),
            FaceEdge::South => (nx, -1),
            FaceEdge::North => (nx, LAST + 1),
        };
        assert_eq!(hf.get_node(nf, back_x, back_y), 7.0);
        assert_eq!(hf.get_node(CubeFace::PosZ, 1, 4), 7.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_node_past_east_edge_panics() {
        let mut hf = Heightfield::new(N);
        hf.set_node(5.0, CubeFace::PosZ, N, 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_raw_below_zero_panics() {
        let hf = Heightfield::new(N);
        let _ = hf.raw(CubeFace::NegX, 3, -1);
    }
}
