//! Cube face adjacency and coordinate transfer across face seams.
//!
//! Every face has four edges and each edge is shared with exactly one other
//! face. The table below encodes that topology for the face basis defined in
//! [`CubeFace`]; [`cross_edge`] is the single coordinate transform used by both
//! the heightfield node lattice and the tile cell lattice.

use crate::CubeFace;

/// The four edges of a cube face in grid space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceEdge {
    /// `x = 0` (decreasing x).
    West,
    /// `x = last` (increasing x).
    East,
    /// `y = 0` (decreasing y).
    South,
    /// `y = last` (increasing y).
    North,
}

impl FaceEdge {
    /// All four edges.
    pub const ALL: [FaceEdge; 4] = [
        FaceEdge::West,
        FaceEdge::East,
        FaceEdge::South,
        FaceEdge::North,
    ];

    /// True for the edges that run along the y axis.
    #[inline]
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, FaceEdge::West | FaceEdge::East)
    }
}

/// Describes the relationship between a face edge and its adjacent face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceEdgeAdjacency {
    /// The adjacent face.
    pub neighbor_face: CubeFace,
    /// Which edge of the neighbor face this connects to.
    pub neighbor_edge: FaceEdge,
    /// Whether the coordinate along the shared edge runs in the opposite
    /// direction on the neighbor.
    pub flipped: bool,
}

const fn adj(neighbor_face: CubeFace, neighbor_edge: FaceEdge, flipped: bool) -> FaceEdgeAdjacency {
    FaceEdgeAdjacency {
        neighbor_face,
        neighbor_edge,
        flipped,
    }
}

/// Adjacency table indexed by `[face][edge]` in [`CubeFace::ALL`] and
/// [`FaceEdge::ALL`] order (West, East, South, North).
const ADJACENCY: [[FaceEdgeAdjacency; 4]; 6] = {
    use CubeFace::*;
    use FaceEdge::*;
    [
        // PosX
        [
            adj(PosZ, East, false),
            adj(NegZ, West, false),
            adj(NegY, East, true),
            adj(PosY, East, false),
        ],
        // NegX
        [
            adj(NegZ, East, false),
            adj(PosZ, West, false),
            adj(NegY, West, false),
            adj(PosY, West, true),
        ],
        // PosY
        [
            adj(NegX, North, true),
            adj(PosX, North, false),
            adj(PosZ, North, false),
            adj(NegZ, North, true),
        ],
        // NegY
        [
            adj(NegX, South, false),
            adj(PosX, South, true),
            adj(NegZ, South, true),
            adj(PosZ, South, false),
        ],
        // PosZ
        [
            adj(NegX, East, false),
            adj(PosX, West, false),
            adj(NegY, North, false),
            adj(PosY, South, false),
        ],
        // NegZ
        [
            adj(PosX, East, false),
            adj(NegX, West, false),
            adj(NegY, South, true),
            adj(PosY, North, true),
        ],
    ]
};

/// Look up which face lies across `edge` of `face` and how its coordinates
/// are oriented.
#[inline]
#[must_use]
pub fn face_adjacency(face: CubeFace, edge: FaceEdge) -> FaceEdgeAdjacency {
    let e = match edge {
        FaceEdge::West => 0,
        FaceEdge::East => 1,
        FaceEdge::South => 2,
        FaceEdge::North => 3,
    };
    ADJACENCY[face.index()][e]
}

/// Transfer a lattice position across `edge` of `face`.
///
/// `along` is the coordinate parallel to the edge (y for West/East, x for
/// South/North) and `depth` is the distance, in lattice steps, from the
/// neighbor's border row toward its interior. `size` is the lattice extent
/// per face. Returns `(neighbor_face, x, y)`.
#[must_use]
pub fn cross_edge(
    face: CubeFace,
    edge: FaceEdge,
    along: i32,
    depth: i32,
    size: i32,
) -> (CubeFace, i32, i32) {
    let last = size - 1;
    let adj = face_adjacency(face, edge);
    let along = if adj.flipped { last - along } else { along };
    let (x, y) = match adj.neighbor_edge {
        FaceEdge::West => (depth, along),
        FaceEdge::East => (last - depth, along),
        FaceEdge::South => (along, depth),
        FaceEdge::North => (along, last - depth),
    };
    (adj.neighbor_face, x, y)
}
