//! Boundary correction: remap grid coordinates that have run off a face.
//!
//! A coordinate outside `[0, size)` names a position on a neighboring face.
//! [`wrap`] walks the adjacency table one edge at a time until the
//! coordinate is back in range. Two lattices share the same walk:
//!
//! - [`Lattice::Nodes`]: heightfield nodes. Border nodes are shared between
//!   faces, so `x = -1` is one step into the neighbor past the shared node.
//! - [`Lattice::Cells`]: tile grid cells. Cells are not shared, so `x = -1`
//!   is the neighbor's border cell.

use crate::CubeFace;
use crate::cross_face::{FaceEdge, cross_edge};

/// Maximum number of face crossings a legal coordinate can need.
pub const MAX_WRAP_HOPS: usize = 2;

/// Which kind of per-face grid a coordinate indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lattice {
    /// Heightfield nodes; border rows are shared with the neighbor face.
    Nodes,
    /// Tile cells; every cell belongs to exactly one face.
    Cells,
}

/// A `(face, x, y)` address that may lie outside its face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Face the coordinate is expressed on.
    pub face: CubeFace,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridCoord {
    /// Construct a coordinate.
    #[must_use]
    pub const fn new(face: CubeFace, x: i32, y: i32) -> Self {
        Self { face, x, y }
    }

    /// True if both components lie in `[0, size)`.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, size: i32) -> bool {
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// The edge this coordinate has crossed, checking x before y.
    fn crossed_edge(&self, size: i32) -> Option<FaceEdge> {
        if self.x < 0 {
            Some(FaceEdge::West)
        } else if self.x >= size {
            Some(FaceEdge::East)
        } else if self.y < 0 {
            Some(FaceEdge::South)
        } else if self.y >= size {
            Some(FaceEdge::North)
        } else {
            None
        }
    }
}

/// Move `coord` one face across `edge`.
fn hop(coord: GridCoord, edge: FaceEdge, lattice: Lattice, size: i32) -> GridCoord {
    let last = size - 1;
    let (along, past) = match edge {
        FaceEdge::West => (coord.y, -coord.x),
        FaceEdge::East => (coord.y, coord.x - last),
        FaceEdge::South => (coord.x, -coord.y),
        FaceEdge::North => (coord.x, coord.y - last),
    };
    let depth = match lattice {
        Lattice::Nodes => past,
        Lattice::Cells => past - 1,
    };
    assert!(
        depth <= last,
        "{coord:?} lies more than one face beyond the {edge:?} edge (size {size})"
    );
    let (face, x, y) = cross_edge(coord.face, edge, along, depth, size);
    GridCoord { face, x, y }
}

/// Bring `coord` back inside `[0, size)²` by walking across face edges.
///
/// In-range input is returned unchanged.
///
/// # Panics
///
/// Panics if the coordinate is more than one face away or still out of range
/// after [`MAX_WRAP_HOPS`] crossings. Either means the caller passed a
/// position outside the planet's topology.
#[must_use]
pub fn wrap(coord: GridCoord, lattice: Lattice, size: i32) -> GridCoord {
    let mut current = coord;
    for _ in 0..MAX_WRAP_HOPS {
        match current.crossed_edge(size) {
            Some(edge) => current = hop(current, edge, lattice, size),
            None => return current,
        }
    }
    assert!(
        current.in_bounds(size),
        "boundary correction of {coord:?} did not converge (reached {current:?}, size {size})"
    );
    current
}

/// Number of face crossings [`wrap`] performs for `coord`.
#[must_use]
pub fn wrap_hops(coord: GridCoord, lattice: Lattice, size: i32) -> usize {
    let mut current = coord;
    let mut hops = 0;
    while let Some(edge) = current.crossed_edge(size) {
        assert!(hops < MAX_WRAP_HOPS, "boundary correction of {coord:?} did not converge");
        current = hop(current, edge, lattice, size);
        hops += 1;
    }
    hops
}
