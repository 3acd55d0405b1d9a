//! Cube-sphere addressing: face basis and adjacency, face-to-cube transforms,
//! boundary correction for grid coordinates that leave a face, and the
//! inverse mapping from directions back to faces and grid cells.

mod cross_face;
mod cube_face;
mod inverse;
mod projection;
mod wrap;

pub use cross_face::{FaceEdge, FaceEdgeAdjacency, cross_edge, face_adjacency};
pub use cube_face::CubeFace;
pub use inverse::{direction_to_cell, direction_to_face, direction_to_face_local, direction_to_node};
pub use projection::{FaceTransforms, face_point, node_local};
pub use wrap::{GridCoord, Lattice, MAX_WRAP_HOPS, wrap, wrap_hops};
