//! Sphere-to-cube inverse mapping: recover face, face-local and grid
//! coordinates from a 3-D direction.

use glam::DVec3;

use crate::{CubeFace, GridCoord};

/// Determine which cube face a direction vector belongs to.
///
/// The face is determined by the axis with the largest absolute component.
/// Ties are broken by a fixed priority: X > Y > Z, positive > negative.
/// A zero vector maps to [`CubeFace::PosX`].
#[must_use]
pub fn direction_to_face(dir: DVec3) -> CubeFace {
    let ax = dir.x.abs();
    let ay = dir.y.abs();
    let az = dir.z.abs();

    if ax >= ay && ax >= az {
        if dir.x >= 0.0 {
            CubeFace::PosX
        } else {
            CubeFace::NegX
        }
    } else if ay >= az {
        if dir.y >= 0.0 {
            CubeFace::PosY
        } else {
            CubeFace::NegY
        }
    } else if dir.z >= 0.0 {
        CubeFace::PosZ
    } else {
        CubeFace::NegZ
    }
}

/// Project a direction onto the cube and return its face and face-local
/// `(s, t)` in `[-1, 1]²`.
///
/// The direction does not need to be unit length. A zero vector maps to the
/// center of [`CubeFace::PosX`].
#[must_use]
pub fn direction_to_face_local(dir: DVec3) -> (CubeFace, f64, f64) {
    let face = direction_to_face(dir);
    let unit = dir.normalize_or_zero();
    let dominant = unit.dot(face.normal());
    if dominant.abs() < 1e-30 {
        return (face, 0.0, 0.0);
    }
    let on_cube = unit / dominant;
    let s = on_cube.dot(face.tangent()).clamp(-1.0, 1.0);
    let t = on_cube.dot(face.bitangent()).clamp(-1.0, 1.0);
    (face, s, t)
}

fn local_to_index(v: f64, count: i32) -> i32 {
    let i = ((v + 1.0) * 0.5 * count as f64).floor() as i32;
    i.clamp(0, count - 1)
}

/// Grid cell containing `dir` on a face split into `grid_count²` cells.
#[must_use]
pub fn direction_to_cell(dir: DVec3, grid_count: i32) -> GridCoord {
    let (face, s, t) = direction_to_face_local(dir);
    GridCoord::new(face, local_to_index(s, grid_count), local_to_index(t, grid_count))
}

/// Nearest heightfield node to `dir` on a face of `num_nodes²` nodes.
#[must_use]
pub fn direction_to_node(dir: DVec3, num_nodes: i32) -> GridCoord {
    let (face, s, t) = direction_to_face_local(dir);
    let last = (num_nodes - 1) as f64;
    let index = |v: f64| (((v + 1.0) * 0.5 * last).round() as i32).clamp(0, num_nodes - 1);
    GridCoord::new(face, index(s), index(t))
}
