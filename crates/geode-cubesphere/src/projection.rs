//! Face-local to cube-surface transforms and cube-to-sphere projection.
//!
//! A face-local coordinate `(s, t)` lies in `[-1, 1]²` with the face center at
//! the origin. Grid node `(x, y)` of an `n`-node face maps to
//! `s = 2x / (n - 1) - 1`, `t = 2y / (n - 1) - 1`.

use glam::{DVec3, Mat3, Mat4, Vec3};

use crate::CubeFace;

/// Point on the `[-1, 1]` cube for a face-local coordinate, in `f64`.
///
/// Coordinates outside `[-1, 1]` extend the face plane past its edges.
#[inline]
#[must_use]
pub fn face_point(face: CubeFace, s: f64, t: f64) -> DVec3 {
    face.normal() + s * face.tangent() + t * face.bitangent()
}

/// Face-local coordinate of grid node `(x, y)` on a face of `num_nodes` nodes.
#[inline]
#[must_use]
pub fn node_local(x: i32, y: i32, num_nodes: i32) -> (f32, f32) {
    let last = (num_nodes - 1) as f32;
    (2.0 * x as f32 / last - 1.0, 2.0 * y as f32 / last - 1.0)
}

/// The six per-face transforms from face-local space onto the cube surface.
///
/// Each matrix rotates the canonical frame (tangent = +X, bitangent = +Y,
/// normal = +Z) onto the face basis after pushing the local plane out to
/// `z = 1`, so `(s, t, 0)` lands on `n + s·T + t·B`.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceTransforms {
    matrices: [Mat4; 6],
}

impl FaceTransforms {
    /// Build the transforms for all six faces.
    #[must_use]
    pub fn new() -> Self {
        let push = Mat4::from_translation(Vec3::Z);
        let matrices = CubeFace::ALL.map(|face| {
            let rotation = Mat3::from_cols(
                face.tangent().as_vec3(),
                face.bitangent().as_vec3(),
                face.normal().as_vec3(),
            );
            Mat4::from_mat3(rotation) * push
        });
        Self { matrices }
    }

    /// The transform for one face.
    #[inline]
    #[must_use]
    pub fn matrix(&self, face: CubeFace) -> &Mat4 {
        &self.matrices[face.index()]
    }

    /// Cube-surface point for a face-local coordinate.
    #[inline]
    #[must_use]
    pub fn cube_point(&self, face: CubeFace, s: f32, t: f32) -> Vec3 {
        self.matrices[face.index()].transform_point3(Vec3::new(s, t, 0.0))
    }

    /// Unit direction from the planet center through grid node `(x, y)`.
    #[inline]
    #[must_use]
    pub fn node_direction(&self, face: CubeFace, x: i32, y: i32, num_nodes: i32) -> Vec3 {
        let (s, t) = node_local(x, y, num_nodes);
        self.cube_point(face, s, t).normalize()
    }
}

impl Default for FaceTransforms {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_face_center_maps_to_normal() {
        let transforms = FaceTransforms::new();
        for face in CubeFace::ALL {
            let p = transforms.cube_point(face, 0.0, 0.0);
            let expected = face.normal().as_vec3();
            assert!(
                (p - expected).length() < EPSILON,
                "Face center of {face:?} did not map to normal: got {p:?}"
            );
        }
    }

    #[test]
    fn test_matrices_match_face_point() {
        let transforms = FaceTransforms::new();
        for face in CubeFace::ALL {
            for (s, t) in [(-1.0, -1.0), (1.0, -1.0), (0.25, 0.75), (-0.5, 1.0)] {
                let m = transforms.cube_point(face, s, t);
                let f = face_point(face, s as f64, t as f64).as_vec3();
                assert!((m - f).length() < EPSILON, "{face:?} ({s}, {t}): {m:?} vs {f:?}");
            }
        }
    }

    #[test]
    fn test_node_directions_are_unit_length() {
        let transforms = FaceTransforms::new();
        for face in CubeFace::ALL {
            for x in 0..9 {
                for y in 0..9 {
                    let d = transforms.node_direction(face, x, y, 9);
                    assert!((d.length() - 1.0).abs() < EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_node_local_corners() {
        assert_eq!(node_local(0, 0, 9), (-1.0, -1.0));
        assert_eq!(node_local(8, 8, 9), (1.0, 1.0));
        assert_eq!(node_local(4, 0, 9), (0.0, -1.0));
    }

    #[test]
    fn test_rotations_are_proper() {
        let transforms = FaceTransforms::new();
        for face in CubeFace::ALL {
            let det = Mat3::from_mat4(*transforms.matrix(face)).determinant();
            assert!((det - 1.0).abs() < EPSILON, "{face:?} determinant {det}");
        }
    }
}
