//! Cube faces and the grid basis laid on each one.

use glam::DVec3;

/// One face of the cube, named by the axis its outward normal points along.
///
/// The discriminant is the face index used by every flat per-face array in
/// the workspace. Opposite faces differ only in the lowest bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +X
    PosX = 0,
    /// −X
    NegX = 1,
    /// +Y
    PosY = 2,
    /// −Y
    NegY = 3,
    /// +Z
    PosZ = 4,
    /// −Z
    NegZ = 5,
}

/// `(normal, grid x, grid y)` per face, in index order. Each row satisfies
/// `x × y = normal`.
const BASIS: [[DVec3; 3]; 6] = [
    [DVec3::X, DVec3::NEG_Z, DVec3::Y],
    [DVec3::NEG_X, DVec3::Z, DVec3::Y],
    [DVec3::Y, DVec3::X, DVec3::NEG_Z],
    [DVec3::NEG_Y, DVec3::X, DVec3::Z],
    [DVec3::Z, DVec3::X, DVec3::Y],
    [DVec3::NEG_Z, DVec3::NEG_X, DVec3::Y],
];

impl CubeFace {
    /// All faces in index order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Index of this face in `0..6`.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face for an index in `0..6`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`.
    #[must_use]
    pub fn from_index(index: usize) -> CubeFace {
        Self::ALL[index]
    }

    /// The face on the other side of the cube.
    #[must_use]
    pub fn opposite(self) -> CubeFace {
        Self::ALL[self.index() ^ 1]
    }

    /// Outward unit normal.
    #[inline]
    #[must_use]
    pub fn normal(self) -> DVec3 {
        BASIS[self.index()][0]
    }

    /// Direction of increasing grid `x`.
    #[inline]
    #[must_use]
    pub fn tangent(self) -> DVec3 {
        BASIS[self.index()][1]
    }

    /// Direction of increasing grid `y`.
    #[inline]
    #[must_use]
    pub fn bitangent(self) -> DVec3 {
        BASIS[self.index()][2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
            assert_eq!(CubeFace::from_index(i), *face);
        }
    }

    #[test]
    fn test_opposite_flips_normal() {
        for face in CubeFace::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().normal(), -face.normal(), "{face:?}");
        }
    }

    #[test]
    fn test_basis_is_right_handed() {
        for face in CubeFace::ALL {
            let (t, b, n) = (face.tangent(), face.bitangent(), face.normal());
            assert_eq!(t.cross(b), n, "x × y != normal on {face:?}");
            assert_eq!(t.dot(n), 0.0);
            assert_eq!(b.dot(n), 0.0);
        }
    }

    #[test]
    fn test_grid_axes_point_at_neighbor_faces() {
        // Walking +x or +y off a face lands on the face whose normal is that axis.
        for face in CubeFace::ALL {
            for axis in [face.tangent(), face.bitangent(), -face.tangent(), -face.bitangent()] {
                let neighbor = CubeFace::ALL.into_iter().find(|f| f.normal() == axis);
                let neighbor = neighbor.unwrap_or_else(|| panic!("no face along {axis:?}"));
                assert_ne!(neighbor, face);
                assert_ne!(neighbor, face.opposite());
            }
        }
    }
}
