//! Oriented bounding boxes and the separating-axis overlap test.

use glam::{Mat4, Vec3};

use crate::Aabb;

/// Cross products shorter than this are treated as parallel edges and skipped.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A box with arbitrary orientation: center, three unit axes and the
/// half-extent along each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obb {
    /// Box center.
    pub center: Vec3,
    /// Unit axes of the box frame.
    pub axes: [Vec3; 3],
    /// Half-size along each axis.
    pub half_extents: Vec3,
}

impl Obb {
    /// Transform an axis-aligned box into an oriented box.
    ///
    /// Rotation, translation and per-axis scale are preserved exactly. Shear
    /// is not representable and is approximated by the scaled column axes.
    pub fn from_aabb(aabb: &Aabb, transform: &Mat4) -> Self {
        let center = transform.transform_point3(aabb.center());
        let extents = aabb.extents();
        let mut axes = [Vec3::X, Vec3::Y, Vec3::Z];
        let mut half_extents = Vec3::ZERO;
        for i in 0..3 {
            let column = transform.col(i).truncate();
            let len = column.length();
            if len > 0.0 {
                axes[i] = column / len;
            }
            half_extents[i] = extents[i] * len;
        }
        Self {
            center,
            axes,
            half_extents,
        }
    }

    /// Half-length of this box's projection onto `axis`.
    fn radius_along(&self, axis: Vec3) -> f32 {
        (0..3)
            .map(|i| self.half_extents[i] * self.axes[i].dot(axis).abs())
            .sum()
    }

    fn separated_along(&self, other: &Obb, axis: Vec3) -> bool {
        let distance = (other.center - self.center).dot(axis).abs();
        distance > self.radius_along(axis) + other.radius_along(axis)
    }

    /// Separating-axis test over the 3 + 3 face normals and the 9 edge cross
    /// products. Touching boxes count as overlapping.
    pub fn overlaps(&self, other: &Obb) -> bool {
        for axis in self.axes.iter().chain(other.axes.iter()) {
            if self.separated_along(other, *axis) {
                return false;
            }
        }
        for a in &self.axes {
            for b in &other.axes {
                let axis = a.cross(*b);
                if axis.length_squared() < PARALLEL_EPSILON * PARALLEL_EPSILON {
                    continue;
                }
                if self.separated_along(other, axis.normalize()) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn cube(center: Vec3, half: f32) -> Aabb {
        Aabb::new(center - Vec3::splat(half), center + Vec3::splat(half))
    }

    #[test]
    fn test_identity_matches_aabb() {
        let a = Obb::from_aabb(&cube(Vec3::ZERO, 1.0), &Mat4::IDENTITY);
        let b = Obb::from_aabb(&cube(Vec3::new(1.9, 0.0, 0.0), 1.0), &Mat4::IDENTITY);
        let c = Obb::from_aabb(&cube(Vec3::new(2.1, 0.0, 0.0), 1.0), &Mat4::IDENTITY);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_translation_and_scale() {
        let t = Mat4::from_scale_rotation_translation(Vec3::new(2.0, 1.0, 1.0), Quat::IDENTITY, Vec3::new(10.0, 0.0, 0.0));
        let obb = Obb::from_aabb(&cube(Vec3::ZERO, 1.0), &t);
        assert!((obb.center - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-6);
        assert!((obb.half_extents - Vec3::new(2.0, 1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_rotated_box_reaches_farther_along_diagonal() {
        // A cube rotated 45° about z reaches sqrt(2) along x.
        let rot = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);
        let a = Obb::from_aabb(&cube(Vec3::ZERO, 1.0), &rot);
        let near = Obb::from_aabb(&cube(Vec3::new(2.3, 0.0, 0.0), 1.0), &Mat4::IDENTITY);
        let far = Obb::from_aabb(&cube(Vec3::new(2.5, 0.0, 0.0), 1.0), &Mat4::IDENTITY);
        assert!(a.overlaps(&near));
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn test_boxes_rotated_about_different_axes() {
        let a = Obb::from_aabb(
            &cube(Vec3::ZERO, 1.0),
            &Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4),
        );
        let placed = |offset: f32| {
            Obb::from_aabb(
                &cube(Vec3::ZERO, 1.0),
                &(Mat4::from_translation(Vec3::new(0.0, offset, offset))
                    * Mat4::from_rotation_x(std::f32::consts::FRAC_PI_4)),
            )
        };
        assert!(a.overlaps(&placed(1.5)));
        assert!(placed(1.5).overlaps(&a));
        assert!(!a.overlaps(&placed(2.3)));
        assert!(!placed(2.3).overlaps(&a));
    }

    #[test]
    fn test_flat_boxes_touching() {
        let flat = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let a = Obb::from_aabb(&flat, &Mat4::IDENTITY);
        assert!(a.overlaps(&a));
    }
}
