// src/ops/projection.rs
//! Vector projection and rejection.

use crate::vector::Vec3;

/// Projecting and rejecting Vec3s onto axes.
pub trait Vec3Projection {
    /// Orthogonal projection of this vector onto `axis`.
    ///
    /// A zero `axis` projects everything to the zero vector.
    fn project_onto(&self, axis: &Vec3) -> Vec3;

    /// Component orthogonal to `axis`.
    fn reject_from(&self, axis: &Vec3) -> Vec3;
}

impl Vec3Projection for Vec3 {
    #[inline(always)]
    fn project_onto(&self, axis: &Vec3) -> Vec3 {
        let denom = axis.norm_squared();
        if denom == 0.0 {
            return Vec3::ZERO;
        }
        axis.scale(self.dot(axis) / denom)
    }

    #[inline(always)]
    fn reject_from(&self, axis: &Vec3) -> Vec3 {
        *self - self.project_onto(axis)
    }
}

/// Reject `v` from `axis`.
pub fn reject_from(v: &Vec3, axis: &Vec3) -> Vec3 {
    v.reject_from(axis)
}
