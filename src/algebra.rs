// src/algebra.rs
//! Free-function vector algebra used for display derivation and grading.
//!
//! Every function here is total and pure: identical inputs give bit-identical
//! outputs, and degenerate inputs (zero vectors) map to the zero vector
//! instead of dividing by zero.

use crate::ops::projection::Vec3Projection;
use crate::vector::Vec3;

/// Componentwise `a + b`.
#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

/// Componentwise `a - b`.
#[inline]
pub fn subtract(a: Vec3, b: Vec3) -> Vec3 {
    a - b
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(&b)
}

/// Right-handed cross product `a × b`.
#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(&b)
}

/// Euclidean norm.
#[inline]
pub fn magnitude(v: Vec3) -> f64 {
    v.norm()
}

/// `v / |v|`, or the zero vector when `|v| == 0`.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize()
}

/// Orthogonal projection of `a` onto `b`: `b * (a·b / |b|²)`.
/// Projecting onto the zero vector yields the zero vector.
#[inline]
pub fn project(a: Vec3, b: Vec3) -> Vec3 {
    a.project_onto(&b)
}
