// src/tolerance.rs
//! Grading equality under floating-point noise.
//!
//! Vectors compare by magnitude and direction rather than componentwise, so
//! two results reached through different arithmetic paths still match.

use serde::{Deserialize, Serialize};

use crate::algebra::{dot, magnitude, normalize};
use crate::vector::Vec3;

/// Tolerance used when no other is configured.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// `|a - b| < tol`.
#[inline]
pub fn scalars_equal(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Magnitude/direction equality.
///
/// 1. Magnitudes differing by more than `tol` are unequal.
/// 2. Two magnitudes below `tol` are both the zero vector, hence equal.
/// 3. One magnitude below `tol` and the other not: unequal.
/// 4. Otherwise the unit vectors must point the same way:
///    `|n(a)·n(b) - 1| < tol`. Antiparallel vectors give a cosine near -1.
pub fn vectors_equal(a: Vec3, b: Vec3, tol: f64) -> bool {
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if (mag_a - mag_b).abs() > tol {
        return false;
    }

    let a_zero = mag_a < tol;
    let b_zero = mag_b < tol;
    if a_zero || b_zero {
        return a_zero && b_zero;
    }

    let cos = dot(normalize(a), normalize(b));
    (cos - 1.0).abs() < tol
}

/// A fixed comparison tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance(pub f64);

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance(DEFAULT_TOLERANCE)
    }
}

impl Tolerance {
    pub fn scalars_equal(&self, a: f64, b: f64) -> bool {
        scalars_equal(a, b, self.0)
    }

    pub fn vectors_equal(&self, a: Vec3, b: Vec3) -> bool {
        vectors_equal(a, b, self.0)
    }
}
