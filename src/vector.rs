// src/vector.rs

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 3-D Euclidean vector.
///
/// Serializes as `{ "x": .., "y": .., "z": .. }`, the shape the challenge
/// generator speaks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self { Self { x, y, z } }
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    /// Right-handed cross product `self × other`.
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
    pub fn norm_squared(&self) -> f64 { self.dot(self) }
    pub fn norm(&self) -> f64 { self.norm_squared().sqrt() }
    pub fn scale(&self, s: f64) -> Self { Self::new(self.x * s, self.y * s, self.z * s) }

    /// Unit vector in the direction of `self`. The zero vector normalizes to itself.
    pub fn normalize(&self) -> Self {
        let n = self.norm();
        if n == 0.0 {
            return Vec3::ZERO;
        }
        Self::new(self.x / n, self.y / n, self.z / n)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 { Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z) }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 { Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z) }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 { Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs) }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 { Vec3::new(-self.x, -self.y, -self.z) }
}

/// A tiny wrapper for printing a Vec3 as `(x, y, z)` rounded to `decimals` places.
pub struct Rounded<'a>(pub &'a Vec3, pub usize);

impl<'a> fmt::Display for Rounded<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Rounded(v, dec) = *self;
        write!(
            f,
            "({x:.dec$}, {y:.dec$}, {z:.dec$})",
            x = v.x,
            y = v.y,
            z = v.z,
            dec = dec
        )
    }
}

impl<'a> Rounded<'a> {
  /// Wrap a `&Vec3` for pretty‐printing with `decimals` digits.
  pub fn new(v: &'a Vec3, decimals: usize) -> Self {
      Rounded(v, decimals)
  }
}
