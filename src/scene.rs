// src/scene.rs
//! Derivation of everything the display surface draws.
//!
//! A [`SceneSnapshot`] holds all user state at one instant. [`SceneSnapshot::derive`]
//! is a pure function of that snapshot; re-run it after every edit or toggle.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::algebra::{add, cross, dot, magnitude, project, subtract};
use crate::challenge::{self, Challenge, GradeResult};
use crate::error::{ChallengeError, ChallengeResult};
use crate::input::RawVectorFields;
use crate::tolerance::Tolerance;
use crate::vector::Vec3;

/// A 24-bit RGB color, shown as `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

pub mod colors {
    use super::Color;

    pub const V1: Color = Color(0xff0000);
    pub const V2: Color = Color(0x0077ff);
    pub const V3: Color = Color(0xffff00);
    pub const SUM: Color = Color(0x9932cc);
    pub const DIFFERENCE: Color = Color(0x40e0d0);
    pub const CROSS_PRODUCT: Color = Color(0x90ee90);
    pub const PROJECTION: Color = Color(0x29abe2);
}

/// One arrow handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayVector {
    pub name: String,
    pub vector: Vec3,
    pub color: Color,
    pub visible: bool,
}

impl DisplayVector {
    fn new(name: &str, vector: Vec3, color: Color, visible: bool) -> Self {
        Self { name: name.to_string(), vector, color, visible }
    }

    /// Zero-length arrows are degenerate; skip anything shorter than `epsilon`.
    pub fn is_drawable(&self, epsilon: f64) -> bool {
        magnitude(self.vector) > epsilon
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DotProductInfo {
    pub scalar: f64,
    /// v1 projected onto v2; present only while the dot product toggle is on.
    pub projection: Option<DisplayVector>,
}

/// Which derived vectors the user asked to see.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    pub sum: bool,
    pub difference: bool,
    pub dot_product: bool,
    pub cross_product: bool,
}

/// All user state at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSnapshot {
    pub v1: RawVectorFields,
    pub v2: RawVectorFields,
    pub v3: RawVectorFields,
    pub toggles: Toggles,
    pub active_challenge: Option<Arc<Challenge>>,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            v1: RawVectorFields::new("1", "2", "1"),
            v2: RawVectorFields::new("2", "-1", "1"),
            v3: RawVectorFields::new("0", "0", "0"),
            toggles: Toggles::default(),
            active_challenge: None,
        }
    }
}

/// Everything derived from one snapshot.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneView {
    /// The input vectors that parsed, always visible.
    pub inputs: Vec<DisplayVector>,
    pub sum: Option<DisplayVector>,
    pub difference: Option<DisplayVector>,
    pub cross_product: Option<DisplayVector>,
    pub dot_product: Option<DotProductInfo>,
}

impl SceneView {
    /// Visible vectors long enough to draw.
    pub fn drawable(&self, epsilon: f64) -> impl Iterator<Item = &DisplayVector> + '_ {
        self.inputs
            .iter()
            .chain(self.sum.iter())
            .chain(self.difference.iter())
            .chain(self.cross_product.iter())
            .chain(self.dot_product.iter().filter_map(|d| d.projection.as_ref()))
            .filter(move |d| d.visible && d.is_drawable(epsilon))
    }
}

impl SceneSnapshot {
    /// Load the first two challenge seeds into the v1/v2 fields and mark it Active.
    pub fn load_challenge(&mut self, challenge: Arc<Challenge>) {
        if let [a, b, ..] = challenge.vectors() {
            self.v1 = RawVectorFields::from_vector(a);
            self.v2 = RawVectorFields::from_vector(b);
        }
        self.active_challenge = Some(challenge);
    }

    /// Parsed (v1, v2), for grading.
    pub fn operands(&self) -> (Option<Vec3>, Option<Vec3>) {
        (self.v1.parse(), self.v2.parse())
    }

    /// Grade the current v1/v2 fields against the loaded challenge.
    pub fn grade(&self, tol: Tolerance) -> ChallengeResult<GradeResult> {
        let active = self.active_challenge.as_ref().ok_or(ChallengeError::NoActiveChallenge)?;
        let (v1, v2) = self.operands();
        challenge::grade(active, v1, v2, tol)
    }

    pub fn derive(&self) -> SceneView {
        let v1 = self.v1.parse();
        let v2 = self.v2.parse();
        let v3 = self.v3.parse();

        let inputs = [("v1", v1, colors::V1), ("v2", v2, colors::V2), ("v3", v3, colors::V3)]
            .into_iter()
            .filter_map(|(name, v, color)| v.map(|v| DisplayVector::new(name, v, color, true)))
            .collect();

        let (Some(a), Some(b)) = (v1, v2) else {
            return SceneView { inputs, ..SceneView::default() };
        };

        let t = self.toggles;
        let projection = t
            .dot_product
            .then(|| DisplayVector::new("Projection v1 on v2", project(a, b), colors::PROJECTION, true));

        SceneView {
            inputs,
            sum: Some(DisplayVector::new("Sum (v1+v2)", add(a, b), colors::SUM, t.sum)),
            difference: Some(DisplayVector::new(
                "Difference (v1-v2)",
                subtract(a, b),
                colors::DIFFERENCE,
                t.difference,
            )),
            cross_product: Some(DisplayVector::new(
                "Cross Product (v1xv2)",
                cross(a, b),
                colors::CROSS_PRODUCT,
                t.cross_product,
            )),
            dot_product: Some(DotProductInfo { scalar: dot(a, b), projection }),
        }
    }
}
