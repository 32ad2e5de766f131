// src/input.rs
//! Raw text triples from the input surface and their conversion to vectors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::vector::Vec3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(s)
    }
}

/// A vector field that did not hold a finite number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("component {axis} is not a number: {input:?}")]
pub struct ParseError {
    pub axis: Axis,
    pub input: String,
}

/// Three editable text fields, one per component.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVectorFields {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl RawVectorFields {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into(), z: z.into() }
    }

    /// Render a vector back into editable text.
    pub fn from_vector(v: &Vec3) -> Self {
        Self::new(v.x.to_string(), v.y.to_string(), v.z.to_string())
    }

    /// Split `x,y,z` text into fields. Anything past the second comma stays in
    /// `z`, so a fourth component makes `z` fail to parse.
    pub fn from_csv(text: &str) -> Self {
        let mut parts = text.splitn(3, ',');
        let mut next = || parts.next().unwrap_or("").to_string();
        let (x, y, z) = (next(), next(), next());
        Self::new(x, y, z)
    }

    /// Replace one field, as an edit in the input surface does.
    pub fn set(&mut self, axis: Axis, value: impl Into<String>) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        };
        *slot = value.into();
    }

    /// Parse all three fields, reporting the first one that fails.
    pub fn try_parse(&self) -> Result<Vec3, ParseError> {
        let x = parse_component(Axis::X, &self.x)?;
        let y = parse_component(Axis::Y, &self.y)?;
        let z = parse_component(Axis::Z, &self.z)?;
        Ok(Vec3::new(x, y, z))
    }

    /// `Some(vector)` or `None` for "not a vector". An entered zero vector is
    /// `Some(Vec3::ZERO)`, never confused with a failed parse.
    pub fn parse(&self) -> Option<Vec3> {
        match self.try_parse() {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(error = %e, "vector fields did not parse");
                None
            }
        }
    }
}

/// Parse free-standing `x,y,z` text, as typed on a command line.
pub fn parse_triple(text: &str) -> Result<Vec3, ParseError> {
    RawVectorFields::from_csv(text).try_parse()
}

fn parse_component(axis: Axis, text: &str) -> Result<f64, ParseError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError { axis, input: text.to_string() }),
    }
}
