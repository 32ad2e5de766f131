#![doc = include_str!("../README.md")]

pub mod vector;
pub mod algebra;
pub mod tolerance;
pub mod input;
pub mod challenge;
pub mod scene;
pub mod config;
pub mod error;

pub mod ops;

pub use vector::{Vec3, Rounded};
pub use tolerance::{scalars_equal, vectors_equal, Tolerance, DEFAULT_TOLERANCE};
pub use input::{Axis, ParseError, RawVectorFields};
pub use challenge::{
    grade, Challenge, ChallengeEngine, ChallengeGenerator, ChallengeState, ChallengeTarget,
    GradeResult, GeneratedChallenge, GeneratorRequest, Operation, RandomGenerator, UserValue,
};
pub use scene::{Color, DisplayVector, DotProductInfo, SceneSnapshot, SceneView, Toggles};
pub use config::EngineConfig;
pub use error::{ChallengeError, ChallengeResult};

pub use crate::ops::projection::*;      // Vec3Projection
