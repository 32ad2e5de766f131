//! Challenges: what the user must reproduce, and how an attempt is graded.
//!
//! A [`Challenge`] is immutable once built. Its target is fixed at creation;
//! for [`Operation::DotProduct`] that target is the scalar `seed[0] · seed[1]`,
//! computed here and never taken from the generator.

pub mod engine;
pub mod generator;
pub mod random;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algebra::{add, cross, dot, subtract};
use crate::error::{ChallengeError, ChallengeResult};
use crate::tolerance::Tolerance;
use crate::vector::{Rounded, Vec3};

pub use engine::{ChallengeEngine, ChallengeState};
pub use generator::{ChallengeGenerator, GeneratedChallenge, GeneratorRequest};
pub use random::RandomGenerator;

/// The closed set of gradeable operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Addition,
    Subtraction,
    CrossProduct,
    DotProduct,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::CrossProduct,
        Operation::DotProduct,
    ];

    /// Wire tag used by the generator.
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::CrossProduct => "crossProduct",
            Operation::DotProduct => "dotProduct",
        }
    }

    /// Whether the target is a vector (everything but the dot product).
    pub fn is_vector_valued(&self) -> bool {
        !matches!(self, Operation::DotProduct)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operation {
    type Err = ChallengeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.tag() == s)
            .ok_or_else(|| ChallengeError::UnknownOperation { tag: s.to_string() })
    }
}

/// The value a challenge asks the user to reproduce.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ChallengeTarget {
    Vector(Vec3),
    Scalar(f64),
}

impl fmt::Display for ChallengeTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChallengeTarget::Vector(v) => write!(f, "{}", Rounded(v, 2)),
            ChallengeTarget::Scalar(s) => write!(f, "{s:.2}"),
        }
    }
}

/// A generated problem. Only [`Challenge::from_generated`] builds one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Challenge {
    id: u64,
    vectors: Vec<Vec3>,
    operation: Operation,
    target: ChallengeTarget,
}

impl Challenge {
    /// Build a challenge from validated generator output.
    ///
    /// Vector-valued operations keep the generator's target. The dot product
    /// target is derived from the first two seeds and the generator's vector
    /// target is discarded.
    pub fn from_generated(id: u64, generated: GeneratedChallenge) -> ChallengeResult<Self> {
        let GeneratedChallenge { vectors, target_vector, operation } = generated;
        if vectors.len() < 2 {
            return Err(ChallengeError::malformed(format!(
                "expected at least 2 seed vectors, got {}",
                vectors.len()
            )));
        }
        let target = match operation {
            Operation::DotProduct => ChallengeTarget::Scalar(dot(vectors[0], vectors[1])),
            _ => ChallengeTarget::Vector(target_vector),
        };
        Ok(Self { id, vectors, operation, target })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn vectors(&self) -> &[Vec3] {
        &self.vectors
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn target(&self) -> ChallengeTarget {
        self.target
    }
}

/// What the user's vectors produced under the challenge operation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum UserValue {
    Vector(Vec3),
    Scalar(f64),
}

/// Outcome of one grading attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    pub passed: bool,
    pub operation: Operation,
    pub user_value: UserValue,
    pub target: ChallengeTarget,
}

impl GradeResult {
    /// Feedback text for the input surface.
    pub fn feedback(&self) -> String {
        if self.passed {
            return "Challenge Complete! Well done!".to_string();
        }
        let mut message = String::from("Almost there! Keep trying.");
        match (self.user_value, self.target) {
            (UserValue::Vector(v), _) => {
                message.push_str(&format!(" Your vector: {}.", Rounded(&v, 2)));
            }
            (UserValue::Scalar(s), ChallengeTarget::Scalar(t)) => {
                message.push_str(&format!(" Your dot product: {s:.2}. Target: {t:.2}."));
            }
            (UserValue::Scalar(s), ChallengeTarget::Vector(_)) => {
                message.push_str(&format!(" Your dot product: {s:.2}. Target: N/A."));
            }
        }
        message
    }
}

/// Grade the user's vectors against `challenge`.
///
/// Both operands must have parsed; a missing operand is
/// [`ChallengeError::IncompleteInput`], never a zero vector.
pub fn grade(
    challenge: &Challenge,
    user_v1: Option<Vec3>,
    user_v2: Option<Vec3>,
    tol: Tolerance,
) -> ChallengeResult<GradeResult> {
    let (v1, v2) = match (user_v1, user_v2) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(_)) => return Err(ChallengeError::IncompleteInput { missing: "v1" }),
        (Some(_), None) => return Err(ChallengeError::IncompleteInput { missing: "v2" }),
        (None, None) => return Err(ChallengeError::IncompleteInput { missing: "v1 and v2" }),
    };

    let (user_value, passed) = match (challenge.operation, challenge.target) {
        (Operation::Addition, ChallengeTarget::Vector(t)) => {
            let r = add(v1, v2);
            (UserValue::Vector(r), tol.vectors_equal(r, t))
        }
        (Operation::Subtraction, ChallengeTarget::Vector(t)) => {
            let r = subtract(v1, v2);
            (UserValue::Vector(r), tol.vectors_equal(r, t))
        }
        (Operation::CrossProduct, ChallengeTarget::Vector(t)) => {
            let r = cross(v1, v2);
            (UserValue::Vector(r), tol.vectors_equal(r, t))
        }
        (Operation::DotProduct, ChallengeTarget::Scalar(t)) => {
            let r = dot(v1, v2);
            (UserValue::Scalar(r), tol.scalars_equal(r, t))
        }
        // `from_generated` never pairs these
        (op, target) => {
            let found = match target {
                ChallengeTarget::Vector(_) => "vector",
                ChallengeTarget::Scalar(_) => "scalar",
            };
            return Err(ChallengeError::TargetMismatch { operation: op.tag().to_string(), found });
        }
    };

    debug!(
        challenge_id = challenge.id,
        operation = %challenge.operation,
        passed,
        "graded challenge attempt"
    );

    Ok(GradeResult {
        passed,
        operation: challenge.operation,
        user_value,
        target: challenge.target,
    })
}
