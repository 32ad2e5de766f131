//! The challenge generator collaborator and its data contract.
//!
//! Generators answer with loosely typed JSON. [`GeneratedChallenge::from_json`]
//! is the boundary: anything that does not fit the schema becomes a
//! [`ChallengeError::MalformedResponse`] (or `UnknownOperation` for a bad tag).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Operation;
use crate::error::{ChallengeError, ChallengeResult};
use crate::vector::Vec3;

/// Error type generators report; the engine wraps it in [`ChallengeError::Generator`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Most seed vectors a single challenge may ask for.
pub const MAX_SEED_VECTORS: usize = 16;

/// Parameters sent to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorRequest {
    pub seed_vector_count: usize,
    /// Bound on each seed component.
    pub max_magnitude: f64,
}

impl Default for GeneratorRequest {
    fn default() -> Self {
        Self {
            seed_vector_count: 2,
            max_magnitude: 10.0,
        }
    }
}

impl GeneratorRequest {
    pub fn validate(&self) -> ChallengeResult<()> {
        if !(1..=MAX_SEED_VECTORS).contains(&self.seed_vector_count) {
            return Err(ChallengeError::InvalidRequest {
                message: format!(
                    "seed vector count must be between 1 and {MAX_SEED_VECTORS}, got {}",
                    self.seed_vector_count
                ),
            });
        }
        if !(self.max_magnitude.is_finite() && self.max_magnitude > 0.0) {
            return Err(ChallengeError::InvalidRequest {
                message: format!("max magnitude must be positive, got {}", self.max_magnitude),
            });
        }
        Ok(())
    }
}

/// Produces challenge content. Randomness, prompting and transport live behind this trait.
#[async_trait]
pub trait ChallengeGenerator: Send + Sync {
    /// Produce one challenge as raw JSON:
    /// `{ "vectors": [{x,y,z}, ..], "targetVector": {x,y,z}, "operation": "<tag>" }`.
    async fn generate(&self, request: &GeneratorRequest) -> Result<Value, BoxError>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChallenge {
    vectors: Vec<Vec3>,
    #[serde(default)]
    target_vector: Option<Vec3>,
    operation: String,
}

/// Generator output that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedChallenge {
    pub vectors: Vec<Vec3>,
    /// Unused for [`Operation::DotProduct`].
    pub target_vector: Vec3,
    pub operation: Operation,
}

impl GeneratedChallenge {
    pub fn from_json(value: Value) -> ChallengeResult<Self> {
        let wire: WireChallenge =
            serde_json::from_value(value).map_err(|e| ChallengeError::malformed(e.to_string()))?;

        let operation: Operation = wire.operation.parse()?;

        if wire.vectors.len() < 2 {
            return Err(ChallengeError::malformed(format!(
                "expected at least 2 seed vectors, got {}",
                wire.vectors.len()
            )));
        }

        let target_vector = match wire.target_vector {
            Some(t) => t,
            None if operation.is_vector_valued() => {
                return Err(ChallengeError::malformed(format!(
                    "{operation} challenge is missing targetVector"
                )))
            }
            None => Vec3::ZERO,
        };

        Ok(Self {
            vectors: wire.vectors,
            target_vector,
            operation,
        })
    }

    pub fn parse_str(text: &str) -> ChallengeResult<Self> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|e| ChallengeError::malformed(e.to_string()))?;
        Self::from_json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_response() {
        let g = GeneratedChallenge::from_json(json!({
            "vectors": [{ "x": 1, "y": 2, "z": 1 }, { "x": 2, "y": -1, "z": 1 }],
            "targetVector": { "x": 3, "y": 1, "z": 2 },
            "operation": "addition"
        }))
        .unwrap();
        assert_eq!(g.operation, Operation::Addition);
        assert_eq!(g.vectors.len(), 2);
        assert_eq!(g.target_vector, Vec3::new(3.0, 1.0, 2.0));
    }

    #[test]
    fn dot_product_may_omit_target_vector() {
        let g = GeneratedChallenge::parse_str(
            r#"{"vectors":[{"x":1,"y":0,"z":0},{"x":0,"y":1,"z":0}],"operation":"dotProduct"}"#,
        )
        .unwrap();
        assert_eq!(g.operation, Operation::DotProduct);
    }

    #[test]
    fn rejects_malformed_shapes() {
        let cases = [
            json!("not an object"),
            json!({ "vectors": [], "targetVector": { "x": 0, "y": 0, "z": 0 }, "operation": "addition" }),
            json!({ "vectors": [{ "x": 1, "y": 2 }, { "x": 1, "y": 2, "z": 3 }], "targetVector": { "x": 0, "y": 0, "z": 0 }, "operation": "addition" }),
            json!({ "vectors": [{ "x": "1", "y": 2, "z": 3 }, { "x": 1, "y": 2, "z": 3 }], "targetVector": { "x": 0, "y": 0, "z": 0 }, "operation": "addition" }),
            json!({ "vectors": [{ "x": 1, "y": 2, "z": 3 }, { "x": 1, "y": 2, "z": 3 }], "operation": "crossProduct" }),
        ];
        for case in cases {
            let err = GeneratedChallenge::from_json(case).unwrap_err();
            assert!(matches!(err, ChallengeError::MalformedResponse { .. }), "{err:?}");
        }
    }

    #[test]
    fn unknown_operation_tag_is_reported() {
        let err = GeneratedChallenge::from_json(json!({
            "vectors": [{ "x": 1, "y": 2, "z": 3 }, { "x": 1, "y": 2, "z": 3 }],
            "targetVector": { "x": 0, "y": 0, "z": 0 },
            "operation": "division"
        }))
        .unwrap_err();
        assert_eq!(err, ChallengeError::UnknownOperation { tag: "division".into() });
    }

    #[test]
    fn request_validation() {
        assert!(GeneratorRequest::default().validate().is_ok());
        let zero = GeneratorRequest { seed_vector_count: 0, ..Default::default() };
        assert!(matches!(zero.validate(), Err(ChallengeError::InvalidRequest { .. })));
        let neg = GeneratorRequest { max_magnitude: -1.0, ..Default::default() };
        assert!(neg.validate().is_err());
        let nan = GeneratorRequest { max_magnitude: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
        let most = GeneratorRequest { seed_vector_count: MAX_SEED_VECTORS, ..Default::default() };
        assert!(most.validate().is_ok());
        let too_many = GeneratorRequest { seed_vector_count: MAX_SEED_VECTORS + 1, ..Default::default() };
        assert!(matches!(too_many.validate(), Err(ChallengeError::InvalidRequest { .. })));
        let huge = GeneratorRequest { seed_vector_count: usize::MAX, ..Default::default() };
        assert!(huge.validate().is_err());
    }
}
