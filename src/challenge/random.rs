//! A local generator that rolls challenges with `rand`.
//!
//! Seed components are small integers so the challenge can be solved by hand;
//! each seed stays inside a ball of radius `max_magnitude`. Bounds too small
//! for integers fall back to fractional components.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use super::generator::{BoxError, ChallengeGenerator, GeneratorRequest};
use super::Operation;
use crate::algebra::{add, cross, subtract};
use crate::vector::Vec3;

pub struct RandomGenerator {
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Reproducible sequence of challenges.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    /// `request` must already have passed [`GeneratorRequest::validate`].
    fn roll(&self, request: &GeneratorRequest) -> Value {
        let mut rng = self.rng.lock();
        // |v| <= sqrt(3) * radius <= max_magnitude
        let radius = request.max_magnitude / 3f64.sqrt();
        let bound = radius.floor() as i64;
        let count = request.seed_vector_count.max(2);

        let mut component = || {
            if bound >= 1 {
                rng.gen_range(-bound..=bound) as f64
            } else {
                rng.gen_range(-radius..=radius)
            }
        };
        let vectors: Vec<Vec3> = (0..count)
            .map(|_| Vec3::new(component(), component(), component()))
            .collect();

        let operation = Operation::ALL[rng.gen_range(0..Operation::ALL.len())];
        let (a, b) = (vectors[0], vectors[1]);
        let target = match operation {
            Operation::Addition => add(a, b),
            Operation::Subtraction => subtract(a, b),
            Operation::CrossProduct => cross(a, b),
            Operation::DotProduct => Vec3::ZERO,
        };

        json!({
            "vectors": vectors,
            "targetVector": target,
            "operation": operation.tag(),
        })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeGenerator for RandomGenerator {
    async fn generate(&self, request: &GeneratorRequest) -> Result<Value, BoxError> {
        request.validate()?;
        Ok(self.roll(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::{grade, Challenge, ChallengeTarget, GeneratedChallenge};
    use crate::tolerance::Tolerance;

    #[test]
    fn rolls_are_valid_and_solvable() {
        let generator = RandomGenerator::with_seed(7);
        let request = GeneratorRequest::default();
        for id in 0..64 {
            let generated = GeneratedChallenge::from_json(generator.roll(&request)).unwrap();
            for v in &generated.vectors {
                assert!(v.norm() <= request.max_magnitude + 1e-9);
            }
            let seeds = generated.vectors.clone();
            let challenge = Challenge::from_generated(id, generated).unwrap();
            let result =
                grade(&challenge, Some(seeds[0]), Some(seeds[1]), Tolerance::default()).unwrap();
            assert!(result.passed, "{challenge:?}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let request = GeneratorRequest::default();
        let a = RandomGenerator::with_seed(42);
        let b = RandomGenerator::with_seed(42);
        for _ in 0..8 {
            assert_eq!(a.roll(&request), b.roll(&request));
        }
    }

    #[tokio::test]
    async fn generate_rejects_out_of_range_requests() {
        let generator = RandomGenerator::with_seed(3);
        let negative = GeneratorRequest { seed_vector_count: 2, max_magnitude: -4.0 };
        assert!(generator.generate(&negative).await.is_err());
        let too_many = GeneratorRequest { seed_vector_count: usize::MAX, max_magnitude: 10.0 };
        assert!(generator.generate(&too_many).await.is_err());
        assert!(generator.generate(&GeneratorRequest::default()).await.is_ok());
    }

    #[test]
    fn tiny_magnitude_still_yields_two_seeds() {
        let generator = RandomGenerator::with_seed(1);
        let request = GeneratorRequest { seed_vector_count: 1, max_magnitude: 0.5 };
        let generated = GeneratedChallenge::from_json(generator.roll(&request)).unwrap();
        assert_eq!(generated.vectors.len(), 2);
        for v in &generated.vectors {
            assert!(v.norm() <= request.max_magnitude + 1e-9);
        }
        let challenge = Challenge::from_generated(0, generated).unwrap();
        if challenge.operation() == Operation::DotProduct {
            assert!(matches!(challenge.target(), ChallengeTarget::Scalar(_)));
        }
    }
}
