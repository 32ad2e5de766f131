//! ChallengeEngine against scripted generators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use vecview_engine::challenge::generator::{BoxError, MAX_SEED_VECTORS};
use vecview_engine::{
    ChallengeEngine, ChallengeError, ChallengeGenerator, ChallengeState, ChallengeTarget,
    GeneratorRequest, Operation, RandomGenerator, Tolerance, Vec3,
};

/// Replays a list of responses; `Err` entries become generator failures.
struct Scripted {
    responses: Vec<Result<Value, String>>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(responses: Vec<Result<Value, String>>) -> Arc<Self> {
        Arc::new(Self { responses, calls: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl ChallengeGenerator for Scripted {
    async fn generate(&self, _request: &GeneratorRequest) -> Result<Value, BoxError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.responses[i % self.responses.len()] {
            Ok(v) => Ok(v.clone()),
            Err(msg) => Err(msg.clone().into()),
        }
    }
}

/// Blocks until released, then answers.
struct Gated {
    gate: Arc<Notify>,
    response: Value,
}

#[async_trait]
impl ChallengeGenerator for Gated {
    async fn generate(&self, _request: &GeneratorRequest) -> Result<Value, BoxError> {
        self.gate.notified().await;
        Ok(self.response.clone())
    }
}

fn response(operation: &str) -> Value {
    json!({
        "vectors": [{ "x": 1, "y": 2, "z": 1 }, { "x": 2, "y": -1, "z": 1 }],
        "targetVector": { "x": 3, "y": 1, "z": 2 },
        "operation": operation
    })
}

#[tokio::test]
async fn dot_product_target_is_computed_by_engine() {
    let engine = ChallengeEngine::new(Scripted::new(vec![Ok(response("dotProduct"))]), Tolerance::default());
    let challenge = engine.request_challenge(GeneratorRequest::default()).await.unwrap();
    assert_eq!(challenge.operation(), Operation::DotProduct);
    assert_eq!(challenge.target(), ChallengeTarget::Scalar(1.0));

    let result = engine
        .grade_active(Some(Vec3::new(1.0, 2.0, 1.0)), Some(Vec3::new(2.0, -1.0, 1.0)))
        .unwrap();
    assert!(result.passed);
}

#[tokio::test]
async fn generator_failure_keeps_previous_challenge() {
    let engine = ChallengeEngine::new(
        Scripted::new(vec![Ok(response("addition")), Err("upstream timeout".to_string())]),
        Tolerance::default(),
    );
    let first = engine.request_challenge(GeneratorRequest::default()).await.unwrap();

    let err = engine.request_challenge(GeneratorRequest::default()).await.unwrap_err();
    assert_eq!(err, ChallengeError::Generator { message: "upstream timeout".to_string() });
    assert_eq!(engine.state(), ChallengeState::Active(first));
    assert!(!engine.is_requesting());
}

#[tokio::test]
async fn failure_from_idle_stays_idle() {
    let engine = ChallengeEngine::new(Scripted::new(vec![Err("offline".to_string())]), Tolerance::default());
    assert!(engine.request_challenge(GeneratorRequest::default()).await.is_err());
    assert_eq!(engine.state(), ChallengeState::Idle);
}

#[tokio::test]
async fn malformed_response_is_rejected() {
    let engine = ChallengeEngine::new(
        Scripted::new(vec![
            Ok(json!({ "vectors": "nope", "operation": "addition" })),
            Ok(response("quaternionProduct")),
        ]),
        Tolerance::default(),
    );
    let err = engine.request_challenge(GeneratorRequest::default()).await.unwrap_err();
    assert!(matches!(err, ChallengeError::MalformedResponse { .. }));
    let err = engine.request_challenge(GeneratorRequest::default()).await.unwrap_err();
    assert_eq!(err, ChallengeError::UnknownOperation { tag: "quaternionProduct".to_string() });
    assert_eq!(engine.state(), ChallengeState::Idle);
}

#[tokio::test]
async fn concurrent_request_is_rejected() {
    let gate = Arc::new(Notify::new());
    let engine = ChallengeEngine::new(
        Arc::new(Gated { gate: Arc::clone(&gate), response: response("subtraction") }),
        Tolerance::default(),
    );

    let first = engine.request_challenge(GeneratorRequest::default());
    tokio::pin!(first);
    // drive the first request until it parks at the gate
    let parked = tokio::time::timeout(Duration::from_millis(50), &mut first).await;
    assert!(parked.is_err());
    assert!(engine.is_requesting());

    let second = engine.request_challenge(GeneratorRequest::default()).await;
    assert_eq!(second.unwrap_err(), ChallengeError::RequestInFlight);

    gate.notify_one();
    let first = first.await.unwrap();
    assert_eq!(first.operation(), Operation::Subtraction);
    assert_eq!(engine.active(), Some(first));
    assert!(!engine.is_requesting());
}

#[tokio::test]
async fn oversized_or_negative_requests_are_rejected_before_generation() {
    let engine = ChallengeEngine::new(Arc::new(RandomGenerator::with_seed(5)), Tolerance::default());

    let huge = GeneratorRequest { seed_vector_count: usize::MAX, max_magnitude: 10.0 };
    let err = engine.request_challenge(huge).await.unwrap_err();
    assert!(matches!(err, ChallengeError::InvalidRequest { .. }));

    let negative = GeneratorRequest { seed_vector_count: 2, max_magnitude: -3.0 };
    let err = engine.request_challenge(negative).await.unwrap_err();
    assert!(matches!(err, ChallengeError::InvalidRequest { .. }));

    assert_eq!(engine.state(), ChallengeState::Idle);
    assert!(!engine.is_requesting());

    let most = GeneratorRequest { seed_vector_count: MAX_SEED_VECTORS, max_magnitude: 10.0 };
    let challenge = engine.request_challenge(most).await.unwrap();
    assert_eq!(challenge.vectors().len(), MAX_SEED_VECTORS);
}

#[tokio::test]
async fn random_generator_challenges_are_solvable_with_seeds() {
    let engine = ChallengeEngine::new(Arc::new(RandomGenerator::with_seed(2024)), Tolerance::default());
    for _ in 0..16 {
        let challenge = engine.request_challenge(GeneratorRequest::default()).await.unwrap();
        let seeds = challenge.vectors();
        let result = engine.grade_active(Some(seeds[0]), Some(seeds[1])).unwrap();
        assert!(result.passed, "{challenge:?}");
    }
}
