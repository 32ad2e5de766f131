//! Challenge lifecycle: `Idle` → `Active` → (graded any number of times) →
//! replaced by the next `Active`.
//!
//! At most one generator request is outstanding per engine. A second request
//! made while the first is pending is rejected with
//! [`ChallengeError::RequestInFlight`], so two responses can never race into
//! the Active slot. A failed request leaves the current state untouched.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::generator::{ChallengeGenerator, GeneratedChallenge, GeneratorRequest};
use super::{grade, Challenge, GradeResult};
use crate::config::EngineConfig;
use crate::error::{ChallengeError, ChallengeResult};
use crate::tolerance::Tolerance;
use crate::vector::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub enum ChallengeState {
    Idle,
    Active(Arc<Challenge>),
}

/// Clears the in-flight flag when the request finishes or its future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ChallengeEngine {
    generator: Arc<dyn ChallengeGenerator>,
    tolerance: Tolerance,
    state: RwLock<ChallengeState>,
    in_flight: AtomicBool,
    next_id: AtomicU64,
}

impl ChallengeEngine {
    pub fn new(generator: Arc<dyn ChallengeGenerator>, tolerance: Tolerance) -> Self {
        Self {
            generator,
            tolerance,
            state: RwLock::new(ChallengeState::Idle),
            in_flight: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_config(generator: Arc<dyn ChallengeGenerator>, config: &EngineConfig) -> Self {
        Self::new(generator, config.tolerance())
    }

    pub fn state(&self) -> ChallengeState {
        self.state.read().clone()
    }

    /// The Active challenge, if any.
    pub fn active(&self) -> Option<Arc<Challenge>> {
        match &*self.state.read() {
            ChallengeState::Active(c) => Some(Arc::clone(c)),
            ChallengeState::Idle => None,
        }
    }

    pub fn is_requesting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Ask the generator for a new challenge and make it Active.
    ///
    /// The dot product target is computed from the seeds here; whatever
    /// vector target the generator sent for it is dropped.
    pub async fn request_challenge(
        &self,
        request: GeneratorRequest,
    ) -> ChallengeResult<Arc<Challenge>> {
        request.validate()?;

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!("rejected challenge request: another request is in flight");
            ChallengeError::RequestInFlight
        })?;

        debug!(
            seed_vectors = request.seed_vector_count,
            max_magnitude = request.max_magnitude,
            "requesting challenge"
        );

        let raw = self.generator.generate(&request).await.map_err(|e| {
            warn!(error = %e, "challenge generator failed");
            ChallengeError::generator(e)
        })?;

        let challenge = GeneratedChallenge::from_json(raw)
            .and_then(|g| Challenge::from_generated(self.next_id.fetch_add(1, Ordering::Relaxed), g))
            .map_err(|e| {
                warn!(error = %e, "discarding generator response");
                e
            })?;
        let challenge = Arc::new(challenge);

        *self.state.write() = ChallengeState::Active(Arc::clone(&challenge));
        info!(
            challenge_id = challenge.id(),
            operation = %challenge.operation(),
            "challenge active"
        );
        Ok(challenge)
    }

    /// Grade against the Active challenge. The state does not change, so the
    /// user may retry.
    pub fn grade_active(
        &self,
        user_v1: Option<Vec3>,
        user_v2: Option<Vec3>,
    ) -> ChallengeResult<GradeResult> {
        let challenge = self.active().ok_or(ChallengeError::NoActiveChallenge)?;
        grade(&challenge, user_v1, user_v2, self.tolerance)
    }

    /// Drop the Active challenge.
    pub fn clear(&self) {
        *self.state.write() = ChallengeState::Idle;
    }
}
