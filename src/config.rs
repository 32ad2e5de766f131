// src/config.rs

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::challenge::generator::GeneratorRequest;
use crate::tolerance::{Tolerance, DEFAULT_TOLERANCE};

/// Vectors shorter than this are not handed to the renderer.
pub const DEFAULT_DRAW_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Grading tolerance for scalars and vectors.
    pub tolerance: f64,
    pub draw_epsilon: f64,
    /// Seed vectors asked of the generator per challenge.
    pub seed_vector_count: usize,
    /// Component bound passed to the generator.
    pub max_magnitude: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            draw_epsilon: DEFAULT_DRAW_EPSILON,
            seed_vector_count: 2,
            max_magnitude: 10.0,
        }
    }
}

impl EngineConfig {
    /// Load config overrides from environment variables.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Values that do not parse, and
    /// real-valued settings that are not finite and positive, are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(tol) = positive(&lookup, "VECVIEW_TOLERANCE") {
            self.tolerance = tol;
        }
        if let Some(eps) = positive(&lookup, "VECVIEW_DRAW_EPSILON") {
            self.draw_epsilon = eps;
        }
        if let Some(val) = lookup("VECVIEW_SEED_VECTORS") {
            if let Ok(n) = val.trim().parse::<usize>() {
                self.seed_vector_count = n;
            }
        }
        if let Some(m) = positive(&lookup, "VECVIEW_MAX_MAGNITUDE") {
            self.max_magnitude = m;
        }
        self
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance(self.tolerance)
    }

    pub fn generator_request(&self) -> GeneratorRequest {
        GeneratorRequest {
            seed_vector_count: self.seed_vector_count,
            max_magnitude: self.max_magnitude,
        }
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    let value = lookup(key)?.trim().parse::<f64>().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        warn!(key, value, "ignoring non-positive override");
        None
    }
}
