//! Error types for the challenge lifecycle.
//!
//! Every failure is local and recoverable: re-enter valid input or retry
//! generation.

use thiserror::Error;

/// Result type for challenge operations.
pub type ChallengeResult<T> = Result<T, ChallengeError>;

/// Errors raised while requesting or grading a challenge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChallengeError {
    /// One or both operand vectors did not parse.
    #[error("incomplete input: {missing} is not a valid vector")]
    IncompleteInput { missing: &'static str },

    /// Operation tag outside the closed set.
    #[error("unknown challenge operation: {tag:?}")]
    UnknownOperation { tag: String },

    /// A stored target whose shape does not fit the operation.
    #[error("{operation} challenge carries a {found} target")]
    TargetMismatch {
        operation: String,
        found: &'static str,
    },

    /// The generator collaborator reported an error.
    #[error("challenge generator failed: {message}")]
    Generator { message: String },

    /// The generator answered, but not in the agreed shape.
    #[error("malformed generator response: {message}")]
    MalformedResponse { message: String },

    /// Request parameters out of range.
    #[error("invalid challenge request: {message}")]
    InvalidRequest { message: String },

    /// A challenge request is already outstanding.
    #[error("a challenge request is already in flight")]
    RequestInFlight,

    /// Grading was asked for with no challenge Active.
    #[error("no active challenge")]
    NoActiveChallenge,
}

impl ChallengeError {
    /// Create a generator error from any error type.
    pub fn generator<E: std::fmt::Display>(e: E) -> Self {
        Self::Generator {
            message: e.to_string(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
