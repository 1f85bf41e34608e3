//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// state-machine guards). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A lifecycle operation was attempted in a state that forbids it.
    #[error("invalid transition: cannot {operation} a ticket in state {state}")]
    InvalidTransition {
        operation: &'static str,
        state: String,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced ticket, event, or user does not exist.
    #[error("not found")]
    NotFound,

    /// The existence verifier itself failed (network/timeout), as opposed to
    /// returning a definitive not-found. Kept distinct so callers can decide
    /// whether to retry instead of treating the reference as absent.
    #[error("existence verification unavailable: {0}")]
    VerificationUnavailable(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_transition(operation: &'static str, state: impl Into<String>) -> Self {
        Self::InvalidTransition {
            operation,
            state: state.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn verification_unavailable(msg: impl Into<String>) -> Self {
        Self::VerificationUnavailable(msg.into())
    }
}
