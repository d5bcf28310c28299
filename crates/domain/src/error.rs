//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A character id that is not part of the cast
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    /// A conversation stage transition the state machine forbids
    #[error("Invalid stage transition: {from} -> {to}")]
    InvalidStageTransition {
        from: &'static str,
        to: &'static str,
    },
}

impl DomainError {
    /// Create an unknown character error
    pub fn unknown_character(id: impl Into<String>) -> Self {
        Self::UnknownCharacter(id.into())
    }

    /// Create an invalid stage transition error
    pub fn invalid_transition(from: &'static str, to: &'static str) -> Self {
        Self::InvalidStageTransition { from, to }
    }
}
