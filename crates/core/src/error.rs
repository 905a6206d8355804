//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures live here. Disk and lock failures belong to
/// `natours-infra::StoreError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier could not be parsed or is out of range.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The table already holds the largest representable id.
    #[error("identifier space exhausted after {0}")]
    IdsExhausted(u64),

    /// A value failed validation (e.g. a record that is not a JSON object).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
