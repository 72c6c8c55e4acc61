//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic failures only: local boundary checks on outbound requests,
/// lifecycle rules on order snapshots, and wire values that do not map to a
/// known code. Transport problems belong to the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A request field failed a boundary check before anything was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A lifecycle rule was broken (e.g. leaving a terminal design state).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A coded wire value is outside the documented range.
    #[error("unknown {kind} code: {value}")]
    UnknownCode { kind: &'static str, value: i64 },

    /// An identifier was invalid (non-positive or unparsable).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A server timestamp did not match any accepted layout.
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

impl DomainError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn unknown_code(kind: &'static str, value: i64) -> Self {
        Self::UnknownCode { kind, value }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Fail with a validation error when `value` is blank.
pub fn require_non_blank(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}
