//! Client error model.

use dispatch_core::{DomainError, codes};
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure of a single portal call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body-read failure, as reported by reqwest.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx HTTP status.
    #[error("{path} answered HTTP {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// The body did not match the expected shape.
    #[error("could not decode response of {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request failed a local boundary check and was never sent.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The envelope carried a non-success application code.
    #[error("portal rejected the request ({code}): {message}")]
    Api { code: i32, message: String },

    /// A local file could not be read for upload.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Known business outcomes behind [`ClientError::Api`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiReason {
    AlreadyTaken,
    NotEligible,
    DuplicateDisclaimer,
    DraftNotAccepted,
    ValidationFailed,
    Unauthorized,
    NotFound,
    Other,
}

impl ApiReason {
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::ORDER_ALREADY_TAKEN => ApiReason::AlreadyTaken,
            codes::SEIZE_NOT_ELIGIBLE => ApiReason::NotEligible,
            codes::DUPLICATE_DISCLAIMER => ApiReason::DuplicateDisclaimer,
            codes::DRAFT_NOT_ACCEPTED => ApiReason::DraftNotAccepted,
            codes::BAD_REQUEST => ApiReason::ValidationFailed,
            codes::UNAUTHORIZED => ApiReason::Unauthorized,
            codes::NOT_FOUND => ApiReason::NotFound,
            _ => ApiReason::Other,
        }
    }
}

impl ClientError {
    pub fn decode(path: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.to_string(),
            source,
        }
    }

    /// Classify an application rejection. `None` for every other failure.
    pub fn api_reason(&self) -> Option<ApiReason> {
        match self {
            Self::Api { code, .. } => Some(ApiReason::from_code(*code)),
            _ => None,
        }
    }

    /// Whether the request was stopped locally before reaching the server.
    pub fn is_local_validation(&self) -> bool {
        matches!(self, Self::Validation(DomainError::Validation { .. }))
    }
}
