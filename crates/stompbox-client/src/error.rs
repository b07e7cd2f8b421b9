//! Error types for the processing session protocol.

use thiserror::Error;

use crate::backend::BackendMode;

/// A request that did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never got an HTTP response (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("request failed with status code {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The backend's structured `detail` field, when it sent one.
        detail: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Build a status error, extracting `detail` from a JSON error body.
    ///
    /// A string `detail` is used as is. Any other non-null JSON value (such
    /// as a list of validation errors) is rendered as compact JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail")? {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) if s.trim().is_empty() => None,
                serde_json::Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            });
        TransportError::Status { status, detail }
    }

    /// The single message shown to the user for this failure.
    ///
    /// Prefers the backend's own explanation over the generic transport text.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// The capability probe failed.
///
/// Never surfaced to the user; callers fall back to local mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The health endpoint could not be reached or decoded.
    #[error("capability probe failed: {0}")]
    Transport(#[from] TransportError),

    /// The backend reported a mode this client does not know.
    #[error("backend reported unknown mode '{0}'")]
    UnknownMode(String),
}

/// A submission rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No effect is enabled.
    #[error("Please enable at least one effect")]
    EmptyChain,

    /// Local mode with no input file chosen.
    #[error("Please select an input file")]
    NoInputFile,

    /// Object-storage mode with no successful upload.
    #[error("Please upload an audio file first")]
    NoUpload,
}

/// Errors returned by [`ProcessingSession`](crate::ProcessingSession) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Pre-flight validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend or the storage endpoint failed.
    #[error("{}", .0.user_message())]
    Transport(#[from] TransportError),

    /// The operation only exists in the other mode.
    #[error("this operation requires {expected} mode, but the backend runs in {actual} mode")]
    WrongMode {
        /// Mode the operation needs.
        expected: BackendMode,
        /// Mode the session is in.
        actual: BackendMode,
    },

    /// The chosen file is not in the backend's list.
    #[error("input file '{0}' is not offered by the backend")]
    UnknownInputFile(String),

    /// A result was handed to the session with no submission in flight.
    #[error("no submission is in flight")]
    NotSubmitting,
}
