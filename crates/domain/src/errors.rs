//! Error types used throughout the resolution engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CalSift
///
/// Every variant is fatal for the resolution call that produced it. Records
/// that are merely malformed (a busy entry without an end, an event whose
/// dates do not parse) are skipped where they are detected and never surface
/// here.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CalSiftError {
    /// A required OAuth field was missing or blank when the credential was
    /// parsed. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The token endpoint answered with a non-success status.
    #[error("Upstream auth error ({status}): {body}")]
    UpstreamAuth { status: u16, body: String },

    /// The token endpoint answered 2xx but without a usable access token.
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The free/busy or events endpoint answered with a non-success status,
    /// or with a success status and a body that is not the expected JSON.
    #[error("Upstream query error ({status}): {body}")]
    UpstreamQuery { status: u16, body: String },

    /// Transport failure before any status was received (connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CalSiftError {
    /// Stable label suitable for structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::UpstreamAuth { .. } => "upstream_auth",
            Self::MalformedResponse(_) => "malformed_response",
            Self::UpstreamQuery { .. } => "upstream_query",
            Self::Network(_) => "network",
            Self::Internal(_) => "internal",
        }
    }

    /// True for failures of the credential exchange step.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::UpstreamAuth { .. } | Self::MalformedResponse(_))
    }
}

/// Result type alias for CalSift operations
pub type Result<T> = std::result::Result<T, CalSiftError>;
