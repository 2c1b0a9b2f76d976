//! Shared error type across turnstile crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// No policy is registered under the requested key.
    PolicyNotFound,
    /// The policy is registered but could not be built.
    PolicyUnavailable,
    /// Role name did not resolve.
    RoleNotFound,
    /// Subject identity did not resolve.
    SubjectNotFound,
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::PolicyNotFound => "POLICY_NOT_FOUND",
            ClientCode::PolicyUnavailable => "POLICY_UNAVAILABLE",
            ClientCode::RoleNotFound => "ROLE_NOT_FOUND",
            ClientCode::SubjectNotFound => "SUBJECT_NOT_FOUND",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TurnstileError>;

/// Unified error type used by core and gate.
///
/// A policy that answers "no" is not an error: see [`crate::Verdict`].
/// These variants cover policies that could not be run at all.
#[derive(Debug, Error)]
pub enum TurnstileError {
    #[error("Policy {key} does not exist.")]
    PolicyNotFound { key: String },
    #[error("policy {key} ({policy}) could not be built: {reason}")]
    PolicyUnavailable {
        key: String,
        policy: String,
        reason: String,
    },
    #[error("role {name} does not exist")]
    RoleNotFound { name: String },
    #[error("subject {0} does not exist")]
    SubjectNotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TurnstileError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TurnstileError::PolicyNotFound { .. } => ClientCode::PolicyNotFound,
            TurnstileError::PolicyUnavailable { .. } => ClientCode::PolicyUnavailable,
            TurnstileError::RoleNotFound { .. } => ClientCode::RoleNotFound,
            TurnstileError::SubjectNotFound(_) => ClientCode::SubjectNotFound,
            TurnstileError::BadRequest(_) => ClientCode::BadRequest,
            TurnstileError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            TurnstileError::Internal(_) => ClientCode::Internal,
        }
    }
}
