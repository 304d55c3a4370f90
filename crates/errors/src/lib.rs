//! vr-errors - unified error handling
//!
//! Every failure in the resource is terminal for the invocation. Errors carry
//! enough context (operation, path, key) to tell the operator which stage broke.

use serde::Serialize;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// `stage` is "store" until a caller knows which step was talking to it.
    #[error("Transport error: {message}")]
    Transport {
        stage: &'static str,
        message: String,
    },

    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    #[error("404 Secret @ `{path}` not found")]
    NotFound { path: String },

    #[error("Secret @ `{path}`: value of key `{key}` is {found}, expected a string")]
    TypeMismatch {
        path: String,
        key: String,
        found: String,
    },

    #[error("Error parsing input: {0}")]
    Decode(String),

    #[error("Error writing response: {0}")]
    Encode(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Classification of an [`AppError`], for callers that branch on the
/// failure class rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    Transport,
    AuthRejected,
    NotFound,
    TypeMismatch,
    Decode,
    Encode,
    FileIo,
    Validation,
    Unsupported,
}

impl AppError {
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            stage: "store",
            message: msg.into(),
        }
    }

    /// Attribute a transport failure to `stage`. Other errors already carry
    /// a fixed stage and are returned unchanged.
    pub fn in_stage(self, stage: &'static str) -> Self {
        match self {
            Self::Transport { message, .. } => Self::Transport { stage, message },
            other => other,
        }
    }

    pub fn auth_rejected(msg: impl Into<String>) -> Self {
        Self::AuthRejected(msg.into())
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn type_mismatch(
        path: impl Into<String>,
        key: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            key: key.into(),
            found: found.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn file_io(msg: impl Into<String>) -> Self {
        Self::FileIo(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential(_) => ErrorKind::MissingCredential,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::AuthRejected(_) => ErrorKind::AuthRejected,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::FileIo(_) => ErrorKind::FileIo,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    /// Pipeline stage the error belongs to, as shown to the operator.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingCredential(_) | Self::AuthRejected(_) => "authenticate",
            Self::NotFound { .. } | Self::TypeMismatch { .. } => "fetch",
            Self::Transport { stage, .. } => *stage,
            Self::Decode(_) => "request",
            Self::Encode(_) => "response",
            Self::FileIo(_) => "persist",
            Self::Validation(_) => "config",
            Self::Unsupported(_) => "dispatch",
        }
    }

    /// Process exit code for a terminal error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Decode(_) | Self::Validation(_) | Self::Unsupported(_) => 2,
            Self::MissingCredential(_) | Self::AuthRejected(_) => 3,
            Self::NotFound { .. } | Self::TypeMismatch { .. } => 4,
            Self::Transport { .. } => 5,
            Self::Encode(_) | Self::FileIo(_) => 6,
        }
    }

    /// Structured summary for log sinks
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            stage: self.stage(),
            detail: self.to_string(),
        }
    }
}

/// Serializable error summary
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub stage: &'static str,
    pub detail: String,
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_path() {
        let err = AppError::not_found("secret/data/db");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "404 Secret @ `secret/data/db` not found");
    }

    #[test]
    fn test_not_found_is_not_transport() {
        let missing = AppError::not_found("secret/a");
        let unreachable = AppError::transport("connection refused reading secret/a");
        assert_ne!(missing.kind(), unreachable.kind());
        assert_ne!(missing.exit_code(), unreachable.exit_code());
    }

    #[test]
    fn test_type_mismatch_names_key() {
        let err = AppError::type_mismatch("secret/a", "port", "a number");
        assert!(err.to_string().contains("`port`"));
        assert!(err.to_string().contains("secret/a"));
        assert_eq!(err.stage(), "fetch");
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(AppError::missing_credential("app_id").stage(), "authenticate");
        assert_eq!(AppError::auth_rejected("denied").stage(), "authenticate");
        assert_eq!(AppError::file_io("disk full").stage(), "persist");
        assert_eq!(AppError::decode("bad json").stage(), "request");
    }

    #[test]
    fn test_transport_stage_follows_caller() {
        let err = AppError::transport("connection refused");
        assert_eq!(err.stage(), "store");

        let err = err.in_stage("authenticate");
        assert_eq!(err.stage(), "authenticate");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "Transport error: connection refused");
        assert_eq!(err.to_report().stage, "authenticate");
    }

    #[test]
    fn test_in_stage_keeps_fixed_stages() {
        assert_eq!(AppError::not_found("secret/a").in_stage("authenticate").stage(), "fetch");
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = [
            AppError::missing_credential("x"),
            AppError::transport("x"),
            AppError::auth_rejected("x"),
            AppError::not_found("x"),
            AppError::type_mismatch("x", "y", "z"),
            AppError::decode("x"),
            AppError::encode("x"),
            AppError::file_io("x"),
            AppError::validation("x"),
            AppError::unsupported("x"),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }

    #[test]
    fn test_report_serializes_kind_snake_case() {
        let report = AppError::auth_rejected("permission denied").to_report();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], "auth_rejected");
        assert_eq!(value["stage"], "authenticate");
    }
}
