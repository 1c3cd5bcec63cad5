//! Shared primitives for all Rust crates in Taskdeck.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthError, Role, UserIdentity};

/// Result type used across Taskdeck crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Server-assigned numeric identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw identifier returned by the API.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Failures of the durable session storage medium.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The persisted record exists but cannot be parsed.
    #[error("persisted session record is corrupt: {0}")]
    Corrupt(String),

    /// The storage medium could not be read or written.
    #[error("session storage unavailable: {0}")]
    Io(String),
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or the presented credential was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::MissingCredentials => Self::Validation(value.to_string()),
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                Self::Unauthorized(value.to_string())
            }
            AuthError::Unknown(message) => Self::Internal(message),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, AuthError, NonEmptyString, StorageError, UserId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn user_id_serializes_as_bare_number() {
        let encoded = serde_json::to_string(&UserId::new(42));
        assert_eq!(encoded.ok().as_deref(), Some("42"));
    }

    #[test]
    fn auth_errors_map_onto_app_error_categories() {
        assert!(matches!(
            AppError::from(AuthError::InvalidCredentials),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthError::MissingCredentials),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(StorageError::Corrupt("eof".to_owned())),
            AppError::Internal(_)
        ));
    }
}
