use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AppError, UserId};

/// Account role as assigned by the server at login time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Manages projects and task assignments.
    Manager,
    /// Works on assigned tasks.
    Developer,
}

impl Role {
    /// Returns the wire string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Developer => "DEVELOPER",
        }
    }

    /// Whether the role may create, edit and delete projects.
    #[must_use]
    pub fn can_manage_projects(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Whether the role may create, rename and delete tasks.
    #[must_use]
    pub fn can_manage_tasks(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "DEVELOPER" => Ok(Self::Developer),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Identity of the logged-in user as returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    id: UserId,
    username: String,
    role: Role,
}

impl UserIdentity {
    /// Creates a user identity from login response data.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    /// Returns the server-assigned user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the account username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the role granted at login.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Authentication failures surfaced by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username or password was left empty.
    #[error("username and password are required")]
    MissingCredentials,

    /// The token endpoint rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A downstream call rejected the presented access token.
    #[error("session is no longer authorized")]
    Unauthorized,

    /// Transport or decoding failure while logging in.
    #[error("login failed: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Returns the message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Please enter both a username and a password.",
            Self::InvalidCredentials => "Failed to login. Check username and password.",
            Self::Unauthorized => "Your session has expired. Please log in again.",
            Self::Unknown(_) => "An unknown error occurred.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthError, Role};

    #[test]
    fn role_round_trips_through_wire_string() {
        for role in [Role::Admin, Role::Manager, Role::Developer] {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_upper_case() {
        let encoded = serde_json::to_string(&Role::Developer);
        assert_eq!(encoded.ok().as_deref(), Some("\"DEVELOPER\""));
    }

    #[test]
    fn only_admins_and_managers_manage_work() {
        assert!(Role::Admin.can_manage_projects());
        assert!(Role::Manager.can_manage_tasks());
        assert!(!Role::Developer.can_manage_projects());
        assert!(!Role::Developer.can_manage_tasks());
    }

    #[test]
    fn invalid_credentials_message_matches_login_form() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Failed to login. Check username and password."
        );
    }
}
