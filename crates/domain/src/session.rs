//! Session record and credential material.
//!
//! The serialized form of [`SessionRecord`] is the persisted layout stored under
//! the well-known storage key, so field names here are part of the on-disk
//! format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taskdeck_core::UserIdentity;

/// Name of the header carrying the access token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Access and refresh tokens issued by the token endpoint.
///
/// Both values are opaque. The refresh token is kept for completeness but no
/// renewal flow uses it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    access: String,
    refresh: String,
}

impl CredentialBundle {
    /// Creates a credential bundle from raw token strings.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Returns the short-lived access token.
    #[must_use]
    pub fn access(&self) -> &str {
        self.access.as_str()
    }

    /// Returns the long-lived refresh token.
    #[must_use]
    pub fn refresh(&self) -> &str {
        self.refresh.as_str()
    }
}

impl std::fmt::Debug for CredentialBundle {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CredentialBundle")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Credentials paired with the identity they were issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    tokens: CredentialBundle,
    user: UserIdentity,
}

impl SessionRecord {
    /// Pairs a credential bundle with a user identity.
    #[must_use]
    pub fn new(tokens: CredentialBundle, user: UserIdentity) -> Self {
        Self { tokens, user }
    }

    /// Returns the credential half of the record.
    #[must_use]
    pub fn tokens(&self) -> &CredentialBundle {
        &self.tokens
    }

    /// Returns the identity half of the record.
    #[must_use]
    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    /// Builds the bearer header for this record's access token.
    #[must_use]
    pub fn auth_header(&self) -> AuthHeader {
        AuthHeader::bearer(self.tokens.access())
    }
}

/// Single `Authorization` header entry.
///
/// An empty value is a valid header that the server will reject; callers
/// never need to special-case the logged-out state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthHeader {
    value: String,
}

impl AuthHeader {
    /// Builds a `Bearer <token>` header.
    #[must_use]
    pub fn bearer(access_token: &str) -> Self {
        Self {
            value: format!("Bearer {access_token}"),
        }
    }

    /// Builds the header sent when no session exists.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the header name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        AUTHORIZATION_HEADER
    }

    /// Returns the header value, empty when logged out.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Whether the header carries a credential.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.value.is_empty()
    }

    /// Returns the header as a one-entry mapping.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(AUTHORIZATION_HEADER.to_owned(), self.value.clone())])
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::{Role, UserId, UserIdentity};

    use super::{AuthHeader, CredentialBundle, SessionRecord};

    #[test]
    fn persisted_layout_matches_auth_state_shape() {
        let record = SessionRecord::new(
            CredentialBundle::new("a", "r"),
            UserIdentity::new(UserId::new(1), "u", Role::Admin),
        );

        let value = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({
                "tokens": {"access": "a", "refresh": "r"},
                "user": {"id": 1, "username": "u", "role": "ADMIN"}
            })
        );
    }

    #[test]
    fn anonymous_header_has_empty_value() {
        let header = AuthHeader::anonymous();
        assert!(!header.is_authenticated());
        assert_eq!(
            header.to_map().get("Authorization").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn debug_output_hides_tokens() {
        let rendered = format!("{:?}", CredentialBundle::new("secret-a", "secret-r"));
        assert!(!rendered.contains("secret"));
    }
}
