use async_trait::async_trait;

use taskdeck_core::{AuthError, StorageError, UserIdentity};
use taskdeck_domain::{CredentialBundle, SessionRecord};

use super::SessionEvent;

/// Durable client-side storage holding at most one session record.
///
/// Access is synchronous and only happens at the initialize, login and
/// logout boundaries.
pub trait SessionStore: Send + Sync {
    /// Reads the persisted record.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// `Err(StorageError::Corrupt)` when the stored value cannot be parsed.
    fn load(&self) -> Result<Option<SessionRecord>, StorageError>;

    /// Replaces the persisted record.
    fn save(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Removes the persisted record. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Successful response of the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// Issued credentials.
    pub tokens: CredentialBundle,
    /// Identity the credentials belong to.
    pub user: UserIdentity,
}

/// Port for exchanging a username and password for credentials.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Requests a credential bundle.
    ///
    /// Implementations must map every non-success response to
    /// `AuthError::InvalidCredentials` and transport or decoding failures to
    /// `AuthError::Unknown`. No retries.
    async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenGrant, AuthError>;
}

/// Observer notified after every session state transition.
pub trait SessionListener: Send + Sync {
    /// Called once per transition, after the session lock is released.
    fn on_session_event(&self, event: &SessionEvent);
}
