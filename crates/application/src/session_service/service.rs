use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use taskdeck_core::{AuthError, UserIdentity};
use taskdeck_domain::{AuthHeader, SessionRecord};
use tracing::{debug, info, warn};

use super::{
    AuthGateway, LogoutReason, NavigationTarget, SessionEvent, SessionListener, SessionState,
    SessionStore, TokenGrant,
};

#[derive(Debug)]
struct ManagerState {
    session: Option<SessionRecord>,
    initializing: bool,
}

struct SessionManagerInner {
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn AuthGateway>,
    state: RwLock<ManagerState>,
    listeners: RwLock<Vec<Arc<dyn SessionListener>>>,
}

/// Application service owning the single session record.
///
/// Cloning is cheap and every clone shares the same session.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

impl SessionManager {
    /// Creates a logged-out session manager that has not been initialized.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            inner: Arc::new(SessionManagerInner {
                store,
                gateway,
                state: RwLock::new(ManagerState {
                    session: None,
                    initializing: true,
                }),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Registers a listener for session transitions.
    pub fn subscribe(&self, listener: Arc<dyn SessionListener>) {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Restores the persisted session, if any.
    ///
    /// Missing or unreadable records leave the manager logged out; the
    /// failure is only logged. `is_initializing` is false afterwards on every
    /// path. Later calls are no-ops.
    pub fn initialize(&self) -> SessionState {
        let restored = {
            let mut state = self.write_state();
            if !state.initializing {
                return state_of(&state);
            }

            let restored = match self.inner.store.load() {
                Ok(Some(record)) => Some(record),
                Ok(None) => {
                    debug!("no persisted session found");
                    None
                }
                Err(error) => {
                    warn!(error = %error, "ignoring unreadable persisted session");
                    None
                }
            };

            state.session = restored.clone();
            state.initializing = false;
            restored
        };

        match restored {
            Some(record) => {
                info!(
                    user_id = %record.user().id(),
                    username = record.user().username(),
                    "restored persisted session"
                );
                self.emit(&SessionEvent::Restored(record.user().clone()));
                SessionState::LoggedIn
            }
            None => SessionState::LoggedOut,
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the new record replaces any previous one, is persisted, and
    /// `SessionEvent::LoggedIn` is emitted. On failure the session is left
    /// untouched and nothing is written.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<NavigationTarget, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let TokenGrant { tokens, user } = match self
            .inner
            .gateway
            .obtain_token(username, password)
            .await
        {
            Ok(grant) => grant,
            Err(error) => {
                warn!(username = username, error = %error, "login failed");
                return Err(error);
            }
        };

        let record = SessionRecord::new(tokens, user.clone());
        {
            let mut state = self.write_state();
            if let Err(error) = self.inner.store.save(&record) {
                warn!(error = %error, "failed to persist session; it will not survive a restart");
            }
            state.session = Some(record);
        }

        info!(user_id = %user.id(), username = user.username(), role = %user.role(), "logged in");
        let event = SessionEvent::LoggedIn(user);
        self.emit(&event);
        Ok(event.navigation_target())
    }

    /// Ends the session. Idempotent and infallible.
    pub fn logout(&self) -> NavigationTarget {
        if self.end_session(LogoutReason::UserRequested) {
            info!("logged out");
        }
        NavigationTarget::Login
    }

    /// Reports that a downstream call was rejected with an authorization
    /// failure.
    ///
    /// Forces a logout. Returns `true` only for the report that actually ended
    /// the session, so concurrent reporters cause exactly one transition.
    pub fn handle_unauthorized(&self) -> bool {
        let ended = self.end_session(LogoutReason::Unauthorized);
        if ended {
            warn!("access token rejected by the API; session cleared");
        }
        ended
    }

    /// Returns the logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.read_state()
            .session
            .as_ref()
            .map(|record| record.user().clone())
    }

    /// Builds the `Authorization` header for the next request.
    ///
    /// Logged-out callers get a header with an empty value rather than an
    /// error.
    #[must_use]
    pub fn auth_header(&self) -> AuthHeader {
        self.read_state()
            .session
            .as_ref()
            .map_or_else(AuthHeader::anonymous, SessionRecord::auth_header)
    }

    /// Whether the startup storage read is still pending.
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.read_state().initializing
    }

    /// Whether a session record exists.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read_state().session.is_some()
    }

    /// Returns the current state machine state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        state_of(&self.read_state())
    }

    fn end_session(&self, reason: LogoutReason) -> bool {
        let ended = {
            let mut state = self.write_state();
            let ended = state.session.take().is_some();

            if (ended || reason == LogoutReason::UserRequested)
                && let Err(error) = self.inner.store.clear()
            {
                warn!(error = %error, "failed to clear persisted session");
            }

            ended
        };

        if ended {
            self.emit(&SessionEvent::LoggedOut { reason });
        }
        ended
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for listener in listeners {
            listener.on_session_event(event);
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ManagerState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ManagerState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn state_of(state: &ManagerState) -> SessionState {
    if state.session.is_some() {
        SessionState::LoggedIn
    } else {
        SessionState::LoggedOut
    }
}
