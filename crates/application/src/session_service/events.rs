use taskdeck_core::UserIdentity;

/// The two states of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session record exists.
    LoggedOut,
    /// A session record exists.
    LoggedIn,
}

/// View the presentation layer should show after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Authenticated landing view (project list).
    Landing,
    /// Unauthenticated entry view (login form).
    Login,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to log out.
    UserRequested,
    /// A downstream call rejected the access token.
    Unauthorized,
}

/// Session state change emitted to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A persisted session was reloaded at startup.
    Restored(UserIdentity),
    /// A login succeeded.
    LoggedIn(UserIdentity),
    /// The active session ended.
    LoggedOut {
        /// Cause of the logout.
        reason: LogoutReason,
    },
}

impl SessionEvent {
    /// Returns the view the presentation layer should navigate to.
    #[must_use]
    pub fn navigation_target(&self) -> NavigationTarget {
        match self {
            Self::Restored(_) | Self::LoggedIn(_) => NavigationTarget::Landing,
            Self::LoggedOut { .. } => NavigationTarget::Login,
        }
    }

    /// Returns the state the session is in after this event.
    #[must_use]
    pub fn resulting_state(&self) -> SessionState {
        match self {
            Self::Restored(_) | Self::LoggedIn(_) => SessionState::LoggedIn,
            Self::LoggedOut { .. } => SessionState::LoggedOut,
        }
    }
}
