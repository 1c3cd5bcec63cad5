//! Session listener that reports transitions to tracing output.

use taskdeck_application::{LogoutReason, SessionEvent, SessionListener};
use tracing::{info, warn};

/// Logs every session transition.
#[derive(Debug, Clone, Default)]
pub struct TracingSessionListener;

impl TracingSessionListener {
    /// Creates a new tracing session listener.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SessionListener for TracingSessionListener {
    fn on_session_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Restored(user) => info!(
                username = user.username(),
                role = %user.role(),
                navigate_to = ?event.navigation_target(),
                "session restored"
            ),
            SessionEvent::LoggedIn(user) => info!(
                username = user.username(),
                role = %user.role(),
                navigate_to = ?event.navigation_target(),
                "session started"
            ),
            SessionEvent::LoggedOut {
                reason: LogoutReason::UserRequested,
            } => info!(navigate_to = ?event.navigation_target(), "session ended"),
            SessionEvent::LoggedOut {
                reason: LogoutReason::Unauthorized,
            } => warn!(
                navigate_to = ?event.navigation_target(),
                "session ended after the API rejected the access token"
            ),
        }
    }
}
