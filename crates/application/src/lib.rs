//! Application services and ports.

#![forbid(unsafe_code)]

mod session_service;
mod workspace_service;

pub use session_service::{
    AuthGateway, LogoutReason, NavigationTarget, SessionEvent, SessionListener, SessionManager,
    SessionState, SessionStore, TokenGrant,
};
pub use workspace_service::{WorkspaceGateway, WorkspaceService};
