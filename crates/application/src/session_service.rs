//! Session ports and the session manager service.
//!
//! The session manager exclusively owns the authenticated user's session
//! record. Collaborators read the current user, ask for a freshly built
//! `Authorization` header, and report authorization rejections; none of them
//! mutate the record directly.

mod events;
mod ports;
mod service;


pub use events::{LogoutReason, NavigationTarget, SessionEvent, SessionState};
pub use ports::{AuthGateway, SessionListener, SessionStore, TokenGrant};
pub use service::SessionManager;
