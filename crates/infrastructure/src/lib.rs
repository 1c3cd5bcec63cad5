//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_session_store;
mod http_auth_gateway;
mod http_workspace_gateway;
mod in_memory_session_store;
mod tracing_session_listener;

pub use file_session_store::FileSessionStore;
pub use http_auth_gateway::HttpAuthGateway;
pub use http_workspace_gateway::HttpWorkspaceGateway;
pub use in_memory_session_store::InMemorySessionStore;
pub use tracing_session_listener::TracingSessionListener;
