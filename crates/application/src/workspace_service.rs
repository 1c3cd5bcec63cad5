//! Workspace (projects, tasks, users) ports and application service.
//!
//! Every call carries the header built by the session manager. A 401 from
//! the API is reported back to the session manager, which logs the user out;
//! the response body is never interpreted further.

mod ports;
mod service;


pub use ports::WorkspaceGateway;
pub use service::WorkspaceService;
