//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod board;
mod project;
mod report;
mod session;
mod task;
mod user;

pub use board::{ProjectBoard, TaskBoard, UNASSIGNED_LABEL};
pub use project::{Project, ProjectDraft, ProjectId, TITLE_MAX_LENGTH};
pub use report::TaskReport;
pub use session::{AUTHORIZATION_HEADER, AuthHeader, CredentialBundle, SessionRecord};
pub use task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
pub use user::DirectoryUser;
