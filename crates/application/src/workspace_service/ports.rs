use async_trait::async_trait;

use taskdeck_core::AppResult;
use taskdeck_domain::{
    AuthHeader, DirectoryUser, Project, ProjectDraft, ProjectId, Task, TaskDraft, TaskId,
    TaskPatch,
};

/// Remote API port for project, task and user resources.
///
/// Implementations return `AppError::Unauthorized` for a 401 response and
/// must not read its body.
#[async_trait]
pub trait WorkspaceGateway: Send + Sync {
    /// Lists the projects visible to the caller.
    async fn list_projects(&self, auth: &AuthHeader) -> AppResult<Vec<Project>>;

    /// Fetches one project.
    async fn find_project(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<Project>;

    /// Creates a project.
    async fn create_project(&self, auth: &AuthHeader, draft: &ProjectDraft) -> AppResult<Project>;

    /// Replaces a project's title and description.
    async fn update_project(
        &self,
        auth: &AuthHeader,
        project_id: ProjectId,
        draft: &ProjectDraft,
    ) -> AppResult<Project>;

    /// Deletes a project and, server-side, its tasks.
    async fn delete_project(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<()>;

    /// Lists the tasks of one project.
    async fn list_tasks(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<Vec<Task>>;

    /// Creates a task.
    async fn create_task(&self, auth: &AuthHeader, draft: &TaskDraft) -> AppResult<Task>;

    /// Applies a single-field update to a task.
    async fn update_task(
        &self,
        auth: &AuthHeader,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> AppResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, auth: &AuthHeader, task_id: TaskId) -> AppResult<()>;

    /// Lists every user account.
    async fn list_users(&self, auth: &AuthHeader) -> AppResult<Vec<DirectoryUser>>;
}
