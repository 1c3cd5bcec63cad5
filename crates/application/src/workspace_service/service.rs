use std::sync::Arc;

use chrono::NaiveDate;
use taskdeck_core::{AppError, AppResult, Role, UserId, UserIdentity};
use taskdeck_domain::{
    AuthHeader, DirectoryUser, Project, ProjectBoard, ProjectDraft, ProjectId, Task, TaskDraft,
    TaskId, TaskPatch, TaskStatus,
};
use tracing::debug;

use super::WorkspaceGateway;
use crate::SessionManager;

/// Application service for project and task operations on behalf of the
/// logged-in user.
///
/// Role checks here only spare a round trip; the API remains authoritative.
#[derive(Clone)]
pub struct WorkspaceService {
    gateway: Arc<dyn WorkspaceGateway>,
    session: SessionManager,
}

impl WorkspaceService {
    /// Creates a workspace service bound to a session.
    #[must_use]
    pub fn new(gateway: Arc<dyn WorkspaceGateway>, session: SessionManager) -> Self {
        Self { gateway, session }
    }

    /// Lists the projects visible to the current user.
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        let (_, auth) = self.authenticated()?;
        let result = self.gateway.list_projects(&auth).await;
        self.settle(result)
    }

    /// Fetches one project.
    pub async fn project(&self, project_id: ProjectId) -> AppResult<Project> {
        let (_, auth) = self.authenticated()?;
        let result = self.gateway.find_project(&auth, project_id).await;
        self.settle(result)
    }

    /// Creates a project. Requires a role that manages projects.
    pub async fn create_project(
        &self,
        title: &str,
        description: Option<String>,
    ) -> AppResult<Project> {
        let auth = self.authorized(Role::can_manage_projects, "create projects")?;
        let draft = ProjectDraft::new(title, description)?;
        let result = self.gateway.create_project(&auth, &draft).await;
        self.settle(result)
    }

    /// Edits a project's title and description. Requires a role that manages
    /// projects.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        title: &str,
        description: Option<String>,
    ) -> AppResult<Project> {
        let auth = self.authorized(Role::can_manage_projects, "edit projects")?;
        let draft = ProjectDraft::new(title, description)?;
        let result = self.gateway.update_project(&auth, project_id, &draft).await;
        self.settle(result)
    }

    /// Deletes a project together with its tasks. Requires a role that
    /// manages projects.
    pub async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        let auth = self.authorized(Role::can_manage_projects, "delete projects")?;
        let result = self.gateway.delete_project(&auth, project_id).await;
        self.settle(result)
    }

    /// Loads a project with its tasks and the user directory, grouped into a
    /// board and report as of `today`.
    ///
    /// The three requests run together. A rejection of any of them logs the
    /// session out once and takes precedence over other failures.
    pub async fn project_board(
        &self,
        project_id: ProjectId,
        today: NaiveDate,
    ) -> AppResult<ProjectBoard> {
        let (_, auth) = self.authenticated()?;

        let (project, tasks, users) = futures::join!(
            self.gateway.find_project(&auth, project_id),
            self.gateway.list_tasks(&auth, project_id),
            self.gateway.list_users(&auth)
        );
        let (project, tasks, users) = (
            self.settle(project),
            self.settle(tasks),
            self.settle(users),
        );

        let rejection = [
            project.as_ref().err(),
            tasks.as_ref().err(),
            users.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .find_map(|error| match error {
            AppError::Unauthorized(message) => Some(message.clone()),
            _ => None,
        });
        if let Some(message) = rejection {
            return Err(AppError::Unauthorized(message));
        }

        let (project, tasks, users) = (project?, tasks?, users?);

        debug!(
            project_id = %project_id,
            task_count = tasks.len(),
            user_count = users.len(),
            "loaded project board"
        );

        Ok(ProjectBoard::new(project, tasks, users, today))
    }

    /// Lists the tasks of one project.
    pub async fn list_tasks(&self, project_id: ProjectId) -> AppResult<Vec<Task>> {
        let (_, auth) = self.authenticated()?;
        let result = self.gateway.list_tasks(&auth, project_id).await;
        self.settle(result)
    }

    /// Creates a `TODO` task. Requires a role that manages tasks.
    pub async fn create_task(&self, project_id: ProjectId, title: &str) -> AppResult<Task> {
        let auth = self.authorized(Role::can_manage_tasks, "create tasks")?;
        let draft = TaskDraft::new(project_id, title)?;
        let result = self.gateway.create_task(&auth, &draft).await;
        self.settle(result)
    }

    /// Renames a task. Requires a role that manages tasks.
    pub async fn rename_task(&self, task_id: TaskId, title: &str) -> AppResult<Task> {
        self.patch_task(task_id, TaskPatch::title(title)?).await
    }

    /// Moves a task to another column. Allowed for every role.
    pub async fn change_task_status(&self, task_id: TaskId, status: TaskStatus) -> AppResult<Task> {
        self.patch_task(task_id, TaskPatch::Status(status)).await
    }

    /// Assigns a task, or unassigns it with `None`. Allowed for every role.
    pub async fn assign_task(&self, task_id: TaskId, assignee: Option<UserId>) -> AppResult<Task> {
        self.patch_task(task_id, TaskPatch::Assignee(assignee)).await
    }

    /// Sets or clears a task deadline. Allowed for every role.
    pub async fn set_task_deadline(
        &self,
        task_id: TaskId,
        deadline: Option<NaiveDate>,
    ) -> AppResult<Task> {
        self.patch_task(task_id, TaskPatch::Deadline(deadline)).await
    }

    /// Deletes a task. Requires a role that manages tasks.
    pub async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        let auth = self.authorized(Role::can_manage_tasks, "delete tasks")?;
        let result = self.gateway.delete_task(&auth, task_id).await;
        self.settle(result)
    }

    /// Lists every user account.
    pub async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        let (_, auth) = self.authenticated()?;
        let result = self.gateway.list_users(&auth).await;
        self.settle(result)
    }

    async fn patch_task(&self, task_id: TaskId, patch: TaskPatch) -> AppResult<Task> {
        let auth = if patch.requires_task_management() {
            self.authorized(Role::can_manage_tasks, "edit task titles")?
        } else {
            self.authenticated()?.1
        };
        let result = self.gateway.update_task(&auth, task_id, &patch).await;
        self.settle(result)
    }

    fn authenticated(&self) -> AppResult<(UserIdentity, AuthHeader)> {
        let user = self
            .session
            .current_user()
            .ok_or_else(|| AppError::Unauthorized("not logged in".to_owned()))?;
        Ok((user, self.session.auth_header()))
    }

    fn authorized(&self, capability: fn(&Role) -> bool, action: &str) -> AppResult<AuthHeader> {
        let (user, auth) = self.authenticated()?;
        if !capability(&user.role()) {
            return Err(AppError::Forbidden(format!(
                "role {} is not allowed to {action}",
                user.role()
            )));
        }
        Ok(auth)
    }

    fn settle<T>(&self, result: AppResult<T>) -> AppResult<T> {
        if matches!(result, Err(AppError::Unauthorized(_))) {
            self.session.handle_unauthorized();
        }
        result
    }
}
