use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use taskdeck_application::WorkspaceGateway;
use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::{
    AuthHeader, DirectoryUser, Project, ProjectDraft, ProjectId, Task, TaskDraft, TaskId,
    TaskPatch,
};
use tracing::debug;


/// HTTP implementation of the workspace port over the REST API.
#[derive(Clone)]
pub struct HttpWorkspaceGateway {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpWorkspaceGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn request(&self, method: Method, path: &str, auth: &AuthHeader) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(method = %method, url = %url, "calling workspace API");
        self.http_client
            .request(method, url)
            .header(auth.name(), auth.value())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> AppResult<T> {
        let response = send(builder, operation).await?;
        response.json::<T>().await.map_err(|error| {
            AppError::Internal(format!("failed to decode {operation} response: {error}"))
        })
    }
}

async fn send(builder: RequestBuilder, operation: &str) -> AppResult<Response> {
    let response = builder.send().await.map_err(|error| {
        AppError::Internal(format!("failed to call {operation} endpoint: {error}"))
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized(format!(
            "{operation} rejected the access token"
        )));
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_owned());
    let message = format!(
        "{operation} endpoint returned status {}: {body}",
        status.as_u16()
    );

    Err(match status.as_u16() {
        400 => AppError::Validation(message),
        403 => AppError::Forbidden(message),
        404 => AppError::NotFound(message),
        409 => AppError::Conflict(message),
        _ => AppError::Internal(message),
    })
}

#[async_trait]
impl WorkspaceGateway for HttpWorkspaceGateway {
    async fn list_projects(&self, auth: &AuthHeader) -> AppResult<Vec<Project>> {
        self.fetch(self.request(Method::GET, "/projects/", auth), "list projects")
            .await
    }

    async fn find_project(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<Project> {
        let path = format!("/projects/{project_id}/");
        self.fetch(self.request(Method::GET, &path, auth), "get project")
            .await
    }

    async fn create_project(&self, auth: &AuthHeader, draft: &ProjectDraft) -> AppResult<Project> {
        let builder = self.request(Method::POST, "/projects/", auth).json(draft);
        self.fetch(builder, "create project").await
    }

    async fn update_project(
        &self,
        auth: &AuthHeader,
        project_id: ProjectId,
        draft: &ProjectDraft,
    ) -> AppResult<Project> {
        let path = format!("/projects/{project_id}/");
        let builder = self.request(Method::PATCH, &path, auth).json(draft);
        self.fetch(builder, "update project").await
    }

    async fn delete_project(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<()> {
        let path = format!("/projects/{project_id}/");
        send(self.request(Method::DELETE, &path, auth), "delete project").await?;
        Ok(())
    }

    async fn list_tasks(&self, auth: &AuthHeader, project_id: ProjectId) -> AppResult<Vec<Task>> {
        let path = format!("/tasks/?project={project_id}");
        self.fetch(self.request(Method::GET, &path, auth), "list tasks")
            .await
    }

    async fn create_task(&self, auth: &AuthHeader, draft: &TaskDraft) -> AppResult<Task> {
        let builder = self.request(Method::POST, "/tasks/", auth).json(draft);
        self.fetch(builder, "create task").await
    }

    async fn update_task(
        &self,
        auth: &AuthHeader,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> AppResult<Task> {
        let path = format!("/tasks/{task_id}/");
        let builder = self.request(Method::PATCH, &path, auth).json(&patch.body());
        self.fetch(builder, "update task").await
    }

    async fn delete_task(&self, auth: &AuthHeader, task_id: TaskId) -> AppResult<()> {
        let path = format!("/tasks/{task_id}/");
        send(self.request(Method::DELETE, &path, auth), "delete task").await?;
        Ok(())
    }

    async fn list_users(&self, auth: &AuthHeader) -> AppResult<Vec<DirectoryUser>> {
        self.fetch(self.request(Method::GET, "/users/", auth), "list users")
            .await
    }
}
