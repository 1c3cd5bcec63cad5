//! Taskdeck command-line client.

#![forbid(unsafe_code)]

mod cli_config;
mod commands;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use taskdeck_application::{
    LogoutReason, SessionEvent, SessionListener, SessionManager, SessionStore, WorkspaceService,
};
use taskdeck_core::{AppError, AppResult, AuthError, UserId};
use taskdeck_domain::{ProjectId, TaskId};
use taskdeck_infrastructure::{
    FileSessionStore, HttpAuthGateway, HttpWorkspaceGateway, InMemorySessionStore,
    TracingSessionListener,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli_config::CliConfig;
use crate::commands::{Cli, Command, ProjectCommand, TaskCommand};

/// Tells the user to log in again when the API rejects the stored token.
struct ExpiredSessionNotice;

impl SessionListener for ExpiredSessionNotice {
    fn on_session_event(&self, event: &SessionEvent) {
        if let SessionEvent::LoggedOut {
            reason: LogoutReason::Unauthorized,
        } = event
        {
            eprintln!(
                "{} Run `taskdeck login <username>`.",
                AuthError::Unauthorized.user_message()
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let store: Arc<dyn SessionStore> = if cli.ephemeral {
        Arc::new(InMemorySessionStore::new())
    } else {
        Arc::new(FileSessionStore::new(
            &config.state_dir,
            config.storage_key.as_str(),
        ))
    };
    let session = SessionManager::new(
        store,
        Arc::new(HttpAuthGateway::new(
            http_client.clone(),
            config.api_base_url.as_str(),
        )),
    );
    session.subscribe(Arc::new(TracingSessionListener::new()));
    session.subscribe(Arc::new(ExpiredSessionNotice));

    let workspace = WorkspaceService::new(
        Arc::new(HttpWorkspaceGateway::new(
            http_client,
            config.api_base_url.as_str(),
        )),
        session.clone(),
    );

    debug!(
        api_base_url = %config.api_base_url,
        state_dir = %config.state_dir.display(),
        ephemeral = cli.ephemeral,
        "taskdeck starting"
    );
    session.initialize();

    run(cli.command, &session, &workspace).await
}

async fn run(
    command: Command,
    session: &SessionManager,
    workspace: &WorkspaceService,
) -> AppResult<()> {
    match command {
        Command::Login { username, password } => {
            let password = password.ok_or_else(|| {
                AppError::Validation(
                    "a password is required; pass --password or set TASKDECK_PASSWORD".to_owned(),
                )
            })?;
            let destination = session
                .login(username.as_str(), password.as_str())
                .await
                .map_err(login_error)?;
            info!(destination = ?destination, "login complete");
            if let Some(user) = session.current_user() {
                println!("Logged in as {}", render::user(&user));
            }
        }
        Command::Logout => {
            session.logout();
            println!("Logged out.");
        }
        Command::Whoami => match session.current_user() {
            Some(user) => println!("{}", render::user(&user)),
            None => println!("Not logged in."),
        },
        Command::Projects => {
            let projects = workspace.list_projects().await?;
            print!("{}", render::projects(&projects));
        }
        Command::Project(project_command) => run_project(project_command, workspace).await?,
        Command::Board { project } => {
            let project_board = workspace
                .project_board(ProjectId::new(project), today())
                .await?;
            print!("{}", render::board(&project_board));
        }
        Command::Report { project } => {
            let project_board = workspace
                .project_board(ProjectId::new(project), today())
                .await?;
            print!(
                "{}",
                render::report(project_board.project(), project_board.report())
            );
        }
        Command::Task(task_command) => run_task(task_command, workspace).await?,
        Command::Users => {
            let users = workspace.list_users().await?;
            print!("{}", render::users(&users));
        }
    }

    Ok(())
}

async fn run_project(command: ProjectCommand, workspace: &WorkspaceService) -> AppResult<()> {
    match command {
        ProjectCommand::Create { title, description } => {
            let project = workspace.create_project(&title, description).await?;
            println!("Created project #{} {}", project.id, project.title);
        }
        ProjectCommand::Edit {
            project,
            title,
            description,
        } => {
            let project = workspace
                .update_project(ProjectId::new(project), &title, description)
                .await?;
            println!("Updated project #{} {}", project.id, project.title);
        }
        ProjectCommand::Delete { project } => {
            workspace.delete_project(ProjectId::new(project)).await?;
            println!("Deleted project #{project}");
        }
    }
    Ok(())
}

async fn run_task(command: TaskCommand, workspace: &WorkspaceService) -> AppResult<()> {
    let task = match command {
        TaskCommand::Create { project, title } => {
            workspace
                .create_task(ProjectId::new(project), &title)
                .await?
        }
        TaskCommand::Rename { task, title } => {
            workspace.rename_task(TaskId::new(task), &title).await?
        }
        TaskCommand::Status { task, status } => {
            workspace
                .change_task_status(TaskId::new(task), status)
                .await?
        }
        TaskCommand::Assign { task, user } => {
            workspace
                .assign_task(TaskId::new(task), user.map(UserId::new))
                .await?
        }
        TaskCommand::Deadline { task, date } => {
            workspace.set_task_deadline(TaskId::new(task), date).await?
        }
        TaskCommand::Delete { task } => {
            workspace.delete_task(TaskId::new(task)).await?;
            println!("Deleted task #{task}");
            return Ok(());
        }
    };

    println!(
        "{} [{}]",
        render::task_line(&task, &assignee_label(task.assignee)),
        task.status.label()
    );
    Ok(())
}

fn assignee_label(assignee: Option<UserId>) -> String {
    assignee.map_or_else(
        || taskdeck_domain::UNASSIGNED_LABEL.to_owned(),
        |id| format!("user {id}"),
    )
}

fn login_error(error: AuthError) -> AppError {
    match error {
        AuthError::MissingCredentials => AppError::Validation(error.user_message().to_owned()),
        AuthError::Unknown(_) => AppError::Internal(error.user_message().to_owned()),
        AuthError::InvalidCredentials | AuthError::Unauthorized => {
            AppError::Unauthorized(error.user_message().to_owned())
        }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
