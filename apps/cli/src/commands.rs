use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use taskdeck_domain::TaskStatus;

/// Command-line client for the Taskdeck project and task API.
#[derive(Debug, Parser)]
#[command(name = "taskdeck", version, about)]
pub struct Cli {
    /// Keep the session in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session.
    Login {
        /// Account name, sent as typed.
        username: String,
        /// Account password.
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List projects.
    Projects,
    /// Create, edit or delete a project.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Show a project's kanban board.
    Board {
        /// Project id.
        project: i64,
    },
    /// Show task counts and overdue tasks for a project.
    Report {
        /// Project id.
        project: i64,
    },
    /// Create or update tasks.
    #[command(subcommand)]
    Task(TaskCommand),
    /// List user accounts.
    Users,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project.
    Create {
        /// Project title, at most 255 characters.
        title: String,
        /// Free-form description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a project's title and description.
    Edit {
        /// Project id.
        project: i64,
        /// New title.
        title: String,
        /// New description; omit to keep the current one.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project and all of its tasks.
    Delete {
        /// Project id.
        project: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task to a project's To Do column.
    Create {
        /// Project id.
        project: i64,
        /// Task title.
        title: String,
    },
    /// Rename a task.
    Rename {
        /// Task id.
        task: i64,
        /// New title.
        title: String,
    },
    /// Move a task to another column.
    Status {
        /// Task id.
        task: i64,
        /// TODO, IN_PROGRESS or DONE (case and hyphens are accepted).
        status: TaskStatus,
    },
    /// Assign a task to a user; omit the user to unassign.
    Assign {
        /// Task id.
        task: i64,
        /// User id of the new assignee.
        user: Option<i64>,
    },
    /// Set a task deadline; omit the date to clear it.
    Deadline {
        /// Task id.
        task: i64,
        /// Deadline as YYYY-MM-DD.
        date: Option<NaiveDate>,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        task: i64,
    },
}
