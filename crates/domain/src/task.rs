use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use taskdeck_core::{AppError, AppResult, UserId};

use crate::ProjectId;
use crate::project::validate_title;

/// Server-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw identifier returned by the API.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Kanban column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Returns the wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// Returns the column heading shown on the board.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().replace('-', "_").as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(AppError::Validation(format!(
                "unknown task status '{value}'"
            ))),
        }
    }
}

/// Task as returned by the tasks endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Display title.
    pub title: String,
    /// Owning project.
    pub project: ProjectId,
    /// Assigned user, if any.
    #[serde(default)]
    pub assignee: Option<UserId>,
    /// Current board column.
    #[serde(default)]
    pub status: TaskStatus,
    /// Due date, if any.
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// A task is overdue when its deadline is strictly before `today` and it
    /// is not done.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.deadline.is_some_and(|deadline| deadline < today)
    }
}

/// Validated payload for creating a task. New tasks always start in `TODO`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    title: String,
    project: ProjectId,
    status: TaskStatus,
}

impl TaskDraft {
    /// Validates the title of a new task in `project`.
    pub fn new(project: ProjectId, title: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            title: validate_title(title)?,
            project,
            status: TaskStatus::Todo,
        })
    }

    /// Returns the validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the owning project.
    #[must_use]
    pub fn project(&self) -> ProjectId {
        self.project
    }
}

/// Single-field partial update sent with `PATCH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPatch {
    /// Rename the task.
    Title(String),
    /// Move the task to another column.
    Status(TaskStatus),
    /// Assign or unassign (`None`) the task.
    Assignee(Option<UserId>),
    /// Set or clear (`None`) the due date.
    Deadline(Option<NaiveDate>),
}

impl TaskPatch {
    /// Builds a validated rename patch.
    pub fn title(title: impl Into<String>) -> AppResult<Self> {
        Ok(Self::Title(validate_title(title)?))
    }

    /// Whether applying this patch needs task management rights.
    #[must_use]
    pub fn requires_task_management(&self) -> bool {
        matches!(self, Self::Title(_))
    }

    /// Returns the JSON request body.
    #[must_use]
    pub fn body(&self) -> Value {
        match self {
            Self::Title(title) => json!({ "title": title }),
            Self::Status(status) => json!({ "status": status }),
            Self::Assignee(assignee) => json!({ "assignee": assignee }),
            Self::Deadline(deadline) => {
                json!({ "deadline": deadline.map(|date| date.format("%Y-%m-%d").to_string()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: TaskStatus, deadline: Option<&str>) -> Task {
        Task {
            id: TaskId::new(1),
            title: "Write docs".to_owned(),
            project: ProjectId::new(7),
            assignee: None,
            status,
            deadline: deadline.and_then(|value| value.parse().ok()),
            created_at: None,
            updated_at: None,
        }
    }

    fn day(value: &str) -> NaiveDate {
        value.parse().unwrap_or_default()
    }

    #[test]
    fn past_deadline_open_task_is_overdue() {
        assert!(task(TaskStatus::InProgress, Some("2024-01-01")).is_overdue(day("2024-01-02")));
    }

    #[test]
    fn deadline_today_is_not_overdue() {
        assert!(!task(TaskStatus::Todo, Some("2024-01-02")).is_overdue(day("2024-01-02")));
    }

    #[test]
    fn done_task_is_never_overdue() {
        assert!(!task(TaskStatus::Done, Some("2020-01-01")).is_overdue(day("2024-01-02")));
    }

    #[test]
    fn task_without_deadline_is_not_overdue() {
        assert!(!task(TaskStatus::Todo, None).is_overdue(day("2024-01-02")));
    }

    #[test]
    fn status_parses_cli_spellings() {
        assert_eq!("in-progress".parse::<TaskStatus>().ok(), Some(TaskStatus::InProgress));
        assert_eq!("done".parse::<TaskStatus>().ok(), Some(TaskStatus::Done));
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn clearing_patches_send_null() {
        assert_eq!(
            TaskPatch::Assignee(None).body(),
            json!({ "assignee": null })
        );
        assert_eq!(
            TaskPatch::Deadline(Some(day("2025-03-04"))).body(),
            json!({ "deadline": "2025-03-04" })
        );
        assert_eq!(
            TaskPatch::Status(TaskStatus::InProgress).body(),
            json!({ "status": "IN_PROGRESS" })
        );
    }

    #[test]
    fn new_task_draft_starts_in_todo() {
        let draft = TaskDraft::new(ProjectId::new(2), "Ship it");
        let body = serde_json::to_value(draft.unwrap_or_else(|_| unreachable!()));
        assert_eq!(
            body.unwrap_or_default(),
            json!({ "title": "Ship it", "project": 2, "status": "TODO" })
        );
    }
}
