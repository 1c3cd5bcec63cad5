use chrono::NaiveDate;
use taskdeck_core::UserId;

use crate::{DirectoryUser, Project, Task, TaskReport, TaskStatus};

/// Label used for tasks without a known assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Tasks grouped into kanban columns, preserving input order within a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    todo: Vec<Task>,
    in_progress: Vec<Task>,
    done: Vec<Task>,
}

impl TaskBoard {
    /// Groups tasks by status.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        board
    }

    /// Returns the tasks in one column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Iterates columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| (status, self.column(status)))
    }

    /// Total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Whether the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the project detail view shows: the project, its board, its
/// report and the user directory used to resolve assignees.
#[derive(Debug, Clone)]
pub struct ProjectBoard {
    project: Project,
    board: TaskBoard,
    report: TaskReport,
    users: Vec<DirectoryUser>,
}

impl ProjectBoard {
    /// Assembles a project board as of `today`.
    #[must_use]
    pub fn new(
        project: Project,
        tasks: Vec<Task>,
        users: Vec<DirectoryUser>,
        today: NaiveDate,
    ) -> Self {
        let report = TaskReport::build(&tasks, today);
        Self {
            project,
            board: TaskBoard::from_tasks(tasks),
            report,
            users,
        }
    }

    /// Returns the project.
    #[must_use]
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the kanban board.
    #[must_use]
    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    /// Returns the report computed for the board.
    #[must_use]
    pub fn report(&self) -> &TaskReport {
        &self.report
    }

    /// Returns the user directory.
    #[must_use]
    pub fn users(&self) -> &[DirectoryUser] {
        &self.users
    }

    /// Resolves an assignee to a username.
    #[must_use]
    pub fn assignee_name(&self, assignee: Option<UserId>) -> &str {
        assignee
            .and_then(|id| self.users.iter().find(|user| user.id == id))
            .map_or(UNASSIGNED_LABEL, |user| user.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::Role;

    use super::*;
    use crate::{ProjectId, TaskId};

    fn task(id: i64, status: TaskStatus, assignee: Option<i64>) -> Task {
        Task {
            id: TaskId::new(id),
            title: format!("task {id}"),
            project: ProjectId::new(1),
            assignee: assignee.map(UserId::new),
            status,
            deadline: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn board_keeps_input_order_per_column() {
        let board = TaskBoard::from_tasks(vec![
            task(1, TaskStatus::Done, None),
            task(2, TaskStatus::Todo, None),
            task(3, TaskStatus::Done, None),
        ]);

        let done: Vec<i64> = board
            .column(TaskStatus::Done)
            .iter()
            .map(|task| task.id.as_i64())
            .collect();
        assert_eq!(done, vec![1, 3]);
        assert!(board.column(TaskStatus::InProgress).is_empty());
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn unknown_assignee_renders_as_unassigned() {
        let project = Project {
            id: ProjectId::new(1),
            title: "Site".to_owned(),
            description: None,
            team: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        let users = vec![DirectoryUser {
            id: UserId::new(5),
            username: "mia".to_owned(),
            role: Role::Developer,
            first_name: None,
            last_name: None,
            email: None,
        }];
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default();
        let board = ProjectBoard::new(project, vec![task(1, TaskStatus::Todo, Some(5))], users, today);

        assert_eq!(board.assignee_name(Some(UserId::new(5))), "mia");
        assert_eq!(board.assignee_name(Some(UserId::new(9))), UNASSIGNED_LABEL);
        assert_eq!(board.assignee_name(None), UNASSIGNED_LABEL);
    }
}
