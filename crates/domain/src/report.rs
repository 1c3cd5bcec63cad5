//! Reporting dashboard figures derived from a project's tasks.

use chrono::NaiveDate;

use crate::{Task, TaskStatus};

/// Task counts by status and the overdue list for one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskReport {
    total: usize,
    todo: usize,
    in_progress: usize,
    done: usize,
    overdue: Vec<Task>,
}

impl TaskReport {
    /// Computes the report as of `today`.
    #[must_use]
    pub fn build(tasks: &[Task], today: NaiveDate) -> Self {
        let mut report = Self {
            total: tasks.len(),
            ..Self::default()
        };

        for task in tasks {
            match task.status {
                TaskStatus::Todo => report.todo += 1,
                TaskStatus::InProgress => report.in_progress += 1,
                TaskStatus::Done => report.done += 1,
            }
            if task.is_overdue(today) {
                report.overdue.push(task.clone());
            }
        }

        report
    }

    /// Total number of tasks.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of tasks with the given status.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }

    /// Open tasks whose deadline has passed, in input order.
    #[must_use]
    pub fn overdue(&self) -> &[Task] {
        &self.overdue
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{ProjectId, TaskId};

    fn status_strategy() -> impl Strategy<Value = TaskStatus> {
        prop_oneof![
            Just(TaskStatus::Todo),
            Just(TaskStatus::InProgress),
            Just(TaskStatus::Done),
        ]
    }

    fn task_strategy() -> impl Strategy<Value = Task> {
        (1_i64..10_000, status_strategy(), proptest::option::of(0_u64..60)).prop_map(
            |(id, status, offset)| Task {
                id: TaskId::new(id),
                title: format!("task {id}"),
                project: ProjectId::new(1),
                assignee: None,
                status,
                deadline: offset.and_then(|days| {
                    NaiveDate::from_ymd_opt(2024, 1, 1)
                        .and_then(|start| start.checked_add_days(chrono::Days::new(days)))
                }),
                created_at: None,
                updated_at: None,
            },
        )
    }

    proptest! {
        #[test]
        fn status_counts_sum_to_total(tasks in proptest::collection::vec(task_strategy(), 0..40)) {
            let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();
            let report = TaskReport::build(&tasks, today);
            let summed: usize = TaskStatus::ALL.iter().map(|status| report.count(*status)).sum();
            prop_assert_eq!(summed, report.total());
            prop_assert_eq!(report.total(), tasks.len());
        }

        #[test]
        fn overdue_tasks_are_open_and_past_due(tasks in proptest::collection::vec(task_strategy(), 0..40)) {
            let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();
            let report = TaskReport::build(&tasks, today);
            for task in report.overdue() {
                prop_assert!(task.status != TaskStatus::Done);
                prop_assert!(task.deadline.is_some_and(|deadline| deadline < today));
            }
            let expected = tasks.iter().filter(|task| task.is_overdue(today)).count();
            prop_assert_eq!(report.overdue().len(), expected);
        }
    }
}
