use taskdeck_core::UserIdentity;
use taskdeck_domain::{DirectoryUser, Project, ProjectBoard, Task, TaskReport, TaskStatus};

pub fn user(identity: &UserIdentity) -> String {
    format!(
        "{} (id {}, {})",
        identity.username(),
        identity.id(),
        identity.role()
    )
}

pub fn projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects yet.\n".to_owned();
    }

    projects
        .iter()
        .map(|project| {
            match project
                .description
                .as_deref()
                .filter(|value| !value.is_empty())
            {
                Some(description) => {
                    format!("#{} {}: {description}\n", project.id, project.title)
                }
                None => format!("#{} {}\n", project.id, project.title),
            }
        })
        .collect()
}

pub fn task_line(task: &Task, assignee: &str) -> String {
    let line = format!("#{} {} [{}]", task.id, task.title, assignee);
    match task.deadline {
        Some(deadline) => format!("{line} due {deadline}"),
        None => line,
    }
}

pub fn board(project_board: &ProjectBoard) -> String {
    let mut output = format!("{}\n", project_board.project().title);
    for (status, tasks) in project_board.board().columns() {
        output.push_str(&format!("\n{} ({})\n", status.label(), tasks.len()));
        for task in tasks {
            let assignee = project_board.assignee_name(task.assignee);
            output.push_str(&format!("  {}\n", task_line(task, assignee)));
        }
    }
    output
}

pub fn report(project: &Project, report: &TaskReport) -> String {
    let mut lines = vec![
        format!("Report for {}", project.title),
        format!("Total tasks: {}", report.total()),
    ];
    lines.extend(
        TaskStatus::ALL
            .into_iter()
            .map(|status| format!("{}: {}", status.label(), report.count(status))),
    );

    if report.overdue().is_empty() {
        lines.push("No overdue tasks.".to_owned());
    } else {
        lines.push(format!("Overdue tasks ({}):", report.overdue().len()));
        lines.extend(report.overdue().iter().filter_map(|task| {
            task.deadline
                .map(|deadline| format!("  - {} (due {deadline})", task.title))
        }));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

pub fn users(users: &[DirectoryUser]) -> String {
    users
        .iter()
        .map(|user| {
            format!(
                "#{} {} ({}) {}\n",
                user.id,
                user.username,
                user.role,
                user.display_name()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskdeck_core::UserId;
    use taskdeck_domain::{Project, ProjectBoard, ProjectId, Task, TaskId, TaskStatus};

    use super::{board, projects, report};

    fn sample() -> ProjectBoard {
        let project = Project {
            id: ProjectId::new(1),
            title: "Website".to_owned(),
            description: None,
            team: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        let tasks = vec![Task {
            id: TaskId::new(2),
            title: "Wireframes".to_owned(),
            project: ProjectId::new(1),
            assignee: Some(UserId::new(99)),
            status: TaskStatus::Todo,
            deadline: NaiveDate::from_ymd_opt(2024, 1, 10),
            created_at: None,
            updated_at: None,
        }];
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default();
        ProjectBoard::new(project, tasks, Vec::new(), today)
    }

    #[test]
    fn board_lists_every_column_with_counts() {
        let rendered = board(&sample());
        assert!(rendered.contains("To Do (1)"));
        assert!(rendered.contains("In Progress (0)"));
        assert!(rendered.contains("Done (0)"));
        assert!(rendered.contains("#2 Wireframes [Unassigned] due 2024-01-10"));
    }

    #[test]
    fn report_lists_overdue_tasks() {
        let project_board = sample();
        let rendered = report(project_board.project(), project_board.report());
        assert!(rendered.contains("Total tasks: 1"));
        assert!(rendered.contains("Overdue tasks (1):"));
        assert!(rendered.contains("- Wireframes (due 2024-01-10)"));
    }

    #[test]
    fn projects_show_description_when_present() {
        let mut described = sample().project().clone();
        described.description = Some("Relaunch".to_owned());
        let mut bare = described.clone();
        bare.id = ProjectId::new(2);
        bare.description = None;

        assert_eq!(
            projects(&[described, bare]),
            "#1 Website: Relaunch\n#2 Website\n"
        );
        assert_eq!(projects(&[]), "No projects yet.\n");
    }
}
