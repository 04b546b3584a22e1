//! Pure derivations over scoped entity snapshots. Callers scope first,
//! aggregate second; nothing here touches the session.

mod types;

pub use types::{DashboardSummary, FinancialSummary, ProjectCard, ProjectProgress};

use chrono::{Days, NaiveDate};

use crate::access;
use crate::models::{Project, Task, TaskStatus, User};
use crate::store::Store;

const RECENT_PROJECTS_PREVIEW: usize = 4;

fn pct(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Share of the budget earned through completed task values. A zero-total
/// budget is defined as 0%, never a division error.
pub fn budget_utilization_pct(project: &Project, tasks: &[Task]) -> u32 {
    pct(completed_value(&project.id, tasks), project.budget.total)
}

/// Share of the project's tasks that are Completed; 0% with no tasks.
pub fn completion_pct(project_id: &str, tasks: &[Task]) -> u32 {
    let project_tasks = tasks.iter().filter(|t| t.project_id == project_id);
    let (total, completed) = project_tasks.fold((0u64, 0u64), |(total, completed), task| {
        (
            total + 1,
            completed + u64::from(task.status == TaskStatus::Completed),
        )
    });
    pct(completed, total)
}

fn completed_value(project_id: &str, tasks: &[Task]) -> u64 {
    tasks
        .iter()
        .filter(|t| t.project_id == project_id && t.status == TaskStatus::Completed)
        .map(|t| t.value)
        .sum()
}

pub fn project_progress(project: &Project, tasks: &[Task]) -> ProjectProgress {
    let total_tasks = tasks
        .iter()
        .filter(|t| t.project_id == project.id)
        .count();
    let completed_tasks = tasks
        .iter()
        .filter(|t| t.project_id == project.id && t.status == TaskStatus::Completed)
        .count();
    let completed_value = completed_value(&project.id, tasks);

    ProjectProgress {
        total_tasks,
        completed_tasks,
        completion_pct: pct(completed_tasks as u64, total_tasks as u64),
        completed_value,
        budget_utilization_pct: pct(completed_value, project.budget.total),
    }
}

pub fn financial_summary(project: &Project) -> FinancialSummary {
    FinancialSummary {
        total: project.budget.total,
        received: project.budget.received,
        remaining: project.budget.total.saturating_sub(project.budget.received),
    }
}

/// Not-yet-completed tasks, soonest deadline first, truncated to `limit`.
/// The sort is stable, so tasks sharing a due date keep insertion order.
pub fn upcoming_deadlines(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut pending: Vec<Task> = tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .cloned()
        .collect();
    pending.sort_by_key(|t| t.due_date);
    pending.truncate(limit);
    pending
}

/// Everything the landing page shows, scoped to `user`.
pub fn dashboard_summary(
    store: &Store,
    user: &User,
    today: NaiveDate,
    upcoming_preview: usize,
) -> DashboardSummary {
    let projects = access::visible_projects(store, user);
    let tasks = access::visible_tasks(store, user);

    let week_end = today
        .checked_add_days(Days::new(7))
        .unwrap_or(NaiveDate::MAX);
    let due_this_week = tasks
        .iter()
        .filter(|t| {
            t.status != TaskStatus::Completed && t.due_date >= today && t.due_date < week_end
        })
        .count();

    let recent_projects = projects
        .iter()
        .take(RECENT_PROJECTS_PREVIEW)
        .map(|project| ProjectCard {
            project_id: project.id.clone(),
            name: project.name.clone(),
            client_name: project.client_name.clone(),
            status: project.status,
            progress: project_progress(project, &tasks),
        })
        .collect();

    DashboardSummary {
        active_projects: projects.len(),
        total_tasks: tasks.len(),
        due_this_week,
        recent_projects,
        upcoming: upcoming_deadlines(&tasks, upcoming_preview),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Project, ProjectDraft, Task, TaskDraft, TaskStatus};

    fn project_with_total(total: u64) -> Project {
        let mut project = Project::from_draft(
            ProjectDraft::default(),
            "p1".to_string(),
            chrono::Utc::now().date_naive(),
        );
        project.budget = Budget {
            total,
            received: 0,
            breakdown: Vec::new(),
        };
        project
    }

    fn task(id: &str, status: TaskStatus, value: u64) -> Task {
        let mut task = Task::from_draft(
            TaskDraft::new("p1"),
            id.to_string(),
            chrono::Utc::now().date_naive(),
        );
        task.status = status;
        task.value = value;
        task
    }

    #[test]
    fn utilization_is_zero_for_zero_budget() {
        let project = project_with_total(0);
        let tasks = vec![task("t1", TaskStatus::Completed, 5000)];
        assert_eq!(budget_utilization_pct(&project, &tasks), 0);
    }

    #[test]
    fn utilization_rounds_to_nearest_percent() {
        let project = project_with_total(3000);
        let tasks = vec![task("t1", TaskStatus::Completed, 1000)];
        // 33.33.. rounds down
        assert_eq!(budget_utilization_pct(&project, &tasks), 33);
    }

    #[test]
    fn utilization_can_exceed_one_hundred() {
        let project = project_with_total(100);
        let tasks = vec![task("t1", TaskStatus::Completed, 150)];
        assert_eq!(budget_utilization_pct(&project, &tasks), 150);
    }

    #[test]
    fn completion_is_zero_without_tasks() {
        assert_eq!(completion_pct("p1", &[]), 0);
    }

    #[test]
    fn completion_reaches_one_hundred_when_all_done() {
        let tasks = vec![
            task("t1", TaskStatus::Completed, 0),
            task("t2", TaskStatus::Completed, 0),
        ];
        assert_eq!(completion_pct("p1", &tasks), 100);
    }

    #[test]
    fn only_completed_tasks_earn_budget() {
        let project = project_with_total(1000);
        let tasks = vec![
            task("t1", TaskStatus::Review, 900),
            task("t2", TaskStatus::Completed, 400),
        ];
        assert_eq!(budget_utilization_pct(&project, &tasks), 40);
    }

    #[test]
    fn financial_summary_tracks_received_against_total() {
        let mut project = project_with_total(1000);
        project.budget.received = 400;

        let summary = financial_summary(&project);
        assert_eq!(summary.total, 1000);
        assert_eq!(summary.received, 400);
        assert_eq!(summary.remaining, 600);
    }

    #[test]
    fn financial_summary_saturates_when_overfunded() {
        let mut project = project_with_total(1000);
        project.budget.received = 1500;
        assert_eq!(financial_summary(&project).remaining, 0);
    }

    #[test]
    fn upcoming_deadlines_are_stable_on_ties() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let mut first = task("t1", TaskStatus::Todo, 0);
        let mut second = task("t2", TaskStatus::InProgress, 0);
        let mut done = task("t3", TaskStatus::Completed, 0);
        first.due_date = date;
        second.due_date = date;
        done.due_date = date;

        let upcoming = upcoming_deadlines(&[first, second, done], 5);
        let ids: Vec<&str> = upcoming.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }
}
