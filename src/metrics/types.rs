use serde::{Deserialize, Serialize};

use crate::models::{ProjectStatus, Task};

/// Task-pipeline and budget progress for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// round(100 * completed / total); 0 with no tasks.
    pub completion_pct: u32,
    /// Sum of `value` over Completed tasks.
    pub completed_value: u64,
    /// round(100 * completed_value / budget.total); 0 with a zero budget.
    /// Can exceed 100 when completed values outrun the budget.
    pub budget_utilization_pct: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total: u64,
    pub received: u64,
    pub remaining: u64,
}

/// One entry of the dashboard's recent-projects list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub project_id: String,
    pub name: String,
    pub client_name: String,
    pub status: ProjectStatus,
    pub progress: ProjectProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_projects: usize,
    pub total_tasks: usize,
    pub due_this_week: usize,
    pub recent_projects: Vec<ProjectCard>,
    pub upcoming: Vec<Task>,
}
