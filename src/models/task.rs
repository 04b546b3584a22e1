use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::collection::{Patch, Record};

/// Pipeline stages, in order. Only `Completed` counts toward budget
/// utilization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub assigned_editor_id: String,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    /// Money earned toward the project budget once the task is Completed.
    pub value: u64,
}

impl Task {
    pub fn from_draft(draft: TaskDraft, id: String, today: NaiveDate) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            title: draft.title.unwrap_or_else(|| "Untitled Task".to_string()),
            description: draft.description.unwrap_or_default(),
            assigned_editor_id: draft.assigned_editor_id.unwrap_or_default(),
            due_date: draft.due_date.unwrap_or(today),
            status: draft.status.unwrap_or(TaskStatus::Todo),
            value: draft.value.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub project_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_editor_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub value: Option<u64>,
}

impl TaskDraft {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: None,
            description: None,
            assigned_editor_id: None,
            due_date: None,
            status: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_editor_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub value: Option<u64>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Record for Task {
    const KIND: &'static str = "task";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Patch<Task> for TaskPatch {
    fn apply(self, task: &mut Task) {
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(assigned_editor_id) = self.assigned_editor_id {
            task.assigned_editor_id = assigned_editor_id;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(value) = self.value {
            task.value = value;
        }
    }
}
