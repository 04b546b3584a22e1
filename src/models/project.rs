use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::collection::{Patch, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
}

/// One line of the budget breakdown; order matters for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub id: String,
    pub label: String,
    pub value: u64,
}

/// `received <= total` is not enforced anywhere; overfunded projects are
/// accepted as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub total: u64,
    pub received: u64,
    pub breakdown: Vec<BudgetLine>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// The client account this project belongs to.
    pub client_id: String,
    /// Denormalized display name; not kept in sync with the client account.
    pub client_name: String,
    /// Editor accounts working on this project.
    pub member_ids: Vec<String>,
    pub status: ProjectStatus,
    pub timeline: Timeline,
    pub budget: Budget,
}

impl Project {
    pub fn from_draft(draft: ProjectDraft, id: String, today: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name.unwrap_or_else(|| "New Project".to_string()),
            client_id: draft.client_id.unwrap_or_default(),
            client_name: draft
                .client_name
                .unwrap_or_else(|| "Unassigned Client".to_string()),
            member_ids: draft.member_ids.unwrap_or_default(),
            status: draft.status.unwrap_or(ProjectStatus::Planning),
            timeline: draft.timeline.unwrap_or(Timeline {
                start: today,
                end: today,
            }),
            budget: draft.budget.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub member_ids: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub timeline: Option<Timeline>,
    pub budget: Option<Budget>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub member_ids: Option<Vec<String>>,
    pub status: Option<ProjectStatus>,
    pub timeline: Option<Timeline>,
    pub budget: Option<Budget>,
}

impl Record for Project {
    const KIND: &'static str = "project";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Patch<Project> for ProjectPatch {
    fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(client_id) = self.client_id {
            project.client_id = client_id;
        }
        if let Some(client_name) = self.client_name {
            project.client_name = client_name;
        }
        if let Some(member_ids) = self.member_ids {
            project.member_ids = member_ids;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(timeline) = self.timeline {
            project.timeline = timeline;
        }
        if let Some(budget) = self.budget {
            project.budget = budget;
        }
    }
}
