use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::collection::{Patch, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    LinkedIn,
    X,
    Facebook,
}

/// Normalized publishing status. Earlier deployments wrote `"Done"` for
/// published posts; the alias keeps those blobs loadable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostStatus {
    Draft,
    Scheduled,
    #[serde(alias = "Done")]
    Published,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPost {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub platform: Platform,
    pub status: PostStatus,
    pub editor_id: String,
    /// Weak reference; the task may have been deleted since.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl ContentPost {
    pub fn from_draft(draft: PostDraft, id: String, today: NaiveDate) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            title: draft
                .title
                .unwrap_or_else(|| "New Content Piece".to_string()),
            date: draft.date.unwrap_or(today),
            platform: draft.platform.unwrap_or(Platform::Instagram),
            status: draft.status.unwrap_or(PostStatus::Draft),
            editor_id: draft.editor_id.unwrap_or_default(),
            task_id: draft.task_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub project_id: String,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub platform: Option<Platform>,
    pub status: Option<PostStatus>,
    pub editor_id: Option<String>,
    pub task_id: Option<String>,
}

impl PostDraft {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: None,
            date: None,
            platform: None,
            status: None,
            editor_id: None,
            task_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub platform: Option<Platform>,
    pub status: Option<PostStatus>,
    pub editor_id: Option<String>,
    /// `Some(None)` clears the task link; `None` leaves it untouched.
    pub task_id: Option<Option<String>>,
}

impl Record for ContentPost {
    const KIND: &'static str = "post";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Patch<ContentPost> for PostPatch {
    fn apply(self, post: &mut ContentPost) {
        if let Some(project_id) = self.project_id {
            post.project_id = project_id;
        }
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
        if let Some(platform) = self.platform {
            post.platform = platform;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if let Some(editor_id) = self.editor_id {
            post.editor_id = editor_id;
        }
        if let Some(task_id) = self.task_id {
            post.task_id = task_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_done_status_still_loads() {
        let json = r#"{
            "id": "cp1",
            "projectId": "p1",
            "title": "Match Stories Reel",
            "date": "2024-06-10",
            "platform": "Instagram",
            "status": "Done",
            "editorId": "u2"
        }"#;
        let post: ContentPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.status, PostStatus::Published);
        assert!(post.task_id.is_none());

        // New snapshots always write the normalized spelling.
        let out = serde_json::to_string(&post).unwrap();
        assert!(out.contains("\"Published\""));
    }
}
