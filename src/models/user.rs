use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::collection::{Patch, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Client => "Client",
        }
    }
}

/// An account in the workspace. Accounts are provisioned on first sign-in
/// and are never deleted; suspension is `active = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    /// Unique across the workspace; immutable after provisioning.
    pub email: String,
    pub name: String,
    pub avatar_ref: String,
    pub role: Role,
    pub active: bool,
    pub last_login: DateTime<Utc>,
    pub assigned_project_ids: Vec<String>,
}

impl User {
    pub fn from_draft(draft: UserDraft, id: String, now: DateTime<Utc>) -> Self {
        let name = draft
            .name
            .unwrap_or_else(|| local_part(&draft.email).to_string());
        let avatar_ref = draft
            .avatar_ref
            .unwrap_or_else(|| format!("https://picsum.photos/200/200?random={id}"));
        Self {
            id,
            email: draft.email,
            name,
            avatar_ref,
            role: draft.role,
            active: true,
            last_login: now,
            assigned_project_ids: draft.assigned_project_ids.unwrap_or_default(),
        }
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Inputs for provisioning a user. `email` and `role` are always decided by
/// the auth gateway; everything else falls back to the defaults above.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub avatar_ref: Option<String>,
    pub assigned_project_ids: Option<Vec<String>>,
}

impl UserDraft {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            name: None,
            avatar_ref: None,
            assigned_project_ids: None,
        }
    }
}

/// Shallow-merge update. `email` is deliberately absent: it is the identity
/// key and never changes after provisioning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar_ref: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
    pub last_login: Option<DateTime<Utc>>,
    pub assigned_project_ids: Option<Vec<String>>,
}

impl Record for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Patch<User> for UserPatch {
    fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(avatar_ref) = self.avatar_ref {
            user.avatar_ref = avatar_ref;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(active) = self.active {
            user.active = active;
        }
        if let Some(last_login) = self.last_login {
            user.last_login = last_login;
        }
        if let Some(assigned) = self.assigned_project_ids {
            user.assigned_project_ids = assigned;
        }
    }
}
