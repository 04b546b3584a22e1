//! Visibility scoping and mutation authorization. Scoping decides what an
//! identity sees; `authorize` is re-checked at every mutation site, so
//! hiding an entity in a view is never the access check.

use crate::error::AccessError;
use crate::models::{ContentPost, Project, Role, Task, User};
use crate::store::Store;

/// Admin sees every project; a client sees the projects they commissioned;
/// an editor sees the projects they are a member of.
pub fn project_visible(project: &Project, user: &User) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Client => project.client_id == user.id,
        Role::Editor => project.member_ids.iter().any(|id| id == &user.id),
    }
}

pub fn visible_projects(store: &Store, user: &User) -> Vec<Project> {
    store
        .projects()
        .iter()
        .filter(|p| project_visible(p, user))
        .cloned()
        .collect()
}

/// A task is visible iff its parent project is. A task whose project was
/// deleted dangles and is visible to no one.
pub fn visible_tasks(store: &Store, user: &User) -> Vec<Task> {
    store
        .tasks()
        .iter()
        .filter(|t| {
            store
                .project(&t.project_id)
                .is_some_and(|p| project_visible(p, user))
        })
        .cloned()
        .collect()
}

/// Post visibility is project-scoped, not author-scoped: an editor sees all
/// posts of their projects, not just their own.
pub fn visible_posts(store: &Store, user: &User) -> Vec<ContentPost> {
    store
        .posts()
        .iter()
        .filter(|cp| {
            store
                .project(&cp.project_id)
                .is_some_and(|p| project_visible(p, user))
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, edit, or delete projects.
    ManageProjects,
    /// Create, edit, delete, or reassign tasks.
    ManageTasks,
    /// Move a task along the status pipeline.
    AdvanceTasks,
    /// Create, edit, or delete content posts.
    SchedulePosts,
    /// Change roles, suspension, or project assignment on accounts.
    ManageAccounts,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Action::ManageProjects => "manage projects",
            Action::ManageTasks => "manage tasks",
            Action::AdvanceTasks => "advance task status",
            Action::SchedulePosts => "schedule content",
            Action::ManageAccounts => "manage accounts",
        }
    }
}

/// The role/action matrix. Admin does everything; editors only advance
/// task status; clients are read-only system-wide.
pub fn authorize(user: &User, action: Action) -> Result<(), AccessError> {
    let allowed = match (user.role, action) {
        (Role::Admin, _) => true,
        (Role::Editor, Action::AdvanceTasks) => true,
        (Role::Editor, _) => false,
        (Role::Client, _) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessError {
            role: user.role,
            action: action.describe(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectDraft, UserDraft};

    fn user(role: Role) -> User {
        User::from_draft(
            UserDraft::new(format!("{}@example.com", role.as_str()), role),
            format!("id-{}", role.as_str()),
            chrono::Utc::now(),
        )
    }

    #[test]
    fn admin_passes_every_action() {
        let admin = user(Role::Admin);
        for action in [
            Action::ManageProjects,
            Action::ManageTasks,
            Action::AdvanceTasks,
            Action::SchedulePosts,
            Action::ManageAccounts,
        ] {
            assert!(authorize(&admin, action).is_ok());
        }
    }

    #[test]
    fn editor_only_advances_task_status() {
        let editor = user(Role::Editor);
        assert!(authorize(&editor, Action::AdvanceTasks).is_ok());
        assert!(authorize(&editor, Action::SchedulePosts).is_err());
        assert!(authorize(&editor, Action::ManageProjects).is_err());
        assert!(authorize(&editor, Action::ManageTasks).is_err());
        assert!(authorize(&editor, Action::ManageAccounts).is_err());
    }

    #[test]
    fn client_is_read_only() {
        let client = user(Role::Client);
        for action in [
            Action::ManageProjects,
            Action::ManageTasks,
            Action::AdvanceTasks,
            Action::SchedulePosts,
            Action::ManageAccounts,
        ] {
            assert!(authorize(&client, action).is_err());
        }
    }

    #[test]
    fn project_visibility_by_role() {
        let mut project = Project::from_draft(
            ProjectDraft::default(),
            "p1".to_string(),
            chrono::Utc::now().date_naive(),
        );
        project.client_id = "c1".to_string();
        project.member_ids = vec!["e1".to_string()];

        let admin = user(Role::Admin);
        let mut client = user(Role::Client);
        let mut editor = user(Role::Editor);
        client.id = "c1".to_string();
        editor.id = "e1".to_string();

        assert!(project_visible(&project, &admin));
        assert!(project_visible(&project, &client));
        assert!(project_visible(&project, &editor));

        let stranger = user(Role::Client);
        assert!(!project_visible(&project, &stranger));
    }
}
