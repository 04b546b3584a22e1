use crate::access::{authorize, project_visible, Action};
use crate::error::{AccessError, CommandError};
use crate::models::{Role, Task, TaskDraft, TaskPatch, TaskStatus};
use crate::AppState;

use super::actor;

pub fn create_task(app: &mut AppState, draft: TaskDraft) -> Result<Task, CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageTasks)?;
    Ok(app.store.create_task(draft))
}

/// Whole-field task edits, including reassignment. Admin only; editors go
/// through [`advance_task_status`].
pub fn update_task(app: &mut AppState, id: &str, patch: TaskPatch) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageTasks)?;
    app.store.update_task(id, patch);
    Ok(())
}

/// Moves a task along the pipeline. Editors may do this for tasks inside
/// projects they are a member of; touching anything else stays Admin-only.
pub fn advance_task_status(
    app: &mut AppState,
    id: &str,
    status: TaskStatus,
) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::AdvanceTasks)?;

    if user.role == Role::Editor {
        let in_scope = app.store.task(id).is_some_and(|task| {
            app.store
                .project(&task.project_id)
                .is_some_and(|project| project_visible(project, &user))
        });
        if !in_scope {
            return Err(CommandError::Forbidden(AccessError {
                role: user.role,
                action: "advance tasks outside assigned projects",
            }));
        }
    }

    app.store.update_task(id, TaskPatch::status(status));
    Ok(())
}

pub fn delete_task(app: &mut AppState, id: &str) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageTasks)?;
    app.store.delete_task(id);
    Ok(())
}
