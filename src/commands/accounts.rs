use crate::access::{authorize, Action};
use crate::error::CommandError;
use crate::models::{Role, UserPatch};
use crate::AppState;

use super::actor;

/// Roles change only through an Admin action.
pub fn set_user_role(app: &mut AppState, user_id: &str, role: Role) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageAccounts)?;
    app.store.update_user(
        user_id,
        UserPatch {
            role: Some(role),
            ..UserPatch::default()
        },
    );
    Ok(())
}

/// Suspends or reactivates an account. The record always persists; a
/// suspended user simply cannot establish a session.
pub fn set_user_active(app: &mut AppState, user_id: &str, active: bool) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageAccounts)?;
    app.store.update_user(
        user_id,
        UserPatch {
            active: Some(active),
            ..UserPatch::default()
        },
    );
    Ok(())
}

/// Adds the project to the user's assignment list, or removes it when
/// already present.
pub fn toggle_project_assignment(
    app: &mut AppState,
    user_id: &str,
    project_id: &str,
) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageAccounts)?;

    let Some(target) = app.store.user(user_id) else {
        // Same contract as the store: a stale id is a no-op.
        return Ok(());
    };

    let mut assigned = target.assigned_project_ids.clone();
    if assigned.iter().any(|id| id == project_id) {
        assigned.retain(|id| id != project_id);
    } else {
        assigned.push(project_id.to_string());
    }

    app.store.update_user(
        user_id,
        UserPatch {
            assigned_project_ids: Some(assigned),
            ..UserPatch::default()
        },
    );
    Ok(())
}
