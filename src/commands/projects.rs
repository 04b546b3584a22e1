use crate::access::{authorize, Action};
use crate::error::CommandError;
use crate::models::{Project, ProjectDraft, ProjectPatch};
use crate::AppState;

use super::actor;

pub fn create_project(app: &mut AppState, draft: ProjectDraft) -> Result<Project, CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageProjects)?;
    Ok(app.store.create_project(draft))
}

pub fn update_project(
    app: &mut AppState,
    id: &str,
    patch: ProjectPatch,
) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageProjects)?;
    app.store.update_project(id, patch);
    Ok(())
}

pub fn delete_project(app: &mut AppState, id: &str) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::ManageProjects)?;
    app.store.delete_project(id);
    Ok(())
}
