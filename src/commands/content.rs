use crate::access::{authorize, Action};
use crate::error::{CommandError, ValidationError};
use crate::models::{ContentPost, PostDraft, PostPatch};
use crate::AppState;

use super::actor;

/// Schedules a post. The title is required at this input boundary; the
/// remaining fields fall back to the entity defaults. An omitted
/// `editor_id` attributes the post to the scheduling admin.
pub fn schedule_post(app: &mut AppState, mut draft: PostDraft) -> Result<ContentPost, CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::SchedulePosts)?;

    if draft.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
        return Err(ValidationError::MissingField("title").into());
    }

    draft.editor_id = draft.editor_id.or_else(|| Some(user.id.clone()));
    Ok(app.store.create_post(draft))
}

pub fn update_post(app: &mut AppState, id: &str, patch: PostPatch) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::SchedulePosts)?;
    app.store.update_post(id, patch);
    Ok(())
}

pub fn delete_post(app: &mut AppState, id: &str) -> Result<(), CommandError> {
    let user = actor(app)?;
    authorize(&user, Action::SchedulePosts)?;
    app.store.delete_post(id);
    Ok(())
}
