//! Role-gated operations over [`AppState`](crate::AppState). Every
//! mutation re-checks the actor's role at the point of mutation.

pub mod accounts;
pub mod content;
pub mod projects;
pub mod tasks;

use crate::error::CommandError;
use crate::models::User;
use crate::AppState;

/// The signed-in actor, or `NotSignedIn`. Cloned so the caller can keep
/// mutating the store while holding it.
fn actor(app: &AppState) -> Result<User, CommandError> {
    app.auth
        .current_user(&app.store)
        .cloned()
        .ok_or(CommandError::NotSignedIn)
}
