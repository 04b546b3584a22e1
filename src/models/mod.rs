mod post;
mod project;
mod task;
mod user;

pub use post::{ContentPost, Platform, PostDraft, PostPatch, PostStatus};
pub use project::{
    Budget, BudgetLine, Project, ProjectDraft, ProjectPatch, ProjectStatus, Timeline,
};
pub use task::{Task, TaskDraft, TaskPatch, TaskStatus};
pub use user::{Role, User, UserDraft, UserPatch};
