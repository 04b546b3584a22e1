//! The single point of truth for workspace entities. Mutations edit in
//! memory, then queue a full-snapshot persist through the blob worker.

pub mod collection;

use anyhow::{Context, Result};
use chrono::Utc;
use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    ContentPost, PostDraft, PostPatch, Project, ProjectDraft, ProjectPatch, Task, TaskDraft,
    TaskPatch, User, UserDraft, UserPatch,
};
use crate::persist::{BlobStore, KEY_POSTS, KEY_PROJECTS, KEY_TASKS, KEY_USERS};
use collection::{Collection, Record};

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn load_collection<E>(raw: Option<String>, key: &str) -> Result<Collection<E>>
where
    E: Record + DeserializeOwned,
{
    match raw {
        Some(json) => {
            let items: Vec<E> = serde_json::from_str(&json)
                .with_context(|| format!("failed to decode `{key}` blob"))?;
            Ok(Collection::from_items(items))
        }
        None => Ok(Collection::default()),
    }
}

pub struct Store {
    users: Collection<User>,
    projects: Collection<Project>,
    tasks: Collection<Task>,
    posts: Collection<ContentPost>,
    blob: BlobStore,
}

impl Store {
    /// Loads the persisted snapshot; absent keys start as empty collections.
    pub async fn open(blob: BlobStore) -> Result<Self> {
        let users = load_collection(blob.get(KEY_USERS).await?, KEY_USERS)?;
        let projects = load_collection(blob.get(KEY_PROJECTS).await?, KEY_PROJECTS)?;
        let tasks = load_collection(blob.get(KEY_TASKS).await?, KEY_TASKS)?;
        let posts = load_collection(blob.get(KEY_POSTS).await?, KEY_POSTS)?;

        Ok(Self {
            users,
            projects,
            tasks,
            posts,
            blob,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.projects.is_empty()
            && self.tasks.is_empty()
            && self.posts.is_empty()
    }

    // --- users (no delete: suspension keeps the record) ---

    pub fn create_user(&mut self, draft: UserDraft) -> User {
        let user = User::from_draft(draft, fresh_id(), Utc::now());
        self.users.insert(user.clone());
        self.persist();
        user
    }

    pub fn update_user(&mut self, id: &str, patch: UserPatch) {
        self.users.update(id, patch);
        self.persist();
    }

    pub fn users(&self) -> &[User] {
        self.users.as_slice()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .as_slice()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    // --- projects ---

    pub fn create_project(&mut self, draft: ProjectDraft) -> Project {
        let project = Project::from_draft(draft, fresh_id(), Utc::now().date_naive());
        self.projects.insert(project.clone());
        self.persist();
        project
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) {
        self.projects.update(id, patch);
        self.persist();
    }

    /// Hard delete. Tasks and posts pointing at the project are left in
    /// place; lookups through the dangling id resolve to not-found.
    pub fn delete_project(&mut self, id: &str) {
        self.projects.remove(id);
        self.persist();
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.as_slice()
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    // --- tasks ---

    pub fn create_task(&mut self, draft: TaskDraft) -> Task {
        let task = Task::from_draft(draft, fresh_id(), Utc::now().date_naive());
        self.tasks.insert(task.clone());
        self.persist();
        task
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) {
        self.tasks.update(id, patch);
        self.persist();
    }

    pub fn delete_task(&mut self, id: &str) {
        self.tasks.remove(id);
        self.persist();
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    // --- content posts ---

    pub fn create_post(&mut self, draft: PostDraft) -> ContentPost {
        let post = ContentPost::from_draft(draft, fresh_id(), Utc::now().date_naive());
        self.posts.insert(post.clone());
        self.persist();
        post
    }

    pub fn update_post(&mut self, id: &str, patch: PostPatch) {
        self.posts.update(id, patch);
        self.persist();
    }

    pub fn delete_post(&mut self, id: &str) {
        self.posts.remove(id);
        self.persist();
    }

    pub fn posts(&self) -> &[ContentPost] {
        self.posts.as_slice()
    }

    pub fn post(&self, id: &str) -> Option<&ContentPost> {
        self.posts.get(id)
    }

    // --- persistence ---

    fn snapshot_entries(&self) -> Result<Vec<(&'static str, String)>> {
        fn encode<E: Serialize>(items: &[E], key: &str) -> Result<String> {
            serde_json::to_string(items).with_context(|| format!("failed to encode `{key}` blob"))
        }

        Ok(vec![
            (KEY_USERS, encode(self.users.as_slice(), KEY_USERS)?),
            (KEY_PROJECTS, encode(self.projects.as_slice(), KEY_PROJECTS)?),
            (KEY_TASKS, encode(self.tasks.as_slice(), KEY_TASKS)?),
            (KEY_POSTS, encode(self.posts.as_slice(), KEY_POSTS)?),
        ])
    }

    fn persist(&self) {
        match self.snapshot_entries() {
            Ok(entries) => self.blob.put_all(entries),
            Err(err) => error!("Skipping persist; snapshot serialization failed: {err:#}"),
        }
    }
}
