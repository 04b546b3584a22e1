//! State core of a role-based workspace for creative agencies: identity
//! resolution, the persisted entity store, visibility scoping, mutation
//! authorization, and the derived views. Rendering and the concrete
//! identity provider live outside; the provider plugs in through
//! [`auth::AuthProvider`].

pub mod access;
pub mod auth;
pub mod calendar;
pub mod commands;
pub mod error;
pub mod metrics;
pub mod models;
pub mod persist;
pub mod seed;
pub mod settings;
pub mod store;

use std::path::Path;

use anyhow::Result;
use log::info;

use auth::AuthGateway;
use persist::BlobStore;
use settings::Config;
use store::Store;

const BLOB_STORE_FILE: &str = "workspace.sqlite3";

/// The application context: every component that needs state receives this
/// (or a part of it) explicitly. There are no process-wide singletons.
pub struct AppState {
    pub config: Config,
    pub blob: BlobStore,
    pub store: Store,
    pub auth: AuthGateway,
}

impl AppState {
    /// Opens (or creates) the workspace under `data_dir`, loads the
    /// persisted snapshot, seeds demo data into a brand-new workspace when
    /// configured, and re-establishes the persisted session if it still
    /// resolves to an active account.
    pub async fn init(data_dir: &Path, config: Config) -> Result<Self> {
        let blob = BlobStore::new(data_dir.join(BLOB_STORE_FILE))?;
        let mut store = Store::open(blob.clone()).await?;

        if store.is_empty() && config.seed_demo_data {
            info!("Empty workspace; seeding demo data");
            seed::populate(&mut store, &config);
        }

        let mut auth = AuthGateway::new();
        auth.restore(&blob, &store).await;

        Ok(Self {
            config,
            blob,
            store,
            auth,
        })
    }

    /// Scoped dashboard for the signed-in user; `None` while
    /// unauthenticated.
    pub fn dashboard(&self, today: chrono::NaiveDate) -> Option<metrics::DashboardSummary> {
        let user = self.auth.current_user(&self.store)?;
        Some(metrics::dashboard_summary(
            &self.store,
            user,
            today,
            self.config.upcoming_preview,
        ))
    }

    /// Scoped content calendar for the signed-in user; `None` while
    /// unauthenticated.
    pub fn content_calendar(&self, year: i32, month: u32) -> Option<calendar::CalendarMonth> {
        let user = self.auth.current_user(&self.store)?;
        let posts = access::visible_posts(&self.store, user);
        Some(calendar::CalendarMonth::build(year, month, &posts))
    }
}
