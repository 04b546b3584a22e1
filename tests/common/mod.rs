use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use atelier::auth::{AuthProvider, ProviderError, SignInProfile};
use atelier::settings::{Config, DefaultRole};
use atelier::AppState;

pub fn test_config() -> Config {
    Config {
        admin_email: "boss@agency.test".to_string(),
        default_role: DefaultRole::Editor,
        seed_demo_data: false,
        upcoming_preview: 4,
    }
}

/// Fresh workspace in a temp dir. Keep the `TempDir` alive for the test's
/// duration or the blob store loses its backing file.
pub async fn test_app(config: Config) -> (TempDir, AppState) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().expect("create temp dir");
    let app = AppState::init(dir.path(), config)
        .await
        .expect("init app state");
    (dir, app)
}

/// Scripted identity provider: either hands out a fixed profile or fails
/// with a domain-authorization error. Records sign-out calls.
pub struct StubProvider {
    pub profile: Option<SignInProfile>,
    pub unauthorized_domain: bool,
    pub signed_out: AtomicBool,
}

impl StubProvider {
    pub fn with_email(email: &str) -> Self {
        Self {
            profile: Some(SignInProfile {
                email: email.to_string(),
                display_name: Some("Stub User".to_string()),
                photo_url: None,
                external_id: "ext-1".to_string(),
            }),
            unauthorized_domain: false,
            signed_out: AtomicBool::new(false),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            profile: None,
            unauthorized_domain: true,
            signed_out: AtomicBool::new(false),
        }
    }

    pub fn was_signed_out(&self) -> bool {
        self.signed_out.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for StubProvider {
    async fn sign_in(&self) -> Result<SignInProfile, ProviderError> {
        if self.unauthorized_domain {
            return Err(ProviderError::UnauthorizedDomain);
        }
        self.profile
            .clone()
            .ok_or_else(|| ProviderError::Other("no profile scripted".to_string()))
    }

    async fn sign_out(&self) {
        self.signed_out.store(true, Ordering::SeqCst);
    }
}
