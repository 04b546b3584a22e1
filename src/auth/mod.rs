//! Session establishment and teardown. The gateway stores only the
//! signed-in user id and resolves it against the store on every read, so a
//! mid-session suspension locks the account out immediately.

mod provider;

pub use provider::{AuthProvider, ProviderError, SignInProfile};

use chrono::Utc;
use log::{info, warn};

use crate::error::AuthError;
use crate::models::{User, UserDraft, UserPatch};
use crate::persist::{BlobStore, KEY_SESSION};
use crate::settings::Config;
use crate::store::Store;

#[derive(Default)]
pub struct AuthGateway {
    current: Option<String>,
}

impl AuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the external popup flow and resolves the returned profile.
    /// A domain-authorization refusal maps to `UnauthorizedDomain`, the
    /// caller's cue to fall back to [`sign_in_with_email`].
    ///
    /// [`sign_in_with_email`]: AuthGateway::sign_in_with_email
    pub async fn sign_in_with_provider(
        &mut self,
        provider: &dyn AuthProvider,
        store: &mut Store,
        blob: &BlobStore,
        config: &Config,
    ) -> Result<User, AuthError> {
        let profile = match provider.sign_in().await {
            Ok(profile) => profile,
            Err(ProviderError::UnauthorizedDomain) => return Err(AuthError::UnauthorizedDomain),
            Err(ProviderError::Other(msg)) => return Err(AuthError::Provider(msg)),
        };

        match self.resolve(
            &profile.email,
            profile.display_name.as_deref(),
            profile.photo_url.as_deref(),
            store,
            blob,
            config,
        ) {
            Err(err @ AuthError::AccountSuspended { .. }) => {
                // The provider considers the sign-in successful; undo it so
                // a retry goes through the popup again.
                provider.sign_out().await;
                Err(err)
            }
            other => other,
        }
    }

    /// Manual email fallback for deployments or domains without the popup
    /// provider.
    pub fn sign_in_with_email(
        &mut self,
        email: &str,
        store: &mut Store,
        blob: &BlobStore,
        config: &Config,
    ) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        self.resolve(email, None, None, store, blob, config)
    }

    fn resolve(
        &mut self,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
        store: &mut Store,
        blob: &BlobStore,
        config: &Config,
    ) -> Result<User, AuthError> {
        if let Some(existing) = store.find_user_by_email(email) {
            if !existing.active {
                warn!("Refused sign-in for suspended account {email}");
                return Err(AuthError::AccountSuspended {
                    email: email.to_string(),
                });
            }

            let id = existing.id.clone();
            store.update_user(
                &id,
                UserPatch {
                    last_login: Some(Utc::now()),
                    ..UserPatch::default()
                },
            );
            self.current = Some(id.clone());
            blob.put(KEY_SESSION, id.clone());

            let user = store
                .user(&id)
                .cloned()
                .ok_or_else(|| AuthError::Provider("account vanished during sign-in".into()))?;
            info!("Signed in {email} as {}", user.role.as_str());
            return Ok(user);
        }

        // First sign-in for this address: auto-provision.
        let role = config.role_for(email);
        let mut draft = UserDraft::new(email, role);
        draft.name = display_name.map(str::to_string);
        draft.avatar_ref = photo_url.map(str::to_string);
        let user = store.create_user(draft);

        self.current = Some(user.id.clone());
        blob.put(KEY_SESSION, user.id.clone());
        info!("Provisioned {email} with role {}", role.as_str());
        Ok(user)
    }

    pub async fn sign_out(&mut self, provider: &dyn AuthProvider, blob: &BlobStore) {
        self.current = None;
        blob.remove(KEY_SESSION);
        provider.sign_out().await;
    }

    /// Clears the session without touching the provider; used by the manual
    /// login path.
    pub fn clear(&mut self, blob: &BlobStore) {
        self.current = None;
        blob.remove(KEY_SESSION);
    }

    /// Re-establishes a session from the persisted pointer. The pointer is
    /// never trusted blindly: a missing or suspended account clears it.
    pub async fn restore(&mut self, blob: &BlobStore, store: &Store) -> Option<String> {
        let id = match blob.get(KEY_SESSION).await {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(err) => {
                warn!("Failed to read persisted session pointer: {err:#}");
                return None;
            }
        };

        match store.user(&id) {
            Some(user) if user.active => {
                info!("Restored session for {}", user.email);
                self.current = Some(id.clone());
                Some(id)
            }
            _ => {
                warn!("Persisted session pointer {id} no longer resolves to an active account");
                blob.remove(KEY_SESSION);
                None
            }
        }
    }

    /// The signed-in account, resolved live. `None` when unauthenticated or
    /// when the account has been suspended since sign-in.
    pub fn current_user<'a>(&self, store: &'a Store) -> Option<&'a User> {
        let id = self.current.as_deref()?;
        store.user(id).filter(|user| user.active)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
