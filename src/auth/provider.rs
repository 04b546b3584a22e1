use async_trait::async_trait;

/// What the external identity provider hands back on a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInProfile {
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub external_id: String,
}

/// Provider-side failures, modeled as a result rather than a thrown
/// exception so the fallback path is an explicit branch.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("domain not authorized for sign-in")]
    UnauthorizedDomain,

    #[error("{0}")]
    Other(String),
}

/// The external identity capability (e.g. a Google popup flow). The gateway
/// never assumes anything about the implementation beyond this contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self) -> Result<SignInProfile, ProviderError>;

    async fn sign_out(&self);
}
