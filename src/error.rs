use crate::models::Role;

/// Sign-in failures. These are surfaced to the caller with human-readable
/// messages; none of them is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("This account has been suspended. Contact your workspace admin.")]
    AccountSuspended { email: String },

    /// The identity provider refused the sign-in domain. Callers should
    /// offer the manual email fallback when they see this.
    #[error("Sign-in is not authorized for this domain.")]
    UnauthorizedDomain,

    #[error("Identity provider failure: {0}")]
    Provider(String),

    #[error("An email address is required to sign in.")]
    MissingEmail,
}

#[derive(Debug, thiserror::Error)]
#[error("{role:?} may not {action}")]
pub struct AccessError {
    pub role: Role,
    pub action: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Failure modes of the role-gated operation layer.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no active session")]
    NotSignedIn,

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
