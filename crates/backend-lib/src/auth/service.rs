use super::{AuthError, Identity};
use async_trait::async_trait;
use credentials_common::IdentityId;

/// Signup and signin over some identity store
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a new identity. Fails with [`AuthError::DuplicateIdentity`]
    /// when the email is already in use.
    async fn signup(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Re-establish an identity from its email and password
    async fn signin(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Look up an identity by id, e.g. to resolve a session
    async fn identity(&self, id: IdentityId) -> Result<Option<Identity>, AuthError>;
}
