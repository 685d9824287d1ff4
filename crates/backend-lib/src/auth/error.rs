// ============================
// crates/backend-lib/src/auth/error.rs
// ============================
//! Failure kinds of the authentication service.
use super::identity::StoreError;
use super::password::HashError;
use thiserror::Error;

/// Everything signup and signin can fail with
#[derive(Error, Debug)]
pub enum AuthError {
    /// Signup for an email that already belongs to an identity
    #[error("email in use: {email}")]
    DuplicateIdentity { email: String },

    /// Signin for an email with no identity
    #[error("no identity for email: {email}")]
    IdentityNotFound { email: String },

    /// Signin with a password that does not verify
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("infrastructure failure: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

/// Opaque failures of the collaborators the service depends on
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Infrastructure(err.into())
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        AuthError::Infrastructure(err.into())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Infrastructure(err.into())
    }
}
