// ============================
// crates/backend-lib/src/auth/identity.rs
// ============================
//! Identity record and the store abstraction the auth service consumes.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use credentials_common::{IdentityId, IdentityView};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A stored account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Assigned by the store at creation, never changed afterwards
    pub id: IdentityId,
    /// Exactly as supplied at signup
    pub email: String,
    /// Encoded `salt.digest`, see [`crate::auth::password`]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Public projection without the password hash
    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Errors surfaced by identity stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store's uniqueness constraint rejected the email
    #[error("email already in use: {0}")]
    DuplicateEmail(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence capability needed by the auth service
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// All identities whose email matches exactly, in insertion order
    async fn find(&self, email: &str) -> Result<Vec<Identity>, StoreError>;

    /// Identity with the given id, if any
    async fn find_one(&self, id: IdentityId) -> Result<Option<Identity>, StoreError>;

    /// Persist a new identity under a freshly assigned id
    async fn create(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError>;
}
