// ============================
// crates/backend-lib/src/auth/memory.rs
// ============================
//! In-memory identity store.
use super::identity::{Identity, IdentityStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use credentials_common::IdentityId;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Ordered list of identities held in process memory.
///
/// `create` checks for an existing email and inserts under the same write
/// lock, so concurrent signups for one email cannot both succeed.
#[derive(Clone, Default)]
pub struct InMemoryIdentityStore {
    identities: Arc<RwLock<Vec<Identity>>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records. Duplicates are kept as given.
    pub fn with_identities(identities: Vec<Identity>) -> Self {
        Self {
            identities: Arc::new(RwLock::new(identities)),
        }
    }

    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find(&self, email: &str) -> Result<Vec<Identity>, StoreError> {
        let identities = self.identities.read();
        Ok(identities
            .iter()
            .filter(|identity| identity.email == email)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: IdentityId) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read();
        Ok(identities.iter().find(|identity| identity.id == id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
        let mut identities = self.identities.write();
        if identities.iter().any(|identity| identity.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        identities.push(identity.clone());
        Ok(identity)
    }
}
