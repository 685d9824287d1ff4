// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Flat-file identity store.
//!
//! All identities live in one pretty-printed JSON document,
//! `<root>/identities.json`. Writes go to a temporary file that is renamed
//! over the document, so a crash mid-write leaves the previous version.
use crate::auth::{Identity, IdentityStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use credentials_common::IdentityId;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::{fs as tokio_fs, sync::Mutex};
use uuid::Uuid;

const IDENTITIES_FILE: &str = "identities.json";

/// Identity store backed by a JSON file
#[derive(Clone)]
pub struct FlatFileIdentityStore {
    root: PathBuf,
    /// Cached file contents; the lock also serializes writers
    identities: Arc<Mutex<Vec<Identity>>>,
}

impl FlatFileIdentityStore {
    /// Open the store under `root`, creating the directory if needed
    pub async fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        tokio_fs::create_dir_all(&root).await?;

        let path = root.join(IDENTITIES_FILE);
        let identities = if tokio_fs::try_exists(&path).await? {
            let content = tokio_fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), count = identities.len(), "opened identity store");

        Ok(Self {
            root,
            identities: Arc::new(Mutex::new(identities)),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(IDENTITIES_FILE)
    }

    async fn persist(&self, identities: &[Identity]) -> Result<(), StoreError> {
        let path = self.path();
        let tmp = self.root.join(format!("{IDENTITIES_FILE}.tmp"));

        let json = serde_json::to_string_pretty(identities)?;
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for FlatFileIdentityStore {
    async fn find(&self, email: &str) -> Result<Vec<Identity>, StoreError> {
        let identities = self.identities.lock().await;
        Ok(identities
            .iter()
            .filter(|identity| identity.email == email)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: IdentityId) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.lock().await;
        Ok(identities.iter().find(|identity| identity.id == id).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
        let mut identities = self.identities.lock().await;
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

        if let Err(e) = self.persist(&identities).await {
            // keep the cache in step with the file
            identities.pop();
            tracing::error!(error = %e, "failed to persist identity store");
            return Err(e);
        }

        Ok(identity)
    }
}
