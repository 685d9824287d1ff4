// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core of the credential server: password hashing, identity stores,
//! the signup/signin service and its cookie-session HTTP surface.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use crate::auth::{AuthService, DefaultAuth, InMemoryIdentityStore, PasswordHasher, SessionManager};
use crate::config::{Settings, StoreKind};
use crate::storage::FlatFileIdentityStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Session manager
    pub sessions: SessionManager,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state around an existing auth service
    pub fn new(auth: Arc<dyn AuthService>, settings: Settings) -> Self {
        let sessions = SessionManager::new(settings.session_ttl());
        Self {
            auth,
            sessions,
            settings: Arc::new(settings),
        }
    }

    /// Build the store and auth service the settings ask for
    pub async fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(settings.hasher)?;
        let auth: Arc<dyn AuthService> = match settings.store {
            StoreKind::Memory => {
                tracing::warn!("using in-memory identity store, identities are lost on restart");
                Arc::new(DefaultAuth::new(InMemoryIdentityStore::new(), hasher))
            },
            StoreKind::FlatFile => {
                let store = FlatFileIdentityStore::open(&settings.data_dir).await?;
                tracing::info!(path = %store.path().display(), "using flat-file identity store");
                Arc::new(DefaultAuth::new(store, hasher))
            },
        };
        Ok(Self::new(auth, settings))
    }
}
