// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session artifacts: opaque tokens mapped to identity ids.
//!
//! The cookie value handed to clients is a random token; the identity id
//! it stands for never leaves the server.
use super::token_generator::generate_secure_token;
use crate::metrics::{SESSION_ACTIVE, SESSION_CREATED, SESSION_EXPIRED, SESSION_REVOKED};
use credentials_common::IdentityId;
use dashmap::DashMap;
use metrics::{counter, gauge};
use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::task::JoinHandle;

/// Default session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Longest TTL a session manager accepts; longer values are clamped
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 10); // 10 years

/// Session information
#[derive(Clone, Debug)]
pub struct Session {
    pub identity_id: IdentityId,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

impl Session {
    fn is_live(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

/// Session manager for issuing and resolving session tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SESSION_TTL)
    }
}

impl SessionManager {
    /// Create a new session manager. `ttl` is capped at [`MAX_SESSION_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: ttl.min(MAX_SESSION_TTL),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a session artifact for an identity
    pub fn serialize_session(&self, identity_id: IdentityId) -> String {
        let token = generate_secure_token();
        let now = SystemTime::now();
        self.sessions.insert(
            token.clone(),
            Session {
                identity_id,
                created_at: now,
                expires_at: now.checked_add(self.ttl).unwrap_or(now + MAX_SESSION_TTL),
            },
        );

        counter!(SESSION_CREATED).increment(1);
        gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);
        tracing::debug!(%identity_id, "session issued");

        token
    }

    /// Resolve a session artifact back to the identity id it was issued for.
    ///
    /// Unknown and expired tokens resolve to `None`; expired ones are dropped.
    pub fn resolve_session(&self, token: &str) -> Option<IdentityId> {
        self.get(token).map(|session| session.identity_id)
    }

    /// Get a live session by token
    pub fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.get(token)?.clone();
        if session.is_live(SystemTime::now()) {
            return Some(session);
        }

        self.sessions.remove(token);
        counter!(SESSION_EXPIRED).increment(1);
        gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);
        None
    }

    /// Forget a session. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        let removed = self.sessions.remove(token).is_some();
        if removed {
            counter!(SESSION_REVOKED).increment(1);
            gauge!(SESSION_ACTIVE).set(self.sessions.len() as f64);
        }
        removed
    }

    /// Number of sessions currently held, expired or not
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every expired session, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let now = SystemTime::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.is_live(now));
        let after = self.sessions.len();
        let removed = before.saturating_sub(after);

        if removed > 0 {
            counter!(SESSION_EXPIRED).increment(removed as u64);
            gauge!(SESSION_ACTIVE).set(after as f64);
            tracing::info!(removed, active = after, "expired sessions removed");
        }
        removed
    }

    /// Run [`Self::cleanup_expired`] on a fixed interval
    pub fn spawn_cleanup(&self, every: Duration) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                manager.cleanup_expired();
            }
        })
    }
}
