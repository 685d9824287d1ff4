// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod error;
pub mod identity;
pub mod memory;
pub mod password;
pub mod session;
pub mod token_generator;
mod service;
mod service_impl;

pub use error::{AuthError, InfrastructureError};
pub use identity::{Identity, IdentityStore, StoreError};
pub use memory::InMemoryIdentityStore;
pub use password::{HashError, HashParams, PasswordHasher};
pub use session::{Session, SessionManager, MAX_SESSION_TTL, SESSION_TTL};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
