// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the credential server.

pub mod session;

pub use session::{current_identity, CurrentIdentity};
