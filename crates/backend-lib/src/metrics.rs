// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SIGNUP_SUCCEEDED: &str = "auth.signup.succeeded";
pub const SIGNUP_REJECTED: &str = "auth.signup.rejected";
pub const SIGNIN_SUCCEEDED: &str = "auth.signin.succeeded";
pub const SIGNIN_FAILED: &str = "auth.signin.failed";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_REVOKED: &str = "session.revoked";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
