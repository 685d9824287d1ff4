// ================
// common/src/lib.rs
// ================
//! Wire types shared between the credential server and its clients.
//! These are the JSON bodies accepted and returned by the `/auth` routes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to an identity when it is created
pub type IdentityId = Uuid;

/// Body of `POST /auth/signup` and `POST /auth/signin`
#[derive(Serialize, Deserialize, Clone)]
pub struct Credentials {
    /// Email address, matched case-sensitively
    pub email: String,
    /// Plaintext password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Public view of an identity. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentityView {
    pub id: IdentityId,
    pub email: String,
}

/// Error envelope returned by every failing request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Machine-readable code plus a human-readable message
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    /// Stable error code, e.g. `AUTH_001`
    pub code: String,
    pub message: String,
}
